pub mod subscriber;
pub mod verification_code;
