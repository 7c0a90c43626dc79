pub mod email;
pub mod storage;
