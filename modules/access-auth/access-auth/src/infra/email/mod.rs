pub mod resend;
pub mod template;

pub use resend::ResendMailer;
