pub mod error;
pub mod extract;
pub mod ports;
pub mod prompts;
pub mod service;
