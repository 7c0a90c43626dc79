//! OpenAI-compatible chat-completion client.

mod client;
mod wire;

pub use client::OpenAiChatClient;
