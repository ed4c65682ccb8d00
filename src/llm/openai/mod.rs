//! OpenAI-compatible chat-completion backend.

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
pub use error::{OpenAiError, OpenAiResult};
