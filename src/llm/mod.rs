//! Chat-completion gateway used to turn conversations into OpenAPI documents.

pub mod openai;

use std::error::Error;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Author of a message exchanged with the language model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions steering the model.
    System,
    /// Message written by the person designing the API.
    User,
    /// Reply previously produced by the model.
    Assistant,
}

/// Single message of a chat-completion exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author of the message.
    pub role: ChatRole,
    /// Plain-text body.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Everything a completion backend needs to answer one turn.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Prompt and conversation, oldest first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Ask the backend to constrain its output to a JSON object.
    pub json_mode: bool,
}

/// Result alias for completion calls.
pub type CompletionResult<T> = Result<T, CompletionError>;

/// Failure raised by a completion backend regardless of the provider.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The request never produced an HTTP response (DNS, TLS, timeout...).
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The provider answered with a non-success status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        error_type: Option<String>,
        code: Option<String>,
    },
    /// The provider answered but the payload held no usable completion.
    #[error("{message}")]
    InvalidReply { message: String },
}

impl CompletionError {
    /// Construct a transport error from any client failure.
    pub fn transport(message: impl Into<String>, source: impl Error + Send + Sync + 'static) -> Self {
        CompletionError::Transport {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Upstream HTTP status, when the provider produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            CompletionError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Abstraction over chat-completion providers.
pub trait CompletionClient: Send + Sync {
    /// Run one completion and return the content of the first assistant choice.
    fn complete(&self, request: CompletionRequest) -> BoxFuture<'static, CompletionResult<String>>;

    /// Identifier of the model answering requests, for logs and health output.
    fn model(&self) -> &str;
}
