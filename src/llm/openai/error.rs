//! Error types raised by the OpenAI-compatible client.

use reqwest::StatusCode;
use thiserror::Error;

use crate::llm::CompletionError;

/// Convenient result alias returning [`OpenAiError`] failures.
pub type OpenAiResult<T> = Result<T, OpenAiError>;

/// Failures that can occur while talking to the completion API.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// Required environment variable is missing.
    #[error("missing environment variable `{var}`")]
    MissingEnvVar { var: &'static str },
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build completion client")]
    ClientBuilder {
        #[source]
        source: reqwest::Error,
    },
    /// The completion request could not be sent or timed out.
    #[error("failed to reach completion API at `{url}`")]
    RequestSend {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The API answered with a non-success status.
    #[error("{message}")]
    RequestStatus {
        status: StatusCode,
        message: String,
        error_type: Option<String>,
        code: Option<String>,
    },
    /// Response payload could not be decoded.
    #[error("failed to decode completion response")]
    DecodeResponse {
        #[source]
        source: reqwest::Error,
    },
    /// The API answered without any assistant content.
    #[error("No response from completion API")]
    EmptyReply,
}

impl From<OpenAiError> for CompletionError {
    fn from(err: OpenAiError) -> Self {
        let timed_out =
            matches!(&err, OpenAiError::RequestSend { source, .. } if source.is_timeout());
        match err {
            OpenAiError::RequestStatus {
                status,
                message,
                error_type,
                code,
            } => CompletionError::Api {
                status: status.as_u16(),
                message,
                error_type,
                code,
            },
            other @ OpenAiError::RequestSend { .. } if timed_out => {
                CompletionError::transport("Request to completion API timed out", other)
            }
            OpenAiError::DecodeResponse { .. } | OpenAiError::EmptyReply => {
                CompletionError::InvalidReply {
                    message: err.to_string(),
                }
            }
            other => CompletionError::transport(other.to_string(), other),
        }
    }
}
