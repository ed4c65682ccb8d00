//! DTOs of the conversation session endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::{common::ConversationMessage, format_system_time, validation::validate_yaml_file_name},
    state::{
        language::Language,
        session::{Session, SessionStatus},
    },
};

/// Options for a new session.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// Falls back to the `Accept-Language` header, then English.
    #[serde(default)]
    pub language: Option<Language>,
}

/// New user turn in a session.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SendMessageRequest {
    /// What the designer wants added or changed.
    #[validate(length(min = 1, message = "message content must not be empty"))]
    pub content: String,
}

/// Switch the language of a session.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLanguageRequest {
    /// Language used by later turns.
    pub language: Language,
}

/// Specification file uploaded by the client.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ImportRequest {
    /// Original file name; only `.yaml` files are accepted.
    #[validate(custom(function = "validate_yaml_file_name"))]
    pub filename: String,
    /// Raw file content.
    pub content: String,
}

/// Whether a completion is in flight for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatusDto {
    /// Ready for the next message.
    Idle,
    /// Waiting on the completion API.
    Generating,
}

impl From<SessionStatus> for SessionStatusDto {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Idle => SessionStatusDto::Idle,
            SessionStatus::Generating => SessionStatusDto::Generating,
        }
    }
}

/// Full view of a session as rendered by the chat and specification panels.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub id: Uuid,
    /// Language of explanations and generated descriptions.
    pub language: Language,
    /// Conversation so far, oldest first.
    pub messages: Vec<ConversationMessage>,
    /// Current YAML specification; empty when nothing was generated or imported yet.
    pub specification: String,
    /// Last failure, shown verbatim until the next turn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Whether a turn is in flight.
    pub status: SessionStatusDto,
    /// Incremented every time the session is cleared.
    pub revision: u64,
    /// RFC 3339 creation time.
    pub created_at: String,
    /// RFC 3339 time of the last change.
    pub updated_at: String,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            language: session.language,
            messages: session
                .messages
                .iter()
                .filter_map(ConversationMessage::from_chat)
                .collect(),
            specification: session.specification.clone(),
            error: session.error.clone(),
            status: session.status.into(),
            revision: session.revision,
            created_at: format_system_time(session.created_at),
            updated_at: format_system_time(session.updated_at),
        }
    }
}
