use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::llm::{ChatMessage, ChatRole};

/// Flat error payload returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Message suitable for displaying verbatim.
    pub error: String,
    /// Upstream failure metadata, present when the completion API rejected the call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// Metadata relayed from a completion API error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetails {
    /// HTTP status returned by the completion API.
    pub status: Option<u16>,
    /// Provider error category, e.g. `invalid_request_error`.
    pub r#type: Option<String>,
    /// Provider error code, e.g. `invalid_api_key`.
    pub code: Option<String>,
}

/// Roles a client may put in the conversation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConversationRole {
    /// Written by the designer.
    User,
    /// Explanation returned by the model.
    Assistant,
}

/// One chat message as exchanged with clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
pub struct ConversationMessage {
    /// Author of the message.
    pub role: ConversationRole,
    /// Message text.
    #[validate(length(min = 1, message = "message content must not be empty"))]
    pub content: String,
}

impl From<ConversationMessage> for ChatMessage {
    fn from(message: ConversationMessage) -> Self {
        match message.role {
            ConversationRole::User => ChatMessage::user(message.content),
            ConversationRole::Assistant => ChatMessage::assistant(message.content),
        }
    }
}

impl ConversationMessage {
    /// Project a stored chat message; system prompts are never part of a history.
    pub fn from_chat(message: &ChatMessage) -> Option<Self> {
        let role = match message.role {
            ChatRole::User => ConversationRole::User,
            ChatRole::Assistant => ConversationRole::Assistant,
            ChatRole::System => return None,
        };
        Some(Self {
            role,
            content: message.content.clone(),
        })
    }
}
