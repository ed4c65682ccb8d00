//! DTOs of the stateless `/api/generate` endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{dto::common::ConversationMessage, state::language::Language};

/// Conversation to turn into a specification.
#[derive(Debug, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Chat history, oldest first; the last entry is usually the new user request.
    #[validate(length(min = 1, message = "at least one message is required"), nested)]
    pub messages: Vec<ConversationMessage>,
    /// YAML specification the conversation is editing, if any.
    #[serde(default)]
    pub current_spec: Option<String>,
    /// Language of the explanation and generated descriptions.
    #[serde(default)]
    pub language: Language,
}

/// Generated specification and the model's summary of it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    /// OpenAPI document rendered as YAML.
    pub specification: String,
    /// Short explanation in the requested language.
    pub explanation: String,
}
