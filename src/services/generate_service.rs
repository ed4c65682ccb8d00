//! Specification generation: prompt, completion call, reply validation, YAML rendering.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::{
    config::AppConfig,
    dto::generate::{GenerateRequest, GenerateResponse},
    error::ServiceError,
    llm::{ChatMessage, CompletionClient, CompletionRequest},
    services::{prompt, spec_format},
    state::{SharedState, language::Language, session::TurnOutput},
};

/// Handle a stateless generation request from the API.
pub async fn generate(
    state: &SharedState,
    request: GenerateRequest,
) -> Result<GenerateResponse, ServiceError> {
    request.validate()?;

    let client = state.require_completion_client().await?;
    let history: Vec<ChatMessage> = request.messages.into_iter().map(Into::into).collect();

    let output = run_turn(
        client,
        state.config(),
        &history,
        request.current_spec.as_deref(),
        request.language,
    )
    .await?;

    Ok(GenerateResponse {
        specification: output.specification,
        explanation: output.explanation,
    })
}

/// Run one full generation turn against `client`.
pub async fn run_turn(
    client: Arc<dyn CompletionClient>,
    config: &AppConfig,
    history: &[ChatMessage],
    current_spec: Option<&str>,
    language: Language,
) -> Result<TurnOutput, ServiceError> {
    let messages = prompt::build_messages(history, current_spec, language);
    let request = CompletionRequest {
        messages,
        temperature: config.temperature,
        max_tokens: config.max_tokens,
        json_mode: config.json_mode,
    };

    info!(
        model = client.model(),
        history = history.len(),
        editing = current_spec.is_some_and(|spec| !spec.trim().is_empty()),
        language = language.code(),
        "generating specification"
    );

    let raw = client.complete(request).await.inspect_err(|err| {
        warn!(error = %err, status = ?err.status(), "completion call failed");
    })?;

    let reply = spec_format::parse_reply(&raw).inspect_err(|err| {
        warn!(error = %err, reply_len = raw.len(), "model reply rejected");
    })?;
    let specification = spec_format::to_yaml(&reply.specification)?;

    info!(yaml_len = specification.len(), "specification generated");

    Ok(TurnOutput {
        specification,
        explanation: reply.explanation,
    })
}
