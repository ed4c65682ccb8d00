use axum::{Json, Router, extract::State, extract::rejection::JsonRejection, routing::post};

use crate::{
    dto::{
        common::ErrorBody,
        generate::{GenerateRequest, GenerateResponse},
    },
    error::AppError,
    services::generate_service,
    state::SharedState,
};

/// Stateless generation endpoint used by clients that keep their own history.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/generate", post(generate))
}

/// Turn a conversation (and optionally the specification it edits) into an OpenAPI YAML document.
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "generate",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Specification generated", body = GenerateResponse),
        (status = 400, description = "Invalid request", body = ErrorBody),
        (status = 500, description = "Model reply unusable or completion API unreachable", body = ErrorBody),
        (status = 503, description = "No completion API configured", body = ErrorBody)
    )
)]
pub async fn generate(
    State(state): State<SharedState>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerateResponse>, AppError> {
    let Json(request) = payload?;
    let response = generate_service::generate(&state, request)
        .await
        .inspect_err(|err| tracing::error!(error = %err, "error generating API specification"))?;
    Ok(Json(response))
}
