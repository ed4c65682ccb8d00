use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    dto::{
        common::ErrorBody,
        session::{
            CreateSessionRequest, ImportRequest, SendMessageRequest, SessionSnapshot,
            SetLanguageRequest,
        },
    },
    error::AppError,
    services::session_service::{self, EXPORT_FILE_NAME},
    state::SharedState,
};

/// Conversation sessions holding chat history and the current specification.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/{id}", get(get_session).delete(delete_session))
        .route("/api/sessions/{id}/clear", post(clear_session))
        .route("/api/sessions/{id}/language", put(set_language))
        .route("/api/sessions/{id}/messages", post(send_message))
        .route("/api/sessions/{id}/import", post(import_specification))
        .route("/api/sessions/{id}/export", get(export_specification))
        .route("/api/sessions/{id}/openapi.json", get(render_specification))
}

/// Open a new session; the body is optional.
#[utoipa::path(
    post,
    path = "/api/sessions",
    tag = "sessions",
    request_body(content = CreateSessionRequest, description = "Optional session options"),
    params(("Accept-Language" = Option<String>, Header, description = "Used when the body names no language")),
    responses(
        (status = 201, description = "Session created", body = SessionSnapshot),
        (status = 400, description = "Malformed body", body = ErrorBody)
    )
)]
pub async fn create_session(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionSnapshot>), AppError> {
    let request = if body.iter().all(u8::is_ascii_whitespace) {
        CreateSessionRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|err| AppError::BadRequest(format!("invalid session options: {err}")))?
    };
    let accept_language = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let snapshot = session_service::create_session(&state, request, accept_language);
    Ok((StatusCode::CREATED, Json(snapshot)))
}

/// Retrieve a session.
#[utoipa::path(
    get,
    path = "/api/sessions/{id}",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session", body = SessionSnapshot),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn get_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(session_service::get_session(&state, id)?))
}

/// Delete a session.
#[utoipa::path(
    delete,
    path = "/api/sessions/{id}",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn delete_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    session_service::delete_session(&state, id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Clear history, specification and error while keeping the session.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/clear",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Session cleared", body = SessionSnapshot),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn clear_session(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    Ok(Json(session_service::clear_session(&state, id)?))
}

/// Switch the language used by later turns.
#[utoipa::path(
    put,
    path = "/api/sessions/{id}/language",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    request_body = SetLanguageRequest,
    responses(
        (status = 200, description = "Language updated", body = SessionSnapshot),
        (status = 404, description = "Unknown session", body = ErrorBody)
    )
)]
pub async fn set_language(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SetLanguageRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let Json(request) = payload?;
    Ok(Json(session_service::set_language(&state, id, request)?))
}

/// Send a chat message and regenerate the specification.
///
/// Generation failures are reported through the snapshot's `error` field.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/messages",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Turn finished", body = SessionSnapshot),
        (status = 400, description = "Empty message", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 409, description = "A turn is already running", body = ErrorBody),
        (status = 503, description = "No completion API configured", body = ErrorBody)
    )
)]
pub async fn send_message(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let Json(request) = payload?;
    Ok(Json(session_service::send_message(&state, id, request).await?))
}

/// Replace the specification with an uploaded `.yaml` file.
#[utoipa::path(
    post,
    path = "/api/sessions/{id}/import",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    request_body = ImportRequest,
    responses(
        (status = 200, description = "Specification imported", body = SessionSnapshot),
        (status = 400, description = "Not a .yaml file or not valid YAML", body = ErrorBody),
        (status = 404, description = "Unknown session", body = ErrorBody),
        (status = 409, description = "A turn is already running", body = ErrorBody)
    )
)]
pub async fn import_specification(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    payload: Result<Json<ImportRequest>, JsonRejection>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let Json(request) = payload?;
    Ok(Json(session_service::import_specification(
        &state, id, request,
    )?))
}

/// Download the specification as a `.yaml` attachment.
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/export",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "YAML specification", content_type = "text/yaml", body = String),
        (status = 404, description = "Unknown session or no specification yet", body = ErrorBody)
    )
)]
pub async fn export_specification(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let yaml = session_service::export_specification(&state, id)?;
    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");

    let mut response = yaml.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/yaml; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&disposition)
            .map_err(|err| AppError::Internal(err.to_string()))?,
    );
    Ok(response)
}

/// Return the specification as JSON for interactive documentation viewers.
#[utoipa::path(
    get,
    path = "/api/sessions/{id}/openapi.json",
    tag = "sessions",
    params(("id" = String, Path, description = "Session identifier")),
    responses(
        (status = 200, description = "Specification as JSON", body = Object),
        (status = 404, description = "Unknown session or no specification yet", body = ErrorBody)
    )
)]
pub async fn render_specification(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(session_service::render_specification(&state, id)?))
}
