//! Session orchestration: chat turns, import/export and clearing.

use serde_json::Value;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::session::{
        CreateSessionRequest, ImportRequest, SendMessageRequest, SessionSnapshot,
        SetLanguageRequest,
    },
    error::ServiceError,
    services::{generate_service, spec_format},
    state::{
        SharedState,
        language::Language,
        session::{Session, TurnOutput},
    },
};

/// File name offered when downloading a specification.
pub const EXPORT_FILE_NAME: &str = "api-specification.yaml";

/// Open a new, empty session.
pub fn create_session(
    state: &SharedState,
    request: CreateSessionRequest,
    accept_language: Option<&str>,
) -> SessionSnapshot {
    let language = request
        .language
        .or_else(|| accept_language.map(Language::from_accept_language))
        .unwrap_or_default();

    let session = Session::new(language);
    let snapshot = SessionSnapshot::from(&session);
    info!(session_id = %session.id, language = language.code(), "session created");
    state.sessions().insert(session.id, session);
    snapshot
}

/// Return the current view of a session.
pub fn get_session(state: &SharedState, id: Uuid) -> Result<SessionSnapshot, ServiceError> {
    let session = state.sessions().get(&id).ok_or_else(|| not_found(id))?;
    Ok(SessionSnapshot::from(&*session))
}

/// Forget a session entirely.
pub fn delete_session(state: &SharedState, id: Uuid) -> Result<(), ServiceError> {
    state
        .sessions()
        .remove(&id)
        .map(|_| info!(session_id = %id, "session deleted"))
        .ok_or_else(|| not_found(id))
}

/// Reset history, specification and error of a session.
pub fn clear_session(state: &SharedState, id: Uuid) -> Result<SessionSnapshot, ServiceError> {
    let mut session = state.sessions().get_mut(&id).ok_or_else(|| not_found(id))?;
    session.clear();
    debug!(session_id = %id, revision = session.revision, "session cleared");
    Ok(SessionSnapshot::from(&*session))
}

/// Change the language used by later turns.
pub fn set_language(
    state: &SharedState,
    id: Uuid,
    request: SetLanguageRequest,
) -> Result<SessionSnapshot, ServiceError> {
    let mut session = state.sessions().get_mut(&id).ok_or_else(|| not_found(id))?;
    session.set_language(request.language);
    Ok(SessionSnapshot::from(&*session))
}

/// Run one chat turn: record the message, regenerate the specification, apply the result.
///
/// Generation failures are stored on the session rather than returned, so the
/// client renders them like any other state change. The turn runs on its own
/// task and always settles, even when the caller stops waiting for it.
pub async fn send_message(
    state: &SharedState,
    id: Uuid,
    request: SendMessageRequest,
) -> Result<SessionSnapshot, ServiceError> {
    request.validate()?;
    if !state.sessions().contains_key(&id) {
        return Err(not_found(id));
    }
    let client = state.require_completion_client().await?;

    // The map guard must not be held across the completion call.
    let turn = {
        let mut session = state.sessions().get_mut(&id).ok_or_else(|| not_found(id))?;
        session.begin_turn(request.content)?
    };
    let revision = turn.revision;

    let task_state = state.clone();
    let handle = tokio::spawn(async move {
        let outcome = generate_service::run_turn(
            client,
            task_state.config(),
            &turn.history,
            turn.current_spec.as_deref(),
            turn.language,
        )
        .await
        .map_err(|err| err.to_string());
        settle_turn(&task_state, id, turn.revision, outcome);
    });

    if let Err(err) = handle.await {
        error!(session_id = %id, error = %err, "session turn task failed");
        settle_turn(state, id, revision, Err(format!("generation failed: {err}")));
    }

    get_session(state, id)
}

fn settle_turn(state: &SharedState, id: Uuid, revision: u64, outcome: Result<TurnOutput, String>) {
    if let Err(message) = &outcome {
        warn!(session_id = %id, error = %message, "session turn failed");
    }

    let Some(mut session) = state.sessions().get_mut(&id) else {
        debug!(session_id = %id, "session deleted during generation; result dropped");
        return;
    };
    if !session.finish_turn(revision, outcome) {
        debug!(session_id = %id, "session cleared during generation; result dropped");
    }
}

/// Replace the session specification with an uploaded `.yaml` file.
pub fn import_specification(
    state: &SharedState,
    id: Uuid,
    request: ImportRequest,
) -> Result<SessionSnapshot, ServiceError> {
    request.validate()?;

    let mut session = state.sessions().get_mut(&id).ok_or_else(|| not_found(id))?;
    session.import(&request.content)?;
    info!(
        session_id = %id,
        filename = %request.filename,
        bytes = session.specification.len(),
        "specification imported"
    );
    Ok(SessionSnapshot::from(&*session))
}

/// Current YAML specification of a session, for download.
pub fn export_specification(state: &SharedState, id: Uuid) -> Result<String, ServiceError> {
    let session = state.sessions().get(&id).ok_or_else(|| not_found(id))?;
    session
        .current_specification()
        .map(str::to_owned)
        .ok_or_else(|| ServiceError::NotFound(format!("session `{id}` has no specification")))
}

/// Current specification converted to JSON, for documentation viewers.
pub fn render_specification(state: &SharedState, id: Uuid) -> Result<Value, ServiceError> {
    let yaml = export_specification(state, id)?;
    spec_format::yaml_to_json(&yaml).map_err(|err| {
        ServiceError::InvalidState(format!("stored specification is not valid YAML: {err}"))
    })
}

fn not_found(id: Uuid) -> ServiceError {
    ServiceError::NotFound(format!("session `{id}` not found"))
}
