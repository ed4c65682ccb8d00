use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Report whether a completion client is configured, logging degraded mode.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    match state.completion_client().await {
        Some(client) => HealthResponse::ok(client.model()),
        None => {
            warn!("completion API unavailable (degraded mode)");
            HealthResponse::degraded()
        }
    }
}
