use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: String,
    /// Model answering completions, when a client is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(model: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            model: Some(model.into()),
        }
    }

    /// Create a health response indicating no completion client is configured.
    pub fn degraded() -> Self {
        Self {
            status: "degraded".to_string(),
            model: None,
        }
    }
}
