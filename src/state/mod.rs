pub mod language;
pub mod session;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{config::AppConfig, error::ServiceError, llm::CompletionClient};

use self::session::Session;

pub type SharedState = Arc<AppState>;

/// Central application state holding the completion client and live sessions.
pub struct AppState {
    config: AppConfig,
    completion: RwLock<Option<Arc<dyn CompletionClient>>>,
    sessions: DashMap<Uuid, Session>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// The application starts in degraded mode until a completion client is installed.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config,
            completion: RwLock::new(None),
            sessions: DashMap::new(),
        })
    }

    /// Construct a state that is immediately backed by `client`.
    pub fn with_client(config: AppConfig, client: Arc<dyn CompletionClient>) -> SharedState {
        Arc::new(Self {
            config,
            completion: RwLock::new(Some(client)),
            sessions: DashMap::new(),
        })
    }

    /// Generation settings loaded at startup.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Obtain a handle to the current completion client, if one is installed.
    pub async fn completion_client(&self) -> Option<Arc<dyn CompletionClient>> {
        let guard = self.completion.read().await;
        guard.as_ref().cloned()
    }

    /// Completion client or [`ServiceError::Degraded`].
    pub async fn require_completion_client(
        &self,
    ) -> Result<Arc<dyn CompletionClient>, ServiceError> {
        self.completion_client().await.ok_or(ServiceError::Degraded)
    }

    /// Install a completion client and leave degraded mode.
    pub async fn install_completion_client(&self, client: Arc<dyn CompletionClient>) {
        let mut guard = self.completion.write().await;
        *guard = Some(client);
    }

    /// Registry of live sessions keyed by their identifier.
    pub fn sessions(&self) -> &DashMap<Uuid, Session> {
        &self.sessions
    }
}
