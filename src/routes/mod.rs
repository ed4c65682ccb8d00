use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod generate;
pub mod health;
pub mod i18n;
pub mod sessions;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = health::router()
        .merge(generate::router())
        .merge(sessions::router())
        .merge(i18n::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
