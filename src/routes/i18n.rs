use axum::{Json, Router, extract::Path, routing::get};

use crate::{
    dto::{common::ErrorBody, i18n::UiStrings},
    error::AppError,
    services::i18n_service,
    state::{SharedState, language::Language},
};

/// Localized UI string catalogs.
pub fn router() -> Router<SharedState> {
    Router::new().route("/api/i18n/{language}", get(get_catalog))
}

#[utoipa::path(
    get,
    path = "/api/i18n/{language}",
    tag = "i18n",
    params(("language" = String, Path, description = "Language code (`zh` or `en`)")),
    responses(
        (status = 200, description = "UI strings", body = UiStrings),
        (status = 400, description = "Unsupported language", body = ErrorBody)
    )
)]
/// Return every UI string for the requested language.
pub async fn get_catalog(Path(code): Path<String>) -> Result<Json<UiStrings>, AppError> {
    let language = Language::parse(&code)
        .ok_or_else(|| AppError::BadRequest(format!("unsupported language `{code}`")))?;
    Ok(Json(i18n_service::catalog(language)))
}
