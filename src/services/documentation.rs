use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the APITalk backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::generate::generate,
        crate::routes::i18n::get_catalog,
        crate::routes::sessions::create_session,
        crate::routes::sessions::get_session,
        crate::routes::sessions::delete_session,
        crate::routes::sessions::clear_session,
        crate::routes::sessions::set_language,
        crate::routes::sessions::send_message,
        crate::routes::sessions::import_specification,
        crate::routes::sessions::export_specification,
        crate::routes::sessions::render_specification,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::ErrorBody,
            crate::dto::common::ErrorDetails,
            crate::dto::common::ConversationMessage,
            crate::dto::common::ConversationRole,
            crate::dto::generate::GenerateRequest,
            crate::dto::generate::GenerateResponse,
            crate::dto::session::CreateSessionRequest,
            crate::dto::session::SendMessageRequest,
            crate::dto::session::SetLanguageRequest,
            crate::dto::session::ImportRequest,
            crate::dto::session::SessionSnapshot,
            crate::dto::session::SessionStatusDto,
            crate::dto::i18n::UiStrings,
            crate::state::language::Language,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "generate", description = "Stateless specification generation"),
        (name = "sessions", description = "Conversation sessions, import and export"),
        (name = "i18n", description = "Localized UI strings"),
    )
)]
pub struct ApiDoc;
