/// OpenAPI documentation generation.
pub mod documentation;
/// Specification generation pipeline.
pub mod generate_service;
/// Health check service.
pub mod health_service;
/// Localized UI string catalogs.
pub mod i18n_service;
/// Prompt assembly for the designer model.
pub mod prompt;
/// Conversation session orchestration.
pub mod session_service;
/// Model reply parsing and YAML conversion.
pub mod spec_format;
