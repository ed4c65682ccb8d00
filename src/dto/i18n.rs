//! Localized UI string catalog served to the front-end.

use serde::Serialize;
use utoipa::ToSchema;

/// Every user-visible string of the designer UI for one language.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UiStrings {
    pub common: CommonStrings,
    pub home: HomeStrings,
    pub api_viewer: PanelStrings,
    pub api_spec: SpecPanelStrings,
    pub import: ImportStrings,
    pub chat: ChatStrings,
    pub tabs: TabStrings,
    pub error: ErrorStrings,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommonStrings {
    pub error: String,
    pub loading: String,
    pub clear: String,
    pub clear_confirm: String,
    pub download: String,
    pub title: String,
    pub import: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeStrings {
    pub title: String,
    pub description: String,
    pub tabs: HomeTabStrings,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeTabStrings {
    pub docs: String,
    pub yaml: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PanelStrings {
    pub title: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpecPanelStrings {
    pub title: String,
    pub placeholder: String,
    pub copy: String,
    pub copied: String,
    pub download: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ImportStrings {
    pub title: String,
    pub or: String,
    pub description: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChatStrings {
    pub title: String,
    pub placeholder: String,
    pub success: String,
    pub error: String,
    pub send: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TabStrings {
    pub spec: String,
    pub docs: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorStrings {
    pub title: String,
    pub retry: String,
}
