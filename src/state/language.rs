use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Language used for explanations, generated descriptions and UI strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Simplified Chinese.
    Zh,
    /// English.
    #[default]
    En,
}

impl Language {
    /// Pick the language from an `Accept-Language` header value.
    ///
    /// Only the first (preferred) tag matters: `zh*` selects Chinese, anything else English.
    pub fn from_accept_language(header: &str) -> Self {
        let preferred = header
            .split(',')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if preferred.starts_with("zh") {
            Language::Zh
        } else {
            Language::En
        }
    }

    /// Parse a path or query segment such as `zh` or `en`.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "zh" => Some(Language::Zh),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Short code used on the wire.
    pub fn code(self) -> &'static str {
        match self {
            Language::Zh => "zh",
            Language::En => "en",
        }
    }

    /// English name of the language, as used inside prompts.
    pub fn english_name(self) -> &'static str {
        match self {
            Language::Zh => "Chinese",
            Language::En => "English",
        }
    }
}
