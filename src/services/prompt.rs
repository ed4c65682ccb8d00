//! Prompt assembly for the specification designer.

use crate::{llm::ChatMessage, state::language::Language};

const REPLY_EXAMPLE: &str = r#"{
  "specification": {
    "openapi": "3.0.0",
    "info": {
      "title": "Example API",
      "version": "1.0.0"
    },
    "paths": {
      "/example": {
        "get": {
          "summary": "Example endpoint",
          "responses": {
            "200": {
              "description": "Successful response"
            }
          }
        }
      }
    }
  },
  "explanation": "Brief explanation of the API design"
}"#;

const GUIDELINES: &str = "Guidelines:
- Use proper HTTP methods: GET to retrieve, POST to create, PUT to update, DELETE to remove
- Include descriptions and examples
- Document all parameters and mark required fields
- Follow RESTful practices
- Include security requirements and authentication schemes
- Include error responses (400, 401, 403, 404, 500) and a responses section for every operation
- Add pagination parameters to list endpoints
- Each path must be unique and no key may appear twice at the same level
- Keep technical terms (HTTP methods, data types, formats) in English";

/// Instructions sent as the first system message of every completion.
pub fn system_prompt(language: Language) -> String {
    let name = language.english_name();
    format!(
        "You are an API designer that creates OpenAPI 3.0.0 specifications.
Your response must be a JSON object with exactly these fields:
1. \"specification\": A complete OpenAPI 3.0.0 object
2. \"explanation\": A brief explanation in {name}

Example format:
{REPLY_EXAMPLE}

{GUIDELINES}
- Write all descriptions, summaries and documentation in {name}"
    )
}

/// Context message carrying the specification being edited.
pub fn current_spec_prompt(current_spec: &str) -> String {
    format!(
        "Current OpenAPI Specification:
{current_spec}

Modify this specification according to the user's requirements while maintaining the existing structure where appropriate.
Keep every endpoint and component that the request does not touch, and keep modified endpoints consistent with the existing ones."
    )
}

/// Assemble the full message list for one generation turn.
///
/// A blank `current_spec` is treated as "starting from scratch".
pub fn build_messages(
    history: &[ChatMessage],
    current_spec: Option<&str>,
    language: Language,
) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(system_prompt(language)));
    if let Some(spec) = current_spec.filter(|spec| !spec.trim().is_empty()) {
        messages.push(ChatMessage::system(current_spec_prompt(spec)));
    }
    messages.extend(history.iter().cloned());
    messages
}
