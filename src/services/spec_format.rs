//! Parsing of model replies and conversion of specifications to YAML.

use serde_json::{Map, Value};
use thiserror::Error;

/// Reply fields the designer prompt asks the model to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignReply {
    /// OpenAPI document exactly as the model produced it.
    pub specification: Value,
    /// Short human-readable summary of the change.
    pub explanation: String,
}

/// Failures while turning a model reply into YAML text.
#[derive(Debug, Error)]
pub enum SpecFormatError {
    /// The reply was neither a JSON nor a YAML object.
    #[error("Invalid response format from model: {0}")]
    Malformed(String),
    /// The reply parsed but lacks `specification` or `explanation`.
    #[error("Invalid response format: missing required fields")]
    MissingFields,
    /// The specification could not be rendered as YAML.
    #[error("Failed to serialize specification as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse and validate the raw assistant content.
///
/// JSON is expected; a Markdown fence around it is tolerated and YAML is accepted
/// as a fallback for models that ignore JSON mode.
pub fn parse_reply(raw: &str) -> Result<DesignReply, SpecFormatError> {
    let body = strip_code_fence(raw);

    let value = match serde_json::from_str::<Value>(body) {
        Ok(value) => value,
        Err(json_err) => serde_yaml::from_str::<Value>(body)
            .map_err(|_| SpecFormatError::Malformed(json_err.to_string()))?,
    };

    let Value::Object(mut fields) = value else {
        return Err(SpecFormatError::Malformed(
            "expected a JSON object at the top level".into(),
        ));
    };

    let specification = take_present(&mut fields, "specification")?;
    let explanation = match take_present(&mut fields, "explanation")? {
        Value::String(text) => text,
        _ => return Err(SpecFormatError::MissingFields),
    };

    Ok(DesignReply {
        specification,
        explanation,
    })
}

/// Render a specification value as a YAML document.
pub fn to_yaml(specification: &Value) -> Result<String, SpecFormatError> {
    Ok(serde_yaml::to_string(specification)?)
}

/// Parse YAML text into a JSON value, keeping mapping order.
pub fn yaml_to_json(text: &str) -> Result<Value, serde_yaml::Error> {
    serde_yaml::from_str(text)
}

fn take_present(fields: &mut Map<String, Value>, key: &str) -> Result<Value, SpecFormatError> {
    match fields.remove(key) {
        Some(value) if !is_blank(&value) => Ok(value),
        _ => Err(SpecFormatError::MissingFields),
    }
}

/// Null, `false`, zero and the empty string count as "not provided".
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (```json, ```yaml) along with the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const PETSTORE_REPLY: &str = r#"{
        "specification": {
            "openapi": "3.0.0",
            "info": {"title": "Pets", "version": "1.0.0"},
            "paths": {
                "/pets": {
                    "get": {
                        "summary": "List pets",
                        "parameters": [{"name": "limit", "in": "query", "schema": {"type": "integer"}}],
                        "responses": {"200": {"description": "OK"}}
                    }
                }
            }
        },
        "explanation": "A minimal pet catalogue."
    }"#;

    #[test]
    fn parses_well_formed_reply() {
        let reply = parse_reply(PETSTORE_REPLY).unwrap();
        assert_eq!(reply.explanation, "A minimal pet catalogue.");
        assert_eq!(reply.specification["info"]["title"], "Pets");
    }

    #[test]
    fn yaml_output_reparses_to_same_document() {
        let reply = parse_reply(PETSTORE_REPLY).unwrap();
        let yaml = to_yaml(&reply.specification).unwrap();

        assert_eq!(yaml_to_json(&yaml).unwrap(), reply.specification);
    }

    #[test]
    fn yaml_output_keeps_model_key_order() {
        let reply = parse_reply(PETSTORE_REPLY).unwrap();
        let yaml = to_yaml(&reply.specification).unwrap();

        let openapi = yaml.find("openapi:").unwrap();
        let info = yaml.find("info:").unwrap();
        let paths = yaml.find("paths:").unwrap();
        assert!(openapi < info && info < paths, "unexpected order:\n{yaml}");
        assert!(yaml.contains("'200':"), "status codes stay strings:\n{yaml}");
    }

    #[test]
    fn rejects_missing_specification() {
        let err = parse_reply(r#"{"explanation": "nothing"}"#).unwrap_err();
        assert!(matches!(err, SpecFormatError::MissingFields));
        assert_eq!(
            err.to_string(),
            "Invalid response format: missing required fields"
        );
    }

    #[test]
    fn rejects_missing_or_blank_explanation() {
        for raw in [
            r#"{"specification": {"openapi": "3.0.0"}}"#,
            r#"{"specification": {"openapi": "3.0.0"}, "explanation": ""}"#,
            r#"{"specification": {"openapi": "3.0.0"}, "explanation": null}"#,
        ] {
            assert!(
                matches!(parse_reply(raw), Err(SpecFormatError::MissingFields)),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn rejects_blank_specification_values() {
        for spec in [json!(null), json!(""), json!(false), json!(0)] {
            let raw = json!({"specification": spec, "explanation": "x"}).to_string();
            assert!(
                matches!(parse_reply(&raw), Err(SpecFormatError::MissingFields)),
                "accepted {raw}"
            );
        }
    }

    #[test]
    fn rejects_non_object_and_garbage() {
        assert!(matches!(
            parse_reply("[1, 2, 3]"),
            Err(SpecFormatError::Malformed(_))
        ));
        assert!(matches!(
            parse_reply("{ not json: [ at all"),
            Err(SpecFormatError::Malformed(_))
        ));
    }

    #[test]
    fn accepts_fenced_json() {
        let fenced = format!("```json\n{PETSTORE_REPLY}\n```");
        let reply = parse_reply(&fenced).unwrap();
        assert_eq!(reply.specification["openapi"], "3.0.0");
    }

    #[test]
    fn falls_back_to_yaml_replies() {
        let raw = "specification:\n  openapi: 3.0.0\n  info:\n    title: Todo\n    version: 1.0.0\n  paths: {}\nexplanation: Todo list API\n";
        let reply = parse_reply(raw).unwrap();

        assert_eq!(reply.explanation, "Todo list API");
        assert_eq!(reply.specification["info"]["title"], "Todo");
    }
}
