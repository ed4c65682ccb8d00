//! Validation helpers for DTOs.

use validator::ValidationError;

/// Extension accepted for imported specifications.
pub const YAML_EXTENSION: &str = ".yaml";

/// Validates that an imported file name carries the `.yaml` extension.
///
/// # Examples
///
/// ```ignore
/// validate_yaml_file_name("petstore.yaml") // Ok
/// validate_yaml_file_name("petstore.json") // Err - wrong extension
/// validate_yaml_file_name(".yaml")         // Err - no stem
/// ```
pub fn validate_yaml_file_name(name: &str) -> Result<(), ValidationError> {
    let Some(stem) = name.strip_suffix(YAML_EXTENSION) else {
        let mut err = ValidationError::new("file_extension");
        err.message = Some(format!("only {YAML_EXTENSION} files can be imported (got `{name}`)").into());
        return Err(err);
    };

    if stem.trim().is_empty() || stem.ends_with(['/', '\\']) {
        let mut err = ValidationError::new("file_name");
        err.message = Some("file name must not be empty".into());
        return Err(err);
    }

    Ok(())
}
