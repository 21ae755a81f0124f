//! CLI argument validators.

use crate::config::validate_dataset_name;

/// Parse and validate a dataset directory name.
pub fn parse_dataset_name(s: &str) -> Result<String, String> {
    validate_dataset_name(s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

/// Parse a file extension, with or without a leading dot.
pub fn parse_extension(s: &str) -> Result<String, String> {
    let extension = s.trim().trim_start_matches('.');
    if extension.is_empty() {
        return Err("extension must not be empty".to_string());
    }
    if extension.contains(['/', '\\']) {
        return Err(format!("'{s}' is not a file extension"));
    }
    Ok(extension.to_string())
}
