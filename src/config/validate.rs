//! Configuration validation.

use crate::config::Config;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_dataset_name(&config.build.dataset_name)?;

    for (label, extension) in [
        ("audio_extension", &config.build.audio_extension),
        ("annotation_extension", &config.build.annotation_extension),
    ] {
        if extension.trim_start_matches('.').is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("{label} must not be empty"),
            });
        }
    }

    Ok(())
}

/// Validate that a dataset name is a single, plain directory name.
pub fn validate_dataset_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::ConfigValidation {
            message: "dataset_name must not be empty".to_string(),
        });
    }

    if name.trim() == "." || name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(Error::ConfigValidation {
            message: format!("dataset_name must be a plain directory name, got '{name}'"),
        });
    }

    Ok(())
}
