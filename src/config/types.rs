//! Configuration type definitions.

use crate::annotation::TierSelector;
use crate::constants::{DEFAULT_DATASET_NAME, discovery};
use serde::{Deserialize, Serialize};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Utterance tier selection, applied to every annotation in a corpus.
    pub tier: TierSelector,

    /// Dataset build settings.
    pub build: BuildDefaults,
}

/// Default dataset build settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildDefaults {
    /// Name of the dataset directory created under the output path.
    pub dataset_name: String,

    /// Abort the whole run on the first recording-level error instead of
    /// skipping that recording.
    pub fail_fast: bool,

    /// Recording file extension.
    pub audio_extension: String,

    /// Annotation file extension.
    pub annotation_extension: String,

    /// Show progress bars.
    pub progress: bool,
}

impl Default for BuildDefaults {
    fn default() -> Self {
        Self {
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
            fail_fast: false,
            audio_extension: discovery::AUDIO_EXTENSION.to_string(),
            annotation_extension: discovery::ANNOTATION_EXTENSION.to_string(),
            progress: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_defaults_default_values() {
        let defaults = BuildDefaults::default();
        assert_eq!(defaults.dataset_name, "primock57");
        assert!(!defaults.fail_fast);
        assert_eq!(defaults.audio_extension, "wav");
        assert_eq!(defaults.annotation_extension, "TextGrid");
        assert!(defaults.progress);
    }

    #[test]
    fn test_config_serializes_round_trip_shape() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap_or_default();
        assert!(text.contains("tier = \"first\""));
        assert!(text.contains("[build]"));
    }
}
