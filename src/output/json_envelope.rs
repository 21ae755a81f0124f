//! JSON envelope types for CLI output.
//!
//! With `--json`, a build prints a single result event to stdout so the tool
//! can be driven by scripts and pipelines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dataset::{BuildReport, Dataset};

/// Current spec version for JSON envelope.
pub const SPEC_VERSION: &str = "1.0";

/// JSON envelope wrapping all CLI output events.
#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::DeserializeOwned"))]
pub struct JsonEnvelope<T> {
    /// API specification version.
    pub spec_version: String,
    /// Event timestamp.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event: EventType,
    /// Event-specific payload.
    pub payload: T,
}

impl<T: Serialize> JsonEnvelope<T> {
    /// Create a new envelope with the current timestamp.
    pub fn new(event: EventType, payload: T) -> Self {
        Self {
            spec_version: SPEC_VERSION.to_string(),
            timestamp: Utc::now(),
            event,
            payload,
        }
    }
}

/// Event types for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Final result.
    Result,
}

/// Result type discriminator for result payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    /// Dataset build summary.
    DatasetBuild,
    /// Configuration display.
    Config,
}

/// Payload for a finished dataset build.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResultPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Dataset root directory.
    pub dataset_dir: PathBuf,
    /// Path of the metadata table.
    pub metadata_path: PathBuf,
    /// Counts of what was accepted and skipped.
    pub report: BuildReport,
}

impl From<&Dataset> for BuildResultPayload {
    fn from(dataset: &Dataset) -> Self {
        Self {
            result_type: ResultType::DatasetBuild,
            dataset_dir: dataset.root.clone(),
            metadata_path: dataset.metadata_path(),
            report: dataset.report.clone(),
        }
    }
}

/// Payload for config show result.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigPayload {
    /// Result type discriminator.
    pub result_type: ResultType,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// The configuration contents (as JSON value for flexibility).
    pub config: serde_json::Value,
}

/// Emit a JSON result event to stdout.
pub fn emit_json_result<T: Serialize>(payload: &T) {
    let envelope = JsonEnvelope::new(EventType::Result, payload);
    match serde_json::to_string(&envelope) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            // stderr keeps the stdout stream parseable
            eprintln!("error: failed to serialize JSON result: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serialization() {
        let payload = BuildResultPayload {
            result_type: ResultType::DatasetBuild,
            dataset_dir: PathBuf::from("out/primock57"),
            metadata_path: PathBuf::from("out/primock57/metadata.csv"),
            report: BuildReport {
                recordings_found: 2,
                utterances_accepted: 5,
                ..BuildReport::default()
            },
        };
        let envelope = JsonEnvelope::new(EventType::Result, payload);

        let json = serde_json::to_string(&envelope).expect("serialize");
        assert!(json.contains("\"spec_version\":\"1.0\""));
        assert!(json.contains("\"event\":\"result\""));
        assert!(json.contains("\"result_type\":\"dataset_build\""));
        assert!(json.contains("\"utterances_accepted\":5"));
    }

    #[test]
    fn test_payload_from_dataset() {
        let dataset = Dataset {
            root: PathBuf::from("out/primock57"),
            records: Vec::new(),
            report: BuildReport::default(),
        };
        let payload = BuildResultPayload::from(&dataset);
        assert_eq!(payload.dataset_dir, PathBuf::from("out/primock57"));
        assert_eq!(
            payload.metadata_path,
            PathBuf::from("out/primock57").join("metadata.csv")
        );
    }

    #[test]
    fn test_result_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ResultType::DatasetBuild).expect("serialize"),
            "\"dataset_build\""
        );
        assert_eq!(
            serde_json::to_string(&ResultType::Config).expect("serialize"),
            "\"config\""
        );
    }
}
