//! Error types for uttercut.

use std::path::PathBuf;

/// Result type alias for uttercut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for uttercut.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize configuration")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Input directory does not exist or is not a directory.
    #[error("input directory does not exist: {path}")]
    InputDirNotFound {
        /// Path to the missing directory.
        path: PathBuf,
    },

    /// A recording has no annotation document with the same stem.
    #[error("missing annotation for recording '{recording_id}', expected '{expected}'")]
    MissingAnnotation {
        /// Identifier of the recording.
        recording_id: String,
        /// Path where the annotation was expected.
        expected: PathBuf,
    },

    /// Failed to read an annotation document.
    #[error("failed to read annotation file '{path}'")]
    AnnotationRead {
        /// Path to the annotation file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Annotation document is malformed.
    #[error("malformed annotation file '{path}': {message}")]
    AnnotationParse {
        /// Path to the annotation file.
        path: PathBuf,
        /// Description of the format error.
        message: String,
    },

    /// Annotation document lacks the utterance tier.
    #[error("annotation file '{path}' has no interval tier matching {selector}")]
    TierNotFound {
        /// Path to the annotation file.
        path: PathBuf,
        /// Human-readable tier selector.
        selector: String,
    },

    /// Interval has a non-positive duration.
    #[error("interval {index} of '{recording_id}': end time ({end}) must be greater than start time ({start})")]
    InvalidInterval {
        /// Identifier of the recording.
        recording_id: String,
        /// Position of the interval within its tier.
        index: usize,
        /// Start time in seconds.
        start: f64,
        /// End time in seconds.
        end: f64,
    },

    /// Requested time range falls outside the recording.
    #[error("time range {start:.3}s-{end:.3}s is outside recording duration {duration:.3}s")]
    IntervalOutOfRange {
        /// Start time in seconds.
        start: f64,
        /// End time in seconds.
        end: f64,
        /// Recording duration in seconds.
        duration: f64,
    },

    /// Failed to open audio file.
    #[error("failed to open audio file '{path}'")]
    AudioOpen {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to decode audio samples.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the audio file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to write WAV file.
    #[error("failed to write WAV file '{path}'")]
    WavWriteFailed {
        /// Path to the WAV file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hound::Error,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write the metadata table.
    #[error("failed to write metadata table '{path}'")]
    MetadataWrite {
        /// Path to the metadata file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write the dataset README.
    #[error("failed to write README '{path}'")]
    ReadmeWrite {
        /// Path to the README file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON output")]
    JsonSerialize {
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether this error stops processing of a whole recording.
    ///
    /// Under the default policy these are logged and the recording is
    /// skipped; with `fail_fast` the run aborts.
    pub const fn is_recording_level(&self) -> bool {
        matches!(
            self,
            Self::MissingAnnotation { .. }
                | Self::AnnotationRead { .. }
                | Self::AnnotationParse { .. }
                | Self::TierNotFound { .. }
                | Self::AudioOpen { .. }
                | Self::AudioDecode { .. }
        )
    }

    /// Whether this error only affects a single interval.
    pub const fn is_interval_level(&self) -> bool {
        matches!(
            self,
            Self::InvalidInterval { .. } | Self::IntervalOutOfRange { .. }
        )
    }
}
