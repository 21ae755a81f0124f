//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "uttercut";

/// Default name of the dataset directory created under the output path.
pub const DEFAULT_DATASET_NAME: &str = "primock57";

/// Dataset layout names.
pub mod layout {
    /// Subdirectory holding the utterance clips.
    pub const DATA_DIR: &str = "data";
    /// Metadata table file name.
    pub const METADATA_FILE: &str = "metadata.csv";
    /// Dataset README file name.
    pub const README_FILE: &str = "README.md";
    /// Extension of written clips.
    pub const CLIP_EXTENSION: &str = "wav";
    /// Separator between recording id and utterance index.
    pub const UTTERANCE_SEPARATOR: &str = "_u";
}

/// Metadata table columns, in output order.
pub const METADATA_COLUMNS: [&str; 3] = ["file_name", "transcription", "utterance"];

/// Input discovery defaults.
pub mod discovery {
    /// Default recording file extension (matched case-insensitively).
    pub const AUDIO_EXTENSION: &str = "wav";
    /// Default annotation file extension (matched case-insensitively).
    pub const ANNOTATION_EXTENSION: &str = "TextGrid";
}

/// Audio slicing constants.
pub mod slicing {
    /// How far past the end of a recording an interval may run before it is
    /// rejected instead of clamped, in seconds.
    ///
    /// Annotation tools often store the tier end with more precision than
    /// the audio frame grid, so small overshoots are expected.
    pub const END_CLAMP_TOLERANCE_SECS: f64 = 0.05;
}

/// TextGrid format constants.
pub mod textgrid {
    /// Object file type marker of text TextGrids.
    pub const TEXT_FILE_TYPE: &str = "ooTextFile";
    /// Object file type marker of binary TextGrids.
    pub const BINARY_FILE_TYPE: &str = "ooBinaryFile";
    /// Object class of a TextGrid document.
    pub const OBJECT_CLASS: &str = "TextGrid";
    /// Class name of interval tiers.
    pub const INTERVAL_TIER: &str = "IntervalTier";
    /// Class name of point tiers.
    pub const TEXT_TIER: &str = "TextTier";
}

/// Tokens that stand for silence rather than speech.
pub const SILENCE_TOKENS: &[&str] = &["sil", "sp", "spn", "#"];
