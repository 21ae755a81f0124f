//! Dataset metadata table and README.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{METADATA_COLUMNS, layout};
use crate::error::{Error, Result};

/// One row of `metadata.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceRecord {
    /// Clip path relative to the dataset root, always `/`-separated.
    pub file_name: String,
    /// Normalized transcription.
    pub transcription: String,
    /// Utterance identifier, `{recording_id}_u{index}`.
    pub utterance: String,
}

impl UtteranceRecord {
    /// Build the record for an accepted utterance.
    pub fn new(utterance_id: &str, transcription: String) -> Self {
        Self {
            file_name: format!(
                "{}/{utterance_id}.{}",
                layout::DATA_DIR,
                layout::CLIP_EXTENSION
            ),
            transcription,
            utterance: utterance_id.to_string(),
        }
    }
}

/// Utterance identifier for the interval at `index` of a recording.
///
/// `index` is the interval's position in the full tier, counting intervals
/// that were later dropped.
pub fn utterance_id(recording_id: &str, index: usize) -> String {
    format!("{recording_id}{}{index}", layout::UTTERANCE_SEPARATOR)
}

/// Write the metadata table, header first, one row per record.
///
/// The header is written even when there are no records.
///
/// # Errors
///
/// Returns [`Error::MetadataWrite`] if the file cannot be written.
pub fn write_metadata(path: &Path, records: &[UtteranceRecord]) -> Result<()> {
    let map_err = |e: csv::Error| Error::MetadataWrite {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(map_err)?;

    writer.write_record(METADATA_COLUMNS).map_err(map_err)?;
    for record in records {
        writer.serialize(record).map_err(map_err)?;
    }

    writer.flush().map_err(|e| Error::MetadataWrite {
        path: path.to_path_buf(),
        source: e.into(),
    })
}

/// Write the dataset README.
///
/// # Errors
///
/// Returns [`Error::ReadmeWrite`] if the file cannot be written.
pub fn write_readme(path: &Path, dataset_name: &str) -> Result<()> {
    std::fs::write(path, readme_text(dataset_name)).map_err(|e| Error::ReadmeWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

fn readme_text(dataset_name: &str) -> String {
    format!(
        "# {dataset_name}\n\
         \n\
         This dataset contains utterance-level audio clips and their transcriptions.\n\
         \n\
         - `{data}/` holds one WAV clip per utterance, in the format of its source recording.\n\
         - `{metadata}` lists every clip with the columns `{columns}`.\n\
         \n\
         Utterance identifiers have the form `<recording>{sep}<index>`, where `<index>` is the\n\
         position of the interval in the source annotation tier.\n",
        data = layout::DATA_DIR,
        metadata = layout::METADATA_FILE,
        columns = METADATA_COLUMNS.join(","),
        sep = layout::UTTERANCE_SEPARATOR,
    )
}
