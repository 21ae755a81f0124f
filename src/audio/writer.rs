//! WAV file writing.
//!
//! Writes utterance clips as plain RIFF/WAVE files in the format of their
//! source recording.

use std::fs;
use std::path::{Path, PathBuf};

use hound::WavWriter as HoundWriter;
use tracing::debug;

use super::{ClipBuffer, Samples};
use crate::constants::layout::CLIP_EXTENSION;
use crate::error::{Error, Result};

/// Writes utterance clips into a dataset's data directory.
pub struct ClipWriter {
    /// Directory receiving the clips.
    data_dir: PathBuf,
}

impl ClipWriter {
    /// Create a clip writer for `data_dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir).map_err(|e| Error::OutputDirCreateFailed {
            path: data_dir.clone(),
            source: e,
        })?;
        Ok(Self { data_dir })
    }

    /// Path a clip with this utterance id is written to.
    pub fn clip_path(&self, utterance_id: &str) -> PathBuf {
        self.data_dir.join(format!("{utterance_id}.{CLIP_EXTENSION}"))
    }

    /// Write `clip` as `{utterance_id}.wav`, overwriting any previous file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_clip(&self, clip: &ClipBuffer, utterance_id: &str) -> Result<PathBuf> {
        let output_path = self.clip_path(utterance_id);
        write_wav(clip, &output_path)?;
        Ok(output_path)
    }
}

/// Serialize a clip to a WAV file at `path`.
///
/// The output carries only the format header and sample data, so identical
/// clips always produce identical bytes. A partially written file is
/// removed on failure.
///
/// # Errors
///
/// Returns [`Error::WavWriteFailed`] if the file cannot be created or
/// written.
pub fn write_wav(clip: &ClipBuffer, path: &Path) -> Result<()> {
    let result = write_samples(clip, path);

    if result.is_err()
        && path.exists()
        && let Err(e) = fs::remove_file(path)
    {
        debug!("Could not remove partial clip {}: {e}", path.display());
    }

    result.map_err(|e| Error::WavWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

fn write_samples(clip: &ClipBuffer, path: &Path) -> std::result::Result<(), hound::Error> {
    let mut writer = HoundWriter::create(path, clip.spec)?;

    match &clip.samples {
        Samples::Int(samples) => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        Samples::Float(samples) => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
    }

    writer.finalize()
}
