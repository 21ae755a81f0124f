//! Recording and annotation discovery.
//!
//! Pairs each recording with the annotation that shares its file stem.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// One recording of the corpus and its annotation, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusEntry {
    /// Identifier derived from the recording's file stem.
    pub recording_id: String,
    /// Path to the recording.
    pub audio_path: PathBuf,
    /// Path to the matching annotation, or `None` if there is none.
    pub annotation_path: Option<PathBuf>,
    /// Where the annotation was expected.
    pub expected_annotation: PathBuf,
}

impl CorpusEntry {
    /// The annotation path, or [`Error::MissingAnnotation`].
    pub fn annotation(&self) -> Result<&Path> {
        self.annotation_path
            .as_deref()
            .ok_or_else(|| Error::MissingAnnotation {
                recording_id: self.recording_id.clone(),
                expected: self.expected_annotation.clone(),
            })
    }
}

/// Recordings paired with annotations, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// One entry per recording, sorted by file name.
    pub entries: Vec<CorpusEntry>,
    /// Annotations that no recording refers to.
    pub orphan_annotations: Vec<PathBuf>,
}

/// Discover recordings in `audio_dir` and pair them with annotations in
/// `annotation_dir`.
///
/// Both directories are scanned non-recursively. Extensions match
/// case-insensitively; stems must match exactly.
///
/// # Errors
///
/// Returns an error if either directory is missing or cannot be read.
pub fn discover_corpus(
    audio_dir: &Path,
    annotation_dir: &Path,
    audio_extension: &str,
    annotation_extension: &str,
) -> Result<Corpus> {
    let recordings = list_files(audio_dir, audio_extension)?;
    let annotations = list_files(annotation_dir, annotation_extension)?;

    let mut by_stem: HashMap<String, PathBuf> = annotations
        .into_iter()
        .filter_map(|path| file_stem(&path).map(|stem| (stem, path)))
        .collect();

    let annotation_extension = annotation_extension.trim_start_matches('.');
    let entries: Vec<CorpusEntry> = recordings
        .into_iter()
        .filter_map(|audio_path| {
            let recording_id = file_stem(&audio_path)?;
            let annotation_path = by_stem.remove(&recording_id);
            let expected_annotation =
                annotation_dir.join(format!("{recording_id}.{annotation_extension}"));
            Some(CorpusEntry {
                recording_id,
                audio_path,
                annotation_path,
                expected_annotation,
            })
        })
        .collect();

    let mut orphan_annotations: Vec<PathBuf> = by_stem.into_values().collect();
    orphan_annotations.sort();
    for orphan in &orphan_annotations {
        debug!("Annotation without recording: {}", orphan.display());
    }

    Ok(Corpus {
        entries,
        orphan_annotations,
    })
}

/// List files in `dir` with the given extension, sorted by file name.
///
/// # Errors
///
/// Returns [`Error::InputDirNotFound`] if `dir` is not a directory.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, extension) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

// Use to_string_lossy() so non-UTF-8 names still get an identifier.
fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}
