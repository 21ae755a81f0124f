//! Corpus-to-dataset build loop.

use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::MultiProgress;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::discovery::{CorpusEntry, discover_corpus};
use super::metadata::{UtteranceRecord, utterance_id, write_metadata, write_readme};
use crate::annotation::{TierSelector, read_utterances};
use crate::audio::{ClipWriter, Recording};
use crate::constants::{DEFAULT_DATASET_NAME, discovery, layout};
use crate::error::{Error, Result};
use crate::output::progress;
use crate::text::normalize;

/// Everything a build needs, passed explicitly.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory of source recordings.
    pub audio_dir: PathBuf,
    /// Directory of annotation documents.
    pub annotation_dir: PathBuf,
    /// Directory the dataset directory is created in.
    pub output_dir: PathBuf,
    /// Name of the dataset directory.
    pub dataset_name: String,
    /// Utterance tier selection.
    pub tier: TierSelector,
    /// Abort on the first recording-level error instead of skipping.
    pub fail_fast: bool,
    /// Recording file extension.
    pub audio_extension: String,
    /// Annotation file extension.
    pub annotation_extension: String,
    /// Show progress bars.
    pub progress: bool,
}

impl BuildConfig {
    /// Create a build configuration with default settings.
    pub fn new(audio_dir: PathBuf, annotation_dir: PathBuf, output_dir: PathBuf) -> Self {
        Self {
            audio_dir,
            annotation_dir,
            output_dir,
            dataset_name: DEFAULT_DATASET_NAME.to_string(),
            tier: TierSelector::default(),
            fail_fast: false,
            audio_extension: discovery::AUDIO_EXTENSION.to_string(),
            annotation_extension: discovery::ANNOTATION_EXTENSION.to_string(),
            progress: false,
        }
    }

    /// Root directory of the dataset, `{output_dir}/{dataset_name}`.
    pub fn dataset_root(&self) -> PathBuf {
        self.output_dir.join(&self.dataset_name)
    }
}

/// Counts of everything a build accepted or skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Recordings found in the audio directory.
    pub recordings_found: usize,
    /// Recordings whose intervals were all visited.
    pub recordings_processed: usize,
    /// Recordings skipped for lack of an annotation.
    pub missing_annotations: usize,
    /// Recordings skipped for other recording-level errors.
    pub recordings_failed: usize,
    /// Annotations with no recording.
    pub orphan_annotations: usize,
    /// Intervals visited across all processed recordings.
    pub intervals_seen: usize,
    /// Clips written and recorded in the metadata table.
    pub utterances_accepted: usize,
    /// Intervals dropped because their normalized text was empty.
    pub skipped_empty: usize,
    /// Intervals dropped because their time range was invalid.
    pub skipped_invalid: usize,
    /// Intervals dropped because their clip could not be written.
    pub write_failed: usize,
}

/// Outcome of a build.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Dataset root directory.
    pub root: PathBuf,
    /// Metadata records in processing order.
    pub records: Vec<UtteranceRecord>,
    /// What was accepted and skipped.
    pub report: BuildReport,
}

impl Dataset {
    /// Path of the metadata table.
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(layout::METADATA_FILE)
    }
}

/// Build a dataset from a corpus of recordings and annotations.
///
/// Recordings are processed one at a time in file-name order; intervals in
/// tier order. Recording-level errors skip the recording, or abort the
/// run when `fail_fast` is set. Interval-level problems only skip the
/// interval. The metadata table and README are written last.
///
/// # Errors
///
/// Returns an error if the inputs cannot be listed, the output cannot be
/// created, the metadata cannot be written, or a recording fails while
/// `fail_fast` is set.
pub fn build(config: &BuildConfig) -> Result<Dataset> {
    let started = Instant::now();

    let corpus = discover_corpus(
        &config.audio_dir,
        &config.annotation_dir,
        &config.audio_extension,
        &config.annotation_extension,
    )?;

    let root = config.dataset_root();
    let writer = ClipWriter::new(root.join(layout::DATA_DIR))?;

    let mut report = BuildReport {
        recordings_found: corpus.entries.len(),
        orphan_annotations: corpus.orphan_annotations.len(),
        ..BuildReport::default()
    };
    let mut records = Vec::new();

    info!(
        "Found {} recording(s) in {}",
        corpus.entries.len(),
        config.audio_dir.display()
    );

    let multi_progress = progress::create_multi_progress(config.progress);
    let recording_progress = progress::create_recording_progress(
        &multi_progress,
        corpus.entries.len(),
        config.progress,
    );

    for entry in &corpus.entries {
        if let Some(pb) = &recording_progress {
            pb.set_message(entry.recording_id.clone());
        }
        match process_recording(
            entry,
            config,
            &writer,
            &multi_progress,
            &mut records,
            &mut report,
        ) {
            Ok(()) => report.recordings_processed += 1,
            Err(e) => {
                if matches!(e, Error::MissingAnnotation { .. }) {
                    report.missing_annotations += 1;
                } else {
                    report.recordings_failed += 1;
                }

                if config.fail_fast || !e.is_recording_level() {
                    progress::finish_progress(recording_progress, "Failed");
                    return Err(e);
                }
                multi_progress
                    .suspend(|| error!("Skipping recording '{}': {e}", entry.recording_id));
            }
        }
        progress::inc_progress(recording_progress.as_ref());
    }

    progress::finish_progress(recording_progress, "Complete");

    write_metadata(&root.join(layout::METADATA_FILE), &records)?;
    write_readme(&root.join(layout::README_FILE), &config.dataset_name)?;

    info!(
        "Complete: {} utterances from {} recording(s) in {:.2}s ({} empty, {} invalid, {} write failures)",
        report.utterances_accepted,
        report.recordings_processed,
        started.elapsed().as_secs_f64(),
        report.skipped_empty,
        report.skipped_invalid,
        report.write_failed
    );

    let skipped_recordings = report.missing_annotations + report.recordings_failed;
    if skipped_recordings > 0 {
        warn!("{skipped_recordings} recording(s) were skipped");
    }

    Ok(Dataset {
        root,
        records,
        report,
    })
}

/// Cut every accepted utterance of one recording.
///
/// Returns an error only for problems that affect the whole recording.
fn process_recording(
    entry: &CorpusEntry,
    config: &BuildConfig,
    writer: &ClipWriter,
    multi_progress: &MultiProgress,
    records: &mut Vec<UtteranceRecord>,
    report: &mut BuildReport,
) -> Result<()> {
    let annotation_path = entry.annotation()?;
    debug!(
        "Processing {} with {}",
        entry.audio_path.display(),
        annotation_path.display()
    );

    let intervals = read_utterances(annotation_path, &config.tier)?;
    let recording = Recording::open(&entry.audio_path)?;

    let utterance_progress = progress::create_utterance_progress(
        multi_progress,
        intervals.len(),
        &entry.recording_id,
        config.progress,
    );

    for (index, interval) in intervals.iter().enumerate() {
        report.intervals_seen += 1;
        let id = utterance_id(&entry.recording_id, index);
        if let Some(pb) = &utterance_progress {
            pb.inc();
        }

        let transcription = normalize(&interval.text);
        if transcription.is_empty() {
            debug!("Skipping {id}: no speech in {:?}", interval.text);
            report.skipped_empty += 1;
            continue;
        }

        let clip = match interval
            .check(&entry.recording_id, index)
            .and_then(|()| recording.slice(interval.start, interval.end))
        {
            Ok(clip) => clip,
            Err(e) if e.is_interval_level() => {
                multi_progress.suspend(|| {
                    warn!("Skipping {id} (interval {index} of '{}'): {e}", entry.recording_id);
                });
                report.skipped_invalid += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        match writer.write_clip(&clip, &id) {
            Ok(path) => {
                debug!(
                    "{id}: {:.2}s-{:.2}s ({:.3}s) -> {}",
                    interval.start,
                    interval.end,
                    clip.duration_secs(),
                    display_name(&path)
                );
                records.push(UtteranceRecord::new(&id, transcription));
                report.utterances_accepted += 1;
            }
            Err(e) => {
                multi_progress.suspend(|| warn!("Failed to write {id}: {e}"));
                report.write_failed += 1;
            }
        }
    }

    Ok(())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}
