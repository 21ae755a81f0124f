//! Recording decoding and time-range slicing using hound.

use std::ops::Range;
use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec};

use crate::constants::slicing::END_CLAMP_TOLERANCE_SECS;
use crate::error::{Error, Result};

/// Interleaved PCM samples in their native representation.
///
/// Integer PCM of any bit depth is widened to `i32`; 32-bit float PCM stays
/// `f32`. Nothing is rescaled, so writing back with the original spec
/// reproduces the source samples exactly.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples {
    /// Integer PCM.
    Int(Vec<i32>),
    /// IEEE float PCM.
    Float(Vec<f32>),
}

impl Samples {
    /// Total number of interleaved samples.
    pub fn len(&self) -> usize {
        match self {
            Self::Int(s) => s.len(),
            Self::Float(s) => s.len(),
        }
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sub_range(&self, range: Range<usize>) -> Self {
        match self {
            Self::Int(s) => Self::Int(s[range].to_vec()),
            Self::Float(s) => Self::Float(s[range].to_vec()),
        }
    }
}

/// A decoded source recording.
#[derive(Debug, Clone)]
pub struct Recording {
    path: PathBuf,
    spec: WavSpec,
    samples: Samples,
}

/// A standalone audio buffer cut from a recording.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipBuffer {
    /// Format of the source recording.
    pub spec: WavSpec,
    /// Interleaved samples.
    pub samples: Samples,
}

impl Recording {
    /// Decode a WAV recording, keeping its sample rate, channel layout and
    /// sample format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AudioOpen`] if the file cannot be opened as WAV and
    /// [`Error::AudioDecode`] if its samples cannot be read.
    pub fn open(path: &Path) -> Result<Self> {
        let mut reader = WavReader::open(path).map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: e,
        })?;
        let spec = reader.spec();

        let decode_err = |e: hound::Error| Error::AudioDecode {
            path: path.to_path_buf(),
            source: e,
        };

        let samples = match spec.sample_format {
            SampleFormat::Int => Samples::Int(
                reader
                    .samples::<i32>()
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(decode_err)?,
            ),
            SampleFormat::Float => Samples::Float(
                reader
                    .samples::<f32>()
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(decode_err)?,
            ),
        };

        Ok(Self {
            path: path.to_path_buf(),
            spec,
            samples,
        })
    }

    /// Path the recording was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format of the recording.
    pub const fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.spec.channels.max(1))
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        frames_to_secs(self.frames(), self.spec.sample_rate)
    }

    /// Cut the frames spanning `[start, end)` seconds.
    ///
    /// Boundaries are rounded to the nearest frame. An end that overshoots
    /// the recording by at most [`END_CLAMP_TOLERANCE_SECS`] is clamped to
    /// the last frame; anything further out is rejected, as is a range that
    /// would contain no frames.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IntervalOutOfRange`] if the range does not fit the
    /// recording.
    pub fn slice(&self, start: f64, end: f64) -> Result<ClipBuffer> {
        let duration = self.duration_secs();
        let out_of_range = || Error::IntervalOutOfRange {
            start,
            end,
            duration,
        };

        if !start.is_finite()
            || !end.is_finite()
            || start < 0.0
            || start >= duration
            || end > duration + END_CLAMP_TOLERANCE_SECS
        {
            return Err(out_of_range());
        }

        let total = self.frames();
        let first = secs_to_frame(start, self.spec.sample_rate).min(total);
        let last = secs_to_frame(end, self.spec.sample_rate).min(total);
        if last <= first {
            return Err(out_of_range());
        }

        let channels = usize::from(self.spec.channels);
        Ok(ClipBuffer {
            spec: self.spec,
            samples: self.samples.sub_range(first * channels..last * channels),
        })
    }
}

impl ClipBuffer {
    /// Number of frames (samples per channel).
    pub fn frames(&self) -> usize {
        self.samples.len() / usize::from(self.spec.channels.max(1))
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        frames_to_secs(self.frames(), self.spec.sample_rate)
    }
}

/// Open `path` and cut the frames spanning `[start, end)` seconds.
///
/// Prefer [`Recording::open`] plus [`Recording::slice`] when cutting several
/// clips from one recording.
///
/// # Errors
///
/// Returns the errors of [`Recording::open`] and [`Recording::slice`].
pub fn slice_file(path: &Path, start: f64, end: f64) -> Result<ClipBuffer> {
    Recording::open(path)?.slice(start, end)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn secs_to_frame(secs: f64, sample_rate: u32) -> usize {
    (secs * f64::from(sample_rate)).round() as usize
}

#[allow(clippy::cast_precision_loss)]
fn frames_to_secs(frames: usize, sample_rate: u32) -> f64 {
    if sample_rate == 0 {
        return 0.0;
    }
    frames as f64 / f64::from(sample_rate)
}
