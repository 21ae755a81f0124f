//! TextGrid document model and tier selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed TextGrid: a time domain plus an ordered list of tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationDocument {
    /// Start of the document time domain in seconds.
    pub xmin: f64,
    /// End of the document time domain in seconds.
    pub xmax: f64,
    /// Tiers in file order.
    pub tiers: Vec<Tier>,
}

/// A named track of annotations.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    /// Tier name, e.g. a speaker label.
    pub name: String,
    /// Start of the tier time domain in seconds.
    pub xmin: f64,
    /// End of the tier time domain in seconds.
    pub xmax: f64,
    /// Tier contents.
    pub kind: TierKind,
}

/// Contents of a tier.
#[derive(Debug, Clone, PartialEq)]
pub enum TierKind {
    /// `IntervalTier`: labelled time spans.
    Interval(Vec<Interval>),
    /// `TextTier`: labelled time points.
    Point(Vec<Point>),
}

/// A labelled span within an interval tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Start time in seconds.
    pub xmin: f64,
    /// End time in seconds.
    pub xmax: f64,
    /// Raw label text.
    pub text: String,
}

/// A labelled instant within a point tier.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Time in seconds.
    pub time: f64,
    /// Raw mark text.
    pub mark: String,
}

impl Tier {
    /// Intervals of this tier, or `None` for point tiers.
    pub fn intervals(&self) -> Option<&[Interval]> {
        match &self.kind {
            TierKind::Interval(intervals) => Some(intervals),
            TierKind::Point(_) => None,
        }
    }
}

impl AnnotationDocument {
    /// Find the utterance tier according to `selector`.
    ///
    /// Only interval tiers are eligible.
    pub fn select_tier(&self, selector: &TierSelector) -> Option<&Tier> {
        match selector {
            TierSelector::First => self.tiers.iter().find(|t| t.intervals().is_some()),
            TierSelector::Name(name) => self
                .tiers
                .iter()
                .find(|t| t.intervals().is_some() && t.name == *name),
            TierSelector::Index(index) => self
                .tiers
                .get(*index)
                .filter(|t| t.intervals().is_some()),
        }
    }
}

/// Rule for picking the utterance tier, applied uniformly across a corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierSelector {
    /// The first interval tier in the document.
    #[default]
    First,
    /// The first interval tier with this exact name.
    Name(String),
    /// The tier at this zero-based position; it must be an interval tier.
    Index(usize),
}

impl fmt::Display for TierSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "the first interval tier"),
            Self::Name(name) => write!(f, "name '{name}'"),
            Self::Index(index) => write!(f, "index {index}"),
        }
    }
}

/// One entry of the utterance tier, before any filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceInterval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
    /// Raw label text.
    pub text: String,
}

impl UtteranceInterval {
    /// Reject intervals whose end does not come after their start.
    pub fn check(&self, recording_id: &str, index: usize) -> Result<()> {
        if self.end > self.start {
            Ok(())
        } else {
            Err(Error::InvalidInterval {
                recording_id: recording_id.to_string(),
                index,
                start: self.start,
                end: self.end,
            })
        }
    }
}

impl From<&Interval> for UtteranceInterval {
    fn from(interval: &Interval) -> Self {
        Self {
            start: interval.xmin,
            end: interval.xmax,
            text: interval.text.clone(),
        }
    }
}
