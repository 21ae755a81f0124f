//! Praat TextGrid annotation parsing.
//!
//! This module reads hierarchical interval annotations and yields the
//! utterance intervals of one tier, in temporal order.

mod document;
mod lexer;
mod parser;

pub use document::{
    AnnotationDocument, Interval, Point, Tier, TierKind, TierSelector, UtteranceInterval,
};
pub use parser::{parse_textgrid, read_utterances};
