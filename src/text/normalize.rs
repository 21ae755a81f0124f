//! Transcript normalization.
//!
//! Turns raw interval labels into training transcriptions. Markup tags,
//! bracketed noise annotations and silence placeholders are removed; the
//! speech itself keeps its casing and punctuation.

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::SILENCE_TOKENS;

// Patterns are literals and known to compile.
#[allow(clippy::expect_used)]
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^<>]*>").expect("valid markup tag pattern"));

#[allow(clippy::expect_used)]
static NOISE_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\[\]]*\]|\{[^{}]*\}").expect("valid noise annotation pattern")
});

/// Normalize a raw interval label into a transcription.
///
/// Returns an empty string when the label carries no usable speech, which
/// callers treat as "skip this interval".
///
/// # Examples
///
/// ```
/// use uttercut::text::normalize;
///
/// assert_eq!(normalize("  hello  "), "hello");
/// assert_eq!(normalize("<UNSURE>maybe</UNSURE> not"), "maybe not");
/// assert_eq!(normalize("<INAUDIBLE_SPEECH/>"), "");
/// ```
pub fn normalize(raw: &str) -> String {
    let without_tags = MARKUP_TAG.replace_all(raw, " ");
    let without_noise = NOISE_ANNOTATION.replace_all(&without_tags, " ");

    without_noise
        .split_whitespace()
        .filter(|token| !is_silence_token(token))
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_silence_token(token: &str) -> bool {
    SILENCE_TOKENS
        .iter()
        .any(|marker| token.eq_ignore_ascii_case(marker))
}
