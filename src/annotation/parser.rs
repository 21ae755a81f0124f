//! TextGrid parsing.
//!
//! Reads Praat text TextGrids in either the long or the short layout and
//! extracts the utterance intervals of one tier.

use std::path::Path;

use tracing::debug;

use super::document::{
    AnnotationDocument, Interval, Point, Tier, TierKind, TierSelector, UtteranceInterval,
};
use super::lexer::{LexError, Spanned, Token, tokenize};
use crate::constants::textgrid;
use crate::error::{Error, Result};

/// Parse failure before the file path is attached.
#[derive(Debug)]
struct Failure {
    line: Option<usize>,
    message: String,
}

impl Failure {
    fn into_error(self, path: &Path) -> Error {
        let message = match self.line {
            Some(line) => format!("line {line}: {}", self.message),
            None => self.message,
        };
        Error::AnnotationParse {
            path: path.to_path_buf(),
            message,
        }
    }
}

impl From<LexError> for Failure {
    fn from(e: LexError) -> Self {
        Self {
            line: Some(e.line),
            message: e.message,
        }
    }
}

/// Parse a TextGrid file into a document.
///
/// Accepts UTF-8 (with or without BOM) and UTF-16 files with a BOM.
///
/// # Errors
///
/// Returns [`Error::AnnotationRead`] if the file cannot be read and
/// [`Error::AnnotationParse`] if it is not a well-formed text TextGrid.
pub fn parse_textgrid(path: &Path) -> Result<AnnotationDocument> {
    let bytes = std::fs::read(path).map_err(|e| Error::AnnotationRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source = decode_text(&bytes).map_err(|f| f.into_error(path))?;
    parse_source(&source).map_err(|f| f.into_error(path))
}

/// Read the utterance intervals of one TextGrid.
///
/// Every interval of the selected tier is returned in file order,
/// including empty and silent ones; filtering is the caller's job.
///
/// # Errors
///
/// Returns the errors of [`parse_textgrid`], or [`Error::TierNotFound`]
/// if no interval tier matches `selector`.
pub fn read_utterances(path: &Path, selector: &TierSelector) -> Result<Vec<UtteranceInterval>> {
    let document = parse_textgrid(path)?;

    let tier = document
        .select_tier(selector)
        .ok_or_else(|| Error::TierNotFound {
            path: path.to_path_buf(),
            selector: selector.to_string(),
        })?;

    let intervals = tier.intervals().unwrap_or_default();
    debug!(
        "Tier '{}' of {} has {} intervals",
        tier.name,
        path.display(),
        intervals.len()
    );

    Ok(intervals.iter().map(UtteranceInterval::from).collect())
}

/// Decode raw bytes, honouring UTF-8 and UTF-16 byte order marks.
fn decode_text(bytes: &[u8]) -> std::result::Result<String, Failure> {
    let failure = |message: &str| Failure {
        line: None,
        message: message.to_string(),
    };

    if bytes.starts_with(textgrid::BINARY_FILE_TYPE.as_bytes()) {
        return Err(failure("binary TextGrid files are not supported"));
    }
    if let Some(rest) = bytes.strip_prefix(b"\xFF\xFE") {
        return decode_utf16(rest, u16::from_le_bytes)
            .ok_or_else(|| failure("invalid UTF-16LE text"));
    }
    if let Some(rest) = bytes.strip_prefix(b"\xFE\xFF") {
        return decode_utf16(rest, u16::from_be_bytes)
            .ok_or_else(|| failure("invalid UTF-16BE text"));
    }

    let rest = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8(rest.to_vec()).map_err(|_| failure("file is not valid UTF-8 or UTF-16 text"))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Option<String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| to_unit([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).ok()
}

fn parse_source(source: &str) -> std::result::Result<AnnotationDocument, Failure> {
    let tokens = tokenize(source)?;
    let mut cursor = Cursor::new(&tokens);

    let file_type = cursor.text("file type")?;
    if file_type != textgrid::TEXT_FILE_TYPE {
        return Err(cursor.fail(&format!(
            "expected file type \"{}\", found \"{file_type}\"",
            textgrid::TEXT_FILE_TYPE
        )));
    }

    let class = cursor.text("object class")?;
    if class != textgrid::OBJECT_CLASS {
        return Err(cursor.fail(&format!(
            "expected object class \"{}\", found \"{class}\"",
            textgrid::OBJECT_CLASS
        )));
    }

    let xmin = cursor.number("document xmin")?;
    let xmax = cursor.number("document xmax")?;

    let tiers = match cursor.flag("tiers flag")?.as_str() {
        "exists" => {
            let size = cursor.count("tier count")?;
            let mut tiers = Vec::with_capacity(cursor.capacity_for(size, 5));
            for _ in 0..size {
                tiers.push(parse_tier(&mut cursor)?);
            }
            tiers
        }
        "absent" => Vec::new(),
        other => return Err(cursor.fail(&format!("unexpected tiers flag <{other}>"))),
    };

    if !cursor.is_done() {
        return Err(cursor.fail("unexpected data after last tier"));
    }

    Ok(AnnotationDocument { xmin, xmax, tiers })
}

fn parse_tier(cursor: &mut Cursor<'_>) -> std::result::Result<Tier, Failure> {
    let class = cursor.text("tier class")?;
    let name = cursor.text("tier name")?;
    let xmin = cursor.number("tier xmin")?;
    let xmax = cursor.number("tier xmax")?;
    let size = cursor.count("tier size")?;

    let kind = match class.as_str() {
        textgrid::INTERVAL_TIER => {
            let mut intervals = Vec::with_capacity(cursor.capacity_for(size, 3));
            for _ in 0..size {
                intervals.push(Interval {
                    xmin: cursor.number("interval xmin")?,
                    xmax: cursor.number("interval xmax")?,
                    text: cursor.text("interval text")?,
                });
            }
            TierKind::Interval(intervals)
        }
        textgrid::TEXT_TIER => {
            let mut points = Vec::with_capacity(cursor.capacity_for(size, 2));
            for _ in 0..size {
                points.push(Point {
                    time: cursor.number("point time")?,
                    mark: cursor.text("point mark")?,
                });
            }
            TierKind::Point(points)
        }
        other => return Err(cursor.fail(&format!("unknown tier class \"{other}\""))),
    };

    Ok(Tier {
        name,
        xmin,
        xmax,
        kind,
    })
}

/// Sequential reader over the token stream.
struct Cursor<'a> {
    tokens: &'a [Spanned],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(tokens: &'a [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    const fn is_done(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    const fn remaining(&self) -> usize {
        self.tokens.len().saturating_sub(self.pos)
    }

    /// Capacity for a declared count of entries that take `tokens_each`
    /// tokens. Never more than the remaining input could fill.
    fn capacity_for(&self, declared: usize, tokens_each: usize) -> usize {
        declared.min(self.remaining() / tokens_each)
    }

    /// Line of the most recently consumed token, or the next one.
    fn line(&self) -> Option<usize> {
        self.tokens
            .get(self.pos.saturating_sub(1))
            .or_else(|| self.tokens.get(self.pos))
            .map(|s| s.line)
    }

    fn fail(&self, message: &str) -> Failure {
        Failure {
            line: self.line(),
            message: message.to_string(),
        }
    }

    fn next(&mut self, what: &str) -> std::result::Result<&'a Spanned, Failure> {
        let spanned = self.tokens.get(self.pos).ok_or_else(|| Failure {
            line: self.line(),
            message: format!("unexpected end of file, expected {what}"),
        })?;
        self.pos += 1;
        Ok(spanned)
    }

    fn mismatch(spanned: &Spanned, expected: &str, what: &str) -> Failure {
        Failure {
            line: Some(spanned.line),
            message: format!("expected {expected} for {what}, found {}", spanned.token.kind()),
        }
    }

    fn number(&mut self, what: &str) -> std::result::Result<f64, Failure> {
        let spanned = self.next(what)?;
        match spanned.token {
            Token::Number(value) if value.is_finite() => Ok(value),
            Token::Number(_) => Err(Failure {
                line: Some(spanned.line),
                message: format!("non-finite value for {what}"),
            }),
            _ => Err(Self::mismatch(spanned, "number", what)),
        }
    }

    fn count(&mut self, what: &str) -> std::result::Result<usize, Failure> {
        let value = self.number(what)?;
        if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
            return Err(self.fail(&format!("invalid {what}: {value}")));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(value as usize)
    }

    fn text(&mut self, what: &str) -> std::result::Result<String, Failure> {
        let spanned = self.next(what)?;
        match &spanned.token {
            Token::Text(text) => Ok(text.clone()),
            _ => Err(Self::mismatch(spanned, "string", what)),
        }
    }

    fn flag(&mut self, what: &str) -> std::result::Result<String, Failure> {
        let spanned = self.next(what)?;
        match &spanned.token {
            Token::Flag(flag) => Ok(flag.clone()),
            _ => Err(Self::mismatch(spanned, "flag", what)),
        }
    }
}
