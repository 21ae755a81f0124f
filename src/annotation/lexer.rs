//! Tokenizer for Praat text files.
//!
//! Praat's text reader only cares about numbers, quoted strings and
//! `<flag>` values; everything else (`xmin =`, `item [1]:`, `tiers?`) is
//! decoration. That makes one tokenizer work for both the long and the
//! short TextGrid layouts.

use std::iter::Peekable;
use std::str::Chars;

/// A significant token.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Token {
    /// Numeric value.
    Number(f64),
    /// Quoted string with `""` escapes resolved.
    Text(String),
    /// Angle-bracket flag such as `<exists>`.
    Flag(String),
}

impl Token {
    pub(super) const fn kind(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::Flag(_) => "flag",
        }
    }
}

/// A token with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Spanned {
    pub token: Token,
    pub line: usize,
}

/// Tokenizer failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LexError {
    pub line: usize,
    pub message: String,
}

/// Split a decoded TextGrid into significant tokens.
pub(super) fn tokenize(source: &str) -> Result<Vec<Spanned>, LexError> {
    let mut chars = source.chars().peekable();
    let mut tokens = Vec::new();
    let mut line = 1;

    while let Some(c) = chars.next() {
        match c {
            '\n' => line += 1,
            c if c.is_whitespace() => {}
            '!' => {
                // Comment runs to end of line.
                for c in chars.by_ref() {
                    if c == '\n' {
                        line += 1;
                        break;
                    }
                }
            }
            '"' => {
                let start_line = line;
                let text = read_string(&mut chars, &mut line).ok_or_else(|| LexError {
                    line: start_line,
                    message: "unterminated string".to_string(),
                })?;
                tokens.push(Spanned {
                    token: Token::Text(text),
                    line: start_line,
                });
            }
            '<' => {
                let mut flag = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '>' {
                        closed = true;
                        break;
                    }
                    if c == '\n' {
                        break;
                    }
                    flag.push(c);
                }
                if !closed {
                    return Err(LexError {
                        line,
                        message: format!("unterminated flag '<{flag}'"),
                    });
                }
                tokens.push(Spanned {
                    token: Token::Flag(flag),
                    line,
                });
            }
            c => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_whitespace() || next == '"' {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                if let Some(value) = parse_number(&word) {
                    tokens.push(Spanned {
                        token: Token::Number(value),
                        line,
                    });
                }
            }
        }
    }

    Ok(tokens)
}

/// Read the rest of a quoted string. Returns `None` if input ends first.
fn read_string(chars: &mut Peekable<Chars<'_>>, line: &mut usize) -> Option<String> {
    let mut text = String::new();
    loop {
        match chars.next()? {
            '"' => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    text.push('"');
                } else {
                    return Some(text);
                }
            }
            '\n' => {
                *line += 1;
                text.push('\n');
            }
            c => text.push(c),
        }
    }
}

/// Parse a bare word as a number. Labels never start with a digit or sign.
fn parse_number(word: &str) -> Option<f64> {
    let first = word.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '-' | '+' | '.')) {
        return None;
    }
    word.parse().ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_labels_are_skipped() {
        let tokens = kinds("xmin = 0 \nxmax = 2.5 \ntiers? <exists> \nsize = 1 \nitem []: \n");
        assert_eq!(
            tokens,
            vec![
                Token::Number(0.0),
                Token::Number(2.5),
                Token::Flag("exists".to_string()),
                Token::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_bracketed_indices_are_not_numbers() {
        let tokens = kinds("item [1]:\n    intervals [12]:\n");
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_string_escapes_and_newlines() {
        let spanned = tokenize("text = \"say \"\"hi\"\"\nnow\"\nxmin = 1").unwrap();
        assert_eq!(spanned[0].token, Token::Text("say \"hi\"\nnow".to_string()));
        assert_eq!(spanned[0].line, 1);
        assert_eq!(spanned[1].token, Token::Number(1.0));
        assert_eq!(spanned[1].line, 3);
    }

    #[test]
    fn test_comments_are_ignored() {
        let tokens = kinds("1.5 ! a comment with \"quotes\" and 3\n2.5");
        assert_eq!(tokens, vec![Token::Number(1.5), Token::Number(2.5)]);
    }

    #[test]
    fn test_unterminated_string_reports_start_line() {
        let err = tokenize("\n\ntext = \"never closed\n").unwrap_err();
        assert_eq!(err.line, 3);
        assert!(err.message.contains("unterminated string"));
    }

    #[test]
    fn test_negative_and_exponent_numbers() {
        let tokens = kinds("-0.5 1e-3 +2");
        assert_eq!(
            tokens,
            vec![Token::Number(-0.5), Token::Number(0.001), Token::Number(2.0)]
        );
    }
}
