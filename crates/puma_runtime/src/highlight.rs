//! Syntax highlighting for the REPL.

use std::borrow::Cow;

use puma_language::grammar::is_action;
use puma_language::Keyword;

const RESET: &str = "\x1b[0m";

/// Highlighter for PUMA statements.
///
/// Keywords are coloured by what they do, so a composite reads apart from
/// the action inside it.
pub struct PumaHighlighter;

impl PumaHighlighter {
    /// Creates a new highlighter.
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let mut result = String::with_capacity(line.len() * 2);
        let mut chars = line.chars().peekable();
        let mut in_string = false;

        while let Some(c) = chars.next() {
            match c {
                '"' => {
                    if in_string {
                        result.push(c);
                        result.push_str(RESET);
                        in_string = false;
                    } else {
                        result.push_str("\x1b[33m"); // yellow
                        result.push(c);
                        in_string = true;
                    }
                }

                c if in_string => result.push(c),

                c if c.is_ascii_digit() => {
                    result.push_str("\x1b[35m"); // magenta
                    result.push(c);
                    while let Some(next) = chars.next_if(char::is_ascii_digit) {
                        result.push(next);
                    }
                    result.push_str(RESET);
                }

                '(' | ')' => {
                    result.push_str("\x1b[1m"); // bold
                    result.push(c);
                    result.push_str(RESET);
                }

                c if c.is_alphabetic() || c == '_' => {
                    let mut word = String::new();
                    word.push(c);
                    while let Some(next) = chars.next_if(|n| n.is_alphanumeric() || *n == '_') {
                        word.push(next);
                    }
                    match Keyword::from_word(&word).map(keyword_color) {
                        Some(color) => {
                            result.push_str(color);
                            result.push_str(&word);
                            result.push_str(RESET);
                        }
                        None => result.push_str(&word),
                    }
                }

                // Anything the lexer would reject
                c if !c.is_whitespace() => {
                    result.push_str("\x1b[4;31m"); // underlined red
                    result.push(c);
                    result.push_str(RESET);
                }

                _ => result.push(c),
            }
        }

        if in_string {
            result.push_str(RESET);
        }

        Cow::Owned(result)
    }
}

impl Default for PumaHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn keyword_color(keyword: Keyword) -> &'static str {
    match keyword {
        Keyword::End => "\x1b[1;31m",
        Keyword::Chaos => "\x1b[31m",
        Keyword::Timed | Keyword::Pair | Keyword::Loop3 | Keyword::Capture => "\x1b[1;32m",
        k if is_action(k) => "\x1b[32m",
        _ => "\x1b[36m",
    }
}
