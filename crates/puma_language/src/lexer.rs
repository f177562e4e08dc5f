//! Lexer for the PUMA command language.
//!
//! The lexer converts one statement into a sequence of tokens. Whitespace
//! is discarded; any character no token class accepts stops the scan with
//! a lexical error carrying its position, a window of surrounding text and
//! a hint chosen from the character's class.

use puma_foundation::{Error, ErrorKind, LexicalHint, Result};

use crate::span::Span;
use crate::token::{Keyword, Token, TokenKind};

/// Characters shown before the offending character in a diagnostic.
const CONTEXT_BEFORE: usize = 10;
/// Characters shown after the offending character in a diagnostic.
const CONTEXT_AFTER: usize = 20;

/// Lexer for PUMA statements.
pub struct Lexer {
    /// Statement text as characters, so offsets are character offsets.
    chars: Vec<char>,
    /// Current character offset.
    position: usize,
}

impl Lexer {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
        }
    }

    /// Returns the next token, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns a lexical error for an unrecognized character or an
    /// unterminated string.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        self.skip_whitespace();

        let start = self.position;
        let Some(c) = self.peek_char() else {
            return Ok(None);
        };

        let kind = match c {
            '(' => {
                self.advance();
                TokenKind::LParen
            }
            ')' => {
                self.advance();
                TokenKind::RParen
            }
            '"' => self.scan_string()?,
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_word_start(c) => self.scan_word(),
            c => return Err(self.error_at(start, c, LexicalHint::classify(c))),
        };

        let lexeme: String = self.chars[start..self.position].iter().collect();
        Ok(Some(Token::new(kind, lexeme, Span::new(start, self.position))))
    }

    /// Tokenizes the whole statement.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error met.
    pub fn tokenize_all(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.chars.len() {
            self.position += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Scans a string literal. There are no escapes.
    fn scan_string(&mut self) -> Result<TokenKind> {
        let start = self.position;
        self.advance(); // opening '"'
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::String(text));
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
                None => return Err(self.error_at(start, '"', LexicalHint::UnterminatedString)),
            }
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        TokenKind::Number(self.chars[start..self.position].iter().collect())
    }

    /// Scans a whole identifier, then checks it against the reserved words.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(is_word_char) {
            self.advance();
        }
        let word: String = self.chars[start..self.position].iter().collect();
        match Keyword::from_word(&word) {
            Some(keyword) => TokenKind::Keyword(keyword),
            None => TokenKind::Column(word),
        }
    }

    fn error_at(&self, position: usize, found: char, hint: LexicalHint) -> Error {
        let from = position.saturating_sub(CONTEXT_BEFORE);
        let to = (position + CONTEXT_AFTER).min(self.chars.len());
        Error::at(
            ErrorKind::Lexical {
                position,
                found,
                context: self.chars[from..to].iter().collect(),
                hint,
            },
            position,
        )
    }
}

fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tokenizes one statement.
///
/// # Errors
///
/// Returns a lexical error if the statement contains a character no token
/// class accepts.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    Lexer::new(source).tokenize_all()
}
