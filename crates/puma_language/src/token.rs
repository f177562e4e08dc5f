//! Token types for the PUMA command language.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

use crate::span::Span;

/// A reserved command keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// `Zerebros`: end the session.
    End,
    /// `Sol`: load a table.
    Load,
    /// `Carnivora`: save the table.
    Save,
    /// `Papapum`: export the table.
    Export,
    /// `Magnetoseta`: describe the table.
    Describe,
    /// `melonpulta_gelida`: close the table.
    Close,
    /// `Maceta`: column sum.
    Sum,
    /// `Hipnoseta`: sampled column square.
    Square,
    /// `Petacereza`: top-N filter.
    TopN,
    /// `Jalapeño`: drop a column.
    Drop,
    /// `Football`: timed repetition.
    Timed,
    /// `Ingeniero`: capture three columns.
    Capture,
    /// `Zombidito`: paired composition.
    Pair,
    /// `Zombistein`: fixed-count repetition.
    Loop3,
    /// `Rosa`: chaos batch.
    Chaos,
}

impl Keyword {
    /// Every keyword, in grammar order.
    pub const ALL: [Self; 15] = [
        Self::End,
        Self::Load,
        Self::Save,
        Self::Export,
        Self::Describe,
        Self::Close,
        Self::Sum,
        Self::Square,
        Self::TopN,
        Self::Drop,
        Self::Timed,
        Self::Capture,
        Self::Pair,
        Self::Loop3,
        Self::Chaos,
    ];

    /// Returns the canonical spelling of this keyword.
    #[must_use]
    pub const fn lexeme(self) -> &'static str {
        match self {
            Self::End => "Zerebros",
            Self::Load => "Sol",
            Self::Save => "Carnivora",
            Self::Export => "Papapum",
            Self::Describe => "Magnetoseta",
            Self::Close => "melonpulta_gelida",
            Self::Sum => "Maceta",
            Self::Square => "Hipnoseta",
            Self::TopN => "Petacereza",
            Self::Drop => "Jalapeño",
            Self::Timed => "Football",
            Self::Capture => "Ingeniero",
            Self::Pair => "Zombidito",
            Self::Loop3 => "Zombistein",
            Self::Chaos => "Rosa",
        }
    }

    /// Looks up a scanned word. `rosa` is accepted as an alias of `Rosa`.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        if word == "rosa" {
            return Some(Self::Chaos);
        }
        Self::ALL.into_iter().find(|k| k.lexeme() == word)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// The source text this token was scanned from.
    pub lexeme: String,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Returns the keyword if this token is one.
    #[must_use]
    pub const fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(k) => Some(k),
            _ => None,
        }
    }
}

/// Token types for the PUMA command language.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A reserved command keyword.
    Keyword(Keyword),
    /// Digit run like `42`, kept as text until the parser checks its range.
    Number(String),
    /// Double-quoted string like `"datos.csv"` (quotes removed).
    String(String),
    /// Bare identifier naming a column.
    Column(String),
    /// `(`
    LParen,
    /// `)`
    RParen,
}

impl TokenKind {
    /// Returns the grammar name of this token's class, as used in expected sets.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Keyword(k) => format!("\"{}\"", k.lexeme()),
            Self::Number(_) => "NUMBER".to_string(),
            Self::String(_) => "STRING".to_string(),
            Self::Column(_) => "COLUMN".to_string(),
            Self::LParen => "\"(\"".to_string(),
            Self::RParen => "\")\"".to_string(),
        }
    }
}
