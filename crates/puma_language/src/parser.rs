//! Parser for the PUMA command language.
//!
//! The parser matches a token sequence against the productions in
//! [`crate::grammar`] and assembles a [`Command`]. There is no recovery:
//! the first mismatch becomes the statement's syntax error.

use puma_foundation::{Error, ErrorKind, Result};

use crate::ast::{Action, Command};
use crate::grammar::{self, Production, Symbol, END_OF_INPUT};
use crate::lexer::tokenize;
use crate::token::{Keyword, Token, TokenKind};

/// A matched operand, before it is assembled into a command.
#[derive(Clone, Debug, PartialEq)]
enum Operand {
    Column(String),
    String(String),
    Number(i64),
    Action(Action),
    Absent,
}

/// Parser over the tokens of one statement.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Creates a new parser over the given tokens.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parses one complete statement.
    ///
    /// # Errors
    ///
    /// Returns `IllFormed` for an empty statement, `UnexpectedToken` or
    /// `UnexpectedEnd` when the tokens do not match the grammar.
    pub fn parse(&mut self) -> Result<Command> {
        if self.tokens.is_empty() {
            return Err(Error::new(ErrorKind::IllFormed("empty statement".into())));
        }

        let keyword = self.expect_keyword(grammar::statement_starts(), |_| true)?;
        let production = lookup(keyword)?;
        let (operands, trailing_optional) = self.match_body(production)?;

        if let Some(token) = self.current() {
            let mut expected = Vec::new();
            if trailing_optional {
                expected.extend(Symbol::OptionalString.first_set());
            }
            expected.push(END_OF_INPUT.to_string());
            return Err(self.unexpected(token, expected));
        }

        assemble(keyword, operands)
    }

    /// Matches the body of a production, returning its operands and whether
    /// the last symbol was an optional string that was left out.
    fn match_body(&mut self, production: &Production) -> Result<(Vec<Operand>, bool)> {
        let mut operands = Vec::new();
        let mut skipped_optional = false;
        for symbol in production.body {
            skipped_optional = false;
            match symbol {
                Symbol::Column => {
                    let name = self.expect_with(*symbol, |kind| match kind {
                        TokenKind::Column(name) => Some(name.clone()),
                        _ => None,
                    })?;
                    operands.push(Operand::Column(name));
                }
                Symbol::String => {
                    let text = self.expect_with(*symbol, string_value)?;
                    operands.push(Operand::String(text));
                }
                Symbol::OptionalString => {
                    match self.current().and_then(|t| string_value(&t.kind)) {
                        Some(text) => {
                            self.advance();
                            operands.push(Operand::String(text));
                        }
                        None => {
                            skipped_optional = true;
                            operands.push(Operand::Absent);
                        }
                    }
                }
                Symbol::Number => {
                    let digits = self.expect_with(*symbol, |kind| match kind {
                        TokenKind::Number(digits) => Some(digits.clone()),
                        _ => None,
                    })?;
                    let n = digits.parse::<i64>().map_err(|_| {
                        Error::new(ErrorKind::IllFormed(format!(
                            "number {digits} does not fit in a 64-bit integer"
                        )))
                    })?;
                    operands.push(Operand::Number(n));
                }
                Symbol::LParen => {
                    self.expect_with(*symbol, |kind| (*kind == TokenKind::LParen).then_some(()))?;
                }
                Symbol::RParen => {
                    self.expect_with(*symbol, |kind| (*kind == TokenKind::RParen).then_some(()))?;
                }
                Symbol::Action => {
                    let keyword =
                        self.expect_keyword(grammar::action_starts(), grammar::is_action)?;
                    let inner = lookup(keyword)?;
                    let (inner_operands, _) = self.match_body(inner)?;
                    match assemble(keyword, inner_operands)? {
                        Command::Transform(action) => operands.push(Operand::Action(action)),
                        other => {
                            return Err(Error::internal(format!(
                                "{} is not an action",
                                other.keyword()
                            )));
                        }
                    }
                }
            }
        }
        Ok((operands, skipped_optional))
    }

    /// Consumes a keyword accepted by `accept`, or fails with `expected`.
    fn expect_keyword(
        &mut self,
        expected: Vec<String>,
        accept: impl Fn(Keyword) -> bool,
    ) -> Result<Keyword> {
        match self.current() {
            Some(token) => match token.keyword() {
                Some(keyword) if accept(keyword) => {
                    self.advance();
                    Ok(keyword)
                }
                _ => Err(self.unexpected(token, expected)),
            },
            None => Err(unexpected_end(expected)),
        }
    }

    /// Consumes a token that `extract` accepts, or fails with the symbol's first set.
    fn expect_with<T>(
        &mut self,
        symbol: Symbol,
        extract: impl Fn(&TokenKind) -> Option<T>,
    ) -> Result<T> {
        match self.current() {
            Some(token) => match extract(&token.kind) {
                Some(value) => {
                    self.advance();
                    Ok(value)
                }
                None => Err(self.unexpected(token, symbol.first_set())),
            },
            None => Err(unexpected_end(symbol.first_set())),
        }
    }

    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    fn unexpected(&self, token: &Token, expected: Vec<String>) -> Error {
        Error::at(
            ErrorKind::UnexpectedToken {
                found: token.lexeme.clone(),
                position: token.span.start,
                expected,
            },
            token.span.start,
        )
    }
}

fn unexpected_end(expected: Vec<String>) -> Error {
    Error::new(ErrorKind::UnexpectedEnd { expected })
}

fn string_value(kind: &TokenKind) -> Option<String> {
    match kind {
        TokenKind::String(text) => Some(text.clone()),
        _ => None,
    }
}

fn lookup(keyword: Keyword) -> Result<&'static Production> {
    grammar::production(keyword)
        .ok_or_else(|| Error::internal(format!("no production for {keyword}")))
}

/// Builds a command from a keyword and the operands its production matched.
fn assemble(keyword: Keyword, operands: Vec<Operand>) -> Result<Command> {
    let command = match (keyword, operands.as_slice()) {
        (Keyword::End, []) => Command::Terminate,
        (Keyword::Load, [Operand::String(path)]) => Command::Load { path: path.clone() },
        (Keyword::Save, [path]) => Command::Persist {
            path: optional(path),
        },
        (Keyword::Export, [Operand::String(path), format]) => Command::Export {
            path: path.clone(),
            format: optional(format),
        },
        (Keyword::Describe, []) => Command::Describe,
        (Keyword::Close, []) => Command::Close,
        (Keyword::Sum, [Operand::Column(left), Operand::Column(right)]) => {
            Command::Transform(Action::Sum {
                left: left.clone(),
                right: right.clone(),
            })
        }
        (Keyword::Square, [Operand::Column(column)]) => Command::Transform(Action::Square {
            column: column.clone(),
        }),
        (Keyword::TopN, [Operand::Column(column)]) => Command::Transform(Action::TopN {
            column: column.clone(),
        }),
        (Keyword::Drop, [Operand::Column(column)]) => Command::Transform(Action::Drop {
            column: column.clone(),
        }),
        (Keyword::Timed, [Operand::Action(action)]) => Command::TimedRepeat(action.clone()),
        (Keyword::Pair, [Operand::Action(first), Operand::Action(second)]) => {
            Command::Pair(first.clone(), second.clone())
        }
        (Keyword::Loop3, [Operand::Action(action)]) => Command::FixedRepeat(action.clone()),
        (
            Keyword::Capture,
            [
                Operand::Column(a),
                Operand::Column(b),
                Operand::Column(c),
            ],
        ) => Command::Capture([a.clone(), b.clone(), c.clone()]),
        (Keyword::Chaos, [Operand::Number(n)]) => Command::Chaos(*n),
        (keyword, operands) => {
            return Err(Error::internal(format!(
                "production for {keyword} matched unexpected operands: {operands:?}"
            )));
        }
    };
    Ok(command)
}

fn optional(operand: &Operand) -> Option<String> {
    match operand {
        Operand::String(text) => Some(text.clone()),
        _ => None,
    }
}

/// Parses an already tokenized statement.
///
/// # Errors
///
/// Returns a syntax error if the tokens do not form a statement.
pub fn parse(tokens: Vec<Token>) -> Result<Command> {
    Parser::new(tokens).parse()
}

/// Tokenizes and parses one statement.
///
/// # Errors
///
/// Returns a lexical or syntax error.
pub fn parse_statement(source: &str) -> Result<Command> {
    parse(tokenize(source)?)
}
