//! Integration tests for the lexer
//!
//! Tests tokenization of PUMA statements.

use puma_foundation::{ErrorCategory, ErrorKind, LexicalHint};
use puma_language::{tokenize, Keyword, Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

// =============================================================================
// Keywords
// =============================================================================

#[test]
fn every_keyword_lexes_to_itself() {
    for keyword in Keyword::ALL {
        assert_eq!(
            kinds(keyword.lexeme()),
            vec![TokenKind::Keyword(keyword)],
            "{keyword}"
        );
    }
}

#[test]
fn keywords_are_case_sensitive() {
    assert_eq!(kinds("maceta"), vec![TokenKind::Column("maceta".into())]);
    assert_eq!(kinds("SOL"), vec![TokenKind::Column("SOL".into())]);
}

#[test]
fn lowercase_rosa_is_an_alias() {
    assert_eq!(kinds("rosa"), vec![TokenKind::Keyword(Keyword::Chaos)]);
}

#[test]
fn underscore_keyword_is_one_token() {
    assert_eq!(
        kinds("melonpulta_gelida"),
        vec![TokenKind::Keyword(Keyword::Close)]
    );
    assert_eq!(
        kinds("melonpulta_gelida_2"),
        vec![TokenKind::Column("melonpulta_gelida_2".into())]
    );
}

// =============================================================================
// Operands
// =============================================================================

#[test]
fn columns_may_start_with_underscore() {
    assert_eq!(kinds("_x1"), vec![TokenKind::Column("_x1".into())]);
}

#[test]
fn strings_keep_spaces_and_keywords() {
    assert_eq!(
        kinds("\"Maceta x\""),
        vec![TokenKind::String("Maceta x".into())]
    );
}

#[test]
fn numbers_and_words_split_at_digits() {
    assert_eq!(
        kinds("Rosa 12"),
        vec![
            TokenKind::Keyword(Keyword::Chaos),
            TokenKind::Number("12".into())
        ]
    );
}

#[test]
fn whitespace_of_any_kind_separates() {
    assert_eq!(kinds("Maceta\tx\n y").len(), 3);
}

#[test]
fn lexer_streams_tokens_one_at_a_time() {
    let mut lexer = Lexer::new("Petacereza ventas");
    let first = lexer.next_token().unwrap().unwrap();
    assert_eq!(first.keyword(), Some(Keyword::TopN));
    let second = lexer.next_token().unwrap().unwrap();
    assert_eq!(second.kind, TokenKind::Column("ventas".into()));
    assert!(lexer.next_token().unwrap().is_none());
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn symbol_is_a_lexical_error_with_hint() {
    let err = tokenize("Maceta x + y").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Lexical);
    match err.kind {
        ErrorKind::Lexical {
            position,
            found,
            hint,
            ..
        } => {
            assert_eq!(position, 9);
            assert_eq!(found, '+');
            assert_eq!(hint, LexicalHint::Symbol);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn error_position_counts_characters_not_bytes() {
    let err = tokenize("Jalapeño ñ ;").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Lexical { position: 11, .. }));
    assert_eq!(err.context.unwrap().position, Some(11));
}

#[test]
fn context_window_is_bounded() {
    let source = format!("{} $ {}", "a".repeat(40), "b".repeat(40));
    let err = tokenize(&source).unwrap_err();
    let ErrorKind::Lexical { context, .. } = err.kind else {
        panic!("expected a lexical error");
    };
    assert_eq!(context.chars().count(), 30);
    assert!(context.contains('$'));
}
