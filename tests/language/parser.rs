//! Integration tests for the parser
//!
//! Tests statement parsing against the grammar and its diagnostics.

use puma_foundation::{ErrorCategory, ErrorKind};
use puma_language::grammar::{statement_starts, END_OF_INPUT, STATEMENTS};
use puma_language::{parse, parse_statement, tokenize, Action, Command};

fn col(name: &str) -> String {
    name.to_string()
}

fn parse_ok(source: &str) -> Command {
    parse_statement(source).unwrap_or_else(|e| panic!("{source}: {e}"))
}

fn expected_of(source: &str) -> Vec<String> {
    match parse_statement(source).unwrap_err().kind {
        ErrorKind::UnexpectedToken { expected, .. } | ErrorKind::UnexpectedEnd { expected } => {
            expected
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// =============================================================================
// Every production
// =============================================================================

#[test]
fn parse_every_statement_kind() {
    let cases = [
        ("Zerebros", Command::Terminate),
        ("Sol \"d.csv\"", Command::Load { path: "d.csv".into() }),
        ("Carnivora", Command::Persist { path: None }),
        (
            "Carnivora \"o.csv\"",
            Command::Persist {
                path: Some("o.csv".into()),
            },
        ),
        (
            "Papapum \"o\" \"json\"",
            Command::Export {
                path: "o".into(),
                format: Some("json".into()),
            },
        ),
        ("Magnetoseta", Command::Describe),
        ("melonpulta_gelida", Command::Close),
        (
            "Maceta a b",
            Command::Transform(Action::Sum {
                left: col("a"),
                right: col("b"),
            }),
        ),
        (
            "Hipnoseta a",
            Command::Transform(Action::Square { column: col("a") }),
        ),
        (
            "Petacereza a",
            Command::Transform(Action::TopN { column: col("a") }),
        ),
        (
            "Jalapeño a",
            Command::Transform(Action::Drop { column: col("a") }),
        ),
        (
            "Football (Hipnoseta a)",
            Command::TimedRepeat(Action::Square { column: col("a") }),
        ),
        (
            "Ingeniero a b c",
            Command::Capture([col("a"), col("b"), col("c")]),
        ),
        (
            "Zombidito (Jalapeño a Petacereza b)",
            Command::Pair(
                Action::Drop { column: col("a") },
                Action::TopN { column: col("b") },
            ),
        ),
        (
            "Zombistein (Maceta a b)",
            Command::FixedRepeat(Action::Sum {
                left: col("a"),
                right: col("b"),
            }),
        ),
        ("Rosa 5", Command::Chaos(5)),
    ];
    assert_eq!(cases.len(), STATEMENTS.len() + 1);
    for (source, expected) in cases {
        assert_eq!(parse_ok(source), expected, "{source}");
    }
}

#[test]
fn parse_takes_tokens() {
    let tokens = tokenize("Petacereza ventas").unwrap();
    assert_eq!(
        parse(tokens).unwrap(),
        Command::Transform(Action::TopN {
            column: col("ventas")
        })
    );
}

#[test]
fn display_is_reparseable() {
    for source in [
        "Sol \"a b.csv\"",
        "Papapum \"x\"",
        "Zombidito (Maceta a b Hipnoseta c)",
        "Rosa 100",
    ] {
        let command = parse_ok(source);
        assert_eq!(parse_ok(&command.to_string()), command);
    }
}

#[test]
fn zero_chaos_count_parses() {
    // rejected by the evaluator, not the grammar
    assert_eq!(parse_ok("Rosa 0"), Command::Chaos(0));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn missing_second_operand_names_column() {
    let err = parse_statement("Maceta x").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Syntax);
    assert_eq!(expected_of("Maceta x"), vec!["COLUMN"]);
}

#[test]
fn unknown_word_lists_statement_starts() {
    assert_eq!(expected_of("ventas"), statement_starts());
}

#[test]
fn composite_requires_parenthesis() {
    assert_eq!(expected_of("Football Maceta a b"), vec!["\"(\""]);
}

#[test]
fn composite_requires_closing_parenthesis() {
    assert_eq!(expected_of("Zombistein (Jalapeño a"), vec!["\")\""]);
}

#[test]
fn only_actions_nest() {
    let expected = expected_of("Zombistein (Rosa 3)");
    assert_eq!(expected.len(), 4);
    assert!(expected.contains(&"\"Maceta\"".to_string()));
}

#[test]
fn load_needs_a_string() {
    assert_eq!(expected_of("Sol datos"), vec!["STRING"]);
}

#[test]
fn chaos_needs_a_number() {
    assert_eq!(expected_of("Rosa x"), vec!["NUMBER"]);
}

#[test]
fn trailing_token_after_terminate() {
    assert_eq!(expected_of("Zerebros x"), vec![END_OF_INPUT]);
}

#[test]
fn unexpected_token_carries_position() {
    let err = parse_statement("Maceta x (").unwrap_err();
    match err.kind {
        ErrorKind::UnexpectedToken {
            found, position, ..
        } => {
            assert_eq!(found, "(");
            assert_eq!(position, 9);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn blank_statement_is_ill_formed() {
    assert!(matches!(
        parse_statement("   ").unwrap_err().kind,
        ErrorKind::IllFormed(_)
    ));
}

#[test]
fn overflowing_count_is_ill_formed() {
    assert!(matches!(
        parse_statement("Rosa 99999999999999999999").unwrap_err().kind,
        ErrorKind::IllFormed(_)
    ));
}

#[test]
fn lexical_errors_pass_through_parse_statement() {
    assert_eq!(
        parse_statement("Maceta a @").unwrap_err().category(),
        ErrorCategory::Lexical
    );
}
