use pretty_assertions::assert_eq;

use super::{LexError, LexErrorKind};

#[test]
fn stable_codes() {
    assert_eq!(LexErrorKind::File.code(), "E501");
    assert_eq!(LexErrorKind::InvalidCharacter.code(), "E101");
    assert_eq!(LexErrorKind::UnclosedString.code(), "E102");
    assert_eq!(LexErrorKind::StringTooLong.code(), "E102");
    assert_eq!(LexErrorKind::NumberTooLong.code(), "E103");
    assert_eq!(LexErrorKind::IdentifierTooLong.code(), "E104");
    assert_eq!(LexErrorKind::Lexical.code(), "E001");
}

#[test]
fn display_format() {
    let error = LexError::invalid_character("invalid character after '#': 'x'", 3, 7);
    assert_eq!(
        error.to_string(),
        "[E101] line 3, column 7: invalid character after '#': 'x'"
    );
}

#[test]
fn file_errors_carry_no_position() {
    let error = LexError::file("no such file: missing.logo");
    assert_eq!(error.line, 0);
    assert_eq!(error.column, 0);
    assert_eq!(error.code(), "E501");
}

#[test]
fn unclosed_string_message_names_the_opening_quote() {
    let error = LexError::unclosed_string(2, 5);
    assert_eq!(error.kind, LexErrorKind::UnclosedString);
    assert_eq!(
        error.message,
        "unclosed string literal, started at line 2, column 5"
    );
}

#[test]
fn length_errors_name_the_limit() {
    assert!(LexError::string_too_long(10_000, 1, 0)
        .message
        .contains("10000"));
    assert!(LexError::number_too_long(100, 1, 0).message.contains("100"));
    assert!(LexError::identifier_too_long(255, 1, 0)
        .message
        .contains("255"));
}

#[test]
fn equality_ignores_nothing() {
    let a = LexError::lexical("boom", 4, 2);
    let b = LexError::lexical("boom", 4, 2);
    let c = LexError::lexical("boom", 4, 3);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn unclosed_and_oversized_strings_share_a_code_but_not_a_kind() {
    let unclosed = LexError::unclosed_string(1, 0);
    let oversized = LexError::string_too_long(16, 1, 0);
    assert_eq!(unclosed.code(), oversized.code());
    assert_ne!(unclosed.kind, oversized.kind);
}
