use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use super::{Lexer, Limits};
use crate::lex_error::{LexError, LexErrorKind};
use crate::token::{Tag, Token, Value};

fn source_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Scan the whole source, asserting no errors, and return every token
/// before EOF.
fn scan_all(text: &str) -> Vec<Token> {
    let file = source_file(text);
    let mut lexer = Lexer::open(file.path()).unwrap();
    let mut tokens = Vec::new();
    loop {
        let token = lexer.scan().unwrap();
        if token.is_eof() {
            return tokens;
        }
        tokens.push(token);
    }
}

/// Scan until the first error and return it.
fn first_error(text: &str) -> LexError {
    let file = source_file(text);
    let mut lexer = Lexer::open(file.path()).unwrap();
    loop {
        match lexer.scan() {
            Ok(token) => assert!(!token.is_eof(), "no error in {text:?}"),
            Err(error) => return error,
        }
    }
}

fn first_error_with_limits(text: &str, limits: Limits) -> LexError {
    let file = source_file(text);
    let mut lexer = Lexer::open(file.path()).unwrap().with_limits(limits);
    loop {
        match lexer.scan() {
            Ok(token) => assert!(!token.is_eof(), "no error in {text:?}"),
            Err(error) => return error,
        }
    }
}

fn tags(tokens: &[Token]) -> Vec<Tag> {
    tokens.iter().map(Token::tag).collect()
}

fn float_of(token: &Token) -> f64 {
    match token.value() {
        Some(Value::Float(x)) => *x,
        other => panic!("expected float payload, got {other:?}"),
    }
}

// === Session lifecycle ===

#[test]
fn missing_file_is_a_file_error() {
    let error = Lexer::open("definitely/not/here.logo").unwrap_err();
    assert_eq!(error.kind, LexErrorKind::File);
    assert_eq!(error.code(), "E501");
    assert_eq!((error.line, error.column), (0, 0));
}

#[test]
fn empty_source_yields_eof_immediately() {
    let file = source_file("");
    let mut lexer = Lexer::open(file.path()).unwrap();
    assert!(lexer.scan().unwrap().is_eof());
}

#[test]
fn eof_is_idempotent() {
    let file = source_file("FD 10");
    let mut lexer = Lexer::open(file.path()).unwrap();
    lexer.scan().unwrap();
    lexer.scan().unwrap();
    for _ in 0..5 {
        assert!(lexer.scan().unwrap().is_eof());
    }
}

#[test]
fn close_is_idempotent_and_scan_after_close_is_eof() {
    let file = source_file("FD 10");
    let mut lexer = Lexer::open(file.path()).unwrap();
    lexer.close();
    lexer.close();
    assert!(lexer.scan().unwrap().is_eof());
}

#[test]
fn sessions_are_independent() {
    let a = source_file("alpha");
    let b = source_file("beta");
    let mut first = Lexer::open(a.path()).unwrap();
    let mut second = Lexer::open(b.path()).unwrap();
    assert_eq!(
        first.scan().unwrap(),
        Token::text(Tag::Id, "ALPHA")
    );
    assert_eq!(
        second.scan().unwrap(),
        Token::text(Tag::Id, "BETA")
    );
}

// === Keywords and identifiers ===

#[test]
fn keywords_are_case_insensitive_and_aliased() {
    let tokens = scan_all("forward FD Forward fd");
    assert_eq!(tokens.len(), 4);
    for token in &tokens {
        assert_eq!(token, &Token::text(Tag::Forward, "FORWARD"));
    }
}

#[test]
fn all_movement_keywords() {
    let tokens = scan_all("FD BK RT LT SETX SETY SETXY HOME CLS");
    assert_eq!(
        tags(&tokens),
        vec![
            Tag::Forward,
            Tag::Backward,
            Tag::Right,
            Tag::Left,
            Tag::SetX,
            Tag::SetY,
            Tag::SetXy,
            Tag::Home,
            Tag::Clear,
        ]
    );
}

#[test]
fn identifiers_are_uppercased_and_cached() {
    let tokens = scan_all("side SIDE Side");
    assert_eq!(tokens.len(), 3);
    for token in &tokens {
        assert_eq!(token, &Token::text(Tag::Id, "SIDE"));
    }
}

#[test]
fn identifiers_allow_digits_and_underscores_after_the_first_char() {
    let tokens = scan_all("x2 my_var _start");
    assert_eq!(tokens[0], Token::text(Tag::Id, "X2"));
    assert_eq!(tokens[1], Token::text(Tag::Id, "MY_VAR"));
    assert_eq!(tokens[2], Token::text(Tag::Id, "_START"));
}

#[test]
fn keyword_prefix_does_not_capture_a_longer_identifier() {
    let tokens = scan_all("IFELSE IFX");
    assert_eq!(tokens[0].tag(), Tag::IfElse);
    assert_eq!(tokens[1], Token::text(Tag::Id, "IFX"));
}

// === Numbers ===

#[test]
fn integer_number() {
    assert_eq!(scan_all("42"), vec![Token::int(42)]);
}

#[test]
fn fractional_number() {
    let tokens = scan_all("3.14");
    assert_eq!(tokens[0].tag(), Tag::Number);
    assert!((float_of(&tokens[0]) - 3.14).abs() < 1e-12);
}

#[test]
fn leading_dot_number() {
    let tokens = scan_all(".5");
    assert!((float_of(&tokens[0]) - 0.5).abs() < 1e-12);
}

#[test]
fn trailing_dot_belongs_to_the_number() {
    // "7." consumes the dot, yielding a float with no fractional digits.
    let tokens = scan_all("7.");
    assert_eq!(tokens.len(), 1);
    assert!((float_of(&tokens[0]) - 7.0).abs() < 1e-12);
}

#[test]
fn lone_dot_is_a_single_character_token() {
    assert_eq!(scan_all("."), vec![Token::char('.')]);
    assert_eq!(
        scan_all(". 5"),
        vec![Token::char('.'), Token::int(5)]
    );
}

#[test]
fn number_stops_at_the_first_non_digit() {
    let tokens = scan_all("42+1");
    assert_eq!(
        tokens,
        vec![Token::int(42), Token::char('+'), Token::int(1)]
    );
}

#[test]
fn second_dot_ends_the_number() {
    let tokens = scan_all("1.2.3");
    assert_eq!(tokens.len(), 2);
    assert!((float_of(&tokens[0]) - 1.2).abs() < 1e-12);
    assert!((float_of(&tokens[1]) - 0.3).abs() < 1e-12);
}

// === Strings ===

#[test]
fn string_literal_keeps_both_quotes() {
    let tokens = scan_all("\"hello world\"");
    assert_eq!(tokens[0], Token::text(Tag::Str, "\"hello world\""));
}

#[test]
fn empty_string_literal() {
    assert_eq!(scan_all("\"\""), vec![Token::text(Tag::Str, "\"\"")]);
}

#[test]
fn string_may_span_lines() {
    let tokens = scan_all("\"two\nlines\"");
    assert_eq!(tokens[0], Token::text(Tag::Str, "\"two\nlines\""));
}

#[test]
fn unclosed_string_points_at_the_opening_quote() {
    let error = first_error("FD 10\n\"abc");
    assert_eq!(error.kind, LexErrorKind::UnclosedString);
    assert_eq!(error.code(), "E102");
    assert_eq!((error.line, error.column), (2, 0));
}

// === Operators ===

#[test]
fn multi_character_operators() {
    let tokens = scan_all("<= <> >= :=");
    assert_eq!(
        tokens,
        vec![
            Token::text(Tag::Leq, "<="),
            Token::text(Tag::Neq, "<>"),
            Token::text(Tag::Geq, ">="),
            Token::text(Tag::Assign, ":="),
        ]
    );
}

#[test]
fn operator_prefixes_retract_the_lookahead() {
    let tokens = scan_all("<x >y :z");
    assert_eq!(
        tokens,
        vec![
            Token::char('<'),
            Token::text(Tag::Id, "X"),
            Token::char('>'),
            Token::text(Tag::Id, "Y"),
            Token::char(':'),
            Token::text(Tag::Id, "Z"),
        ]
    );
}

#[test]
fn operators_at_end_of_input() {
    assert_eq!(scan_all("<"), vec![Token::char('<')]);
    assert_eq!(scan_all(":"), vec![Token::char(':')]);
}

#[test]
fn adjacent_operators_split_greedily() {
    // `<=` wins over `<` + `=`; the remaining `=` is a plain character.
    assert_eq!(
        scan_all("<=="),
        vec![Token::text(Tag::Leq, "<="), Token::char('=')]
    );
}

// === Booleans ===

#[test]
fn boolean_literals_any_case() {
    let tokens = scan_all("#T #t #F #f");
    assert_eq!(
        tags(&tokens),
        vec![Tag::True, Tag::True, Tag::False, Tag::False]
    );
    assert_eq!(tokens[0], Token::text(Tag::True, "#T"));
    assert_eq!(tokens[2], Token::text(Tag::False, "#F"));
}

#[test]
fn malformed_boolean_points_at_the_hash() {
    let error = first_error("  #x");
    assert_eq!(error.kind, LexErrorKind::InvalidCharacter);
    assert_eq!(error.code(), "E101");
    assert_eq!((error.line, error.column), (1, 2));
}

#[test]
fn hash_at_end_of_input_is_invalid() {
    let error = first_error("#");
    assert_eq!(error.kind, LexErrorKind::InvalidCharacter);
    assert_eq!((error.line, error.column), (1, 0));
}

// === Comments and whitespace ===

#[test]
fn comments_run_to_end_of_line() {
    let tokens = scan_all("FD 10 % draw one side\nRT 90");
    assert_eq!(
        tags(&tokens),
        vec![Tag::Forward, Tag::Number, Tag::Right, Tag::Number]
    );
}

#[test]
fn comment_on_the_last_line_without_newline() {
    let tokens = scan_all("HOME % done");
    assert_eq!(tags(&tokens), vec![Tag::Home]);
}

#[test]
fn comment_only_line_still_advances_the_line_counter() {
    let file = source_file("% banner\nFD 1");
    let mut lexer = Lexer::open(file.path()).unwrap();
    let token = lexer.scan().unwrap();
    assert_eq!(token.tag(), Tag::Forward);
    assert_eq!(lexer.line(), 2);
}

#[test]
fn whitespace_variants_are_skipped() {
    let tokens = scan_all("\tFD\r\n  10 \n");
    assert_eq!(tags(&tokens), vec![Tag::Forward, Tag::Number]);
}

// === Positions ===

#[test]
fn position_tracks_the_scan() {
    let file = source_file("FD 10");
    let mut lexer = Lexer::open(file.path()).unwrap();
    assert_eq!((lexer.line(), lexer.column()), (1, 0));
    lexer.scan().unwrap();
    // F, D consumed; the trailing space was read ahead and pushed back.
    assert_eq!((lexer.line(), lexer.column()), (1, 2));
}

#[test]
fn error_positions_survive_lookahead_retraction() {
    // The `<` before the `#` forces a lookahead + retraction right before
    // the failing lexeme.
    let error = first_error("<#x");
    assert_eq!((error.line, error.column), (1, 1));
}

// === Length limits ===

fn tight_limits() -> Limits {
    Limits {
        max_identifier: 5,
        max_number: 3,
        max_string: 6,
    }
}

#[test]
fn identifier_at_exactly_the_limit_is_fine() {
    let file = source_file("abcde fghij");
    let mut lexer = Lexer::open(file.path()).unwrap().with_limits(tight_limits());
    assert_eq!(lexer.scan().unwrap(), Token::text(Tag::Id, "ABCDE"));
    assert_eq!(lexer.scan().unwrap(), Token::text(Tag::Id, "FGHIJ"));
    assert!(lexer.scan().unwrap().is_eof());
}

#[test]
fn identifier_over_the_limit_errors_at_its_start() {
    let error = first_error_with_limits("  abcdef", tight_limits());
    assert_eq!(error.kind, LexErrorKind::IdentifierTooLong);
    assert_eq!(error.code(), "E104");
    assert_eq!((error.line, error.column), (1, 2));
    assert!(error.message.contains('5'));
}

#[test]
fn number_at_exactly_the_limit_is_fine() {
    let file = source_file("123 1.5");
    let mut lexer = Lexer::open(file.path()).unwrap().with_limits(tight_limits());
    assert_eq!(lexer.scan().unwrap(), Token::int(123));
    let second = lexer.scan().unwrap();
    assert!((float_of(&second) - 1.5).abs() < 1e-12);
}

#[test]
fn number_over_the_limit_errors() {
    let error = first_error_with_limits("1234", tight_limits());
    assert_eq!(error.kind, LexErrorKind::NumberTooLong);
    assert_eq!(error.code(), "E103");
}

#[test]
fn dot_at_the_limit_counts_against_it() {
    let error = first_error_with_limits("123.", tight_limits());
    assert_eq!(error.kind, LexErrorKind::NumberTooLong);
    assert_eq!((error.line, error.column), (1, 0));
}

#[test]
fn string_within_the_limit_is_fine() {
    let file = source_file("\"abcd\"");
    let mut lexer = Lexer::open(file.path()).unwrap().with_limits(tight_limits());
    assert_eq!(
        lexer.scan().unwrap(),
        Token::text(Tag::Str, "\"abcd\"")
    );
}

#[test]
fn string_over_the_limit_errors_at_the_opening_quote() {
    let error = first_error_with_limits(" \"abcdef\"", tight_limits());
    assert_eq!(error.kind, LexErrorKind::StringTooLong);
    assert_eq!(error.code(), "E102");
    assert_eq!((error.line, error.column), (1, 1));
}

// === Error recovery ===

#[test]
fn scanning_continues_after_an_error() {
    let file = source_file("#x FD 10");
    let mut lexer = Lexer::open(file.path()).unwrap();
    assert_eq!(
        lexer.scan().unwrap_err().kind,
        LexErrorKind::InvalidCharacter
    );
    assert_eq!(lexer.scan().unwrap().tag(), Tag::Forward);
    assert_eq!(lexer.scan().unwrap(), Token::int(10));
    assert!(lexer.scan().unwrap().is_eof());
}

// === Small read blocks ===

#[test]
fn tokens_survive_tiny_buffer_blocks() {
    let source = "VAR side := 50\nWHILE (side > 0) { FD side RT 91 }";
    let file = source_file(source);
    let mut lexer = Lexer::open_with_buffer_size(file.path(), 4).unwrap();
    let mut tokens = Vec::new();
    loop {
        let token = lexer.scan().unwrap();
        if token.is_eof() {
            break;
        }
        tokens.push(token);
    }
    assert_eq!(
        tags(&tokens),
        vec![
            Tag::Var,
            Tag::Id,
            Tag::Assign,
            Tag::Number,
            Tag::While,
            Tag::Char('('),
            Tag::Id,
            Tag::Char('>'),
            Tag::Number,
            Tag::Char(')'),
            Tag::Char('{'),
            Tag::Forward,
            Tag::Id,
            Tag::Right,
            Tag::Number,
            Tag::Char('}'),
        ]
    );
}

// === A full program ===

#[test]
fn square_spiral_program() {
    let source = "\
% square spiral
VAR side := 5
PENDOWN
WHILE (side <= 50) {
    FORWARD side
    RIGHT 90
    VAR side := side + 5
}
PENUP
PRINT \"done\"
";
    let tokens = scan_all(source);
    assert_eq!(tokens[0].tag(), Tag::Var);
    assert_eq!(tokens[1], Token::text(Tag::Id, "SIDE"));
    assert_eq!(tokens[2].tag(), Tag::Assign);
    assert_eq!(tokens[3], Token::int(5));
    assert_eq!(tokens[4].tag(), Tag::PenDown);
    assert_eq!(tokens[5].tag(), Tag::While);
    let last = tokens.last().unwrap();
    assert_eq!(last, &Token::text(Tag::Str, "\"done\""));
}

// === Statistics ===

#[test]
fn statistics_count_tokens_and_errors() {
    let file = source_file("FD 10 #x RT 90");
    let mut lexer = Lexer::open(file.path()).unwrap();
    let mut errors = 0;
    loop {
        match lexer.scan() {
            Ok(token) if token.is_eof() => break,
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }
    let stats = lexer.statistics();
    assert_eq!(errors, 1);
    assert_eq!(stats.error_count, 1);
    // FORWARD, 10, RIGHT, 90, EOF
    assert_eq!(stats.token_count, 5);
    assert_eq!(stats.token_kinds.get("FORWARD"), Some(&1));
    assert_eq!(stats.token_kinds.get("NUMBER"), Some(&2));
    assert_eq!(stats.token_kinds.get("EOF"), Some(&1));
    assert!(stats.errors[0].contains("E101"));
    assert!(stats.tokens_per_second > 0.0);
}

#[test]
fn statistics_track_lines_and_columns() {
    let file = source_file("FD 10\nRT 90\n");
    let mut lexer = Lexer::open(file.path()).unwrap();
    while !lexer.scan().unwrap().is_eof() {}
    let stats = lexer.statistics();
    assert_eq!(stats.line_count, 2);
    assert_eq!(stats.lines, 3);
    assert_eq!(stats.char_count, 12);
    assert_eq!(stats.max_column, 5);
}

#[test]
fn statistics_snapshot_serializes() {
    let file = source_file("FD 1");
    let mut lexer = Lexer::open(file.path()).unwrap();
    while !lexer.scan().unwrap().is_eof() {}
    let json = serde_json::to_value(lexer.statistics()).unwrap();
    assert_eq!(json["token_count"], 3);
    assert!(json["token_kinds"].is_object());
}
