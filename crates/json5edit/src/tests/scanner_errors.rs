use alloc::{string::String, vec, vec::Vec};

use crate::{ScanError, Scanner, TokenKind};

fn scan_all(text: &str) -> Vec<(TokenKind, String, ScanError)> {
    let mut scanner = Scanner::new(text, false);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == TokenKind::Eof {
            break;
        }
        tokens.push((kind, scanner.token_value().into(), scanner.token_error()));
    }
    tokens
}

#[test]
fn unterminated_string_at_end_of_input() {
    assert_eq!(
        scan_all("\"abc"),
        vec![(
            TokenKind::String,
            "abc".into(),
            ScanError::UnexpectedEndOfString
        )]
    );
}

#[test]
fn unterminated_string_before_a_line_break() {
    let tokens = scan_all("'abc\ndef'");
    assert_eq!(tokens[0], (
        TokenKind::String,
        "abc".into(),
        ScanError::UnexpectedEndOfString
    ));
    assert_eq!(tokens[1].0, TokenKind::LineBreak);
    assert_eq!(tokens[2], (TokenKind::Identifier, "def".into(), ScanError::None));
    // the dangling quote starts a new, unterminated string
    assert_eq!(tokens[3], (
        TokenKind::String,
        "".into(),
        ScanError::UnexpectedEndOfString
    ));
}

#[test]
fn dangling_escape_is_unterminated() {
    assert_eq!(
        scan_all("\"a\\"),
        vec![(
            TokenKind::String,
            "a".into(),
            ScanError::UnexpectedEndOfString
        )]
    );
}

#[test]
fn unterminated_block_comment() {
    assert_eq!(
        scan_all("/* never closed"),
        vec![(
            TokenKind::BlockComment,
            "/* never closed".into(),
            ScanError::UnexpectedEndOfComment
        )]
    );
    // "/*/" does not close itself
    assert_eq!(
        scan_all("/*/")[0].2,
        ScanError::UnexpectedEndOfComment
    );
    assert_eq!(scan_all("/**/")[0].2, ScanError::None);
}

#[test]
fn invalid_escapes_in_strings() {
    assert_eq!(
        scan_all("'\\1'"),
        vec![(
            TokenKind::String,
            "1".into(),
            ScanError::InvalidEscapeCharacter
        )]
    );
    // \0 followed by a decimal digit is an octal-looking escape
    assert_eq!(
        scan_all("'\\01'"),
        vec![(
            TokenKind::String,
            "\u{0}1".into(),
            ScanError::InvalidEscapeCharacter
        )]
    );
}

#[test]
fn invalid_unicode_sequences() {
    assert_eq!(scan_all("'\\u12'")[0].2, ScanError::InvalidUnicode);
    assert_eq!(scan_all("'\\uZZZZ'")[0].2, ScanError::InvalidUnicode);
    assert_eq!(scan_all("'\\x4'")[0].2, ScanError::InvalidUnicode);
    // lone surrogate cannot be represented
    let tokens = scan_all("'\\uD800'");
    assert_eq!(tokens[0].1, "\u{fffd}");
    assert_eq!(tokens[0].2, ScanError::InvalidUnicode);
}

#[test]
fn at_most_one_error_per_token() {
    // invalid escape followed by an unterminated end: the first error sticks
    assert_eq!(
        scan_all("'\\1"),
        vec![(
            TokenKind::String,
            "1".into(),
            ScanError::InvalidEscapeCharacter
        )]
    );
}

#[test]
fn dangling_number_starts_resync_one_character() {
    assert_eq!(
        scan_all("-"),
        vec![(
            TokenKind::Unknown,
            "-".into(),
            ScanError::UnexpectedEndOfNumber
        )]
    );
    assert_eq!(
        scan_all("+-1"),
        vec![
            (
                TokenKind::Unknown,
                "+".into(),
                ScanError::UnexpectedEndOfNumber
            ),
            (TokenKind::Number, "-1".into(), ScanError::None),
        ]
    );
    assert_eq!(
        scan_all(".")[0],
        (
            TokenKind::Unknown,
            ".".into(),
            ScanError::UnexpectedEndOfNumber
        )
    );
}

#[test]
fn complete_numeric_parts_are_kept_as_tokens() {
    assert_eq!(
        scan_all("01"),
        vec![
            (TokenKind::Number, "0".into(), ScanError::None),
            (TokenKind::Number, "1".into(), ScanError::None),
        ]
    );
    // a broken exponent leaves the integer and an identifier behind
    assert_eq!(
        scan_all("1e"),
        vec![
            (TokenKind::Number, "1".into(), ScanError::None),
            (TokenKind::Identifier, "e".into(), ScanError::None),
        ]
    );
}

#[test]
fn stray_characters_resync_one_at_a_time() {
    assert_eq!(
        scan_all("@"),
        vec![(TokenKind::Unknown, "@".into(), ScanError::InvalidCharacter)]
    );
    let tokens = scan_all("§§");
    assert_eq!(tokens.len(), 2);
    for (kind, value, error) in tokens {
        assert_eq!(kind, TokenKind::Unknown);
        assert_eq!(value, "§");
        assert_eq!(error, ScanError::InvalidCharacter);
    }
}
