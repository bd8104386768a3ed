//! The JSON5 lexical grammar as composable prefix matchers.
//!
//! Every production is a pure function from an input prefix to a [`Match`]:
//! whether it matched, how many bytes it covered, how many line terminator
//! sequences it crossed, and which token category it belongs to. The scanner
//! invokes the top-level [`json5_input_element`] production once per token and
//! reads position bookkeeping out of the result.
//!
//! Failures also carry a length: the bytes a production covered before its
//! continuation failed. [`or`] uses that length to rank competing
//! alternatives, and the scanner uses the kind of the best-ranked failure to
//! attribute a scan error to the resync character.

use unicode_xid::UnicodeXID;

use crate::scanner::TokenKind;

/// Result of applying a production to an input prefix.
///
/// Lengths and offsets are UTF-8 bytes, relative to the start of the prefix
/// the production was applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Match {
    /// Whether the production matched.
    pub ok: bool,
    /// Bytes consumed. On failure, the bytes covered before the failing part.
    pub len: usize,
    /// Line terminator sequences crossed while matching.
    pub line_breaks: usize,
    /// Offset just past the last line terminator sequence, relative to the
    /// start of the lexeme. Meaningful only when `line_breaks > 0`.
    pub last_line_break_end: usize,
    /// Token category stamped onto the result by the matched production.
    pub kind: TokenKind,
}

impl Match {
    /// The empty success: zero bytes consumed.
    pub(crate) fn empty() -> Self {
        Self {
            ok: true,
            len: 0,
            line_breaks: 0,
            last_line_break_end: 0,
            kind: TokenKind::Unknown,
        }
    }

    pub(crate) fn fail(len: usize, kind: TokenKind) -> Self {
        Self {
            ok: false,
            len,
            line_breaks: 0,
            last_line_break_end: 0,
            kind,
        }
    }
}

/// A production: any prefix matcher over the remaining input.
pub(crate) type Rule<'a> = &'a dyn Fn(&str) -> Match;

/// The composed kind is the child's kind if the other side was empty,
/// `Unknown` once two non-empty parts have been glued together.
fn merge_kind(acc: &Match, m: &Match) -> TokenKind {
    if acc.len == 0 {
        m.kind
    } else if m.len == 0 {
        acc.kind
    } else {
        TokenKind::Unknown
    }
}

/// Appends `m` onto `acc`, aggregating lengths and line-break counters.
fn extend(acc: &mut Match, m: &Match) {
    acc.kind = merge_kind(acc, m);
    if m.line_breaks > 0 {
        acc.line_breaks += m.line_breaks;
        acc.last_line_break_end = acc.len + m.last_line_break_end;
    }
    acc.len += m.len;
    acc.ok = m.ok;
}

/// Sequence. Fails as soon as any part fails, carrying the aggregated length.
pub(crate) fn and(input: &str, parts: &[Rule]) -> Match {
    let mut acc = Match::empty();
    for part in parts {
        let m = part(&input[acc.len..]);
        extend(&mut acc, &m);
        if !acc.ok {
            return acc;
        }
    }
    acc
}

/// First successful alternative wins. On total failure, returns the
/// alternative that covered the most input (ties go to the first).
pub(crate) fn or(input: &str, alts: &[Rule]) -> Match {
    let mut best = Match::fail(0, TokenKind::Unknown);
    let mut seen = false;
    for alt in alts {
        let m = alt(input);
        if m.ok {
            return m;
        }
        if !seen || m.len > best.len {
            best = m;
            seen = true;
        }
    }
    best
}

/// Like [`or`], but on success prefers the longest match. Ties go to the
/// later alternative, so a keyword production outranks the generic identifier
/// that spells the same word.
pub(crate) fn longest(input: &str, alts: &[Rule]) -> Match {
    let mut best: Option<Match> = None;
    let mut best_fail = Match::fail(0, TokenKind::Unknown);
    let mut seen_fail = false;
    for alt in alts {
        let m = alt(input);
        if m.ok {
            match best {
                Some(b) if m.len < b.len => {}
                _ => best = Some(m),
            }
        } else if !seen_fail || m.len > best_fail.len {
            best_fail = m;
            seen_fail = true;
        }
    }
    best.unwrap_or(best_fail)
}

/// Kleene star. An empty child success terminates the repetition.
pub(crate) fn zero_or_more(input: &str, rule: Rule) -> Match {
    let mut acc = Match::empty();
    loop {
        let m = rule(&input[acc.len..]);
        if !m.ok || m.len == 0 {
            return acc;
        }
        extend(&mut acc, &m);
    }
}

pub(crate) fn one_or_more(input: &str, rule: Rule) -> Match {
    let mut acc = Match::empty();
    let first = rule(input);
    extend(&mut acc, &first);
    if !acc.ok {
        return acc;
    }
    let rest = zero_or_more(&input[acc.len..], rule);
    extend(&mut acc, &rest);
    acc
}

/// Matches `rule`, or the empty success if it fails.
pub(crate) fn optional(input: &str, rule: Rule) -> Match {
    let m = rule(input);
    if m.ok { m } else { Match::empty() }
}

/// Succeeds with `a` iff `b` fails on the same input.
pub(crate) fn but_not(input: &str, a: Rule, b: Rule) -> Match {
    let ma = a(input);
    if !ma.ok {
        return ma;
    }
    if b(input).ok {
        return Match::fail(0, ma.kind);
    }
    ma
}

/// Succeeds with `a` iff `b` fails on the input following `a`.
pub(crate) fn lookahead_not(input: &str, a: Rule, b: Rule) -> Match {
    let ma = a(input);
    if !ma.ok {
        return ma;
    }
    if b(&input[ma.len..]).ok {
        return Match::fail(ma.len, ma.kind);
    }
    ma
}

/// Overrides the kind of any result, success or failure. Top-level
/// productions use this to stamp their categorical tag onto composed lexemes.
pub(crate) fn with_kind(kind: TokenKind, m: Match) -> Match {
    Match { kind, ..m }
}

/// Matches exactly `expected`. On failure the length is the common prefix
/// covered, so partially matched literals rank above untouched alternatives.
pub(crate) fn literal(input: &str, expected: &str, kind: TokenKind) -> Match {
    if input.starts_with(expected) {
        Match {
            ok: true,
            len: expected.len(),
            line_breaks: 0,
            last_line_break_end: 0,
            kind,
        }
    } else {
        let common = input
            .bytes()
            .zip(expected.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        Match::fail(common, kind)
    }
}

/// Matches a single character satisfying `pred`.
pub(crate) fn char_class(input: &str, kind: TokenKind, pred: impl Fn(char) -> bool) -> Match {
    match input.chars().next() {
        Some(c) if pred(c) => Match {
            ok: true,
            len: c.len_utf8(),
            line_breaks: 0,
            last_line_break_end: 0,
            kind,
        },
        _ => Match::fail(0, kind),
    }
}

// ------------------------------------------------------------------------------------------------
// Character classes
// ------------------------------------------------------------------------------------------------

pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Space separators (Unicode Zs) other than SPACE and NBSP.
fn is_space_separator(c: char) -> bool {
    matches!(c, '\u{1680}' | '\u{2000}'..='\u{200a}' | '\u{202f}' | '\u{205f}' | '\u{3000}')
}

pub(crate) fn is_white_space(c: char) -> bool {
    matches!(c, '\t' | '\u{b}' | '\u{c}' | ' ' | '\u{a0}' | '\u{feff}') || is_space_separator(c)
}

fn is_identifier_start_char(c: char) -> bool {
    c == '$' || c == '_' || UnicodeXID::is_xid_start(c)
}

fn is_identifier_part_char(c: char) -> bool {
    c == '$' || c == '\u{200c}' || c == '\u{200d}' || UnicodeXID::is_xid_continue(c)
}

pub(crate) fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

// ------------------------------------------------------------------------------------------------
// Productions
// ------------------------------------------------------------------------------------------------

/// The top-level production invoked once per token.
pub(crate) fn json5_input_element(input: &str) -> Match {
    or(
        input,
        &[
            &white_space,
            &line_terminator_sequence,
            &comment,
            &json5_token,
        ],
    )
}

fn json5_token(input: &str) -> Match {
    or(
        input,
        &[
            &json5_identifier,
            &json5_punctuator,
            &json5_string,
            &json5_number,
        ],
    )
}

pub(crate) fn white_space(input: &str) -> Match {
    with_kind(
        TokenKind::Whitespace,
        one_or_more(input, &|s| {
            char_class(s, TokenKind::Whitespace, is_white_space)
        }),
    )
}

/// The only production that increments the line-break counter. CR followed by
/// LF collapses into a single sequence.
pub(crate) fn line_terminator_sequence(input: &str) -> Match {
    let mut chars = input.chars();
    let len = match chars.next() {
        Some(c @ ('\n' | '\u{2028}' | '\u{2029}')) => c.len_utf8(),
        Some('\r') => {
            if chars.next() == Some('\n') {
                2
            } else {
                1
            }
        }
        _ => return Match::fail(0, TokenKind::LineBreak),
    };
    Match {
        ok: true,
        len,
        line_breaks: 1,
        last_line_break_end: len,
        kind: TokenKind::LineBreak,
    }
}

fn comment(input: &str) -> Match {
    or(input, &[&line_comment, &block_comment])
}

fn source_character(input: &str) -> Match {
    char_class(input, TokenKind::Unknown, |_| true)
}

fn line_comment(input: &str) -> Match {
    with_kind(
        TokenKind::LineComment,
        and(
            input,
            &[
                &|s| literal(s, "//", TokenKind::LineComment),
                &|s| {
                    zero_or_more(s, &|s| {
                        but_not(s, &source_character, &|s| {
                            char_class(s, TokenKind::LineBreak, is_line_terminator)
                        })
                    })
                },
            ],
        ),
    )
}

/// An unterminated block comment still matches to the end of input; the
/// scanner attributes `UnexpectedEndOfComment` by inspecting the lexeme.
fn block_comment(input: &str) -> Match {
    with_kind(
        TokenKind::BlockComment,
        and(
            input,
            &[
                &|s| literal(s, "/*", TokenKind::BlockComment),
                &|s| zero_or_more(s, &block_comment_char),
                &|s| optional(s, &|s| literal(s, "*/", TokenKind::BlockComment)),
            ],
        ),
    )
}

fn block_comment_char(input: &str) -> Match {
    or(
        input,
        &[&line_terminator_sequence, &|s| {
            but_not(s, &source_character, &|s| {
                literal(s, "*/", TokenKind::Unknown)
            })
        }],
    )
}

/// Identifiers and keywords share a prefix, so the longest match decides;
/// at equal length the keyword outranks the identifier.
fn json5_identifier(input: &str) -> Match {
    longest(
        input,
        &[
            &identifier_name,
            &|s| literal(s, "null", TokenKind::Null),
            &|s| literal(s, "true", TokenKind::True),
            &|s| literal(s, "false", TokenKind::False),
            &|s| literal(s, "Infinity", TokenKind::Infinity),
            &|s| literal(s, "NaN", TokenKind::Nan),
        ],
    )
}

fn identifier_name(input: &str) -> Match {
    with_kind(
        TokenKind::Identifier,
        and(input, &[&identifier_start, &|s| {
            zero_or_more(s, &identifier_part)
        }]),
    )
}

fn identifier_start(input: &str) -> Match {
    or(
        input,
        &[
            &|s| char_class(s, TokenKind::Identifier, is_identifier_start_char),
            &unicode_escape_sequence,
        ],
    )
}

fn identifier_part(input: &str) -> Match {
    or(
        input,
        &[
            &|s| char_class(s, TokenKind::Identifier, is_identifier_part_char),
            &unicode_escape_sequence,
        ],
    )
}

fn unicode_escape_sequence(input: &str) -> Match {
    and(
        input,
        &[
            &|s| literal(s, "\\u", TokenKind::Identifier),
            &hex_digit,
            &hex_digit,
            &hex_digit,
            &hex_digit,
        ],
    )
}

fn hex_digit(input: &str) -> Match {
    char_class(input, TokenKind::Number, is_hex_digit)
}

fn json5_punctuator(input: &str) -> Match {
    or(
        input,
        &[
            &|s| literal(s, "{", TokenKind::OpenBrace),
            &|s| literal(s, "}", TokenKind::CloseBrace),
            &|s| literal(s, "[", TokenKind::OpenBracket),
            &|s| literal(s, "]", TokenKind::CloseBracket),
            &|s| literal(s, ":", TokenKind::Colon),
            &|s| literal(s, ",", TokenKind::Comma),
        ],
    )
}

/// Single- or double-quoted string.
///
/// Strings are matched tolerantly: an unterminated string (end of input, a
/// dangling escape, or an unescaped line terminator ahead) still matches, and
/// the scanner attributes `UnexpectedEndOfString` when decoding the lexeme.
/// Raw U+2028/U+2029 are legal inside strings; only LF and CR end one early.
pub(crate) fn json5_string(input: &str) -> Match {
    let quote = match input.chars().next() {
        Some(c @ ('"' | '\'')) => c,
        _ => return Match::fail(0, TokenKind::String),
    };
    let mut m = Match {
        ok: true,
        len: 0,
        line_breaks: 0,
        last_line_break_end: 0,
        kind: TokenKind::String,
    };
    let mut pos = 1;
    loop {
        let Some(c) = input[pos..].chars().next() else {
            break;
        };
        if c == quote {
            pos += 1;
            break;
        }
        match c {
            '\\' => {
                pos += 1;
                let rest = &input[pos..];
                if rest.is_empty() {
                    break;
                }
                let lts = line_terminator_sequence(rest);
                if lts.ok {
                    // line continuation
                    m.line_breaks += lts.line_breaks;
                    pos += lts.len;
                    m.last_line_break_end = pos;
                } else {
                    // any escaped character, including the quote itself
                    pos += rest.chars().next().map_or(0, char::len_utf8);
                }
            }
            '\n' | '\r' => break,
            _ => pos += c.len_utf8(),
        }
    }
    m.len = pos;
    m
}

fn json5_number(input: &str) -> Match {
    with_kind(
        TokenKind::Number,
        and(input, &[&|s| optional(s, &sign), &numeric_literal]),
    )
}

fn sign(input: &str) -> Match {
    char_class(input, TokenKind::Number, |c| c == '+' || c == '-')
}

fn numeric_literal(input: &str) -> Match {
    or(
        input,
        &[
            &|s| literal(s, "Infinity", TokenKind::Number),
            &|s| literal(s, "NaN", TokenKind::Number),
            &hex_integer_literal,
            &decimal_literal,
        ],
    )
}

fn hex_integer_literal(input: &str) -> Match {
    and(
        input,
        &[
            &|s| {
                or(s, &[
                    &|s| literal(s, "0x", TokenKind::Number),
                    &|s| literal(s, "0X", TokenKind::Number),
                ])
            },
            &|s| one_or_more(s, &hex_digit),
        ],
    )
}

fn decimal_literal(input: &str) -> Match {
    or(
        input,
        &[
            &|s| {
                and(s, &[
                    &decimal_integer_literal,
                    &|s| {
                        optional(s, &|s| {
                            and(s, &[&decimal_point, &|s| optional(s, &decimal_digits)])
                        })
                    },
                    &|s| optional(s, &exponent_part),
                ])
            },
            &|s| {
                and(s, &[
                    &decimal_point,
                    &decimal_digits,
                    &|s| optional(s, &exponent_part),
                ])
            },
        ],
    )
}

/// A leading zero ends the integer part, so `01` is two numeric tokens.
fn decimal_integer_literal(input: &str) -> Match {
    or(
        input,
        &[
            &|s| {
                and(s, &[
                    &|s| char_class(s, TokenKind::Number, |c| ('1'..='9').contains(&c)),
                    &|s| zero_or_more(s, &decimal_digit),
                ])
            },
            &|s| literal(s, "0", TokenKind::Number),
        ],
    )
}

fn decimal_digit(input: &str) -> Match {
    char_class(input, TokenKind::Number, |c| c.is_ascii_digit())
}

fn decimal_digits(input: &str) -> Match {
    one_or_more(input, &decimal_digit)
}

fn decimal_point(input: &str) -> Match {
    literal(input, ".", TokenKind::Number)
}

fn exponent_part(input: &str) -> Match {
    and(
        input,
        &[
            &|s| char_class(s, TokenKind::Number, |c| c == 'e' || c == 'E'),
            &|s| optional(s, &sign),
            &decimal_digits,
        ],
    )
}
