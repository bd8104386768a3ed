//! Error codes produced by the scanner and the fault-tolerant parser.
//!
//! Errors are data, not control flow: the scanner attaches at most one
//! [`ScanError`] to each token it emits, and the parse entry points append
//! [`ParseError`]s to a caller-provided list while continuing to process the
//! rest of the document. No public entry point fails on malformed input.

use thiserror::Error;

/// A lexical error attached to a single token.
///
/// A token carrying a scan error is still emitted; the error describes what
/// was wrong with (or missing from) its lexeme.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// The token scanned cleanly.
    #[error("no error")]
    None,
    /// A block comment was not closed before the end of input.
    #[error("unexpected end of comment")]
    UnexpectedEndOfComment,
    /// A string was not closed before a line terminator or the end of input.
    #[error("unexpected end of string")]
    UnexpectedEndOfString,
    /// A numeric literal broke off after its sign or decimal point.
    #[error("unexpected end of number")]
    UnexpectedEndOfNumber,
    /// A `\u` or `\x` escape did not contain the required hex digits, or a
    /// surrogate escape has no valid counterpart.
    #[error("invalid unicode sequence")]
    InvalidUnicode,
    /// An escape sequence that JSON5 does not permit, e.g. `\1`.
    #[error("invalid escape character")]
    InvalidEscapeCharacter,
    /// A character that cannot begin any token.
    #[error("invalid character")]
    InvalidCharacter,
}

/// A syntactic error reported by the parse entry points.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorCode {
    #[error("invalid symbol")]
    InvalidSymbol,
    #[error("invalid number format")]
    InvalidNumberFormat,
    #[error("property name expected")]
    PropertyNameExpected,
    #[error("value expected")]
    ValueExpected,
    #[error("colon expected")]
    ColonExpected,
    #[error("comma expected")]
    CommaExpected,
    #[error("closing brace expected")]
    CloseBraceExpected,
    #[error("closing bracket expected")]
    CloseBracketExpected,
    #[error("end of file expected")]
    EndOfFileExpected,
    #[error("comment not permitted")]
    InvalidCommentToken,
    #[error("unexpected end of comment")]
    UnexpectedEndOfComment,
    #[error("unexpected end of string")]
    UnexpectedEndOfString,
    #[error("unexpected end of number")]
    UnexpectedEndOfNumber,
    #[error("invalid unicode sequence")]
    InvalidUnicode,
    #[error("invalid escape character")]
    InvalidEscapeCharacter,
    #[error("invalid character")]
    InvalidCharacter,
}

/// A parse error with the source span it applies to.
///
/// Offsets and lengths are UTF-8 byte units into the parsed text; line and
/// column are recomputable from the offset.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{code} at offset {offset}")]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub offset: usize,
    pub length: usize,
}

impl ParseError {
    #[must_use]
    pub fn new(code: ParseErrorCode, offset: usize, length: usize) -> Self {
        Self {
            code,
            offset,
            length,
        }
    }
}
