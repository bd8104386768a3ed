//! The fault-tolerant parser driver and the value materializer.
//!
//! [`visit`] drives a scanner over the document and emits structural events
//! to a [`ParseVisitor`] in document order. The driver never fails on
//! malformed input: it reports an error through `on_error` and resynchronizes
//! on the recovery follow-set of the current production, so every document
//! yields its minimal syntactic salvage.
//!
//! [`parse`] is a thin visitor over the same driver that materializes a plain
//! [`Value`] tree.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    error::{ParseError, ParseErrorCode, ScanError},
    options::ParseOptions,
    scanner::{Scanner, TokenKind},
    value::{Array, Map, Value},
};

/// Source span of a token: offset and length in UTF-8 bytes, plus the
/// zero-based line and byte column of its first character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub offset: usize,
    pub length: usize,
    pub start_line: usize,
    pub start_character: usize,
}

impl Span {
    /// The offset one past the end of the span.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Callbacks invoked in document order by [`visit`].
///
/// Implement any subset; the remaining callbacks default to no-ops. All
/// callbacks run synchronously from a single call stack.
///
/// # Examples
///
/// Counting properties in a document:
///
/// ```
/// use json5edit::{visit, ParseOptions, ParseVisitor, Span};
///
/// #[derive(Default)]
/// struct PropertyCounter {
///     count: usize,
/// }
///
/// impl ParseVisitor for PropertyCounter {
///     fn on_object_property(&mut self, _name: &str, _span: Span) {
///         self.count += 1;
///     }
/// }
///
/// let mut counter = PropertyCounter::default();
/// visit("{ a: 1, b: { c: 2 } }", &mut counter, ParseOptions::default());
/// assert_eq!(counter.count, 3);
/// ```
pub trait ParseVisitor {
    /// Called at the `{` opening an object.
    fn on_object_begin(&mut self, _span: Span) {}

    /// Called for each property name, before its colon and value.
    fn on_object_property(&mut self, _name: &str, _span: Span) {}

    /// Called at the `}` closing an object, or at the end of input when the
    /// close was missing and had to be synthesized (length 0).
    fn on_object_end(&mut self, _span: Span) {}

    /// Called at the `[` opening an array.
    fn on_array_begin(&mut self, _span: Span) {}

    /// Called at the `]` closing an array, or at the synthesized close.
    fn on_array_end(&mut self, _span: Span) {}

    /// Called for each scalar value with its decoded content.
    fn on_literal_value(&mut self, _value: Value, _span: Span) {}

    /// Called for each `:` and `,`.
    fn on_separator(&mut self, _separator: char, _span: Span) {}

    /// Called for each comment, unless comments are disallowed.
    fn on_comment(&mut self, _span: Span) {}

    /// Called for each recovery; `offset`/`length` locate the offending span.
    fn on_error(&mut self, _code: ParseErrorCode, _offset: usize, _length: usize) {}

    /// Polled after every event; return `false` to end the traversal early.
    fn should_continue(&self) -> bool {
        true
    }
}

/// Parses `text` and emits structural events to `visitor`.
///
/// The traversal never fails: syntax problems are reported through
/// [`ParseVisitor::on_error`] and parsing continues on the recovery
/// follow-set. See [`ParseOptions`] for comment and empty-input handling.
pub fn visit<V: ParseVisitor>(text: &str, visitor: &mut V, options: ParseOptions) {
    Driver {
        scanner: Scanner::new(text, false),
        visitor,
        options,
        halted: false,
    }
    .run();
}

/// Parses `text` into a plain value, appending recovery errors to `errors`.
///
/// The minimal syntactic salvage is always returned: elements that could not
/// be parsed are omitted, and later duplicate keys overwrite earlier ones.
/// Returns `None` only when the document contains no value at all.
///
/// # Examples
///
/// ```
/// use json5edit::{parse, ParseOptions, Value};
///
/// let mut errors = Vec::new();
/// let value = parse("[ 1, /* two */ 2, ]", &mut errors, ParseOptions::default());
/// assert!(errors.is_empty());
/// assert_eq!(
///     value,
///     Some(Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
/// );
/// ```
pub fn parse(text: &str, errors: &mut Vec<ParseError>, options: ParseOptions) -> Option<Value> {
    let mut sink = ValueSink {
        stack: Vec::new(),
        root: None,
        errors,
    };
    visit(text, &mut sink, options);
    sink.root
}

// ------------------------------------------------------------------------------------------------
// Driver
// ------------------------------------------------------------------------------------------------

struct Driver<'a, 'v, V> {
    scanner: Scanner<'a>,
    visitor: &'v mut V,
    options: ParseOptions,
    halted: bool,
}

impl<V: ParseVisitor> Driver<'_, '_, V> {
    fn token_span(&self) -> Span {
        Span {
            offset: self.scanner.token_offset(),
            length: self.scanner.token_length(),
            start_line: self.scanner.token_start_line(),
            start_character: self.scanner.token_start_character(),
        }
    }

    fn note(&mut self) {
        if !self.visitor.should_continue() {
            self.halted = true;
        }
    }

    /// Advances to the next structural token, forwarding scan errors and
    /// comments along the way.
    fn scan_next(&mut self) -> TokenKind {
        loop {
            let token = self.scanner.scan();
            match self.scanner.token_error() {
                ScanError::InvalidUnicode => self.error(ParseErrorCode::InvalidUnicode),
                ScanError::InvalidEscapeCharacter => {
                    self.error(ParseErrorCode::InvalidEscapeCharacter);
                }
                ScanError::UnexpectedEndOfNumber => {
                    self.error(ParseErrorCode::UnexpectedEndOfNumber);
                }
                ScanError::UnexpectedEndOfString => {
                    self.error(ParseErrorCode::UnexpectedEndOfString);
                }
                ScanError::InvalidCharacter => self.error(ParseErrorCode::InvalidCharacter),
                ScanError::UnexpectedEndOfComment => {
                    if !self.options.disallow_comments {
                        self.error(ParseErrorCode::UnexpectedEndOfComment);
                    }
                }
                ScanError::None => {}
            }
            if self.halted {
                return TokenKind::Eof;
            }
            match token {
                TokenKind::LineComment | TokenKind::BlockComment => {
                    if self.options.disallow_comments {
                        self.error(ParseErrorCode::InvalidCommentToken);
                    } else {
                        let span = self.token_span();
                        self.visitor.on_comment(span);
                        self.note();
                    }
                }
                TokenKind::Unknown => {
                    // the scanner attributes an error to every resync token;
                    // report a stray symbol only if it somehow carried none
                    if self.scanner.token_error() == ScanError::None {
                        self.error(ParseErrorCode::InvalidSymbol);
                    }
                }
                TokenKind::Whitespace | TokenKind::LineBreak => {}
                _ => return token,
            }
            if self.halted {
                return TokenKind::Eof;
            }
        }
    }

    fn error(&mut self, code: ParseErrorCode) {
        self.error_and_skip(code, &[], &[]);
    }

    /// Reports `code` at the current token, then skips ahead: past a token in
    /// `skip_until_after`, or up to (not consuming) a token in `skip_until`.
    fn error_and_skip(
        &mut self,
        code: ParseErrorCode,
        skip_until_after: &[TokenKind],
        skip_until: &[TokenKind],
    ) {
        self.visitor.on_error(
            code,
            self.scanner.token_offset(),
            self.scanner.token_length(),
        );
        self.note();
        if self.halted {
            return;
        }
        if !skip_until_after.is_empty() || !skip_until.is_empty() {
            let mut token = self.scanner.token();
            while token != TokenKind::Eof && !self.halted {
                if skip_until_after.contains(&token) {
                    self.scan_next();
                    break;
                }
                if skip_until.contains(&token) {
                    break;
                }
                token = self.scan_next();
            }
        }
    }

    fn run(&mut self) {
        self.scan_next();
        if self.halted {
            return;
        }
        if self.scanner.token() == TokenKind::Eof {
            if !self.options.allow_empty_content {
                self.error(ParseErrorCode::ValueExpected);
            }
            return;
        }
        if !self.parse_value() {
            self.error(ParseErrorCode::ValueExpected);
            return;
        }
        if self.halted {
            return;
        }
        if self.scanner.token() != TokenKind::Eof {
            self.error(ParseErrorCode::EndOfFileExpected);
        }
    }

    fn parse_value(&mut self) -> bool {
        if self.halted {
            return true;
        }
        match self.scanner.token() {
            TokenKind::OpenBracket => self.parse_array(),
            TokenKind::OpenBrace => self.parse_object(),
            TokenKind::String => {
                self.parse_string(true);
                true
            }
            _ => self.parse_literal(),
        }
    }

    fn parse_string(&mut self, is_value: bool) {
        let span = self.token_span();
        if is_value {
            let value = Value::String(self.scanner.token_value().into());
            self.visitor.on_literal_value(value, span);
        } else {
            self.visitor
                .on_object_property(self.scanner.token_value(), span);
        }
        self.note();
        if !self.halted {
            self.scan_next();
        }
    }

    fn parse_literal(&mut self) -> bool {
        if self.halted {
            return true;
        }
        let span = self.token_span();
        let value = match self.scanner.token() {
            TokenKind::Number => match decode_number(self.scanner.token_value()) {
                Some(n) => Value::Number(n),
                None => {
                    self.error(ParseErrorCode::InvalidNumberFormat);
                    Value::Number(0.0)
                }
            },
            TokenKind::Null => Value::Null,
            TokenKind::True => Value::Boolean(true),
            TokenKind::False => Value::Boolean(false),
            TokenKind::Infinity => Value::Number(f64::INFINITY),
            TokenKind::Nan => Value::Number(f64::NAN),
            _ => return false,
        };
        self.visitor.on_literal_value(value, span);
        self.note();
        if !self.halted {
            self.scan_next();
        }
        true
    }

    fn parse_property(&mut self) -> bool {
        if self.halted {
            return true;
        }
        match self.scanner.token() {
            TokenKind::String => self.parse_string(false),
            TokenKind::Identifier
            | TokenKind::Null
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Infinity
            | TokenKind::Nan => {
                // unquoted member names, including reserved words
                let span = self.token_span();
                self.visitor
                    .on_object_property(self.scanner.token_value(), span);
                self.note();
                if !self.halted {
                    self.scan_next();
                }
            }
            _ => {
                self.error_and_skip(
                    ParseErrorCode::PropertyNameExpected,
                    &[],
                    &[TokenKind::CloseBrace, TokenKind::Comma],
                );
                return false;
            }
        }
        if self.halted {
            return true;
        }
        if self.scanner.token() == TokenKind::Colon {
            let span = self.token_span();
            self.visitor.on_separator(':', span);
            self.note();
            if self.halted {
                return true;
            }
            self.scan_next();
            if !self.parse_value() {
                self.error_and_skip(
                    ParseErrorCode::ValueExpected,
                    &[],
                    &[TokenKind::CloseBrace, TokenKind::Comma],
                );
            }
        } else {
            self.error_and_skip(
                ParseErrorCode::ColonExpected,
                &[],
                &[TokenKind::CloseBrace, TokenKind::Comma],
            );
        }
        true
    }

    fn parse_object(&mut self) -> bool {
        let span = self.token_span();
        self.visitor.on_object_begin(span);
        self.note();
        if self.halted {
            return true;
        }
        self.scan_next();
        let mut needs_comma = false;
        while !self.halted
            && self.scanner.token() != TokenKind::CloseBrace
            && self.scanner.token() != TokenKind::Eof
        {
            if self.scanner.token() == TokenKind::Comma {
                if !needs_comma {
                    self.error(ParseErrorCode::ValueExpected);
                }
                let span = self.token_span();
                self.visitor.on_separator(',', span);
                self.note();
                if self.halted {
                    return true;
                }
                self.scan_next();
                if self.scanner.token() == TokenKind::CloseBrace {
                    // trailing comma
                    break;
                }
            } else if needs_comma {
                self.error(ParseErrorCode::CommaExpected);
            }
            if self.halted {
                return true;
            }
            if !self.parse_property() {
                self.error_and_skip(
                    ParseErrorCode::ValueExpected,
                    &[],
                    &[TokenKind::CloseBrace, TokenKind::Comma],
                );
            }
            needs_comma = true;
        }
        if self.halted {
            return true;
        }
        self.visitor.on_object_end(self.token_span());
        self.note();
        if self.halted {
            return true;
        }
        if self.scanner.token() == TokenKind::CloseBrace {
            self.scan_next();
        } else {
            self.error_and_skip(
                ParseErrorCode::CloseBraceExpected,
                &[TokenKind::CloseBrace],
                &[],
            );
        }
        true
    }

    fn parse_array(&mut self) -> bool {
        let span = self.token_span();
        self.visitor.on_array_begin(span);
        self.note();
        if self.halted {
            return true;
        }
        self.scan_next();
        let mut needs_comma = false;
        while !self.halted
            && self.scanner.token() != TokenKind::CloseBracket
            && self.scanner.token() != TokenKind::Eof
        {
            if self.scanner.token() == TokenKind::Comma {
                if !needs_comma {
                    self.error(ParseErrorCode::ValueExpected);
                }
                let span = self.token_span();
                self.visitor.on_separator(',', span);
                self.note();
                if self.halted {
                    return true;
                }
                self.scan_next();
                if self.scanner.token() == TokenKind::CloseBracket {
                    // trailing comma
                    break;
                }
            } else if needs_comma {
                self.error(ParseErrorCode::CommaExpected);
            }
            if self.halted {
                return true;
            }
            if !self.parse_value() {
                self.error_and_skip(
                    ParseErrorCode::ValueExpected,
                    &[],
                    &[TokenKind::CloseBracket, TokenKind::Comma],
                );
            }
            needs_comma = true;
        }
        if self.halted {
            return true;
        }
        self.visitor.on_array_end(self.token_span());
        self.note();
        if self.halted {
            return true;
        }
        if self.scanner.token() == TokenKind::CloseBracket {
            self.scan_next();
        } else {
            self.error_and_skip(
                ParseErrorCode::CloseBracketExpected,
                &[TokenKind::CloseBracket],
                &[],
            );
        }
        true
    }
}

// ------------------------------------------------------------------------------------------------
// Value materializer
// ------------------------------------------------------------------------------------------------

/// One open container during materialization.
enum Frame {
    Object {
        map: Map,
        pending_key: Option<String>,
    },
    Array {
        items: Array,
    },
}

struct ValueSink<'e> {
    stack: Vec<Frame>,
    root: Option<Value>,
    errors: &'e mut Vec<ParseError>,
}

impl ValueSink<'_> {
    fn place(&mut self, value: Value) {
        match self.stack.last_mut() {
            Some(Frame::Object { map, pending_key }) => {
                if let Some(key) = pending_key.take() {
                    map.insert(key, value);
                }
            }
            Some(Frame::Array { items }) => items.push(value),
            None => {
                if self.root.is_none() {
                    self.root = Some(value);
                }
            }
        }
    }
}

impl ParseVisitor for ValueSink<'_> {
    fn on_object_begin(&mut self, _span: Span) {
        self.stack.push(Frame::Object {
            map: Map::new(),
            pending_key: None,
        });
    }

    fn on_object_property(&mut self, name: &str, _span: Span) {
        if let Some(Frame::Object { pending_key, .. }) = self.stack.last_mut() {
            *pending_key = Some(name.to_string());
        }
    }

    fn on_object_end(&mut self, _span: Span) {
        if let Some(Frame::Object { map, .. }) = self.stack.pop() {
            self.place(Value::Object(map));
        }
    }

    fn on_array_begin(&mut self, _span: Span) {
        self.stack.push(Frame::Array { items: Array::new() });
    }

    fn on_array_end(&mut self, _span: Span) {
        if let Some(Frame::Array { items }) = self.stack.pop() {
            self.place(Value::Array(items));
        }
    }

    fn on_literal_value(&mut self, value: Value, _span: Span) {
        self.place(value);
    }

    fn on_error(&mut self, code: ParseErrorCode, offset: usize, length: usize) {
        self.errors.push(ParseError::new(code, offset, length));
    }
}

/// Converts a numeric lexeme to its value: signed `Infinity`/`NaN`, `0x`/`0X`
/// hex integers, and decimal forms with optional leading/trailing point.
/// Signed zero survives. Returns `None` for lexemes outside the grammar.
pub(crate) fn decode_number(text: &str) -> Option<f64> {
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = if rest == "Infinity" {
        f64::INFINITY
    } else if rest == "NaN" {
        f64::NAN
    } else if let Some(digits) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
    {
        if digits.is_empty() {
            return None;
        }
        let mut v = 0.0f64;
        for c in digits.chars() {
            v = v * 16.0 + f64::from(c.to_digit(16)?);
        }
        v
    } else {
        rest.parse::<f64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}
