/// Configuration options for the fault-tolerant parse entry points.
///
/// These options control how [`visit`](crate::visit),
/// [`parse`](crate::parse) and [`parse_tree`](crate::parse_tree) treat
/// comments and empty input. Trailing commas inside objects and arrays are
/// part of the JSON5 grammar and always accepted; there is no knob for them.
///
/// # Examples
///
/// ```rust
/// use json5edit::{parse, ParseOptions};
///
/// let options = ParseOptions {
///     disallow_comments: true,
///     ..Default::default()
/// };
/// let mut errors = Vec::new();
/// let value = parse("// not allowed\n1", &mut errors, options);
/// assert!(value.is_some());
/// assert!(!errors.is_empty());
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Whether comments are reported as errors.
    ///
    /// When `true`, an encountered line or block comment produces an
    /// `InvalidCommentToken` error. The comment text is still consumed, and
    /// the visitor does not receive `on_comment` for it.
    ///
    /// # Default
    ///
    /// `false`
    pub disallow_comments: bool,

    /// Whether an empty document is accepted.
    ///
    /// When `true`, input containing no value (only trivia, or nothing at
    /// all) does not produce a `ValueExpected` error.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_empty_content: bool,
}
