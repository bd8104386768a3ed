//! Semantic cursor positions inside a JSON5 document.
//!
//! [`get_location`] answers "where in the document structure is this offset":
//! the path of property names and array indices leading to the construct the
//! cursor is inside, whether the cursor sits in an object's key slot, and the
//! most recent complete key or literal strictly before it. Editors use this
//! for completion and hover without materializing a tree.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use crate::{
    options::ParseOptions,
    parser::{ParseVisitor, Span, visit},
    segment::Segment,
    tree::NodeKind,
    value::Value,
};

/// The key or literal token nearest before a queried offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNode {
    pub kind: NodeKind,
    pub offset: usize,
    pub length: usize,
    /// For a property: the offset of its `:`, once seen.
    pub colon_offset: Option<usize>,
}

/// The semantic location of an offset inside a document.
///
/// Produced by [`get_location`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Path from the root to the construct the offset is inside. While the
    /// cursor sits in a key slot where no name has been typed yet, the
    /// innermost segment is the empty key; while it sits between array
    /// elements, the innermost segment is the upcoming element index.
    pub path: Vec<Segment>,
    /// The most recent complete key or literal before the offset, if any.
    pub previous_node: Option<LocationNode>,
    /// Whether the offset is inside an object's key slot (between `{` or `,`
    /// and the following `:`).
    pub is_at_property_key: bool,
}

impl Location {
    /// Glob-style path match: a `"*"` segment matches exactly one segment,
    /// `"**"` matches zero or more contiguous segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use json5edit::get_location;
    ///
    /// let location = get_location("{ scripts: { build: 'make' } }", 20);
    /// assert!(location.matches(&["scripts".into(), "build".into()]));
    /// assert!(location.matches(&["**".into(), "build".into()]));
    /// assert!(location.matches(&["*".into(), "build".into()]));
    /// assert!(!location.matches(&["scripts".into()]));
    /// ```
    #[must_use]
    pub fn matches(&self, pattern: &[Segment]) -> bool {
        matches_from(pattern, &self.path)
    }
}

fn matches_from(pattern: &[Segment], path: &[Segment]) -> bool {
    match pattern.first() {
        None => path.is_empty(),
        Some(Segment::Key(k)) if k == "**" => {
            (0..=path.len()).any(|skip| matches_from(&pattern[1..], &path[skip..]))
        }
        Some(Segment::Key(k)) if k == "*" => {
            !path.is_empty() && matches_from(&pattern[1..], &path[1..])
        }
        Some(segment) => path.first() == Some(segment) && matches_from(&pattern[1..], &path[1..]),
    }
}

/// Computes the semantic [`Location`] of `offset` within `text`.
///
/// The text is parsed fault-tolerantly up to the offset; parse errors do not
/// surface here. An offset inside a partially typed property key reports the
/// path of the enclosing object, with `is_at_property_key` set.
#[must_use]
pub fn get_location(text: &str, offset: usize) -> Location {
    let mut sink = LocationSink {
        position: offset,
        segments: Vec::new(),
        previous: None,
        is_at_property_key: false,
        done: false,
    };
    visit(text, &mut sink, ParseOptions::default());
    Location {
        path: sink.segments,
        previous_node: sink.previous,
        is_at_property_key: sink.is_at_property_key,
    }
}

struct LocationSink {
    position: usize,
    segments: Vec<Segment>,
    previous: Option<LocationNode>,
    is_at_property_key: bool,
    done: bool,
}

impl LocationSink {
    fn remember(&mut self, kind: NodeKind, span: Span) {
        self.previous = Some(LocationNode {
            kind,
            offset: span.offset,
            length: span.length,
            colon_offset: None,
        });
    }
}

impl ParseVisitor for LocationSink {
    fn should_continue(&self) -> bool {
        !self.done
    }

    fn on_object_begin(&mut self, span: Span) {
        if self.position <= span.offset {
            self.done = true;
            return;
        }
        self.previous = None;
        self.is_at_property_key = true;
        // key-slot placeholder until a complete property name passes by
        self.segments.push(Segment::Key(String::new()));
    }

    fn on_object_property(&mut self, name: &str, span: Span) {
        if self.position < span.offset {
            self.done = true;
            return;
        }
        self.remember(NodeKind::Property, span);
        if self.position <= span.end() {
            // the cursor is inside the key being typed; the slot contributes
            // no segment of its own
            self.segments.pop();
            self.done = true;
            return;
        }
        if let Some(last) = self.segments.last_mut() {
            *last = Segment::Key(name.to_string());
        }
    }

    fn on_object_end(&mut self, span: Span) {
        if self.position <= span.offset {
            self.done = true;
            return;
        }
        self.previous = None;
        self.segments.pop();
    }

    fn on_array_begin(&mut self, span: Span) {
        if self.position <= span.offset {
            self.done = true;
            return;
        }
        self.previous = None;
        self.segments.push(Segment::Index(0));
    }

    fn on_array_end(&mut self, span: Span) {
        if self.position <= span.offset {
            self.done = true;
            return;
        }
        self.previous = None;
        self.segments.pop();
    }

    fn on_literal_value(&mut self, value: Value, span: Span) {
        if self.position < span.offset {
            self.done = true;
            return;
        }
        let kind = match &value {
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Boolean(_) => NodeKind::Boolean,
            _ => NodeKind::Null,
        };
        self.remember(kind, span);
        if self.position <= span.end() {
            self.done = true;
        }
    }

    fn on_separator(&mut self, separator: char, span: Span) {
        if self.position <= span.offset {
            self.done = true;
            return;
        }
        if separator == ':' {
            if let Some(previous) = &mut self.previous {
                if previous.kind == NodeKind::Property {
                    previous.colon_offset = Some(span.offset);
                    self.is_at_property_key = false;
                    self.previous = None;
                }
            }
        } else if separator == ',' {
            match self.segments.last_mut() {
                Some(Segment::Index(index)) => *index += 1,
                Some(slot @ Segment::Key(_)) => {
                    self.is_at_property_key = true;
                    *slot = Segment::Key(String::new());
                }
                None => {}
            }
            self.previous = None;
        }
    }
}
