//! Fault-tolerant JSON5 scanner and parser for editors and configuration
//! tools.
//!
//! JSON5 extends JSON with comments, unquoted and single-quoted keys,
//! trailing commas, hexadecimal and extended numeric forms, and multi-line
//! strings. This crate keeps processing a document in the presence of
//! syntactic errors: every entry point returns the minimal syntactic salvage
//! together with a list of `{code, offset, length}` errors, and never fails
//! on malformed input.
//!
//! Three traversal surfaces are layered over one restartable [`Scanner`]:
//!
//! - [`visit`] streams structural events to a [`ParseVisitor`],
//! - [`parse`] materializes a plain [`Value`] tree,
//! - [`parse_tree`] builds a typed [`Node`] tree with bit-exact source spans,
//!   queried via [`get_location`], [`find_node_at_location`],
//!   [`find_node_at_offset`], [`get_node_path`] and [`get_node_value`].
//!
//! All offsets and lengths are UTF-8 byte units into the input string, and
//! columns are measured in the same units.
//!
//! # Examples
//!
//! ```
//! use json5edit::{parse, ParseOptions, Value};
//!
//! let mut errors = Vec::new();
//! let value = parse(
//!     "{ // config\n  retries: 3, timeout: 1.5e3, }",
//!     &mut errors,
//!     ParseOptions::default(),
//! );
//! assert!(errors.is_empty());
//! let object = value.unwrap();
//! assert_eq!(
//!     object.as_object().unwrap()["retries"],
//!     Value::Number(3.0)
//! );
//! ```

#![no_std]
#![allow(missing_docs)]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod error;
mod grammar;
mod location;
mod options;
mod parser;
mod scanner;
mod segment;
mod tree;
mod value;

pub use error::{ParseError, ParseErrorCode, ScanError};
pub use location::{Location, LocationNode, get_location};
pub use options::ParseOptions;
pub use parser::{ParseVisitor, Span, parse, visit};
pub use scanner::{Scanner, TokenKind};
pub use segment::Segment;
pub use tree::{
    Node, NodeKind, Tree, find_node_at_location, find_node_at_offset, get_node_path,
    get_node_value, parse_tree,
};
pub use value::{Array, Map, Value};

#[cfg(test)]
mod tests;
