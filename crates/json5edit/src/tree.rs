//! Typed node trees with bit-exact source spans.
//!
//! [`parse_tree`] builds a [`Tree`] from the parser's structural events.
//! Nodes live in an arena addressed by index, with the parent stored as an
//! optional index, so the parent back-references cannot form owning cycles.
//! [`Node`] is a copyable handle tying an index to its tree.
//!
//! Span rules: collection nodes include their delimiters; a property extends
//! from the first character of its key to the end of its value, or to the end
//! of the key when recovery left the value absent.

use alloc::{string::String, vec::Vec};
use core::fmt;

use crate::{
    error::{ParseError, ParseErrorCode},
    options::ParseOptions,
    parser::{ParseVisitor, Span, visit},
    segment::Segment,
    value::{Map, Value},
};

/// Node categories in the tree produced by [`parse_tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Object,
    Array,
    Property,
    String,
    Number,
    Boolean,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeIndex(usize);

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    offset: usize,
    length: usize,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
    value: Option<Value>,
    colon_offset: Option<usize>,
}

/// An immutable tree of typed nodes with source spans.
///
/// Produced by [`parse_tree`]; traversed through [`Node`] handles starting at
/// [`root`](Tree::root).
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<NodeData>,
    root: NodeIndex,
}

impl Tree {
    /// The root node. Always present: for input without a salvageable value a
    /// zero-length array node is synthesized.
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            index: self.root,
        }
    }

    fn data(&self, index: NodeIndex) -> &NodeData {
        &self.nodes[index.0]
    }
}

/// A handle to one node of a [`Tree`].
#[derive(Clone, Copy)]
pub struct Node<'t> {
    tree: &'t Tree,
    index: NodeIndex,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.index == other.index
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("offset", &self.offset())
            .field("length", &self.length())
            .finish()
    }
}

impl<'t> Node<'t> {
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        self.tree.data(self.index).kind
    }

    /// Byte offset of the node's span in the parsed text.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.tree.data(self.index).offset
    }

    /// Byte length of the node's span.
    #[must_use]
    pub fn length(&self) -> usize {
        self.tree.data(self.index).length
    }

    /// The parent node; `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Node<'t>> {
        self.tree.data(self.index).parent.map(|index| Node {
            tree: self.tree,
            index,
        })
    }

    /// Child nodes in document order: properties of an object, elements of an
    /// array, key and optional value of a property.
    pub fn children(self) -> impl Iterator<Item = Node<'t>> + 't {
        let tree = self.tree;
        tree.data(self.index)
            .children
            .iter()
            .map(move |&index| Node { tree, index })
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.tree.data(self.index).children.len()
    }

    #[must_use]
    pub fn child_at(&self, index: usize) -> Option<Node<'t>> {
        self.tree
            .data(self.index)
            .children
            .get(index)
            .map(|&index| Node {
                tree: self.tree,
                index,
            })
    }

    /// Offset of the `:` of a property node, when one was present.
    #[must_use]
    pub fn colon_offset(&self) -> Option<usize> {
        self.tree.data(self.index).colon_offset
    }

    /// The decoded scalar payload of a string, number, boolean or null node.
    #[must_use]
    pub fn value(&self) -> Option<&'t Value> {
        self.tree.data(self.index).value.as_ref()
    }

    /// The path from the root to this node. Inverse of
    /// [`find_node_at_location`] for nodes in value position.
    #[must_use]
    pub fn path(&self) -> Vec<Segment> {
        let Some(parent) = self.parent() else {
            return Vec::new();
        };
        let mut path = parent.path();
        match parent.kind() {
            NodeKind::Property => {
                if let Some(key) = parent
                    .child_at(0)
                    .and_then(|key| key.value())
                    .and_then(Value::as_str)
                {
                    path.push(Segment::Key(key.into()));
                }
            }
            NodeKind::Array => {
                if let Some(index) = parent.children().position(|child| child == *self) {
                    path.push(Segment::Index(index));
                }
            }
            _ => {}
        }
        path
    }

    fn contains(&self, offset: usize, include_right_bound: bool) -> bool {
        (offset >= self.offset() && offset < self.offset() + self.length())
            || (include_right_bound && offset == self.offset() + self.length())
    }

    /// Descends to the innermost node whose span contains `offset`.
    #[must_use]
    pub fn find_at_offset(self, offset: usize, include_right_bound: bool) -> Option<Node<'t>> {
        if !self.contains(offset, include_right_bound) {
            return None;
        }
        for child in self.children() {
            if child.offset() > offset {
                break;
            }
            if let Some(found) = child.find_at_offset(offset, include_right_bound) {
                return Some(found);
            }
        }
        Some(self)
    }

    /// Walks `path` from this node: keys select property values, indices
    /// select array elements. `None` on any miss.
    #[must_use]
    pub fn find_at_location(self, path: &[Segment]) -> Option<Node<'t>> {
        let mut node = self;
        for segment in path {
            match segment {
                Segment::Key(key) => {
                    if node.kind() != NodeKind::Object {
                        return None;
                    }
                    node = node.children().find_map(|property| {
                        let name = property.child_at(0)?.value()?.as_str()?;
                        if name == key && property.child_count() == 2 {
                            property.child_at(1)
                        } else {
                            None
                        }
                    })?;
                }
                Segment::Index(index) => {
                    if node.kind() != NodeKind::Array {
                        return None;
                    }
                    node = node.child_at(*index)?;
                }
            }
        }
        Some(node)
    }

    /// Materializes the subtree into a plain value, by the same rules as
    /// [`parse`](crate::parse).
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self.kind() {
            NodeKind::Array => Value::Array(self.children().map(|c| c.to_value()).collect()),
            NodeKind::Object => {
                let mut map = Map::new();
                for property in self.children() {
                    let (Some(key), Some(value)) = (property.child_at(0), property.child_at(1))
                    else {
                        continue;
                    };
                    if let Some(name) = key.value().and_then(Value::as_str) {
                        map.insert(String::from(name), value.to_value());
                    }
                }
                Value::Object(map)
            }
            NodeKind::Property => self.child_at(1).map_or(Value::Null, |v| v.to_value()),
            _ => self.value().cloned().unwrap_or(Value::Null),
        }
    }
}

/// Parses `text` into a [`Tree`], appending recovery errors to `errors`.
///
/// The tree preserves recovery output: a property whose value was missing is
/// kept with its key as only child, and containers left open at the end of
/// input are closed at the end-of-input offset.
///
/// # Examples
///
/// ```
/// use json5edit::{parse_tree, NodeKind, ParseOptions};
///
/// let mut errors = Vec::new();
/// let tree = parse_tree("{ a: [1, 2] }", &mut errors, ParseOptions::default());
/// let root = tree.root();
/// assert_eq!(root.kind(), NodeKind::Object);
/// assert_eq!(root.offset(), 0);
/// assert_eq!(root.length(), 13);
/// ```
pub fn parse_tree(text: &str, errors: &mut Vec<ParseError>, options: ParseOptions) -> Tree {
    let mut sink = TreeSink {
        nodes: Vec::new(),
        stack: Vec::new(),
        root: None,
        errors,
    };
    visit(text, &mut sink, options);
    let root = sink.root.unwrap_or_else(|| {
        // guarantee a root even for empty or unsalvageable input
        let index = NodeIndex(sink.nodes.len());
        sink.nodes.push(NodeData {
            kind: NodeKind::Array,
            offset: 0,
            length: 0,
            parent: None,
            children: Vec::new(),
            value: None,
            colon_offset: None,
        });
        index
    });
    Tree {
        nodes: sink.nodes,
        root,
    }
}

/// Walks `path` from `root`. See [`Node::find_at_location`].
#[must_use]
pub fn find_node_at_location<'t>(root: Node<'t>, path: &[Segment]) -> Option<Node<'t>> {
    root.find_at_location(path)
}

/// Descends to the innermost node containing `offset`. See
/// [`Node::find_at_offset`].
#[must_use]
pub fn find_node_at_offset(
    root: Node<'_>,
    offset: usize,
    include_right_bound: bool,
) -> Option<Node<'_>> {
    root.find_at_offset(offset, include_right_bound)
}

/// The path from the root to `node`. See [`Node::path`].
#[must_use]
pub fn get_node_path(node: Node<'_>) -> Vec<Segment> {
    node.path()
}

/// Materializes `node`'s subtree into a plain value. See [`Node::to_value`].
#[must_use]
pub fn get_node_value(node: Node<'_>) -> Value {
    node.to_value()
}

// ------------------------------------------------------------------------------------------------
// Builder
// ------------------------------------------------------------------------------------------------

struct TreeSink<'e> {
    nodes: Vec<NodeData>,
    stack: Vec<NodeIndex>,
    root: Option<NodeIndex>,
    errors: &'e mut Vec<ParseError>,
}

impl TreeSink<'_> {
    fn create(&mut self, kind: NodeKind, span: Span, value: Option<Value>) -> NodeIndex {
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            offset: span.offset,
            length: span.length,
            parent: None,
            children: Vec::new(),
            value,
            colon_offset: None,
        });
        index
    }

    fn attach(&mut self, index: NodeIndex) {
        match self.stack.last().copied() {
            Some(top) => {
                self.nodes[top.0].children.push(index);
                self.nodes[index.0].parent = Some(top);
            }
            None => {
                if self.root.is_none() {
                    self.root = Some(index);
                }
            }
        }
    }

    fn top_kind(&self) -> Option<NodeKind> {
        self.stack.last().map(|index| self.nodes[index.0].kind)
    }

    /// Closes a property still waiting for its value; the span stays on the
    /// key, and no value child is added.
    fn close_pending_property(&mut self) {
        if self.top_kind() == Some(NodeKind::Property) {
            self.stack.pop();
        }
    }

    /// A finished value ending at `end` completes the property that owns it.
    fn close_owner_property(&mut self, end: usize) {
        if self.top_kind() == Some(NodeKind::Property) {
            if let Some(property) = self.stack.pop() {
                let data = &mut self.nodes[property.0];
                data.length = end - data.offset;
            }
        }
    }

    fn close_container(&mut self, span: Span) {
        self.close_pending_property();
        if let Some(index) = self.stack.pop() {
            let data = &mut self.nodes[index.0];
            data.length = span.end() - data.offset;
        }
        self.close_owner_property(span.end());
    }
}

impl ParseVisitor for TreeSink<'_> {
    fn on_object_begin(&mut self, span: Span) {
        let node = self.create(NodeKind::Object, span, None);
        self.attach(node);
        self.stack.push(node);
    }

    fn on_object_property(&mut self, name: &str, span: Span) {
        self.close_pending_property();
        let property = self.create(NodeKind::Property, span, None);
        self.attach(property);
        self.stack.push(property);
        let key = self.create(NodeKind::String, span, Some(Value::String(name.into())));
        self.attach(key);
    }

    fn on_object_end(&mut self, span: Span) {
        self.close_container(span);
    }

    fn on_array_begin(&mut self, span: Span) {
        let node = self.create(NodeKind::Array, span, None);
        self.attach(node);
        self.stack.push(node);
    }

    fn on_array_end(&mut self, span: Span) {
        self.close_container(span);
    }

    fn on_literal_value(&mut self, value: Value, span: Span) {
        let kind = match &value {
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Boolean(_) => NodeKind::Boolean,
            _ => NodeKind::Null,
        };
        let node = self.create(kind, span, Some(value));
        self.attach(node);
        self.close_owner_property(span.end());
    }

    fn on_separator(&mut self, separator: char, span: Span) {
        if separator == ':' && self.top_kind() == Some(NodeKind::Property) {
            if let Some(&top) = self.stack.last() {
                self.nodes[top.0].colon_offset = Some(span.offset);
            }
        }
    }

    fn on_error(&mut self, code: ParseErrorCode, offset: usize, length: usize) {
        self.errors.push(ParseError::new(code, offset, length));
    }
}
