//! NodeArena: flat storage for AST nodes.
//!
//! Nodes are appended in creation order and never removed, except that
//! speculative parsing truncates back to a saved length when it rolls back.

use tsz_common::Span;

use super::node::{Node, NodeData, NodeIndex};

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Maximum pre-allocation to avoid capacity overflow in huge files.
    const MAX_NODE_PREALLOC: usize = 1_000_000;

    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    /// Create an arena sized for a source of `source_len` bytes. Typical
    /// TypeScript produces roughly one node per four bytes.
    pub fn with_capacity_for_source(source_len: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity((source_len / 4).min(Self::MAX_NODE_PREALLOC)),
        }
    }

    pub fn add(&mut self, span: Span, data: NodeData) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node { span, data });
        index
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            return None;
        }
        self.nodes.get(index.0 as usize)
    }

    #[inline]
    pub fn data(&self, index: NodeIndex) -> Option<&NodeData> {
        self.get(index).map(|node| &node.data)
    }

    /// Span of a node, or an empty span for `NONE`.
    #[inline]
    pub fn span(&self, index: NodeIndex) -> Span {
        self.get(index).map(|node| node.span).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.nodes.truncate(len);
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Text of an `Identifier` or `PrivateIdentifier` node.
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier { text } | NodeData::PrivateIdentifier { text } => Some(text),
            _ => None,
        }
    }

    /// Static text of a property or declaration name: identifiers, string
    /// and numeric literals. Computed names have no static text.
    pub fn property_name_text(&self, index: NodeIndex) -> Option<&str> {
        match self.data(index)? {
            NodeData::Identifier { text } | NodeData::PrivateIdentifier { text } => Some(text),
            NodeData::Literal { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Text of an entity name such as `A.B.C`.
    pub fn entity_name_text(&self, index: NodeIndex) -> Option<String> {
        let mut parts = Vec::new();
        let mut current = index;
        loop {
            match self.data(current)? {
                NodeData::Identifier { text } => {
                    parts.push(text.as_str());
                    break;
                }
                NodeData::QualifiedName { left, right }
                | NodeData::PropertyAccessExpression {
                    expression: left,
                    name: right,
                    ..
                } => {
                    parts.push(self.identifier_text(*right)?);
                    current = *left;
                }
                _ => return None,
            }
        }
        parts.reverse();
        Some(parts.join("."))
    }

    /// The leftmost identifier of an entity name (`A` in `A.B.C`).
    pub fn leftmost_identifier(&self, mut index: NodeIndex) -> NodeIndex {
        loop {
            match self.data(index) {
                Some(NodeData::QualifiedName { left, .. }) => index = *left,
                Some(NodeData::PropertyAccessExpression { expression, .. }) => index = *expression,
                Some(NodeData::Identifier { .. }) => return index,
                _ => return NodeIndex::NONE,
            }
        }
    }

    /// Source-like text of a JSX tag name: `div`, `Foo.Bar`, `this.x` or
    /// `svg:rect`.
    pub fn jsx_tag_name_text(&self, index: NodeIndex) -> String {
        match self.data(index) {
            Some(NodeData::Identifier { text }) => text.clone(),
            Some(NodeData::Keyword { .. }) => "this".to_string(),
            Some(NodeData::PropertyAccessExpression {
                expression, name, ..
            }) => format!(
                "{}.{}",
                self.jsx_tag_name_text(*expression),
                self.jsx_tag_name_text(*name)
            ),
            Some(NodeData::JsxNamespacedName { namespace, name }) => format!(
                "{}:{}",
                self.jsx_tag_name_text(*namespace),
                self.jsx_tag_name_text(*name)
            ),
            _ => String::new(),
        }
    }

    /// Whether a JSX tag names a host element (`div`, `my-widget`,
    /// `svg:rect`) rather than a component value.
    pub fn is_intrinsic_jsx_tag(&self, tag_name: NodeIndex) -> bool {
        match self.data(tag_name) {
            Some(NodeData::Identifier { text }) => {
                text.contains('-') || text.starts_with(|c: char| c.is_ascii_lowercase())
            }
            Some(NodeData::JsxNamespacedName { .. }) => true,
            _ => false,
        }
    }

    /// Skip any number of parentheses around an expression.
    pub fn skip_parentheses(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(NodeData::ParenthesizedExpression { expression }) = self.data(index) {
            index = *expression;
        }
        index
    }

    /// Statements of a `SourceFile`, `Block` or `ModuleBlock`.
    pub fn statements(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.data(index) {
            Some(
                NodeData::SourceFile { statements }
                | NodeData::Block { statements }
                | NodeData::ModuleBlock { statements },
            ) => statements,
            _ => &[],
        }
    }
}
