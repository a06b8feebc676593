use serde::{Deserialize, Serialize};

use crate::model::{BlockType, Mark, Marks};

/// A node in the document tree: a block container or a text run
///
/// Serialized in the Slate JSON shape. Element variant is tried first;
/// anything without `children` is read as a text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
}

/// Block container with ordered children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementNode {
    #[serde(rename = "type", default)]
    pub block_type: BlockType,
    pub children: Vec<Node>,
}

/// Leaf run of text with uniform marks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(flatten)]
    pub marks: Marks,
}

impl Node {
    pub fn element(block_type: BlockType, children: Vec<Node>) -> Self {
        Node::Element(ElementNode::new(block_type, children))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(TextNode::plain(text))
    }

    pub fn marked(text: impl Into<String>, marks: &[Mark]) -> Self {
        Node::Text(TextNode::new(text, marks.iter().copied().collect()))
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(element) => &element.children,
            Node::Text(_) => &[],
        }
    }
}

impl ElementNode {
    pub fn new(block_type: BlockType, children: Vec<Node>) -> Self {
        ElementNode {
            block_type,
            children,
        }
    }
}

impl TextNode {
    pub fn new(text: impl Into<String>, marks: Marks) -> Self {
        TextNode {
            text: text.into(),
            marks,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Marks::new())
    }

    /// Length in chars; offsets inside a run count chars, not bytes
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split into `[0, offset)` and `[offset, len)` with the same marks
    pub fn split_at(&self, offset: usize) -> (TextNode, TextNode) {
        let byte = self
            .text
            .char_indices()
            .nth(offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len());
        let (left, right) = self.text.split_at(byte);
        (
            TextNode::new(left, self.marks.clone()),
            TextNode::new(right, self.marks.clone()),
        )
    }
}
