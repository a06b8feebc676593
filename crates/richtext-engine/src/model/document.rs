use serde::{Deserialize, Serialize};

use crate::model::{BlockType, ElementNode, Mark, Node, Path, TextNode};

/// Structural invariant violations found in a document tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("container at {path} has no children")]
    EmptyContainer { path: Path },

    #[error("{list} at {path} has a child that is not a list-item")]
    ListChildNotItem { path: Path, list: BlockType },

    #[error("list-item at {path} is not inside a list")]
    OrphanListItem { path: Path },

    #[error("container at {path} mixes text runs and blocks")]
    MixedChildren { path: Path },
}

/// The document tree; the root is an implicit container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    pub fn new(children: Vec<Node>) -> Self {
        Document { children }
    }

    /// Parse Slate-shaped JSON and reject trees that break the list rules
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let document: Document = serde_json::from_str(json)?;
        document.check_invariants()?;
        Ok(document)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn node(&self, path: &Path) -> Option<&Node> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.children.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }

    pub fn text(&self, path: &Path) -> Option<&TextNode> {
        self.node(path)?.as_text()
    }

    pub fn element(&self, path: &Path) -> Option<&ElementNode> {
        self.node(path)?.as_element()
    }

    /// Children of the container at `path`; the root path yields top-level nodes
    pub(crate) fn children_mut(&mut self, path: &Path) -> Option<&mut Vec<Node>> {
        let mut children = &mut self.children;
        for index in path.indices() {
            children = match children.get_mut(*index)? {
                Node::Element(element) => &mut element.children,
                Node::Text(_) => return None,
            };
        }
        Some(children)
    }

    pub(crate) fn node_mut(&mut self, path: &Path) -> Option<&mut Node> {
        let parent = path.parent()?;
        let index = path.last()?;
        self.children_mut(&parent)?.get_mut(index)
    }

    /// Every node in pre-order with its path
    pub fn descendants(&self) -> Vec<(Path, &Node)> {
        let mut out = Vec::new();
        collect_descendants(&self.children, &Path::root(), &mut out);
        out
    }

    /// Paths of all text runs in document order
    pub fn text_paths(&self) -> Vec<Path> {
        self.descendants()
            .into_iter()
            .filter(|(_, node)| matches!(node, Node::Text(_)))
            .map(|(path, _)| path)
            .collect()
    }

    pub fn check_invariants(&self) -> Result<(), ModelError> {
        for (path, node) in self.descendants() {
            let Node::Element(element) = node else {
                continue;
            };
            if element.children.is_empty() {
                return Err(ModelError::EmptyContainer { path });
            }
            let texts = element
                .children
                .iter()
                .filter(|child| matches!(child, Node::Text(_)))
                .count();
            if texts != 0 && texts != element.children.len() {
                return Err(ModelError::MixedChildren { path });
            }
            if element.block_type.is_list()
                && element.children.iter().any(|child| {
                    child.as_element().map(|e| e.block_type) != Some(BlockType::ListItem)
                })
            {
                return Err(ModelError::ListChildNotItem {
                    path,
                    list: element.block_type,
                });
            }
            if element.block_type == BlockType::ListItem {
                let in_list = path
                    .parent()
                    .and_then(|parent| self.element(&parent))
                    .is_some_and(|parent| parent.block_type.is_list());
                if !in_list {
                    return Err(ModelError::OrphanListItem { path });
                }
            }
        }
        Ok(())
    }
}

fn collect_descendants<'a>(nodes: &'a [Node], parent: &Path, out: &mut Vec<(Path, &'a Node)>) {
    for (index, node) in nodes.iter().enumerate() {
        let path = parent.child(index);
        out.push((path.clone(), node));
        collect_descendants(node.children(), &path, out);
    }
}

/// Content the demo editor starts with
pub fn initial_value() -> Document {
    Document::new(vec![
        Node::element(
            BlockType::Paragraph,
            vec![
                Node::text("This is editable "),
                Node::marked("rich", &[Mark::Bold]),
                Node::text(" text, "),
                Node::marked("much", &[Mark::Italic]),
                Node::text(" better than a "),
                Node::marked("<textarea>", &[Mark::Input]),
                Node::text("!"),
            ],
        ),
        Node::element(
            BlockType::Paragraph,
            vec![
                Node::text(
                    "Since it's rich text, you can do things like turn a selection of text ",
                ),
                Node::marked("bold", &[Mark::Bold]),
                Node::text(
                    ", or add a semantically rendered block quote in the middle of the page, like this:",
                ),
            ],
        ),
        Node::element(BlockType::BlockQuote, vec![Node::text("A wise quote.")]),
        Node::element(
            BlockType::Paragraph,
            vec![Node::text("Try it out for yourself!")],
        ),
    ])
}
