//! Presentational rendering of document nodes
//!
//! A pure mapping from nodes to [`Fragment`] trees, plus HTML serialization
//! for export and tests. The interactive desktop views follow the same tag
//! mapping and mark nesting order and share the style constants below.

use std::fmt::Write;

use crate::model::{BlockType, Document, ElementNode, Mark, Node, TextNode};

/// Inline style of the scratch panel shown beside `edit-text` blocks
pub const EDIT_TEXT_PANEL_STYLE: &str = "user-select: none; color: gray; \
    background-color: lightyellow; border: 1px solid black; padding-top: 4px; \
    padding-bottom: 80px; margin-right: 10px; margin-left: 10px; \
    min-height: 300px; min-width: 500px;";

/// Inline style of text carrying the `input` mark
pub const INPUT_MARK_STYLE: &str = "color: gray; background-color: lightyellow; \
    border: 1px solid black; padding-right: 10px; padding-left: 10px; \
    margin-right: 10px; margin-left: 10px;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Element {
        tag: &'static str,
        attributes: Vec<(&'static str, String)>,
        children: Vec<Fragment>,
    },
    Text(String),
}

impl Fragment {
    pub fn tag(tag: &'static str, children: Vec<Fragment>) -> Self {
        Fragment::Element {
            tag,
            attributes: Vec::new(),
            children,
        }
    }

    pub fn with_attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Fragment::Element { attributes, .. } = &mut self {
            attributes.push((name, value.into()));
        }
        self
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        self.write_html(&mut html);
        html
    }

    fn write_html(&self, html: &mut String) {
        match self {
            Fragment::Text(text) => html.push_str(&html_escape::encode_text(text)),
            Fragment::Element {
                tag,
                attributes,
                children,
            } => {
                html.push('<');
                html.push_str(tag);
                for (name, value) in attributes {
                    let _ = write!(
                        html,
                        " {name}=\"{}\"",
                        html_escape::encode_double_quoted_attribute(value)
                    );
                }
                html.push('>');
                for child in children {
                    child.write_html(html);
                }
                let _ = write!(html, "</{tag}>");
            }
        }
    }
}

/// Wrapper for a block container around its already-rendered children
pub fn render_element(element: &ElementNode, children: Vec<Fragment>) -> Fragment {
    match element.block_type {
        BlockType::BlockQuote => Fragment::tag("blockquote", children),
        BlockType::BulletedList => Fragment::tag("ul", children),
        BlockType::HeadingOne => Fragment::tag("h1", children),
        BlockType::HeadingTwo => Fragment::tag("h2", children),
        BlockType::ListItem => Fragment::tag("li", children),
        BlockType::NumberedList => Fragment::tag("ol", children),
        BlockType::EditText => Fragment::tag(
            "span",
            vec![
                Fragment::tag("textarea", Vec::new())
                    .with_attribute("contenteditable", "false")
                    .with_attribute("style", EDIT_TEXT_PANEL_STYLE),
                Fragment::tag("span", children).with_attribute("contenteditable", "true"),
            ],
        )
        .with_attribute("contenteditable", "false"),
        BlockType::Paragraph => Fragment::tag("p", children),
    }
}

/// Wrapper for a single mark around already-wrapped content
pub fn render_mark(mark: Mark, content: Fragment) -> Fragment {
    match mark {
        Mark::Bold => Fragment::tag("strong", vec![content]),
        Mark::Italic => Fragment::tag("em", vec![content]),
        Mark::Underline => Fragment::tag("u", vec![content]),
        Mark::Input => {
            Fragment::tag("span", vec![content]).with_attribute("style", INPUT_MARK_STYLE)
        }
    }
}

/// Text run with its marks nested bold, italic, underline, input (inside out)
pub fn render_leaf(leaf: &TextNode) -> Fragment {
    let content = leaf
        .marks
        .iter()
        .fold(Fragment::Text(leaf.text.clone()), |content, mark| {
            render_mark(mark, content)
        });
    Fragment::tag("span", vec![content])
}

pub fn render_node(node: &Node) -> Fragment {
    match node {
        Node::Text(leaf) => render_leaf(leaf),
        Node::Element(element) => {
            let children = element.children.iter().map(render_node).collect();
            render_element(element, children)
        }
    }
}

pub fn render_document(document: &Document) -> Vec<Fragment> {
    document.children.iter().map(render_node).collect()
}

pub fn to_html(document: &Document) -> String {
    render_document(document)
        .iter()
        .map(Fragment::to_html)
        .collect()
}
