use dioxus::prelude::*;
use richtext_engine::model::{Node, Path};

use super::{ElementView, LeafView};

/// Renders any node, recursing through containers
#[component]
pub fn NodeView(path: Path, node: Node) -> Element {
    match node {
        Node::Element(element) => rsx! { ElementView { path, element } },
        Node::Text(leaf) => rsx! { LeafView { path, leaf } },
    }
}
