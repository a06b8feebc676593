use dioxus::prelude::*;
use richtext_engine::model::{BlockType, ElementNode, Path};
use richtext_engine::render::EDIT_TEXT_PANEL_STYLE;

use super::NodeView;

/// Block container wrapper, one tag per block type
#[component]
pub fn ElementView(path: Path, element: ElementNode) -> Element {
    let children = rsx! {
        for (index, child) in element.children.iter().enumerate() {
            NodeView {
                key: "{index}",
                path: path.child(index),
                node: child.clone(),
            }
        }
    };

    match element.block_type {
        BlockType::BlockQuote => rsx! { blockquote { {children} } },
        BlockType::BulletedList => rsx! { ul { {children} } },
        BlockType::HeadingOne => rsx! { h1 { {children} } },
        BlockType::HeadingTwo => rsx! { h2 { {children} } },
        BlockType::ListItem => rsx! { li { {children} } },
        BlockType::NumberedList => rsx! { ol { {children} } },
        // Scratch panel is local to the view and never reaches the document
        BlockType::EditText => rsx! {
            span {
                class: "edit-text",
                contenteditable: "false",
                textarea {
                    contenteditable: "false",
                    style: EDIT_TEXT_PANEL_STYLE,
                }
                span {
                    contenteditable: "true",
                    {children}
                }
            }
        },
        BlockType::Paragraph => rsx! { p { {children} } },
    }
}
