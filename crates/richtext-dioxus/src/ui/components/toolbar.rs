use dioxus::prelude::*;
use richtext_engine::formatting::{is_block_active, is_mark_active, toggle_block, toggle_mark};
use richtext_engine::model::{BlockType, Mark};

use crate::ui::use_editor;

/// One toolbar button: a mark or a block type, with its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarItem {
    Mark(Mark, &'static str),
    Block(BlockType, &'static str),
}

/// Buttons in display order
pub const TOOLBAR: [ToolbarItem; 10] = [
    ToolbarItem::Mark(Mark::Bold, "B"),
    ToolbarItem::Mark(Mark::Italic, "I"),
    ToolbarItem::Mark(Mark::Underline, "U"),
    ToolbarItem::Block(BlockType::HeadingOne, "H1"),
    ToolbarItem::Block(BlockType::HeadingTwo, "H2"),
    ToolbarItem::Block(BlockType::BlockQuote, "❝"),
    ToolbarItem::Block(BlockType::NumberedList, "1."),
    ToolbarItem::Block(BlockType::BulletedList, "•"),
    ToolbarItem::Mark(Mark::Input, "[ ]"),
    ToolbarItem::Block(BlockType::EditText, "</>"),
];

#[component]
pub fn Toolbar() -> Element {
    rsx! {
        div {
            class: "toolbar",
            for item in TOOLBAR {
                {match item {
                    ToolbarItem::Mark(mark, label) => rsx! {
                        MarkButton { key: "{mark}", mark, label }
                    },
                    ToolbarItem::Block(block_type, label) => rsx! {
                        BlockButton { key: "{block_type}", block_type, label }
                    },
                }}
            }
        }
    }
}

fn button_class(active: bool) -> &'static str {
    if active {
        "toolbar-button active"
    } else {
        "toolbar-button"
    }
}

/// Toggles `mark` on mouse-down, keeping focus in the editable surface
#[component]
pub fn MarkButton(mark: Mark, label: &'static str) -> Element {
    let mut editor = use_editor();
    let class = button_class(is_mark_active(&*editor.read(), mark));

    rsx! {
        button {
            class: "{class}",
            title: "{mark}",
            onmousedown: move |evt: MouseEvent| {
                evt.prevent_default();
                toggle_mark(&mut *editor.write(), mark);
                log::debug!("Toggled mark {mark}");
            },
            "{label}"
        }
    }
}

/// Toggles `block_type` on mouse-down, keeping focus in the editable surface
#[component]
pub fn BlockButton(block_type: BlockType, label: &'static str) -> Element {
    let mut editor = use_editor();
    let class = button_class(is_block_active(&*editor.read(), block_type));

    rsx! {
        button {
            class: "{class}",
            title: "{block_type}",
            onmousedown: move |evt: MouseEvent| {
                evt.prevent_default();
                toggle_block(&mut *editor.write(), block_type);
                log::debug!("Toggled block {block_type}");
            },
            "{label}"
        }
    }
}
