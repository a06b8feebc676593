use dioxus::prelude::*;
use richtext_engine::model::{Mark, Path, TextNode};
use richtext_engine::render::INPUT_MARK_STYLE;

use crate::ui::use_editor;

/// A text run with its marks nested bold, italic, underline, input
///
/// Mouse-down selects the run; with shift held it extends the selection to
/// the run instead.
#[component]
pub fn LeafView(path: Path, leaf: TextNode) -> Element {
    let mut editor = use_editor();
    let class = if editor.read().is_run_selected(&path) {
        "leaf selected"
    } else {
        "leaf"
    };

    let text = leaf.text.clone();
    let content = leaf
        .marks
        .iter()
        .fold(rsx! { "{text}" }, |content, mark| wrap_mark(mark, content));

    rsx! {
        span {
            class: "{class}",
            onmousedown: move |evt: MouseEvent| {
                evt.prevent_default();
                let result = if evt.modifiers().shift() {
                    editor.write().extend_to_run(&path)
                } else {
                    editor.write().select_run(&path)
                };
                if let Err(e) = result {
                    log::warn!("Ignoring click on run {path}: {e}");
                }
            },
            {content}
        }
    }
}

fn wrap_mark(mark: Mark, content: Element) -> Element {
    match mark {
        Mark::Bold => rsx! { strong { {content} } },
        Mark::Italic => rsx! { em { {content} } },
        Mark::Underline => rsx! { u { {content} } },
        Mark::Input => rsx! {
            span {
                style: INPUT_MARK_STYLE,
                {content}
            }
        },
    }
}
