use dioxus::html::Key;
use dioxus::prelude::*;
use richtext_engine::formatting::{HOTKEYS, KeyPress, Modifiers, Platform, dispatch_hotkeys};
use richtext_engine::model::Path;

use super::NodeView;
use crate::ui::use_editor;

const PLACEHOLDER: &str = "Enter some rich text…";

/// The editable surface: every top-level node plus mark hotkeys
#[component]
pub fn Editable() -> Element {
    let mut editor = use_editor();
    let document = editor.read().document().clone();
    let is_empty = document.is_empty();

    rsx! {
        div {
            class: "editable",
            tabindex: "0",
            spellcheck: "true",
            autofocus: true,
            onkeydown: move |evt: KeyboardEvent| {
                let press = key_press(&evt);
                let platform = Platform::current();
                // Skip the signal write, and the re-render, for unbound keys
                if !HOTKEYS.iter().any(|hotkey| hotkey.chord.matches(&press, platform)) {
                    return;
                }
                let outcome = dispatch_hotkeys(&mut *editor.write(), &press, platform);
                if outcome.prevent_default {
                    evt.prevent_default();
                }
                log::debug!("Hotkey {:?} toggled {:?}", press, outcome.toggled);
            },
            if is_empty {
                span {
                    class: "placeholder",
                    contenteditable: "false",
                    "{PLACEHOLDER}"
                }
            }
            for (index, node) in document.children.into_iter().enumerate() {
                NodeView {
                    key: "{index}",
                    path: Path::from([index]),
                    node,
                }
            }
        }
    }
}

/// Reduce a key-down event to what hotkey matching needs
fn key_press(evt: &KeyboardEvent) -> KeyPress {
    let key = match evt.key() {
        Key::Character(character) => character,
        other => other.to_string(),
    };
    let held = evt.modifiers();
    KeyPress::new(
        key,
        Modifiers {
            ctrl: held.ctrl(),
            meta: held.meta(),
            alt: held.alt(),
            shift: held.shift(),
        },
    )
}
