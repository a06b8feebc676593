use dioxus::prelude::*;
use richtext_engine::editing::Editor;
use richtext_engine::model::initial_value;

use super::components::{Editable, Toolbar};

const RICHTEXT_CSS: &str = include_str!("../assets/richtext.css");

/// Editor shell: toolbar above the editable surface
///
/// Owns the [`Editor`] in a signal provided as context, so every toolbar
/// button and view below reads and edits the same instance.
#[component]
pub fn RichTextEditor() -> Element {
    use_context_provider(|| Signal::new(Editor::new(initial_value())));

    rsx! {
        style { {RICHTEXT_CSS} }
        div {
            class: "richtext",
            Toolbar {}
            Editable {}
        }
    }
}

/// The editor owned by the nearest [`RichTextEditor`]
pub fn use_editor() -> Signal<Editor> {
    use_context::<Signal<Editor>>()
}
