pub mod app;
pub mod components;

pub use app::{RichTextEditor, use_editor};
