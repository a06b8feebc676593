pub mod editing;
pub mod formatting;
pub mod model;
pub mod render;

// Re-export key types for easier usage
pub use editing::{Cmd, EditPort, Editor, EditorError, Patch, Point, Selection};
pub use formatting::*;
pub use model::*;
