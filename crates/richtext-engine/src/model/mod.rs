//! Document data model
//!
//! An ordered tree of block containers ([`ElementNode`]) and text runs
//! ([`TextNode`]). The set of block type tags and mark names is closed:
//! [`BlockType`] and [`Mark`].

pub mod block_type;
pub mod document;
pub mod marks;
pub mod node;
pub mod path;

pub use block_type::{BlockType, LIST_TYPES};
pub use document::{Document, ModelError, initial_value};
pub use marks::{Mark, Marks, UnknownMark};
pub use node::{ElementNode, Node, TextNode};
pub use path::Path;
