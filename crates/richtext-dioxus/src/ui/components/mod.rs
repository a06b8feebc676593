pub mod editable;
pub mod element_view;
pub mod leaf_view;
pub mod node_view;
pub mod toolbar;

pub use editable::Editable;
pub use element_view::ElementView;
pub use leaf_view::LeafView;
pub use node_view::NodeView;
pub use toolbar::{BlockButton, MarkButton, Toolbar};
