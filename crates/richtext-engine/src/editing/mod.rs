/*!
 * # Editing Module
 *
 * The seam between formatting logic and whatever owns the document.
 *
 * ## Edit Port
 *
 * Toggle rules never touch the tree directly. They go through [`EditPort`]:
 *
 * - **Query active formats**: `active_marks()` and `selection_touches_block()`
 * - **Apply edits**: `apply(Cmd)`, where [`Cmd`] is either a structural edit
 *   (unwrap, retype, wrap) or a mark edit (add, remove)
 *
 * Each call returns a [`Patch`] describing how many nodes were touched, the
 * carried-over selection and the new version.
 *
 * ## In-memory Editor
 *
 * [`Editor`] is the port implementation used by the desktop component and the
 * scenario tests. It owns the [`Document`](crate::model::Document), a
 * [`Selection`] of anchor/focus [`Point`]s, and cursor marks. It implements
 * only the edits the toggle rules request: there is no text insertion, no
 * history and no DOM.
 *
 * ## Module Structure
 *
 * - **`port`**: the `EditPort` trait
 * - **`commands`**: the `Cmd` enum
 * - **`patch`**: edit results
 * - **`selection`**: `Point` and `Selection`
 * - **`transforms`**: tree transforms behind each command
 * - **`editor`**: the `Editor` state and its `EditPort` implementation
 */

pub mod commands;
pub mod editor;
pub mod patch;
pub mod port;
pub mod selection;
mod transforms;

pub use commands::Cmd;
pub use editor::{Editor, EditorError};
pub use patch::Patch;
pub use port::EditPort;
pub use selection::{Point, Selection};
