use crate::editing::{Cmd, Patch};
use crate::model::{BlockType, Marks};

/// The capabilities toggle rules need from an editing framework
///
/// Toggle and hotkey logic only ever talk to the document through this
/// trait, so the in-memory [`Editor`](crate::editing::Editor) and test
/// doubles are interchangeable.
pub trait EditPort {
    /// Marks active at the cursor or selection; `None` when nothing is recorded
    fn active_marks(&self) -> Option<Marks>;

    /// Whether a container of `block_type` contains or is touched by the selection
    fn selection_touches_block(&self, block_type: BlockType) -> bool;

    /// Apply a structural or mark edit to the current selection
    fn apply(&mut self, cmd: Cmd) -> Patch;
}
