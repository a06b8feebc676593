use crate::editing::Selection;

/// Result of applying a command
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Nodes retyped, wrapped, promoted or re-marked; zero for a no-op
    pub affected: usize,
    pub new_selection: Option<Selection>,
    pub version: u64,
}

impl Patch {
    pub fn is_noop(&self) -> bool {
        self.affected == 0
    }
}
