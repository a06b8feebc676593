use crate::model::{BlockType, Mark};

/// Edit requests issued through an [`EditPort`](crate::editing::EditPort)
///
/// Every command acts on the port's current selection. Structural commands
/// reshape containers; mark commands only touch text runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// Remove the lowest selected containers of the given types, promoting
    /// their children one level. With `split`, only the selected children
    /// are promoted and the rest stay in copies of the container.
    UnwrapNodes { types: Vec<BlockType>, split: bool },
    /// Retype the lowest selected containers
    SetBlockType { block_type: BlockType },
    /// Wrap the sibling range spanning the lowest selected containers in a
    /// new container
    WrapNodes { block_type: BlockType },
    AddMark { mark: Mark },
    RemoveMark { mark: Mark },
}
