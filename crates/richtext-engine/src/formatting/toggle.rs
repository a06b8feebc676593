use crate::editing::{Cmd, EditPort};
use crate::model::{BlockType, LIST_TYPES, Mark};

/// Whether `mark` is on in the port's active-marks snapshot
///
/// No snapshot (no selection, nothing recorded) counts as off.
pub fn is_mark_active<P: EditPort + ?Sized>(port: &P, mark: Mark) -> bool {
    port.active_marks()
        .is_some_and(|marks| marks.contains(mark))
}

/// Remove `mark` from the selection if active, otherwise add it
pub fn toggle_mark<P: EditPort + ?Sized>(port: &mut P, mark: Mark) {
    if is_mark_active(port, mark) {
        port.apply(Cmd::RemoveMark { mark });
    } else {
        port.apply(Cmd::AddMark { mark });
    }
}

/// Whether a container of `block_type` is touched by the selection
pub fn is_block_active<P: EditPort + ?Sized>(port: &P, block_type: BlockType) -> bool {
    port.selection_touches_block(block_type)
}

/// Switch the selected blocks to `block_type`, or back to paragraphs if
/// they already are
///
/// Any list around the selection is unwrapped first, even for non-list
/// formats, so a heading never ends up inside a list and two list types are
/// never nested. List formats retype blocks to list items and then wrap them
/// in a fresh list container.
pub fn toggle_block<P: EditPort + ?Sized>(port: &mut P, block_type: BlockType) {
    let is_active = is_block_active(port, block_type);
    let is_list = block_type.is_list();

    port.apply(Cmd::UnwrapNodes {
        types: LIST_TYPES.to_vec(),
        split: true,
    });

    let new_type = if is_active {
        BlockType::Paragraph
    } else if is_list {
        BlockType::ListItem
    } else {
        block_type
    };
    port.apply(Cmd::SetBlockType {
        block_type: new_type,
    });

    if !is_active && is_list {
        port.apply(Cmd::WrapNodes { block_type });
    }
}
