//! Toolbar and keyboard formatting rules
//!
//! Everything here is written against [`EditPort`](crate::editing::EditPort)
//! and holds no state of its own.

pub mod hotkeys;
pub mod toggle;

pub use hotkeys::{
    HOTKEYS, Hotkey, HotkeyError, HotkeyOutcome, KeyChord, KeyPress, Modifiers, Platform,
    dispatch_hotkeys, dispatch_with,
};
pub use toggle::{is_block_active, is_mark_active, toggle_block, toggle_mark};
