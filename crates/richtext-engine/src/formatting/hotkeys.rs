//! Keyboard shortcuts for marks
//!
//! Chords are written like `"mod+b"`: `+`-separated modifiers followed by a
//! key, case-insensitive. `mod` is Cmd on macOS and Ctrl everywhere else.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::editing::EditPort;
use crate::formatting::toggle_mark;
use crate::model::Mark;

/// Mark shortcuts the editor surface listens for
pub const HOTKEYS: [Hotkey; 3] = [
    Hotkey::new(KeyChord::with_mod("b"), Mark::Bold),
    Hotkey::new(KeyChord::with_mod("i"), Mark::Italic),
    Hotkey::new(KeyChord::with_mod("u"), Mark::Underline),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HotkeyError {
    #[error("empty hotkey")]
    Empty,

    #[error("unknown modifier `{modifier}` in hotkey `{hotkey}`")]
    UnknownModifier { modifier: String, hotkey: String },

    #[error("hotkey `{0}` has no key")]
    MissingKey(String),
}

/// Which physical modifier `mod` stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }
}

/// Modifier keys held during a key press
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

/// A key-down event reduced to what chord matching needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPress {
    /// Key value as reported by the platform, e.g. `"b"`, `"B"`, `"Enter"`
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        KeyPress {
            key: key.into(),
            modifiers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    key: Cow<'static, str>,
    mod_key: bool,
    ctrl: bool,
    meta: bool,
    alt: bool,
    shift: bool,
}

impl KeyChord {
    /// `mod+<key>`
    pub const fn with_mod(key: &'static str) -> Self {
        KeyChord {
            key: Cow::Borrowed(key),
            mod_key: true,
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
        }
    }

    /// Modifiers the chord requires once `mod` is resolved for `platform`
    fn required(&self, platform: Platform) -> Modifiers {
        Modifiers {
            ctrl: self.ctrl || (self.mod_key && platform == Platform::Other),
            meta: self.meta || (self.mod_key && platform == Platform::Mac),
            alt: self.alt,
            shift: self.shift,
        }
    }

    /// Exact modifier match and case-insensitive key match
    pub fn matches(&self, press: &KeyPress, platform: Platform) -> bool {
        press.modifiers == self.required(platform) && press.key.eq_ignore_ascii_case(&self.key)
    }
}

impl FromStr for KeyChord {
    type Err = HotkeyError;

    fn from_str(hotkey: &str) -> Result<Self, Self::Err> {
        let normalized = hotkey.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(HotkeyError::Empty);
        }

        let mut segments: Vec<&str> = normalized.split('+').collect();
        let key = segments.pop().unwrap_or_default();
        if key.is_empty() || modifier_name(key).is_some() {
            return Err(HotkeyError::MissingKey(hotkey.to_string()));
        }

        let mut chord = KeyChord {
            key: Cow::Owned(key_alias(key).to_string()),
            mod_key: false,
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
        };
        for segment in segments {
            match modifier_name(segment) {
                Some("mod") => chord.mod_key = true,
                Some("ctrl") => chord.ctrl = true,
                Some("meta") => chord.meta = true,
                Some("alt") => chord.alt = true,
                Some("shift") => chord.shift = true,
                _ => {
                    return Err(HotkeyError::UnknownModifier {
                        modifier: segment.to_string(),
                        hotkey: hotkey.to_string(),
                    });
                }
            }
        }
        Ok(chord)
    }
}

fn modifier_name(segment: &str) -> Option<&'static str> {
    match segment {
        "mod" => Some("mod"),
        "ctrl" | "control" => Some("ctrl"),
        "meta" | "cmd" | "command" => Some("meta"),
        "alt" | "option" => Some("alt"),
        "shift" => Some("shift"),
        _ => None,
    }
}

fn key_alias(key: &str) -> &str {
    match key {
        "plus" | "add" => "+",
        "space" => " ",
        "esc" => "escape",
        "return" => "enter",
        other => other,
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let modifiers = [
            (self.mod_key, "mod"),
            (self.ctrl, "ctrl"),
            (self.meta, "meta"),
            (self.alt, "alt"),
            (self.shift, "shift"),
        ];
        for (held, name) in modifiers {
            if held {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(&self.key)
    }
}

/// A chord bound to the mark it toggles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    pub chord: KeyChord,
    pub mark: Mark,
}

impl Hotkey {
    pub const fn new(chord: KeyChord, mark: Mark) -> Self {
        Hotkey { chord, mark }
    }
}

/// What the surface should do with the key event after dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyOutcome {
    pub prevent_default: bool,
    pub toggled: Vec<Mark>,
}

/// Toggle the mark of every entry in [`HOTKEYS`] matching `press`
pub fn dispatch_hotkeys<P: EditPort + ?Sized>(
    port: &mut P,
    press: &KeyPress,
    platform: Platform,
) -> HotkeyOutcome {
    dispatch_with(&HOTKEYS, port, press, platform)
}

/// Toggle the mark of every entry in `hotkeys` matching `press`
///
/// Entries are checked independently; two matching entries both fire.
pub fn dispatch_with<P: EditPort + ?Sized>(
    hotkeys: &[Hotkey],
    port: &mut P,
    press: &KeyPress,
    platform: Platform,
) -> HotkeyOutcome {
    let mut outcome = HotkeyOutcome::default();
    for hotkey in hotkeys {
        if hotkey.chord.matches(press, platform) {
            outcome.prevent_default = true;
            toggle_mark(port, hotkey.mark);
            outcome.toggled.push(hotkey.mark);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Cmd, Patch};
    use crate::model::{BlockType, Marks};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[derive(Default)]
    struct CountingPort {
        applied: Vec<Cmd>,
    }

    impl EditPort for CountingPort {
        fn active_marks(&self) -> Option<Marks> {
            None
        }

        fn selection_touches_block(&self, _block_type: BlockType) -> bool {
            false
        }

        fn apply(&mut self, cmd: Cmd) -> Patch {
            self.applied.push(cmd);
            Patch {
                affected: 0,
                new_selection: None,
                version: 0,
            }
        }
    }

    fn ctrl() -> Modifiers {
        Modifiers {
            ctrl: true,
            ..Default::default()
        }
    }

    fn meta() -> Modifiers {
        Modifiers {
            meta: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_table_matches_parsed_chords() {
        let parsed: Vec<KeyChord> = ["mod+b", "mod+i", "mod+u"]
            .iter()
            .map(|hotkey| hotkey.parse().unwrap())
            .collect();
        let table: Vec<KeyChord> = HOTKEYS.iter().map(|h| h.chord.clone()).collect();
        assert_eq!(parsed, table);
    }

    #[rstest]
    #[case("b", ctrl(), Platform::Other, Some(Mark::Bold))]
    #[case("B", ctrl(), Platform::Other, Some(Mark::Bold))]
    #[case("i", meta(), Platform::Mac, Some(Mark::Italic))]
    #[case("u", ctrl(), Platform::Other, Some(Mark::Underline))]
    #[case("b", meta(), Platform::Other, None)]
    #[case("u", ctrl(), Platform::Mac, None)]
    #[case("b", Modifiers::default(), Platform::Other, None)]
    #[case("x", ctrl(), Platform::Other, None)]
    fn test_dispatch_table(
        #[case] key: &str,
        #[case] modifiers: Modifiers,
        #[case] platform: Platform,
        #[case] expected: Option<Mark>,
    ) {
        let mut port = CountingPort::default();
        let outcome = dispatch_hotkeys(&mut port, &KeyPress::new(key, modifiers), platform);

        assert_eq!(outcome.prevent_default, expected.is_some());
        assert_eq!(outcome.toggled, expected.into_iter().collect::<Vec<_>>());
        assert_eq!(
            port.applied,
            expected
                .map(|mark| Cmd::AddMark { mark })
                .into_iter()
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_extra_modifier_blocks_match() {
        let press = KeyPress::new(
            "b",
            Modifiers {
                ctrl: true,
                shift: true,
                ..Default::default()
            },
        );
        let mut port = CountingPort::default();
        assert_eq!(
            dispatch_hotkeys(&mut port, &press, Platform::Other),
            HotkeyOutcome::default()
        );
    }

    #[test]
    fn test_colliding_entries_fire_independently() {
        let hotkeys = [
            Hotkey::new(KeyChord::with_mod("b"), Mark::Bold),
            Hotkey::new("ctrl+b".parse().unwrap(), Mark::Input),
        ];
        let mut port = CountingPort::default();
        let outcome = dispatch_with(
            &hotkeys,
            &mut port,
            &KeyPress::new("b", ctrl()),
            Platform::Other,
        );

        assert!(outcome.prevent_default);
        assert_eq!(outcome.toggled, vec![Mark::Bold, Mark::Input]);
        assert_eq!(port.applied.len(), 2);
    }

    #[test]
    fn test_parse_aliases_and_display() {
        let chord: KeyChord = "Cmd+Option+Shift+Plus".parse().unwrap();
        assert_eq!(chord.to_string(), "meta+alt+shift++");
        assert_eq!("control+return".parse::<KeyChord>().unwrap().to_string(), "ctrl+enter");
    }

    #[rstest]
    #[case("", HotkeyError::Empty)]
    #[case("  ", HotkeyError::Empty)]
    #[case("mod+", HotkeyError::MissingKey("mod+".to_string()))]
    #[case("mod+shift", HotkeyError::MissingKey("mod+shift".to_string()))]
    #[case(
        "hyper+b",
        HotkeyError::UnknownModifier { modifier: "hyper".to_string(), hotkey: "hyper+b".to_string() }
    )]
    #[case(
        "mod+a+b",
        HotkeyError::UnknownModifier { modifier: "a".to_string(), hotkey: "mod+a+b".to_string() }
    )]
    fn test_parse_errors(#[case] hotkey: &str, #[case] expected: HotkeyError) {
        assert_eq!(hotkey.parse::<KeyChord>(), Err(expected));
    }
}
