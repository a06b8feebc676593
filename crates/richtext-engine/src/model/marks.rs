use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

/// Character-level formatting flags
///
/// Declaration order is the render nesting order: bold innermost, input
/// highlight outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    /// Custom inline annotation rendered as a highlighted input field
    Input,
}

impl Mark {
    pub const ALL: [Mark; 4] = [Mark::Bold, Mark::Italic, Mark::Underline, Mark::Input];

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::Bold => "bold",
            Mark::Italic => "italic",
            Mark::Underline => "underline",
            Mark::Input => "input",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mark: {0}")]
pub struct UnknownMark(pub String);

impl FromStr for Mark {
    type Err = UnknownMark;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mark::ALL
            .into_iter()
            .find(|mark| mark.as_str() == s)
            .ok_or_else(|| UnknownMark(s.to_string()))
    }
}

/// Set of marks that are on for a text run
///
/// Only present marks are stored, so "off" and "never set" are the same
/// state. Serializes as `{"bold": true, ...}` next to the run's text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Marks(BTreeSet<Mark>);

impl Marks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, mark: Mark) -> bool {
        self.0.contains(&mark)
    }

    pub fn insert(&mut self, mark: Mark) {
        self.0.insert(mark);
    }

    pub fn remove(&mut self, mark: Mark) {
        self.0.remove(&mark);
    }

    pub fn with(mut self, mark: Mark) -> Self {
        self.insert(mark);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Marks in render nesting order
    pub fn iter(&self) -> impl Iterator<Item = Mark> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Mark> for Marks {
    fn from_iter<I: IntoIterator<Item = Mark>>(iter: I) -> Self {
        Marks(iter.into_iter().collect())
    }
}

impl Serialize for Marks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|mark| (mark.as_str(), true)))
    }
}

impl<'de> Deserialize<'de> for Marks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter(|(_, value)| *value == serde_json::Value::Bool(true))
            .filter_map(|(key, _)| key.parse::<Mark>().ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_removed_mark_is_absent_not_false() {
        let mut marks = Marks::new().with(Mark::Bold);
        marks.remove(Mark::Bold);

        assert!(marks.is_empty());
        assert_eq!(serde_json::to_string(&marks).unwrap(), "{}");
    }

    #[test]
    fn test_iteration_follows_nesting_order() {
        let marks: Marks = [Mark::Input, Mark::Italic, Mark::Bold].into_iter().collect();
        let order: Vec<_> = marks.iter().collect();
        assert_eq!(order, vec![Mark::Bold, Mark::Italic, Mark::Input]);
    }

    #[test]
    fn test_deserialize_keeps_only_true_known_marks() {
        let marks: Marks = serde_json::from_str(
            r#"{"bold": true, "italic": false, "underline": "yes", "strike": true}"#,
        )
        .unwrap();
        assert_eq!(marks, Marks::new().with(Mark::Bold));
    }

    #[test]
    fn test_parse_mark_names() {
        assert_eq!("input".parse::<Mark>(), Ok(Mark::Input));
        assert_eq!(
            "Bold".parse::<Mark>(),
            Err(UnknownMark("Bold".to_string()))
        );
    }
}
