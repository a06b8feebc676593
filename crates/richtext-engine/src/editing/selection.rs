use std::cmp::Ordering;

use crate::model::Path;

/// A caret position: a text run and a char offset inside it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    pub path: Path,
    pub offset: usize,
}

impl Point {
    pub fn new(path: impl Into<Path>, offset: usize) -> Self {
        Point {
            path: path.into(),
            offset,
        }
    }

    pub fn compare(&self, other: &Point) -> Ordering {
        self.path
            .compare(&other.path)
            .then(self.offset.cmp(&other.offset))
    }
}

/// Anchor/focus pair; focus may come before anchor for backward selections
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
}

impl Selection {
    pub fn new(anchor: Point, focus: Point) -> Self {
        Selection { anchor, focus }
    }

    pub fn collapsed(point: Point) -> Self {
        Selection {
            anchor: point.clone(),
            focus: point,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn is_backward(&self) -> bool {
        self.anchor.compare(&self.focus) == Ordering::Greater
    }

    /// `(start, end)` in document order
    pub fn edges(&self) -> (&Point, &Point) {
        if self.is_backward() {
            (&self.focus, &self.anchor)
        } else {
            (&self.anchor, &self.focus)
        }
    }
}
