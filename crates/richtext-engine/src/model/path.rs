use std::cmp::Ordering;
use std::fmt;

/// Child indices from the document root down to a node
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<usize>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn new(indices: impl Into<Vec<usize>>) -> Self {
        Path(indices.into())
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }

    pub fn child(&self, index: usize) -> Path {
        let mut indices = self.0.clone();
        indices.push(index);
        Path(indices)
    }

    pub fn parent(&self) -> Option<Path> {
        let (_, parent) = self.0.split_last()?;
        Some(Path(parent.to_vec()))
    }

    /// True when `self` is a strict prefix of `other`
    pub fn is_ancestor_of(&self, other: &Path) -> bool {
        self.len() < other.len() && other.0.starts_with(&self.0)
    }

    /// Longest shared prefix
    pub fn common(&self, other: &Path) -> Path {
        Path(
            self.0
                .iter()
                .zip(other.0.iter())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| *a)
                .collect(),
        )
    }

    /// Document-order comparison where a path and its ancestors compare equal
    pub fn compare(&self, other: &Path) -> Ordering {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a.cmp(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl From<Vec<usize>> for Path {
    fn from(indices: Vec<usize>) -> Self {
        Path(indices)
    }
}

impl<const N: usize> From<[usize; N]> for Path {
    fn from(indices: [usize; N]) -> Self {
        Path(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}
