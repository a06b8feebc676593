use crate::editing::transforms::{self, Bias};
use crate::editing::{Cmd, EditPort, Patch, Point, Selection};
use crate::model::{BlockType, Document, Mark, Marks, Path};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    #[error("no text run at {path}")]
    NotAText { path: Path },

    #[error("offset {offset} is past the end of the run at {path} (length {len})")]
    OffsetOutOfRange { path: Path, offset: usize, len: usize },
}

/// In-memory editing state: the document, the selection and cursor marks
///
/// Implements [`EditPort`] with the structural edits the toggle rules need.
/// Every command runs to completion inside one `&mut self` call, so no
/// intermediate tree is ever observable.
///
/// ```rust
/// # use richtext_engine::editing::{Editor, Point, Selection};
/// # use richtext_engine::formatting::toggle_block;
/// # use richtext_engine::model::{BlockType, Document, Node};
/// let document = Document::new(vec![Node::element(BlockType::Paragraph, vec![Node::text("a")])]);
/// let mut editor = Editor::new(document);
/// editor.select(Selection::collapsed(Point::new([0, 0], 0))).unwrap();
///
/// toggle_block(&mut editor, BlockType::HeadingOne);
/// assert_eq!(
///     editor.document().children[0].as_element().unwrap().block_type,
///     BlockType::HeadingOne
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Editor {
    document: Document,
    selection: Option<Selection>,
    /// Marks recorded at a collapsed cursor by add/remove mark
    pending_marks: Option<Marks>,
    version: u64,
}

impl Editor {
    pub fn new(document: Document) -> Self {
        Editor {
            document,
            ..Default::default()
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the selection; clears cursor marks
    pub fn select(&mut self, selection: Selection) -> Result<(), EditorError> {
        self.check_point(&selection.anchor)?;
        self.check_point(&selection.focus)?;
        self.selection = Some(selection);
        self.pending_marks = None;
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.selection = None;
        self.pending_marks = None;
    }

    pub fn select_all(&mut self) {
        let paths = self.document.text_paths();
        let (Some(first), Some(last)) = (paths.first(), paths.last()) else {
            self.deselect();
            return;
        };
        let end = self.document.text(last).map_or(0, |run| run.len());
        self.selection = Some(Selection::new(
            Point::new(first.clone(), 0),
            Point::new(last.clone(), end),
        ));
        self.pending_marks = None;
    }

    /// Select the whole text run at `path`
    pub fn select_run(&mut self, path: &Path) -> Result<(), EditorError> {
        let len = self.run_len(path)?;
        self.select(Selection::new(
            Point::new(path.clone(), 0),
            Point::new(path.clone(), len),
        ))
    }

    /// Extend the selection over whole runs from the anchor's run to the run
    /// at `path`
    ///
    /// Extending backward moves the anchor to the end of its run, so the run
    /// first clicked stays selected.
    pub fn extend_to_run(&mut self, path: &Path) -> Result<(), EditorError> {
        let len = self.run_len(path)?;
        let Some(anchor_path) = self.selection.as_ref().map(|s| s.anchor.path.clone()) else {
            return self.select_run(path);
        };
        let anchor_len = self.run_len(&anchor_path)?;
        let (anchor, focus) = if path.compare(&anchor_path).is_lt() {
            (
                Point::new(anchor_path, anchor_len),
                Point::new(path.clone(), 0),
            )
        } else {
            (Point::new(anchor_path, 0), Point::new(path.clone(), len))
        };
        self.select(Selection::new(anchor, focus))
    }

    /// Whether any char of the run at `path` lies inside an expanded selection
    pub fn is_run_selected(&self, path: &Path) -> bool {
        let Some(selection) = self.selection.as_ref().filter(|s| !s.is_collapsed()) else {
            return false;
        };
        let Some(len) = self.document.text(path).map(|run| run.len()) else {
            return false;
        };
        let (start, end) = selection.edges();
        let from = if *path == start.path { start.offset } else { 0 };
        let to = if *path == end.path { end.offset } else { len };
        path.compare(&start.path).is_ge() && path.compare(&end.path).is_le() && from < to
    }

    /// Marks active at the selection
    ///
    /// Cursor marks win; an expanded selection reports its first run (skipping
    /// a run the selection only touches at its end); a collapsed cursor at the
    /// start of a run reports the previous run in the same block.
    pub fn marks(&self) -> Option<Marks> {
        let selection = self.selection.as_ref()?;
        if let Some(marks) = &self.pending_marks {
            return Some(marks.clone());
        }

        let paths = self.document.text_paths();
        if !selection.is_collapsed() {
            let (start, _) = selection.edges();
            let index = paths.iter().position(|path| *path == start.path)?;
            let at_run_end = self
                .document
                .text(&start.path)
                .is_some_and(|run| start.offset >= run.len());
            let path = if at_run_end {
                paths.get(index + 1).or(paths.get(index))?
            } else {
                &paths[index]
            };
            return self.document.text(path).map(|run| run.marks.clone());
        }

        let anchor = &selection.anchor;
        let mut run = self.document.text(&anchor.path)?;
        if anchor.offset == 0 {
            let previous = paths
                .iter()
                .position(|path| *path == anchor.path)
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| paths.get(index))
                .filter(|previous| previous.parent() == anchor.path.parent())
                .and_then(|previous| self.document.text(previous));
            if let Some(previous) = previous {
                run = previous;
            }
        }
        Some(run.marks.clone())
    }

    fn run_len(&self, path: &Path) -> Result<usize, EditorError> {
        self.document
            .text(path)
            .map(|run| run.len())
            .ok_or_else(|| EditorError::NotAText { path: path.clone() })
    }

    fn check_point(&self, point: &Point) -> Result<(), EditorError> {
        let len = self.run_len(&point.path)?;
        if point.offset > len {
            return Err(EditorError::OffsetOutOfRange {
                path: point.path.clone(),
                offset: point.offset,
                len,
            });
        }
        Ok(())
    }

    /// Run a block-level transform, carrying the selection by run ordinal
    ///
    /// The transform sees the unhung range; the selection itself is kept as is.
    fn reshape(
        &mut self,
        selection: &Selection,
        edit: impl FnOnce(&mut Document, transforms::LeafPoint, transforms::LeafPoint) -> usize,
    ) -> usize {
        let (first, last) = selection.edges();
        let last = transforms::unhang(&self.document, first, last);
        let (Some(anchor), Some(focus), Some(start), Some(end)) = (
            transforms::leaf_point(&self.document, &selection.anchor),
            transforms::leaf_point(&self.document, &selection.focus),
            transforms::leaf_point(&self.document, first),
            transforms::leaf_point(&self.document, &last),
        ) else {
            return 0;
        };

        let affected = edit(&mut self.document, start, end);

        self.selection = match (
            transforms::point_from_leaf(&self.document, anchor),
            transforms::point_from_leaf(&self.document, focus),
        ) {
            (Some(anchor), Some(focus)) => Some(Selection::new(anchor, focus)),
            _ => None,
        };
        affected
    }

    /// Add or remove a mark; a collapsed cursor only records cursor marks
    fn mark_selection(&mut self, selection: &Selection, mark: Mark, on: bool) -> usize {
        if selection.is_collapsed() {
            let mut marks = self.marks().unwrap_or_default();
            if on {
                marks.insert(mark);
            } else {
                marks.remove(mark);
            }
            self.pending_marks = Some(marks);
            return 0;
        }

        let (start, end) = selection.edges();
        let (Some(start_at), Some(end_at)) = (
            transforms::block_point(&self.document, start),
            transforms::block_point(&self.document, end),
        ) else {
            return 0;
        };

        let affected = transforms::set_mark(&mut self.document, start, end, mark, on);

        let start = transforms::point_from_block(&self.document, start_at, Bias::Forward);
        let end = transforms::point_from_block(&self.document, end_at, Bias::Backward);
        if let (Some(start), Some(end)) = (start, end) {
            self.selection = Some(if selection.is_backward() {
                Selection::new(end, start)
            } else {
                Selection::new(start, end)
            });
        }
        affected
    }
}

impl EditPort for Editor {
    fn active_marks(&self) -> Option<Marks> {
        self.marks()
    }

    fn selection_touches_block(&self, block_type: BlockType) -> bool {
        let Some(selection) = &self.selection else {
            return false;
        };
        let (start, end) = selection.edges();
        transforms::touches_block(&self.document, &start.path, &end.path, block_type)
    }

    fn apply(&mut self, cmd: Cmd) -> Patch {
        let Some(selection) = self.selection.clone() else {
            return Patch {
                affected: 0,
                new_selection: None,
                version: self.version,
            };
        };

        let affected = match cmd {
            Cmd::UnwrapNodes { types, split } => {
                self.reshape(&selection, |document, start, end| {
                    transforms::unwrap_nodes(document, start, end, &types, split)
                })
            }
            Cmd::SetBlockType { block_type } => {
                self.reshape(&selection, |document, start, end| {
                    transforms::set_block_type(document, start, end, block_type)
                })
            }
            Cmd::WrapNodes { block_type } => self.reshape(&selection, |document, start, end| {
                transforms::wrap_nodes(document, start, end, block_type)
            }),
            Cmd::AddMark { mark } => self.mark_selection(&selection, mark, true),
            Cmd::RemoveMark { mark } => self.mark_selection(&selection, mark, false),
        };

        self.version += 1;
        Patch {
            affected,
            new_selection: self.selection.clone(),
            version: self.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Node;
    use pretty_assertions::assert_eq;

    fn editor() -> Editor {
        Editor::new(Document::new(vec![
            Node::element(
                BlockType::Paragraph,
                vec![Node::text("plain "), Node::marked("bold", &[Mark::Bold])],
            ),
            Node::element(BlockType::Paragraph, vec![Node::marked("it", &[Mark::Italic])]),
        ]))
    }

    #[test]
    fn test_marks_absent_without_selection() {
        assert_eq!(editor().marks(), None);
    }

    #[test]
    fn test_collapsed_marks_use_previous_run_at_offset_zero() {
        let mut editor = editor();
        editor
            .select(Selection::collapsed(Point::new([0, 1], 0)))
            .unwrap();
        assert_eq!(editor.marks(), Some(Marks::new()));

        editor
            .select(Selection::collapsed(Point::new([0, 1], 2)))
            .unwrap();
        assert_eq!(editor.marks(), Some(Marks::new().with(Mark::Bold)));
    }

    #[test]
    fn test_collapsed_marks_do_not_cross_blocks() {
        let mut editor = editor();
        editor
            .select(Selection::collapsed(Point::new([1, 0], 0)))
            .unwrap();
        assert_eq!(editor.marks(), Some(Marks::new().with(Mark::Italic)));
    }

    #[test]
    fn test_expanded_marks_skip_run_touched_at_its_end() {
        let mut editor = editor();
        editor
            .select(Selection::new(Point::new([0, 0], 6), Point::new([0, 1], 4)))
            .unwrap();
        assert_eq!(editor.marks(), Some(Marks::new().with(Mark::Bold)));
    }

    #[test]
    fn test_collapsed_add_mark_records_cursor_marks_only() {
        let mut editor = editor();
        editor
            .select(Selection::collapsed(Point::new([0, 0], 2)))
            .unwrap();
        let before = editor.document().clone();

        let patch = editor.apply(Cmd::AddMark {
            mark: Mark::Underline,
        });

        assert!(patch.is_noop());
        assert_eq!(editor.document(), &before);
        assert_eq!(editor.marks(), Some(Marks::new().with(Mark::Underline)));

        editor
            .select(Selection::collapsed(Point::new([0, 0], 2)))
            .unwrap();
        assert_eq!(editor.marks(), Some(Marks::new()));
    }

    #[test]
    fn test_expanded_mark_keeps_selection_over_same_chars() {
        let mut editor = editor();
        editor
            .select(Selection::new(Point::new([0, 0], 2), Point::new([0, 0], 4)))
            .unwrap();

        let patch = editor.apply(Cmd::AddMark { mark: Mark::Input });

        assert_eq!(patch.affected, 1);
        assert_eq!(
            editor.document().children[0].children(),
            &[
                Node::text("pl"),
                Node::marked("ai", &[Mark::Input]),
                Node::text("n "),
                Node::marked("bold", &[Mark::Bold]),
            ]
        );
        assert_eq!(
            editor.selection(),
            Some(&Selection::new(Point::new([0, 1], 0), Point::new([0, 1], 2)))
        );
    }

    #[test]
    fn test_backward_selection_stays_backward() {
        let mut editor = editor();
        editor
            .select(Selection::new(Point::new([0, 1], 4), Point::new([0, 0], 0)))
            .unwrap();

        editor.apply(Cmd::AddMark { mark: Mark::Bold });

        assert_eq!(
            editor.document().children[0].children(),
            &[Node::marked("plain bold", &[Mark::Bold])]
        );
        assert_eq!(
            editor.selection(),
            Some(&Selection::new(Point::new([0, 0], 10), Point::new([0, 0], 0)))
        );
    }

    #[test]
    fn test_select_rejects_bad_points() {
        let mut editor = editor();
        assert_eq!(
            editor.select(Selection::collapsed(Point::new([0], 0))),
            Err(EditorError::NotAText {
                path: Path::from([0])
            })
        );
        assert_eq!(
            editor.select(Selection::collapsed(Point::new([1, 0], 3))),
            Err(EditorError::OffsetOutOfRange {
                path: Path::from([1, 0]),
                offset: 3,
                len: 2,
            })
        );
    }

    #[test]
    fn test_commands_without_selection_are_noops() {
        let mut editor = editor();
        let patch = editor.apply(Cmd::SetBlockType {
            block_type: BlockType::HeadingTwo,
        });
        assert!(patch.is_noop());
        assert_eq!(patch.version, 0);
        assert_eq!(editor, self::editor());
    }

    #[test]
    fn test_run_selection_helpers() {
        let mut editor = editor();
        editor.select_run(&Path::from([0, 1])).unwrap();
        assert!(editor.is_run_selected(&Path::from([0, 1])));
        assert!(!editor.is_run_selected(&Path::from([0, 0])));

        editor.extend_to_run(&Path::from([1, 0])).unwrap();
        assert_eq!(
            editor.selection(),
            Some(&Selection::new(Point::new([0, 1], 0), Point::new([1, 0], 2)))
        );
        assert!(editor.is_run_selected(&Path::from([1, 0])));

        editor.extend_to_run(&Path::from([0, 0])).unwrap();
        assert_eq!(
            editor.selection(),
            Some(&Selection::new(Point::new([0, 1], 4), Point::new([0, 0], 0)))
        );
        assert!(editor.is_run_selected(&Path::from([0, 0])));
        assert!(editor.is_run_selected(&Path::from([0, 1])));
    }

    #[test]
    fn test_hanging_end_leaves_its_block_alone() {
        let mut editor = editor();
        let selection = Selection::new(Point::new([0, 0], 0), Point::new([1, 0], 0));
        editor.select(selection.clone()).unwrap();

        let patch = editor.apply(Cmd::SetBlockType {
            block_type: BlockType::HeadingTwo,
        });

        assert_eq!(patch.affected, 1);
        let types: Vec<BlockType> = editor
            .document()
            .children
            .iter()
            .filter_map(|node| node.as_element().map(|e| e.block_type))
            .collect();
        assert_eq!(types, vec![BlockType::HeadingTwo, BlockType::Paragraph]);
        assert_eq!(editor.selection(), Some(&selection));
    }

    #[test]
    fn test_select_all_spans_document() {
        let mut editor = editor();
        editor.select_all();
        assert_eq!(
            editor.selection(),
            Some(&Selection::new(Point::new([0, 0], 0), Point::new([1, 0], 2)))
        );
    }
}
