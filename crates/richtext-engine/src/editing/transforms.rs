//! Tree transforms behind the in-memory editor's commands
//!
//! Block reshaping (unwrap, retype, wrap) never splits or merges text runs,
//! so a point addressed by run ordinal ([`LeafPoint`]) survives it. Mark
//! edits split and merge runs but never move them between blocks, so a
//! point addressed by block ordinal and char offset ([`BlockPoint`])
//! survives those.

use std::cmp::Ordering;

use crate::editing::Point;
use crate::model::{BlockType, Document, ElementNode, Mark, Node, Path, TextNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LeafPoint {
    pub leaf: usize,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockPoint {
    pub block: usize,
    pub offset: usize,
}

/// Which run wins when a block offset falls on a boundary between two runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bias {
    Backward,
    Forward,
}

pub(crate) fn leaf_point(document: &Document, point: &Point) -> Option<LeafPoint> {
    let leaf = document
        .text_paths()
        .iter()
        .position(|path| *path == point.path)?;
    Some(LeafPoint {
        leaf,
        offset: point.offset,
    })
}

pub(crate) fn point_from_leaf(document: &Document, point: LeafPoint) -> Option<Point> {
    let path = document.text_paths().into_iter().nth(point.leaf)?;
    Some(Point {
        path,
        offset: point.offset,
    })
}

fn leaf_paths(document: &Document, start: LeafPoint, end: LeafPoint) -> Option<(Path, Path)> {
    let paths = document.text_paths();
    Some((paths.get(start.leaf)?.clone(), paths.get(end.leaf)?.clone()))
}

/// Text run paths grouped by the block that holds them
fn text_blocks(document: &Document) -> Vec<Vec<Path>> {
    let mut blocks: Vec<Vec<Path>> = Vec::new();
    for path in document.text_paths() {
        match blocks.last_mut() {
            Some(runs) if runs.last().and_then(Path::parent) == path.parent() => runs.push(path),
            _ => blocks.push(vec![path]),
        }
    }
    blocks
}

fn run_len(document: &Document, path: &Path) -> usize {
    document.text(path).map_or(0, TextNode::len)
}

pub(crate) fn block_point(document: &Document, point: &Point) -> Option<BlockPoint> {
    for (block, runs) in text_blocks(document).iter().enumerate() {
        let mut offset = 0;
        for path in runs {
            if *path == point.path {
                return Some(BlockPoint {
                    block,
                    offset: offset + point.offset,
                });
            }
            offset += run_len(document, path);
        }
    }
    None
}

pub(crate) fn point_from_block(document: &Document, point: BlockPoint, bias: Bias) -> Option<Point> {
    let blocks = text_blocks(document);
    let runs = blocks.get(point.block)?;
    let mut start = 0;
    for (index, path) in runs.iter().enumerate() {
        let len = run_len(document, path);
        let at_boundary = point.offset == start + len;
        if point.offset < start + len
            || (at_boundary && (bias == Bias::Backward || index + 1 == runs.len()))
        {
            return Some(Point {
                path: path.clone(),
                offset: point.offset - start,
            });
        }
        start += len;
    }
    None
}

/// Nodes touched by the span between two text paths, ancestors included
pub(crate) fn nodes_in_range<'a>(
    document: &'a Document,
    start: &Path,
    end: &Path,
) -> Vec<(Path, &'a Node)> {
    document
        .descendants()
        .into_iter()
        .filter(|(path, _)| {
            path.compare(start) != Ordering::Less && path.compare(end) != Ordering::Greater
        })
        .collect()
}

/// Matching containers in range that have no matching container below them
pub(crate) fn lowest_matching(
    document: &Document,
    start: &Path,
    end: &Path,
    predicate: impl Fn(&ElementNode) -> bool,
) -> Vec<Path> {
    let matched: Vec<Path> = nodes_in_range(document, start, end)
        .into_iter()
        .filter(|(_, node)| node.as_element().is_some_and(&predicate))
        .map(|(path, _)| path)
        .collect();
    matched
        .iter()
        .filter(|path| !matched.iter().any(|other| path.is_ancestor_of(other)))
        .cloned()
        .collect()
}

pub(crate) fn touches_block(
    document: &Document,
    start: &Path,
    end: &Path,
    block_type: BlockType,
) -> bool {
    nodes_in_range(document, start, end)
        .into_iter()
        .any(|(_, node)| node.as_element().is_some_and(|e| e.block_type == block_type))
}

pub(crate) fn unwrap_nodes(
    document: &mut Document,
    start: LeafPoint,
    end: LeafPoint,
    types: &[BlockType],
    split: bool,
) -> usize {
    let Some((start_path, end_path)) = leaf_paths(document, start, end) else {
        return 0;
    };
    let containers = lowest_matching(document, &start_path, &end_path, |element| {
        types.contains(&element.block_type)
    });

    // Back to front: promoting children only shifts paths after the container
    let mut affected = 0;
    for container in containers.into_iter().rev() {
        let Some((start_path, end_path)) = leaf_paths(document, start, end) else {
            break;
        };
        let bounds = split.then_some((&start_path, &end_path));
        affected += lift_children(document, &container, bounds);
    }
    affected
}

/// Promote a container's children into its parent, splitting the container
/// around the children inside `bounds`
fn lift_children(document: &mut Document, container: &Path, bounds: Option<(&Path, &Path)>) -> usize {
    let Some(child_count) = document.element(container).map(|e| e.children.len()) else {
        return 0;
    };
    let last_child = child_count.saturating_sub(1);
    let depth = container.len();
    let (first, last) = match bounds {
        Some((start, end)) => (
            if container.is_ancestor_of(start) {
                start.indices()[depth]
            } else {
                0
            },
            if container.is_ancestor_of(end) {
                end.indices()[depth]
            } else {
                last_child
            },
        ),
        None => (0, last_child),
    };

    let (Some(parent), Some(index)) = (container.parent(), container.last()) else {
        return 0;
    };
    let Some(siblings) = document.children_mut(&parent) else {
        return 0;
    };
    let (block_type, mut children) = match siblings.remove(index) {
        Node::Element(element) => (element.block_type, element.children),
        text => {
            siblings.insert(index, text);
            return 0;
        }
    };

    let trailing = children.split_off((last + 1).min(children.len()));
    let promoted = children.split_off(first.min(children.len()));
    let leading = children;
    let promoted_count = promoted.len();

    let mut replacement = Vec::with_capacity(promoted_count + 2);
    if !leading.is_empty() {
        replacement.push(Node::element(block_type, leading));
    }
    replacement.extend(promoted);
    if !trailing.is_empty() {
        replacement.push(Node::element(block_type, trailing));
    }
    siblings.splice(index..index, replacement);
    promoted_count
}

pub(crate) fn set_block_type(
    document: &mut Document,
    start: LeafPoint,
    end: LeafPoint,
    block_type: BlockType,
) -> usize {
    let Some((start_path, end_path)) = leaf_paths(document, start, end) else {
        return 0;
    };
    let blocks = lowest_matching(document, &start_path, &end_path, |_| true);
    let mut affected = 0;
    for path in blocks {
        if let Some(Node::Element(element)) = document.node_mut(&path) {
            element.block_type = block_type;
            affected += 1;
        }
    }
    affected
}

/// Wrap the selected blocks in a new `block_type` container
///
/// Blocks nested below the level of the common ancestor are first lifted out
/// of their parents, so every wrapped node is one of the selected blocks.
pub(crate) fn wrap_nodes(
    document: &mut Document,
    start: LeafPoint,
    end: LeafPoint,
    block_type: BlockType,
) -> usize {
    let Some(common) = wrap_parent(document, start, end) else {
        return 0;
    };
    let depth = common.len();

    while let Some(deep) = lowest_blocks(document, start, end)
        .into_iter()
        .find(|path| path.len() > depth + 1)
    {
        let Some(parent) = deep.parent() else {
            break;
        };
        if lift_children(document, &parent, Some((&deep, &deep))) == 0 {
            break;
        }
    }

    let blocks = lowest_blocks(document, start, end);
    let (Some(first), Some(last)) = (blocks.first(), blocks.last()) else {
        return 0;
    };
    let (Some(&from), Some(&to)) = (first.indices().get(depth), last.indices().get(depth)) else {
        return 0;
    };
    let Some(siblings) = document.children_mut(&common) else {
        return 0;
    };
    let wrapped: Vec<Node> = siblings.drain(from..=to).collect();
    siblings.insert(from, Node::element(block_type, wrapped));
    1
}

fn lowest_blocks(document: &Document, start: LeafPoint, end: LeafPoint) -> Vec<Path> {
    leaf_paths(document, start, end)
        .map(|(start_path, end_path)| lowest_matching(document, &start_path, &end_path, |_| true))
        .unwrap_or_default()
}

/// Container whose children the new wrapper replaces
fn wrap_parent(document: &Document, start: LeafPoint, end: LeafPoint) -> Option<Path> {
    let blocks = lowest_blocks(document, start, end);
    let (first, last) = (blocks.first()?, blocks.last()?);
    if first == last {
        Some(first.parent().unwrap_or_default())
    } else {
        Some(first.common(last))
    }
}

/// Pull back the end of a range that stops at offset 0 of a later run
///
/// Such a range touches the end run's block without holding any of its
/// chars. The end moves to the close of the previous run that is non-empty
/// or lies in an earlier block.
pub(crate) fn unhang(document: &Document, start: &Point, end: &Point) -> Point {
    if start.offset != 0 || end.offset != 0 || start.path == end.path {
        return end.clone();
    }
    let block = end.path.parent().unwrap_or_default();
    document
        .text_paths()
        .into_iter()
        .filter(|path| {
            path.compare(&start.path) != Ordering::Less && path.compare(&end.path) == Ordering::Less
        })
        .rev()
        .find(|path| run_len(document, path) > 0 || path.compare(&block) == Ordering::Less)
        .map(|path| {
            let offset = run_len(document, &path);
            Point { path, offset }
        })
        .unwrap_or_else(|| end.clone())
}

/// Turn `mark` on or off for exactly the chars between `start` and `end`
pub(crate) fn set_mark(
    document: &mut Document,
    start: &Point,
    end: &Point,
    mark: Mark,
    on: bool,
) -> usize {
    let runs: Vec<Path> = document
        .text_paths()
        .into_iter()
        .filter(|path| {
            path.compare(&start.path) != Ordering::Less
                && path.compare(&end.path) != Ordering::Greater
        })
        .collect();

    let mut parents: Vec<Path> = Vec::new();
    let mut affected = 0;
    // Back to front: splitting a run only shifts its later siblings
    for path in runs.into_iter().rev() {
        let Some(run) = document.text(&path).cloned() else {
            continue;
        };
        let len = run.len();
        let from = if path == start.path { start.offset.min(len) } else { 0 };
        let to = if path == end.path { end.offset.min(len) } else { len };
        if from >= to {
            continue;
        }

        let (head, rest) = run.split_at(from);
        let (mut middle, tail) = rest.split_at(to - from);
        if on {
            middle.marks.insert(mark);
        } else {
            middle.marks.remove(mark);
        }

        let (Some(parent), Some(index)) = (path.parent(), path.last()) else {
            continue;
        };
        let Some(siblings) = document.children_mut(&parent) else {
            continue;
        };
        let pieces = [head, middle, tail]
            .into_iter()
            .filter(|piece| !piece.is_empty())
            .map(Node::Text);
        siblings.splice(index..=index, pieces);
        affected += 1;
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    for parent in &parents {
        merge_runs(document, parent);
    }
    affected
}

/// Merge adjacent runs with identical marks and absorb empty runs
fn merge_runs(document: &mut Document, parent: &Path) {
    let Some(children) = document.children_mut(parent) else {
        return;
    };
    let mut merged: Vec<Node> = Vec::with_capacity(children.len());
    for node in children.drain(..) {
        if let (Some(Node::Text(prev)), Node::Text(next)) = (merged.last_mut(), &node) {
            if prev.marks == next.marks || next.text.is_empty() {
                prev.text.push_str(&next.text);
                continue;
            }
            if prev.text.is_empty() {
                *prev = next.clone();
                continue;
            }
        }
        merged.push(node);
    }
    *children = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Marks;
    use pretty_assertions::assert_eq;

    fn two_runs() -> Document {
        Document::new(vec![
            Node::element(
                BlockType::Paragraph,
                vec![Node::text("ab"), Node::marked("cd", &[Mark::Bold])],
            ),
            Node::element(BlockType::Paragraph, vec![Node::text("ef")]),
        ])
    }

    #[test]
    fn test_block_point_bias_at_run_boundary() {
        let document = two_runs();
        let boundary = BlockPoint {
            block: 0,
            offset: 2,
        };

        assert_eq!(
            point_from_block(&document, boundary, Bias::Backward),
            Some(Point::new([0, 0], 2))
        );
        assert_eq!(
            point_from_block(&document, boundary, Bias::Forward),
            Some(Point::new([0, 1], 0))
        );
        assert_eq!(
            block_point(&document, &Point::new([0, 1], 1)),
            Some(BlockPoint {
                block: 0,
                offset: 3
            })
        );
    }

    #[test]
    fn test_nodes_in_range_includes_ancestors() {
        let document = two_runs();
        let paths: Vec<Path> = nodes_in_range(&document, &Path::from([0, 1]), &Path::from([1, 0]))
            .into_iter()
            .map(|(path, _)| path)
            .collect();

        assert_eq!(
            paths,
            vec![
                Path::from([0]),
                Path::from([0, 1]),
                Path::from([1]),
                Path::from([1, 0]),
            ]
        );
    }

    #[test]
    fn test_lowest_matching_skips_ancestors_of_matches() {
        let document = Document::new(vec![Node::element(
            BlockType::BlockQuote,
            vec![Node::element(BlockType::Paragraph, vec![Node::text("a")])],
        )]);
        let start = Path::from([0, 0, 0]);
        assert_eq!(
            lowest_matching(&document, &start, &start, |_| true),
            vec![Path::from([0, 0])]
        );
    }

    #[test]
    fn test_set_mark_splits_then_merges() {
        let mut document = two_runs();
        let affected = set_mark(
            &mut document,
            &Point::new([0, 0], 1),
            &Point::new([0, 1], 1),
            Mark::Bold,
            true,
        );

        assert_eq!(affected, 2);
        assert_eq!(
            document.children[0].children(),
            &[Node::text("a"), Node::marked("bcd", &[Mark::Bold])]
        );
    }

    #[test]
    fn test_merge_runs_absorbs_empty_runs() {
        let mut document = Document::new(vec![Node::element(
            BlockType::Paragraph,
            vec![
                Node::text(""),
                Node::marked("x", &[Mark::Italic]),
                Node::Text(TextNode::new("", Marks::new().with(Mark::Bold))),
            ],
        )]);
        merge_runs(&mut document, &Path::from([0]));

        assert_eq!(
            document.children[0].children(),
            &[Node::marked("x", &[Mark::Italic])]
        );
    }

    #[test]
    fn test_unwrap_splits_list_around_selection() {
        let item = |text: &str| Node::element(BlockType::ListItem, vec![Node::text(text)]);
        let mut document = Document::new(vec![Node::element(
            BlockType::BulletedList,
            vec![item("a"), item("b"), item("c"), item("d")],
        )]);
        let promoted = unwrap_nodes(
            &mut document,
            LeafPoint { leaf: 1, offset: 0 },
            LeafPoint { leaf: 2, offset: 1 },
            &[BlockType::BulletedList],
            true,
        );

        assert_eq!(promoted, 2);
        assert_eq!(
            document.children,
            vec![
                Node::element(BlockType::BulletedList, vec![item("a")]),
                item("b"),
                item("c"),
                Node::element(BlockType::BulletedList, vec![item("d")]),
            ]
        );
    }

    #[test]
    fn test_unwrap_without_split_promotes_every_child() {
        let item = |text: &str| Node::element(BlockType::ListItem, vec![Node::text(text)]);
        let mut document = Document::new(vec![Node::element(
            BlockType::NumberedList,
            vec![item("a"), item("b")],
        )]);
        let point = LeafPoint { leaf: 0, offset: 0 };
        unwrap_nodes(&mut document, point, point, &[BlockType::NumberedList], false);

        assert_eq!(document.children, vec![item("a"), item("b")]);
    }

    #[test]
    fn test_wrap_lifts_nested_blocks_to_common_level() {
        let mut document = Document::new(vec![
            Node::element(
                BlockType::BlockQuote,
                vec![
                    Node::element(BlockType::ListItem, vec![Node::text("q")]),
                    Node::element(BlockType::ListItem, vec![Node::text("r")]),
                ],
            ),
            Node::element(BlockType::ListItem, vec![Node::text("p")]),
        ]);
        wrap_nodes(
            &mut document,
            LeafPoint { leaf: 0, offset: 0 },
            LeafPoint { leaf: 2, offset: 1 },
            BlockType::BulletedList,
        );

        assert_eq!(document.check_invariants(), Ok(()));
        assert_eq!(
            document.children,
            vec![Node::element(
                BlockType::BulletedList,
                vec![
                    Node::element(BlockType::ListItem, vec![Node::text("q")]),
                    Node::element(BlockType::ListItem, vec![Node::text("r")]),
                    Node::element(BlockType::ListItem, vec![Node::text("p")]),
                ],
            )]
        );
    }

    #[test]
    fn test_unhang_pulls_end_into_previous_block() {
        let document = two_runs();
        let end = unhang(&document, &Point::new([0, 0], 0), &Point::new([1, 0], 0));
        assert_eq!(end, Point::new([0, 1], 2));

        let mid = Point::new([1, 0], 1);
        assert_eq!(unhang(&document, &Point::new([0, 0], 0), &mid), mid);
    }

    #[test]
    fn test_wrap_spans_sibling_range() {
        let mut document = two_runs();
        let wrapped = wrap_nodes(
            &mut document,
            LeafPoint { leaf: 1, offset: 0 },
            LeafPoint { leaf: 2, offset: 0 },
            BlockType::BlockQuote,
        );

        assert_eq!(wrapped, 1);
        assert_eq!(document.children.len(), 1);
        assert_eq!(
            document.element(&Path::from([0])).map(|e| e.block_type),
            Some(BlockType::BlockQuote)
        );
        assert_eq!(document.children[0].children().len(), 2);
    }
}
