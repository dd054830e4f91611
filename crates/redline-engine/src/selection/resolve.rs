use crate::markup::{MarkupTree, NodeId, NodeKind};

/// Absorbs float noise such as `3 * 0.3333333333333333` before rounding.
const TOLERANCE: f64 = 1e-9;

/// A position in the rendered tree.
///
/// On a text node `offset` counts chars into its text; on an element or the
/// root it counts children, as host selections do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub node: NodeId,
    pub offset: usize,
}

impl Point {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// Which end of a selection a point is; decides the rounding direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Rounds down so the selection never loses its first raw char.
    Start,
    /// Rounds up so the selection never loses its last raw char.
    End,
}

impl Bound {
    fn round(self, value: f64) -> usize {
        let rounded = match self {
            Bound::Start => (value + TOLERANCE).floor(),
            Bound::End => (value - TOLERANCE).ceil(),
        };
        rounded.max(0.0) as usize
    }
}

/// Resolves a rendered point to a raw-text offset.
///
/// The base offset comes from the nearest preceding sibling carrying
/// metadata (its `position` plus the raw length of its content), or from
/// the nearest metadata ancestor when there is no such sibling. The offset
/// inside the node is scaled by the ancestor's warp.
///
/// Returns `None` for points on unknown nodes or past the node's content.
pub fn resolve_point(tree: &MarkupTree, point: Point, bound: Bound) -> Option<usize> {
    let node = tree.get(point.node)?;
    let raw = match &node.kind {
        NodeKind::Text(text) => {
            if point.offset > text.chars().count() {
                return None;
            }
            let warp = ambient_warp(tree, point.node);
            start_of(tree, point.node)? + warp * point.offset as f64
        }
        NodeKind::Root | NodeKind::Element(_) => {
            let children = tree.children(point.node);
            if point.offset > children.len() {
                return None;
            }
            let warp = ambient_warp(tree, point.node);
            let before: f64 = children[..point.offset]
                .iter()
                .map(|&c| raw_len_in(tree, c, warp))
                .sum();
            start_of(tree, point.node)? + before
        }
    };
    Some(bound.round(raw))
}

/// Warp in effect for content of `id`: that of the nearest node at or above
/// it carrying metadata. The root guarantees one exists.
fn ambient_warp(tree: &MarkupTree, id: NodeId) -> f64 {
    tree.ancestors_inclusive(id)
        .find_map(|n| tree.coords(n))
        .map_or(1.0, |c| c.warp)
}

/// Raw offset at which the content of `id` begins.
fn start_of(tree: &MarkupTree, id: NodeId) -> Option<f64> {
    if let Some(coords) = tree.coords(id) {
        return Some(coords.position);
    }
    let parent = tree.parent(id)?;
    let warp = ambient_warp(tree, parent);

    let mut between = 0.0;
    for sibling in tree.preceding_siblings(id) {
        if let Some(coords) = tree.coords(sibling) {
            return Some(coords.position + raw_len(tree, sibling, coords.warp) + between);
        }
        between += raw_len_in(tree, sibling, warp);
    }
    Some(start_of(tree, parent)? + between)
}

/// Raw length covered by a node rendered under `warp`. Nodes with their own
/// metadata switch to their own warp.
fn raw_len_in(tree: &MarkupTree, id: NodeId, warp: f64) -> f64 {
    match tree.coords(id) {
        Some(coords) => raw_len(tree, id, coords.warp),
        None => raw_len(tree, id, warp),
    }
}

fn raw_len(tree: &MarkupTree, id: NodeId, warp: f64) -> f64 {
    match tree.text(id) {
        Some(text) => text.chars().count() as f64 * warp,
        None => tree
            .children(id)
            .iter()
            .map(|&c| raw_len_in(tree, c, warp))
            .sum(),
    }
}

/// Finds the text point `offset` rendered chars into `container`.
///
/// At a boundary between two text nodes a [`Bound::Start`] point lands at
/// the beginning of the later node and a [`Bound::End`] point at the end of
/// the earlier one.
pub fn point_at_rendered_offset(
    tree: &MarkupTree,
    container: NodeId,
    offset: usize,
    bound: Bound,
) -> Option<Point> {
    let nodes = tree.text_nodes(container);
    let mut seen = 0;
    for &node in &nodes {
        let len = tree.text(node).map_or(0, |t| t.chars().count());
        let inside = match bound {
            Bound::Start => offset < seen + len,
            Bound::End => len > 0 && offset <= seen + len,
        };
        if inside {
            return Some(Point::new(node, offset - seen));
        }
        seen += len;
    }
    // past the last char: the end of the last text node
    let &last = nodes.last()?;
    (offset == seen).then(|| Point::new(last, tree.text(last).map_or(0, |t| t.chars().count())))
}
