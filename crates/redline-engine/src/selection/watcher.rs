use std::collections::BTreeSet;

use crate::markup::{MarkupTree, NodeId};
use crate::span::Span;

use super::resolve::{Bound, Point, resolve_point};

/// One contiguous range of a host selection, endpoints in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: Point,
    pub end: Point,
}

/// A host selection: where it was started (`anchor`), where it currently
/// ends (`focus`) and the ranges it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Point,
    pub focus: Point,
    pub collapsed: bool,
    pub ranges: Vec<SelectionRange>,
}

impl Selection {
    /// A single-range selection from `start` to `end`.
    pub fn between(start: Point, end: Point) -> Self {
        Self {
            anchor: start,
            focus: end,
            collapsed: start == end,
            ranges: vec![SelectionRange { start, end }],
        }
    }
}

/// Raw-text ranges recovered from a selection inside one watched container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSelection {
    pub container: NodeId,
    pub ranges: Vec<Span>,
}

/// Scopes selection resolution to a set of registered containers.
///
/// Watchers are independent of each other; each owns its containers and is
/// inert until [`SelectionWatcher::start`] is called.
#[derive(Debug, Clone, Default)]
pub struct SelectionWatcher {
    containers: BTreeSet<NodeId>,
    active: bool,
}

impl SelectionWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.active = true;
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Returns `false` if `container` was already registered.
    pub fn register(&mut self, container: NodeId) -> bool {
        self.containers.insert(container)
    }

    /// Returns `false` if `container` was not registered.
    pub fn unregister(&mut self, container: NodeId) -> bool {
        self.containers.remove(&container)
    }

    pub fn containers(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.containers.iter().copied()
    }

    /// Nearest registered container at or above `node`.
    pub fn container_of(&self, tree: &MarkupTree, node: NodeId) -> Option<NodeId> {
        tree.ancestors_inclusive(node)
            .find(|n| self.containers.contains(n))
    }

    /// Maps `selection` back to raw offsets.
    ///
    /// Selections that cannot be mapped exactly produce `None`: the watcher
    /// is stopped, the selection is collapsed, an endpoint lies outside every
    /// container, the endpoints lie in different containers, or none of its
    /// ranges resolves. Ranges reaching outside the container are skipped.
    pub fn handle(&self, tree: &MarkupTree, selection: &Selection) -> Option<ResolvedSelection> {
        if !self.active {
            log::debug!("selection ignored: watcher stopped");
            return None;
        }
        if selection.collapsed {
            log::debug!("selection ignored: collapsed");
            return None;
        }

        let Some(anchor) = self.container_of(tree, selection.anchor.node) else {
            log::debug!("selection ignored: anchor outside watched containers");
            return None;
        };
        let Some(focus) = self.container_of(tree, selection.focus.node) else {
            log::debug!("selection ignored: focus outside watched containers");
            return None;
        };
        if anchor != focus {
            log::debug!("selection ignored: spans containers {anchor:?} and {focus:?}");
            return None;
        }

        let ranges: Vec<Span> = selection
            .ranges
            .iter()
            .filter_map(|range| self.resolve_range(tree, anchor, range))
            .collect();
        if ranges.is_empty() {
            log::debug!("selection ignored: no range resolved");
            return None;
        }
        Some(ResolvedSelection {
            container: anchor,
            ranges,
        })
    }

    fn resolve_range(
        &self,
        tree: &MarkupTree,
        container: NodeId,
        range: &SelectionRange,
    ) -> Option<Span> {
        if !tree.is_within(range.start.node, container)
            || !tree.is_within(range.end.node, container)
        {
            log::debug!("range skipped: leaves container {container:?}");
            return None;
        }
        let start = resolve_point(tree, range.start, Bound::Start)?;
        let end = resolve_point(tree, range.end, Bound::End)?;
        Some(Span::new(start.min(end), start.max(end)))
    }
}
