use std::collections::BTreeMap;

use crate::render::event::{ATTR_POSITION, ATTR_WARP};

/// Handle to a node inside one [`MarkupTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Coordinate metadata carried by an element: the raw offset of its first
/// content char and the raw chars consumed per rendered char.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub position: f64,
    pub warp: f64,
}

impl Coords {
    /// The fragment root stands for raw offset 0 at warp 1.
    pub const ROOT: Coords = Coords {
        position: 0.0,
        warp: 1.0,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|c| c.split_whitespace().any(|t| t == class))
    }

    /// Parsed `data-position`/`data-warp`, when both are present and valid.
    pub fn coords(&self) -> Option<Coords> {
        let position = self.attr(ATTR_POSITION)?.trim().parse::<f64>().ok()?;
        let warp = self.attr(ATTR_WARP)?.trim().parse::<f64>().ok()?;
        (position.is_finite() && warp.is_finite()).then_some(Coords { position, warp })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Root,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
}

/// Arena tree of rendered markup. Node 0 is always the root.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkupTree {
    nodes: Vec<Node>,
}

impl Default for MarkupTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: vec![],
                kind: NodeKind::Root,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or_default()
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.get(id)?.kind {
            NodeKind::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        self.push(parent, NodeKind::Element(element))
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            children: vec![],
            kind,
        });
        if let Some(p) = self.nodes.get_mut(parent.0) {
            p.children.push(id);
        }
        id
    }

    /// Coordinate metadata of `id`; the root always has [`Coords::ROOT`].
    pub fn coords(&self, id: NodeId) -> Option<Coords> {
        match &self.get(id)?.kind {
            NodeKind::Root => Some(Coords::ROOT),
            NodeKind::Element(e) => e.coords(),
            NodeKind::Text(_) => None,
        }
    }

    /// `id` followed by each of its ancestors up to the root.
    pub fn ancestors_inclusive(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).map(|_| id), |&n| self.parent(n))
    }

    /// True if `id` is `container` or lies below it.
    pub fn is_within(&self, id: NodeId, container: NodeId) -> bool {
        self.ancestors_inclusive(id).any(|n| n == container)
    }

    /// Siblings before `id`, nearest first.
    pub fn preceding_siblings(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let siblings = self.parent(id).map(|p| self.children(p)).unwrap_or_default();
        let before = siblings.iter().position(|&s| s == id).unwrap_or(0);
        siblings[..before].iter().rev().copied()
    }

    /// Text nodes under `id` in document order.
    pub fn text_nodes(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = vec![];
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            if self.text(n).is_some() {
                out.push(n);
            }
            stack.extend(self.children(n).iter().rev());
        }
        out
    }

    /// Rendered text length of `id` in chars.
    pub fn text_len(&self, id: NodeId) -> usize {
        self.text_nodes(id)
            .iter()
            .filter_map(|&n| self.text(n))
            .map(|t| t.chars().count())
            .sum()
    }

    pub fn text_content(&self, id: NodeId) -> String {
        self.text_nodes(id)
            .iter()
            .filter_map(|&n| self.text(n))
            .collect()
    }
}
