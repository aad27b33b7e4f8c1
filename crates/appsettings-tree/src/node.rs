//! In-memory configuration tree nodes

use crate::path::{keys_equal, parse_index, split_key};
use crate::provider::Setting;

/// What a node holds besides its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    /// Structural node created by a nested key or an empty object/array.
    #[default]
    Unset,
    /// Explicit null from a source.
    Null,
    /// Leaf string value.
    Value(String),
}

/// A named node of the configuration tree.
///
/// Child lookup is case-insensitive; the key keeps the casing it was first
/// inserted with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    key: String,
    slot: Slot,
    children: Vec<Node>,
}

impl Node {
    /// Create an empty root node.
    pub fn root() -> Self {
        Self::default()
    }

    fn named(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    /// The key of this node relative to its parent.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    /// The leaf value, if one was set.
    pub fn value(&self) -> Option<&str> {
        match &self.slot {
            Slot::Value(v) => Some(v),
            _ => None,
        }
    }

    /// True for a node explicitly set to null that has no children.
    pub fn is_null(&self) -> bool {
        self.slot == Slot::Null && self.children.is_empty()
    }

    /// True if this node can be enumerated as a section: it has children, or
    /// it exists only structurally (e.g. an empty JSON object or array).
    pub fn is_section(&self) -> bool {
        !self.children.is_empty() || self.slot == Slot::Unset
    }

    /// Immediate children in insertion order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Find an immediate child by key, ignoring case.
    pub fn child(&self, key: &str) -> Option<&Node> {
        self.children.iter().find(|c| keys_equal(&c.key, key))
    }

    /// Navigate a colon-delimited path. The empty path returns `self`.
    pub fn get(&self, path: &str) -> Option<&Node> {
        split_key(path)
            .into_iter()
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Children ordered as sequence elements: index keys ascending, then any
    /// non-index keys in insertion order.
    pub fn elements(&self) -> Vec<&Node> {
        let mut indexed: Vec<(usize, &Node)> = self
            .children
            .iter()
            .filter_map(|c| parse_index(&c.key).map(|i| (i, c)))
            .collect();
        indexed.sort_by_key(|(i, _)| *i);

        indexed
            .into_iter()
            .map(|(_, c)| c)
            .chain(self.children.iter().filter(|c| parse_index(&c.key).is_none()))
            .collect()
    }

    /// Apply one flattened setting at `path`, creating intermediate nodes.
    pub fn apply(&mut self, path: &str, setting: &Setting) {
        let node = split_key(path)
            .into_iter()
            .fold(self, |node, segment| node.child_entry(segment));

        match setting {
            Setting::Value(v) => node.slot = Slot::Value(v.clone()),
            Setting::Null => node.slot = Slot::Null,
            Setting::EmptySection => {}
        }
    }

    fn child_entry(&mut self, key: &str) -> &mut Node {
        let index = match self.children.iter().position(|c| keys_equal(&c.key, key)) {
            Some(index) => index,
            None => {
                self.children.push(Node::named(key));
                self.children.len() - 1
            }
        };
        &mut self.children[index]
    }
}
