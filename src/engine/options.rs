//! Option sets offered in a type's panel

use crate::scene::OptionNode;
use crate::types::NodeId;

/// An offered option keyed by its display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub name: String,
    pub option: OptionNode,
}

/// Ordered mapping from display name to option.
///
/// Insertion is first-write-wins: a later option whose display name is
/// already present is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSet {
    entries: Vec<OptionEntry>,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert unless the name is taken; returns whether it was inserted.
    pub fn insert(&mut self, name: impl Into<String>, option: OptionNode) -> bool {
        let name = name.into();
        if self.contains_name(&name) {
            return false;
        }
        self.entries.push(OptionEntry { name, option });
        true
    }

    pub fn get(&self, name: &str) -> Option<&OptionNode> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.option)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e.name == name)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.entries.iter().any(|e| e.option.node_id == node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OptionEntry> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.entries.iter().map(|e| e.option.node_id).collect()
    }
}

impl<'a> IntoIterator for &'a OptionSet {
    type Item = &'a OptionEntry;
    type IntoIter = std::slice::Iter<'a, OptionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
