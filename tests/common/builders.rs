//! Test data builders for creating scene graphs

use std::collections::HashMap;

use scene_picker::config::DEFAULT_SCENE_ROOT_NAME;
use scene_picker::types::{node_map_from_roots, NodeId, NodeMap, SceneNode};
use scene_picker::{NameGrammar, SceneIndex};

/// Builder for node maps following the authoring convention.
///
/// Ids are handed out in insertion order starting at 1 (the scene root).
pub struct SceneBuilder {
    root: SceneNode,
    next_id: u32,
    ids: HashMap<String, NodeId>,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::with_root_name(DEFAULT_SCENE_ROOT_NAME)
    }

    pub fn with_root_name(name: &str) -> Self {
        let mut ids = HashMap::new();
        ids.insert(name.to_string(), NodeId(1));
        Self {
            root: SceneNode::new(1, name),
            next_id: 2,
            ids,
        }
    }

    fn node(&mut self, raw_name: &str) -> SceneNode {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.ids.entry(raw_name.to_string()).or_insert(id);
        SceneNode::new(id, raw_name)
    }

    /// Add a root child with the given children
    pub fn group(mut self, raw_name: &str, children: &[&str]) -> Self {
        let mut group = self.node(raw_name);
        for child in children {
            let child = self.node(child);
            group = group.with_child(child);
        }
        self.root = self.root.with_child(group);
        self
    }

    /// Add a type group; same as [`SceneBuilder::group`]
    pub fn type_group(self, raw_name: &str, options: &[&str]) -> Self {
        self.group(raw_name, options)
    }

    /// Add a `#` filter group
    pub fn filter_group(self, tags: &[&str]) -> Self {
        self.group("#", tags)
    }

    /// Id of the first node added with this raw name
    pub fn id(&self, raw_name: &str) -> NodeId {
        *self
            .ids
            .get(raw_name)
            .unwrap_or_else(|| panic!("no node named {:?}", raw_name))
    }

    pub fn nodes(&self) -> NodeMap {
        node_map_from_roots([self.root.clone()])
    }

    pub fn index(&self) -> SceneIndex {
        SceneIndex::build(
            &self.nodes(),
            &NameGrammar::default(),
            DEFAULT_SCENE_ROOT_NAME,
        )
        .unwrap()
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The furniture scene used across the workflow tests
pub fn furniture_scene() -> SceneBuilder {
    SceneBuilder::new()
        .type_group("Leg_01", &["Leg ModernA_01", "Leg Classic # woven_02"])
        .filter_group(&["# woven_03", "# carved_04"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_builder_ids() {
        let scene = SceneBuilder::new().type_group("Leg", &["Leg A", "Leg B"]);
        assert_eq!(scene.id("Leg"), NodeId(2));
        assert_eq!(scene.id("Leg B"), NodeId(4));
        assert_eq!(scene.nodes().len(), 4);
    }
}
