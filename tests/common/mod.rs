//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;
pub mod mock_helpers;

use std::path::PathBuf;

use scene_picker::types::{NodeId, NodeMap};
use scene_picker::Visibility;

/// Path of a file under `tests/fixtures`
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load a node-map fixture
pub fn load_fixture(name: &str) -> NodeMap {
    let json = std::fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {}", name, e));
    scene_picker::types::node_map_from_json(&json).unwrap()
}

/// Nodes shown by a batch of instructions, in order
pub fn shown(instructions: &[Visibility]) -> Vec<NodeId> {
    instructions
        .iter()
        .filter(|v| v.is_show())
        .map(|v| v.node())
        .collect()
}

/// Nodes hidden by a batch of instructions, in order
pub fn hidden(instructions: &[Visibility]) -> Vec<NodeId> {
    instructions
        .iter()
        .filter(|v| !v.is_show())
        .map(|v| v.node())
        .collect()
}
