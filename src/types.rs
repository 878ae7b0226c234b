//! Core data types for the scene picker
//!
//! This module contains the raw scene-graph structures delivered by the
//! viewer. They are read-only inputs: the scene index copies out the fields it
//! needs and never mutates them.
//!
//! # Main Types
//!
//! - [`NodeId`] - Opaque instance identifier, unique per 3D object instance
//! - [`SceneNode`] - A node of the viewer's scene graph with its children
//! - [`NodeMap`] - The one-shot node snapshot, keyed by [`NodeId`]
//! - [`Vec3`] - Translation vector for the translate passthrough
//!
//! # Wire Shape
//!
//! Nodes deserialize from the viewer's JSON shape, where the identifier is
//! called `instanceID` and the authored name is `name`:
//!
//! ```json
//! { "instanceID": 7, "name": "Leg ModernA_01", "children": [] }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque instance identifier assigned by the viewer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        NodeId(value)
    }
}

/// A node of the viewer's scene graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneNode {
    /// Viewer-assigned instance identifier
    #[serde(rename = "instanceID")]
    pub id: NodeId,

    /// Authored name, including any viewer-appended `_NN` suffix
    #[serde(rename = "name", default)]
    pub raw_name: String,

    /// Ordered children (empty for leaves)
    #[serde(default)]
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Create a leaf node
    pub fn new(id: impl Into<NodeId>, raw_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_name: raw_name.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style child attachment
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder-style attachment of several children, in order
    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first pre-order traversal including `self`
    pub fn walk(&self) -> Vec<&SceneNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Snapshot of every node in the viewer, keyed by instance id.
///
/// Ordered by id so that lookups that scan the whole map are deterministic.
pub type NodeMap = BTreeMap<NodeId, SceneNode>;

/// Flatten one or more node trees into a [`NodeMap`].
///
/// Every node of every tree gets its own entry, mirroring the viewer, which
/// lists nested nodes at top level as well as inside their parents.
pub fn node_map_from_roots(roots: impl IntoIterator<Item = SceneNode>) -> NodeMap {
    let mut map = NodeMap::new();
    for root in roots {
        for node in root.walk() {
            map.entry(node.id).or_insert_with(|| node.clone());
        }
    }
    map
}

/// Parse a node-map snapshot.
///
/// Accepts the viewer's keyed object (`{"7": {...}}`) or a plain array of
/// root nodes, which is flattened with [`node_map_from_roots`].
pub fn node_map_from_json(json: &str) -> crate::error::Result<NodeMap> {
    match serde_json::from_str::<NodeMap>(json) {
        Ok(map) => Ok(map),
        Err(map_err) => match serde_json::from_str::<Vec<SceneNode>>(json) {
            Ok(roots) => Ok(node_map_from_roots(roots)),
            Err(_) => Err(map_err.into()),
        },
    }
}

/// Translation vector for the translate passthrough
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}
