//! The world graph is a tree of worlds rooted at the outdoor world. Nodes live in a flat table and
//! refer to their parent by index, so walking up through a door never needs an owning back pointer.

use crate::world::{TilePos, WorldId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type NodeId = usize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldNode {
    pub world: WorldId,
    pub parent: Option<NodeId>,
    /// descending door tile -> child node
    pub children: BTreeMap<TilePos, NodeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldGraph {
    nodes: Vec<WorldNode>,
}

impl WorldGraph {
    pub const ROOT: NodeId = 0;

    pub fn new(root_world: WorldId) -> Self {
        Self {
            nodes: vec![WorldNode {
                world: root_world,
                parent: None,
                children: BTreeMap::new(),
            }],
        }
    }

    /// Attach a new child below `parent`, reached through the door at `door`.
    pub(crate) fn add_child(&mut self, parent: NodeId, door: TilePos, world: WorldId) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(WorldNode {
            world,
            parent: Some(parent),
            children: BTreeMap::new(),
        });
        self.nodes[parent].children.insert(door, id);
        id
    }

    /// Map another door of `parent` onto an already existing child.
    pub(crate) fn link_child(&mut self, parent: NodeId, door: TilePos, child: NodeId) {
        self.nodes[parent].children.insert(door, child);
    }

    pub fn root(&self) -> &WorldNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> Option<&WorldNode> {
        self.nodes.get(id)
    }

    pub fn parent_world(&self, id: NodeId) -> Option<WorldId> {
        self.nodes
            .get(id)
            .and_then(|n| n.parent)
            .map(|p| self.nodes[p].world)
    }

    pub fn node_of(&self, world: WorldId) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.world == world)
    }

    pub fn nodes(&self) -> &[WorldNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
