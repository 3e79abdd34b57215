// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::components::SceneComponent;
use super::transform::Transform;
use std::fmt;
use strata_core::{math::Mat4, renderer::TransformProvider};

/// Identifies a node of a [`Scene`](super::Scene).
///
/// The generation is bumped whenever a slot is reused, so an id kept past its
/// node's removal never reaches the slot's next occupant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index in the scene arena.
    pub index: u32,
    /// Generation of the slot when the node was created.
    pub generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// A node of the scene graph.
#[derive(Debug)]
pub struct SceneNode {
    name: String,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    /// Local transform relative to the parent.
    pub transform: Transform,
    world_matrix: Mat4,
    prev_world_matrix: Mat4,
    pub(super) components: Vec<SceneComponent>,
}

impl SceneNode {
    pub(super) fn new(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            transform: Transform::identity(),
            world_matrix: Mat4::IDENTITY,
            prev_world_matrix: Mat4::IDENTITY,
            components: Vec::new(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the node.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child nodes in insertion order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Attached components.
    pub fn components(&self) -> &[SceneComponent] {
        &self.components
    }

    /// Attached components, mutably.
    pub fn components_mut(&mut self) -> &mut [SceneComponent] {
        &mut self.components
    }

    /// Moves the current world matrix to the previous slot and stores `world`.
    ///
    /// Called once per frame by transform propagation.
    pub fn advance_world_matrix(&mut self, world: Mat4) {
        self.prev_world_matrix = self.world_matrix;
        self.world_matrix = world;
    }
}

impl TransformProvider for SceneNode {
    fn world_matrix(&self) -> Mat4 {
        self.world_matrix
    }

    fn prev_world_matrix(&self) -> Mat4 {
        self.prev_world_matrix
    }
}
