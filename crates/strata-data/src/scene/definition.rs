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

//! A stable, serializable representation of a scene.

use super::components::LightComponent;
use super::transform::Transform;
use serde::{Deserialize, Serialize};
use strata_core::asset::AssetUUID;

/// Schema version written by this build.
pub const SCENE_SCHEMA_VERSION: u32 = 1;

/// The root of a scene's intermediate representation.
///
/// Nodes are listed parents first. Index 0 is the root node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDefinition {
    /// Version of this schema.
    pub schema_version: u32,
    /// All nodes, root first.
    pub nodes: Vec<NodeDefinition>,
}

/// A serializable scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
    /// Display name.
    pub name: String,
    /// Index of the parent in [`SceneDefinition::nodes`]. `None` only for the root.
    pub parent: Option<u32>,
    /// Local transform.
    pub transform: Transform,
    /// Attached components.
    pub components: Vec<ComponentDefinition>,
}

/// A serializable component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentDefinition {
    /// A light, persisted in full.
    Light(LightComponent),
    /// A static mesh. Only the identifier is persisted.
    StaticMesh {
        /// The bound mesh.
        mesh: AssetUUID,
    },
}
