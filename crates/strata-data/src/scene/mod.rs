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

//! The scene graph: nodes, their transforms and their components.
//!
//! A [`Scene`] is an arena of [`SceneNode`]s. Each node carries a local
//! [`Transform`], the world matrices of the current and previous frame, and a
//! list of [`SceneComponent`]s. Scenes convert to and from a
//! [`SceneDefinition`] for persistence.

pub mod components;
mod definition;
mod graph;
mod node;
mod transform;

#[cfg(test)]
pub(crate) mod test_support;

pub use components::{LightComponent, SceneComponent, StaticMeshComponent, ENGINE_MESH_NAME};
pub use definition::*;
pub use graph::*;
pub use node::*;
pub use transform::*;
