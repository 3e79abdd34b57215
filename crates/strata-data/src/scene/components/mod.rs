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

//! The closed set of components a scene node can carry.

mod light;
mod static_mesh;

pub use light::*;
pub use static_mesh::*;

use super::definition::ComponentDefinition;
use strata_core::{
    math::Mat4,
    renderer::{ExtractedLight, GpuPerObjectData, MeshStreamingContext, TransformProvider},
};

/// A component attached to a scene node.
#[derive(Debug)]
pub enum SceneComponent {
    /// A light source.
    Light(LightComponent),
    /// A streamed static mesh.
    StaticMesh(StaticMeshComponent),
}

impl SceneComponent {
    /// Per-tick update.
    pub fn tick(&mut self) {
        match self {
            SceneComponent::Light(_) => {}
            SceneComponent::StaticMesh(mesh) => mesh.tick(),
        }
    }

    /// Appends this component's frame data.
    pub fn collect_render_data<T>(
        &self,
        transform: &T,
        objects: &mut Vec<GpuPerObjectData>,
        lights: &mut Vec<ExtractedLight>,
    ) where
        T: TransformProvider + ?Sized,
    {
        match self {
            SceneComponent::Light(light) => {
                let world: Mat4 = transform.world_matrix();
                lights.push(light.extract(&world));
            }
            SceneComponent::StaticMesh(mesh) => mesh.render_object_collect(transform, objects),
        }
    }

    /// The persisted form of the component.
    pub fn to_definition(&self) -> ComponentDefinition {
        match self {
            SceneComponent::Light(light) => ComponentDefinition::Light(*light),
            SceneComponent::StaticMesh(mesh) => ComponentDefinition::StaticMesh { mesh: mesh.uuid() },
        }
    }

    /// Rebuilds a component from its persisted form.
    ///
    /// Static meshes are resolved on their first tick.
    pub fn from_definition(definition: &ComponentDefinition, context: &MeshStreamingContext) -> Self {
        match definition {
            ComponentDefinition::Light(light) => SceneComponent::Light(*light),
            ComponentDefinition::StaticMesh { mesh } => {
                SceneComponent::StaticMesh(StaticMeshComponent::with_uuid(context.clone(), *mesh))
            }
        }
    }

    /// Returns the static mesh, if this is one.
    pub fn as_static_mesh(&self) -> Option<&StaticMeshComponent> {
        match self {
            SceneComponent::StaticMesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Returns the static mesh mutably, if this is one.
    pub fn as_static_mesh_mut(&mut self) -> Option<&mut StaticMeshComponent> {
        match self {
            SceneComponent::StaticMesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    /// Returns the light, if this is one.
    pub fn as_light(&self) -> Option<&LightComponent> {
        match self {
            SceneComponent::Light(light) => Some(light),
            _ => None,
        }
    }
}
