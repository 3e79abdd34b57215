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

//! The standard material library.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use strata_core::{
    asset::AssetUUID,
    math::{LinearRgba, Vec4},
    renderer::{GpuStandardMaterial, MaterialInstance, MaterialProvider, BINDLESS_NONE},
};

/// The authored description of a standard PBR material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StandardMaterialDesc {
    /// Base color multiplier.
    pub base_color_factor: LinearRgba,
    /// Emissive color, `w` is an intensity multiplier.
    pub emissive_factor: Vec4,
    /// Metalness multiplier.
    pub metallic_factor: f32,
    /// Roughness multiplier.
    pub roughness_factor: f32,
    /// Alpha-test threshold.
    pub alpha_cutoff: f32,
    /// Base color texture.
    pub base_color_texture: Option<AssetUUID>,
    /// Normal map.
    pub normal_texture: Option<AssetUUID>,
    /// Packed metallic/roughness texture.
    pub metallic_roughness_texture: Option<AssetUUID>,
    /// Emissive texture.
    pub emissive_texture: Option<AssetUUID>,
}

impl Default for StandardMaterialDesc {
    fn default() -> Self {
        let gpu = GpuStandardMaterial::build_default();
        Self {
            base_color_factor: gpu.base_color_factor,
            emissive_factor: gpu.emissive_factor,
            metallic_factor: gpu.metallic_factor,
            roughness_factor: gpu.roughness_factor,
            alpha_cutoff: gpu.alpha_cutoff,
            base_color_texture: None,
            normal_texture: None,
            metallic_roughness_texture: None,
            emissive_texture: None,
        }
    }
}

#[derive(Default)]
struct LibraryState {
    materials: HashMap<AssetUUID, StandardMaterialDesc>,
    resident_textures: HashMap<AssetUUID, u32>,
}

/// Builds [`MaterialInstance`]s from registered material descriptions.
///
/// A material is ready once every texture it references is resident. Missing
/// textures are replaced by [`BINDLESS_NONE`] in the meantime. Unknown and
/// empty material identifiers resolve to the default material, which is
/// always ready.
#[derive(Default)]
pub struct MaterialLibrary {
    state: RwLock<LibraryState>,
}

impl MaterialLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a material description.
    pub fn register_material(&self, uuid: AssetUUID, desc: StandardMaterialDesc) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .materials
            .insert(uuid, desc);
    }

    /// Records that `texture` is resident at `bindless_index`.
    pub fn mark_texture_resident(&self, texture: AssetUUID, bindless_index: u32) {
        log::trace!("Texture {} resident at bindless slot {}", texture, bindless_index);
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .resident_textures
            .insert(texture, bindless_index);
    }

    /// Forgets the residency of `texture`.
    pub fn mark_texture_evicted(&self, texture: &AssetUUID) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .resident_textures
            .remove(texture);
    }
}

impl MaterialProvider for MaterialLibrary {
    fn build_material(&self, uuid: &AssetUUID) -> (Arc<MaterialInstance>, bool) {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let Some(desc) = (!uuid.is_empty()).then(|| state.materials.get(uuid)).flatten() else {
            return (Arc::new(MaterialInstance::default_instance()), true);
        };

        let mut ready = true;
        let mut slot = |texture: &Option<AssetUUID>| match texture {
            None => BINDLESS_NONE,
            Some(texture) => match state.resident_textures.get(texture) {
                Some(&index) => index,
                None => {
                    ready = false;
                    BINDLESS_NONE
                }
            },
        };

        let gpu = GpuStandardMaterial {
            base_color_factor: desc.base_color_factor,
            emissive_factor: desc.emissive_factor,
            base_color_texture_id: slot(&desc.base_color_texture),
            normal_texture_id: slot(&desc.normal_texture),
            metallic_roughness_texture_id: slot(&desc.metallic_roughness_texture),
            emissive_texture_id: slot(&desc.emissive_texture),
            metallic_factor: desc.metallic_factor,
            roughness_factor: desc.roughness_factor,
            alpha_cutoff: desc.alpha_cutoff,
            _padding: 0,
        };

        (
            Arc::new(MaterialInstance {
                source: *uuid,
                gpu,
            }),
            ready,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_material_is_default_and_ready() {
        let library = MaterialLibrary::new();
        let (instance, ready) = library.build_material(&AssetUUID::new());
        assert!(ready);
        assert_eq!(instance.gpu, GpuStandardMaterial::build_default());

        let (instance, ready) = library.build_material(&AssetUUID::EMPTY);
        assert!(ready);
        assert!(instance.source.is_empty());
    }

    #[test]
    fn test_material_waits_for_textures() {
        // Arrange
        let library = MaterialLibrary::new();
        let material = AssetUUID::new_v5("materials/brick");
        let albedo = AssetUUID::new_v5("textures/brick_albedo");
        library.register_material(
            material,
            StandardMaterialDesc {
                base_color_texture: Some(albedo),
                roughness_factor: 0.9,
                ..Default::default()
            },
        );

        // Act
        let (pending, pending_ready) = library.build_material(&material);
        library.mark_texture_resident(albedo, 42);
        let (resident, resident_ready) = library.build_material(&material);

        // Assert
        assert!(!pending_ready);
        assert_eq!(pending.gpu.base_color_texture_id, BINDLESS_NONE);
        assert!(resident_ready);
        assert_eq!(resident.gpu.base_color_texture_id, 42);
        assert_eq!(resident.gpu.roughness_factor, 0.9);
        assert_eq!(resident.source, material);
    }

    #[test]
    fn test_evicted_texture_makes_material_pending_again() {
        let library = MaterialLibrary::new();
        let material = AssetUUID::new();
        let normal = AssetUUID::new();
        library.register_material(
            material,
            StandardMaterialDesc {
                normal_texture: Some(normal),
                ..Default::default()
            },
        );
        library.mark_texture_resident(normal, 7);
        assert!(library.build_material(&material).1);

        library.mark_texture_evicted(&normal);
        assert!(!library.build_material(&material).1);
    }
}
