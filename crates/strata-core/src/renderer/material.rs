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

//! Defines the GPU material block embedded in every render record and the
//! provider contract used to build it.

use crate::asset::AssetUUID;
use crate::math::{LinearRgba, Vec4};
use std::sync::Arc;

/// Bindless index meaning "no texture bound".
pub const BINDLESS_NONE: u32 = u32::MAX;

/// The standard PBR material parameters, laid out for direct GPU upload.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct GpuStandardMaterial {
    /// Base color multiplier.
    pub base_color_factor: LinearRgba,
    /// Emissive color, `w` is an intensity multiplier.
    pub emissive_factor: Vec4,
    /// Bindless index of the base color texture.
    pub base_color_texture_id: u32,
    /// Bindless index of the tangent-space normal map.
    pub normal_texture_id: u32,
    /// Bindless index of the packed metallic/roughness texture.
    pub metallic_roughness_texture_id: u32,
    /// Bindless index of the emissive texture.
    pub emissive_texture_id: u32,
    /// Metalness multiplier.
    pub metallic_factor: f32,
    /// Roughness multiplier.
    pub roughness_factor: f32,
    /// Alpha-test threshold. Fragments below it are discarded.
    pub alpha_cutoff: f32,
    /// Explicit padding to a 16-byte multiple.
    pub _padding: u32,
}

impl GpuStandardMaterial {
    /// Builds the engine default material: white, dielectric, half rough, untextured.
    pub const fn build_default() -> Self {
        Self {
            base_color_factor: LinearRgba::WHITE,
            emissive_factor: Vec4::new(0.0, 0.0, 0.0, 1.0),
            base_color_texture_id: BINDLESS_NONE,
            normal_texture_id: BINDLESS_NONE,
            metallic_roughness_texture_id: BINDLESS_NONE,
            emissive_texture_id: BINDLESS_NONE,
            metallic_factor: 0.0,
            roughness_factor: 0.5,
            alpha_cutoff: 0.5,
            _padding: 0,
        }
    }
}

impl Default for GpuStandardMaterial {
    fn default() -> Self {
        Self::build_default()
    }
}

/// A CPU-side material built for one submesh.
///
/// Instances are kept alive by the record builder so that any texture streaming
/// they started stays referenced while the records are in use.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialInstance {
    /// The material asset this instance was built from. Empty for the default.
    pub source: AssetUUID,
    /// The GPU parameter block.
    pub gpu: GpuStandardMaterial,
}

impl MaterialInstance {
    /// The default material instance.
    pub fn default_instance() -> Self {
        Self {
            source: AssetUUID::EMPTY,
            gpu: GpuStandardMaterial::build_default(),
        }
    }
}

/// Builds material instances from material identifiers.
pub trait MaterialProvider: Send + Sync {
    /// Builds the material for `uuid`.
    ///
    /// The flag is `true` when every resource the material references is
    /// resident. A `false` flag is not an error: the instance is usable with
    /// fallback parameters and the caller polls again later.
    fn build_material(&self, uuid: &AssetUUID) -> (Arc<MaterialInstance>, bool);
}
