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

//! Defines the flattened per-object draw record handed to the renderer.

use super::material::GpuStandardMaterial;
use crate::asset::RenderBounds;
use crate::math::{Mat4, Vec4};

/// Bounding sphere used when a mesh has no header: the unit cube's circumsphere
/// (`xyz` origin, `w` radius = √3).
pub const BUILT_IN_SPHERE_BOUNDS: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.732_050_8);

/// Half-extents used when a mesh has no header: the unit cube.
pub const BUILT_IN_EXTENTS: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

/// One draw record: a submesh range of a GPU mesh, its bounds, its material and
/// the model matrices of the frame.
///
/// The geometry and material fields are derived when the owning component
/// rebuilds. The matrices and `object_moved` are stamped during collection.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct GpuPerObjectData {
    /// World matrix of the owning node for this frame.
    pub model_matrix: Mat4,
    /// World matrix of the owning node for the previous frame.
    pub model_matrix_prev: Mat4,
    /// Bounding sphere in mesh-local space: `xyz` origin, `w` radius.
    pub sphere_bounds: Vec4,
    /// Box half-extents in mesh-local space, `w` is `1.0`.
    pub extents: Vec4,
    /// Bindless index of the vertex buffer.
    pub vertices_array_id: u32,
    /// Bindless index of the index buffer.
    pub indices_array_id: u32,
    /// First index of the drawn range.
    pub index_start_position: u32,
    /// Number of indices in the drawn range.
    pub index_count: u32,
    /// `1` when the model matrix differs from the previous frame's, else `0`.
    pub object_moved: u32,
    /// Explicit padding to a 16-byte multiple.
    pub _padding: [u32; 3],
    /// Material parameters.
    pub material: GpuStandardMaterial,
}

impl Default for GpuPerObjectData {
    fn default() -> Self {
        Self {
            model_matrix: Mat4::IDENTITY,
            model_matrix_prev: Mat4::IDENTITY,
            sphere_bounds: BUILT_IN_SPHERE_BOUNDS,
            extents: BUILT_IN_EXTENTS,
            vertices_array_id: 0,
            indices_array_id: 0,
            index_start_position: 0,
            index_count: 0,
            object_moved: 0,
            _padding: [0; 3],
            material: GpuStandardMaterial::build_default(),
        }
    }
}

impl GpuPerObjectData {
    /// Copies submesh bounds into the record's packed representation.
    pub fn set_bounds(&mut self, bounds: &RenderBounds) {
        self.sphere_bounds = bounds.origin.extend(bounds.radius);
        self.extents = bounds.extents.extend(1.0);
    }

    /// Stamps the frame matrices and derives the moved flag.
    ///
    /// Two matrices count as unmoved only when they are bit-identical.
    pub fn stamp(&mut self, model_matrix: &Mat4, model_matrix_prev: &Mat4) {
        self.model_matrix = *model_matrix;
        self.model_matrix_prev = *model_matrix_prev;
        self.object_moved = u32::from(!model_matrix.bitwise_eq(model_matrix_prev));
    }
}
