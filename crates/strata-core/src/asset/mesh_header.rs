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

//! Defines the static description of a mesh asset, as stored by the asset registry.

use super::{Asset, AssetHandle, AssetUUID};
use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// The bounding volumes of a submesh, in mesh-local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderBounds {
    /// Center of the bounding sphere (also the center of the box).
    pub origin: Vec3,
    /// Radius of the bounding sphere.
    pub radius: f32,
    /// Half-extents of the axis-aligned bounding box.
    pub extents: Vec3,
}

/// A contiguous index range of a mesh drawn with a single material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubMesh {
    /// First index of the range within the mesh index buffer.
    pub index_start_position: u32,
    /// Number of indices in the range.
    pub index_count: u32,
    /// Bounds of the geometry covered by the range.
    pub bounds: RenderBounds,
    /// Material asset used by the range. Empty selects the default material.
    pub material: AssetUUID,
}

/// The registry-side header of a static mesh asset.
///
/// Headers are lightweight and available without loading any geometry. Meshes
/// that ship with the engine (primitives) have no header at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticMeshAssetHeader {
    /// Human-readable name shown by tooling.
    pub name: String,
    /// Submeshes in draw order.
    pub submeshes: Vec<SubMesh>,
}

impl Asset for StaticMeshAssetHeader {}

/// Read access to static mesh headers, keyed by asset identifier.
///
/// A missing header is not an error: the caller falls back to built-in
/// whole-mesh behavior.
pub trait MeshHeaderRegistry: Send + Sync {
    /// Returns the header registered for `uuid`, if any.
    fn try_get_header(&self, uuid: &AssetUUID) -> Option<AssetHandle<StaticMeshAssetHeader>>;
}
