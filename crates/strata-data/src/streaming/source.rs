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

//! CPU mesh data and the sources that provide it.

use super::StreamingError;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use strata_core::{
    asset::AssetUUID,
    math::{Vec3, Vec4},
};

/// The vertex layout of static meshes.
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct StaticMeshVertex {
    /// Object-space position.
    pub position: Vec3,
    /// Object-space normal.
    pub normal: Vec3,
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// Tangent, `w` holds the bitangent sign.
    pub tangent: Vec4,
}

/// Mesh data as read from storage, before upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CpuStaticMesh {
    /// Vertex buffer contents.
    pub vertices: Vec<StaticMeshVertex>,
    /// Index buffer contents.
    pub indices: Vec<u32>,
}

impl CpuStaticMesh {
    /// Size of both buffers once uploaded, in bytes.
    pub fn gpu_size_bytes(&self) -> u64 {
        let vertices = bytemuck::cast_slice::<StaticMeshVertex, u8>(&self.vertices).len();
        let indices = bytemuck::cast_slice::<u32, u8>(&self.indices).len();
        (vertices + indices) as u64
    }

    /// Checks that every index addresses a vertex.
    pub fn validate(&self, uuid: AssetUUID) -> Result<(), StreamingError> {
        let vertex_count = self.vertices.len();
        if let Some(&bad) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(StreamingError::InvalidMesh {
                uuid,
                reason: format!("index {} out of range for {} vertices", bad, vertex_count),
            });
        }
        Ok(())
    }
}

/// Provides CPU mesh data by identifier.
///
/// Called from uploader worker threads; implementations may block on I/O.
pub trait MeshSource: Send + Sync {
    /// Reads the mesh identified by `uuid`.
    fn load_mesh(&self, uuid: AssetUUID) -> Result<CpuStaticMesh, StreamingError>;
}

/// A [`MeshSource`] backed by meshes held in memory.
#[derive(Default)]
pub struct InMemoryMeshSource {
    meshes: RwLock<HashMap<AssetUUID, CpuStaticMesh>>,
}

impl InMemoryMeshSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a mesh.
    pub fn insert(&self, uuid: AssetUUID, mesh: CpuStaticMesh) {
        self.meshes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(uuid, mesh);
    }
}

impl MeshSource for InMemoryMeshSource {
    fn load_mesh(&self, uuid: AssetUUID) -> Result<CpuStaticMesh, StreamingError> {
        self.meshes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&uuid)
            .cloned()
            .ok_or(StreamingError::MeshNotFound(uuid))
    }
}
