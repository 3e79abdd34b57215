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

//! Collaborator contracts consumed by the render record builder.

use super::gpu_mesh::GpuMeshHandle;
use super::material::MaterialProvider;
use crate::asset::{AssetUUID, MeshHeaderRegistry};
use crate::math::Mat4;
use std::sync::Arc;

/// A shared cache of GPU meshes keyed by asset identifier.
///
/// Implementations evict least-recently-used entries under memory pressure,
/// but never an entry whose handle is still held outside the cache.
pub trait GpuMeshCache: Send + Sync {
    /// Returns the cached handle for `uuid`, or inserts a new not-ready handle
    /// and starts its load. At most one load is in flight per identifier.
    fn get_or_create(&self, uuid: AssetUUID) -> GpuMeshHandle;

    /// Hints that a shrink pass should run soon. Advisory, never blocks.
    fn request_shrink(&self);
}

/// Exposes whether the GPU uploader currently has pending work.
pub trait UploadStatus: Send + Sync {
    /// Returns `true` while at least one upload is queued or in flight.
    /// Must not block.
    fn is_busy(&self) -> bool;
}

/// Read access to the frame matrices of a scene node.
pub trait TransformProvider {
    /// World matrix for the current frame.
    fn world_matrix(&self) -> Mat4;
    /// World matrix for the previous frame.
    fn prev_world_matrix(&self) -> Mat4;
}

/// The services a static mesh component talks to.
///
/// Cloning is cheap: every field is shared.
#[derive(Clone)]
pub struct MeshStreamingContext {
    /// The GPU mesh cache.
    pub cache: Arc<dyn GpuMeshCache>,
    /// The uploader busy predicate.
    pub uploader: Arc<dyn UploadStatus>,
    /// Mesh header lookup.
    pub headers: Arc<dyn MeshHeaderRegistry>,
    /// Material construction.
    pub materials: Arc<dyn MaterialProvider>,
}

impl std::fmt::Debug for MeshStreamingContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeshStreamingContext").finish_non_exhaustive()
    }
}
