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

//! # Strata Data
//!
//! The stateful half of the pipeline: streaming configuration, the GPU mesh
//! cache and uploader, CPU-side asset storage, and the scene graph with its
//! components.

#![warn(missing_docs)]

pub mod assets;
pub mod config;
pub mod scene;
pub mod streaming;

use std::sync::Arc;
use strata_core::renderer::MeshStreamingContext;

use assets::{AssetRegistry, MaterialLibrary};
use config::StreamingConfig;
use streaming::{BindlessIndexAllocator, MeshManager, MeshSource, MeshUploader};

/// The concrete streaming services, wired together.
///
/// Keeps typed handles for maintenance calls (`pump`, `update`, stats) while
/// [`StreamingServices::context`] hands the same instances to components
/// behind their traits.
#[derive(Clone)]
pub struct StreamingServices {
    /// The GPU mesh cache.
    pub cache: Arc<MeshManager>,
    /// The uploader.
    pub uploader: Arc<MeshUploader>,
    /// The bindless slot allocator shared by cache and uploader.
    pub bindless: Arc<BindlessIndexAllocator>,
    /// Mesh headers.
    pub registry: Arc<AssetRegistry>,
    /// Materials.
    pub materials: Arc<MaterialLibrary>,
}

impl StreamingServices {
    /// Builds every service from `config`, reading meshes from `source`.
    pub fn new(config: &StreamingConfig, source: Arc<dyn MeshSource>) -> Self {
        let bindless = Arc::new(BindlessIndexAllocator::new(
            config.uploader.bindless_capacity,
        ));
        let uploader = Arc::new(MeshUploader::new(
            &config.uploader,
            source,
            Arc::clone(&bindless),
        ));
        let cache = Arc::new(MeshManager::new(
            config.mesh_cache.clone(),
            Arc::clone(&uploader),
            Arc::clone(&bindless),
        ));
        Self {
            cache,
            uploader,
            bindless,
            registry: Arc::new(AssetRegistry::new()),
            materials: Arc::new(MaterialLibrary::new()),
        }
    }

    /// The trait-object view handed to scene components.
    pub fn context(&self) -> MeshStreamingContext {
        MeshStreamingContext {
            cache: self.cache.clone(),
            uploader: self.uploader.clone(),
            headers: self.registry.clone(),
            materials: self.materials.clone(),
        }
    }
}
