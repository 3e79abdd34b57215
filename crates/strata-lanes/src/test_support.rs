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

use std::sync::Arc;
use strata_core::{
    asset::AssetUUID,
    math::{Vec3, Vec4},
    renderer::MeshStreamingContext,
};
use strata_data::{
    config::StreamingConfig,
    streaming::{CpuStaticMesh, InMemoryMeshSource, StaticMeshVertex},
    StreamingServices,
};

/// Inline streaming services over an in-memory source.
pub(crate) struct Fixture {
    pub services: StreamingServices,
    pub source: Arc<InMemoryMeshSource>,
}

impl Fixture {
    pub fn new() -> Self {
        let source = Arc::new(InMemoryMeshSource::new());
        let services = StreamingServices::new(&StreamingConfig::inline(), source.clone());
        Self { services, source }
    }

    pub fn context(&self) -> MeshStreamingContext {
        self.services.context()
    }

    /// Registers an 8-vertex, 36-index cube under `uuid`.
    pub fn add_cube(&self, uuid: AssetUUID) {
        let vertices = (0..8)
            .map(|corner| StaticMeshVertex {
                position: Vec3::new(
                    if corner & 1 == 0 { -1.0 } else { 1.0 },
                    if corner & 2 == 0 { -1.0 } else { 1.0 },
                    if corner & 4 == 0 { -1.0 } else { 1.0 },
                ),
                tangent: Vec4::new(1.0, 0.0, 0.0, 1.0),
                ..StaticMeshVertex::default()
            })
            .collect();
        let indices = vec![
            0, 2, 1, 1, 2, 3, 4, 5, 6, 5, 7, 6, 0, 1, 4, 1, 5, 4, 2, 6, 3, 3, 6, 7, 0, 4, 2, 2,
            4, 6, 1, 3, 5, 3, 7, 5,
        ];
        self.source.insert(uuid, CpuStaticMesh { vertices, indices });
    }
}
