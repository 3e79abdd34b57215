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

//! Renderer-facing data types and the contracts of the mesh streaming services.
//!
//! Nothing here talks to a graphics API. The types are plain data laid out for
//! upload, and the traits describe the cache, uploader and providers that the
//! scene components are wired to.

pub mod gpu_mesh;
pub mod light;
pub mod material;
pub mod per_object;
pub mod traits;

pub use self::gpu_mesh::{GpuMeshAsset, GpuMeshHandle, LoadStatus};
pub use self::light::{CascadeShadowSettings, ExtractedLight, LightKind};
pub use self::material::{GpuStandardMaterial, MaterialInstance, MaterialProvider, BINDLESS_NONE};
pub use self::per_object::{GpuPerObjectData, BUILT_IN_EXTENTS, BUILT_IN_SPHERE_BOUNDS};
pub use self::traits::{GpuMeshCache, MeshStreamingContext, TransformProvider, UploadStatus};
