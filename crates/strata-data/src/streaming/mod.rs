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

//! GPU mesh streaming: the LRU cache, the uploader and their shared resources.
//!
//! The [`MeshManager`] owns cache entries and hands out [`GpuMeshHandle`]s. A
//! cache miss queues an upload on the [`MeshUploader`], which reads the mesh
//! from a [`MeshSource`], assigns bindless slots and publishes the ready asset
//! into the handle.
//!
//! [`GpuMeshHandle`]: strata_core::renderer::GpuMeshHandle

mod bindless;
mod cache;
mod error;
mod source;
mod uploader;

pub use bindless::*;
pub use cache::*;
pub use error::*;
pub use source::*;
pub use uploader::*;
