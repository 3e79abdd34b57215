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

//! Provides the foundational traits and primitive types for Strata's asset system.
//!
//! This module defines the "common language" for asset-related operations:
//! - The [`Asset`] trait, a marker for everything that can be shared through an
//!   [`AssetHandle`].
//! - [`AssetUUID`], the stable identifier used throughout the engine, including
//!   its empty sentinel.
//! - The static mesh header types and the [`MeshHeaderRegistry`] contract.
//!
//! It has no knowledge of how assets are loaded or stored.

mod handle;
mod mesh_header;
mod uuid;

pub use handle::*;
pub use mesh_header::*;
pub use uuid::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits make assets shareable across the update thread and the
/// background upload workers.
///
/// # Examples
///
/// ```
/// use strata_core::asset::Asset;
///
/// struct Texture {
///     // ... fields
/// }
///
/// impl Asset for Texture {}
/// ```
pub trait Asset: Send + Sync + 'static {}
