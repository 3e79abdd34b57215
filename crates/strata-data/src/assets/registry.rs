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

//! The registry of static mesh headers.

use super::storage::Assets;
use std::sync::{PoisonError, RwLock};
use strata_core::asset::{AssetHandle, AssetUUID, MeshHeaderRegistry, StaticMeshAssetHeader};

/// Thread-safe map from mesh identifiers to their headers.
///
/// Headers are registered by import tooling or loaders and read by static mesh
/// components when they bind an identifier.
#[derive(Default)]
pub struct AssetRegistry {
    headers: RwLock<Assets<StaticMeshAssetHeader>>,
}

impl AssetRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the header of `uuid`.
    ///
    /// Components that already cached the previous header keep it until they
    /// rebind.
    pub fn register_header(&self, uuid: AssetUUID, header: StaticMeshAssetHeader) {
        let mut headers = self.headers.write().unwrap_or_else(PoisonError::into_inner);
        if headers.insert(uuid, AssetHandle::new(header)).is_some() {
            log::debug!("Replaced mesh header for {}", uuid);
        }
    }

    /// Removes the header of `uuid`. Returns `true` if one was registered.
    pub fn unregister_header(&self, uuid: &AssetUUID) -> bool {
        self.headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(uuid)
            .is_some()
    }

    /// Number of registered headers.
    pub fn len(&self) -> usize {
        self.headers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no header is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MeshHeaderRegistry for AssetRegistry {
    fn try_get_header(&self, uuid: &AssetUUID) -> Option<AssetHandle<StaticMeshAssetHeader>> {
        self.headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(uuid)
            .cloned()
    }
}
