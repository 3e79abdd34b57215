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

//! A generic, type-safe storage for loaded asset handles.

use strata_core::asset::{Asset, AssetHandle, AssetUUID};
use std::collections::HashMap;

/// An in-memory map from `AssetUUID` to a shared `AssetHandle<A>`.
///
/// A given asset is stored once; lookups hand out clones of the handle.
pub struct Assets<A: Asset> {
    storage: HashMap<AssetUUID, AssetHandle<A>>,
}

impl<A: Asset> Default for Assets<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Asset> Assets<A> {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self {
            storage: HashMap::new(),
        }
    }

    /// Inserts a handle, replacing and returning any previous one.
    pub fn insert(&mut self, uuid: AssetUUID, handle: AssetHandle<A>) -> Option<AssetHandle<A>> {
        self.storage.insert(uuid, handle)
    }

    /// Returns the handle stored for `uuid`.
    pub fn get(&self, uuid: &AssetUUID) -> Option<&AssetHandle<A>> {
        self.storage.get(uuid)
    }

    /// Removes and returns the handle stored for `uuid`.
    pub fn remove(&mut self, uuid: &AssetUUID) -> Option<AssetHandle<A>> {
        self.storage.remove(uuid)
    }

    /// Checks whether `uuid` is stored.
    pub fn contains(&self, uuid: &AssetUUID) -> bool {
        self.storage.contains_key(uuid)
    }

    /// Number of stored assets.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Iterates over the stored identifiers.
    pub fn uuids(&self) -> impl Iterator<Item = &AssetUUID> {
        self.storage.keys()
    }
}
