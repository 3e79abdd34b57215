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

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A globally unique, persistent identifier for a logical asset.
///
/// This UUID represents the "idea" of an asset, decoupled from where its bytes
/// live. Scenes persist it, the asset registry and the GPU mesh cache are keyed
/// by it.
///
/// The nil UUID is reserved as the *empty* identifier, meaning "nothing bound".
/// It is also the [`Default`] value, so a freshly created component starts
/// without a mesh.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AssetUUID(Uuid);

impl AssetUUID {
    /// The empty identifier.
    pub const EMPTY: Self = Self(Uuid::nil());

    /// Creates a new, random (version 4) `AssetUUID`.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a deterministic (version 5) `AssetUUID` from a logical path.
    ///
    /// The same path always yields the same identifier, which lets tools and
    /// tests refer to assets by name.
    pub fn new_v5(path: &str) -> Self {
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, path.as_bytes()))
    }

    /// Wraps an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns `true` if this is the empty identifier.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for AssetUUID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "<empty>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        assert!(AssetUUID::default().is_empty());
        assert_eq!(AssetUUID::default(), AssetUUID::EMPTY);
        assert!(!AssetUUID::new().is_empty());
    }

    #[test]
    fn test_v5_is_stable() {
        assert_eq!(
            AssetUUID::new_v5("meshes/sponza.mesh"),
            AssetUUID::new_v5("meshes/sponza.mesh")
        );
        assert_ne!(
            AssetUUID::new_v5("meshes/sponza.mesh"),
            AssetUUID::new_v5("meshes/cube.mesh")
        );
    }

    #[test]
    fn test_empty_orders_first() {
        let ids = [AssetUUID::new(), AssetUUID::EMPTY, AssetUUID::new()];
        let min = ids.iter().min().copied();
        assert_eq!(min, Some(AssetUUID::EMPTY));
    }
}
