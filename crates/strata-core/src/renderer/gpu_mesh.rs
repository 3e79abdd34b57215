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

//! Defines the GPU-resident mesh asset and the shared handle used to reach it.

use crate::asset::AssetUUID;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, OnceLock,
};

/// The GPU representation of an uploaded mesh.
///
/// The buffers themselves live in the bindless tables; render records refer to
/// them by index only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuMeshAsset {
    /// Bindless index of the vertex buffer.
    pub vertices_bindless_index: u32,
    /// Bindless index of the index buffer.
    pub indices_bindless_index: u32,
    /// Number of vertices in the vertex buffer.
    pub vertex_count: u32,
    /// Number of `u32` indices in the index buffer.
    pub index_count: u32,
    /// GPU memory used by both buffers, in bytes.
    pub size_bytes: u64,
}

/// Loading state of a [`GpuMeshHandle`], as observed by a poller.
///
/// State flow: `Loading -> Ready` or `Loading -> Failed`. Both end states are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// The upload has been requested and has not finished yet.
    Loading,
    /// The GPU buffers are resident and the asset can be used.
    Ready,
    /// The mesh source could not provide the data. The handle will never be ready.
    Failed,
}

#[derive(Debug)]
struct GpuMeshSlot {
    uuid: AssetUUID,
    asset: OnceLock<GpuMeshAsset>,
    failed: AtomicBool,
}

/// A shared, reference-counted handle to a cache entry of the GPU mesh cache.
///
/// The handle is created in the `Loading` state by the cache and published once
/// by the uploader. Publication goes through a [`OnceLock`], so readiness can be
/// polled from the update thread while a worker thread completes the upload.
/// Readiness never reverts: once `is_ready()` returns `true` it stays `true` for
/// the lifetime of the entry.
///
/// Eviction only drops the cache's own clone; a component holding a handle can
/// keep using it.
#[derive(Debug, Clone)]
pub struct GpuMeshHandle(Arc<GpuMeshSlot>);

impl GpuMeshHandle {
    /// Creates a handle whose upload has not completed yet.
    pub fn pending(uuid: AssetUUID) -> Self {
        Self(Arc::new(GpuMeshSlot {
            uuid,
            asset: OnceLock::new(),
            failed: AtomicBool::new(false),
        }))
    }

    /// Creates a handle that is ready from the start.
    pub fn resident(uuid: AssetUUID, asset: GpuMeshAsset) -> Self {
        let handle = Self::pending(uuid);
        handle.publish(asset);
        handle
    }

    /// The identifier of the mesh this handle refers to.
    pub fn uuid(&self) -> AssetUUID {
        self.0.uuid
    }

    /// Returns `true` once the GPU buffers are resident.
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.0.asset.get().is_some()
    }

    /// Returns the GPU asset if the handle is ready.
    #[inline]
    pub fn ready_asset(&self) -> Option<&GpuMeshAsset> {
        self.0.asset.get()
    }

    /// Returns the current loading state.
    pub fn status(&self) -> LoadStatus {
        if self.is_ready() {
            LoadStatus::Ready
        } else if self.0.failed.load(Ordering::Acquire) {
            LoadStatus::Failed
        } else {
            LoadStatus::Loading
        }
    }

    /// Publishes the uploaded asset. Returns `false` if the handle was already
    /// published, in which case the first asset is kept.
    pub fn publish(&self, asset: GpuMeshAsset) -> bool {
        self.0.asset.set(asset).is_ok()
    }

    /// Marks the upload as failed. Has no effect on a ready handle.
    pub fn mark_failed(&self) {
        self.0.failed.store(true, Ordering::Release);
    }

    /// Number of vertices, available once ready.
    pub fn vertices_count(&self) -> Option<u32> {
        self.ready_asset().map(|asset| asset.vertex_count)
    }

    /// Number of indices, available once ready.
    pub fn indices_count(&self) -> Option<u32> {
        self.ready_asset().map(|asset| asset.index_count)
    }

    /// Returns `true` if both handles refer to the same cache entry.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Number of live handles to the entry, the cache's own included.
    pub fn strong_count(this: &Self) -> usize {
        Arc::strong_count(&this.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn asset() -> GpuMeshAsset {
        GpuMeshAsset {
            vertices_bindless_index: 3,
            indices_bindless_index: 4,
            vertex_count: 24,
            index_count: 36,
            size_bytes: 1024,
        }
    }

    #[test]
    fn test_pending_handle_is_not_ready() {
        let handle = GpuMeshHandle::pending(AssetUUID::new());
        assert!(!handle.is_ready());
        assert_eq!(handle.status(), LoadStatus::Loading);
        assert!(handle.ready_asset().is_none());
        assert_eq!(handle.indices_count(), None);
    }

    #[test]
    fn test_publish_is_visible_through_clones() {
        let handle = GpuMeshHandle::pending(AssetUUID::new());
        let clone = handle.clone();
        assert!(handle.publish(asset()));
        assert!(clone.is_ready());
        assert_eq!(clone.indices_count(), Some(36));
        assert!(GpuMeshHandle::ptr_eq(&handle, &clone));
    }

    #[test]
    fn test_second_publish_keeps_first_asset() {
        let handle = GpuMeshHandle::resident(AssetUUID::new(), asset());
        let other = GpuMeshAsset {
            index_count: 1,
            ..asset()
        };
        assert!(!handle.publish(other));
        assert_eq!(handle.indices_count(), Some(36));
    }

    #[test]
    fn test_ready_wins_over_failed() {
        let handle = GpuMeshHandle::resident(AssetUUID::new(), asset());
        handle.mark_failed();
        assert_eq!(handle.status(), LoadStatus::Ready);

        let failed = GpuMeshHandle::pending(AssetUUID::new());
        failed.mark_failed();
        assert_eq!(failed.status(), LoadStatus::Failed);
    }

    #[test]
    fn test_publish_from_worker_thread() {
        let handle = GpuMeshHandle::pending(AssetUUID::new());
        let worker_handle = handle.clone();
        thread::spawn(move || {
            worker_handle.publish(asset());
        })
        .join()
        .expect("worker thread panicked");
        assert!(handle.is_ready());
    }
}
