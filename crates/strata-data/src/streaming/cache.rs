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

//! The LRU GPU mesh cache.

use super::{BindlessIndexAllocator, MeshUploader};
use crate::config::MeshCacheConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use strata_core::{
    asset::AssetUUID,
    renderer::{GpuMeshCache, GpuMeshHandle, LoadStatus},
};

/// Counters describing the cache's activity since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshCacheStats {
    /// `get_or_create` calls served by an existing entry.
    pub hits: u64,
    /// `get_or_create` calls that created an entry.
    pub misses: u64,
    /// Entries removed by shrink passes.
    pub evictions: u64,
    /// Shrink passes run.
    pub shrink_passes: u64,
    /// GPU memory used by ready entries, in bytes.
    pub resident_bytes: u64,
    /// Entries currently cached.
    pub entries: usize,
}

struct CacheEntry {
    handle: GpuMeshHandle,
    last_used: u64,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<AssetUUID, CacheEntry>,
    clock: u64,
    stats: MeshCacheStats,
}

impl CacheState {
    fn resident_bytes(&self) -> u64 {
        self.entries
            .values()
            .filter_map(|entry| entry.handle.ready_asset())
            .map(|asset| asset.size_bytes)
            .sum()
    }
}

/// The shared GPU mesh cache.
///
/// Entries are created on first request and uploaded by the [`MeshUploader`].
/// Shrink passes run from [`MeshManager::update`], either after a hint or on
/// every update when configured. A pass first drops failed entries, then evicts
/// least-recently-used entries until the resident size fits the budget. Only
/// entries held by nobody but the cache are candidates.
pub struct MeshManager {
    state: Mutex<CacheState>,
    shrink_requested: AtomicBool,
    uploader: Arc<MeshUploader>,
    bindless: Arc<BindlessIndexAllocator>,
    config: MeshCacheConfig,
}

impl MeshManager {
    /// Creates an empty cache feeding `uploader`.
    pub fn new(
        config: MeshCacheConfig,
        uploader: Arc<MeshUploader>,
        bindless: Arc<BindlessIndexAllocator>,
    ) -> Self {
        log::info!(
            "Mesh cache created with a budget of {} bytes.",
            config.budget_bytes
        );
        Self {
            state: Mutex::new(CacheState::default()),
            shrink_requested: AtomicBool::new(false),
            uploader,
            bindless,
            config,
        }
    }

    /// Per-tick maintenance: runs a shrink pass if one is due.
    ///
    /// Returns the number of evicted entries.
    pub fn update(&self) -> usize {
        let hinted = self.shrink_requested.swap(false, Ordering::AcqRel);
        if hinted || self.config.shrink_every_update {
            self.shrink()
        } else {
            0
        }
    }

    /// Runs a shrink pass now. Returns the number of evicted entries.
    pub fn shrink(&self) -> usize {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.stats.shrink_passes += 1;
        let mut evicted = 0;

        // Failed entries never become ready; dropping them lets a later request retry.
        state.entries.retain(|uuid, entry| {
            let keep = entry.handle.status() != LoadStatus::Failed
                || GpuMeshHandle::strong_count(&entry.handle) > 1;
            if !keep {
                log::trace!("Dropping failed mesh entry {}", uuid);
                evicted += 1;
            }
            keep
        });

        let mut resident = state.resident_bytes();
        if resident > self.config.budget_bytes {
            let mut candidates: Vec<(u64, AssetUUID)> = state
                .entries
                .iter()
                .filter(|(_, entry)| GpuMeshHandle::strong_count(&entry.handle) == 1)
                .map(|(uuid, entry)| (entry.last_used, *uuid))
                .collect();
            candidates.sort_unstable();

            for (_, uuid) in candidates {
                if resident <= self.config.budget_bytes {
                    break;
                }
                let Some(entry) = state.entries.remove(&uuid) else {
                    continue;
                };
                if let Some(asset) = entry.handle.ready_asset() {
                    resident = resident.saturating_sub(asset.size_bytes);
                    self.bindless.free(asset.vertices_bindless_index);
                    self.bindless.free(asset.indices_bindless_index);
                }
                log::trace!("Evicted mesh {}", uuid);
                evicted += 1;
            }

            if resident > self.config.budget_bytes {
                log::debug!(
                    "Mesh cache over budget after shrink: {} of {} bytes are in use.",
                    resident,
                    self.config.budget_bytes
                );
            }
        }

        state.stats.evictions += evicted as u64;
        evicted
    }

    /// Returns `true` if `uuid` has an entry.
    pub fn contains(&self, uuid: &AssetUUID) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .contains_key(uuid)
    }

    /// Returns `true` if a shrink hint is waiting for the next update.
    pub fn shrink_pending(&self) -> bool {
        self.shrink_requested.load(Ordering::Acquire)
    }

    /// A snapshot of the cache counters.
    pub fn stats(&self) -> MeshCacheStats {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        MeshCacheStats {
            resident_bytes: state.resident_bytes(),
            entries: state.entries.len(),
            ..state.stats
        }
    }
}

impl GpuMeshCache for MeshManager {
    fn get_or_create(&self, uuid: AssetUUID) -> GpuMeshHandle {
        let handle = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            state.clock += 1;
            let now = state.clock;
            if let Some(entry) = state.entries.get_mut(&uuid) {
                entry.last_used = now;
                let handle = entry.handle.clone();
                state.stats.hits += 1;
                return handle;
            }

            state.stats.misses += 1;
            let handle = GpuMeshHandle::pending(uuid);
            state.entries.insert(
                uuid,
                CacheEntry {
                    handle: handle.clone(),
                    last_used: now,
                },
            );
            handle
        };

        if let Err(err) = self.uploader.enqueue(handle.clone()) {
            log::error!("Could not queue upload of mesh {}: {}", uuid, err);
            handle.mark_failed();
        }
        handle
    }

    fn request_shrink(&self) {
        self.shrink_requested.store(true, Ordering::Release);
    }
}
