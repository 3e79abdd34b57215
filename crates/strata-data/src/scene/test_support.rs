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

//! Test doubles shared by the scene tests.

use crate::assets::{AssetRegistry, MaterialLibrary};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use strata_core::{
    asset::AssetUUID,
    renderer::{GpuMeshCache, GpuMeshHandle, MeshStreamingContext, UploadStatus},
};

/// A cache that never uploads and counts shrink hints, plus a toggleable uploader.
#[derive(Default)]
pub(crate) struct CountingContext {
    hints: Arc<AtomicUsize>,
    busy: Arc<AtomicBool>,
}

struct CountingCache(Arc<AtomicUsize>);

impl GpuMeshCache for CountingCache {
    fn get_or_create(&self, uuid: AssetUUID) -> GpuMeshHandle {
        GpuMeshHandle::pending(uuid)
    }

    fn request_shrink(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct BusyFlag(Arc<AtomicBool>);

impl UploadStatus for BusyFlag {
    fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

impl CountingContext {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn context(&self) -> MeshStreamingContext {
        MeshStreamingContext {
            cache: Arc::new(CountingCache(self.hints.clone())),
            uploader: Arc::new(BusyFlag(self.busy.clone())),
            headers: Arc::new(AssetRegistry::new()),
            materials: Arc::new(MaterialLibrary::new()),
        }
    }

    pub(crate) fn hints(&self) -> usize {
        self.hints.load(Ordering::SeqCst)
    }

    pub(crate) fn set_busy(&self, busy: bool) {
        self.busy.store(busy, Ordering::SeqCst);
    }
}
