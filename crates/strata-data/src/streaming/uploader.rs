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

//! The mesh uploader: reads CPU meshes and publishes their GPU assets.

use super::{BindlessIndexAllocator, MeshSource, StreamingError};
use crate::config::UploaderConfig;
use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use strata_core::{
    asset::AssetUUID,
    renderer::{GpuMeshAsset, GpuMeshHandle, UploadStatus},
};

struct UploadJob {
    handle: GpuMeshHandle,
}

struct UploadShared {
    source: Arc<dyn MeshSource>,
    bindless: Arc<BindlessIndexAllocator>,
    pending: AtomicUsize,
    completed: AtomicU64,
    failed: AtomicU64,
}

impl UploadShared {
    fn run(&self, job: UploadJob) {
        let uuid = job.handle.uuid();
        match self.upload(uuid) {
            Ok(asset) => {
                if job.handle.publish(asset) {
                    log::trace!(
                        "Uploaded mesh {} ({} indices, {} bytes)",
                        uuid,
                        asset.index_count,
                        asset.size_bytes
                    );
                    self.completed.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.bindless.free(asset.vertices_bindless_index);
                    self.bindless.free(asset.indices_bindless_index);
                }
            }
            Err(err) => {
                match &err {
                    StreamingError::Io { .. } | StreamingError::BindlessExhausted { .. } => {
                        log::error!("Mesh upload failed: {}", err)
                    }
                    _ => log::warn!("Mesh upload failed: {}", err),
                }
                job.handle.mark_failed();
                self.failed.fetch_add(1, Ordering::Relaxed);
            }
        }
        // The job's handle must be gone before the uploader reports idle.
        drop(job);
        self.pending.fetch_sub(1, Ordering::AcqRel);
    }

    fn upload(&self, uuid: AssetUUID) -> Result<GpuMeshAsset, StreamingError> {
        let mesh = self.source.load_mesh(uuid)?;
        mesh.validate(uuid)?;

        let vertices_bindless_index = self.bindless.allocate()?;
        let indices_bindless_index = match self.bindless.allocate() {
            Ok(index) => index,
            Err(err) => {
                self.bindless.free(vertices_bindless_index);
                return Err(err);
            }
        };

        Ok(GpuMeshAsset {
            vertices_bindless_index,
            indices_bindless_index,
            vertex_count: mesh.vertices.len() as u32,
            index_count: mesh.indices.len() as u32,
            size_bytes: mesh.gpu_size_bytes(),
        })
    }
}

/// Serializes mesh upload work.
///
/// Jobs go through a `crossbeam-channel` queue. With worker threads they run in
/// the background; with `worker_threads == 0` (or if no worker could be
/// spawned) they run on the caller thread during [`MeshUploader::pump`].
///
/// The uploader is busy from the moment a job is queued until it has finished
/// and released its handle.
pub struct MeshUploader {
    sender: Option<Sender<UploadJob>>,
    receiver: Receiver<UploadJob>,
    shared: Arc<UploadShared>,
    workers: Vec<thread::JoinHandle<()>>,
    max_jobs_per_pump: usize,
}

impl MeshUploader {
    /// Creates the uploader and spawns its workers.
    pub fn new(
        config: &UploaderConfig,
        source: Arc<dyn MeshSource>,
        bindless: Arc<BindlessIndexAllocator>,
    ) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let shared = Arc::new(UploadShared {
            source,
            bindless,
            pending: AtomicUsize::new(0),
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        });

        let mut workers = Vec::with_capacity(config.worker_threads);
        for index in 0..config.worker_threads {
            let receiver: Receiver<UploadJob> = receiver.clone();
            let shared = Arc::clone(&shared);
            let spawned = thread::Builder::new()
                .name(format!("strata-upload-{}", index))
                .spawn(move || {
                    log::trace!("Upload worker {} started.", index);
                    while let Ok(job) = receiver.recv() {
                        shared.run(job);
                    }
                    log::trace!("Upload worker {} stopped.", index);
                });
            match spawned {
                Ok(handle) => workers.push(handle),
                Err(err) => log::error!("Failed to spawn upload worker {}: {}", index, err),
            }
        }

        if workers.is_empty() {
            log::info!("Mesh uploader running inline.");
        } else {
            log::info!("Mesh uploader started with {} worker(s).", workers.len());
        }

        Self {
            sender: Some(sender),
            receiver,
            shared,
            workers,
            max_jobs_per_pump: config.max_jobs_per_pump.max(1),
        }
    }

    /// Queues the upload of `handle`'s mesh.
    pub fn enqueue(&self, handle: GpuMeshHandle) -> Result<(), StreamingError> {
        let Some(sender) = &self.sender else {
            return Err(StreamingError::UploaderClosed);
        };
        self.shared.pending.fetch_add(1, Ordering::AcqRel);
        if sender.send(UploadJob { handle }).is_err() {
            self.shared.pending.fetch_sub(1, Ordering::AcqRel);
            return Err(StreamingError::UploaderClosed);
        }
        Ok(())
    }

    /// Runs queued jobs on the caller thread when the uploader is inline.
    ///
    /// Returns the number of jobs run. Always `0` when workers are running.
    pub fn pump(&self) -> usize {
        if !self.workers.is_empty() {
            return 0;
        }
        let mut ran = 0;
        while ran < self.max_jobs_per_pump {
            let Ok(job) = self.receiver.try_recv() else {
                break;
            };
            self.shared.run(job);
            ran += 1;
        }
        ran
    }

    /// Returns `true` if the uploader runs jobs on `pump()`.
    pub fn is_inline(&self) -> bool {
        self.workers.is_empty()
    }

    /// Number of queued or running jobs.
    pub fn pending_jobs(&self) -> usize {
        self.shared.pending.load(Ordering::Acquire)
    }

    /// Number of uploads that published a ready asset.
    pub fn completed_uploads(&self) -> u64 {
        self.shared.completed.load(Ordering::Relaxed)
    }

    /// Number of uploads that failed.
    pub fn failed_uploads(&self) -> u64 {
        self.shared.failed.load(Ordering::Relaxed)
    }
}

impl UploadStatus for MeshUploader {
    fn is_busy(&self) -> bool {
        self.pending_jobs() > 0
    }
}

impl Drop for MeshUploader {
    fn drop(&mut self) {
        // Disconnecting the channel lets workers drain the queue and exit.
        self.sender.take();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                log::error!("An upload worker panicked.");
            }
        }
    }
}
