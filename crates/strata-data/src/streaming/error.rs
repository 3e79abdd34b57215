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

use strata_core::asset::AssetUUID;
use thiserror::Error;

/// Errors raised by the mesh sources and the uploader.
#[derive(Debug, Error)]
pub enum StreamingError {
    /// The source has no mesh for the identifier.
    #[error("mesh {0} not found")]
    MeshNotFound(AssetUUID),
    /// The source failed to read the mesh data.
    #[error("failed to read mesh {uuid}")]
    Io {
        /// The mesh being read.
        uuid: AssetUUID,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The mesh data is unusable.
    #[error("mesh {uuid} is invalid: {reason}")]
    InvalidMesh {
        /// The mesh being read.
        uuid: AssetUUID,
        /// What is wrong with it.
        reason: String,
    },
    /// Every bindless slot is in use.
    #[error("bindless table exhausted ({capacity} slots)")]
    BindlessExhausted {
        /// Size of the table.
        capacity: u32,
    },
    /// The uploader is shutting down and no longer accepts work.
    #[error("uploader is shut down")]
    UploaderClosed,
}
