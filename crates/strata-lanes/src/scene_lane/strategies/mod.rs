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

//! Defines the contract of scene serialization strategies and their errors.
//!
//! Each [`SerializationStrategy`] converts a [`Scene`] to and from one payload
//! format. The agent picks one, writes its id into the container header, and
//! looks it up again by that id when loading.

mod bincode_lane;
mod definition_lane;

pub use bincode_lane::*;
pub use definition_lane::*;

use strata_core::{lane::Lane, renderer::MeshStreamingContext};
use strata_data::scene::{Scene, SceneError};
use thiserror::Error;

/// An error that can occur while serializing a scene.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// The payload could not be produced.
    #[error("serialization failed: {0}")]
    ProcessingFailed(String),
}

/// An error that can occur while deserializing a scene.
#[derive(Debug, Error)]
pub enum DeserializationError {
    /// The payload is corrupted or not in this strategy's format.
    #[error("deserialization failed: invalid format - {0}")]
    InvalidFormat(String),
    /// The payload decoded but does not describe a valid scene.
    #[error("deserialization failed: scene population - {0}")]
    ScenePopulationFailed(#[from] SceneError),
}

/// A scene serialization strategy.
pub trait SerializationStrategy: Lane {
    /// The versioned identifier written into the scene header.
    fn get_strategy_id(&self) -> &'static str {
        self.strategy_name()
    }

    /// Serializes `scene` into a payload.
    fn serialize(&self, scene: &Scene) -> Result<Vec<u8>, SerializationError>;

    /// Builds a scene from a payload, wiring its static meshes to `context`.
    ///
    /// `data` is the payload only; the container header has already been
    /// parsed and matched to this strategy. The returned scene is clean.
    fn deserialize(
        &self,
        data: &[u8],
        context: MeshStreamingContext,
    ) -> Result<Scene, DeserializationError>;
}
