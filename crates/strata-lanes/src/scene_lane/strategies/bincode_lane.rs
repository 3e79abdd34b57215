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

//! A serialization strategy writing the scene definition with bincode.

use super::{DeserializationError, SerializationError, SerializationStrategy};
use strata_core::{
    lane::{Lane, LaneKind},
    renderer::MeshStreamingContext,
};
use strata_data::scene::{Scene, SceneDefinition};

/// Serializes the [`SceneDefinition`] with bincode's standard configuration.
///
/// Compact and fast to decode; not meant to be read by people.
#[derive(Debug, Default)]
pub struct DefinitionBincodeLane;

impl DefinitionBincodeLane {
    /// Creates a new `DefinitionBincodeLane`.
    pub fn new() -> Self {
        Self
    }
}

impl Lane for DefinitionBincodeLane {
    fn strategy_name(&self) -> &'static str {
        "STRATA_DEFINITION_BIN_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Scene
    }
}

impl SerializationStrategy for DefinitionBincodeLane {
    fn serialize(&self, scene: &Scene) -> Result<Vec<u8>, SerializationError> {
        bincode::serde::encode_to_vec(scene.to_definition(), bincode::config::standard())
            .map_err(|e| SerializationError::ProcessingFailed(e.to_string()))
    }

    fn deserialize(
        &self,
        data: &[u8],
        context: MeshStreamingContext,
    ) -> Result<Scene, DeserializationError> {
        let (definition, read): (SceneDefinition, usize) =
            bincode::serde::decode_from_slice(data, bincode::config::standard())
                .map_err(|e| DeserializationError::InvalidFormat(e.to_string()))?;
        if read != data.len() {
            return Err(DeserializationError::InvalidFormat(format!(
                "{} trailing bytes after scene definition",
                data.len() - read
            )));
        }
        Ok(Scene::from_definition(&definition, context)?)
    }
}
