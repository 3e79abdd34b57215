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

//! A serialization strategy writing the scene definition as RON.

use super::{DeserializationError, SerializationError, SerializationStrategy};
use strata_core::{
    lane::{Lane, LaneKind},
    renderer::MeshStreamingContext,
};
use strata_data::scene::{Scene, SceneDefinition};

/// Serializes the [`SceneDefinition`] as pretty-printed RON.
///
/// Human-readable and tolerant to internal refactors, since only the
/// definition schema reaches the file.
#[derive(Debug, Default)]
pub struct DefinitionRonLane;

impl DefinitionRonLane {
    /// Creates a new `DefinitionRonLane`.
    pub fn new() -> Self {
        Self
    }
}

impl Lane for DefinitionRonLane {
    fn strategy_name(&self) -> &'static str {
        "STRATA_DEFINITION_RON_V1"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Scene
    }
}

impl SerializationStrategy for DefinitionRonLane {
    fn serialize(&self, scene: &Scene) -> Result<Vec<u8>, SerializationError> {
        let definition = scene.to_definition();
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(&definition, pretty_config)
            .map(String::into_bytes)
            .map_err(|e| SerializationError::ProcessingFailed(e.to_string()))
    }

    fn deserialize(
        &self,
        data: &[u8],
        context: MeshStreamingContext,
    ) -> Result<Scene, DeserializationError> {
        let definition: SceneDefinition = ron::de::from_bytes(data)
            .map_err(|e| DeserializationError::InvalidFormat(e.to_string()))?;
        Ok(Scene::from_definition(&definition, context)?)
    }
}
