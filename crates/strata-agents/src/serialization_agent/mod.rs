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

//! The agent responsible for scene persistence.
//!
//! It holds a registry of [`SerializationStrategy`] lanes keyed by their id,
//! picks one from a [`SerializationGoal`] when saving, and finds it again from
//! the [`SceneHeader`](strata_core::scene::SceneHeader) when loading.

use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;
use strata_core::{
    renderer::MeshStreamingContext,
    scene::{SceneFile, SceneFormatError, SerializationGoal},
};
use strata_data::scene::Scene;
use strata_lanes::scene_lane::strategies::{
    DefinitionBincodeLane, DefinitionRonLane, DeserializationError, SerializationError,
    SerializationStrategy,
};
use thiserror::Error;

/// An error that can occur within the [`SerializationAgent`].
#[derive(Debug, Error)]
pub enum AgentError {
    /// No registered strategy has this id.
    #[error("no serialization strategy registered as '{0}'")]
    StrategyNotFound(String),
    /// The scene container is invalid or corrupted.
    #[error("invalid scene container: {0}")]
    InvalidHeader(#[from] SceneFormatError),
    /// The strategy failed to produce a payload.
    #[error(transparent)]
    Serialization(#[from] SerializationError),
    /// The strategy failed to read a payload.
    #[error(transparent)]
    Deserialization(#[from] DeserializationError),
}

/// Saves and loads scenes.
pub struct SerializationAgent {
    strategies: HashMap<&'static str, Box<dyn SerializationStrategy>>,
}

impl SerializationAgent {
    /// Creates an agent with all built-in strategies registered.
    pub fn new() -> Self {
        let mut agent = Self {
            strategies: HashMap::new(),
        };
        agent.register(Box::new(DefinitionRonLane::new()));
        agent.register(Box::new(DefinitionBincodeLane::new()));
        agent
    }

    /// Registers a strategy, replacing any strategy with the same id.
    pub fn register(&mut self, strategy: Box<dyn SerializationStrategy>) {
        let id = strategy.get_strategy_id();
        if self.strategies.insert(id, strategy).is_some() {
            log::warn!("Serialization strategy '{}' was replaced.", id);
        }
    }

    /// The id of the strategy used for `goal`.
    pub fn strategy_for_goal(goal: SerializationGoal) -> &'static str {
        match goal {
            SerializationGoal::HumanReadableDebug | SerializationGoal::LongTermStability => {
                "STRATA_DEFINITION_RON_V1"
            }
            SerializationGoal::FastestLoad | SerializationGoal::SmallestFileSize => {
                "STRATA_DEFINITION_BIN_V1"
            }
        }
    }

    fn strategy(&self, id: &str) -> Result<&dyn SerializationStrategy, AgentError> {
        self.strategies
            .get(id)
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| AgentError::StrategyNotFound(id.to_owned()))
    }

    /// Serializes `scene` into a container with the strategy matching `goal`.
    pub fn save_scene(
        &self,
        scene: &Scene,
        goal: SerializationGoal,
    ) -> Result<SceneFile, AgentError> {
        let strategy = self.strategy(Self::strategy_for_goal(goal))?;
        let payload = strategy.serialize(scene)?;
        Ok(SceneFile::new(strategy.get_strategy_id(), payload)?)
    }

    /// Builds a scene from a container, wiring its meshes to `context`.
    ///
    /// The returned scene is clean; its static meshes resolve on their first tick.
    pub fn load_scene(
        &self,
        file: &SceneFile,
        context: MeshStreamingContext,
    ) -> Result<Scene, AgentError> {
        let strategy_id = file.header.strategy_id_str()?;
        let strategy = self.strategy(strategy_id)?;
        let mut scene = strategy.deserialize(&file.payload, context)?;
        scene.set_dirty(false);
        Ok(scene)
    }

    /// Saves `scene` to `path`.
    pub fn save_to_file(
        &self,
        scene: &Scene,
        goal: SerializationGoal,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        let path = path.as_ref();
        let file = self.save_scene(scene, goal)?;
        std::fs::write(path, file.to_bytes())
            .with_context(|| format!("failed to write scene to {}", path.display()))?;
        log::info!(
            "Saved scene with {} nodes to {} ({}).",
            scene.len(),
            path.display(),
            file.header.strategy_id_str().unwrap_or("?")
        );
        Ok(())
    }

    /// Loads a scene from `path`.
    pub fn load_from_file(
        &self,
        path: impl AsRef<Path>,
        context: MeshStreamingContext,
    ) -> anyhow::Result<Scene> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read scene from {}", path.display()))?;
        let file = SceneFile::from_bytes(&bytes)
            .with_context(|| format!("{} is not a scene file", path.display()))?;
        let scene = self
            .load_scene(&file, context)
            .with_context(|| format!("failed to load scene from {}", path.display()))?;
        log::info!("Loaded scene with {} nodes from {}.", scene.len(), path.display());
        Ok(scene)
    }
}

impl Default for SerializationAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_core::{
        asset::AssetUUID,
        math::{LinearRgba, Vec3},
        scene::SceneHeader,
    };
    use strata_data::{
        config::StreamingConfig, scene::LightComponent, streaming::InMemoryMeshSource,
        StreamingServices,
    };

    fn services() -> StreamingServices {
        StreamingServices::new(
            &StreamingConfig::inline(),
            Arc::new(InMemoryMeshSource::new()),
        )
    }

    fn sample_scene(services: &StreamingServices) -> Scene {
        let mut scene = Scene::new(services.context());
        let root = scene.root();
        let ship = scene.create_node("ship", root).unwrap();
        scene.node_mut(ship).unwrap().transform.translation = Vec3::new(10.0, 0.0, 0.0);
        scene
            .add_static_mesh(ship, AssetUUID::new_v5("meshes/ship"))
            .unwrap();
        let engine_light = scene.create_node("engine_light", ship).unwrap();
        scene
            .add_light(
                engine_light,
                LightComponent::point(LinearRgba::rgb(1.0, 0.5, 0.2), 4.0, 3.0),
            )
            .unwrap();
        scene
    }

    #[test]
    fn test_goal_selects_strategy() {
        assert_eq!(
            SerializationAgent::strategy_for_goal(SerializationGoal::HumanReadableDebug),
            "STRATA_DEFINITION_RON_V1"
        );
        assert_eq!(
            SerializationAgent::strategy_for_goal(SerializationGoal::SmallestFileSize),
            "STRATA_DEFINITION_BIN_V1"
        );
    }

    #[test]
    fn test_serialization_round_trip() {
        // Arrange
        let services = services();
        let source_scene = sample_scene(&services);
        let agent = SerializationAgent::new();

        for goal in [
            SerializationGoal::LongTermStability,
            SerializationGoal::FastestLoad,
        ] {
            // Act
            let scene_file = agent.save_scene(&source_scene, goal).unwrap();
            let bytes = scene_file.to_bytes();
            let loaded_file = SceneFile::from_bytes(&bytes).unwrap();
            let loaded = agent.load_scene(&loaded_file, services.context()).unwrap();

            // Assert
            assert_eq!(
                loaded_file.header.strategy_id_str().unwrap(),
                SerializationAgent::strategy_for_goal(goal)
            );
            assert_eq!(loaded.to_definition(), source_scene.to_definition());
            assert!(!loaded.is_dirty());
        }
    }

    #[test]
    fn test_unknown_strategy_is_reported() {
        let services = services();
        let file = SceneFile {
            header: SceneHeader::new("SOMEONE_ELSES_V9", 0).unwrap(),
            payload: Vec::new(),
        };

        let result = SerializationAgent::new().load_scene(&file, services.context());

        assert!(matches!(
            result,
            Err(AgentError::StrategyNotFound(id)) if id == "SOMEONE_ELSES_V9"
        ));
    }

    #[test]
    fn test_corrupted_payload_is_a_deserialization_error() {
        let services = services();
        let agent = SerializationAgent::new();
        let mut file = agent
            .save_scene(&sample_scene(&services), SerializationGoal::FastestLoad)
            .unwrap();
        file.payload.truncate(3);

        let result = agent.load_scene(&file, services.context());

        assert!(matches!(result, Err(AgentError::Deserialization(_))));
    }
}
