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

//! Defines the `StreamingSceneAgent`.

use crate::serialization_agent::SerializationAgent;
use std::path::Path;
use std::sync::Arc;
use strata_core::{asset::AssetUUID, renderer::MeshStreamingContext, scene::SerializationGoal};
use strata_data::{
    config::{ConfigError, StreamingConfig},
    scene::{NodeId, Scene, SceneError},
    streaming::MeshSource,
    StreamingServices,
};
use strata_lanes::{
    render_lane::{RenderCollectLane, RenderWorld},
    scene_lane::{ComponentTickLane, TransformPropagationLane},
};

/// Counters of the last `update` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Uploads run inline by this update.
    pub uploads_pumped: usize,
    /// Cache entries evicted by this update.
    pub evicted: usize,
}

/// Owns a scene and its streaming services, and runs the frame loop over them.
pub struct StreamingSceneAgent {
    // Declared first so components drop (and send their shrink hints) before the services.
    scene: Scene,
    services: StreamingServices,
    tick_lane: ComponentTickLane,
    propagation_lane: TransformPropagationLane,
    collect_lane: RenderCollectLane,
    frame_count: u64,
}

impl StreamingSceneAgent {
    /// Creates the services described by `config` and an empty scene.
    pub fn new(config: &StreamingConfig, source: Arc<dyn MeshSource>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_services(StreamingServices::new(config, source)))
    }

    /// Wraps existing services with an empty scene.
    pub fn from_services(services: StreamingServices) -> Self {
        Self {
            scene: Scene::new(services.context()),
            services,
            tick_lane: ComponentTickLane::new(),
            propagation_lane: TransformPropagationLane::new(),
            collect_lane: RenderCollectLane::new(),
            frame_count: 0,
        }
    }

    /// The streaming services.
    pub fn services(&self) -> &StreamingServices {
        &self.services
    }

    /// The context handed to components of this agent's scene.
    pub fn context(&self) -> MeshStreamingContext {
        self.services.context()
    }

    /// The current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The current scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Swaps in `scene` and returns the previous one.
    ///
    /// `scene` should have been built with [`StreamingSceneAgent::context`].
    pub fn replace_scene(&mut self, scene: Scene) -> Scene {
        std::mem::replace(&mut self.scene, scene)
    }

    /// Number of completed `extract` calls.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Binds `uuid` to the static mesh of `node`.
    ///
    /// Returns `Ok(false)` when the uploader is busy or the mesh is already bound.
    pub fn set_static_mesh(&mut self, node: NodeId, uuid: AssetUUID) -> Result<bool, SceneError> {
        self.scene.set_static_mesh(node, uuid)
    }

    /// Simulation-side step: runs pending inline uploads, ticks every
    /// component, then lets the cache shrink if a hint was raised.
    pub fn update(&mut self) -> UpdateReport {
        let uploads_pumped = self.services.uploader.pump();
        self.tick_lane.run(&mut self.scene);
        let evicted = self.services.cache.update();
        if evicted > 0 {
            log::trace!("Mesh cache evicted {} entries.", evicted);
        }
        UpdateReport {
            uploads_pumped,
            evicted,
        }
    }

    /// Render-side step: propagates transforms, then fills `render_world`.
    pub fn extract(&mut self, render_world: &mut RenderWorld) {
        self.propagation_lane.run(&mut self.scene);
        self.collect_lane.run(&self.scene, render_world);
        self.frame_count += 1;
    }

    /// Saves the scene to `path` and marks it clean.
    pub fn save_scene(
        &mut self,
        serializer: &SerializationAgent,
        goal: SerializationGoal,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        serializer.save_to_file(&self.scene, goal, path)?;
        self.scene.set_dirty(false);
        Ok(())
    }

    /// Replaces the scene with the one stored at `path`.
    ///
    /// On error the current scene is kept.
    pub fn load_scene(
        &mut self,
        serializer: &SerializationAgent,
        path: impl AsRef<Path>,
    ) -> anyhow::Result<()> {
        let scene = serializer.load_from_file(path, self.context())?;
        self.replace_scene(scene);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::math::Vec3;
    use strata_data::streaming::{CpuStaticMesh, InMemoryMeshSource, StaticMeshVertex};

    fn triangle() -> CpuStaticMesh {
        CpuStaticMesh {
            vertices: vec![StaticMeshVertex::default(); 3],
            indices: vec![0, 1, 2],
        }
    }

    fn inline_agent() -> (StreamingSceneAgent, Arc<InMemoryMeshSource>) {
        let source = Arc::new(InMemoryMeshSource::new());
        let agent = StreamingSceneAgent::new(&StreamingConfig::inline(), source.clone()).unwrap();
        (agent, source)
    }

    #[test]
    fn test_mesh_is_drawn_after_one_update() {
        // Arrange
        let (mut agent, source) = inline_agent();
        let mesh = AssetUUID::new_v5("meshes/triangle");
        source.insert(mesh, triangle());
        let root = agent.scene().root();
        let node = agent.scene_mut().create_node("triangle", root).unwrap();
        assert_eq!(agent.set_static_mesh(node, mesh), Ok(true));
        let mut render_world = RenderWorld::new();

        // Act
        agent.extract(&mut render_world);
        let before = render_world.objects.len();
        let report = agent.update();
        agent.extract(&mut render_world);

        // Assert
        assert_eq!(before, 0);
        assert_eq!(report.uploads_pumped, 1);
        assert_eq!(render_world.objects.len(), 1);
        assert_eq!(render_world.objects[0].index_count, 3);
        assert_eq!(agent.frame_count(), 2);
    }

    #[test]
    fn test_bind_is_refused_while_an_upload_is_queued() {
        let (mut agent, source) = inline_agent();
        let first = AssetUUID::new();
        let second = AssetUUID::new();
        source.insert(first, triangle());
        source.insert(second, triangle());
        let root = agent.scene().root();
        let a = agent.scene_mut().create_node("a", root).unwrap();
        let b = agent.scene_mut().create_node("b", root).unwrap();

        assert_eq!(agent.set_static_mesh(a, first), Ok(true));
        assert_eq!(agent.set_static_mesh(b, second), Ok(false));
        agent.update();
        assert_eq!(agent.set_static_mesh(b, second), Ok(true));
    }

    #[test]
    fn test_rebinding_lets_the_old_mesh_be_evicted() {
        let source = Arc::new(InMemoryMeshSource::new());
        let mut config = StreamingConfig::inline();
        config.mesh_cache.budget_bytes = 0;
        let mut agent = StreamingSceneAgent::new(&config, source.clone()).unwrap();
        let old = AssetUUID::new();
        let new = AssetUUID::new();
        source.insert(old, triangle());
        source.insert(new, triangle());
        let root = agent.scene().root();
        let node = agent.scene_mut().create_node("swap", root).unwrap();

        agent.set_static_mesh(node, old).unwrap();
        agent.update();
        assert!(agent.services().cache.contains(&old));

        agent.set_static_mesh(node, new).unwrap();
        let report = agent.update();

        assert_eq!(report.evicted, 1);
        assert!(!agent.services().cache.contains(&old));
        assert!(agent.services().cache.contains(&new));
    }

    #[test]
    fn test_moving_node_sets_moved_flag_for_one_frame() {
        let (mut agent, source) = inline_agent();
        let mesh = AssetUUID::new();
        source.insert(mesh, triangle());
        let root = agent.scene().root();
        let node = agent.scene_mut().create_node("mover", root).unwrap();
        agent.set_static_mesh(node, mesh).unwrap();
        agent.update();
        let mut render_world = RenderWorld::new();
        agent.extract(&mut render_world);
        agent.extract(&mut render_world);
        assert_eq!(render_world.moved_objects(), 0);

        agent.scene_mut().node_mut(node).unwrap().transform.translation = Vec3::new(0.0, 0.0, 5.0);
        agent.extract(&mut render_world);
        assert_eq!(render_world.moved_objects(), 1);

        agent.extract(&mut render_world);
        assert_eq!(render_world.moved_objects(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = StreamingConfig::inline();
        config.uploader.max_jobs_per_pump = 0;
        let result = StreamingSceneAgent::new(&config, Arc::new(InMemoryMeshSource::new()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
