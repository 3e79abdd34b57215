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

use std::sync::Arc;
use strata_agents::{scene_agent::StreamingSceneAgent, serialization_agent::SerializationAgent};
use strata_core::{
    asset::AssetUUID,
    math::{LinearRgba, Vec3},
    scene::{SceneFile, SerializationGoal},
};
use strata_data::{
    config::StreamingConfig,
    scene::LightComponent,
    streaming::{CpuStaticMesh, InMemoryMeshSource, StaticMeshVertex},
};
use strata_lanes::render_lane::RenderWorld;

fn agent_with_crate(source: &Arc<InMemoryMeshSource>) -> (StreamingSceneAgent, AssetUUID) {
    let mesh = AssetUUID::new_v5("meshes/crate");
    source.insert(
        mesh,
        CpuStaticMesh {
            vertices: vec![StaticMeshVertex::default(); 4],
            indices: vec![0, 1, 2, 2, 3, 0],
        },
    );
    let agent = StreamingSceneAgent::new(&StreamingConfig::inline(), source.clone()).unwrap();
    (agent, mesh)
}

#[test]
fn test_scene_survives_a_trip_through_disk() -> anyhow::Result<()> {
    // --- 1. ARRANGE ---
    let dir = tempfile::tempdir()?;
    let source = Arc::new(InMemoryMeshSource::new());
    let (mut agent, mesh) = agent_with_crate(&source);
    let serializer = SerializationAgent::new();

    let root = agent.scene().root();
    let stack = agent.scene_mut().create_node("stack", root)?;
    agent.scene_mut().node_mut(stack).unwrap().transform.translation = Vec3::new(3.0, 0.0, 0.0);
    let top = agent.scene_mut().create_node("top_crate", stack)?;
    agent.scene_mut().node_mut(top).unwrap().transform.translation = Vec3::new(0.0, 1.0, 0.0);
    assert!(agent.set_static_mesh(top, mesh)?);
    agent
        .scene_mut()
        .add_light(stack, LightComponent::point(LinearRgba::WHITE, 1.0, 4.0))?;
    assert!(agent.scene().is_dirty());

    // --- 2. ACT ---
    for goal in [
        SerializationGoal::HumanReadableDebug,
        SerializationGoal::SmallestFileSize,
    ] {
        let path = dir.path().join(format!("{goal:?}.scene"));
        agent.save_scene(&serializer, goal, &path)?;
        assert!(!agent.scene().is_dirty());

        let mut loaded = StreamingSceneAgent::new(&StreamingConfig::inline(), source.clone())?;
        loaded.load_scene(&serializer, &path)?;
        let mut render_world = RenderWorld::new();
        loaded.update();
        loaded.update();
        loaded.extract(&mut render_world);

        // --- 3. ASSERT ---
        assert_eq!(loaded.scene().to_definition(), agent.scene().to_definition());
        assert!(!loaded.scene().is_dirty());
        assert_eq!(render_world.objects.len(), 1);
        assert_eq!(render_world.objects[0].index_count, 6);
        assert_eq!(
            render_world.objects[0].model_matrix.translation(),
            Vec3::new(3.0, 1.0, 0.0)
        );
        assert_eq!(render_world.lights.len(), 1);
    }
    Ok(())
}

#[test]
fn test_text_and_binary_files_differ_in_size() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Arc::new(InMemoryMeshSource::new());
    let (mut agent, mesh) = agent_with_crate(&source);
    let serializer = SerializationAgent::new();
    let root = agent.scene().root();
    for i in 0..10 {
        let node = agent.scene_mut().create_node(format!("crate_{i}"), root)?;
        agent.scene_mut().add_static_mesh(node, mesh)?;
    }

    let text_path = dir.path().join("debug.scene");
    let binary_path = dir.path().join("small.scene");
    agent.save_scene(&serializer, SerializationGoal::HumanReadableDebug, &text_path)?;
    agent.save_scene(&serializer, SerializationGoal::SmallestFileSize, &binary_path)?;

    let text = SceneFile::from_bytes(&std::fs::read(&text_path)?)?;
    let binary = SceneFile::from_bytes(&std::fs::read(&binary_path)?)?;
    assert!(binary.payload.len() < text.payload.len());
    assert!(std::str::from_utf8(&text.payload)?.contains("crate_9"));
    Ok(())
}

#[test]
fn test_failed_load_keeps_current_scene() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let source = Arc::new(InMemoryMeshSource::new());
    let (mut agent, _) = agent_with_crate(&source);
    let root = agent.scene().root();
    agent.scene_mut().create_node("keep_me", root)?;
    let path = dir.path().join("garbage.scene");
    std::fs::write(&path, b"definitely not a scene")?;

    let result = agent.load_scene(&SerializationAgent::new(), &path);

    assert!(result.is_err());
    assert_eq!(agent.scene().len(), 2);
    Ok(())
}
