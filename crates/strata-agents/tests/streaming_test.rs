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
use std::time::{Duration, Instant};
use strata_agents::scene_agent::StreamingSceneAgent;
use strata_core::{
    asset::{AssetUUID, RenderBounds, StaticMeshAssetHeader, SubMesh},
    math::Vec3,
    renderer::BINDLESS_NONE,
};
use strata_data::{
    assets::StandardMaterialDesc,
    config::StreamingConfig,
    streaming::{CpuStaticMesh, InMemoryMeshSource, StaticMeshVertex},
};
use strata_lanes::render_lane::RenderWorld;

fn mesh_with_indices(index_count: usize) -> CpuStaticMesh {
    CpuStaticMesh {
        vertices: vec![StaticMeshVertex::default(); 3],
        indices: (0..index_count).map(|i| (i % 3) as u32).collect(),
    }
}

fn bounds(radius: f32) -> RenderBounds {
    RenderBounds {
        origin: Vec3::ZERO,
        radius,
        extents: Vec3::new(radius, radius, radius),
    }
}

#[test]
fn test_submeshes_become_ready_with_their_textures() {
    // --- 1. ARRANGE ---
    let source = Arc::new(InMemoryMeshSource::new());
    let mut agent = StreamingSceneAgent::new(&StreamingConfig::inline(), source.clone()).unwrap();
    let services = agent.services().clone();

    let mesh = AssetUUID::new_v5("meshes/statue");
    let stone = AssetUUID::new_v5("materials/stone");
    let stone_albedo = AssetUUID::new_v5("textures/stone_albedo");
    source.insert(mesh, mesh_with_indices(900));
    services.registry.register_header(
        mesh,
        StaticMeshAssetHeader {
            name: "Statue".to_owned(),
            submeshes: vec![
                SubMesh {
                    index_start_position: 0,
                    index_count: 300,
                    bounds: bounds(1.0),
                    material: AssetUUID::EMPTY,
                },
                SubMesh {
                    index_start_position: 300,
                    index_count: 600,
                    bounds: bounds(2.0),
                    material: stone,
                },
            ],
        },
    );
    services.materials.register_material(
        stone,
        StandardMaterialDesc {
            base_color_texture: Some(stone_albedo),
            ..StandardMaterialDesc::default()
        },
    );

    let root = agent.scene().root();
    let node = agent.scene_mut().create_node("statue", root).unwrap();
    assert_eq!(agent.set_static_mesh(node, mesh), Ok(true));
    let mut render_world = RenderWorld::new();

    // --- 2. ACT ---
    agent.update();
    agent.extract(&mut render_world);
    let waiting_on_texture = render_world.objects.clone();
    services.materials.mark_texture_resident(stone_albedo, 42);
    agent.update();
    agent.extract(&mut render_world);

    // --- 3. ASSERT ---
    assert_eq!(waiting_on_texture.len(), 2);
    assert_eq!(waiting_on_texture[1].material.base_color_texture_id, BINDLESS_NONE);

    let component = agent.scene().node(node).unwrap().components()[0]
        .as_static_mesh()
        .unwrap();
    assert!(component.is_ready());
    assert_eq!(component.mesh_asset_name(), "Statue");

    let objects = &render_world.objects;
    assert_eq!(objects.len(), 2);
    assert_eq!(
        (objects[0].index_start_position, objects[0].index_count),
        (0, 300)
    );
    assert_eq!(
        (objects[1].index_start_position, objects[1].index_count),
        (300, 600)
    );
    assert_eq!(objects[0].vertices_array_id, objects[1].vertices_array_id);
    assert_eq!(objects[1].material.base_color_texture_id, 42);
    assert_eq!(objects[1].sphere_bounds.w, 2.0);
}

#[test]
fn test_background_workers_stream_every_mesh() {
    // --- 1. ARRANGE ---
    let source = Arc::new(InMemoryMeshSource::new());
    let config = StreamingConfig::from_ron_str("(uploader: (worker_threads: 2))").unwrap();
    let mut agent = StreamingSceneAgent::new(&config, source.clone()).unwrap();
    let root = agent.scene().root();
    let mut nodes = Vec::new();
    for i in 0..8 {
        let mesh = AssetUUID::new_v5(&format!("meshes/rock_{i}"));
        source.insert(mesh, mesh_with_indices(3 * (i + 1)));
        let node = agent
            .scene_mut()
            .create_node(format!("rock_{i}"), root)
            .unwrap();
        agent.scene_mut().add_static_mesh(node, mesh).unwrap();
        nodes.push(node);
    }
    let mut render_world = RenderWorld::new();

    // --- 2. ACT ---
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        agent.update();
        agent.extract(&mut render_world);
        if render_world.objects.len() == nodes.len() {
            break;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    while agent.services().uploader.pending_jobs() > 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(1));
    }

    // --- 3. ASSERT ---
    assert_eq!(render_world.objects.len(), nodes.len());
    let mut index_counts: Vec<u32> = render_world
        .objects
        .iter()
        .map(|object| object.index_count)
        .collect();
    index_counts.sort_unstable();
    assert_eq!(index_counts, vec![3, 6, 9, 12, 15, 18, 21, 24]);
    assert_eq!(agent.services().uploader.completed_uploads(), 8);
    assert_eq!(agent.services().bindless.in_use(), 16);
}

#[test]
fn test_missing_mesh_never_draws() {
    let source = Arc::new(InMemoryMeshSource::new());
    let mut agent = StreamingSceneAgent::new(&StreamingConfig::inline(), source).unwrap();
    let root = agent.scene().root();
    let node = agent.scene_mut().create_node("ghost", root).unwrap();
    agent.set_static_mesh(node, AssetUUID::new()).unwrap();
    let mut render_world = RenderWorld::new();

    for _ in 0..3 {
        agent.update();
        agent.extract(&mut render_world);
    }

    assert!(render_world.objects.is_empty());
    assert_eq!(agent.services().uploader.failed_uploads(), 1);
}
