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

// Strata Sandbox
// Streams a procedural scene, moves it around, and saves it back to disk.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use strata_agents::{scene_agent::StreamingSceneAgent, serialization_agent::SerializationAgent};
use strata_core::{
    asset::{AssetUUID, RenderBounds, StaticMeshAssetHeader, SubMesh},
    math::{LinearRgba, Quaternion, Vec3, Vec4, PI},
    scene::SerializationGoal,
};
use strata_data::{
    assets::StandardMaterialDesc,
    config::StreamingConfig,
    scene::LightComponent,
    streaming::{CpuStaticMesh, MeshSource, StaticMeshVertex, StreamingError},
};
use strata_lanes::render_lane::RenderWorld;

const FRAMES: u32 = 120;
const GRID: i32 = 4;

/// Generates UV spheres on demand, with a fake read latency.
struct ProceduralMeshSource {
    resolutions: HashMap<AssetUUID, u32>,
    latency: Duration,
}

impl ProceduralMeshSource {
    fn sphere(resolution: u32) -> CpuStaticMesh {
        let rings = resolution.max(2);
        let segments = rings * 2;
        let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
        for ring in 0..=rings {
            let theta = ring as f32 / rings as f32 * PI;
            for segment in 0..=segments {
                let phi = segment as f32 / segments as f32 * 2.0 * PI;
                let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                vertices.push(StaticMeshVertex {
                    position: normal,
                    normal,
                    uv: [segment as f32 / segments as f32, ring as f32 / rings as f32],
                    tangent: Vec4::new(-phi.sin(), 0.0, phi.cos(), 1.0),
                });
            }
        }

        let stride = segments + 1;
        let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        CpuStaticMesh { vertices, indices }
    }
}

impl MeshSource for ProceduralMeshSource {
    fn load_mesh(&self, uuid: AssetUUID) -> Result<CpuStaticMesh, StreamingError> {
        let resolution = *self
            .resolutions
            .get(&uuid)
            .ok_or(StreamingError::MeshNotFound(uuid))?;
        std::thread::sleep(self.latency);
        Ok(Self::sphere(resolution))
    }
}

fn load_config() -> Result<StreamingConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path))?;
            Ok(StreamingConfig::from_ron_str(&text)?)
        }
        None => Ok(StreamingConfig::default()),
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    log::info!("Streaming configuration: {:?}", config);

    let meshes: Vec<AssetUUID> = (0..4)
        .map(|lod| AssetUUID::new_v5(&format!("procedural/sphere_{lod}")))
        .collect();
    let source = ProceduralMeshSource {
        resolutions: meshes
            .iter()
            .enumerate()
            .map(|(lod, uuid)| (*uuid, 4 << lod))
            .collect(),
        latency: Duration::from_millis(5),
    };
    let mut agent = StreamingSceneAgent::new(&config, Arc::new(source))?;
    let services = agent.services().clone();

    // The finest sphere is split in two halves, the lower one in gold.
    let gold = AssetUUID::new_v5("materials/gold");
    services.materials.register_material(
        gold,
        StandardMaterialDesc {
            base_color_factor: LinearRgba::rgb(1.0, 0.77, 0.34),
            metallic_factor: 1.0,
            roughness_factor: 0.3,
            ..StandardMaterialDesc::default()
        },
    );
    let finest = ProceduralMeshSource::sphere(4 << 3);
    let half = finest.indices.len() as u32 / 2;
    let hemisphere = RenderBounds {
        origin: Vec3::ZERO,
        radius: 1.0,
        extents: Vec3::ONE,
    };
    services.registry.register_header(
        meshes[3],
        StaticMeshAssetHeader {
            name: "Golden Sphere".to_owned(),
            submeshes: vec![
                SubMesh {
                    index_start_position: 0,
                    index_count: half,
                    bounds: hemisphere,
                    material: AssetUUID::EMPTY,
                },
                SubMesh {
                    index_start_position: half,
                    index_count: half,
                    bounds: hemisphere,
                    material: gold,
                },
            ],
        },
    );

    let root = agent.scene().root();
    let pivot = agent.scene_mut().create_node("pivot", root)?;
    let mut spheres = Vec::new();
    for x in 0..GRID {
        for z in 0..GRID {
            let node = agent
                .scene_mut()
                .create_node(format!("sphere_{x}_{z}"), pivot)?;
            if let Some(node) = agent.scene_mut().node_mut(node) {
                node.transform.translation = Vec3::new(x as f32 * 3.0, 0.0, z as f32 * 3.0);
            }
            let mesh = meshes[((x + z) % meshes.len() as i32) as usize];
            agent.scene_mut().add_static_mesh(node, mesh)?;
            spheres.push(node);
        }
    }
    let sun = agent.scene_mut().create_node("sun", root)?;
    agent.scene_mut().add_light(
        sun,
        LightComponent::directional(LinearRgba::WHITE, 3.0, Vec3::new(-0.3, -1.0, -0.2)),
    )?;

    let mut render_world = RenderWorld::new();
    for frame in 0..FRAMES {
        agent.update();

        if let Some(node) = agent.scene_mut().node_mut(pivot) {
            node.transform.rotation = Quaternion::from_axis_angle(Vec3::Y, frame as f32 * 0.01);
        }
        if frame == FRAMES / 2 {
            let swapped = agent.set_static_mesh(spheres[0], meshes[3])?;
            log::info!("Frame {}: swapping the first sphere accepted: {}", frame, swapped);
        }

        agent.extract(&mut render_world);

        if frame % 20 == 0 {
            let stats = services.cache.stats();
            log::info!(
                "Frame {}: {} objects ({} moved), {} lights, {} cache entries, {} resident bytes",
                frame,
                render_world.objects.len(),
                render_world.moved_objects(),
                render_world.lights.len(),
                stats.entries,
                stats.resident_bytes
            );
        }
        std::thread::sleep(Duration::from_millis(2));
    }

    let serializer = SerializationAgent::new();
    let dir = std::env::temp_dir();
    for (goal, file_name) in [
        (SerializationGoal::HumanReadableDebug, "strata_sandbox.ron.scene"),
        (SerializationGoal::FastestLoad, "strata_sandbox.bin.scene"),
    ] {
        let path = dir.join(file_name);
        agent.save_scene(&serializer, goal, &path)?;
        let size = std::fs::metadata(&path)?.len();
        log::info!("{:?}: {} bytes at {}", goal, size, path.display());
    }

    agent.load_scene(&serializer, dir.join("strata_sandbox.bin.scene"))?;
    for _ in 0..10 {
        agent.update();
        agent.extract(&mut render_world);
        std::thread::sleep(Duration::from_millis(10));
    }
    log::info!(
        "Reloaded scene draws {} objects; cache stats: {:?}",
        render_world.objects.len(),
        services.cache.stats()
    );
    Ok(())
}
