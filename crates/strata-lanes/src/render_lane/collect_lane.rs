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

//! Defines the lane that gathers per-frame render data from the scene.

use super::RenderWorld;
use strata_core::lane::{Lane, LaneKind};
use strata_data::scene::Scene;

/// Walks the scene and fills the [`RenderWorld`] with the cached records of
/// every component, stamped with their node's matrices.
///
/// Collection never rebuilds records and never waits for uploads: a mesh that
/// is still streaming simply contributes nothing this frame.
#[derive(Debug, Default)]
pub struct RenderCollectLane;

impl RenderCollectLane {
    /// Creates a new `RenderCollectLane`.
    pub fn new() -> Self {
        Self
    }

    /// Replaces the content of `render_world` with this frame's data.
    pub fn run(&self, scene: &Scene, render_world: &mut RenderWorld) {
        render_world.clear();
        for id in scene.depth_first() {
            let Some(node) = scene.node(id) else {
                continue;
            };
            for component in node.components() {
                component.collect_render_data(
                    node,
                    &mut render_world.objects,
                    &mut render_world.lights,
                );
            }
        }
        log::trace!(
            "Collected {} objects and {} lights.",
            render_world.objects.len(),
            render_world.lights.len()
        );
    }
}

impl Lane for RenderCollectLane {
    fn strategy_name(&self) -> &'static str {
        "STRATA_RENDER_COLLECT"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene_lane::{ComponentTickLane, TransformPropagationLane};
    use crate::test_support::Fixture;
    use strata_core::{
        asset::AssetUUID,
        math::{LinearRgba, Vec3},
        renderer::LightKind,
    };
    use strata_data::scene::LightComponent;

    #[test]
    fn test_collect_empty_scene() {
        let fixture = Fixture::new();
        let scene = Scene::new(fixture.context());
        let mut render_world = RenderWorld::new();

        RenderCollectLane::new().run(&scene, &mut render_world);

        assert!(render_world.objects.is_empty());
        assert!(render_world.lights.is_empty());
    }

    #[test]
    fn test_streaming_mesh_appears_once_ready() {
        // Arrange
        let fixture = Fixture::new();
        let mesh = AssetUUID::new_v5("meshes/cube");
        fixture.add_cube(mesh);
        let mut scene = Scene::new(fixture.context());
        let node = scene.create_node("cube", scene.root()).unwrap();
        assert_eq!(scene.set_static_mesh(node, mesh), Ok(true));
        let lane = RenderCollectLane::new();
        let mut render_world = RenderWorld::new();

        // Act: upload not run yet.
        lane.run(&scene, &mut render_world);
        let before = render_world.objects.len();
        fixture.services.uploader.pump();
        ComponentTickLane::new().run(&mut scene);
        lane.run(&scene, &mut render_world);

        // Assert
        assert_eq!(before, 0);
        assert_eq!(render_world.objects.len(), 1);
        assert_eq!(render_world.objects[0].index_count, 36);
        assert_eq!(
            render_world.object_bytes().len(),
            std::mem::size_of_val(render_world.objects.as_slice())
        );
    }

    #[test]
    fn test_moved_flag_follows_transform_changes() {
        let fixture = Fixture::new();
        let mesh = AssetUUID::new();
        fixture.add_cube(mesh);
        let mut scene = Scene::new(fixture.context());
        let node = scene.create_node("cube", scene.root()).unwrap();
        scene.set_static_mesh(node, mesh).unwrap();
        fixture.services.uploader.pump();
        ComponentTickLane::new().run(&mut scene);

        let propagation = TransformPropagationLane::new();
        let lane = RenderCollectLane::new();
        let mut render_world = RenderWorld::new();

        propagation.run(&mut scene);
        propagation.run(&mut scene);
        lane.run(&scene, &mut render_world);
        assert_eq!(render_world.moved_objects(), 0);

        scene.node_mut(node).unwrap().transform.translation = Vec3::new(0.0, 1.0, 0.0);
        propagation.run(&mut scene);
        lane.run(&scene, &mut render_world);
        assert_eq!(render_world.moved_objects(), 1);
        assert_eq!(
            render_world.objects[0].model_matrix.translation(),
            Vec3::new(0.0, 1.0, 0.0)
        );

        propagation.run(&mut scene);
        lane.run(&scene, &mut render_world);
        assert_eq!(render_world.moved_objects(), 0);
    }

    #[test]
    fn test_lights_are_collected_in_world_space() {
        let fixture = Fixture::new();
        let mut scene = Scene::new(fixture.context());
        let node = scene.create_node("lamp", scene.root()).unwrap();
        scene.node_mut(node).unwrap().transform.translation = Vec3::new(4.0, 5.0, 6.0);
        scene
            .add_light(node, LightComponent::point(LinearRgba::WHITE, 2.0, 10.0))
            .unwrap();

        TransformPropagationLane::new().run(&mut scene);
        let mut render_world = RenderWorld::new();
        RenderCollectLane::new().run(&scene, &mut render_world);

        assert_eq!(render_world.lights.len(), 1);
        assert_eq!(render_world.lights[0].position, Vec3::new(4.0, 5.0, 6.0));
        assert_eq!(render_world.lights[0].kind, LightKind::Point { range: 10.0 });
    }
}
