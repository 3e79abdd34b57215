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

//! Advances every scene component by one tick.

use strata_core::lane::{Lane, LaneKind};
use strata_data::scene::Scene;

/// Ticks the components of every node.
///
/// This is where static meshes resolve their identifiers and rebuild their
/// records once uploads complete.
#[derive(Debug, Default)]
pub struct ComponentTickLane;

impl ComponentTickLane {
    /// Creates a new `ComponentTickLane`.
    pub fn new() -> Self {
        Self
    }

    /// Ticks all components of `scene`.
    pub fn run(&self, scene: &mut Scene) {
        for (_, node) in scene.iter_mut() {
            for component in node.components_mut() {
                component.tick();
            }
        }
    }
}

impl Lane for ComponentTickLane {
    fn strategy_name(&self) -> &'static str {
        "STRATA_COMPONENT_TICK"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use strata_core::asset::AssetUUID;

    #[test]
    fn test_tick_resolves_meshes_restored_from_definition() {
        // Arrange
        let fixture = Fixture::new();
        let mesh = AssetUUID::new_v5("meshes/barrel");
        fixture.add_cube(mesh);
        let mut scene = Scene::new(fixture.context());
        let node = scene.create_node("barrel", scene.root()).unwrap();
        scene.add_static_mesh(node, mesh).unwrap();
        let lane = ComponentTickLane::new();

        // Act: first tick resolves and queues the upload.
        lane.run(&mut scene);
        fixture.services.uploader.pump();
        lane.run(&mut scene);

        // Assert
        let component = scene.node(node).unwrap().components()[0]
            .as_static_mesh()
            .unwrap();
        assert!(component.is_ready());
        assert_eq!(component.records().len(), 1);
        assert_eq!(component.indices_count(), Some(36));
        assert_eq!(component.vertices_count(), Some(8));
    }

    #[test]
    fn test_tick_leaves_unbound_meshes_alone() {
        let fixture = Fixture::new();
        let mut scene = Scene::new(fixture.context());
        let node = scene.create_node("empty", scene.root()).unwrap();
        scene.add_static_mesh(node, AssetUUID::EMPTY).unwrap();

        ComponentTickLane::new().run(&mut scene);

        assert_eq!(fixture.services.cache.stats().entries, 0);
        assert_eq!(fixture.services.uploader.pending_jobs(), 0);
    }
}
