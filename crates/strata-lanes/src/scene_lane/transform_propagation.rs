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

//! Computes world matrices from local transforms down the scene hierarchy.

use strata_core::{
    lane::{Lane, LaneKind},
    math::Mat4,
    renderer::TransformProvider,
};
use strata_data::scene::Scene;

/// Propagates local transforms through the scene, once per frame.
///
/// Nodes are visited breadth-first from the root, so a parent's world matrix
/// is always final before its children read it. Every visited node shifts its
/// current world matrix into the previous slot, which the render records use
/// to flag moving objects.
#[derive(Debug, Default)]
pub struct TransformPropagationLane;

impl TransformPropagationLane {
    /// Creates a new `TransformPropagationLane`.
    pub fn new() -> Self {
        Self
    }

    /// Runs one propagation pass over `scene`.
    pub fn run(&self, scene: &mut Scene) {
        for id in scene.breadth_first() {
            let parent_matrix = scene
                .node(id)
                .and_then(|node| node.parent())
                .and_then(|parent| scene.node(parent))
                .map(|parent| parent.world_matrix())
                .unwrap_or(Mat4::IDENTITY);

            if let Some(node) = scene.node_mut(id) {
                let world = parent_matrix * node.transform.to_mat4();
                node.advance_world_matrix(world);
            }
        }
    }
}

impl Lane for TransformPropagationLane {
    fn strategy_name(&self) -> &'static str {
        "STRATA_TRANSFORM_PROPAGATION"
    }

    fn lane_kind(&self) -> LaneKind {
        LaneKind::Scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Fixture;
    use strata_core::math::{Quaternion, Vec3, EPSILON, FRAC_PI_2};

    fn assert_matrix_approx_eq(a: Mat4, b: Mat4) {
        for i in 0..4 {
            for j in 0..4 {
                let val_a = a.cols[i][j];
                let val_b = b.cols[i][j];
                assert!(
                    (val_a - val_b).abs() < EPSILON,
                    "Matrix mismatch at col {}, row {}: {} != {}",
                    i,
                    j,
                    val_a,
                    val_b
                );
            }
        }
    }

    #[test]
    fn test_transform_propagation_simple_hierarchy() {
        // Arrange
        let fixture = Fixture::new();
        let mut scene = Scene::new(fixture.context());
        let parent = scene.create_node("parent", scene.root()).unwrap();
        scene.node_mut(parent).unwrap().transform.translation = Vec3::new(10.0, 0.0, 0.0);
        let child = scene.create_node("child", parent).unwrap();
        scene.node_mut(child).unwrap().transform.translation = Vec3::new(0.0, 2.0, 0.0);

        // Act
        TransformPropagationLane::new().run(&mut scene);

        // Assert
        let expected = Mat4::from_translation(Vec3::new(10.0, 2.0, 0.0));
        assert_matrix_approx_eq(scene.node(child).unwrap().world_matrix(), expected);
    }

    #[test]
    fn test_parent_rotation_applies_to_child_offset() {
        let fixture = Fixture::new();
        let mut scene = Scene::new(fixture.context());
        let parent = scene.create_node("turntable", scene.root()).unwrap();
        scene.node_mut(parent).unwrap().transform.rotation =
            Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let child = scene.create_node("arm", parent).unwrap();
        scene.node_mut(child).unwrap().transform.translation = Vec3::new(1.0, 0.0, 0.0);

        TransformPropagationLane::new().run(&mut scene);

        let position = scene.node(child).unwrap().world_matrix().translation();
        assert!((position.x - 0.0).abs() < EPSILON);
        assert!((position.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_previous_matrix_lags_one_pass() {
        let fixture = Fixture::new();
        let mut scene = Scene::new(fixture.context());
        let node = scene.create_node("mover", scene.root()).unwrap();
        let lane = TransformPropagationLane::new();

        scene.node_mut(node).unwrap().transform.translation = Vec3::new(1.0, 0.0, 0.0);
        lane.run(&mut scene);
        scene.node_mut(node).unwrap().transform.translation = Vec3::new(2.0, 0.0, 0.0);
        lane.run(&mut scene);

        let mover = scene.node(node).unwrap();
        assert_eq!(mover.prev_world_matrix().translation(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(mover.world_matrix().translation(), Vec3::new(2.0, 0.0, 0.0));
    }
}
