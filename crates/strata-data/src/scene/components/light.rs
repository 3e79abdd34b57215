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

use serde::{Deserialize, Serialize};
use strata_core::{
    math::{LinearRgba, Mat4, Vec3},
    renderer::{CascadeShadowSettings, ExtractedLight, LightKind},
};

/// A light attached to a scene node.
///
/// Position comes from the node. The direction is `forward` rotated by the
/// node's world matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightComponent {
    /// Kind and kind-specific parameters.
    pub kind: LightKind,
    /// Light color in linear space.
    pub color: LinearRgba,
    /// Local-space direction the light points to.
    pub forward: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl LightComponent {
    /// A point light.
    pub fn point(color: LinearRgba, intensity: f32, range: f32) -> Self {
        Self {
            kind: LightKind::Point { range },
            color,
            forward: Vec3::new(0.0, -1.0, 0.0),
            intensity,
        }
    }

    /// A spot light pointing down its local -Y axis.
    pub fn spot(
        color: LinearRgba,
        intensity: f32,
        range: f32,
        inner_cone_angle: f32,
        outer_cone_angle: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot {
                range,
                inner_cone_angle,
                outer_cone_angle,
            },
            ..Self::point(color, intensity, range)
        }
    }

    /// A directional light with default cascade settings.
    pub fn directional(color: LinearRgba, intensity: f32, forward: Vec3) -> Self {
        Self {
            kind: LightKind::Directional {
                shadows: CascadeShadowSettings::default(),
            },
            color,
            forward,
            intensity,
        }
    }

    /// Places the light in world space.
    pub fn extract(&self, world: &Mat4) -> ExtractedLight {
        ExtractedLight {
            kind: self.kind,
            color: self.color,
            intensity: self.intensity,
            position: world.translation(),
            direction: world.transform_vector3(self.forward).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_uses_node_position() {
        let light = LightComponent::point(LinearRgba::WHITE, 10.0, 5.0);
        let world = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));

        let extracted = light.extract(&world);

        assert_eq!(extracted.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(extracted.direction, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(extracted.kind, LightKind::Point { range: 5.0 });
    }

    #[test]
    fn test_directional_defaults_to_four_cascades() {
        let sun = LightComponent::directional(LinearRgba::WHITE, 1.0, Vec3::new(0.0, -1.0, 0.0));
        match sun.kind {
            LightKind::Directional { shadows } => assert_eq!(shadows.cascade_count, 4),
            other => panic!("unexpected kind {:?}", other),
        }
    }
}
