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

//! Defines light types for the rendering system.
//!
//! Scene light components carry a [`LightKind`]; the collection pass turns
//! them into [`ExtractedLight`]s placed in world space.

use crate::math::{LinearRgba, Vec3};
use serde::{Deserialize, Serialize};

/// Cascaded shadow map settings of a directional light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeShadowSettings {
    /// Resolution of each cascade, in texels per side.
    pub per_cascade_dim: u32,
    /// Number of cascades.
    pub cascade_count: u32,
    /// PCF filter size in texels.
    pub shadow_filter_size: f32,
    /// Upper bound of the PCF filter size.
    pub max_filter_size: f32,
    /// Blend between logarithmic (`1.0`) and uniform (`0.0`) split distribution.
    pub cascade_split_lambda: f32,
    /// Constant depth bias.
    pub shadow_bias_const: f32,
    /// Slope-scaled depth bias.
    pub shadow_bias_slope: f32,
    /// Border adaptation factor between cascades.
    pub cascade_border_adopt: f32,
    /// Fraction of a cascade over which it blends into the next one.
    pub cascade_edge_lerp_threshold: f32,
    /// Shadows are not drawn beyond this view distance.
    pub max_draw_depth_distance: f32,
}

impl Default for CascadeShadowSettings {
    fn default() -> Self {
        Self {
            per_cascade_dim: 2048,
            cascade_count: 4,
            shadow_filter_size: 1.0,
            max_filter_size: 3.0,
            cascade_split_lambda: 1.0,
            shadow_bias_const: -1.25,
            shadow_bias_slope: -1.75,
            cascade_border_adopt: 0.006,
            cascade_edge_lerp_threshold: 0.8,
            max_draw_depth_distance: 200.0,
        }
    }
}

/// The kind of a light, with its kind-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightKind {
    /// Emits in every direction from the node position.
    Point {
        /// Influence radius in world units.
        range: f32,
    },
    /// Emits in a cone along the light direction.
    Spot {
        /// Influence distance in world units.
        range: f32,
        /// Angle (radians) where the falloff starts.
        inner_cone_angle: f32,
        /// Angle (radians) where the light reaches zero.
        outer_cone_angle: f32,
    },
    /// Parallel rays along the light direction, like the sun.
    Directional {
        /// Cascaded shadow settings.
        shadows: CascadeShadowSettings,
    },
}

/// A light ready for the renderer, in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedLight {
    /// Kind and kind-specific parameters.
    pub kind: LightKind,
    /// Light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier.
    pub intensity: f32,
    /// World-space position of the owning node.
    pub position: Vec3,
    /// World-space, normalized direction the light points to.
    pub direction: Vec3,
}
