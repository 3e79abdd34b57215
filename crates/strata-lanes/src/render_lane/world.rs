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

//! Defines the `RenderWorld`, the flat per-frame input of the renderer.

use strata_core::renderer::{ExtractedLight, GpuPerObjectData};

/// Everything the renderer needs for one frame, copied out of the scene.
///
/// The lists are camera independent. They are refilled every frame by the
/// collection lane; the allocations are kept between frames.
#[derive(Debug, Default)]
pub struct RenderWorld {
    /// Per-object draw records, in scene depth-first order.
    pub objects: Vec<GpuPerObjectData>,
    /// Lights in world space.
    pub lights: Vec<ExtractedLight>,
}

impl RenderWorld {
    /// Creates an empty `RenderWorld`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all lists, keeping their capacity.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.lights.clear();
    }

    /// The draw records as raw bytes, ready for a storage buffer upload.
    pub fn object_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.objects)
    }

    /// Number of records whose object moved since the previous frame.
    pub fn moved_objects(&self) -> usize {
        self.objects
            .iter()
            .filter(|object| object.object_moved != 0)
            .count()
    }
}

