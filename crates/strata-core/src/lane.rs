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

//! The base trait of every processing lane.
//!
//! A lane is one swappable way of doing a pipeline step. Agents hold lanes
//! and pick between them; domain traits such as scene serialization strategies
//! extend [`Lane`] with their execution methods.

use std::fmt;

/// Classification of lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneKind {
    /// Per-frame render data preparation.
    Render,
    /// Scene maintenance and persistence.
    Scene,
}

impl fmt::Display for LaneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaneKind::Render => write!(f, "Render"),
            LaneKind::Scene => write!(f, "Scene"),
        }
    }
}

/// Identity shared by all lanes.
pub trait Lane: Send + Sync {
    /// A unique, versioned name, e.g. `"STRATA_DEFINITION_RON_V1"`.
    fn strategy_name(&self) -> &'static str;

    /// The lane's classification.
    fn lane_kind(&self) -> LaneKind;
}
