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

//! Acts as the agent for mesh streaming over a scene.
//!
//! The [`StreamingSceneAgent`] owns a [`Scene`](strata_data::scene::Scene) and
//! the streaming services its static meshes are wired to. It drives the
//! per-frame order: uploads, component ticks and cache maintenance on
//! `update`, then transform propagation and record collection on `extract`.

mod agent;

pub use agent::*;
