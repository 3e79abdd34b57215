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

//! Defines the intent-based API for scene persistence.

/// What the caller cares about when saving a scene.
///
/// The serialization agent maps the goal to a concrete strategy, so callers
/// never name a format directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SerializationGoal {
    /// Fast loading and compact output. The payload is binary.
    FastestLoad,
    /// Smallest payload on disk.
    SmallestFileSize,
    /// Text output that can be inspected and diffed.
    HumanReadableDebug,
    /// A schema-versioned representation decoupled from runtime layout.
    LongTermStability,
}
