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

//! Runtime configuration of the streaming services.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The RON text could not be parsed.
    #[error("invalid streaming configuration: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// A value is outside its accepted range.
    #[error("invalid streaming configuration: {0}")]
    Invalid(String),
}

/// Settings of the GPU mesh cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshCacheConfig {
    /// Resident GPU memory the cache tries to stay under, in bytes.
    pub budget_bytes: u64,
    /// Runs a shrink pass on every update instead of only after a hint.
    pub shrink_every_update: bool,
}

impl Default for MeshCacheConfig {
    fn default() -> Self {
        Self {
            budget_bytes: 256 * 1024 * 1024,
            shrink_every_update: false,
        }
    }
}

/// Settings of the mesh uploader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploaderConfig {
    /// Number of background worker threads. `0` runs uploads inline on `pump()`.
    pub worker_threads: usize,
    /// Upper bound of jobs run by a single inline `pump()`.
    pub max_jobs_per_pump: usize,
    /// Number of bindless slots available for mesh buffers.
    pub bindless_capacity: u32,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            worker_threads: 1,
            max_jobs_per_pump: 8,
            bindless_capacity: 65_536,
        }
    }
}

/// Top-level configuration of mesh streaming.
///
/// Missing fields take their default, so a partial RON document is valid:
///
/// ```
/// use strata_data::config::StreamingConfig;
///
/// let config = StreamingConfig::from_ron_str("(uploader: (worker_threads: 0))").unwrap();
/// assert_eq!(config.uploader.worker_threads, 0);
/// assert_eq!(config.uploader.max_jobs_per_pump, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamingConfig {
    /// Mesh cache settings.
    pub mesh_cache: MeshCacheConfig,
    /// Uploader settings.
    pub uploader: UploaderConfig,
}

impl StreamingConfig {
    /// Parses and validates a configuration from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// A configuration that never spawns threads. Uploads run on `pump()`.
    pub fn inline() -> Self {
        Self {
            uploader: UploaderConfig {
                worker_threads: 0,
                ..UploaderConfig::default()
            },
            ..Self::default()
        }
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uploader.max_jobs_per_pump == 0 {
            return Err(ConfigError::Invalid(
                "uploader.max_jobs_per_pump must be at least 1".into(),
            ));
        }
        if self.uploader.bindless_capacity < 2 {
            return Err(ConfigError::Invalid(
                "uploader.bindless_capacity must hold at least one mesh".into(),
            ));
        }
        Ok(())
    }
}
