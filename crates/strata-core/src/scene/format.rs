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

//! Defines the container format of persisted Strata scenes.
//!
//! A scene file is a fixed-size [`SceneHeader`] followed by a payload. The
//! header names the serialization strategy that produced the payload, so the
//! loader can dispatch the bytes to the matching lane without guessing.

use thiserror::Error;

/// Identifies Strata scene files ("STRATASC").
pub const HEADER_MAGIC_BYTES: [u8; 8] = *b"STRATASC";
/// Current version of the header layout.
pub const FORMAT_VERSION: u8 = 1;
const STRATEGY_ID_LEN: usize = 32;

/// Errors raised while reading or writing the scene container.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneFormatError {
    /// The input is shorter than the header or than the declared payload.
    #[error("scene file truncated: expected at least {expected} bytes, found {found}")]
    Truncated {
        /// Bytes required.
        expected: usize,
        /// Bytes available.
        found: usize,
    },
    /// The magic bytes do not match.
    #[error("invalid magic bytes; not a Strata scene file")]
    InvalidMagic,
    /// The header was written by an unknown format version.
    #[error("unsupported scene format version {0}")]
    UnsupportedVersion(u8),
    /// The strategy identifier does not fit the fixed header field.
    #[error("strategy id '{0}' is longer than 32 bytes")]
    StrategyIdTooLong(String),
    /// The strategy identifier is not valid UTF-8.
    #[error("strategy id is not valid UTF-8")]
    InvalidStrategyId,
}

/// The fixed-size header at the beginning of every scene file.
///
/// Layout (little endian): magic (8) | format version (1) | strategy id,
/// NUL padded (32) | payload length (8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneHeader {
    /// Must equal [`HEADER_MAGIC_BYTES`].
    pub magic_bytes: [u8; 8],
    /// Version of the header layout.
    pub format_version: u8,
    /// NUL-padded UTF-8 identifier of the serialization strategy.
    pub strategy_id: [u8; STRATEGY_ID_LEN],
    /// Length of the payload that follows the header, in bytes.
    pub payload_length: u64,
}

impl SceneHeader {
    /// Total size of the header in bytes.
    pub const SIZE: usize = 8 + 1 + STRATEGY_ID_LEN + 8;

    /// Builds a header for a payload produced by `strategy_id`.
    pub fn new(strategy_id: &str, payload_length: u64) -> Result<Self, SceneFormatError> {
        let id_bytes = strategy_id.as_bytes();
        if id_bytes.len() > STRATEGY_ID_LEN {
            return Err(SceneFormatError::StrategyIdTooLong(strategy_id.to_owned()));
        }
        let mut strategy = [0u8; STRATEGY_ID_LEN];
        strategy[..id_bytes.len()].copy_from_slice(id_bytes);
        Ok(Self {
            magic_bytes: HEADER_MAGIC_BYTES,
            format_version: FORMAT_VERSION,
            strategy_id: strategy,
            payload_length,
        })
    }

    /// Returns the strategy identifier without its padding.
    pub fn strategy_id_str(&self) -> Result<&str, SceneFormatError> {
        let end = self
            .strategy_id
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(STRATEGY_ID_LEN);
        std::str::from_utf8(&self.strategy_id[..end])
            .map_err(|_| SceneFormatError::InvalidStrategyId)
    }

    /// Serializes the header into its fixed layout.
    pub fn to_bytes(&self) -> [u8; SceneHeader::SIZE] {
        let mut bytes = [0u8; SceneHeader::SIZE];
        bytes[0..8].copy_from_slice(&self.magic_bytes);
        bytes[8] = self.format_version;
        bytes[9..9 + STRATEGY_ID_LEN].copy_from_slice(&self.strategy_id);
        bytes[9 + STRATEGY_ID_LEN..].copy_from_slice(&self.payload_length.to_le_bytes());
        bytes
    }

    /// Parses a header from the beginning of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneFormatError> {
        let Some(header) = bytes.get(..Self::SIZE) else {
            return Err(SceneFormatError::Truncated {
                expected: Self::SIZE,
                found: bytes.len(),
            });
        };

        let mut magic_bytes = [0u8; 8];
        magic_bytes.copy_from_slice(&header[0..8]);
        if magic_bytes != HEADER_MAGIC_BYTES {
            return Err(SceneFormatError::InvalidMagic);
        }

        let format_version = header[8];
        if format_version != FORMAT_VERSION {
            return Err(SceneFormatError::UnsupportedVersion(format_version));
        }

        let mut strategy_id = [0u8; STRATEGY_ID_LEN];
        strategy_id.copy_from_slice(&header[9..9 + STRATEGY_ID_LEN]);

        let mut length = [0u8; 8];
        length.copy_from_slice(&header[9 + STRATEGY_ID_LEN..]);

        Ok(Self {
            magic_bytes,
            format_version,
            strategy_id,
            payload_length: u64::from_le_bytes(length),
        })
    }
}

/// A full scene file held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneFile {
    /// The parsed header.
    pub header: SceneHeader,
    /// The raw payload.
    pub payload: Vec<u8>,
}

impl SceneFile {
    /// Wraps a payload produced by `strategy_id`.
    pub fn new(strategy_id: &str, payload: Vec<u8>) -> Result<Self, SceneFormatError> {
        let header = SceneHeader::new(strategy_id, payload.len() as u64)?;
        Ok(Self { header, payload })
    }

    /// Serializes the header followed by the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(SceneHeader::SIZE + self.payload.len());
        bytes.extend_from_slice(&self.header.to_bytes());
        bytes.extend_from_slice(&self.payload);
        bytes
    }

    /// Parses a scene file. Bytes past the declared payload length are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SceneFormatError> {
        let header = SceneHeader::from_bytes(bytes)?;
        let end = usize::try_from(header.payload_length)
            .ok()
            .and_then(|len| SceneHeader::SIZE.checked_add(len))
            .unwrap_or(usize::MAX);
        let payload = bytes
            .get(SceneHeader::SIZE..end)
            .ok_or(SceneFormatError::Truncated {
                expected: end,
                found: bytes.len(),
            })?
            .to_vec();
        Ok(Self { header, payload })
    }
}
