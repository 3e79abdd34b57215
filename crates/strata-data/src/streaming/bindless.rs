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

//! Bindless slot allocation for mesh buffers.

use super::StreamingError;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
struct AllocatorState {
    next: u32,
    free: Vec<u32>,
    in_use: u32,
}

/// Hands out indices into the bindless buffer table.
///
/// Freed indices are reused most-recently-freed first.
#[derive(Debug)]
pub struct BindlessIndexAllocator {
    capacity: u32,
    state: Mutex<AllocatorState>,
}

impl BindlessIndexAllocator {
    /// Creates an allocator over `capacity` slots.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            state: Mutex::new(AllocatorState::default()),
        }
    }

    /// Allocates one slot.
    pub fn allocate(&self) -> Result<u32, StreamingError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let index = match state.free.pop() {
            Some(index) => index,
            None if state.next < self.capacity => {
                state.next += 1;
                state.next - 1
            }
            None => {
                return Err(StreamingError::BindlessExhausted {
                    capacity: self.capacity,
                })
            }
        };
        state.in_use += 1;
        Ok(index)
    }

    /// Returns a slot to the allocator.
    pub fn free(&self, index: u32) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug_assert!(index < state.next && !state.free.contains(&index));
        state.free.push(index);
        state.in_use = state.in_use.saturating_sub(1);
    }

    /// Number of slots currently allocated.
    pub fn in_use(&self) -> u32 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .in_use
    }

    /// Total number of slots.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
