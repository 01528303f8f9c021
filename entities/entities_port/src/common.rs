//! Common types for port data structures
//!
//! Provides the service handle, the bounded process name and the
//! process-wide unique port id allocator shared by all port kinds.

/*
 * %CopyrightBegin%
 *
 * SPDX-License-Identifier: Apache-2.0
 *
 * Copyright Zero-Copy Transport Contributors 2025. All Rights Reserved.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 *
 * %CopyrightEnd%
 */

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique port id
///
/// A 64-bit value assigned from a process-wide monotonically increasing
/// counter. The id space is local to one process; across process
/// boundaries `(ProcessName, UniquePortId)` forms the composite key.
pub type UniquePortId = u64;

/// Reserved id meaning "no id has been assigned yet"
pub const UNASSIGNED_PORT_ID: UniquePortId = 0;

/// Maximum byte length of a process name
pub const PROCESS_NAME_CAPACITY: usize = 100;

/// Opaque handle to a service description
///
/// The topic identity itself is owned by the service discovery layer;
/// ports only carry this handle to refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ServiceHandle {
    id: u64,
}

impl ServiceHandle {
    /// Create a new service handle from an ID
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Get the handle ID
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Bounded-length name of the process owning a port
///
/// Holds at most [`PROCESS_NAME_CAPACITY`] bytes inline, so the name can
/// live inside relocatable port records without heap indirection. Longer
/// input is truncated at a character boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessName {
    name: heapless::String<PROCESS_NAME_CAPACITY>,
}

impl ProcessName {
    /// Create a new process name, truncating input beyond the capacity
    pub fn new(name: &str) -> Self {
        let mut end = name.len().min(PROCESS_NAME_CAPACITY);
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        let mut storage = heapless::String::new();
        // cannot fail, the truncated slice fits the capacity
        let _ = storage.push_str(&name[..end]);
        Self { name: storage }
    }

    /// Get the name as a string slice
    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }

    /// Get the length of the name in bytes
    pub fn len(&self) -> usize {
        self.name.len()
    }

    /// Check whether the name is empty
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}

impl From<&str> for ProcessName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ProcessName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name.as_str())
    }
}

/// Process-wide unique port id allocator
///
/// Owns the monotonic counter that hands out [`UniquePortId`] values.
/// Allocation is a single atomic fetch-and-add, so concurrent port
/// construction can never observe duplicate or lost ids. The counter
/// starts above [`UNASSIGNED_PORT_ID`] and is never reset.
#[derive(Debug)]
pub struct PortIdAllocator {
    counter: AtomicU64,
}

impl PortIdAllocator {
    /// Create a new allocator with the first id to hand out
    pub const fn new() -> Self {
        Self {
            counter: AtomicU64::new(UNASSIGNED_PORT_ID + 1),
        }
    }

    /// Allocate the next unique port id
    ///
    /// Lock-free and safe to call from any number of threads; ids are
    /// strictly increasing across successive allocations.
    pub fn allocate(&self) -> UniquePortId {
        let id = self.counter.fetch_add(1, Ordering::Relaxed);
        debug_assert_ne!(id, UNASSIGNED_PORT_ID, "unique port id space exhausted");
        id
    }
}

impl Default for PortIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocator backing all ports constructed in this process
static PROCESS_PORT_ID_ALLOCATOR: PortIdAllocator = PortIdAllocator::new();

/// Get the process-wide port id allocator
pub fn process_port_id_allocator() -> &'static PortIdAllocator {
    &PROCESS_PORT_ID_ALLOCATOR
}
