//! Port identity data structure
//!
//! Provides the identity record shared by every communication endpoint:
//! the port kind, the owning process, the referenced service and the
//! process-wide unique id, plus the lock-free pending-destruction flag.

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
use std::sync::atomic::{AtomicBool, Ordering};

use crate::common::{
    process_port_id_allocator, PortIdAllocator, ProcessName, ServiceHandle, UniquePortId,
};

/// The fundamental port kinds which can further be derived for custom behaviour
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortType {
    /// Not a concrete port
    NoPort = 0,
    /// Sending endpoint of the legacy one-to-many channel
    Sender,
    /// Receiving endpoint of the legacy one-to-many channel
    Receiver,
    /// Gateway port mirroring traffic into another transport
    Interface,
    /// Application-level management port
    Application,
    /// Publishing endpoint of a topic
    Publisher,
    /// Subscribing endpoint of a topic
    Subscriber,
}

/// Number of port kinds, bounds the parallel name table
pub const PORT_TYPE_COUNT: usize = 7;

static PORT_TYPE_NAMES: [&str; PORT_TYPE_COUNT] = [
    "NO_PORT",
    "SENDER",
    "RECEIVER",
    "INTERFACE",
    "APPLICATION",
    "PUBLISHER",
    "SUBSCRIBER",
];

impl PortType {
    /// Get the display name of the port kind
    pub fn as_str(self) -> &'static str {
        PORT_TYPE_NAMES[self as usize]
    }
}

impl fmt::Display for PortType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity record of a communication endpoint
///
/// Created once per port and owned by the port object for its whole
/// lifetime. The unique id is assigned on construction from the
/// process-wide allocator, so no two concurrently-live ports in the same
/// process ever compare equal by id. Uniqueness across processes is the
/// caller's concern; combine the id with the process name for a global key.
#[derive(Debug)]
pub struct PortIdentity {
    port_type: PortType,
    service: ServiceHandle,
    process_name: ProcessName,
    unique_id: UniquePortId,
    pending_destruction: AtomicBool,
}

impl PortIdentity {
    /// Create a new port identity
    ///
    /// Never fails; allocating the unique id is a single atomic
    /// fetch-and-add on the process-wide counter.
    pub fn new(service: ServiceHandle, port_type: PortType, process_name: ProcessName) -> Self {
        Self::with_allocator(process_port_id_allocator(), service, port_type, process_name)
    }

    /// Create a new port identity drawing its id from the given allocator
    pub fn with_allocator(
        allocator: &PortIdAllocator,
        service: ServiceHandle,
        port_type: PortType,
        process_name: ProcessName,
    ) -> Self {
        Self {
            port_type,
            service,
            process_name,
            unique_id: allocator.allocate(),
            pending_destruction: AtomicBool::new(false),
        }
    }

    /// Get the port kind
    pub fn port_type(&self) -> PortType {
        self.port_type
    }

    /// Get the handle of the service this port belongs to
    pub fn service(&self) -> ServiceHandle {
        self.service
    }

    /// Get the name of the owning process
    pub fn process_name(&self) -> &ProcessName {
        &self.process_name
    }

    /// Get the unique id of this port
    pub fn unique_id(&self) -> UniquePortId {
        self.unique_id
    }

    /// Mark this port for teardown
    ///
    /// Lock-free and idempotent. Readers observing the flag must still
    /// re-validate any other port state they act on; the flag itself is
    /// the only field with cross-thread ordering here.
    pub fn request_destruction(&self) {
        self.pending_destruction.store(true, Ordering::Release);
    }

    /// Check whether this port has been marked for teardown
    pub fn is_pending_destruction(&self) -> bool {
        self.pending_destruction.load(Ordering::Acquire)
    }
}
