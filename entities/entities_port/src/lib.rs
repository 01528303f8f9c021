//! Entities Layer: Port Identity and Condition Core Data Structures
//!
//! This crate provides the core data structure definitions for
//! communication endpoints of the shared-memory transport:
//! - PortIdentity (who owns a port, which service it serves, its unique id)
//! - Trigger (lock-free event flag polled by the wait mechanism)
//!
//! These are fundamental transport data structures used throughout the
//! port and wait-set layers. This is the innermost layer of CLEAN
//! architecture with no dependencies on other workspace crates.

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

pub mod common;
pub mod condition;
pub mod port_identity;

pub use common::{
    process_port_id_allocator, PortIdAllocator, ProcessName, ServiceHandle, UniquePortId,
    PROCESS_NAME_CAPACITY, UNASSIGNED_PORT_ID,
};
pub use condition::Trigger;
pub use port_identity::{PortIdentity, PortType, PORT_TYPE_COUNT};
