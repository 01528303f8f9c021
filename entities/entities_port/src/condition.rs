//! Condition trigger flag
//!
//! Provides the lock-free event flag a port uses to signal an external
//! polling wait mechanism that something happened.

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

use std::sync::atomic::{AtomicBool, Ordering};

/// Lock-free event flag owned by a port, one flag per port
///
/// The flag only means "check for work"; the actual work state lives
/// elsewhere and must be validated by the consumer, so relaxed ordering
/// on the flag itself is sufficient. Setting is idempotent and safe from
/// any number of producer threads. Reset policy belongs to the wait
/// mechanism consuming the flag, not to this type, and two triggers are
/// never considered equal.
#[derive(Debug, Default)]
pub struct Trigger {
    triggered: AtomicBool,
}

impl Trigger {
    /// Create a new, unset trigger
    pub const fn new() -> Self {
        Self {
            triggered: AtomicBool::new(false),
        }
    }

    /// Signal that an event occurred
    pub fn set_trigger(&self) {
        self.triggered.store(true, Ordering::Relaxed);
    }

    /// Check whether an event was signalled
    pub fn has_trigger(&self) -> bool {
        self.triggered.load(Ordering::Relaxed)
    }
}

impl Clone for Trigger {
    /// Snapshot the flag value
    fn clone(&self) -> Self {
        Self {
            triggered: AtomicBool::new(self.triggered.load(Ordering::Relaxed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trigger_is_unset() {
        let trigger = Trigger::new();
        assert!(!trigger.has_trigger());
    }

    #[test]
    fn test_default_trigger_is_unset() {
        let trigger = Trigger::default();
        assert!(!trigger.has_trigger());
    }

    #[test]
    fn test_set_trigger_is_observable() {
        let trigger = Trigger::new();
        trigger.set_trigger();
        assert!(trigger.has_trigger());
        // stays set for the lifetime of the object
        assert!(trigger.has_trigger());
    }

    #[test]
    fn test_set_trigger_is_idempotent() {
        let trigger = Trigger::new();
        trigger.set_trigger();
        trigger.set_trigger();
        assert!(trigger.has_trigger());
    }

    #[test]
    fn test_clone_snapshots_value() {
        let unset = Trigger::new();
        assert!(!unset.clone().has_trigger());

        let set = Trigger::new();
        set.set_trigger();
        assert!(set.clone().has_trigger());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Trigger::new();
        let copy = original.clone();
        original.set_trigger();
        assert!(!copy.has_trigger());
    }

    #[test]
    fn test_concurrent_producers() {
        use std::sync::Arc;
        use std::thread;

        let trigger = Arc::new(Trigger::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let trigger = Arc::clone(&trigger);
            handles.push(thread::spawn(move || {
                for _ in 0..100 {
                    trigger.set_trigger();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(trigger.has_trigger());
    }

    #[test]
    fn test_set_in_one_thread_observed_in_another() {
        use std::sync::Arc;
        use std::thread;

        let trigger = Arc::new(Trigger::new());

        let producer = Arc::clone(&trigger);
        thread::spawn(move || producer.set_trigger())
            .join()
            .unwrap();

        assert!(trigger.has_trigger());
    }
}
