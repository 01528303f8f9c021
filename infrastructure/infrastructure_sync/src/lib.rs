//! Infrastructure Layer: Inter-Process Synchronization Primitives
//!
//! This crate provides the mutual-exclusion building block of the
//! shared-memory transport:
//! - Mutex (OS-backed, placeable in memory shared across processes,
//!   with configurable recursion, deadlock detection and owner-death
//!   recovery)
//! - MutexBuilder (validating, fallible in-place construction)
//!
//! Higher-level port locks compose this primitive; none of the transport
//! code calls the platform synchronization API anywhere else.

#[cfg(unix)]
pub mod builder;
#[cfg(unix)]
pub mod mutex;

#[cfg(unix)]
pub use builder::{
    MutexBuilder, MutexConfiguration, MutexCreationError, MutexThreadTerminationBehavior,
    MutexType,
};
#[cfg(unix)]
pub use mutex::{
    Mutex, MutexLockError, MutexMakeConsistentError, MutexTryLock, MutexTryLockError,
    MutexUnlockError,
};
