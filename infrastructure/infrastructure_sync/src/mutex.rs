//! Inter-process capable mutex
//!
//! Provides the mutual-exclusion primitive placed in memory shared by
//! several processes. The wrapper orchestrates the OS handle and tracks
//! nothing beyond it and the configuration snapshot; fairness among
//! waiters is whatever the OS provides.

use std::cell::UnsafeCell;
use std::fmt;

use infrastructure_diagnostics::Logger;

use crate::builder::{MutexConfiguration, MutexThreadTerminationBehavior};

const LOG_ORIGIN: &str = "sync::Mutex";

/// Outcome of a non-blocking acquisition attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexTryLock {
    /// The calling thread now holds the lock
    LockSucceeded,
    /// Another holder is active, the lock was not acquired
    FailedToAcquireLock,
}

/// Error type for blocking acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexLockError {
    /// The calling thread already owns the lock and the configuration
    /// detects deadlocks instead of blocking on them
    DeadlockCondition,
    /// The lock is held by the caller now, but the previous owner died
    /// while holding it; acknowledge via [`Mutex::make_consistent`]
    /// before relying on the protected state
    LockAcquiredButHasInconsistentStateSinceOwnerDied,
    /// The platform reported an error this layer has no mapping for
    UnknownError,
}

/// Error type for non-blocking acquisition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexTryLockError {
    /// The lock is held by the caller now, but the previous owner died
    /// while holding it; acknowledge via [`Mutex::make_consistent`]
    /// before relying on the protected state
    LockAcquiredButHasInconsistentStateSinceOwnerDied,
    /// The platform reported an error this layer has no mapping for
    UnknownError,
}

/// Error type for releasing the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexUnlockError {
    /// The calling thread does not own the lock; nothing was unlocked
    NotOwnedByThread,
    /// The platform reported an error this layer has no mapping for
    UnknownError,
}

/// Error type for acknowledging an owner-death inconsistency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexMakeConsistentError {
    /// The platform reported an error this layer has no mapping for
    UnknownError,
}

impl fmt::Display for MutexLockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MutexLockError::DeadlockCondition => "the calling thread already owns the mutex",
            MutexLockError::LockAcquiredButHasInconsistentStateSinceOwnerDied => {
                "the lock was acquired but the previous owner died while holding it"
            }
            MutexLockError::UnknownError => "an unknown error occurred while locking the mutex",
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for MutexTryLockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MutexTryLockError::LockAcquiredButHasInconsistentStateSinceOwnerDied => {
                "the lock was acquired but the previous owner died while holding it"
            }
            MutexTryLockError::UnknownError => {
                "an unknown error occurred while try-locking the mutex"
            }
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for MutexUnlockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MutexUnlockError::NotOwnedByThread => {
                "the mutex is not owned by the calling thread"
            }
            MutexUnlockError::UnknownError => {
                "an unknown error occurred while unlocking the mutex"
            }
        };
        write!(f, "{}", text)
    }
}

impl fmt::Display for MutexMakeConsistentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutexMakeConsistentError::UnknownError => write!(
                f,
                "an unknown error occurred while marking the mutex consistent"
            ),
        }
    }
}

impl std::error::Error for MutexLockError {}
impl std::error::Error for MutexTryLockError {}
impl std::error::Error for MutexUnlockError {}
impl std::error::Error for MutexMakeConsistentError {}

/// Mutual-exclusion primitive usable across process boundaries
///
/// Built exclusively through
/// [`MutexBuilder`](crate::builder::MutexBuilder), which activates the OS
/// handle in place inside caller-owned storage; the handle must not move
/// afterwards. Every operation reports failures as values, none panics.
pub struct Mutex {
    pub(crate) handle: UnsafeCell<libc::pthread_mutex_t>,
    config: MutexConfiguration,
}

impl fmt::Debug for Mutex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mutex")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

// Safety: the OS handle performs all cross-thread synchronization itself
// and is initialized with the process-shared attribute; the configuration
// snapshot is immutable after construction.
unsafe impl Send for Mutex {}
unsafe impl Sync for Mutex {}

impl Mutex {
    /// Storage with a not-yet-activated handle; only
    /// [`MutexBuilder::create`](crate::builder::MutexBuilder::create) may
    /// activate it.
    pub(crate) fn with_inactive_handle(config: MutexConfiguration) -> Self {
        Self {
            // zeroed storage is what the platform initializer expects to
            // overwrite
            handle: UnsafeCell::new(unsafe { std::mem::zeroed() }),
            config,
        }
    }

    /// Get the configuration this mutex was built with
    pub fn configuration(&self) -> MutexConfiguration {
        self.config
    }

    /// Block the calling thread until the lock is held
    ///
    /// With deadlock detection active, re-entry by the owner returns
    /// [`MutexLockError::DeadlockCondition`] instead of blocking forever.
    /// When the previous owner died holding the lock and release-when-
    /// locked is configured, the lock is acquired and
    /// [`MutexLockError::LockAcquiredButHasInconsistentStateSinceOwnerDied`]
    /// tells the caller to acknowledge the state explicitly.
    pub fn lock(&self) -> Result<(), MutexLockError> {
        match unsafe { libc::pthread_mutex_lock(self.handle.get()) } {
            0 => Ok(()),
            libc::EDEADLK => Err(MutexLockError::DeadlockCondition),
            libc::EOWNERDEAD => {
                Logger::warn(
                    LOG_ORIGIN,
                    "lock acquired but the previous owner terminated while holding it",
                );
                Err(MutexLockError::LockAcquiredButHasInconsistentStateSinceOwnerDied)
            }
            _ => Err(MutexLockError::UnknownError),
        }
    }

    /// Try to acquire the lock without blocking
    ///
    /// Contention is not an error: it is reported as
    /// [`MutexTryLock::FailedToAcquireLock`]. Acquiring a dead owner's
    /// lock is an error despite physically succeeding, so the caller
    /// cannot overlook the inconsistency.
    pub fn try_lock(&self) -> Result<MutexTryLock, MutexTryLockError> {
        match unsafe { libc::pthread_mutex_trylock(self.handle.get()) } {
            0 => Ok(MutexTryLock::LockSucceeded),
            libc::EBUSY => Ok(MutexTryLock::FailedToAcquireLock),
            libc::EOWNERDEAD => {
                Logger::warn(
                    LOG_ORIGIN,
                    "lock acquired but the previous owner terminated while holding it",
                );
                Err(MutexTryLockError::LockAcquiredButHasInconsistentStateSinceOwnerDied)
            }
            _ => Err(MutexTryLockError::UnknownError),
        }
    }

    /// Release the lock
    ///
    /// With deadlock detection active, a call from a thread that does not
    /// own the lock returns [`MutexUnlockError::NotOwnedByThread`] and
    /// changes nothing.
    pub fn unlock(&self) -> Result<(), MutexUnlockError> {
        match unsafe { libc::pthread_mutex_unlock(self.handle.get()) } {
            0 => Ok(()),
            libc::EPERM => Err(MutexUnlockError::NotOwnedByThread),
            _ => Err(MutexUnlockError::UnknownError),
        }
    }

    /// Acknowledge that the state protected by this mutex was repaired
    /// after its previous owner died
    ///
    /// Valid while holding a lock acquired with an owner-died
    /// notification; afterwards lock and unlock behave normally again.
    /// Calling it on a mutex that is already consistent is a no-op.
    pub fn make_consistent(&self) -> Result<(), MutexMakeConsistentError> {
        if self.config.thread_termination_behavior
            != MutexThreadTerminationBehavior::ReleaseWhenLocked
        {
            return Ok(());
        }
        acknowledge_owner_death(self.handle.get())
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn acknowledge_owner_death(
    handle: *mut libc::pthread_mutex_t,
) -> Result<(), MutexMakeConsistentError> {
    match unsafe { libc::pthread_mutex_consistent(handle) } {
        // EINVAL: the mutex is already consistent, nothing to acknowledge
        0 | libc::EINVAL => Ok(()),
        _ => Err(MutexMakeConsistentError::UnknownError),
    }
}

/// Without robustness support a dead owner's lock stalls and there is
/// never an inconsistency to acknowledge.
#[cfg(not(any(target_os = "linux", target_os = "android")))]
fn acknowledge_owner_death(
    _handle: *mut libc::pthread_mutex_t,
) -> Result<(), MutexMakeConsistentError> {
    Ok(())
}

impl Drop for Mutex {
    fn drop(&mut self) {
        let rc = unsafe { libc::pthread_mutex_destroy(self.handle.get()) };
        if rc != 0 {
            Logger::error(
                LOG_ORIGIN,
                &format!("destroying a mutex which is still in use (error code {rc})"),
            );
        }
    }
}
