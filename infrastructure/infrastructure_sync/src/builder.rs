//! Mutex configuration and builder
//!
//! Provides the validating builder which constructs a [`Mutex`] in place
//! inside caller-owned storage. All attributes (recursion, deadlock
//! detection, robustness, process sharing) are applied before the OS
//! handle is activated; the platform forbids changing them afterwards.

use std::mem::MaybeUninit;

use crate::mutex::Mutex;

/// Locking discipline of a mutex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexType {
    /// No recursion, no ownership checking; re-entry by the owner
    /// deadlocks
    Normal,
    /// The owning thread may lock repeatedly; n locks require n unlocks
    Recursive,
    /// Re-entry by the owner and unlock by a non-owner are reported as
    /// errors instead of deadlocking or being silently accepted
    WithDeadlockDetection,
}

/// What happens to a held lock when its owner terminates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexThreadTerminationBehavior {
    /// The lock is never released; every later acquisition attempt fails.
    /// Used when holding a stale lock is safer than touching shared state
    /// the dead owner may have left corrupted.
    StallWhenLocked,
    /// The next acquirer obtains the lock together with an inconsistency
    /// notification it must acknowledge via
    /// [`Mutex::make_consistent`](crate::mutex::Mutex::make_consistent).
    ReleaseWhenLocked,
}

/// Immutable snapshot of the settings a mutex was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutexConfiguration {
    /// Locking discipline
    pub mutex_type: MutexType,
    /// Owner-termination behavior
    pub thread_termination_behavior: MutexThreadTerminationBehavior,
}

/// Error type for mutex construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutexCreationError {
    /// The target storage already holds an initialized mutex
    MutexAlreadyInitialized,
    /// The system lacks the memory to initialize another mutex
    InsufficientMemory,
    /// A non-memory resource limit was hit
    InsufficientResources,
    /// The caller lacks the privilege for the requested attributes
    PermissionDenied,
    /// The platform reported an error this layer has no mapping for
    UnknownError,
}

impl MutexCreationError {
    pub(crate) fn from_error_code(code: i32) -> Self {
        match code {
            libc::ENOMEM => MutexCreationError::InsufficientMemory,
            libc::EAGAIN => MutexCreationError::InsufficientResources,
            libc::EPERM => MutexCreationError::PermissionDenied,
            _ => MutexCreationError::UnknownError,
        }
    }
}

impl std::fmt::Display for MutexCreationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MutexCreationError::MutexAlreadyInitialized => {
                "the target storage already holds an initialized mutex"
            }
            MutexCreationError::InsufficientMemory => "insufficient memory to create the mutex",
            MutexCreationError::InsufficientResources => {
                "insufficient resources to create the mutex"
            }
            MutexCreationError::PermissionDenied => "insufficient permissions to create the mutex",
            MutexCreationError::UnknownError => "an unknown error occurred during mutex creation",
        };
        write!(f, "{}", text)
    }
}

impl std::error::Error for MutexCreationError {}

/// Attribute set applied to a mutex handle before activation
///
/// Owns the underlying attribute object and releases it on drop, also on
/// the early-return error paths of [`MutexBuilder::create`].
struct MutexAttributes {
    attr: libc::pthread_mutexattr_t,
}

impl MutexAttributes {
    fn new() -> Result<Self, MutexCreationError> {
        let mut attr = MaybeUninit::<libc::pthread_mutexattr_t>::uninit();
        let rc = unsafe { libc::pthread_mutexattr_init(attr.as_mut_ptr()) };
        if rc != 0 {
            return Err(MutexCreationError::from_error_code(rc));
        }
        // initialized by pthread_mutexattr_init above
        Ok(Self {
            attr: unsafe { attr.assume_init() },
        })
    }

    fn set_type(&mut self, mutex_type: MutexType) -> Result<(), MutexCreationError> {
        let kind = match mutex_type {
            MutexType::Normal => libc::PTHREAD_MUTEX_NORMAL,
            MutexType::Recursive => libc::PTHREAD_MUTEX_RECURSIVE,
            MutexType::WithDeadlockDetection => libc::PTHREAD_MUTEX_ERRORCHECK,
        };
        let rc = unsafe { libc::pthread_mutexattr_settype(&mut self.attr, kind) };
        if rc != 0 {
            return Err(MutexCreationError::from_error_code(rc));
        }
        Ok(())
    }

    /// The handle must be usable from every process mapping the memory it
    /// is placed in, not only from the constructing one.
    fn set_process_shared(&mut self) -> Result<(), MutexCreationError> {
        let rc = unsafe {
            libc::pthread_mutexattr_setpshared(&mut self.attr, libc::PTHREAD_PROCESS_SHARED)
        };
        if rc != 0 {
            return Err(MutexCreationError::from_error_code(rc));
        }
        Ok(())
    }

    #[cfg(any(target_os = "linux", target_os = "android"))]
    fn set_robustness(
        &mut self,
        behavior: MutexThreadTerminationBehavior,
    ) -> Result<(), MutexCreationError> {
        let robustness = match behavior {
            MutexThreadTerminationBehavior::StallWhenLocked => libc::PTHREAD_MUTEX_STALLED,
            MutexThreadTerminationBehavior::ReleaseWhenLocked => libc::PTHREAD_MUTEX_ROBUST,
        };
        let rc = unsafe { libc::pthread_mutexattr_setrobust(&mut self.attr, robustness) };
        if rc != 0 {
            return Err(MutexCreationError::from_error_code(rc));
        }
        Ok(())
    }

    /// Owner-death notification is not available on this platform; a dead
    /// owner's lock stalls regardless of the configured behavior.
    #[cfg(not(any(target_os = "linux", target_os = "android")))]
    fn set_robustness(
        &mut self,
        _behavior: MutexThreadTerminationBehavior,
    ) -> Result<(), MutexCreationError> {
        Ok(())
    }

    fn as_ptr(&self) -> *const libc::pthread_mutexattr_t {
        &self.attr
    }
}

impl Drop for MutexAttributes {
    fn drop(&mut self) {
        // the attribute object is independent of mutexes created from it
        unsafe {
            libc::pthread_mutexattr_destroy(&mut self.attr);
        }
    }
}

/// Validating, fallible constructor for [`Mutex`]
///
/// Collects a [`MutexConfiguration`] through fluent setters and applies
/// it atomically to an empty storage slot. Construction never blocks and
/// never touches a slot that is already occupied.
#[derive(Debug, Clone, Copy)]
pub struct MutexBuilder {
    mutex_type: MutexType,
    thread_termination_behavior: MutexThreadTerminationBehavior,
}

impl MutexBuilder {
    /// Create a builder with the default configuration: recursive locking
    /// and stall-when-locked termination behavior
    pub fn new() -> Self {
        Self {
            mutex_type: MutexType::Recursive,
            thread_termination_behavior: MutexThreadTerminationBehavior::StallWhenLocked,
        }
    }

    /// Set the locking discipline
    pub fn mutex_type(mut self, mutex_type: MutexType) -> Self {
        self.mutex_type = mutex_type;
        self
    }

    /// Set the owner-termination behavior
    pub fn thread_termination_behavior(
        mut self,
        behavior: MutexThreadTerminationBehavior,
    ) -> Self {
        self.thread_termination_behavior = behavior;
        self
    }

    /// Construct a mutex in place inside `target`
    ///
    /// On success the slot holds a usable mutex. On failure the slot is
    /// left empty and an already-present mutex is never touched:
    /// re-initializing occupied storage fails with
    /// [`MutexCreationError::MutexAlreadyInitialized`].
    pub fn create(&self, target: &mut Option<Mutex>) -> Result<(), MutexCreationError> {
        if target.is_some() {
            return Err(MutexCreationError::MutexAlreadyInitialized);
        }

        let mut attributes = MutexAttributes::new()?;
        attributes.set_type(self.mutex_type)?;
        attributes.set_process_shared()?;
        attributes.set_robustness(self.thread_termination_behavior)?;

        let configuration = MutexConfiguration {
            mutex_type: self.mutex_type,
            thread_termination_behavior: self.thread_termination_behavior,
        };

        // activate the handle directly inside the caller's storage so the
        // mutex never moves after initialization
        let slot = target.insert(Mutex::with_inactive_handle(configuration));
        let rc = unsafe { libc::pthread_mutex_init(slot.handle.get(), attributes.as_ptr()) };
        if rc != 0 {
            // the handle was never activated, skip its teardown
            std::mem::forget(target.take());
            return Err(MutexCreationError::from_error_code(rc));
        }
        Ok(())
    }
}

impl Default for MutexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_into_empty_slot_succeeds() {
        let mut slot = None;
        assert!(MutexBuilder::new().create(&mut slot).is_ok());
        assert!(slot.is_some());
    }

    #[test]
    fn test_create_into_occupied_slot_fails() {
        let mut slot = None;
        assert!(MutexBuilder::new().create(&mut slot).is_ok());

        let result = MutexBuilder::new().create(&mut slot);
        assert_eq!(result, Err(MutexCreationError::MutexAlreadyInitialized));
        assert!(slot.is_some());
    }

    #[test]
    fn test_create_works_for_every_configuration() {
        for mutex_type in [
            MutexType::Normal,
            MutexType::Recursive,
            MutexType::WithDeadlockDetection,
        ] {
            for behavior in [
                MutexThreadTerminationBehavior::StallWhenLocked,
                MutexThreadTerminationBehavior::ReleaseWhenLocked,
            ] {
                let mut slot = None;
                let result = MutexBuilder::new()
                    .mutex_type(mutex_type)
                    .thread_termination_behavior(behavior)
                    .create(&mut slot);
                assert!(result.is_ok(), "{mutex_type:?}/{behavior:?}");

                let mutex = slot.unwrap();
                assert_eq!(mutex.configuration().mutex_type, mutex_type);
                assert_eq!(
                    mutex.configuration().thread_termination_behavior,
                    behavior
                );
            }
        }
    }

    #[test]
    fn test_default_configuration() {
        let mut slot = None;
        MutexBuilder::default().create(&mut slot).unwrap();

        let configuration = slot.unwrap().configuration();
        assert_eq!(configuration.mutex_type, MutexType::Recursive);
        assert_eq!(
            configuration.thread_termination_behavior,
            MutexThreadTerminationBehavior::StallWhenLocked
        );
    }

    #[test]
    fn test_creation_error_display() {
        assert_eq!(
            format!("{}", MutexCreationError::MutexAlreadyInitialized),
            "the target storage already holds an initialized mutex"
        );
        assert_eq!(
            format!("{}", MutexCreationError::InsufficientMemory),
            "insufficient memory to create the mutex"
        );
    }

    #[test]
    fn test_creation_error_from_error_code() {
        assert_eq!(
            MutexCreationError::from_error_code(libc::ENOMEM),
            MutexCreationError::InsufficientMemory
        );
        assert_eq!(
            MutexCreationError::from_error_code(libc::EAGAIN),
            MutexCreationError::InsufficientResources
        );
        assert_eq!(
            MutexCreationError::from_error_code(libc::EPERM),
            MutexCreationError::PermissionDenied
        );
        assert_eq!(
            MutexCreationError::from_error_code(libc::EINVAL),
            MutexCreationError::UnknownError
        );
    }
}
