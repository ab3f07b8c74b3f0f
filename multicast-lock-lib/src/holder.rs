//! Guarded holder for the multicast lock handle.
//!
//! The handle is created lazily on the first acquire and kept for the
//! lifetime of the holder. Creation and every count change happen under a
//! single mutex.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, log_enabled, warn, Level};

use crate::config::LockConfig;
use crate::error::{Error, Result};
use crate::guard::MulticastLockGuard;
use crate::platform::{LockFactory, PlatformLock};

pub struct MulticastLockHolder<L> {
    tag: String,
    reference_counted: bool,
    state: Mutex<HolderState<L>>,
}

struct HolderState<L> {
    lock: Option<L>,
    /// Mirror of the platform reference count.
    count: u32,
}

impl<L: PlatformLock> MulticastLockHolder<L> {
    pub fn new<S: Into<String>>(tag: S) -> Self {
        Self::with_reference_counting(tag, true)
    }

    pub fn with_reference_counting<S: Into<String>>(tag: S, reference_counted: bool) -> Self {
        MulticastLockHolder {
            tag: tag.into(),
            reference_counted,
            state: Mutex::new(HolderState {
                lock: None,
                count: 0,
            }),
        }
    }

    pub fn from_config(config: &LockConfig) -> Self {
        Self::with_reference_counting(config.tag.clone(), config.reference_counted)
    }

    /// Acquire the multicast lock, creating it through `context` first if
    /// this is the first call. Fails with [`Error::CountOverflow`] once the
    /// mirrored count reaches `u32::MAX`, before the platform is called.
    pub fn acquire<F>(&self, context: &mut F) -> Result<()>
    where
        F: LockFactory<Lock = L> + ?Sized,
    {
        let mut guard = self.state();
        let state = &mut *guard;

        let count = if self.reference_counted {
            match state.count.checked_add(1) {
                Some(count) => count,
                None => {
                    error!("Multicast lock \"{}\" reference count overflow", self.tag);
                    return Err(Error::CountOverflow);
                }
            }
        } else {
            1
        };

        let lock = match state.lock.take() {
            Some(lock) => lock,
            None => self.create(context)?,
        };
        let lock = state.lock.insert(lock);

        if let Err(e) = lock.acquire() {
            error!("Cannot acquire multicast lock \"{}\": {}", self.tag, e);
            return Err(e);
        }
        state.count = count;

        if log_enabled!(Level::Debug) {
            debug!("Multicast lock: {}", lock.describe());
        }
        Ok(())
    }

    /// Drop one reference. Fails with [`Error::NotAcquired`] when there is no
    /// outstanding acquire; the platform is not touched in that case.
    pub fn release(&self) -> Result<()> {
        let mut guard = self.state();
        let state = &mut *guard;

        let lock = match state.lock.as_mut() {
            Some(lock) if state.count > 0 => lock,
            _ => {
                warn!(
                    "Multicast lock \"{}\" released without a matching acquire",
                    self.tag
                );
                return Err(Error::NotAcquired);
            }
        };

        if let Err(e) = lock.release() {
            error!("Cannot release multicast lock \"{}\": {}", self.tag, e);
            return Err(e);
        }
        state.count -= 1;

        debug!("Multicast lock released.");
        Ok(())
    }

    /// Acquire and return a guard that releases on drop.
    pub fn lock<F>(&self, context: &mut F) -> Result<MulticastLockGuard<'_, L>>
    where
        F: LockFactory<Lock = L> + ?Sized,
    {
        self.acquire(context)?;
        Ok(MulticastLockGuard::new(self))
    }

    /// Ask the platform whether the lock is currently held.
    pub fn is_held(&self) -> Result<bool> {
        match self.state().lock.as_ref() {
            Some(lock) => lock.is_held(),
            None => Ok(false),
        }
    }

    pub fn is_created(&self) -> bool {
        self.state().lock.is_some()
    }

    pub fn count(&self) -> u32 {
        self.state().count
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn is_reference_counted(&self) -> bool {
        self.reference_counted
    }

    fn create<F>(&self, context: &mut F) -> Result<L>
    where
        F: LockFactory<Lock = L> + ?Sized,
    {
        let mut lock = context.create_multicast_lock(&self.tag).map_err(|e| {
            error!("Cannot create multicast lock \"{}\": {}", self.tag, e);
            e
        })?;
        lock.set_reference_counted(self.reference_counted)?;
        debug!(
            "Created multicast lock \"{}\", reference counted: {}",
            self.tag, self.reference_counted
        );
        Ok(lock)
    }

    #[cfg(test)]
    pub(crate) fn force_count(&self, count: u32) {
        self.state().count = count;
    }

    // Count changes are applied only after the platform call succeeds, so a
    // poisoned mutex still guards consistent state.
    fn state(&self) -> MutexGuard<'_, HolderState<L>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
