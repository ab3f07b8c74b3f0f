//! Scoped acquisition of the multicast lock.

use std::fmt;

use log::error;

use crate::holder::MulticastLockHolder;
use crate::platform::PlatformLock;

/// Holds one reference on the multicast lock; the reference is released
/// when the guard is dropped.
#[must_use = "the multicast lock is released as soon as the guard is dropped"]
pub struct MulticastLockGuard<'a, L: PlatformLock> {
    holder: &'a MulticastLockHolder<L>,
}

impl<'a, L: PlatformLock> MulticastLockGuard<'a, L> {
    pub(crate) fn new(holder: &'a MulticastLockHolder<L>) -> Self {
        MulticastLockGuard { holder }
    }

    pub fn holder(&self) -> &MulticastLockHolder<L> {
        self.holder
    }
}

impl<L: PlatformLock> Drop for MulticastLockGuard<'_, L> {
    fn drop(&mut self) {
        if let Err(e) = self.holder.release() {
            error!("Cannot release multicast lock on drop: {}", e);
        }
    }
}

impl<L: PlatformLock> fmt::Debug for MulticastLockGuard<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MulticastLockGuard")
            .field("tag", &self.holder.tag())
            .field("count", &self.holder.count())
            .finish()
    }
}
