//! Seam between the lock holder and the platform WiFi service.
//!
//! On Android the service is `WifiManager` reached through JNI (see
//! `jni_bridge::wifi`); tests plug in an in-process fake.

use crate::error::Result;

/// A platform multicast lock object, e.g. `WifiManager.MulticastLock`.
///
/// The platform owns the reference count: with reference counting on, every
/// `acquire` must be balanced by a `release` before the lock is dropped at
/// the OS level.
pub trait PlatformLock {
    fn set_reference_counted(&mut self, reference_counted: bool) -> Result<()>;

    fn acquire(&mut self) -> Result<()>;

    fn release(&mut self) -> Result<()>;

    fn is_held(&self) -> Result<bool>;

    /// Human readable state, used in log lines.
    fn describe(&self) -> String;
}

/// Execution context able to resolve the networking service and create a
/// multicast lock from it.
pub trait LockFactory {
    type Lock: PlatformLock;

    fn create_multicast_lock(&mut self, tag: &str) -> Result<Self::Lock>;
}
