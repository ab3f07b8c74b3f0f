#[cfg(test)]
mod tests;

pub mod config;
pub mod error;
pub mod guard;
pub mod holder;
pub mod platform;

// JNI bridge for Android
#[cfg(all(feature = "jni-bridge", target_os = "android"))]
pub mod jni_bridge;

pub use config::{ConfigCell, LockConfig, DEFAULT_LOCK_TAG};
pub use error::{Error, Result};
pub use guard::MulticastLockGuard;
pub use holder::MulticastLockHolder;
pub use platform::{LockFactory, PlatformLock};
