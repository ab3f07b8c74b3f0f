//! Global state management for JNI bridge

use super::wifi::WifiMulticastLock;
use crate::config::{ConfigCell, LockConfig};
use crate::error::{Error, Result};
use crate::holder::MulticastLockHolder;
use jni::{JNIEnv, JavaVM};
use log::LevelFilter;
use std::sync::OnceLock;

/// Global JavaVM, used to re-attach when driving the lock
pub static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// Config set by `nativeInit`; defaults apply when init was skipped
pub static CONFIG: ConfigCell = ConfigCell::new();

/// The process-wide multicast lock holder
pub static HOLDER: OnceLock<MulticastLockHolder<WifiMulticastLock>> = OnceLock::new();

/// Active config, frozen on first use by the holder
pub fn config() -> &'static LockConfig {
    CONFIG.get_or_default()
}

pub fn holder() -> &'static MulticastLockHolder<WifiMulticastLock> {
    HOLDER.get_or_init(|| MulticastLockHolder::from_config(config()))
}

/// Helper to check whether the holder has been set up
pub fn is_initialized() -> bool {
    HOLDER.get().is_some()
}

/// Fetch the JavaVM, storing it on first use
pub fn java_vm(env: &JNIEnv) -> Result<&'static JavaVM> {
    if let Some(vm) = JAVA_VM.get() {
        return Ok(vm);
    }
    let vm = env.get_java_vm().map_err(Error::jni)?;
    // Another thread may have won the race; either VM is the same process VM.
    let _ = JAVA_VM.set(vm);
    JAVA_VM
        .get()
        .ok_or_else(|| Error::jni("JavaVM not initialized"))
}

/// Initialize Android logger from the config set so far, without freezing it
pub fn init_logger() {
    init_logger_with(&CONFIG.current());
}

pub fn init_logger_with(config: &LockConfig) {
    let level = config.level_filter().unwrap_or(LevelFilter::Debug);
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(level)
            .with_tag(config.log_tag.clone()),
    );
}
