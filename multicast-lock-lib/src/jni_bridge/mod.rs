//! JNI bridge for Android
//!
//! Exposes the process-wide multicast lock holder to
//! `com.mycompany.qmlplaygroundclient.MulticastLockNative`.
//!
//! ## Architecture
//!
//! - `types`: Global state (JavaVM, config, holder) using the OnceLock pattern
//! - `wifi`: `WifiManager.MulticastLock` driven through JNI
//! - `lifecycle`: init/acquire/release/status entry points
//!
//! ## Thread Model
//!
//! - Entry points run on whichever Android thread calls them
//! - Lock calls re-attach through the stored JavaVM, so the handle can be
//!   released from a different thread than the one that created it

pub mod lifecycle;
pub mod types;
pub mod wifi;

// Re-export main entry points
pub use lifecycle::{
    Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeAcquire,
    Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeGetCount,
    Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeInit,
    Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeIsHeld,
    Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeRelease,
};
