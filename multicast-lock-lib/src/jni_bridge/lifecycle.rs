//! Lifecycle entry points for JNI bridge
//!
//! Each call is paired by the Java side: one `nativeRelease` per successful
//! `nativeAcquire`. Nothing here unwinds into Java; failures are logged and
//! reported as `false` (or `-1` for counts).

use super::types::*;
use super::wifi::AndroidContext;
use crate::config::LockConfig;
use jni::objects::{JClass, JObject, JString};
use jni::sys::{jboolean, jint, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;
use log::{error, info, warn};

/// JNI: Load the config file at `config_path`
///
/// Optional. Must run before the first acquire to take effect, since the
/// holder is built from the config on first use. A failed load leaves the
/// config unset, so the call can be retried with a corrected file.
#[no_mangle]
pub extern "C" fn Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeInit(
    mut env: JNIEnv,
    _class: JClass,
    config_path_jstr: JString,
) -> jboolean {
    if is_initialized() || CONFIG.get().is_some() {
        init_logger();
        error!("Already initialized!");
        return JNI_FALSE;
    }

    let config_path: String = match env.get_string(&config_path_jstr) {
        Ok(s) => s.into(),
        Err(e) => {
            init_logger();
            error!("Failed to get config path: {}", e);
            return JNI_FALSE;
        }
    };

    let loaded = LockConfig::load(&config_path);
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            init_logger();
            error!("Failed to load config from {}: {}", config_path, e);
            return JNI_FALSE;
        }
    };

    if let Err(e) = CONFIG.set(config) {
        init_logger();
        error!("Failed to store config: {}", e);
        return JNI_FALSE;
    }
    init_logger();

    if let Err(e) = java_vm(&env) {
        error!("Failed to get JavaVM: {}", e);
        return JNI_FALSE;
    }

    info!("Config loaded from: {}", config_path);
    info!("Lock tag: {}", config().tag);
    JNI_TRUE
}

/// JNI: Acquire the multicast lock, creating it through `context` on the
/// first call
#[no_mangle]
pub extern "C" fn Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeAcquire<'local>(
    mut env: JNIEnv<'local>,
    _class: JClass<'local>,
    context: JObject<'local>,
) -> jboolean {
    init_logger();

    if context.is_null() {
        error!("Cannot determine android context.");
        return JNI_FALSE;
    }

    let vm = match java_vm(&env) {
        Ok(vm) => vm,
        Err(e) => {
            error!("Failed to get JavaVM: {}", e);
            return JNI_FALSE;
        }
    };

    let mut android_context = AndroidContext::new(&mut env, &context, vm);
    match holder().acquire(&mut android_context) {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            error!("Cannot acquire multicast lock: {}", e);
            JNI_FALSE
        }
    }
}

/// JNI: Release one reference on the multicast lock
///
/// `context` is accepted for symmetry with `nativeAcquire`; releasing never
/// needs to resolve the WiFi service.
#[no_mangle]
pub extern "C" fn Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeRelease(
    _env: JNIEnv,
    _class: JClass,
    _context: JObject,
) -> jboolean {
    init_logger();

    match holder().release() {
        Ok(()) => JNI_TRUE,
        Err(e) => {
            warn!("Cannot release multicast lock: {}", e);
            JNI_FALSE
        }
    }
}

/// JNI: Whether the platform reports the lock as held
#[no_mangle]
pub extern "C" fn Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeIsHeld(
    _env: JNIEnv,
    _class: JClass,
) -> jboolean {
    init_logger();

    match holder().is_held() {
        Ok(true) => JNI_TRUE,
        Ok(false) => JNI_FALSE,
        Err(e) => {
            error!("Cannot query multicast lock: {}", e);
            JNI_FALSE
        }
    }
}

/// JNI: Outstanding acquires, or -1 if the count does not fit a jint
#[no_mangle]
pub extern "C" fn Java_com_mycompany_qmlplaygroundclient_MulticastLockNative_nativeGetCount(
    _env: JNIEnv,
    _class: JClass,
) -> jint {
    init_logger();

    jint::try_from(holder().count()).unwrap_or(-1)
}
