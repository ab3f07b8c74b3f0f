//! `WifiManager.MulticastLock` over JNI.

use crate::error::{Error, Result};
use crate::platform::{LockFactory, PlatformLock};
use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};
use log::error;

/// `Context.WIFI_SERVICE`
const WIFI_SERVICE: &str = "wifi";

const MULTICAST_LOCK_SIG: &str = "(Ljava/lang/String;)Landroid/net/wifi/WifiManager$MulticastLock;";

/// Turn a failed JNI call into an [`Error::Jni`], describing and clearing
/// any pending Java exception so the caller's env stays usable.
pub(crate) fn check_exception<T>(
    env: &mut JNIEnv,
    result: jni::errors::Result<T>,
    what: &str,
) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(e) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_describe();
                let _ = env.exception_clear();
            }
            error!("Cannot call {}: {}", what, e);
            Err(Error::jni(format!("{}: {}", what, e)))
        }
    }
}

pub struct WifiMulticastLock {
    vm: &'static JavaVM,
    lock: GlobalRef,
    tag: String,
}

impl WifiMulticastLock {
    fn call<T, F>(&self, what: &str, f: F) -> Result<T>
    where
        F: for<'local> FnOnce(&mut JNIEnv<'local>, &JObject) -> jni::errors::Result<T>,
    {
        let mut env = self.vm.attach_current_thread().map_err(Error::jni)?;
        let result = f(&mut *env, self.lock.as_obj());
        check_exception(&mut *env, result, what)
    }
}

impl PlatformLock for WifiMulticastLock {
    fn set_reference_counted(&mut self, reference_counted: bool) -> Result<()> {
        self.call("MulticastLock.setReferenceCounted", |env, lock| {
            env.call_method(
                lock,
                "setReferenceCounted",
                "(Z)V",
                &[JValue::Bool(u8::from(reference_counted))],
            )
            .map(|_| ())
        })
    }

    fn acquire(&mut self) -> Result<()> {
        self.call("MulticastLock.acquire", |env, lock| {
            env.call_method(lock, "acquire", "()V", &[]).map(|_| ())
        })
    }

    fn release(&mut self) -> Result<()> {
        self.call("MulticastLock.release", |env, lock| {
            env.call_method(lock, "release", "()V", &[]).map(|_| ())
        })
    }

    fn is_held(&self) -> Result<bool> {
        self.call("MulticastLock.isHeld", |env, lock| {
            env.call_method(lock, "isHeld", "()Z", &[])?.z()
        })
    }

    fn describe(&self) -> String {
        let description = self.call("MulticastLock.toString", |env, lock| {
            let obj = env
                .call_method(lock, "toString", "()Ljava/lang/String;", &[])?
                .l()?;
            let jstr = JString::from(obj);
            let s: String = env.get_string(&jstr)?.into();
            Ok(s)
        });
        description.unwrap_or_else(|_| format!("MulticastLock[{}]", self.tag))
    }
}

/// An `android.content.Context` together with the env it was passed on.
pub struct AndroidContext<'a, 'local> {
    env: &'a mut JNIEnv<'local>,
    context: &'a JObject<'local>,
    vm: &'static JavaVM,
}

impl<'a, 'local> AndroidContext<'a, 'local> {
    pub fn new(env: &'a mut JNIEnv<'local>, context: &'a JObject<'local>, vm: &'static JavaVM) -> Self {
        AndroidContext { env, context, vm }
    }
}

impl LockFactory for AndroidContext<'_, '_> {
    type Lock = WifiMulticastLock;

    fn create_multicast_lock(&mut self, tag: &str) -> Result<WifiMulticastLock> {
        let result = create_lock(self.env, self.context, tag);
        let lock = check_exception(self.env, result, "WifiManager.createMulticastLock")?;
        Ok(WifiMulticastLock {
            vm: self.vm,
            lock,
            tag: tag.to_owned(),
        })
    }
}

fn create_lock(env: &mut JNIEnv, context: &JObject, tag: &str) -> jni::errors::Result<GlobalRef> {
    let service_name = env.new_string(WIFI_SERVICE)?;
    let wifi = env
        .call_method(
            context,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&service_name)],
        )?
        .l()?;
    if wifi.is_null() {
        return Err(jni::errors::Error::NullPtr("WifiManager"));
    }

    let tag = env.new_string(tag)?;
    let lock = env
        .call_method(
            &wifi,
            "createMulticastLock",
            MULTICAST_LOCK_SIG,
            &[JValue::Object(&tag)],
        )?
        .l()?;
    if lock.is_null() {
        return Err(jni::errors::Error::NullPtr("MulticastLock"));
    }

    env.new_global_ref(lock)
}
