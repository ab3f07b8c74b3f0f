mod config;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::platform::{LockFactory, PlatformLock};

pub(crate) fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-process stand-in for the WiFi service, mirroring how
/// `WifiManager.MulticastLock` counts references.
#[derive(Default)]
pub(crate) struct FakeWifi {
    pub created: AtomicUsize,
    pub refs: AtomicUsize,
    pub fail_create: AtomicBool,
    pub fail_acquire: AtomicBool,
    pub fail_release: AtomicBool,
    pub panic_acquire: AtomicBool,
    pub tags: Mutex<Vec<String>>,
}

impl FakeWifi {
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn refs(&self) -> usize {
        self.refs.load(Ordering::SeqCst)
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeContext {
    pub wifi: Arc<FakeWifi>,
}

impl LockFactory for FakeContext {
    type Lock = FakeLock;

    fn create_multicast_lock(&mut self, tag: &str) -> Result<FakeLock> {
        if self.wifi.fail_create.load(Ordering::SeqCst) {
            return Err(Error::platform("wifi service unavailable"));
        }
        self.wifi.created.fetch_add(1, Ordering::SeqCst);
        self.wifi.tags.lock().unwrap().push(tag.to_owned());
        Ok(FakeLock {
            wifi: Arc::clone(&self.wifi),
            tag: tag.to_owned(),
            reference_counted: true,
        })
    }
}

pub(crate) struct FakeLock {
    wifi: Arc<FakeWifi>,
    tag: String,
    reference_counted: bool,
}

impl PlatformLock for FakeLock {
    fn set_reference_counted(&mut self, reference_counted: bool) -> Result<()> {
        self.reference_counted = reference_counted;
        Ok(())
    }

    fn acquire(&mut self) -> Result<()> {
        if self.wifi.panic_acquire.load(Ordering::SeqCst) {
            panic!("wifi service crashed");
        }
        if self.wifi.fail_acquire.load(Ordering::SeqCst) {
            return Err(Error::platform("acquire rejected"));
        }
        if self.reference_counted {
            self.wifi.refs.fetch_add(1, Ordering::SeqCst);
        } else {
            self.wifi.refs.store(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        if self.wifi.fail_release.load(Ordering::SeqCst) {
            return Err(Error::platform("release rejected"));
        }
        if self.reference_counted {
            let prev = self
                .wifi
                .refs
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
            if prev.is_err() {
                return Err(Error::platform(format!("MulticastLock under-released: {}", self.tag)));
            }
        } else {
            self.wifi.refs.store(0, Ordering::SeqCst);
        }
        Ok(())
    }

    fn is_held(&self) -> Result<bool> {
        Ok(self.wifi.refs() > 0)
    }

    fn describe(&self) -> String {
        format!("MulticastLock{{tag={}, refs={}}}", self.tag, self.wifi.refs())
    }
}
