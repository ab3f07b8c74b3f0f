use std::{fmt, fs, path::Path, result::Result as StdResult, str::FromStr, sync::OnceLock};

use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name the lock is created with, also used as the Android log tag.
pub const DEFAULT_LOCK_TAG: &str = "qmlplaygroundclient";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct LockConfig {
    /// Tag passed to `WifiManager.createMulticastLock`.
    pub tag: String,
    pub reference_counted: bool,
    pub log_tag: String,
    pub log_level: String,
}

impl Default for LockConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_LOCK_TAG.to_owned(),
            reference_counted: true,
            log_tag: DEFAULT_LOCK_TAG.to_owned(),
            log_level: "debug".to_owned(),
        }
    }
}

impl LockConfig {
    /// Read and validate a TOML config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::config(format!("failed to read {}: {}", path.as_ref().display(), e))
        })?;
        let config: LockConfig = content.parse().map_err(Error::config)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tag.is_empty() {
            return Err(Error::config("lock tag must not be empty"));
        }
        self.level_filter().map(|_| ())
    }

    pub fn level_filter(&self) -> Result<LevelFilter> {
        self.log_level
            .parse()
            .map_err(|_| Error::config(format!("invalid log level: {}", self.log_level)))
    }
}

impl FromStr for LockConfig {
    type Err = toml::de::Error;
    fn from_str(s: &str) -> StdResult<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl fmt::Display for LockConfig {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        toml::to_string_pretty(self)
            .map_err(|_| fmt::Error)
            .and_then(|s| write!(f, "{}", s))
    }
}

/// A config filled at most once.
///
/// Reading through [`ConfigCell::current`] falls back to the defaults without
/// storing them, so a failed load can still be followed by a good one.
/// [`ConfigCell::get_or_default`] freezes whatever is active.
pub struct ConfigCell {
    inner: OnceLock<LockConfig>,
}

impl ConfigCell {
    pub const fn new() -> Self {
        ConfigCell {
            inner: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Option<&LockConfig> {
        self.inner.get()
    }

    pub fn current(&self) -> LockConfig {
        self.get().cloned().unwrap_or_default()
    }

    pub fn get_or_default(&self) -> &LockConfig {
        self.inner.get_or_init(LockConfig::default)
    }

    pub fn set(&self, config: LockConfig) -> Result<()> {
        self.inner
            .set(config)
            .map_err(|_| Error::config("config already set"))
    }
}

impl Default for ConfigCell {
    fn default() -> Self {
        Self::new()
    }
}
