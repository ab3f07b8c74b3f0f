use std::{fmt, result};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("multicast lock released without a matching acquire")]
    NotAcquired,
    #[error("multicast lock reference count overflow")]
    CountOverflow,
    #[error("platform error: {0}")]
    Platform(String),
    #[error("jni error: {0}")]
    Jni(String),
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn platform<T: fmt::Display>(inner: T) -> Self {
        Self::Platform(inner.to_string())
    }
    pub fn jni<T: fmt::Display>(inner: T) -> Self {
        Self::Jni(inner.to_string())
    }
    pub fn config<T: fmt::Display>(inner: T) -> Self {
        Self::Config(inner.to_string())
    }
}
