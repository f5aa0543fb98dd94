// shared/src/lib.rs

/// Errors raised by a key/value store backend.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("not found")]
    NotFound,
    #[error("key has no expiry")]
    NoExpiry,
    #[error("store: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
