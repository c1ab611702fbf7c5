//! Error types shared by the store and configuration layers.
//!
//! None of these errors ever reach the shopper: the controller logs them and
//! degrades to defaults. They exist so backends can report what went wrong.

use std::fmt;

/// Errors reported by a [`PreferenceStore`](crate::store::PreferenceStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend cannot be reached at all (e.g. storage disabled by the host).
    Unavailable(String),
    /// The backend rejected a read or write (quota, security policy, ...).
    Backend(String),
    /// The backend's internal state is unusable.
    Corruption(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            Self::Backend(msg) => write!(f, "storage backend error: {msg}"),
            Self::Corruption(msg) => write!(f, "storage corruption: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Result type for store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised while building a configuration from host-supplied options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Options text is not valid JSON for the expected shape.
    Parse(String),
    /// Options parsed but carry a value that cannot be used.
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "invalid options: {msg}"),
            Self::Invalid(msg) => write!(f, "unusable option: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
