use thiserror::Error;

use crate::model::{BoolSetting, PermissionKind};

/// Errors produced by settings collaborators and the file-backed store.
///
/// The controller never returns these to its callers; they are logged at the
/// point where a read or write resolves.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading a persisted boolean failed.
    #[error("reading `{setting}` failed: {message}")]
    Read {
        setting: BoolSetting,
        message: String,
    },
    /// Writing a persisted boolean failed.
    #[error("writing `{setting}` failed: {message}")]
    Write {
        setting: BoolSetting,
        message: String,
    },
    /// The config store could not be reached at all.
    #[error("config store unavailable: {0}")]
    StoreUnavailable(String),
    /// A permission query or request failed.
    #[error("permission `{kind}` query failed: {message}")]
    Permission {
        kind: PermissionKind,
        message: String,
    },
    /// Platform information could not be obtained.
    #[error("platform query failed: {0}")]
    Platform(String),
    /// The directory picker reported an error (not a cancellation).
    #[error("directory picker failed: {0}")]
    Picker(String),
    /// No tokio runtime was running when the controller was built.
    #[error("settings controller requires a running tokio runtime")]
    NoRuntime,
    /// Filesystem operation failed.
    #[error("settings IO failed")]
    Io(#[from] std::io::Error),
    /// JSON serialization or deserialization failed.
    #[error("settings JSON failed")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
