//! Settings synchronization for the OpenList app.
//!
//! The crate keeps a UI-facing snapshot of the user settings (update checks,
//! wake lock, boot start, web page auto-open, silent app jump and the data
//! directory) in sync with a persisted store owned by the host platform, and
//! derives which OS permission prompts the settings page must show.
//!
//! The main entry points are:
//! - [`SettingsController`], which owns the snapshot, refreshes it on init
//!   and resume, and writes every edit back to the store.
//! - The capability traits in [`bridge`], implemented by the host:
//!   [`ConfigClient`], [`PermissionProbe`], [`PlatformInfo`],
//!   [`DirectoryPicker`] and [`DefaultDirectoryProvider`].
//!
//! Front-ends usually:
//! 1. Bundle their collaborators into [`Collaborators`] and build a
//!    controller inside a tokio runtime.
//! 2. Call [`SettingsController::on_init`] once and
//!    [`SettingsController::on_resume`] whenever the app comes back.
//! 3. Render from [`SnapshotWatcher`] and forward user edits to the setters.

pub mod bridge;
mod controller;
mod directory;
mod errors;
mod model;
pub mod paths;
mod permissions;
mod storage;
mod subscription;

pub mod host;

pub use bridge::{
    Collaborators, ConfigClient, DefaultDirectoryProvider, DirectoryPicker,
    PermissionProbe, PlatformInfo,
};
pub use controller::SettingsController;
pub use directory::{
    DirectoryNotice, DirectorySelection, DirectoryStrategy, select_directory,
};
pub use errors::{Result, SettingsError};
pub use model::{
    BoolSetting, DataDirectoryLabel, MANAGE_ALL_FILES_SDK,
    NOTIFICATION_PERMISSION_SDK, PermissionKind, PlatformKind,
    SettingsSnapshot,
};
pub use permissions::{PermissionGate, SURFACED_PERMISSIONS, android_gate};
pub use storage::JsonFileStore;
pub use subscription::{PendingTask, SnapshotWatcher};
