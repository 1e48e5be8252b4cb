//! Capability traits the controller calls into.
//!
//! Implementations live outside the controller: the native config bridge,
//! the OS permission API, the directory picker and so on. Every async method
//! returns a `Send` future so the controller can drive it from spawned tasks.
//! Implementors are free to write `async fn` in their `impl` blocks.

use std::future::Future;

use crate::errors::Result;
use crate::model::{BoolSetting, PermissionKind, PlatformKind};

/// Read/write access to the persisted settings store.
pub trait ConfigClient: Send + Sync + 'static {
    /// Read a persisted boolean setting.
    fn get_bool(
        &self,
        setting: BoolSetting,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Persist a boolean setting.
    fn set_bool(
        &self,
        setting: BoolSetting,
        value: bool,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Read the data directory, already normalized by the store.
    fn data_directory(&self) -> impl Future<Output = Result<String>> + Send;

    /// Persist the data directory. An empty path selects the store default.
    fn set_data_directory(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Queries and requests OS permissions.
pub trait PermissionProbe: Send + Sync + 'static {
    /// Whether `kind` is currently granted. This never prompts the user.
    fn is_granted(
        &self,
        kind: PermissionKind,
    ) -> impl Future<Output = Result<bool>> + Send;

    /// Ask the OS to grant `kind`.
    fn request(
        &self,
        kind: PermissionKind,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Static facts about the host platform.
pub trait PlatformInfo: Send + Sync + 'static {
    /// OS version code (the Android SDK level on Android).
    fn os_version_code(&self) -> impl Future<Output = Result<i32>> + Send;

    /// Platform family.
    fn platform_kind(&self) -> PlatformKind;
}

/// Native directory chooser.
pub trait DirectoryPicker: Send + Sync + 'static {
    /// Let the user pick a directory. `Ok(None)` means the user cancelled.
    fn pick_directory(
        &self,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Sandbox location used on platforms without a user-visible filesystem.
pub trait DefaultDirectoryProvider: Send + Sync + 'static {
    /// The app's private documents directory.
    fn application_private_directory(
        &self,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Every collaborator the controller needs, handed over in one piece.
#[derive(Debug, Clone)]
pub struct Collaborators<C, P, I, D, S> {
    pub config: C,
    pub permissions: P,
    pub platform: I,
    pub picker: D,
    pub defaults: S,
}
