//! Collaborators for running the controller on a desktop host.

use std::path::PathBuf;

use crate::bridge::{
    DefaultDirectoryProvider, DirectoryPicker, PermissionProbe, PlatformInfo,
};
use crate::errors::Result;
use crate::model::{PermissionKind, PlatformKind};
use crate::paths;

/// Platform facts of the running process.
#[derive(Debug, Clone)]
pub struct HostPlatform {
    kind: PlatformKind,
    os_version: i32,
    documents: PathBuf,
}

impl HostPlatform {
    /// Describe the platform this binary was compiled for.
    pub fn detect() -> Self {
        Self {
            kind: PlatformKind::from_os_name(std::env::consts::OS),
            os_version: 0,
            documents: paths::documents_directory(),
        }
    }

    /// Describe an arbitrary platform.
    pub fn new(
        kind: PlatformKind,
        os_version: i32,
        documents: PathBuf,
    ) -> Self {
        Self {
            kind,
            os_version,
            documents,
        }
    }
}

impl PlatformInfo for HostPlatform {
    async fn os_version_code(&self) -> Result<i32> {
        Ok(self.os_version)
    }

    fn platform_kind(&self) -> PlatformKind {
        self.kind
    }
}

impl DefaultDirectoryProvider for HostPlatform {
    async fn application_private_directory(&self) -> Result<String> {
        Ok(self.documents.to_string_lossy().into_owned())
    }
}

/// Desktop hosts have no runtime permission model; everything is granted.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPermissions;

impl PermissionProbe for HostPermissions {
    async fn is_granted(&self, _kind: PermissionKind) -> Result<bool> {
        Ok(true)
    }

    async fn request(&self, kind: PermissionKind) -> Result<()> {
        log::info!("permission `{kind}` is implicitly granted on this host");
        Ok(())
    }
}

/// Picker that answers with a path chosen up front (for example on the
/// command line). `None` behaves like a cancelled dialog.
#[derive(Debug, Clone, Default)]
pub struct PresetPicker {
    choice: Option<String>,
}

impl PresetPicker {
    pub fn new(choice: Option<String>) -> Self {
        Self { choice }
    }
}

impl DirectoryPicker for PresetPicker {
    async fn pick_directory(&self) -> Result<Option<String>> {
        Ok(self.choice.clone())
    }
}
