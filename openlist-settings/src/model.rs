use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// First Android SDK level where manage-all-files replaces classic storage.
pub const MANAGE_ALL_FILES_SDK: i32 = 30;
/// First Android SDK level where notifications need a runtime grant.
pub const NOTIFICATION_PERMISSION_SDK: i32 = 32;

/// The five boolean settings mirrored from the persisted store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BoolSetting {
    AutoCheckUpdate,
    WakeLock,
    StartAtBoot,
    AutoOpenWebPage,
    SilentJumpApp,
}

impl BoolSetting {
    /// Every boolean setting, in display order.
    pub const ALL: [BoolSetting; 5] = [
        BoolSetting::AutoCheckUpdate,
        BoolSetting::WakeLock,
        BoolSetting::StartAtBoot,
        BoolSetting::AutoOpenWebPage,
        BoolSetting::SilentJumpApp,
    ];

    /// Persisted key of this setting.
    pub fn key(self) -> &'static str {
        match self {
            BoolSetting::AutoCheckUpdate => "auto_check_update",
            BoolSetting::WakeLock => "wake_lock",
            BoolSetting::StartAtBoot => "start_at_boot",
            BoolSetting::AutoOpenWebPage => "auto_open_web_page",
            BoolSetting::SilentJumpApp => "silent_jump_app",
        }
    }

    /// Value used before the store has answered.
    pub fn default_value(self) -> bool {
        match self {
            BoolSetting::AutoCheckUpdate
            | BoolSetting::WakeLock
            | BoolSetting::StartAtBoot => true,
            BoolSetting::AutoOpenWebPage | BoolSetting::SilentJumpApp => false,
        }
    }
}

impl fmt::Display for BoolSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for BoolSetting {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        BoolSetting::ALL
            .into_iter()
            .find(|setting| setting.key() == value)
            .ok_or_else(|| format!("unknown setting `{value}`"))
    }
}

/// OS permissions whose grant state the settings page surfaces.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PermissionKind {
    ManageAllFiles,
    ClassicStorage,
    Notification,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PermissionKind::ManageAllFiles => "manage_all_files",
            PermissionKind::ClassicStorage => "classic_storage",
            PermissionKind::Notification => "notification",
        };
        f.write_str(name)
    }
}

/// Host platform family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PlatformKind {
    Ios,
    Android,
    Windows,
    Macos,
    Linux,
    Other,
}

impl PlatformKind {
    /// Map a `std::env::consts::OS` style name onto a platform family.
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "ios" => PlatformKind::Ios,
            "android" => PlatformKind::Android,
            "windows" => PlatformKind::Windows,
            "macos" => PlatformKind::Macos,
            "linux" => PlatformKind::Linux,
            _ => PlatformKind::Other,
        }
    }
}

/// In-memory mirror of persisted settings and permission state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSnapshot {
    pub data_directory: String,
    pub auto_check_update: bool,
    pub wake_lock: bool,
    pub start_at_boot: bool,
    pub auto_open_web_page: bool,
    pub silent_jump_app: bool,
    pub manager_storage_granted: bool,
    pub storage_granted: bool,
    pub notification_granted: bool,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            data_directory: String::new(),
            auto_check_update: BoolSetting::AutoCheckUpdate.default_value(),
            wake_lock: BoolSetting::WakeLock.default_value(),
            start_at_boot: BoolSetting::StartAtBoot.default_value(),
            auto_open_web_page: BoolSetting::AutoOpenWebPage.default_value(),
            silent_jump_app: BoolSetting::SilentJumpApp.default_value(),
            manager_storage_granted: true,
            storage_granted: true,
            notification_granted: true,
        }
    }
}

impl SettingsSnapshot {
    /// Return the mirrored value of a boolean setting.
    pub fn get(&self, setting: BoolSetting) -> bool {
        match setting {
            BoolSetting::AutoCheckUpdate => self.auto_check_update,
            BoolSetting::WakeLock => self.wake_lock,
            BoolSetting::StartAtBoot => self.start_at_boot,
            BoolSetting::AutoOpenWebPage => self.auto_open_web_page,
            BoolSetting::SilentJumpApp => self.silent_jump_app,
        }
    }

    /// Update the mirrored value of a boolean setting.
    pub fn set(&mut self, setting: BoolSetting, value: bool) {
        let slot = match setting {
            BoolSetting::AutoCheckUpdate => &mut self.auto_check_update,
            BoolSetting::WakeLock => &mut self.wake_lock,
            BoolSetting::StartAtBoot => &mut self.start_at_boot,
            BoolSetting::AutoOpenWebPage => &mut self.auto_open_web_page,
            BoolSetting::SilentJumpApp => &mut self.silent_jump_app,
        };
        *slot = value;
    }

    /// Return the visibility flag backing a permission prompt.
    pub fn is_granted(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::ManageAllFiles => self.manager_storage_granted,
            PermissionKind::ClassicStorage => self.storage_granted,
            PermissionKind::Notification => self.notification_granted,
        }
    }

    pub(crate) fn set_granted(&mut self, kind: PermissionKind, granted: bool) {
        let slot = match kind {
            PermissionKind::ManageAllFiles => &mut self.manager_storage_granted,
            PermissionKind::ClassicStorage => &mut self.storage_granted,
            PermissionKind::Notification => &mut self.notification_granted,
        };
        *slot = granted;
    }

    /// Permissions that still need a grant, in prompt order.
    pub fn missing_permissions(&self) -> Vec<PermissionKind> {
        [
            PermissionKind::ManageAllFiles,
            PermissionKind::ClassicStorage,
            PermissionKind::Notification,
        ]
        .into_iter()
        .filter(|kind| !self.is_granted(*kind))
        .collect()
    }

    /// Whether the "important settings" header should be shown.
    pub fn needs_permission_attention(&self) -> bool {
        !self.manager_storage_granted
            || !self.storage_granted
            || !self.notification_granted
    }

    /// How the data directory row should be labelled.
    pub fn data_directory_label(&self) -> DataDirectoryLabel<'_> {
        if self.data_directory.is_empty() {
            DataDirectoryLabel::Default
        } else {
            DataDirectoryLabel::Path(&self.data_directory)
        }
    }
}

/// Display form of the stored data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirectoryLabel<'a> {
    /// Nothing stored; the platform default applies.
    Default,
    /// An explicit directory.
    Path(&'a str),
}
