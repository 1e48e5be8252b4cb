use crate::model::{
    MANAGE_ALL_FILES_SDK, NOTIFICATION_PERMISSION_SDK, PermissionKind,
    PlatformKind,
};

/// Permissions refreshed on every settings reload, in prompt order.
pub const SURFACED_PERMISSIONS: [PermissionKind; 3] = [
    PermissionKind::ManageAllFiles,
    PermissionKind::ClassicStorage,
    PermissionKind::Notification,
];

/// How the grant state of a permission is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionGate {
    /// Ask the OS.
    Probe,
    /// The permission does not apply here; the flag reads as granted.
    NotRequired,
}

/// Decide whether `kind` must be probed on an Android device at `sdk`.
pub fn android_gate(kind: PermissionKind, sdk: i32) -> PermissionGate {
    let required = match kind {
        PermissionKind::ManageAllFiles => sdk >= MANAGE_ALL_FILES_SDK,
        PermissionKind::ClassicStorage => sdk < MANAGE_ALL_FILES_SDK,
        PermissionKind::Notification => sdk >= NOTIFICATION_PERMISSION_SDK,
    };

    if required {
        PermissionGate::Probe
    } else {
        PermissionGate::NotRequired
    }
}

/// Whether permission probes apply on this platform at all.
pub fn probes_permissions(platform: PlatformKind) -> bool {
    platform == PlatformKind::Android
}
