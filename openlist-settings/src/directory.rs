use crate::bridge::{DefaultDirectoryProvider, DirectoryPicker};
use crate::model::PlatformKind;

/// How a data directory is chosen on the current platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryStrategy {
    /// The user picks a directory with the native picker.
    Pickable,
    /// The app is confined to its sandbox documents directory.
    Sandboxed,
    /// No picker and no sandbox default.
    Unsupported,
}

impl DirectoryStrategy {
    /// Select the strategy for a platform family.
    pub fn for_platform(platform: PlatformKind) -> Self {
        match platform {
            PlatformKind::Ios => DirectoryStrategy::Sandboxed,
            PlatformKind::Android
            | PlatformKind::Windows
            | PlatformKind::Macos
            | PlatformKind::Linux => DirectoryStrategy::Pickable,
            PlatformKind::Other => DirectoryStrategy::Unsupported,
        }
    }
}

/// Informational message the UI should show alongside a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryNotice {
    /// The sandbox documents directory is used; nothing was asked.
    SandboxedDocuments,
    /// Directory selection is unavailable; the default directory is used.
    SelectionUnsupported,
}

/// Outcome of a directory selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectorySelection {
    /// The user picked a directory.
    Picked(String),
    /// The sandbox documents directory was resolved.
    Sandboxed {
        path: String,
        notice: DirectoryNotice,
    },
    /// The picker returned nothing. The caller decides whether to confirm
    /// the default directory or retry.
    NoSelection,
    /// Selection is unsupported; `path` is always empty.
    Unsupported {
        path: String,
        notice: DirectoryNotice,
    },
}

impl DirectorySelection {
    /// Path that should be written to the store, if any.
    pub fn path_to_apply(&self) -> Option<&str> {
        match self {
            DirectorySelection::Picked(path)
            | DirectorySelection::Sandboxed { path, .. }
            | DirectorySelection::Unsupported { path, .. } => Some(path),
            DirectorySelection::NoSelection => None,
        }
    }

    /// Notice to surface to the user, if any.
    pub fn notice(&self) -> Option<DirectoryNotice> {
        match self {
            DirectorySelection::Sandboxed { notice, .. }
            | DirectorySelection::Unsupported { notice, .. } => Some(*notice),
            DirectorySelection::Picked(_) | DirectorySelection::NoSelection => {
                None
            },
        }
    }
}

/// Run `strategy` against the picker and sandbox collaborators.
pub async fn select_directory<D, S>(
    strategy: DirectoryStrategy,
    picker: &D,
    defaults: &S,
) -> DirectorySelection
where
    D: DirectoryPicker,
    S: DefaultDirectoryProvider,
{
    match strategy {
        DirectoryStrategy::Sandboxed => {
            match defaults.application_private_directory().await {
                Ok(path) => DirectorySelection::Sandboxed {
                    path,
                    notice: DirectoryNotice::SandboxedDocuments,
                },
                Err(err) => {
                    log::warn!("sandbox directory lookup failed: {err}");
                    DirectorySelection::NoSelection
                },
            }
        },
        DirectoryStrategy::Pickable => match picker.pick_directory().await {
            Ok(Some(path)) => DirectorySelection::Picked(path),
            Ok(None) => {
                log::debug!("directory picker cancelled");
                DirectorySelection::NoSelection
            },
            Err(err) => {
                log::warn!("directory picker failed: {err}");
                DirectorySelection::NoSelection
            },
        },
        DirectoryStrategy::Unsupported => DirectorySelection::Unsupported {
            path: String::new(),
            notice: DirectoryNotice::SelectionUnsupported,
        },
    }
}
