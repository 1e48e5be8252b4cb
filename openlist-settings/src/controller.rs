use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::bridge::{
    Collaborators, ConfigClient, DefaultDirectoryProvider, DirectoryPicker,
    PermissionProbe, PlatformInfo,
};
use crate::directory::{DirectorySelection, DirectoryStrategy, select_directory};
use crate::errors::{Result, SettingsError};
use crate::model::{BoolSetting, PermissionKind, PlatformKind, SettingsSnapshot};
use crate::permissions::{
    PermissionGate, SURFACED_PERMISSIONS, android_gate, probes_permissions,
};
use crate::subscription::{PendingTask, SnapshotWatcher};

struct Shared<C, P, I, D, S> {
    bridge: Collaborators<C, P, I, D, S>,
    platform: PlatformKind,
    strategy: DirectoryStrategy,
    state: watch::Sender<SettingsSnapshot>,
    runtime: Handle,
}

/// Keeps the UI's view of settings in sync with the persisted store.
///
/// The controller is a cheap handle; clones share one snapshot. Build it once
/// per UI session, pass it to every consumer, and drop it when the session
/// ends. Observers are notified through [`SnapshotWatcher`] after every
/// mutation that changes the snapshot.
///
/// None of the operations return errors: failed reads leave the field at its
/// last known value, failed writes are logged.
pub struct SettingsController<C, P, I, D, S> {
    shared: Arc<Shared<C, P, I, D, S>>,
}

impl<C, P, I, D, S> Clone for SettingsController<C, P, I, D, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C, P, I, D, S> SettingsController<C, P, I, D, S>
where
    C: ConfigClient,
    P: PermissionProbe,
    I: PlatformInfo,
    D: DirectoryPicker,
    S: DefaultDirectoryProvider,
{
    /// Create a controller bound to the tokio runtime of the caller.
    pub fn new(bridge: Collaborators<C, P, I, D, S>) -> Result<Self> {
        let runtime =
            Handle::try_current().map_err(|_| SettingsError::NoRuntime)?;
        Ok(Self::with_runtime(bridge, runtime))
    }

    /// Create a controller that spawns background work on `runtime`.
    pub fn with_runtime(
        bridge: Collaborators<C, P, I, D, S>,
        runtime: Handle,
    ) -> Self {
        let platform = bridge.platform.platform_kind();
        let strategy = DirectoryStrategy::for_platform(platform);
        let (state, _) = watch::channel(SettingsSnapshot::default());

        Self {
            shared: Arc::new(Shared {
                bridge,
                platform,
                strategy,
                state,
                runtime,
            }),
        }
    }

    /// Platform family the controller was built for.
    pub fn platform(&self) -> PlatformKind {
        self.shared.platform
    }

    /// Directory selection strategy derived from the platform.
    pub fn directory_strategy(&self) -> DirectoryStrategy {
        self.shared.strategy
    }

    /// Copy of the current snapshot.
    pub fn snapshot(&self) -> SettingsSnapshot {
        self.shared.state.borrow().clone()
    }

    /// Current in-memory value of a boolean setting.
    pub fn get_bool(&self, setting: BoolSetting) -> bool {
        self.shared.state.borrow().get(setting)
    }

    /// Current in-memory data directory.
    pub fn data_directory(&self) -> String {
        self.shared.state.borrow().data_directory.clone()
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> SnapshotWatcher {
        SnapshotWatcher::new(self.shared.state.subscribe())
    }

    /// Kick off the initial load. Call once after construction.
    pub fn on_init(&self) -> PendingTask {
        log::info!(
            "settings controller started on {:?} with {:?} directory strategy",
            self.shared.platform,
            self.shared.strategy
        );
        self.spawn_refresh()
    }

    /// Reload everything after the app returns to the foreground.
    ///
    /// An older refresh that is still running is not cancelled; whichever
    /// read resolves last wins for its field.
    pub fn on_resume(&self) -> PendingTask {
        log::debug!("app resumed, refreshing settings");
        self.spawn_refresh()
    }

    /// Read every setting and permission flag from the collaborators.
    ///
    /// All reads run concurrently and each field is applied as soon as its
    /// own read resolves.
    pub async fn refresh(&self) {
        tokio::join!(
            self.refresh_bool(BoolSetting::AutoCheckUpdate),
            self.refresh_bool(BoolSetting::WakeLock),
            self.refresh_bool(BoolSetting::StartAtBoot),
            self.refresh_bool(BoolSetting::AutoOpenWebPage),
            self.refresh_bool(BoolSetting::SilentJumpApp),
            self.refresh_data_directory(),
            self.refresh_permissions(),
        );
    }

    /// Update a boolean setting and persist it in the background.
    ///
    /// The snapshot reflects `value` when this returns. The returned handle
    /// resolves once the store write finished; dropping it is fine.
    pub fn set_bool(&self, setting: BoolSetting, value: bool) -> PendingTask {
        self.update(|snapshot| snapshot.set(setting, value));

        let shared = Arc::clone(&self.shared);
        let handle = self.shared.runtime.spawn(async move {
            match shared.bridge.config.set_bool(setting, value).await {
                Ok(()) => log::debug!("persisted {setting} = {value}"),
                Err(err) => log::warn!("settings write failed: {err}"),
            }
        });
        PendingTask::new("write", handle)
    }

    /// Persist a data directory and mirror the value the store reports back.
    ///
    /// An empty `path` asks the store for its default directory.
    pub async fn set_data_directory(&self, path: &str) {
        let config = &self.shared.bridge.config;
        if let Err(err) = config.set_data_directory(path).await {
            log::warn!("data directory write failed: {err}");
        }
        self.refresh_data_directory().await;
    }

    /// Resolve a data directory using the platform strategy.
    ///
    /// Nothing is written; see [`Self::choose_data_directory`].
    pub async fn select_data_directory(&self) -> DirectorySelection {
        select_directory(
            self.shared.strategy,
            &self.shared.bridge.picker,
            &self.shared.bridge.defaults,
        )
        .await
    }

    /// Select a data directory and apply it.
    ///
    /// [`DirectorySelection::NoSelection`] writes nothing; the caller may
    /// follow up with [`Self::confirm_default_directory`].
    pub async fn choose_data_directory(&self) -> DirectorySelection {
        let selection = self.select_data_directory().await;
        if let Some(path) = selection.path_to_apply() {
            self.set_data_directory(path).await;
        }
        selection
    }

    /// Switch back to the store's default data directory.
    pub async fn confirm_default_directory(&self) {
        self.set_data_directory("").await;
    }

    /// Ask the OS for a permission. The grant shows up on the next refresh.
    pub fn request_permission(&self, kind: PermissionKind) -> PendingTask {
        let shared = Arc::clone(&self.shared);
        let handle = self.shared.runtime.spawn(async move {
            if let Err(err) = shared.bridge.permissions.request(kind).await {
                log::warn!("permission request failed: {err}");
            }
        });
        PendingTask::new("permission request", handle)
    }

    fn spawn_refresh(&self) -> PendingTask {
        let controller = self.clone();
        let handle = self
            .shared
            .runtime
            .spawn(async move { controller.refresh().await });
        PendingTask::new("refresh", handle)
    }

    async fn refresh_bool(&self, setting: BoolSetting) {
        match self.shared.bridge.config.get_bool(setting).await {
            Ok(value) => self.update(|snapshot| snapshot.set(setting, value)),
            Err(err) => log::warn!("settings read failed: {err}"),
        }
    }

    async fn refresh_data_directory(&self) {
        match self.shared.bridge.config.data_directory().await {
            Ok(path) => self.update(|snapshot| snapshot.data_directory = path),
            Err(err) => log::warn!("data directory read failed: {err}"),
        }
    }

    async fn refresh_permissions(&self) {
        if !probes_permissions(self.shared.platform) {
            self.update(|snapshot| {
                for kind in SURFACED_PERMISSIONS {
                    snapshot.set_granted(kind, true);
                }
            });
            return;
        }

        let sdk = match self.shared.bridge.platform.os_version_code().await {
            Ok(sdk) => sdk,
            Err(err) => {
                log::warn!("os version read failed: {err}");
                return;
            },
        };

        tokio::join!(
            self.refresh_grant(PermissionKind::ManageAllFiles, sdk),
            self.refresh_grant(PermissionKind::ClassicStorage, sdk),
            self.refresh_grant(PermissionKind::Notification, sdk),
        );
    }

    async fn refresh_grant(&self, kind: PermissionKind, sdk: i32) {
        let granted = match android_gate(kind, sdk) {
            PermissionGate::NotRequired => true,
            PermissionGate::Probe => {
                match self.shared.bridge.permissions.is_granted(kind).await {
                    Ok(granted) => granted,
                    Err(err) => {
                        log::warn!("permission probe failed: {err}");
                        return;
                    },
                }
            },
        };
        self.update(|snapshot| snapshot.set_granted(kind, granted));
    }

    fn update(&self, apply: impl FnOnce(&mut SettingsSnapshot)) {
        self.shared.state.send_if_modified(|snapshot| {
            let before = snapshot.clone();
            apply(snapshot);
            *snapshot != before
        });
    }
}
