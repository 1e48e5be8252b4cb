#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use openlist_settings::{
    BoolSetting, Collaborators, ConfigClient, DefaultDirectoryProvider,
    DirectoryPicker, PermissionKind, PermissionProbe, PlatformInfo,
    PlatformKind, Result, SettingsController, SettingsError,
};

pub const DEFAULT_DIRECTORY: &str = "/default/path";
pub const SANDBOX_DIRECTORY: &str = "/var/mobile/Containers/Data/Documents";

pub type TestController = SettingsController<
    FakeStore,
    FakePermissions,
    FakePlatform,
    FakePicker,
    FakeDefaults,
>;

#[derive(Default)]
struct StoreInner {
    values: Mutex<HashMap<BoolSetting, bool>>,
    directory: Mutex<String>,
    read_delays: Mutex<HashMap<BoolSetting, Duration>>,
    failing_reads: Mutex<HashSet<BoolSetting>>,
    fail_writes: Mutex<bool>,
    writes: Mutex<Vec<(BoolSetting, bool)>>,
    directory_writes: Mutex<Vec<String>>,
}

/// In-memory config store. Empty directories normalize to
/// [`DEFAULT_DIRECTORY`].
#[derive(Clone, Default)]
pub struct FakeStore {
    inner: Arc<StoreInner>,
}

impl FakeStore {
    pub fn with_values(values: &[(BoolSetting, bool)]) -> Self {
        let store = Self::default();
        for (setting, value) in values {
            store.put(*setting, *value);
        }
        store
    }

    pub fn put(&self, setting: BoolSetting, value: bool) {
        self.inner
            .values
            .lock()
            .expect("values lock")
            .insert(setting, value);
    }

    pub fn stored(&self, setting: BoolSetting) -> Option<bool> {
        self.inner
            .values
            .lock()
            .expect("values lock")
            .get(&setting)
            .copied()
    }

    pub fn put_directory(&self, path: &str) {
        *self.inner.directory.lock().expect("directory lock") =
            String::from(path);
    }

    pub fn delay_read(&self, setting: BoolSetting, delay: Duration) {
        self.inner
            .read_delays
            .lock()
            .expect("delays lock")
            .insert(setting, delay);
    }

    pub fn fail_read(&self, setting: BoolSetting) {
        self.inner
            .failing_reads
            .lock()
            .expect("failing reads lock")
            .insert(setting);
    }

    pub fn fail_writes(&self) {
        *self.inner.fail_writes.lock().expect("fail writes lock") = true;
    }

    pub fn writes(&self) -> Vec<(BoolSetting, bool)> {
        self.inner.writes.lock().expect("writes lock").clone()
    }

    pub fn directory_writes(&self) -> Vec<String> {
        self.inner
            .directory_writes
            .lock()
            .expect("directory writes lock")
            .clone()
    }
}

impl ConfigClient for FakeStore {
    async fn get_bool(&self, setting: BoolSetting) -> Result<bool> {
        // Capture the value before waiting so a slow read returns what the
        // store held when the read started.
        let value = self.stored(setting).unwrap_or(setting.default_value());
        let failing = self
            .inner
            .failing_reads
            .lock()
            .expect("failing reads lock")
            .contains(&setting);
        let delay = self
            .inner
            .read_delays
            .lock()
            .expect("delays lock")
            .get(&setting)
            .copied();

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if failing {
            return Err(SettingsError::Read {
                setting,
                message: String::from("bridge timed out"),
            });
        }
        Ok(value)
    }

    async fn set_bool(&self, setting: BoolSetting, value: bool) -> Result<()> {
        self.inner
            .writes
            .lock()
            .expect("writes lock")
            .push((setting, value));
        if *self.inner.fail_writes.lock().expect("fail writes lock") {
            return Err(SettingsError::Write {
                setting,
                message: String::from("store offline"),
            });
        }
        self.put(setting, value);
        Ok(())
    }

    async fn data_directory(&self) -> Result<String> {
        let directory =
            self.inner.directory.lock().expect("directory lock").clone();
        if directory.is_empty() {
            return Ok(String::from(DEFAULT_DIRECTORY));
        }
        Ok(directory)
    }

    async fn set_data_directory(&self, path: &str) -> Result<()> {
        self.inner
            .directory_writes
            .lock()
            .expect("directory writes lock")
            .push(String::from(path));
        self.put_directory(path);
        Ok(())
    }
}

#[derive(Default)]
struct PermissionsInner {
    granted: Mutex<HashMap<PermissionKind, bool>>,
    failing: Mutex<HashSet<PermissionKind>>,
    probes: Mutex<Vec<PermissionKind>>,
    requests: Mutex<Vec<PermissionKind>>,
}

/// Permission probe where every kind is denied unless granted explicitly.
#[derive(Clone, Default)]
pub struct FakePermissions {
    inner: Arc<PermissionsInner>,
}

impl FakePermissions {
    pub fn grant(&self, kind: PermissionKind) {
        self.inner
            .granted
            .lock()
            .expect("granted lock")
            .insert(kind, true);
    }

    pub fn fail(&self, kind: PermissionKind) {
        self.inner.failing.lock().expect("failing lock").insert(kind);
    }

    pub fn probes(&self) -> Vec<PermissionKind> {
        self.inner.probes.lock().expect("probes lock").clone()
    }

    pub fn requests(&self) -> Vec<PermissionKind> {
        self.inner.requests.lock().expect("requests lock").clone()
    }
}

impl PermissionProbe for FakePermissions {
    async fn is_granted(&self, kind: PermissionKind) -> Result<bool> {
        self.inner.probes.lock().expect("probes lock").push(kind);
        if self.inner.failing.lock().expect("failing lock").contains(&kind) {
            return Err(SettingsError::Permission {
                kind,
                message: String::from("binder died"),
            });
        }
        Ok(self
            .inner
            .granted
            .lock()
            .expect("granted lock")
            .get(&kind)
            .copied()
            .unwrap_or(false))
    }

    async fn request(&self, kind: PermissionKind) -> Result<()> {
        self.inner.requests.lock().expect("requests lock").push(kind);
        Ok(())
    }
}

#[derive(Clone)]
pub struct FakePlatform {
    kind: PlatformKind,
    sdk: Option<i32>,
}

impl FakePlatform {
    pub fn android(sdk: i32) -> Self {
        Self {
            kind: PlatformKind::Android,
            sdk: Some(sdk),
        }
    }

    pub fn android_without_version() -> Self {
        Self {
            kind: PlatformKind::Android,
            sdk: None,
        }
    }

    pub fn of(kind: PlatformKind) -> Self {
        Self { kind, sdk: Some(0) }
    }
}

impl PlatformInfo for FakePlatform {
    async fn os_version_code(&self) -> Result<i32> {
        self.sdk
            .ok_or_else(|| SettingsError::Platform(String::from("no sdk")))
    }

    fn platform_kind(&self) -> PlatformKind {
        self.kind
    }
}

#[derive(Clone, Default)]
pub struct FakePicker {
    answer: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl FakePicker {
    pub fn answering(answer: Option<&str>) -> Self {
        Self {
            answer: answer.map(String::from),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DirectoryPicker for FakePicker {
    async fn pick_directory(&self) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.answer.clone())
    }
}

#[derive(Clone, Default)]
pub struct FakeDefaults;

impl DefaultDirectoryProvider for FakeDefaults {
    async fn application_private_directory(&self) -> Result<String> {
        Ok(String::from(SANDBOX_DIRECTORY))
    }
}

pub fn build(
    store: &FakeStore,
    permissions: &FakePermissions,
    platform: FakePlatform,
    picker: &FakePicker,
) -> TestController {
    SettingsController::new(Collaborators {
        config: store.clone(),
        permissions: permissions.clone(),
        platform,
        picker: picker.clone(),
        defaults: FakeDefaults,
    })
    .expect("tests run inside a tokio runtime")
}

pub fn build_for(platform: FakePlatform, store: &FakeStore) -> TestController {
    build(
        store,
        &FakePermissions::default(),
        platform,
        &FakePicker::default(),
    )
}
