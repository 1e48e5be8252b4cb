use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::bridge::ConfigClient;
use crate::errors::{Result, SettingsError};
use crate::model::BoolSetting;

/// On-disk layout of the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct StoredSettings {
    data_directory: String,
    auto_check_update: bool,
    wake_lock: bool,
    start_at_boot: bool,
    auto_open_web_page: bool,
    silent_jump_app: bool,
}

impl Default for StoredSettings {
    fn default() -> Self {
        Self {
            data_directory: String::new(),
            auto_check_update: BoolSetting::AutoCheckUpdate.default_value(),
            wake_lock: BoolSetting::WakeLock.default_value(),
            start_at_boot: BoolSetting::StartAtBoot.default_value(),
            auto_open_web_page: BoolSetting::AutoOpenWebPage.default_value(),
            silent_jump_app: BoolSetting::SilentJumpApp.default_value(),
        }
    }
}

impl StoredSettings {
    fn slot(&mut self, setting: BoolSetting) -> &mut bool {
        match setting {
            BoolSetting::AutoCheckUpdate => &mut self.auto_check_update,
            BoolSetting::WakeLock => &mut self.wake_lock,
            BoolSetting::StartAtBoot => &mut self.start_at_boot,
            BoolSetting::AutoOpenWebPage => &mut self.auto_open_web_page,
            BoolSetting::SilentJumpApp => &mut self.silent_jump_app,
        }
    }
}

/// Status describing how the settings file was loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LoadStatus {
    Loaded,
    Missing,
    Invalid(String),
}

/// [`ConfigClient`] backed by a JSON file.
///
/// An empty data directory is reported as `default_data_directory`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    default_data_directory: PathBuf,
    io: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(
        path: impl Into<PathBuf>,
        default_data_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            path: path.into(),
            default_data_directory: default_data_directory.into(),
            io: Mutex::new(()),
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<StoredSettings> {
        let _guard = self.lock()?;
        let (settings, status) = load_from_path(&self.path)?;
        if let LoadStatus::Invalid(message) = &status {
            log::warn!("settings file invalid: {message}");
        }
        Ok(settings)
    }

    fn modify(&self, apply: impl FnOnce(&mut StoredSettings)) -> Result<()> {
        let _guard = self.lock()?;
        let (mut settings, _) = load_from_path(&self.path)?;
        apply(&mut settings);
        save_to_path(&self.path, &settings)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.io.lock().map_err(|_| {
            SettingsError::StoreUnavailable(String::from("store lock poisoned"))
        })
    }
}

impl ConfigClient for JsonFileStore {
    async fn get_bool(&self, setting: BoolSetting) -> Result<bool> {
        let mut settings = self.read()?;
        Ok(*settings.slot(setting))
    }

    async fn set_bool(&self, setting: BoolSetting, value: bool) -> Result<()> {
        self.modify(|settings| *settings.slot(setting) = value)
    }

    async fn data_directory(&self) -> Result<String> {
        let settings = self.read()?;
        if settings.data_directory.is_empty() {
            let fallback = self.default_data_directory.to_string_lossy();
            return Ok(fallback.into_owned());
        }
        Ok(settings.data_directory)
    }

    async fn set_data_directory(&self, path: &str) -> Result<()> {
        let path = path.trim().to_string();
        self.modify(move |settings| settings.data_directory = path)
    }
}

pub(crate) fn load_from_path(
    path: &Path,
) -> Result<(StoredSettings, LoadStatus)> {
    let data = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok((StoredSettings::default(), LoadStatus::Missing));
        },
        Err(err) => return Err(err.into()),
    };

    match serde_json::from_str::<StoredSettings>(&data) {
        Ok(settings) => Ok((settings, LoadStatus::Loaded)),
        Err(err) => Ok((
            StoredSettings::default(),
            LoadStatus::Invalid(format!("{err}")),
        )),
    }
}

pub(crate) fn save_to_path(
    path: &Path,
    settings: &StoredSettings,
) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let payload = serde_json::to_string_pretty(settings)?;
    write_atomic(path, payload.as_bytes())?;

    Ok(())
}

fn write_atomic(path: &Path, payload: &[u8]) -> std::io::Result<()> {
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, payload)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
