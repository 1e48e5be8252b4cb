use std::path::{Path, PathBuf};

const APP_DIR: &str = "openlist";
const SETTINGS_FILE: &str = "settings.json";

/// Environment variable overriding the settings file location.
pub const SETTINGS_PATH_ENV: &str = "OPENLIST_SETTINGS_PATH";

/// Default settings file location.
pub fn settings_path() -> PathBuf {
    if let Some(path) = std::env::var_os(SETTINGS_PATH_ENV) {
        return PathBuf::from(path);
    }

    match home_dir() {
        Some(home) => home.join(".config").join(APP_DIR).join(SETTINGS_FILE),
        None => std::env::temp_dir().join(APP_DIR).join(SETTINGS_FILE),
    }
}

/// Data directory used when the user has not chosen one.
pub fn default_data_directory() -> PathBuf {
    match home_dir() {
        Some(home) => {
            home.join(".local").join("share").join(APP_DIR).join("data")
        },
        None => std::env::temp_dir().join(APP_DIR).join("data"),
    }
}

/// Private documents directory for sandboxed platforms.
pub fn documents_directory() -> PathBuf {
    match home_dir() {
        Some(home) => home.join("Documents"),
        None => std::env::temp_dir().join(APP_DIR),
    }
}

fn home_dir() -> Option<PathBuf> {
    let home = std::env::var_os("HOME")?;
    let home = Path::new(&home);
    if home.as_os_str().is_empty() {
        return None;
    }
    Some(home.to_path_buf())
}
