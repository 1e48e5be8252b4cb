use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;

use openlist_settings::host::{HostPermissions, HostPlatform, PresetPicker};
use openlist_settings::{
    BoolSetting, Collaborators, DataDirectoryLabel, DirectorySelection,
    JsonFileStore, SettingsController, paths,
};

#[derive(Debug, Parser)]
#[command(
    name = "openlist-settings",
    about = "Inspect and edit OpenList settings"
)]
struct Cli {
    /// Settings file to use.
    #[arg(long, env = paths::SETTINGS_PATH_ENV)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the current settings snapshot as JSON.
    Show,
    /// Change a boolean setting.
    Set {
        setting: BoolSetting,
        #[arg(action = clap::ArgAction::Set)]
        value: bool,
    },
    /// Change the data directory.
    Dir {
        /// Directory to use.
        path: Option<String>,
        /// Go back to the default directory.
        #[arg(long, conflicts_with = "path")]
        default: bool,
    },
    /// List permissions that still need a grant.
    Permissions,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    let store_path = cli.store.unwrap_or_else(paths::settings_path);
    let store = JsonFileStore::new(store_path, paths::default_data_directory());
    let platform = HostPlatform::detect();

    let picked = match &cli.command {
        Command::Dir { path, .. } => path.clone(),
        _ => None,
    };

    let controller = SettingsController::new(Collaborators {
        config: store,
        permissions: HostPermissions,
        platform: platform.clone(),
        picker: PresetPicker::new(picked),
        defaults: platform,
    })?;
    controller.on_init().join().await;

    match cli.command {
        Command::Show => {}
        Command::Set { setting, value } => {
            controller.set_bool(setting, value).join().await;
        },
        Command::Dir { default: true, .. } => {
            controller.confirm_default_directory().await;
        },
        Command::Dir { .. } => match controller.choose_data_directory().await {
            DirectorySelection::NoSelection => {
                anyhow::bail!("no directory given; pass a path or --default");
            },
            selection => {
                if let Some(notice) = selection.notice() {
                    log::info!("data directory notice: {notice:?}");
                }
            },
        },
        Command::Permissions => {
            let snapshot = controller.snapshot();
            if !snapshot.needs_permission_attention() {
                println!("all permissions granted");
            }
            for kind in snapshot.missing_permissions() {
                println!("missing: {kind}");
            }
            return Ok(());
        },
    }

    let snapshot = controller.snapshot();
    if let DataDirectoryLabel::Default = snapshot.data_directory_label() {
        log::info!("using the default data directory");
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
