use arcmenu::{MenuConfig, MenuSettings};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid menu: {0}")]
    Menu(#[from] arcmenu::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "arcmenu", "arcmenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// The `--config` path if one was given, otherwise the per-user config file. Always
/// absolute, since the watcher compares it against the paths notify reports.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(std::path::absolute(path)?),
        None => get_config_path(),
    }
}

fn deserialize(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<MenuConfig, ConfigError> {
    let settings: MenuSettings = builder
        .add_source(config::Environment::with_prefix("ARCMENU").try_parsing(true))
        .build()?
        .try_deserialize()?;
    Ok(MenuConfig::try_from(settings)?)
}

pub fn load_settings_file(path: &Path) -> Result<MenuConfig, ConfigError> {
    deserialize(config::Config::builder().add_source(config::File::from(path.to_path_buf())))
}

pub fn builtin_menu() -> Result<MenuConfig, ConfigError> {
    deserialize(config::Config::builder().add_source(config::File::from_str(
        DEFAULT_CONFIG,
        config::FileFormat::Toml,
    )))
}

/// Loads the menu from `explicit` or the per-user file; without a file the built-in
/// demo menu is used.
pub fn load_menu(explicit: Option<&Path>) -> Result<MenuConfig, ConfigError> {
    let path = resolve_path(explicit)?;
    if path.exists() {
        load_settings_file(&path)
    } else {
        builtin_menu()
    }
}

pub fn load_or_default(explicit: Option<&Path>) -> MenuConfig {
    match load_menu(explicit) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load config, using the built-in menu: {}", e);
            builtin_menu().unwrap_or_default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

use crate::events::AppEvent;
use async_channel::Sender;

fn watch(
    config_dir: &Path,
    bridge_tx: async_channel::Sender<notify::Result<notify::Event>>,
) -> Result<RecommendedWatcher, ConfigError> {
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    )?;
    watcher.watch(config_dir, RecursiveMode::NonRecursive)?;
    Ok(watcher)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    // dropping the watcher stops the notifications
    let _watcher = match watch(&config_dir, bridge_tx) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to watch config directory: {}", e);
            return;
        }
    };

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
