use crate::events::AppEvent;
use async_channel::Sender;
use clickwheel::collab::{Handle, Identity, IdentityId};
use clickwheel::geometry::{DEFAULT_DEAD_ZONE, DEFAULT_HUB_RATIO};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use std::path::PathBuf;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

pub const DEFAULT_SOCKET_PATH: &str = "/tmp/podwheel.sock";

/// What a detent feels like when the wheel moves one step.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum HapticMode {
    #[default]
    #[strum(serialize = "off", serialize = "none", serialize = "0")]
    Off,
    #[strum(serialize = "beep", serialize = "bell", serialize = "1")]
    Beep,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WheelConfig {
    /// Degrees the pointer must travel between samples to count as a step.
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f64,
    /// Centre button radius as a share of the wheel radius.
    #[serde(default = "default_hub_ratio")]
    pub hub_ratio: f64,
    #[serde(default)]
    pub haptics: HapticMode,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            dead_zone: DEFAULT_DEAD_ZONE,
            hub_ratio: DEFAULT_HUB_RATIO,
            haptics: HapticMode::default(),
        }
    }
}

fn default_dead_zone() -> f64 {
    DEFAULT_DEAD_ZONE
}

fn default_hub_ratio() -> f64 {
    DEFAULT_HUB_RATIO
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AccountConfig {
    pub handle: Option<Handle>,
    pub display_name: Option<String>,
    /// Start signed in when a handle is configured.
    #[serde(default = "default_true")]
    pub remember: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            handle: None,
            display_name: None,
            remember: true,
        }
    }
}

impl AccountConfig {
    /// The local account this handle stands for, if any.
    pub fn identity(&self) -> Option<Identity> {
        let handle = self.handle.clone().filter(|h| !h.trim().is_empty())?;
        Some(Identity {
            id: IdentityId::new(handle.as_str()),
            display_name: self
                .display_name
                .clone()
                .unwrap_or_else(|| handle.to_string()),
            handle,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub wheel: WheelConfig,
    #[serde(default)]
    pub account: AccountConfig,
    /// Profile and playlist data. Defaults to the platform data directory.
    pub data_file: Option<PathBuf>,
    #[serde(default = "default_socket_path")]
    pub socket_path: PathBuf,
    #[serde(default = "default_web_base_url")]
    pub web_base_url: String,
    #[serde(default = "default_oembed_endpoint")]
    pub oembed_endpoint: String,
    /// Command that receives the share payload on stdin, e.g. `wl-copy`.
    pub share_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wheel: WheelConfig::default(),
            account: AccountConfig::default(),
            data_file: None,
            socket_path: default_socket_path(),
            web_base_url: default_web_base_url(),
            oembed_endpoint: default_oembed_endpoint(),
            share_command: None,
        }
    }
}

fn default_socket_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOCKET_PATH)
}

fn default_web_base_url() -> String {
    "https://myfive.app".to_string()
}

fn default_oembed_endpoint() -> String {
    "https://open.spotify.com/oembed".to_string()
}

impl Config {
    pub fn data_file(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("profiles.json")),
        }
    }

    pub fn profile_url(&self, handle: &Handle) -> String {
        format!("{}/u/{}", self.web_base_url.trim_end_matches('/'), handle)
    }

    pub fn submit_url(&self) -> String {
        format!("{}/daily-drop", self.web_base_url.trim_end_matches('/'))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("app", "myfive", "podwheel").ok_or(ConfigError::ConfigDirNotFound)
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().join("config.toml"))
}

fn build(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Config, ConfigError> {
    let s = builder
        .add_source(
            config::Environment::with_prefix("PODWHEEL")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;
    Ok(s.try_deserialize()?)
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;
    build(config::Config::builder().add_source(config::File::from(config_path).required(false)))
}

/// Loads the user's config, falling back to defaults when it is missing or
/// broken.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default config: {}", e);
            Config::default()
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

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let config_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Config watcher error: {}", e);
            return;
        }
    };
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

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
