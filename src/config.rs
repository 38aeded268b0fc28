use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use orbit_engine::{Engine, EngineConfig, EngineError, Renderer, RingConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub surface: EngineConfig,
    #[serde(default)]
    pub rings: Vec<RingConfig>,
}

impl Config {
    /// Builds an engine from this config. Rings that fail validation are
    /// logged and skipped so one bad entry doesn't hide the others.
    pub fn build_engine<R: Renderer>(&self, renderer: R) -> Result<Engine<R>, EngineError> {
        let surface = match self.surface.validate() {
            Ok(()) => self.surface,
            Err(e) => {
                log::error!("Invalid surface settings, using defaults: {}", e);
                EngineConfig::default()
            }
        };
        let mut engine = Engine::new(renderer, Vec::new(), surface)?;

        for ring in &self.rings {
            if let Err(e) = engine.append_ring(ring.clone()) {
                log::error!("Skipping ring: {}", e);
            }
        }

        engine.on_change(|id, value| log::info!("{} = {}", id, value));
        Ok(engine)
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

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "orbit", "orbit").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("ORBIT")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Built-in sliders used when no config file exists or it can't be read.
pub fn default_config() -> Config {
    config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()
        .and_then(|c| c.try_deserialize())
        .unwrap_or_else(|e| {
            log::error!("Built-in config is broken: {}", e);
            Config::default()
        })
}

pub fn load_or_default(path: &Path) -> Config {
    if !path.exists() {
        log::info!("No config at {}, using built-in sliders", path.display());
        return default_config();
    }

    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load {}: {}", path.display(), e);
            default_config()
        }
    }
}

/// Config to switch to after the file changed on disk. `None` keeps the
/// current sliders: the file is gone (mid rename-save or deleted) or broken.
pub fn reload_config(path: &Path) -> Option<Config> {
    if !path.exists() {
        log::info!("{} is gone, keeping current sliders", path.display());
        return None;
    }
    load_config(path)
        .inspect_err(|e| log::error!("Failed to reload config: {}", e))
        .ok()
}

pub fn write_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(())
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
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
