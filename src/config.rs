use crate::consts;
use crate::engine::{Effect, Tuning};
use crate::store::{LoadError, Store};
use enum_map::enum_map;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Timing parameters for the game engine
    #[serde(default)]
    pub(crate) engine: EngineConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(consts::APP_DIR).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which persistent data should be stored: the
    /// file given in the configuration or, if that is not set, the default
    /// store file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn store_file(&self) -> Option<PathBuf> {
        self.files.store_file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join(consts::APP_DIR).join("store.json"))
        })
    }

    /// Open the persistent data store.
    ///
    /// If `self.files.save_progress` is `false`, or no store path can be
    /// determined, an in-memory store is returned.
    pub(crate) fn open_store(&self) -> Result<Store, LoadError> {
        if !self.files.save_progress {
            return Ok(Store::in_memory());
        }
        match self.store_file() {
            Some(path) => Store::open(path),
            None => {
                log::warn!("Could not determine local data directory; progress will not be saved");
                Ok(Store::in_memory())
            }
        }
    }
}

/// The `[engine]` table.  All times are given in milliseconds.
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct EngineConfig {
    base_tick_ms: u64,
    speed_boost_tick_ms: u64,
    level_tick_step_ms: u64,
    min_tick_ms: u64,
    combo_timeout_ms: u64,
    obstacle_interval_ms: u64,
    obstacle_min_level: u32,
    speed_boost_ms: u64,
    ghost_mode_ms: u64,
    double_points_ms: u64,
    invincible_ms: u64,
}

impl EngineConfig {
    pub(crate) fn to_tuning(self) -> Tuning {
        Tuning {
            base_tick: Duration::from_millis(self.base_tick_ms),
            level_tick_step: Duration::from_millis(self.level_tick_step_ms),
            min_tick: Duration::from_millis(self.min_tick_ms),
            speed_boost_tick: Duration::from_millis(self.speed_boost_tick_ms),
            combo_timeout: Duration::from_millis(self.combo_timeout_ms),
            obstacle_interval: Duration::from_millis(self.obstacle_interval_ms),
            obstacle_min_level: self.obstacle_min_level,
            durations: enum_map! {
                Effect::SpeedBoost => Duration::from_millis(self.speed_boost_ms),
                Effect::GhostMode => Duration::from_millis(self.ghost_mode_ms),
                Effect::DoublePoints => Duration::from_millis(self.double_points_ms),
                Effect::Invincible => Duration::from_millis(self.invincible_ms),
            },
        }
    }
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            base_tick_ms: millis(consts::BASE_TICK),
            speed_boost_tick_ms: millis(consts::SPEED_BOOST_TICK),
            level_tick_step_ms: millis(consts::LEVEL_TICK_STEP),
            min_tick_ms: millis(consts::MIN_TICK),
            combo_timeout_ms: millis(consts::COMBO_TIMEOUT),
            obstacle_interval_ms: millis(consts::OBSTACLE_INTERVAL),
            obstacle_min_level: consts::OBSTACLE_MIN_LEVEL,
            speed_boost_ms: millis(consts::SPEED_BOOST_DURATION),
            ghost_mode_ms: millis(consts::GHOST_MODE_DURATION),
            double_points_ms: millis(consts::DOUBLE_POINTS_DURATION),
            invincible_ms: millis(consts::INVINCIBLE_DURATION),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// The `[files]` table
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which high scores, challenges, and skins should be stored
    store_file: Option<PathBuf>,

    /// Whether to load & save progress in a file
    save_progress: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            store_file: None,
            save_progress: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    store_file: Option<String>,
    save_progress: bool,
}

impl Default for RawFileConfig {
    fn default() -> RawFileConfig {
        RawFileConfig {
            store_file: None,
            save_progress: true,
        }
    }
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = std::io::Error;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, std::io::Error> {
        Ok(FileConfig {
            store_file: value.store_file.map(expanduser::expanduser).transpose()?,
            save_progress: value.save_progress,
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[source] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
