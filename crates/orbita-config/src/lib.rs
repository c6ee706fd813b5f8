//! Configuration for the orbita galaxy animation.
//!
//! Settings live in `config.toml` under the platform config directory
//! (`~/.config/orbita/` on Linux). The file is optional and every field has
//! a default, so a partial file only overrides what it names:
//!
//! ```toml
//! [scene]
//! particles = 40
//! messages = ["hello", "world"]
//!
//! [display]
//! fps = 30
//! ```

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Labels carried by the orbiting particles when none are configured.
pub const DEFAULT_MESSAGES: &[&str] = &[
    "Te amo",
    "Eres mi luz",
    "Siempre juntos",
    "Mi corazón",
    "Eres mi todo",
    "Contigo siempre",
    "Amor eterno",
    "Mi vida",
    "Para siempre",
    "Mi sol",
    "Te adoro",
    "Eres especial",
    "Mi alegría",
    "Mi inspiración",
    "Eres mi mundo",
];

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "orbita.log";

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scene: SceneConfig,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

/// What goes into the galaxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Orbiting text particles.
    pub particles: usize,
    /// Twinkling background stars.
    pub stars: usize,
    /// Shooting stars.
    pub shooting_stars: usize,
    /// Galaxy arms the particles are spread across.
    pub arms: usize,
    /// Particle labels, assigned round-robin.
    pub messages: Vec<String>,
    /// Fixed random seed. A fresh seed is drawn each run when absent.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particles: 60,
            stars: 150,
            shooting_stars: 5,
            arms: 4,
            messages: DEFAULT_MESSAGES.iter().map(|m| m.to_string()).collect(),
            seed: None,
        }
    }
}

/// How frames reach the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub fps: u32,
    /// Scene units per terminal column. Larger values zoom the scene out.
    pub scale: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            scale: 2.0,
        }
    }
}

/// Log output. The terminal belongs to the animation, so logs go to a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. `info` or `orbita_scene=debug`.
    pub level: String,
    /// Log file path. Defaults to `orbita.log` in the platform data dir.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Configured log file, or the platform default.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(default_log_path)
    }
}

impl Config {
    /// Load from the platform config path, falling back to defaults when
    /// the file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => {
                debug!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check values the animation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scene.messages.is_empty() {
            return Err(ConfigError::Invalid(
                "scene.messages must contain at least one entry".into(),
            ));
        }
        if self.scene.arms == 0 {
            return Err(ConfigError::Invalid("scene.arms must be at least 1".into()));
        }
        if !(1..=240).contains(&self.display.fps) {
            return Err(ConfigError::Invalid(format!(
                "display.fps must be between 1 and 240, got {}",
                self.display.fps
            )));
        }
        if !(self.display.scale.is_finite() && self.display.scale > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "display.scale must be a positive number, got {}",
                self.display.scale
            )));
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "orbita")
}

/// Platform config file path.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Platform default log file path.
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}
