//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. Built-in defaults
//! 2. `config/default.toml` (version controlled)
//! 3. `config/user.toml` (gitignored, user overrides)
//! 4. Environment variables (`PARTICLE_LIFE_SECTION__KEY`)

use std::path::Path;
use std::time::Duration;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use particle_physics::{MAX_GROUPS, PARTICLES_PER_GROUP};
use particle_simulation::{EngineKind, SimulationParams, DEFAULT_GROUP_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use winit::dpi::LogicalSize;
use winit::window::{Window, WindowAttributes};

pub const ENV_PREFIX: &str = "PARTICLE_LIFE_";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Initial values of the tunable parameters
    #[serde(default)]
    pub params: SimulationParams,
}

impl AppConfig {
    /// Load configuration from the `config` directory and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            log::info!("Applying user config from {}", user_path.display());
            figment = figment.merge(Toml::file(&user_path));
        }

        // PARTICLE_LIFE_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: AppConfig = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if !(1..=MAX_GROUPS).contains(&self.simulation.groups) {
            return Err(ConfigError::Invalid(format!(
                "simulation.groups must be between 1 and {}, got {}",
                MAX_GROUPS, self.simulation.groups
            )));
        }
        Ok(())
    }
}

/// Window configuration handed to the launcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    /// Windowed-mode width in logical pixels
    pub width: u32,
    /// Windowed-mode height in logical pixels
    pub height: u32,
    /// Frame-rate cap while focused, 0 for uncapped
    pub foreground_fps: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "particle-life".to_string(),
            width: 1000,
            height: 1000,
            foreground_fps: 60,
            vsync: false,
        }
    }
}

impl WindowConfig {
    pub fn window_attributes(&self) -> WindowAttributes {
        Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width as f64, self.height as f64))
    }

    /// Minimum time between frames, `None` when uncapped.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.foreground_fps > 0)
            .then(|| Duration::from_secs_f64(1.0 / self.foreground_fps as f64))
    }
}

/// Scenario and engine selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub engine: EngineKind,
    pub groups: usize,
    pub particles_per_group: usize,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            groups: DEFAULT_GROUP_COUNT,
            particles_per_group: PARTICLES_PER_GROUP,
            seed: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Load(Box::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::Size;

    #[test]
    fn test_default_launch_settings() {
        let config = AppConfig::default();
        assert_eq!(config.window.foreground_fps, 60);
        assert_eq!(config.window.title, "particle-life");
        assert_eq!((config.window.width, config.window.height), (1000, 1000));
    }

    #[test]
    fn test_window_attributes() {
        let attributes = WindowConfig::default().window_attributes();
        assert_eq!(attributes.title, "particle-life");
        assert_eq!(
            attributes.inner_size,
            Some(Size::Logical(LogicalSize::new(1000.0, 1000.0)))
        );
        assert!(attributes.fullscreen.is_none());
    }

    #[test]
    fn test_frame_interval() {
        let window = WindowConfig::default();
        assert_eq!(
            window.frame_interval(),
            Some(Duration::from_secs_f64(1.0 / 60.0))
        );

        let uncapped = WindowConfig {
            foreground_fps: 0,
            ..Default::default()
        };
        assert_eq!(uncapped.frame_interval(), None);
    }

    #[test]
    fn test_default_simulation() {
        let config = AppConfig::default();
        assert_eq!(config.simulation.engine, EngineKind::ChunkedCached);
        assert_eq!(config.simulation.groups, 4);
        assert_eq!(config.simulation.particles_per_group, 500);
        assert_eq!(config.params, SimulationParams::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.window.width = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = AppConfig::default();
        config.simulation.groups = MAX_GROUPS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("title"));
        assert!(toml.contains("chunked-cached"));
        assert!(toml.contains("friction_half_time"));
    }

    #[test]
    fn test_missing_directory_gives_defaults() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.window, WindowConfig::default());
    }
}
