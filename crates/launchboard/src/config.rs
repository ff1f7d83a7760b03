//! Configuration management for launchboard.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "launchboard";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "LAUNCHBOARD_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `LAUNCHBOARD_`, sections separated
///    by `__`, e.g. `LAUNCHBOARD_SERVER__PORT`)
/// 2. TOML config file at `~/.config/launchboard/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Dataset configuration.
    pub dataset: DatasetConfig,
    /// Control layout configuration.
    pub controls: ControlsConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Local copy of `plotly.min.js` served at `/assets/plotly.min.js`.
    /// When unset the page is redirected to the public CDN build.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plotly_js: Option<PathBuf>,
}

/// Dataset configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// Path to the launch records CSV, relative to the working directory
    /// unless absolute.
    pub path: PathBuf,
}

/// Payload range slider configuration.
///
/// These set the slider's scale only. Its initial value is always the
/// dataset's observed payload range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Left end of the slider in kg.
    pub slider_min: f64,
    /// Right end of the slider in kg.
    pub slider_max: f64,
    /// Slider step in kg.
    pub slider_step: f64,
    /// Distance between labelled marks in kg.
    pub mark_step: f64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8050,
            plotly_js: None,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("spacex_launch_dash.csv"),
        }
    }
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            slider_min: 0.0,
            slider_max: 10_000.0,
            slider_step: 1000.0,
            mark_step: 2500.0,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A config file that does not exist is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::config_validation("server.host must not be empty"));
        }

        if self.server.port == 0 {
            return Err(Error::config_validation(
                "server.port must be greater than 0",
            ));
        }

        if self
            .server
            .plotly_js
            .as_ref()
            .is_some_and(|path| path.as_os_str().is_empty())
        {
            return Err(Error::config_validation(
                "server.plotly_js must not be empty when set",
            ));
        }

        if self.dataset.path.as_os_str().is_empty() {
            return Err(Error::config_validation("dataset.path must not be empty"));
        }

        let controls = &self.controls;
        let values = [
            ("slider_min", controls.slider_min),
            ("slider_max", controls.slider_max),
            ("slider_step", controls.slider_step),
            ("mark_step", controls.mark_step),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(Error::config_validation(format!(
                    "controls.{name} must be a finite number"
                )));
            }
        }

        if controls.slider_min >= controls.slider_max {
            return Err(Error::config_validation(format!(
                "controls.slider_min ({}) must be less than controls.slider_max ({})",
                controls.slider_min, controls.slider_max
            )));
        }

        if controls.slider_step <= 0.0 {
            return Err(Error::config_validation(
                "controls.slider_step must be greater than 0",
            ));
        }

        if controls.mark_step <= 0.0 {
            return Err(Error::config_validation(
                "controls.mark_step must be greater than 0",
            ));
        }

        Ok(())
    }

    /// The `host:port` address the server listens on.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
