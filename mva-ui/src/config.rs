//! Calculator settings.
//!
//! Settings come from an optional TOML file; every field has a default, so
//! an empty file (or no file) gives the stock calculator. Command-line flags
//! are applied on top by `main`.
//!
//! ```toml
//! default_price = 750000
//! default_year = 2027
//! animation_ms = 500
//! frame_ms = 16
//! log_level = "info"
//! log_file = "mva-calc.log"
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Duration,
};

use mva_core::{FiscalYear, ViewModelOptions, view_model::SliderConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base price shown at start-up.
    pub default_price: Decimal,
    /// Year selected at start-up.
    pub default_year: FiscalYear,
    /// Length of a counter animation; 0 disables animation.
    pub animation_ms: u64,
    /// Interval between animation frames.
    pub frame_ms: u64,
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
    /// Optional log file, appended to.
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_price: Decimal::from(500_000),
            default_year: FiscalYear::Y2026,
            animation_ms: 500,
            frame_ms: 16,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn animation(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    /// Frame interval, never shorter than 1 ms.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_ms.max(1))
    }

    pub fn view_model_options(&self) -> ViewModelOptions {
        ViewModelOptions {
            initial_price: self.default_price,
            initial_year: self.default_year,
            animation: self.animation(),
            slider: SliderConfig::default(),
        }
    }
}
