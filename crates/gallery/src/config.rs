//! Runtime configuration for `gallery`.
//!
//! [`Config`] is the single source of truth for runtime settings. It starts
//! from defaults, optionally layers a JSON file on top, and finally applies
//! command-line overrides.
//!
//! ```json
//! {
//!   "seed": 7,
//!   "week_start": "Mon",
//!   "heatmap": { "columns": 8, "rows": 7 },
//!   "slider": { "lower": 0.2, "upper": 0.8, "min": 0.0, "max": 1.0, "step": 0.01 }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate, Weekday};
use gallery_core::dual_slider::{DualSlider, RangeState, SliderError, SliderGeometry};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seed for deterministic demo data; random when absent.
    pub seed: Option<u64>,

    /// Date treated as today; the local date when absent.
    pub today: Option<NaiveDate>,

    /// First day of the week for the heat map.
    pub week_start: Weekday,

    /// Color output mode.
    pub color_mode: ColorMode,

    /// Whether to use alternate screen mode.
    pub alt_screen: bool,

    /// Heat-map grid dimensions.
    pub heatmap: HeatmapConfig,

    /// Initial slider state and track layout.
    pub slider: SliderConfig,

    /// Timing-curve animation duration in seconds.
    pub curve_duration: f64,

    /// Interval between simulation ticks in milliseconds.
    pub tick_ms: u64,

    /// Log verbosity level (0=warn, 1=info, 2=debug, 3+=trace).
    pub verbosity: u8,

    /// Log file path; logs are not written to the terminal while interactive.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            today: None,
            week_start: Weekday::Sun,
            color_mode: ColorMode::Auto,
            alt_screen: true,
            heatmap: HeatmapConfig::default(),
            slider: SliderConfig::default(),
            curve_duration: gallery_core::unit_curve::DEFAULT_DURATION,
            tick_ms: 100,
            verbosity: 0,
            log_file: None,
        }
    }
}

/// Heat-map grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Number of week columns.
    pub columns: usize,
    /// Number of day rows.
    pub rows: usize,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            columns: 7,
            rows: 7,
        }
    }
}

/// Initial slider state and track layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Initial lower value.
    pub lower: f64,
    /// Initial upper value.
    pub upper: f64,
    /// Range minimum.
    pub min: f64,
    /// Range maximum.
    pub max: f64,
    /// Step size.
    pub step: f64,
    /// Track width.
    pub track_width: f64,
    /// Handle width.
    pub handle_width: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        let geometry = SliderGeometry::default();
        Self {
            lower: 0.2,
            upper: 0.8,
            min: 0.0,
            max: 1.0,
            step: 0.01,
            track_width: geometry.track_width,
            handle_width: geometry.handle_width,
        }
    }
}

impl SliderConfig {
    /// Builds the slider described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns the slider's validation error.
    pub fn build(&self) -> Result<DualSlider, SliderError> {
        let state = RangeState::new(self.lower, self.upper, self.min..=self.max, self.step)?;
        let geometry = SliderGeometry::new(self.track_width, self.handle_width)?;
        DualSlider::new(state, geometry)
    }
}

impl Config {
    /// Create a new config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a config from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, unreadable or malformed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|err| ConfigError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }

    /// Create config from CLI arguments, layered over the config file if one
    /// was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match cli.config.as_deref() {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if cli.seed.is_some() {
            config.seed = cli.seed;
        }
        if cli.today.is_some() {
            config.today = cli.today;
        }
        if let Some(week_start) = cli.week_start {
            config.week_start = week_start;
        }
        if cli.force_color {
            config.color_mode = ColorMode::Always;
        } else if cli.no_color {
            config.color_mode = ColorMode::Never;
        }
        if cli.no_alt_screen {
            config.alt_screen = false;
        }
        if cli.log_file.is_some() {
            config.log_file.clone_from(&cli.log_file);
        }
        config.verbosity = config.verbosity.max(cli.verbose);

        Ok(config)
    }

    /// Get the effective seed value.
    ///
    /// If no seed was specified, generates one from the current time.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "Seed truncation is acceptable"
    )]
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            use std::time::{SystemTime, UNIX_EPOCH};
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(42, |d| d.as_nanos() as u64)
        })
    }

    /// Get the effective "today".
    #[must_use]
    pub fn effective_today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Check if colors should be used.
    #[must_use]
    pub fn use_color(&self) -> bool {
        match self.color_mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::env::var_os("NO_COLOR").is_none(),
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heatmap.columns == 0 || self.heatmap.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.heatmap.columns,
                rows: self.heatmap.rows,
            });
        }
        if self.heatmap.columns.checked_mul(self.heatmap.rows).is_none() {
            return Err(ConfigError::GridTooLarge {
                columns: self.heatmap.columns,
                rows: self.heatmap.rows,
            });
        }
        self.slider.build()?;
        if !(self.curve_duration.is_finite() && self.curve_duration > 0.0) {
            return Err(ConfigError::InvalidDuration(self.curve_duration));
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::InvalidTick);
        }
        Ok(())
    }

    /// Export configuration as a diagnostic string.
    #[must_use]
    pub fn to_diagnostic_string(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Seed: {:?}", self.seed));
        lines.push(format!("Today: {}", self.effective_today()));
        lines.push(format!("Week start: {}", self.week_start));
        lines.push(format!("Color mode: {:?}", self.color_mode));
        lines.push(format!(
            "Alt screen: {}",
            if self.alt_screen { "on" } else { "off" }
        ));
        lines.push(format!(
            "Heat map: {}x{}",
            self.heatmap.columns, self.heatmap.rows
        ));
        lines.push(format!(
            "Slider: {}..={} step {} (start {}..{})",
            self.slider.min, self.slider.max, self.slider.step, self.slider.lower, self.slider.upper
        ));
        lines.push(format!(
            "Slider track: {} / handle {}",
            self.slider.track_width, self.slider.handle_width
        ));
        lines.push(format!("Curve duration: {}s", self.curve_duration));
        lines.push(format!("Tick: {}ms", self.tick_ms));
        lines.push(format!("Verbosity: {}", self.verbosity));
        if let Some(ref path) = self.log_file {
            lines.push(format!("Log file: {}", path.display()));
        }

        lines.join("\n")
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Automatically detect based on environment.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    /// Config file could not be read.
    #[error("Failed to read config file {path}: {message}")]
    Read {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// Config file is not valid JSON for [`Config`].
    #[error("Invalid config file {path}: {message}")]
    Parse {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// Heat-map grid has no cells.
    #[error("Heat map grid {columns}x{rows} is not usable")]
    EmptyGrid {
        /// Columns.
        columns: usize,
        /// Rows.
        rows: usize,
    },

    /// Heat-map cell count overflows.
    #[error("Heat map grid of {columns}x{rows} cells is too large")]
    GridTooLarge {
        /// Columns.
        columns: usize,
        /// Rows.
        rows: usize,
    },

    /// Slider settings are invalid.
    #[error("Invalid slider settings: {0}")]
    Slider(#[from] SliderError),

    /// Curve duration is not a positive number.
    #[error("Curve duration must be positive, got {0}")]
    InvalidDuration(f64),

    /// Tick interval is zero.
    #[error("Tick interval must be at least 1ms")]
    InvalidTick,
}
