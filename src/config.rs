use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::constants::*;
use crate::input::GestureConfig;
use crate::player::SessionConfig;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Seconds skipped by one seek step (arrow keys).
    #[serde(default = "default_seek_step")]
    pub seek_step_secs: f64,

    #[serde(default = "default_volume_step")]
    pub volume_step: f64,

    /// How long the controls stay up after the last activity, in milliseconds.
    #[serde(default = "default_hide_delay")]
    pub controls_hide_delay_ms: u64,

    #[serde(default = "default_flush_interval")]
    pub progress_flush_interval_ms: u64,

    /// Continuous buffering longer than this is reported as a stall.
    #[serde(default = "default_stall_timeout")]
    pub stall_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default = "default_double_click")]
    pub double_click_window_ms: u64,

    #[serde(default = "default_double_tap")]
    pub double_tap_window_ms: u64,

    #[serde(default = "default_quick_tap")]
    pub quick_tap_ms: u64,

    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_px: f64,

    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f64,

    #[serde(default = "default_long_press")]
    pub long_press_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    #[serde(default = "default_history_cap")]
    pub history_cap: usize,

    #[serde(default = "default_search_cap")]
    pub search_history_cap: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            debug!("Loading config from {:?}", config_path);
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            info!("Config loaded successfully");
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(&config_path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", config_path);
        Ok(())
    }

    /// Session timing knobs derived from this config.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            progress_flush_interval: Duration::from_millis(
                self.playback.progress_flush_interval_ms,
            ),
            controls_hide_delay: Duration::from_millis(self.playback.controls_hide_delay_ms),
            stall_timeout: Duration::from_millis(self.playback.stall_timeout_ms),
            double_click_window: Duration::from_millis(self.input.double_click_window_ms),
            double_tap_window: Duration::from_millis(self.input.double_tap_window_ms),
            quick_tap: Duration::from_millis(self.input.quick_tap_ms),
            drag_threshold_px: self.input.drag_threshold_px,
            seek_step_secs: self.playback.seek_step_secs,
            volume_step: self.playback.volume_step,
        }
    }

    /// Catalog-level gesture recognition knobs.
    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            swipe_threshold_px: self.input.swipe_threshold_px,
            long_press_delay: Duration::from_millis(self.input.long_press_delay_ms),
            double_tap_window: Duration::from_millis(self.input.double_tap_window_ms),
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to get config directory")?;
        Ok(config_dir.join("rookery").join("config.toml"))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            seek_step_secs: default_seek_step(),
            volume_step: default_volume_step(),
            controls_hide_delay_ms: default_hide_delay(),
            progress_flush_interval_ms: default_flush_interval(),
            stall_timeout_ms: default_stall_timeout(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            double_click_window_ms: default_double_click(),
            double_tap_window_ms: default_double_tap(),
            quick_tap_ms: default_quick_tap(),
            drag_threshold_px: default_drag_threshold(),
            swipe_threshold_px: default_swipe_threshold(),
            long_press_delay_ms: default_long_press(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            history_cap: default_history_cap(),
            search_history_cap: default_search_cap(),
        }
    }
}

// Default value functions
fn default_seek_step() -> f64 {
    DEFAULT_SEEK_STEP_SECS
}
fn default_volume_step() -> f64 {
    DEFAULT_VOLUME_STEP
}
fn default_hide_delay() -> u64 {
    DEFAULT_CONTROLS_HIDE_DELAY_MS
}
fn default_flush_interval() -> u64 {
    DEFAULT_PROGRESS_FLUSH_INTERVAL_MS
}
fn default_stall_timeout() -> u64 {
    DEFAULT_STALL_TIMEOUT_MS
}
fn default_double_click() -> u64 {
    DEFAULT_DOUBLE_CLICK_WINDOW_MS
}
fn default_double_tap() -> u64 {
    DEFAULT_DOUBLE_TAP_WINDOW_MS
}
fn default_quick_tap() -> u64 {
    DEFAULT_QUICK_TAP_MS
}
fn default_drag_threshold() -> f64 {
    DEFAULT_DRAG_THRESHOLD_PX
}
fn default_swipe_threshold() -> f64 {
    DEFAULT_SWIPE_THRESHOLD_PX
}
fn default_long_press() -> u64 {
    DEFAULT_LONG_PRESS_DELAY_MS
}
fn default_history_cap() -> usize {
    DEFAULT_HISTORY_CAP
}
fn default_search_cap() -> usize {
    DEFAULT_SEARCH_HISTORY_CAP
}
