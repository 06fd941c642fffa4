// SPDX-License-Identifier: MPL-2.0
//! This module handles the viewer's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[gestures]` - Tap, long-press, swipe and pinch thresholds
//! - `[navigation]` - Zoom bounds and factors, action debounce, pan-mode timeout
//! - `[search]` - Search input debounce and settle delay
//! - `[feedback]` - Auto-hide durations of transient UI signals
//!
//! Every value is optional. Missing or out-of-range values fall back to the
//! constants in [`defaults`].
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `GESTURE_READER_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use gesture_reader::config;
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//!
//! let settings = config.viewer_settings();
//! assert!(settings.navigation.zoom_bounds.max() > 1.0);
//! ```

pub mod defaults;
mod settings;

pub use defaults::*;
pub use settings::{
    FeedbackSettings, GestureSettings, NavigationSettings, SearchSettings, ViewerSettings,
};

use crate::app::paths;
use crate::domain::viewer::ZoomBounds;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Gesture recognition thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GesturesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_movement_threshold_px: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tap_max_duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_press_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_tap_distance_px: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_min_distance_px: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_max_duration_ms: Option<u64>,
    /// Minimum swipe velocity in pixels per millisecond.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_min_velocity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_direction_ratio: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinch_stability_threshold_px: Option<f32>,
}

/// Zoom, debounce and pan-mode settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NavigationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_zoom: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_in_factor: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_out_factor: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_debounce_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pan_mode_timeout_ms: Option<u64>,
}

/// Search timing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settle_ms: Option<u64>,
}

/// Transient feedback durations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FeedbackConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture_glyph_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_overlay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_flash_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_finger_indicator_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tutorial_delay_ms: Option<u64>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Viewer configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub gestures: GesturesConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub feedback: FeedbackConfig,
}

impl Config {
    /// Resolves every optional value into validated viewer settings.
    #[must_use]
    pub fn viewer_settings(&self) -> ViewerSettings {
        let g = &self.gestures;
        let n = &self.navigation;
        let s = &self.search;
        let f = &self.feedback;

        let pan_mode_timeout = millis(n.pan_mode_timeout_ms, PAN_MODE_TIMEOUT_MS);

        let gestures = GestureSettings {
            tap_movement_threshold: positive(g.tap_movement_threshold_px, TAP_MOVEMENT_THRESHOLD_PX),
            tap_max_duration: millis(g.tap_max_duration_ms, TAP_MAX_DURATION_MS),
            long_press_delay: millis(g.long_press_delay_ms, LONG_PRESS_DELAY_MS),
            double_tap_delay: millis(g.double_tap_delay_ms, DOUBLE_TAP_DELAY_MS),
            double_tap_distance: positive(g.double_tap_distance_px, DOUBLE_TAP_DISTANCE_PX),
            swipe_min_distance: positive(g.swipe_min_distance_px, SWIPE_MIN_DISTANCE_PX),
            swipe_max_duration: millis(g.swipe_max_duration_ms, SWIPE_MAX_DURATION_MS),
            swipe_min_velocity: positive(g.swipe_min_velocity, SWIPE_MIN_VELOCITY),
            swipe_direction_ratio: g
                .swipe_direction_ratio
                .filter(|ratio| ratio.is_finite() && *ratio >= 1.0)
                .unwrap_or(SWIPE_DIRECTION_RATIO),
            pinch_stability_threshold: positive(
                g.pinch_stability_threshold_px,
                PINCH_STABILITY_THRESHOLD_PX,
            ),
            pan_mode_timeout,
        };

        let zoom_bounds = ZoomBounds::new(
            n.min_zoom.unwrap_or(MIN_ZOOM),
            n.max_zoom.unwrap_or(MAX_ZOOM),
        );
        let navigation = NavigationSettings {
            zoom_bounds,
            default_zoom: zoom_bounds
                .clamp(n.default_zoom.unwrap_or(DEFAULT_ZOOM))
                .value(),
            zoom_in_factor: n
                .zoom_in_factor
                .filter(|factor| factor.is_finite() && *factor > 1.0)
                .unwrap_or(ZOOM_IN_FACTOR),
            zoom_out_factor: n
                .zoom_out_factor
                .filter(|factor| factor.is_finite() && *factor > 0.0 && *factor < 1.0)
                .unwrap_or(ZOOM_OUT_FACTOR),
            action_debounce: millis(n.action_debounce_ms, ACTION_DEBOUNCE_MS),
            pan_mode_timeout,
        };

        let search = SearchSettings {
            debounce: millis(s.debounce_ms, SEARCH_DEBOUNCE_MS),
            settle: millis(s.settle_ms, FIND_SETTLE_MS),
        };

        let feedback = FeedbackSettings {
            notification: millis(f.notification_ms, NOTIFICATION_DURATION_MS),
            gesture_glyph: millis(f.gesture_glyph_ms, GESTURE_GLYPH_DURATION_MS),
            page_overlay: millis(f.page_overlay_ms, PAGE_OVERLAY_DURATION_MS),
            edge_flash: millis(f.edge_flash_ms, EDGE_FLASH_DURATION_MS),
            two_finger_indicator: millis(
                f.two_finger_indicator_ms,
                TWO_FINGER_INDICATOR_DURATION_MS,
            ),
            tutorial: millis(f.tutorial_ms, TUTORIAL_DURATION_MS),
            tutorial_delay: millis(f.tutorial_delay_ms, TUTORIAL_DELAY_MS),
        };

        ViewerSettings {
            gestures,
            navigation,
            search,
            feedback,
        }
    }
}

fn millis(value: Option<u64>, default: u64) -> Duration {
    Duration::from_millis(value.unwrap_or(default))
}

fn positive(value: Option<f32>, default: f32) -> f32 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with an i18n key describing what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("ignoring unreadable config {}: {err}", path.display());
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
