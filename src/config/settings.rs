// SPDX-License-Identifier: MPL-2.0
//! Resolved viewer settings.
//!
//! `settings.toml` stores every value as an `Option` so that missing keys fall
//! back to [`defaults`](super::defaults). The structs here are the resolved,
//! always-valid form handed to the gesture recognizer and viewer subcomponents.

use super::defaults::*;
use crate::domain::viewer::ZoomBounds;
use std::time::Duration;

/// Thresholds for the gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub tap_movement_threshold: f32,
    pub tap_max_duration: Duration,
    pub long_press_delay: Duration,
    pub double_tap_delay: Duration,
    pub double_tap_distance: f32,
    pub swipe_min_distance: f32,
    pub swipe_max_duration: Duration,
    /// Pixels per millisecond.
    pub swipe_min_velocity: f32,
    pub swipe_direction_ratio: f32,
    pub pinch_stability_threshold: f32,
    pub pan_mode_timeout: Duration,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            tap_movement_threshold: TAP_MOVEMENT_THRESHOLD_PX,
            tap_max_duration: Duration::from_millis(TAP_MAX_DURATION_MS),
            long_press_delay: Duration::from_millis(LONG_PRESS_DELAY_MS),
            double_tap_delay: Duration::from_millis(DOUBLE_TAP_DELAY_MS),
            double_tap_distance: DOUBLE_TAP_DISTANCE_PX,
            swipe_min_distance: SWIPE_MIN_DISTANCE_PX,
            swipe_max_duration: Duration::from_millis(SWIPE_MAX_DURATION_MS),
            swipe_min_velocity: SWIPE_MIN_VELOCITY,
            swipe_direction_ratio: SWIPE_DIRECTION_RATIO,
            pinch_stability_threshold: PINCH_STABILITY_THRESHOLD_PX,
            pan_mode_timeout: Duration::from_millis(PAN_MODE_TIMEOUT_MS),
        }
    }
}

/// Zoom, debounce and pan-mode settings for the navigation controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    pub zoom_bounds: ZoomBounds,
    pub default_zoom: f32,
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub action_debounce: Duration,
    pub pan_mode_timeout: Duration,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            zoom_bounds: ZoomBounds::new(MIN_ZOOM, MAX_ZOOM),
            default_zoom: DEFAULT_ZOOM,
            zoom_in_factor: ZOOM_IN_FACTOR,
            zoom_out_factor: ZOOM_OUT_FACTOR,
            action_debounce: Duration::from_millis(ACTION_DEBOUNCE_MS),
            pan_mode_timeout: Duration::from_millis(PAN_MODE_TIMEOUT_MS),
        }
    }
}

/// Search input timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    pub settle: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(SEARCH_DEBOUNCE_MS),
            settle: Duration::from_millis(FIND_SETTLE_MS),
        }
    }
}

/// Auto-hide durations for transient feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedbackSettings {
    pub notification: Duration,
    pub gesture_glyph: Duration,
    pub page_overlay: Duration,
    pub edge_flash: Duration,
    pub two_finger_indicator: Duration,
    pub tutorial: Duration,
    pub tutorial_delay: Duration,
}

impl Default for FeedbackSettings {
    fn default() -> Self {
        Self {
            notification: Duration::from_millis(NOTIFICATION_DURATION_MS),
            gesture_glyph: Duration::from_millis(GESTURE_GLYPH_DURATION_MS),
            page_overlay: Duration::from_millis(PAGE_OVERLAY_DURATION_MS),
            edge_flash: Duration::from_millis(EDGE_FLASH_DURATION_MS),
            two_finger_indicator: Duration::from_millis(TWO_FINGER_INDICATOR_DURATION_MS),
            tutorial: Duration::from_millis(TUTORIAL_DURATION_MS),
            tutorial_delay: Duration::from_millis(TUTORIAL_DELAY_MS),
        }
    }
}

/// Everything a [`Viewer`](crate::ui::viewer::Viewer) needs to run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewerSettings {
    pub gestures: GestureSettings,
    pub navigation: NavigationSettings,
    pub search: SearchSettings,
    pub feedback: FeedbackSettings,
}
