// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the viewer. Constants are organized by category.
//!
//! # Categories
//!
//! - **Gestures**: Tap, long-press, swipe and pinch thresholds
//! - **Navigation**: Zoom bounds and factors, action debounce, pan-mode timeout
//! - **Search**: Input debounce and match-navigation settle delay
//! - **Feedback**: Auto-hide durations for transient UI signals

// ==========================================================================
// Gesture Defaults
// ==========================================================================

/// Movement (px) below which a contact still counts as stationary.
pub const TAP_MOVEMENT_THRESHOLD_PX: f32 = 25.0;

/// Longest press (ms) that still evaluates as a tap.
pub const TAP_MAX_DURATION_MS: u64 = 500;

/// Hold time (ms) before a stationary press becomes a long press.
pub const LONG_PRESS_DELAY_MS: u64 = 800;

/// Maximum time (ms) between two taps forming a double tap.
pub const DOUBLE_TAP_DELAY_MS: u64 = 800;

/// Maximum distance (px) between two taps forming a double tap.
pub const DOUBLE_TAP_DISTANCE_PX: f32 = 125.0;

/// Minimum travel (px) for a swipe.
pub const SWIPE_MIN_DISTANCE_PX: f32 = 40.0;

/// Maximum duration (ms) of a swipe.
pub const SWIPE_MAX_DURATION_MS: u64 = 2_000;

/// Minimum average velocity (px/ms) of a swipe.
pub const SWIPE_MIN_VELOCITY: f32 = 0.005;

/// How much the dominant axis must exceed the other for a swipe to count.
pub const SWIPE_DIRECTION_RATIO: f32 = 1.6;

/// Distance change (px) under which two contacts are panning, not pinching.
pub const PINCH_STABILITY_THRESHOLD_PX: f32 = 30.0;

/// Concurrent contacts tracked at once. Extra contacts are ignored.
pub const MAX_CONTACTS: usize = 10;

// ==========================================================================
// Navigation Defaults
// ==========================================================================

/// Zoom factor of a freshly opened viewer (1.0 = 100%).
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum zoom factor.
pub const MIN_ZOOM: f32 = 0.5;

/// Maximum zoom factor.
pub const MAX_ZOOM: f32 = 3.5;

/// Multiplier applied by one zoom-in step.
pub const ZOOM_IN_FACTOR: f32 = 1.15;

/// Multiplier applied by one zoom-out step.
pub const ZOOM_OUT_FACTOR: f32 = 0.87;

/// Minimum spacing (ms) between two navigation actions.
pub const ACTION_DEBOUNCE_MS: u64 = 250;

/// Inactivity (ms) after which pan mode exits on its own.
pub const PAN_MODE_TIMEOUT_MS: u64 = 4_000;

// ==========================================================================
// Search Defaults
// ==========================================================================

/// Typing pause (ms) before an automatic search fires.
pub const SEARCH_DEBOUNCE_MS: u64 = 1_500;

/// Delay (ms) after next/previous match before the match counter is shown.
pub const FIND_SETTLE_MS: u64 = 100;

// ==========================================================================
// Feedback Defaults
// ==========================================================================

/// Notification text auto-hide (ms).
pub const NOTIFICATION_DURATION_MS: u64 = 2_000;

/// Gesture glyph auto-hide (ms).
pub const GESTURE_GLYPH_DURATION_MS: u64 = 600;

/// Large page-number overlay auto-hide (ms).
pub const PAGE_OVERLAY_DURATION_MS: u64 = 800;

/// Edge flash auto-hide (ms).
pub const EDGE_FLASH_DURATION_MS: u64 = 200;

/// Two-finger indicator safety auto-hide (ms), refreshed on every move.
pub const TWO_FINGER_INDICATOR_DURATION_MS: u64 = 1_000;

/// Tutorial display time (ms).
pub const TUTORIAL_DURATION_MS: u64 = 4_000;

/// Delay (ms) between a document load and the tutorial reveal.
pub const TUTORIAL_DELAY_MS: u64 = 500;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    // Gesture validation
    assert!(TAP_MOVEMENT_THRESHOLD_PX > 0.0);
    assert!(SWIPE_MIN_DISTANCE_PX > TAP_MOVEMENT_THRESHOLD_PX);
    assert!(TAP_MAX_DURATION_MS < LONG_PRESS_DELAY_MS);
    assert!(SWIPE_DIRECTION_RATIO >= 1.0);
    assert!(MAX_CONTACTS >= 2);

    // Zoom validation
    assert!(MIN_ZOOM > 0.0);
    assert!(MIN_ZOOM < DEFAULT_ZOOM);
    assert!(MAX_ZOOM > DEFAULT_ZOOM);
    assert!(ZOOM_IN_FACTOR > 1.0);
    assert!(ZOOM_OUT_FACTOR < 1.0);
    assert!(ZOOM_OUT_FACTOR > 0.0);

    // Feedback validation
    assert!(EDGE_FLASH_DURATION_MS < NOTIFICATION_DURATION_MS);
    assert!(TUTORIAL_DELAY_MS < TUTORIAL_DURATION_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_defaults_are_valid() {
        assert_eq!(DEFAULT_ZOOM, 1.0);
        assert!(MIN_ZOOM < DEFAULT_ZOOM);
        assert!(MAX_ZOOM > DEFAULT_ZOOM);
    }

    #[test]
    fn zoom_steps_round_trip_near_identity() {
        // One step in then out lands within 0.5% of where it started.
        let round_trip = ZOOM_IN_FACTOR * ZOOM_OUT_FACTOR;
        assert!((round_trip - 1.0).abs() < 0.005);
    }

    #[test]
    fn tap_window_is_shorter_than_long_press() {
        assert!(TAP_MAX_DURATION_MS < LONG_PRESS_DELAY_MS);
    }

    #[test]
    fn swipe_distance_exceeds_tap_slop() {
        assert!(SWIPE_MIN_DISTANCE_PX > TAP_MOVEMENT_THRESHOLD_PX);
    }
}
