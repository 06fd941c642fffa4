// SPDX-License-Identifier: MPL-2.0
//! Swipe classification of a finished single-contact gesture.

use super::SwipeDirection;
use crate::config::GestureSettings;
use crate::domain::geometry::Point;
use std::time::Duration;

/// Classifies a release at `end` as a swipe, if it qualifies.
///
/// Too short, too slow or too diagonal a motion yields `None`.
#[must_use]
pub fn classify(
    start: Point,
    end: Point,
    elapsed: Duration,
    settings: &GestureSettings,
) -> Option<SwipeDirection> {
    let delta = end - start;
    let distance = delta.length();

    if distance < settings.swipe_min_distance || elapsed > settings.swipe_max_duration {
        return None;
    }

    // Sub-millisecond gestures count as one millisecond.
    #[allow(clippy::cast_precision_loss)]
    let millis = elapsed.as_millis().max(1) as f32;
    if distance / millis < settings.swipe_min_velocity {
        return None;
    }

    let (abs_x, abs_y) = (delta.x.abs(), delta.y.abs());
    let ratio = settings.swipe_direction_ratio;
    if abs_x > abs_y * ratio {
        Some(if delta.x < 0.0 {
            SwipeDirection::Left
        } else {
            SwipeDirection::Right
        })
    } else if abs_y > abs_x * ratio {
        Some(if delta.y < 0.0 {
            SwipeDirection::Up
        } else {
            SwipeDirection::Down
        })
    } else {
        None
    }
}
