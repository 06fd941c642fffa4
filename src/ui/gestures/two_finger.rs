// SPDX-License-Identifier: MPL-2.0
//! Two-contact pan and pinch.
//!
//! While the distance between the contacts stays within the stability
//! threshold of the reference distance, movement of their center is a pan.
//! A larger change is a pinch step; the reference is then re-based so that a
//! continuing pinch emits one step per threshold crossed.

use super::{Gesture, PinchDirection};
use crate::domain::geometry::Point;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TwoFingerState {
    active: bool,
    start_distance: f32,
    pan_active: bool,
    last_center: Option<Point>,
}

impl TwoFingerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking with `a` and `b` as the reference pair.
    pub fn begin(&mut self, a: Point, b: Point) {
        *self = Self {
            active: true,
            start_distance: a.distance_to(b),
            pan_active: false,
            last_center: None,
        };
    }

    /// Interprets the pair's new positions.
    ///
    /// The first stable move only records the center.
    pub fn update(&mut self, a: Point, b: Point, stability_threshold: f32) -> Option<Gesture> {
        if !self.active {
            return None;
        }

        let distance = a.distance_to(b);
        let center = a.midpoint(b);
        let change = distance - self.start_distance;

        if change.abs() >= stability_threshold {
            self.start_distance = distance;
            self.last_center = Some(center);
            self.pan_active = false;
            let direction = if change > 0.0 {
                PinchDirection::Out
            } else {
                PinchDirection::In
            };
            return Some(Gesture::Pinch(direction));
        }

        let previous = self.last_center.replace(center);
        self.pan_active = true;
        let delta = center - previous?;
        (!delta.is_zero()).then_some(Gesture::TwoFingerPanDelta(delta))
    }

    pub fn end(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.active && self.pan_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Vector;

    const THRESHOLD: f32 = 30.0;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn first_move_sets_reference_center() {
        let mut state = TwoFingerState::new();
        state.begin(p(100.0, 100.0), p(200.0, 100.0));

        assert_eq!(state.update(p(110.0, 100.0), p(210.0, 100.0), THRESHOLD), None);
        assert!(state.is_panning());
        assert_eq!(
            state.update(p(120.0, 110.0), p(220.0, 110.0), THRESHOLD),
            Some(Gesture::TwoFingerPanDelta(Vector::new(10.0, 10.0)))
        );
    }

    #[test]
    fn spreading_is_pinch_out() {
        let mut state = TwoFingerState::new();
        state.begin(p(100.0, 100.0), p(200.0, 100.0));

        assert_eq!(
            state.update(p(80.0, 100.0), p(220.0, 100.0), THRESHOLD),
            Some(Gesture::Pinch(PinchDirection::Out))
        );
        assert!(!state.is_panning());
    }

    #[test]
    fn closing_is_pinch_in() {
        let mut state = TwoFingerState::new();
        state.begin(p(100.0, 100.0), p(200.0, 100.0));

        assert_eq!(
            state.update(p(120.0, 100.0), p(170.0, 100.0), THRESHOLD),
            Some(Gesture::Pinch(PinchDirection::In))
        );
    }

    #[test]
    fn pinch_rebases_reference() {
        let mut state = TwoFingerState::new();
        state.begin(p(100.0, 100.0), p(200.0, 100.0));
        state.update(p(80.0, 100.0), p(220.0, 100.0), THRESHOLD);

        // Same spread as the new reference: a stable pan step from the re-based center.
        assert_eq!(
            state.update(p(90.0, 100.0), p(230.0, 100.0), THRESHOLD),
            Some(Gesture::TwoFingerPanDelta(Vector::new(10.0, 0.0)))
        );
    }

    #[test]
    fn inactive_state_ignores_updates() {
        let mut state = TwoFingerState::new();
        assert_eq!(state.update(p(0.0, 0.0), p(500.0, 0.0), THRESHOLD), None);

        state.begin(p(0.0, 0.0), p(100.0, 0.0));
        state.end();
        assert!(!state.is_active());
        assert_eq!(state.update(p(0.0, 0.0), p(500.0, 0.0), THRESHOLD), None);
    }
}
