// SPDX-License-Identifier: MPL-2.0
//! Pointer stream to gesture state machine.
//!
//! Single contact: Idle, then Down, then Moving or LongPressArmed, ending in a
//! tap, a swipe or the end of a pan. Two contacts take over as soon as a
//! second contact lands; from then on no single-contact gesture is derived
//! until every contact has been released.

use super::tap::{TapDetector, TapKind};
use super::two_finger::TwoFingerState;
use super::{swipe, Gesture};
use crate::config::GestureSettings;
use crate::domain::geometry::Point;
use crate::domain::time::Timestamp;
use crate::ui::input::{ContactId, NormalizedEvent, Phase, PointerInput, PointerTracker};
use crate::ui::timers::{TimerRegistry, TimerSlot};
use log::{debug, trace};

/// The single contact currently being classified.
#[derive(Debug, Clone, Copy)]
struct ContactState {
    id: ContactId,
    start: Point,
    start_time: Timestamp,
    last_reported: Point,
    has_moved: bool,
    /// Largest distance from `start` seen so far.
    movement_distance: f32,
    is_panning: bool,
    long_press_fired: bool,
}

impl ContactState {
    fn new(id: ContactId, start: Point, start_time: Timestamp) -> Self {
        Self {
            id,
            start,
            start_time,
            last_reported: start,
            has_moved: false,
            movement_distance: 0.0,
            is_panning: false,
            long_press_fired: false,
        }
    }
}

/// Classifies pointer input into [`Gesture`]s.
///
/// Timing comes from the caller: pass the event time to [`handle`] and call
/// [`on_long_press_elapsed`] when [`TimerSlot::LongPress`] fires.
///
/// [`handle`]: GestureRecognizer::handle
/// [`on_long_press_elapsed`]: GestureRecognizer::on_long_press_elapsed
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    settings: GestureSettings,
    tracker: PointerTracker,
    contact: Option<ContactState>,
    taps: TapDetector,
    two_finger: TwoFingerState,
    // Set once a second contact lands, cleared when the last one lifts.
    multi_contact: bool,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            tracker: PointerTracker::new(),
            contact: None,
            taps: TapDetector::new(),
            two_finger: TwoFingerState::new(),
            multi_contact: false,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Feeds one pointer event.
    ///
    /// `pan_mode_active` decides whether a drag pans or may become a swipe.
    /// Malformed input is logged and yields nothing.
    pub fn handle(
        &mut self,
        input: &PointerInput,
        now: Timestamp,
        pan_mode_active: bool,
        timers: &mut TimerRegistry,
    ) -> Option<Gesture> {
        let event = match self.tracker.track(input, now) {
            Ok(event) => event,
            Err(err) => {
                debug!("ignoring pointer event {input:?}: {err}");
                return None;
            }
        };
        trace!("pointer {:?} {:?} contacts={}", event.phase, event.contact, event.contact_count);

        match event.phase {
            Phase::Down => self.on_down(&event, pan_mode_active, timers),
            Phase::Move => self.on_move(&event, pan_mode_active, timers),
            Phase::Up => self.on_up(&event, pan_mode_active, timers),
            Phase::Cancel => self.on_cancel(&event, timers),
        }
    }

    fn on_down(
        &mut self,
        event: &NormalizedEvent,
        pan_mode_active: bool,
        timers: &mut TimerRegistry,
    ) -> Option<Gesture> {
        match event.contact_count {
            1 => {
                self.contact = Some(ContactState::new(
                    event.contact,
                    event.position,
                    event.timestamp,
                ));
                if !pan_mode_active {
                    timers.start(
                        TimerSlot::LongPress,
                        event.timestamp,
                        self.settings.long_press_delay,
                    );
                }
            }
            2 => {
                timers.cancel(TimerSlot::LongPress);
                self.contact = None;
                self.multi_contact = true;
                self.begin_two_finger();
            }
            count => {
                debug!("ignoring {count} simultaneous contacts");
                self.two_finger.end();
            }
        }
        None
    }

    fn on_move(
        &mut self,
        event: &NormalizedEvent,
        pan_mode_active: bool,
        timers: &mut TimerRegistry,
    ) -> Option<Gesture> {
        if event.contact_count == 2 {
            let (a, b) = self.tracker.pair()?;
            return self
                .two_finger
                .update(a, b, self.settings.pinch_stability_threshold);
        }

        if self.multi_contact {
            return None;
        }
        let threshold = self.settings.tap_movement_threshold;
        let pan_timeout = self.settings.pan_mode_timeout;
        let contact = self.contact.as_mut().filter(|c| c.id == event.contact)?;

        let distance = contact.start.distance_to(event.position);
        contact.movement_distance = contact.movement_distance.max(distance);
        if distance > threshold && !contact.has_moved {
            contact.has_moved = true;
            timers.cancel(TimerSlot::LongPress);
        }

        if pan_mode_active && contact.has_moved {
            let delta = event.position - contact.last_reported;
            contact.last_reported = event.position;
            contact.is_panning = true;
            timers.start(TimerSlot::PanModeTimeout, event.timestamp, pan_timeout);
            if !delta.is_zero() {
                return Some(Gesture::PanDelta(delta));
            }
        }
        None
    }

    fn on_up(
        &mut self,
        event: &NormalizedEvent,
        pan_mode_active: bool,
        timers: &mut TimerRegistry,
    ) -> Option<Gesture> {
        if self.multi_contact {
            match event.contact_count {
                0 => {
                    self.multi_contact = false;
                    self.two_finger.end();
                }
                1 => self.two_finger.end(),
                2 => self.begin_two_finger(),
                _ => {}
            }
            return None;
        }

        let contact = self.contact.take().filter(|c| c.id == event.contact)?;
        timers.cancel(TimerSlot::LongPress);

        if contact.long_press_fired {
            return None;
        }

        if contact.is_panning {
            timers.start(
                TimerSlot::PanModeTimeout,
                event.timestamp,
                self.settings.pan_mode_timeout,
            );
            return None;
        }

        let movement = contact
            .movement_distance
            .max(contact.start.distance_to(event.position));
        let stationary = movement < self.settings.tap_movement_threshold;

        if pan_mode_active && stationary {
            return Some(Gesture::PanModeToggled);
        }

        let elapsed = event.timestamp.saturating_duration_since(contact.start_time);
        if stationary && elapsed < self.settings.tap_max_duration {
            let kind = self.taps.register(
                event.timestamp,
                event.position,
                self.settings.double_tap_delay,
                self.settings.double_tap_distance,
            );
            return Some(match kind {
                TapKind::Single => Gesture::Tap(event.position),
                TapKind::Double => Gesture::DoubleTap(event.position),
            });
        }

        swipe::classify(contact.start, event.position, elapsed, &self.settings)
            .map(Gesture::Swipe)
    }

    fn on_cancel(&mut self, event: &NormalizedEvent, timers: &mut TimerRegistry) -> Option<Gesture> {
        timers.cancel(TimerSlot::LongPress);
        self.contact = None;
        match event.contact_count {
            0 | 1 => self.two_finger.end(),
            2 if self.multi_contact => self.begin_two_finger(),
            _ => {}
        }
        self.multi_contact = event.contact_count > 0;
        None
    }

    fn begin_two_finger(&mut self) {
        if let Some((a, b)) = self.tracker.pair() {
            self.two_finger.begin(a, b);
        }
    }

    /// Handles expiry of [`TimerSlot::LongPress`].
    ///
    /// Emits [`Gesture::LongPress`] if the contact is still down and has not moved.
    pub fn on_long_press_elapsed(&mut self) -> Option<Gesture> {
        if self.multi_contact {
            return None;
        }
        let contact = self.contact.as_mut()?;
        if contact.has_moved || contact.long_press_fired {
            return None;
        }
        contact.long_press_fired = true;
        let position = self
            .tracker
            .get(contact.id)
            .map_or(contact.start, |session| session.current);
        Some(Gesture::LongPress(position))
    }

    /// Whether a two-contact gesture is in progress.
    #[must_use]
    pub fn is_two_finger_active(&self) -> bool {
        self.two_finger.is_active()
    }

    /// Number of contacts currently down.
    #[must_use]
    pub fn contact_count(&self) -> usize {
        self.tracker.len()
    }

    /// Forgets every contact and tap, and disarms the long-press timer.
    pub fn reset(&mut self, timers: &mut TimerRegistry) {
        timers.cancel(TimerSlot::LongPress);
        self.tracker.clear();
        self.contact = None;
        self.taps.clear();
        self.two_finger.end();
        self.multi_contact = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::geometry::Vector;
    use crate::test_utils::{pointer, F32_EPSILON};
    use crate::ui::gestures::{PinchDirection, SwipeDirection};

    struct Harness {
        recognizer: GestureRecognizer,
        timers: TimerRegistry,
        pan_mode: bool,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                recognizer: GestureRecognizer::new(GestureSettings::default()),
                timers: TimerRegistry::new(),
                pan_mode: false,
            }
        }

        fn send(&mut self, id: u32, phase: Phase, x: f32, y: f32, ms: u64) -> Option<Gesture> {
            self.recognizer.handle(
                &pointer(id, phase, x, y),
                Timestamp::from_millis(ms),
                self.pan_mode,
                &mut self.timers,
            )
        }

        fn tap(&mut self, x: f32, y: f32, ms: u64) -> Option<Gesture> {
            self.send(1, Phase::Down, x, y, ms);
            self.send(1, Phase::Up, x, y, ms + 50)
        }

        /// Fires the long press if its deadline has passed.
        fn advance(&mut self, ms: u64) -> Option<Gesture> {
            match self.timers.pop_due(Timestamp::from_millis(ms)) {
                Some(TimerSlot::LongPress) => self.recognizer.on_long_press_elapsed(),
                _ => None,
            }
        }
    }

    #[test]
    fn two_close_taps_make_one_double_tap() {
        let mut h = Harness::new();
        assert!(matches!(h.tap(100.0, 100.0, 0), Some(Gesture::Tap(_))));
        assert!(matches!(h.tap(110.0, 105.0, 300), Some(Gesture::DoubleTap(_))));
    }

    #[test]
    fn two_slow_taps_make_no_double_tap() {
        let mut h = Harness::new();
        assert!(matches!(h.tap(100.0, 100.0, 0), Some(Gesture::Tap(_))));
        assert!(matches!(h.tap(110.0, 105.0, 1_000), Some(Gesture::Tap(_))));
    }

    #[test]
    fn long_hold_is_not_a_tap() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 50.0, 50.0, 0);
        assert_eq!(h.send(1, Phase::Up, 50.0, 50.0, 600), None);
    }

    #[test]
    fn fast_horizontal_drag_is_swipe_left() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 300.0, 300.0, 0);
        h.send(1, Phase::Move, 200.0, 300.0, 75);
        assert_eq!(
            h.send(1, Phase::Up, 100.0, 300.0, 150),
            Some(Gesture::Swipe(SwipeDirection::Left))
        );
    }

    #[test]
    fn diagonal_drag_is_nothing() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 200.0, 300.0, 0);
        h.send(1, Phase::Move, 150.0, 250.0, 75);
        assert_eq!(h.send(1, Phase::Up, 100.0, 200.0, 150), None);
    }

    #[test]
    fn stationary_hold_fires_long_press_once() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 40.0, 40.0, 0);
        h.send(1, Phase::Move, 45.0, 42.0, 300);

        assert_eq!(h.advance(799), None);
        assert_eq!(
            h.advance(800),
            Some(Gesture::LongPress(Point::new(45.0, 42.0)))
        );
        assert_eq!(h.recognizer.on_long_press_elapsed(), None);
        // Release after a long press is not a tap.
        assert_eq!(h.send(1, Phase::Up, 45.0, 42.0, 900), None);
    }

    #[test]
    fn movement_cancels_long_press() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 40.0, 40.0, 0);
        h.send(1, Phase::Move, 100.0, 40.0, 100);
        assert!(!h.timers.is_armed(TimerSlot::LongPress));
    }

    #[test]
    fn no_long_press_in_pan_mode() {
        let mut h = Harness::new();
        h.pan_mode = true;
        h.send(1, Phase::Down, 40.0, 40.0, 0);
        assert!(!h.timers.is_armed(TimerSlot::LongPress));
    }

    #[test]
    fn pan_mode_drag_emits_incremental_deltas() {
        let mut h = Harness::new();
        h.pan_mode = true;
        h.send(1, Phase::Down, 100.0, 100.0, 0);
        assert_eq!(h.send(1, Phase::Move, 110.0, 100.0, 20), None);
        assert_eq!(
            h.send(1, Phase::Move, 130.0, 100.0, 40),
            Some(Gesture::PanDelta(Vector::new(30.0, 0.0)))
        );
        assert_eq!(
            h.send(1, Phase::Move, 135.0, 90.0, 60),
            Some(Gesture::PanDelta(Vector::new(5.0, -10.0)))
        );
        assert_eq!(
            h.timers.deadline(TimerSlot::PanModeTimeout),
            Some(Timestamp::from_millis(4_060))
        );

        // Ending the pan refreshes the timeout and emits nothing.
        assert_eq!(h.send(1, Phase::Up, 135.0, 90.0, 100), None);
        assert_eq!(
            h.timers.deadline(TimerSlot::PanModeTimeout),
            Some(Timestamp::from_millis(4_100))
        );
    }

    #[test]
    fn stationary_tap_in_pan_mode_toggles_it() {
        let mut h = Harness::new();
        h.pan_mode = true;
        assert_eq!(h.tap(60.0, 60.0, 0), Some(Gesture::PanModeToggled));
    }

    #[test]
    fn two_finger_stable_move_pans() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 100.0, 100.0, 0);
        h.send(2, Phase::Down, 200.0, 100.0, 10);
        assert!(h.recognizer.is_two_finger_active());

        assert_eq!(h.send(1, Phase::Move, 110.0, 100.0, 20), None);
        let gesture = h.send(2, Phase::Move, 210.0, 100.0, 30);
        let Some(Gesture::TwoFingerPanDelta(delta)) = gesture else {
            panic!("expected a two-finger delta, got {gesture:?}");
        };
        assert!((delta.x - 5.0).abs() < F32_EPSILON);
        assert!(delta.y.abs() < F32_EPSILON);
    }

    #[test]
    fn two_finger_spread_is_pinch() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 100.0, 100.0, 0);
        h.send(2, Phase::Down, 200.0, 100.0, 10);
        assert_eq!(
            h.send(2, Phase::Move, 250.0, 100.0, 30),
            Some(Gesture::Pinch(PinchDirection::Out))
        );
    }

    #[test]
    fn second_contact_cancels_long_press() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 100.0, 100.0, 0);
        h.send(2, Phase::Down, 200.0, 100.0, 100);
        assert!(!h.timers.is_armed(TimerSlot::LongPress));
        assert_eq!(h.advance(5_000), None);
    }

    #[test]
    fn releasing_a_two_finger_gesture_yields_nothing() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 300.0, 300.0, 0);
        h.send(2, Phase::Down, 400.0, 300.0, 10);
        assert_eq!(h.send(2, Phase::Up, 400.0, 300.0, 50), None);
        assert!(!h.recognizer.is_two_finger_active());

        // The remaining contact swipes fast but belongs to the same sequence.
        h.send(1, Phase::Move, 200.0, 300.0, 70);
        assert_eq!(h.send(1, Phase::Up, 100.0, 300.0, 90), None);

        // A fresh sequence works again.
        assert!(matches!(h.tap(50.0, 50.0, 1_000), Some(Gesture::Tap(_))));
    }

    #[test]
    fn cancel_returns_to_idle_without_gesture() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 100.0, 100.0, 0);
        assert_eq!(h.send(1, Phase::Cancel, 100.0, 100.0, 20), None);
        assert!(!h.timers.is_armed(TimerSlot::LongPress));
        assert_eq!(h.recognizer.contact_count(), 0);
    }

    #[test]
    fn cancelling_a_third_contact_resumes_two_finger_pan() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 100.0, 100.0, 0);
        h.send(2, Phase::Down, 200.0, 100.0, 10);
        h.send(3, Phase::Down, 300.0, 100.0, 20);
        assert_eq!(h.send(3, Phase::Cancel, 300.0, 100.0, 30), None);
        assert!(h.recognizer.is_two_finger_active());

        h.send(1, Phase::Move, 110.0, 100.0, 40);
        assert!(matches!(
            h.send(2, Phase::Move, 210.0, 100.0, 50),
            Some(Gesture::TwoFingerPanDelta(_))
        ));
    }

    #[test]
    fn invalid_input_is_ignored() {
        let mut h = Harness::new();
        assert_eq!(h.send(7, Phase::Up, 0.0, 0.0, 0), None);
        assert_eq!(h.send(1, Phase::Down, f32::INFINITY, 0.0, 0), None);
        assert_eq!(h.recognizer.contact_count(), 0);
    }

    #[test]
    fn reset_clears_everything() {
        let mut h = Harness::new();
        h.send(1, Phase::Down, 100.0, 100.0, 0);
        h.recognizer.reset(&mut h.timers);
        assert_eq!(h.recognizer.contact_count(), 0);
        assert!(!h.timers.is_armed(TimerSlot::LongPress));
    }
}
