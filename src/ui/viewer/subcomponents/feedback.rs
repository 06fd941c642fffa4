// SPDX-License-Identifier: MPL-2.0
//! Transient feedback: notification text, gesture glyph, page overlay, edge
//! flash, two-finger indicator, tutorial, and the blocking load-error alert.
//!
//! Each channel is a single slot. Showing a visible slot again replaces its
//! content and restarts its auto-hide timer.

use crate::config::FeedbackSettings;
use crate::domain::time::Timestamp;
use crate::ui::gestures::{PinchDirection, SwipeDirection};
use crate::ui::notifications::Notification;
use crate::ui::timers::{TimerRegistry, TimerSlot};

/// Symbol flashed after a recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureGlyph {
    Swipe(SwipeDirection),
    DoubleTap,
    LongPress,
    TwoFingerPan,
    Pinch(PinchDirection),
}

impl GestureGlyph {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            GestureGlyph::Swipe(SwipeDirection::Left) => "\u{2190}",
            GestureGlyph::Swipe(SwipeDirection::Up) => "\u{2191}",
            GestureGlyph::Swipe(SwipeDirection::Right) => "\u{2192}",
            GestureGlyph::Swipe(SwipeDirection::Down) => "\u{2193}",
            GestureGlyph::DoubleTap => "\u{25CE}",
            GestureGlyph::LongPress => "\u{270B}",
            GestureGlyph::TwoFingerPan => "\u{270C}",
            GestureGlyph::Pinch(PinchDirection::Out) => "+",
            GestureGlyph::Pinch(PinchDirection::In) => "\u{2212}",
        }
    }
}

/// Screen edge flashed when paging hits the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
}

/// How many times each channel has been shown. A repeat of identical
/// content still bumps its counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShowCounts {
    pub notification: u64,
    pub glyph: u64,
    pub page_overlay: u64,
    pub alert: u64,
}

/// Feedback sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    settings: FeedbackSettings,
    notification: Option<Notification>,
    glyph: Option<GestureGlyph>,
    page_overlay: Option<u32>,
    edge_flash: Option<Edge>,
    two_finger_indicator: bool,
    tutorial_visible: bool,
    has_seen_tutorial: bool,
    alert: Option<Notification>,
    shows: ShowCounts,
}

impl State {
    #[must_use]
    pub fn new(settings: FeedbackSettings) -> Self {
        Self {
            settings,
            notification: None,
            glyph: None,
            page_overlay: None,
            edge_flash: None,
            two_finger_indicator: false,
            tutorial_visible: false,
            has_seen_tutorial: false,
            alert: None,
            shows: ShowCounts::default(),
        }
    }

    pub fn show_notification(
        &mut self,
        notification: Notification,
        now: Timestamp,
        timers: &mut TimerRegistry,
    ) {
        self.notification = Some(notification);
        self.shows.notification += 1;
        timers.start(TimerSlot::Notification, now, self.settings.notification);
    }

    pub fn show_glyph(&mut self, glyph: GestureGlyph, now: Timestamp, timers: &mut TimerRegistry) {
        self.glyph = Some(glyph);
        self.shows.glyph += 1;
        timers.start(TimerSlot::GestureIndicator, now, self.settings.gesture_glyph);
    }

    pub fn show_page_overlay(&mut self, page: u32, now: Timestamp, timers: &mut TimerRegistry) {
        self.page_overlay = Some(page);
        self.shows.page_overlay += 1;
        timers.start(TimerSlot::PageOverlay, now, self.settings.page_overlay);
    }

    pub fn flash_edge(&mut self, edge: Edge, now: Timestamp, timers: &mut TimerRegistry) {
        self.edge_flash = Some(edge);
        timers.start(TimerSlot::EdgeFlash, now, self.settings.edge_flash);
    }

    /// Shows the two-finger indicator. The timer only hides it if the
    /// release never arrives.
    pub fn show_two_finger_indicator(&mut self, now: Timestamp, timers: &mut TimerRegistry) {
        self.two_finger_indicator = true;
        timers.start(
            TimerSlot::TwoFingerIndicator,
            now,
            self.settings.two_finger_indicator,
        );
    }

    pub fn hide_two_finger_indicator(&mut self, timers: &mut TimerRegistry) {
        self.two_finger_indicator = false;
        timers.cancel(TimerSlot::TwoFingerIndicator);
    }

    /// Schedules the tutorial after a document load, unless already seen.
    pub fn schedule_tutorial(&mut self, now: Timestamp, timers: &mut TimerRegistry) {
        if !self.has_seen_tutorial {
            timers.start(TimerSlot::TutorialReveal, now, self.settings.tutorial_delay);
        }
    }

    /// Shows a blocking alert until [`dismiss_alert`](Self::dismiss_alert).
    pub fn raise_alert(&mut self, alert: Notification) {
        self.alert = Some(alert);
        self.shows.alert += 1;
    }

    pub fn dismiss_alert(&mut self) -> bool {
        self.alert.take().is_some()
    }

    pub fn set_has_seen_tutorial(&mut self, seen: bool) {
        self.has_seen_tutorial = seen;
    }

    /// Applies an expired feedback timer. Returns `false` for slots owned by
    /// other sub-components.
    pub fn on_timer(&mut self, slot: TimerSlot, now: Timestamp, timers: &mut TimerRegistry) -> bool {
        match slot {
            TimerSlot::Notification => self.notification = None,
            TimerSlot::GestureIndicator => self.glyph = None,
            TimerSlot::PageOverlay => self.page_overlay = None,
            TimerSlot::EdgeFlash => self.edge_flash = None,
            TimerSlot::TwoFingerIndicator => self.two_finger_indicator = false,
            TimerSlot::TutorialReveal => {
                if !self.has_seen_tutorial {
                    self.has_seen_tutorial = true;
                    self.tutorial_visible = true;
                    timers.start(TimerSlot::TutorialHide, now, self.settings.tutorial);
                }
            }
            TimerSlot::TutorialHide => self.tutorial_visible = false,
            TimerSlot::PanModeTimeout
            | TimerSlot::LongPress
            | TimerSlot::SearchDebounce
            | TimerSlot::FindSettle => return false,
        }
        true
    }

    /// Hides every transient signal. The alert and the tutorial flag stay.
    pub fn hide_all(&mut self) {
        self.notification = None;
        self.glyph = None;
        self.page_overlay = None;
        self.edge_flash = None;
        self.two_finger_indicator = false;
        self.tutorial_visible = false;
    }

    #[must_use]
    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    #[must_use]
    pub fn glyph(&self) -> Option<GestureGlyph> {
        self.glyph
    }

    #[must_use]
    pub fn page_overlay(&self) -> Option<u32> {
        self.page_overlay
    }

    #[must_use]
    pub fn edge_flash(&self) -> Option<Edge> {
        self.edge_flash
    }

    #[must_use]
    pub fn is_two_finger_indicator_visible(&self) -> bool {
        self.two_finger_indicator
    }

    #[must_use]
    pub fn is_tutorial_visible(&self) -> bool {
        self.tutorial_visible
    }

    #[must_use]
    pub fn has_seen_tutorial(&self) -> bool {
        self.has_seen_tutorial
    }

    #[must_use]
    pub fn alert(&self) -> Option<&Notification> {
        self.alert.as_ref()
    }

    #[must_use]
    pub fn show_counts(&self) -> ShowCounts {
        self.shows
    }
}
