// SPDX-License-Identifier: MPL-2.0
//! Viewer component encapsulating state and update logic.
//!
//! The viewer owns every sub-component and the timer registry. Each call to
//! [`Viewer::update`] first fires the timers that are due at the supplied
//! time, then processes the message, so the host only has to forward pointer
//! events, engine callbacks and periodic ticks.

use super::engine::{DocumentSource, EngineEvent, ListenerId, RenderingEngine, SelectedFile};
use super::subcomponents::feedback::{self, Edge, GestureGlyph};
use super::subcomponents::navigation::{self, Boundary, NavigationState, ZoomLimit};
use super::subcomponents::search::{self, SearchPhase, SearchState};
use crate::config::ViewerSettings;
use crate::domain::geometry::Vector;
use crate::domain::time::Timestamp;
use crate::domain::viewer::{RotationAngle, ZoomLevel};
use crate::error::{LoadError, ViewerError};
use crate::ui::gestures::{Gesture, GestureRecognizer, PinchDirection, SwipeDirection};
use crate::ui::input::PointerInput;
use crate::ui::notifications::Notification;
use crate::ui::timers::{TimerRegistry, TimerSlot};
use log::{debug, error, info, trace, warn};

/// Messages accepted by the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Pointer(PointerInput),
    /// Fires due timers only.
    Tick,
    OpenDocument(DocumentSource),
    /// File chosen in the host's picker. Only PDF payloads are opened.
    FileSelected(SelectedFile),
    Engine(EngineEvent),
    NextPage,
    PreviousPage,
    ZoomIn,
    ZoomOut,
    Rotate,
    TogglePanMode,
    SearchQueryChanged(String),
    SubmitSearch,
    FindNext,
    FindPrevious,
    ClearSearch,
    ToggleSearchPanel,
    DismissAlert,
}

/// Complete viewer state, generic over the rendering engine.
#[derive(Debug)]
pub struct Viewer<E> {
    settings: ViewerSettings,
    engine: Option<E>,
    recognizer: GestureRecognizer,
    timers: TimerRegistry,
    navigation: navigation::State,
    search: search::State,
    feedback: feedback::State,
    is_loading: bool,
    now: Timestamp,
    torn_down: bool,
}

impl<E: RenderingEngine> Viewer<E> {
    /// Creates a viewer with no engine attached.
    #[must_use]
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            settings,
            engine: None,
            recognizer: GestureRecognizer::new(settings.gestures),
            timers: TimerRegistry::new(),
            navigation: navigation::State::new(settings.navigation),
            search: search::State::default(),
            feedback: feedback::State::new(settings.feedback),
            is_loading: false,
            now: Timestamp::ZERO,
            torn_down: false,
        }
    }

    #[must_use]
    pub fn with_engine(settings: ViewerSettings, engine: E) -> Self {
        let mut viewer = Self::new(settings);
        viewer.engine = Some(engine);
        viewer
    }

    /// Processes one message at logical time `now`.
    ///
    /// Returns the gestures recognized while handling it, including a long
    /// press fired by an expired timer. After [`teardown`](Self::teardown)
    /// every message is ignored.
    pub fn update(&mut self, message: Message, now: Timestamp) -> Vec<Gesture> {
        if self.torn_down {
            trace!("viewer torn down, ignoring {message:?}");
            return Vec::new();
        }
        if now < self.now {
            debug!("clock went backwards ({} < {} ms)", now.as_millis(), self.now.as_millis());
        }
        self.now = self.now.max(now);

        let mut gestures = self.fire_due_timers();

        match message {
            Message::Pointer(input) => {
                let pan_mode = self.navigation.is_pan_mode_active();
                let recognized =
                    self.recognizer
                        .handle(&input, self.now, pan_mode, &mut self.timers);
                if let Some(gesture) = recognized {
                    self.apply_gesture(gesture);
                    gestures.push(gesture);
                }
                if !self.recognizer.is_two_finger_active()
                    && self.feedback.is_two_finger_indicator_visible()
                {
                    self.feedback.hide_two_finger_indicator(&mut self.timers);
                }
            }
            Message::Tick => {}
            Message::OpenDocument(source) => self.open_document(source),
            Message::FileSelected(file) => {
                if file.is_pdf() {
                    debug!("opening selected file {} ({} bytes)", file.name, file.bytes.len());
                    self.open_document(DocumentSource::Bytes(file.bytes));
                } else {
                    debug!("ignoring selected file {} of type {}", file.name, file.mime);
                }
            }
            Message::Engine(event) => self.on_engine_event(event),
            Message::NextPage => {
                self.apply_navigation(navigation::Message::NextPage);
            }
            Message::PreviousPage => {
                self.apply_navigation(navigation::Message::PreviousPage);
            }
            Message::ZoomIn => {
                self.apply_navigation(navigation::Message::ZoomIn);
            }
            Message::ZoomOut => {
                self.apply_navigation(navigation::Message::ZoomOut);
            }
            Message::Rotate => {
                self.apply_navigation(navigation::Message::Rotate);
            }
            Message::TogglePanMode => {
                self.apply_navigation(navigation::Message::TogglePanMode);
            }
            Message::SearchQueryChanged(text) => {
                self.apply_search(search::Message::QueryChanged(text));
            }
            Message::SubmitSearch => {
                if self.search_ready("submit_search") {
                    self.apply_search(search::Message::Submit);
                }
            }
            Message::FindNext => {
                if self.search_ready("find_next") {
                    self.apply_search(search::Message::FindNext);
                }
            }
            Message::FindPrevious => {
                if self.search_ready("find_previous") {
                    self.apply_search(search::Message::FindPrevious);
                }
            }
            Message::ClearSearch => self.apply_search(search::Message::Clear),
            Message::ToggleSearchPanel => self.apply_search(search::Message::TogglePanel),
            Message::DismissAlert => {
                self.feedback.dismiss_alert();
            }
        }

        gestures
    }

    /// Cancels every timer and engine subscription. Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.apply_search(search::Message::Reset);
        self.recognizer.reset(&mut self.timers);
        self.timers.cancel_all();
        self.feedback.hide_all();
        self.torn_down = true;
        debug!("viewer torn down");
    }

    fn fire_due_timers(&mut self) -> Vec<Gesture> {
        let mut gestures = Vec::new();
        while let Some(slot) = self.timers.pop_due(self.now) {
            trace!("timer {slot:?} fired at {} ms", self.now.as_millis());
            match slot {
                TimerSlot::LongPress => {
                    if let Some(gesture) = self.recognizer.on_long_press_elapsed() {
                        self.apply_gesture(gesture);
                        gestures.push(gesture);
                    }
                }
                TimerSlot::PanModeTimeout => {
                    self.apply_navigation(navigation::Message::ExitPanMode);
                }
                TimerSlot::SearchDebounce => {
                    // The query is kept; submit searches it once a document is loaded.
                    if self.search_ready("search_debounce") {
                        self.apply_search(search::Message::DebounceElapsed);
                    }
                }
                TimerSlot::FindSettle => self.apply_search(search::Message::SettleElapsed),
                _ => {
                    self.feedback.on_timer(slot, self.now, &mut self.timers);
                }
            }
        }
        gestures
    }

    fn apply_gesture(&mut self, gesture: Gesture) {
        debug!("gesture {gesture:?}");
        match gesture {
            Gesture::Tap(_) => {}
            Gesture::DoubleTap(_) => {
                self.show_glyph(GestureGlyph::DoubleTap);
                self.apply_search(search::Message::TogglePanel);
            }
            Gesture::LongPress(_) => {
                if self.apply_navigation(navigation::Message::EnterPanMode)
                    == navigation::Effect::PanModeEntered
                {
                    self.show_glyph(GestureGlyph::LongPress);
                }
            }
            Gesture::Swipe(direction) => {
                let message = match direction {
                    SwipeDirection::Left => navigation::Message::NextPage,
                    SwipeDirection::Right => navigation::Message::PreviousPage,
                    SwipeDirection::Up => navigation::Message::ZoomIn,
                    SwipeDirection::Down => navigation::Message::ZoomOut,
                };
                let effect = self.apply_navigation(message);
                if is_effective(effect) {
                    self.show_glyph(GestureGlyph::Swipe(direction));
                }
                if let navigation::Effect::BoundaryReached(boundary) = effect {
                    let edge = match boundary {
                        Boundary::First => Edge::Left,
                        Boundary::Last => Edge::Right,
                    };
                    self.feedback.flash_edge(edge, self.now, &mut self.timers);
                }
            }
            Gesture::PanModeToggled => {
                self.apply_navigation(navigation::Message::TogglePanMode);
            }
            Gesture::PanDelta(delta) => {
                self.apply_navigation(navigation::Message::ApplyPanOffset(delta));
            }
            Gesture::TwoFingerPanDelta(delta) => {
                if !self.navigation.has_document() {
                    warn!("{}", ViewerError::EngineNotReady { operation: "two_finger_pan" });
                    return;
                }
                self.feedback.show_two_finger_indicator(self.now, &mut self.timers);
                if self.apply_navigation(navigation::Message::EnterPanMode)
                    == navigation::Effect::PanModeEntered
                {
                    self.show_glyph(GestureGlyph::TwoFingerPan);
                }
                self.apply_navigation(navigation::Message::ApplyPanOffset(delta));
            }
            Gesture::Pinch(direction) => {
                self.feedback.show_two_finger_indicator(self.now, &mut self.timers);
                let message = match direction {
                    PinchDirection::Out => navigation::Message::ZoomIn,
                    PinchDirection::In => navigation::Message::ZoomOut,
                };
                if is_effective(self.apply_navigation(message)) {
                    self.show_glyph(GestureGlyph::Pinch(direction));
                }
            }
        }
    }

    fn apply_navigation(&mut self, message: navigation::Message) -> navigation::Effect {
        let now = self.now;
        let effect = self.navigation.handle(message, now);
        match effect {
            navigation::Effect::None => {}
            navigation::Effect::Debounced => trace!("{message:?} dropped by action debounce"),
            navigation::Effect::NoDocument => {
                warn!("{}", ViewerError::EngineNotReady { operation: "navigation" });
            }
            navigation::Effect::PageChanged(page) => {
                self.push_view_state();
                self.feedback.show_page_overlay(page, now, &mut self.timers);
            }
            navigation::Effect::BoundaryReached(boundary) => {
                let key = match boundary {
                    Boundary::First => "notification-first-page",
                    Boundary::Last => "notification-last-page",
                };
                self.notify(Notification::warning(key));
            }
            navigation::Effect::ZoomChanged(zoom) => {
                self.push_view_state();
                self.notify(
                    Notification::info("notification-zoom-level")
                        .with_arg("zoom", zoom.as_percent()),
                );
            }
            navigation::Effect::ZoomLimitReached(limit) => {
                let key = match limit {
                    ZoomLimit::Max => "notification-zoom-max",
                    ZoomLimit::Min => "notification-zoom-min",
                };
                self.notify(Notification::warning(key));
            }
            navigation::Effect::Rotated(angle) => {
                self.push_view_state();
                self.notify(
                    Notification::info("notification-rotation").with_arg("degrees", angle.degrees()),
                );
            }
            navigation::Effect::PanModeEntered => {
                self.timers.start(
                    TimerSlot::PanModeTimeout,
                    now,
                    self.settings.navigation.pan_mode_timeout,
                );
                self.notify(Notification::info("notification-pan-mode-on"));
            }
            navigation::Effect::PanModeExited => {
                self.timers.cancel(TimerSlot::PanModeTimeout);
                self.call_engine("set_pan_transform", |engine| {
                    engine.set_pan_transform(Vector::ZERO);
                });
                self.notify(Notification::info("notification-pan-mode-off"));
            }
            navigation::Effect::PanMoved(offset) => {
                self.timers.start(
                    TimerSlot::PanModeTimeout,
                    now,
                    self.settings.navigation.pan_mode_timeout,
                );
                self.call_engine("set_pan_transform", |engine| engine.set_pan_transform(offset));
            }
        }
        effect
    }

    fn apply_search(&mut self, message: search::Message) {
        let now = self.now;
        let current_page = self.navigation.view().page;
        for effect in self.search.handle(message, current_page) {
            match effect {
                search::Effect::ScheduleDebounce => {
                    self.timers
                        .start(TimerSlot::SearchDebounce, now, self.settings.search.debounce);
                }
                search::Effect::CancelDebounce => {
                    self.timers.cancel(TimerSlot::SearchDebounce);
                }
                search::Effect::ScheduleSettle => {
                    self.timers
                        .start(TimerSlot::FindSettle, now, self.settings.search.settle);
                }
                search::Effect::CancelSettle => {
                    self.timers.cancel(TimerSlot::FindSettle);
                }
                search::Effect::Subscribe => match self.engine.as_mut() {
                    Some(engine) => {
                        let listener = engine.subscribe_find_events();
                        self.search.set_listener(listener);
                    }
                    None => {
                        warn!("{}", ViewerError::EngineNotReady { operation: "subscribe_find_events" });
                    }
                },
                search::Effect::Unsubscribe(listener) => {
                    self.call_engine("unsubscribe_find_events", |engine| {
                        engine.unsubscribe_find_events(listener);
                    });
                }
                search::Effect::Dispatch(request) => {
                    trace!("dispatching find {request:?}");
                    self.call_engine("dispatch_find", |engine| engine.dispatch_find(request));
                }
                search::Effect::Notify(notification) => self.notify(notification),
                search::Effect::JumpToPage(page) => {
                    self.apply_navigation(navigation::Message::JumpToPage(page));
                }
            }
        }
    }

    fn on_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Loaded { total_pages: 0 } => self.fail_load(LoadError::EmptyDocument),
            EngineEvent::Loaded { total_pages } => {
                info!("document loaded with {total_pages} pages");
                self.is_loading = false;
                self.navigation.load(total_pages);
                self.push_view_state();
                self.feedback.schedule_tutorial(self.now, &mut self.timers);
            }
            EngineEvent::LoadFailed(err) => self.fail_load(err),
            EngineEvent::MatchesCount {
                listener,
                total,
                current,
            } => self.apply_search(search::Message::MatchesCount {
                listener,
                total,
                current,
            }),
            EngineEvent::FindControlState {
                listener,
                state,
                page_index,
            } => self.apply_search(search::Message::ControlState {
                listener,
                state,
                page_index,
            }),
        }
    }

    fn open_document(&mut self, source: DocumentSource) {
        if self.engine.is_none() {
            warn!("{}", ViewerError::EngineNotReady { operation: "load_document" });
            return;
        }
        self.reset_document();
        self.feedback.dismiss_alert();
        self.is_loading = true;
        self.call_engine("load_document", |engine| engine.load_document(source));
    }

    fn fail_load(&mut self, err: LoadError) {
        error!("document failed to load: {err}");
        self.reset_document();
        self.is_loading = false;
        self.notify(Notification::error(err.i18n_key()).with_arg("detail", &err));
    }

    /// Returns to the empty state, keeping the engine and the panel visibility.
    fn reset_document(&mut self) {
        let was_panning = self.navigation.is_pan_mode_active();
        self.recognizer.reset(&mut self.timers);
        self.navigation.unload();
        self.timers.cancel(TimerSlot::PanModeTimeout);
        self.timers.cancel(TimerSlot::TutorialReveal);
        if was_panning {
            self.call_engine("set_pan_transform", |engine| {
                engine.set_pan_transform(Vector::ZERO);
            });
        }
        self.apply_search(search::Message::Reset);
    }

    fn search_ready(&self, operation: &'static str) -> bool {
        if self.engine.is_some() && self.navigation.has_document() {
            true
        } else {
            warn!("{}", ViewerError::EngineNotReady { operation });
            false
        }
    }

    fn call_engine(&mut self, operation: &'static str, call: impl FnOnce(&mut E)) {
        match self.engine.as_mut() {
            Some(engine) => call(engine),
            None => warn!("{}", ViewerError::EngineNotReady { operation }),
        }
    }

    fn push_view_state(&mut self) {
        let view = self.navigation.view();
        self.call_engine("set_view_state", |engine| engine.set_view_state(view));
    }

    fn notify(&mut self, notification: Notification) {
        debug!("notification {}", notification.message_key());
        if notification.severity().requires_dismissal() {
            self.feedback.raise_alert(notification);
        } else {
            self.feedback
                .show_notification(notification, self.now, &mut self.timers);
        }
    }

    fn show_glyph(&mut self, glyph: GestureGlyph) {
        self.feedback.show_glyph(glyph, self.now, &mut self.timers);
    }

    #[must_use]
    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    #[must_use]
    pub fn navigation(&self) -> NavigationState {
        self.navigation.view()
    }

    /// 1-based, 0 without a document.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.navigation.view().page
    }

    #[must_use]
    pub fn total_pages(&self) -> u32 {
        self.navigation.view().total_pages
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomLevel {
        self.navigation.view().zoom
    }

    #[must_use]
    pub fn rotation(&self) -> RotationAngle {
        self.navigation.view().rotation
    }

    #[must_use]
    pub fn pan_offset(&self) -> Vector {
        self.navigation.pan_offset()
    }

    #[must_use]
    pub fn is_pan_mode_active(&self) -> bool {
        self.navigation.is_pan_mode_active()
    }

    #[must_use]
    pub fn has_document(&self) -> bool {
        self.navigation.has_document()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn search_state(&self) -> &SearchState {
        self.search.state()
    }

    #[must_use]
    pub fn search_phase(&self) -> SearchPhase {
        self.search.phase()
    }

    /// Subscription of the current search, if any.
    #[must_use]
    pub fn find_listener(&self) -> Option<ListenerId> {
        self.search.listener()
    }

    #[must_use]
    pub fn is_search_panel_visible(&self) -> bool {
        self.search.is_panel_visible()
    }

    #[must_use]
    pub fn feedback(&self) -> &feedback::State {
        &self.feedback
    }

    #[must_use]
    pub fn alert(&self) -> Option<&Notification> {
        self.feedback.alert()
    }

    #[must_use]
    pub fn has_seen_tutorial(&self) -> bool {
        self.feedback.has_seen_tutorial()
    }

    /// Restores the persisted tutorial flag.
    pub fn set_has_seen_tutorial(&mut self, seen: bool) {
        self.feedback.set_has_seen_tutorial(seen);
    }

    #[must_use]
    pub fn engine(&self) -> Option<&E> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut E> {
        self.engine.as_mut()
    }

    /// Earliest armed timer deadline, for hosts that schedule ticks.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }
}

fn is_effective(effect: navigation::Effect) -> bool {
    !matches!(
        effect,
        navigation::Effect::None | navigation::Effect::Debounced | navigation::Effect::NoDocument
    )
}
