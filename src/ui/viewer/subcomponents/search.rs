// SPDX-License-Identifier: MPL-2.0
//! Search sub-component: query text, debounced auto-search and find results.
//!
//! ```text
//! Idle -> Typing -> Searching -> Results | NoResults
//!   ^        ^                        |
//!   |        +------ new input -------+
//!   +------------- clear -------------+
//! ```
//!
//! Every new search replaces the find-event subscription, so results of an
//! older search arrive on a stale listener and are dropped.

use crate::ui::notifications::Notification;
use crate::ui::viewer::engine::{FindRequest, FindState, ListenerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Query edited, automatic search pending.
    Typing,
    /// Find dispatched, waiting for the engine.
    Searching,
    Results,
    NoResults,
}

/// Search fields exposed to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query_text: String,
    pub is_active: bool,
    pub total_matches: u32,
    /// 1-based index of the selected match, 0 without results.
    pub current_match_index: u32,
    pub has_results: bool,
}

/// Search sub-component state.
#[derive(Debug, Clone, Default)]
pub struct State {
    search: SearchState,
    phase: SearchPhase,
    panel_visible: bool,
    listener: Option<ListenerId>,
    // True until the first result of the current search arrives.
    awaiting_initial_result: bool,
}

/// Messages for the search sub-component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    QueryChanged(String),
    Submit,
    DebounceElapsed,
    FindNext,
    FindPrevious,
    SettleElapsed,
    Clear,
    TogglePanel,
    MatchesCount {
        listener: ListenerId,
        total: u32,
        current: u32,
    },
    ControlState {
        listener: ListenerId,
        state: FindState,
        page_index: Option<u32>,
    },
    /// Drops all state and the subscription (document change, teardown).
    Reset,
}

/// Effects produced by search changes, applied in order by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ScheduleDebounce,
    CancelDebounce,
    ScheduleSettle,
    CancelSettle,
    /// Subscribe to find events and report the id with [`State::set_listener`].
    Subscribe,
    Unsubscribe(ListenerId),
    Dispatch(FindRequest),
    Notify(Notification),
    /// Show this 1-based page.
    JumpToPage(u32),
}

impl State {
    /// Handle a search message. `current_page` is the page on screen.
    pub fn handle(&mut self, msg: Message, current_page: u32) -> Vec<Effect> {
        match msg {
            Message::QueryChanged(text) => {
                if text.trim().is_empty() {
                    return self.clear();
                }
                self.search.query_text = text;
                self.phase = SearchPhase::Typing;
                vec![Effect::ScheduleDebounce]
            }
            Message::DebounceElapsed => {
                if self.phase != SearchPhase::Typing || self.query().is_empty() {
                    return Vec::new();
                }
                self.start_search()
            }
            Message::Submit => {
                let mut effects = vec![Effect::CancelDebounce];
                if self.query().is_empty() {
                    effects.push(Effect::Notify(Notification::warning(
                        "notification-search-enter-term",
                    )));
                } else {
                    effects.extend(self.start_search());
                }
                effects
            }
            Message::FindNext => self.find_again(false),
            Message::FindPrevious => self.find_again(true),
            Message::SettleElapsed => {
                if !self.search.has_results {
                    return Vec::new();
                }
                vec![Effect::Notify(
                    Notification::info("notification-search-match")
                        .with_arg("current", self.search.current_match_index)
                        .with_arg("total", self.search.total_matches),
                )]
            }
            Message::Clear => self.clear(),
            Message::TogglePanel => {
                self.panel_visible = !self.panel_visible;
                if self.panel_visible {
                    Vec::new()
                } else {
                    self.clear()
                }
            }
            Message::MatchesCount {
                listener,
                total,
                current,
            } => {
                if !self.is_current(listener) {
                    return Vec::new();
                }
                self.search.total_matches = total;
                self.search.current_match_index = if total == 0 { 0 } else { current.min(total) };
                self.search.has_results = total > 0;
                if total > 0 {
                    self.awaiting_initial_result = false;
                    self.phase = SearchPhase::Results;
                }
                Vec::new()
            }
            Message::ControlState {
                listener,
                state,
                page_index,
            } => {
                if !self.is_current(listener) {
                    return Vec::new();
                }
                self.on_control_state(state, page_index, current_page)
            }
            Message::Reset => {
                let listener = self.listener.take();
                let panel_visible = self.panel_visible;
                *self = Self {
                    panel_visible,
                    ..Self::default()
                };
                let mut effects = vec![Effect::CancelDebounce, Effect::CancelSettle];
                effects.extend(listener.map(Effect::Unsubscribe));
                effects
            }
        }
    }

    fn on_control_state(
        &mut self,
        state: FindState,
        page_index: Option<u32>,
        current_page: u32,
    ) -> Vec<Effect> {
        match state {
            FindState::NotFound => {
                // Only the first answer to a new search may report no matches;
                // match navigation reports transient not-found states.
                if self.awaiting_initial_result && !self.search.has_results {
                    self.awaiting_initial_result = false;
                    self.phase = SearchPhase::NoResults;
                    return vec![Effect::Notify(Notification::info(
                        "notification-search-no-matches",
                    ))];
                }
                Vec::new()
            }
            FindState::Found | FindState::Wrapped | FindState::Pending => {
                let Some(page) = page_index.map(|index| index.saturating_add(1)) else {
                    return Vec::new();
                };
                if page == current_page {
                    Vec::new()
                } else {
                    vec![Effect::JumpToPage(page)]
                }
            }
        }
    }

    fn find_again(&mut self, backward: bool) -> Vec<Effect> {
        if self.query().is_empty() {
            return Vec::new();
        }
        if !self.search.is_active || self.phase == SearchPhase::Typing {
            let mut effects = vec![Effect::CancelDebounce];
            effects.extend(self.start_search());
            return effects;
        }
        vec![
            Effect::Dispatch(FindRequest::repeat(self.query(), backward)),
            Effect::ScheduleSettle,
        ]
    }

    fn start_search(&mut self) -> Vec<Effect> {
        let mut effects: Vec<Effect> = self
            .listener
            .take()
            .into_iter()
            .map(Effect::Unsubscribe)
            .collect();
        effects.push(Effect::Subscribe);
        effects.push(Effect::Dispatch(FindRequest::search(self.query())));

        self.search.is_active = true;
        self.search.has_results = false;
        self.search.total_matches = 0;
        self.search.current_match_index = 0;
        self.awaiting_initial_result = true;
        self.phase = SearchPhase::Searching;
        effects
    }

    fn clear(&mut self) -> Vec<Effect> {
        let mut effects = vec![Effect::CancelDebounce, Effect::CancelSettle];
        effects.extend(self.listener.take().map(Effect::Unsubscribe));
        effects.push(Effect::Dispatch(FindRequest::clear()));

        self.search = SearchState::default();
        self.phase = SearchPhase::Idle;
        self.awaiting_initial_result = false;
        effects
    }

    fn is_current(&self, listener: ListenerId) -> bool {
        self.listener == Some(listener)
    }

    fn query(&self) -> &str {
        self.search.query_text.trim()
    }

    /// Records the subscription created for [`Effect::Subscribe`].
    pub fn set_listener(&mut self, listener: ListenerId) {
        self.listener = Some(listener);
    }

    #[must_use]
    pub fn listener(&self) -> Option<ListenerId> {
        self.listener
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.search
    }

    #[must_use]
    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    #[must_use]
    pub fn is_panel_visible(&self) -> bool {
        self.panel_visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTENER: ListenerId = ListenerId(1);

    fn searching(query: &str) -> State {
        let mut state = State::default();
        state.handle(Message::QueryChanged(query.to_string()), 1);
        let effects = state.handle(Message::Submit, 1);
        assert!(effects.contains(&Effect::Subscribe));
        state.set_listener(LISTENER);
        state
    }

    fn has_notification(effects: &[Effect], key: &str) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, Effect::Notify(n) if n.message_key() == key))
    }

    #[test]
    fn typing_schedules_debounce() {
        let mut state = State::default();
        let effects = state.handle(Message::QueryChanged("inv".into()), 1);
        assert_eq!(effects, vec![Effect::ScheduleDebounce]);
        assert_eq!(state.phase(), SearchPhase::Typing);
        assert!(!state.state().is_active);
    }

    #[test]
    fn debounce_elapsing_dispatches_search() {
        let mut state = State::default();
        state.handle(Message::QueryChanged("invariant".into()), 1);
        let effects = state.handle(Message::DebounceElapsed, 1);
        assert_eq!(
            effects,
            vec![
                Effect::Subscribe,
                Effect::Dispatch(FindRequest::search("invariant"))
            ]
        );
        assert_eq!(state.phase(), SearchPhase::Searching);
    }

    #[test]
    fn submit_with_empty_query_asks_for_term() {
        let mut state = State::default();
        let effects = state.handle(Message::Submit, 1);
        assert!(has_notification(&effects, "notification-search-enter-term"));
        assert!(!effects.iter().any(|e| matches!(e, Effect::Dispatch(_))));
    }

    #[test]
    fn new_search_replaces_subscription() {
        let mut state = searching("first");
        state.handle(Message::QueryChanged("second".into()), 1);
        let effects = state.handle(Message::Submit, 1);
        assert_eq!(
            effects,
            vec![
                Effect::CancelDebounce,
                Effect::Unsubscribe(LISTENER),
                Effect::Subscribe,
                Effect::Dispatch(FindRequest::search("second")),
            ]
        );
    }

    #[test]
    fn match_count_fills_results() {
        let mut state = searching("invariant");
        state.handle(
            Message::MatchesCount {
                listener: LISTENER,
                total: 3,
                current: 1,
            },
            1,
        );
        let search = state.state();
        assert!(search.has_results);
        assert_eq!(search.total_matches, 3);
        assert_eq!(search.current_match_index, 1);
        assert_eq!(state.phase(), SearchPhase::Results);
    }

    #[test]
    fn clear_resets_and_dispatches_empty_find() {
        let mut state = searching("invariant");
        state.handle(
            Message::MatchesCount {
                listener: LISTENER,
                total: 3,
                current: 1,
            },
            1,
        );
        let effects = state.handle(Message::Clear, 1);
        assert!(effects.contains(&Effect::Dispatch(FindRequest::clear())));
        assert!(effects.contains(&Effect::Unsubscribe(LISTENER)));
        assert_eq!(state.state(), &SearchState::default());
        assert_eq!(state.listener(), None);
    }

    #[test]
    fn stale_listener_events_are_dropped() {
        let mut state = searching("invariant");
        state.handle(
            Message::MatchesCount {
                listener: ListenerId(99),
                total: 5,
                current: 2,
            },
            1,
        );
        assert!(!state.state().has_results);
    }

    #[test]
    fn not_found_notifies_only_for_initial_search() {
        let mut state = searching("absent");
        let not_found = Message::ControlState {
            listener: LISTENER,
            state: FindState::NotFound,
            page_index: None,
        };
        let first = state.handle(not_found.clone(), 1);
        assert!(has_notification(&first, "notification-search-no-matches"));
        assert_eq!(state.phase(), SearchPhase::NoResults);

        let second = state.handle(not_found, 1);
        assert!(second.is_empty());
    }

    #[test]
    fn not_found_during_navigation_is_silent() {
        let mut state = searching("invariant");
        state.handle(
            Message::MatchesCount {
                listener: LISTENER,
                total: 2,
                current: 1,
            },
            1,
        );
        let effects = state.handle(
            Message::ControlState {
                listener: LISTENER,
                state: FindState::NotFound,
                page_index: None,
            },
            1,
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn found_on_other_page_jumps_there() {
        let mut state = searching("invariant");
        let effects = state.handle(
            Message::ControlState {
                listener: LISTENER,
                state: FindState::Found,
                page_index: Some(4),
            },
            1,
        );
        assert_eq!(effects, vec![Effect::JumpToPage(5)]);

        let same_page = state.handle(
            Message::ControlState {
                listener: LISTENER,
                state: FindState::Wrapped,
                page_index: Some(0),
            },
            1,
        );
        assert!(same_page.is_empty());
    }

    #[test]
    fn find_next_repeats_and_schedules_settle() {
        let mut state = searching("invariant");
        let effects = state.handle(Message::FindNext, 1);
        assert_eq!(
            effects,
            vec![
                Effect::Dispatch(FindRequest::repeat("invariant", false)),
                Effect::ScheduleSettle
            ]
        );
        let effects = state.handle(Message::FindPrevious, 1);
        assert_eq!(
            effects[0],
            Effect::Dispatch(FindRequest::repeat("invariant", true))
        );
    }

    #[test]
    fn find_next_before_search_starts_one() {
        let mut state = State::default();
        state.handle(Message::QueryChanged("term".into()), 1);
        let effects = state.handle(Message::FindNext, 1);
        assert!(effects.contains(&Effect::Subscribe));
        assert!(effects.contains(&Effect::Dispatch(FindRequest::search("term"))));
    }

    #[test]
    fn settle_shows_match_counter_when_results_exist() {
        let mut state = searching("invariant");
        assert!(state.handle(Message::SettleElapsed, 1).is_empty());

        state.handle(
            Message::MatchesCount {
                listener: LISTENER,
                total: 3,
                current: 2,
            },
            1,
        );
        let effects = state.handle(Message::SettleElapsed, 1);
        let Some(Effect::Notify(notification)) = effects.first() else {
            panic!("expected a notification, got {effects:?}");
        };
        assert_eq!(notification.message_key(), "notification-search-match");
        assert_eq!(notification.arg("current"), Some("2"));
        assert_eq!(notification.arg("total"), Some("3"));
    }

    #[test]
    fn emptying_the_query_clears() {
        let mut state = searching("invariant");
        let effects = state.handle(Message::QueryChanged(String::new()), 1);
        assert!(effects.contains(&Effect::Dispatch(FindRequest::clear())));
        assert!(!state.state().is_active);
    }

    #[test]
    fn closing_panel_clears_search() {
        let mut state = searching("invariant");
        assert!(state.handle(Message::TogglePanel, 1).is_empty());
        assert!(state.is_panel_visible());

        let effects = state.handle(Message::TogglePanel, 1);
        assert!(!state.is_panel_visible());
        assert!(effects.contains(&Effect::Dispatch(FindRequest::clear())));
        assert!(state.state().query_text.is_empty());
    }

    #[test]
    fn reset_keeps_panel_and_unsubscribes() {
        let mut state = searching("invariant");
        state.handle(Message::TogglePanel, 1);
        let effects = state.handle(Message::Reset, 1);
        assert!(effects.contains(&Effect::Unsubscribe(LISTENER)));
        assert!(!effects.iter().any(|e| matches!(e, Effect::Dispatch(_))));
        assert!(state.is_panel_visible());
        assert_eq!(state.state(), &SearchState::default());
    }
}
