// SPDX-License-Identifier: MPL-2.0
//! Boundary with the document rendering engine.
//!
//! The engine is a black box: it renders the page it is told to, runs text
//! finds, and reports back through [`EngineEvent`]s that the host feeds into
//! the viewer. Raw payloads are validated here so the viewer never sees
//! negative counts, unknown find states or missing fields.

use super::subcomponents::navigation::NavigationState;
use crate::domain::geometry::Vector;
use crate::error::LoadError;
use serde::Deserialize;
use std::path::PathBuf;

/// Handle of one find-event subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// What to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// A file picked by the user in the host shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub const PDF_MIME: &'static str = "application/pdf";

    #[must_use]
    pub fn is_pdf(&self) -> bool {
        self.mime.eq_ignore_ascii_case(Self::PDF_MIME)
    }
}

/// Options of one find command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindRequest {
    pub query: String,
    pub case_sensitive: bool,
    pub find_previous: bool,
    pub highlight_all: bool,
    pub phrase_search: bool,
    /// Move to the next/previous match of the current query.
    pub again: bool,
    pub entire_document: bool,
}

impl FindRequest {
    /// A new case-insensitive phrase search over the whole document.
    #[must_use]
    pub fn search(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            case_sensitive: false,
            find_previous: false,
            highlight_all: true,
            phrase_search: true,
            again: false,
            entire_document: true,
        }
    }

    /// Steps to the next match, or the previous one if `backward`.
    #[must_use]
    pub fn repeat(query: impl Into<String>, backward: bool) -> Self {
        Self {
            find_previous: backward,
            again: true,
            ..Self::search(query)
        }
    }

    /// Removes every highlight.
    #[must_use]
    pub fn clear() -> Self {
        Self {
            highlight_all: false,
            ..Self::search(String::new())
        }
    }
}

/// Find-controller state codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindState {
    Found,
    NotFound,
    Wrapped,
    Pending,
}

impl FindState {
    /// Decodes the engine's integer state.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(FindState::Found),
            1 => Some(FindState::NotFound),
            2 => Some(FindState::Wrapped),
            3 => Some(FindState::Pending),
            _ => None,
        }
    }
}

/// Validated engine callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Loaded {
        total_pages: u32,
    },
    LoadFailed(LoadError),
    MatchesCount {
        listener: ListenerId,
        total: u32,
        current: u32,
    },
    FindControlState {
        listener: ListenerId,
        state: FindState,
        /// Zero-based page of the selected match.
        page_index: Option<u32>,
    },
}

/// Selection payload, the second place engines report the match page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawSelection {
    #[serde(default)]
    pub page_idx: Option<i64>,
}

/// Engine callback as received, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RawEngineEvent {
    Loaded {
        total_pages: i64,
    },
    LoadFailed {
        detail: String,
    },
    MatchesCount {
        #[serde(default)]
        listener: Option<u64>,
        total: i64,
        current: i64,
    },
    FindControlState {
        #[serde(default)]
        listener: Option<u64>,
        state: i32,
        #[serde(default)]
        page_idx: Option<i64>,
        #[serde(default)]
        selected: Option<RawSelection>,
    },
}

impl EngineEvent {
    /// Validates a raw callback.
    ///
    /// Find events without a listener are attributed to `default_listener`.
    /// Malformed payloads yield `None`.
    #[must_use]
    pub fn from_raw(raw: RawEngineEvent, default_listener: Option<ListenerId>) -> Option<Self> {
        let listener_or_default =
            |listener: Option<u64>| listener.map(ListenerId).or(default_listener);

        match raw {
            RawEngineEvent::Loaded { total_pages } => match u32::try_from(total_pages) {
                Ok(0) => Some(EngineEvent::LoadFailed(LoadError::EmptyDocument)),
                Ok(total_pages) => Some(EngineEvent::Loaded { total_pages }),
                Err(_) => None,
            },
            RawEngineEvent::LoadFailed { detail } => {
                Some(EngineEvent::LoadFailed(LoadError::from_message(&detail)))
            }
            RawEngineEvent::MatchesCount {
                listener,
                total,
                current,
            } => Some(EngineEvent::MatchesCount {
                listener: listener_or_default(listener)?,
                total: u32::try_from(total).ok()?,
                current: u32::try_from(current).ok()?,
            }),
            RawEngineEvent::FindControlState {
                listener,
                state,
                page_idx,
                selected,
            } => {
                let page_index = page_idx
                    .or_else(|| selected.and_then(|s| s.page_idx))
                    .and_then(|idx| u32::try_from(idx).ok());
                Some(EngineEvent::FindControlState {
                    listener: listener_or_default(listener)?,
                    state: FindState::from_code(state)?,
                    page_index,
                })
            }
        }
    }
}

/// Commands the viewer sends to the rendering engine.
///
/// Every call is fire-and-forget; results come back as [`EngineEvent`]s.
pub trait RenderingEngine {
    /// Starts loading a document. Completion is reported with
    /// [`EngineEvent::Loaded`] or [`EngineEvent::LoadFailed`].
    fn load_document(&mut self, source: DocumentSource);

    /// Advisory page/zoom/rotation update.
    fn set_view_state(&mut self, view: NavigationState);

    /// Translates the rendered surface, without animation.
    fn set_pan_transform(&mut self, offset: Vector);

    fn dispatch_find(&mut self, request: FindRequest);

    fn subscribe_find_events(&mut self) -> ListenerId;

    fn unsubscribe_find_events(&mut self, listener: ListenerId);
}

/// One call received by a [`HeadlessEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    LoadDocument(DocumentSource),
    SetViewState(NavigationState),
    SetPanTransform(Vector),
    DispatchFind(FindRequest),
    Subscribe(ListenerId),
    Unsubscribe(ListenerId),
}

/// Engine without a renderer that records every call.
///
/// Used by the trace replay binary and by tests.
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    calls: Vec<EngineCall>,
    listeners: Vec<ListenerId>,
    next_listener: u64,
}

impl HeadlessEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// Returns and forgets the calls recorded so far.
    pub fn take_calls(&mut self) -> Vec<EngineCall> {
        std::mem::take(&mut self.calls)
    }

    #[must_use]
    pub fn active_listeners(&self) -> &[ListenerId] {
        &self.listeners
    }

    #[must_use]
    pub fn last_find(&self) -> Option<&FindRequest> {
        self.calls.iter().rev().find_map(|call| match call {
            EngineCall::DispatchFind(request) => Some(request),
            _ => None,
        })
    }

    #[must_use]
    pub fn last_view_state(&self) -> Option<NavigationState> {
        self.calls.iter().rev().find_map(|call| match call {
            EngineCall::SetViewState(view) => Some(*view),
            _ => None,
        })
    }
}

impl RenderingEngine for HeadlessEngine {
    fn load_document(&mut self, source: DocumentSource) {
        self.calls.push(EngineCall::LoadDocument(source));
    }

    fn set_view_state(&mut self, view: NavigationState) {
        self.calls.push(EngineCall::SetViewState(view));
    }

    fn set_pan_transform(&mut self, offset: Vector) {
        self.calls.push(EngineCall::SetPanTransform(offset));
    }

    fn dispatch_find(&mut self, request: FindRequest) {
        self.calls.push(EngineCall::DispatchFind(request));
    }

    fn subscribe_find_events(&mut self) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId(self.next_listener);
        self.listeners.push(id);
        self.calls.push(EngineCall::Subscribe(id));
        id
    }

    fn unsubscribe_find_events(&mut self, listener: ListenerId) {
        self.listeners.retain(|id| *id != listener);
        self.calls.push(EngineCall::Unsubscribe(listener));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_is_case_insensitive_phrase_over_document() {
        let request = FindRequest::search("invariant");
        assert!(!request.case_sensitive);
        assert!(request.phrase_search);
        assert!(request.highlight_all);
        assert!(request.entire_document);
        assert!(!request.again);
    }

    #[test]
    fn repeat_request_sets_direction() {
        let next = FindRequest::repeat("x", false);
        let previous = FindRequest::repeat("x", true);
        assert!(next.again && !next.find_previous);
        assert!(previous.again && previous.find_previous);
    }

    #[test]
    fn clear_request_is_empty_and_not_highlighting() {
        let request = FindRequest::clear();
        assert!(request.query.is_empty());
        assert!(!request.highlight_all);
    }

    #[test]
    fn find_state_codes() {
        assert_eq!(FindState::from_code(0), Some(FindState::Found));
        assert_eq!(FindState::from_code(1), Some(FindState::NotFound));
        assert_eq!(FindState::from_code(2), Some(FindState::Wrapped));
        assert_eq!(FindState::from_code(3), Some(FindState::Pending));
        assert_eq!(FindState::from_code(9), None);
    }

    #[test]
    fn page_index_is_read_from_either_shape() {
        let flat = RawEngineEvent::FindControlState {
            listener: Some(1),
            state: 0,
            page_idx: Some(4),
            selected: None,
        };
        let nested = RawEngineEvent::FindControlState {
            listener: Some(1),
            state: 0,
            page_idx: None,
            selected: Some(RawSelection { page_idx: Some(4) }),
        };
        for raw in [flat, nested] {
            assert_eq!(
                EngineEvent::from_raw(raw, None),
                Some(EngineEvent::FindControlState {
                    listener: ListenerId(1),
                    state: FindState::Found,
                    page_index: Some(4),
                })
            );
        }
    }

    #[test]
    fn missing_listener_uses_default() {
        let raw = RawEngineEvent::MatchesCount {
            listener: None,
            total: 3,
            current: 1,
        };
        assert_eq!(EngineEvent::from_raw(raw.clone(), None), None);
        assert_eq!(
            EngineEvent::from_raw(raw, Some(ListenerId(7))),
            Some(EngineEvent::MatchesCount {
                listener: ListenerId(7),
                total: 3,
                current: 1,
            })
        );
    }

    #[test]
    fn malformed_payloads_are_rejected() {
        let negative = RawEngineEvent::MatchesCount {
            listener: Some(1),
            total: -1,
            current: 0,
        };
        let unknown_state = RawEngineEvent::FindControlState {
            listener: Some(1),
            state: 42,
            page_idx: None,
            selected: None,
        };
        assert_eq!(EngineEvent::from_raw(negative, None), None);
        assert_eq!(EngineEvent::from_raw(unknown_state, None), None);
        assert_eq!(
            EngineEvent::from_raw(RawEngineEvent::Loaded { total_pages: -3 }, None),
            None
        );
    }

    #[test]
    fn empty_document_is_a_load_failure() {
        assert_eq!(
            EngineEvent::from_raw(RawEngineEvent::Loaded { total_pages: 0 }, None),
            Some(EngineEvent::LoadFailed(LoadError::EmptyDocument))
        );
    }

    #[test]
    fn unsupported_type_failure_maps_to_its_error() {
        let raw = RawEngineEvent::LoadFailed {
            detail: "not a PDF file".into(),
        };
        assert_eq!(
            EngineEvent::from_raw(raw, None),
            Some(EngineEvent::LoadFailed(LoadError::UnsupportedFormat(
                "not a PDF file".into()
            )))
        );
    }

    #[test]
    fn raw_events_deserialize_from_tagged_toml() {
        let raw: RawEngineEvent =
            toml::from_str("type = \"find-control-state\"\nstate = 1\n").expect("valid event");
        assert_eq!(
            raw,
            RawEngineEvent::FindControlState {
                listener: None,
                state: 1,
                page_idx: None,
                selected: None,
            }
        );
    }

    #[test]
    fn headless_engine_tracks_listeners() {
        let mut engine = HeadlessEngine::new();
        let first = engine.subscribe_find_events();
        let second = engine.subscribe_find_events();
        assert_ne!(first, second);

        engine.unsubscribe_find_events(first);
        assert_eq!(engine.active_listeners(), &[second]);
        assert_eq!(engine.calls().len(), 3);
    }
}
