// SPDX-License-Identifier: MPL-2.0
//! Headless replay of recorded input traces.
//!
//! A trace is a TOML file with one `[[step]]` per input, each carrying the
//! logical time `at` (ms) and a tagged `event`:
//!
//! ```toml
//! [[step]]
//! at = 0
//! event = { type = "open", path = "thesis.pdf" }
//!
//! [[step]]
//! at = 40
//! event = { type = "engine", event = { type = "loaded", total_pages = 12 } }
//!
//! [[step]]
//! at = 1000
//! event = { type = "pointer", contact = 1, phase = "down", x = 300.0, y = 300.0 }
//! ```
//!
//! Steps run against a [`HeadlessEngine`]; every feedback change is rendered
//! through [`I18n`] into the report.

use crate::config::ViewerSettings;
use crate::domain::geometry::Point;
use crate::domain::time::Timestamp;
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::ui::gestures::Gesture;
use crate::ui::input::{ContactId, Phase, PointerInput, PointerKind};
use crate::ui::viewer::subcomponents::feedback::ShowCounts;
use crate::ui::viewer::{
    DocumentSource, EngineEvent, HeadlessEngine, Message, NavigationState, RawEngineEvent,
    SearchState, SelectedFile, Viewer,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A recorded input session.
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Logical time in milliseconds.
    pub at: u64,
    pub event: TraceEvent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TraceEvent {
    Open {
        path: PathBuf,
    },
    /// A picked file. The payload is replaced by `size` zero bytes.
    File {
        name: String,
        mime: String,
        #[serde(default)]
        size: usize,
    },
    Pointer {
        contact: u32,
        phase: Phase,
        x: f32,
        y: f32,
        #[serde(default)]
        kind: PointerKind,
    },
    Tick,
    NextPage,
    PreviousPage,
    ZoomIn,
    ZoomOut,
    Rotate,
    TogglePanMode,
    Query {
        text: String,
    },
    Submit,
    FindNext,
    FindPrevious,
    ClearSearch,
    ToggleSearchPanel,
    DismissAlert,
    Engine {
        event: RawEngineEvent,
    },
}

impl Trace {
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let trace: Self = toml::from_str(content).map_err(|err| Error::Trace(err.to_string()))?;
        if trace.steps.windows(2).any(|pair| pair[1].at < pair[0].at) {
            return Err(Error::Trace("steps must be ordered by time".to_string()));
        }
        Ok(trace)
    }
}

/// Outcome of a replay.
#[derive(Debug, Clone)]
pub struct ReplayReport {
    /// Localized feedback, one line per change, prefixed by its time.
    pub lines: Vec<String>,
    pub gestures: Vec<Gesture>,
    pub navigation: NavigationState,
    pub search: SearchState,
    pub has_seen_tutorial: bool,
}

impl ReplayReport {
    /// Localized summary of the final navigation and search state.
    pub fn summary(&self, i18n: &I18n) -> Vec<String> {
        let page = self.navigation.page.to_string();
        let total = self.navigation.total_pages.to_string();
        let zoom = self.navigation.zoom.as_percent().to_string();
        let degrees = self.navigation.rotation.degrees().to_string();
        let mut summary = vec![i18n.tr_with_args(
            "replay-final-state",
            &[
                ("page", &page),
                ("total", &total),
                ("zoom", &zoom),
                ("degrees", &degrees),
            ],
        )];
        if self.search.is_active {
            let matches = self.search.total_matches.to_string();
            summary.push(i18n.tr_with_args(
                "replay-search-state",
                &[("query", &self.search.query_text), ("total", &matches)],
            ));
        }
        summary
    }
}

// What the report has already printed.
#[derive(Debug, Default, PartialEq)]
struct Shown {
    counts: ShowCounts,
    tutorial: bool,
}

/// Replays `trace` through a fresh viewer.
pub fn run(
    trace: &Trace,
    settings: ViewerSettings,
    i18n: &I18n,
    has_seen_tutorial: bool,
) -> ReplayReport {
    let mut viewer = Viewer::with_engine(settings, HeadlessEngine::new());
    viewer.set_has_seen_tutorial(has_seen_tutorial);

    let mut lines = Vec::new();
    let mut gestures = Vec::new();
    let mut shown = Shown::default();

    for step in &trace.steps {
        let now = Timestamp::from_millis(step.at);
        // Fire due timers first: a debounced search may subscribe the
        // listener this step's engine event belongs to.
        let mut recognized = viewer.update(Message::Tick, now);
        match to_message(&step.event, &viewer) {
            Some(message) => recognized.extend(viewer.update(message, now)),
            None => {
                log::debug!("skipping invalid trace event at {} ms: {:?}", step.at, step.event);
            }
        }
        for gesture in recognized {
            lines.push(stamp(
                step.at,
                i18n.tr_with_args("replay-gesture", &[("gesture", &format!("{gesture:?}"))]),
            ));
            gestures.push(gesture);
        }
        report_changes(&viewer, i18n, step.at, &mut shown, &mut lines);
    }

    // Let pending timers expire so the final state is settled.
    while let Some(deadline) = viewer.next_deadline() {
        viewer.update(Message::Tick, deadline);
        report_changes(&viewer, i18n, deadline.as_millis(), &mut shown, &mut lines);
    }

    let report = ReplayReport {
        lines,
        gestures,
        navigation: viewer.navigation(),
        search: viewer.search_state().clone(),
        has_seen_tutorial: viewer.has_seen_tutorial(),
    };
    viewer.teardown();
    report
}

fn to_message(event: &TraceEvent, viewer: &Viewer<HeadlessEngine>) -> Option<Message> {
    let message = match event {
        TraceEvent::Open { path } => Message::OpenDocument(DocumentSource::Path(path.clone())),
        TraceEvent::File { name, mime, size } => Message::FileSelected(SelectedFile {
            name: name.clone(),
            mime: mime.clone(),
            bytes: vec![0; *size],
        }),
        TraceEvent::Pointer {
            contact,
            phase,
            x,
            y,
            kind,
        } => Message::Pointer(
            PointerInput::new(ContactId(*contact), *phase, Point::new(*x, *y)).with_kind(*kind),
        ),
        TraceEvent::Tick => Message::Tick,
        TraceEvent::NextPage => Message::NextPage,
        TraceEvent::PreviousPage => Message::PreviousPage,
        TraceEvent::ZoomIn => Message::ZoomIn,
        TraceEvent::ZoomOut => Message::ZoomOut,
        TraceEvent::Rotate => Message::Rotate,
        TraceEvent::TogglePanMode => Message::TogglePanMode,
        TraceEvent::Query { text } => Message::SearchQueryChanged(text.clone()),
        TraceEvent::Submit => Message::SubmitSearch,
        TraceEvent::FindNext => Message::FindNext,
        TraceEvent::FindPrevious => Message::FindPrevious,
        TraceEvent::ClearSearch => Message::ClearSearch,
        TraceEvent::ToggleSearchPanel => Message::ToggleSearchPanel,
        TraceEvent::DismissAlert => Message::DismissAlert,
        TraceEvent::Engine { event } => {
            // Recorded find events usually omit the listener; they belong to
            // the search running at that point.
            let event = EngineEvent::from_raw(event.clone(), viewer.find_listener())?;
            Message::Engine(event)
        }
    };
    Some(message)
}

fn report_changes(
    viewer: &Viewer<HeadlessEngine>,
    i18n: &I18n,
    at: u64,
    shown: &mut Shown,
    lines: &mut Vec<String>,
) {
    let feedback = viewer.feedback();
    let current = Shown {
        counts: feedback.show_counts(),
        tutorial: feedback.is_tutorial_visible(),
    };
    if current == *shown {
        return;
    }

    if let Some(glyph) = feedback.glyph().filter(|_| current.counts.glyph != shown.counts.glyph) {
        lines.push(stamp(at, glyph.symbol().to_string()));
    }
    if let Some(page) = feedback
        .page_overlay()
        .filter(|_| current.counts.page_overlay != shown.counts.page_overlay)
    {
        let page = page.to_string();
        lines.push(stamp(at, i18n.tr_with_args("replay-page-overlay", &[("page", &page)])));
    }
    if let Some(notification) = feedback
        .notification()
        .filter(|_| current.counts.notification != shown.counts.notification)
    {
        lines.push(stamp(at, i18n.translate(notification)));
    }
    if let Some(alert) = feedback
        .alert()
        .filter(|_| current.counts.alert != shown.counts.alert)
    {
        let message = i18n.translate(alert);
        lines.push(stamp(at, i18n.tr_with_args("replay-alert", &[("message", &message)])));
    }
    if current.tutorial && !shown.tutorial {
        let text = i18n.tr("tutorial-text");
        lines.push(stamp(at, i18n.tr_with_args("replay-tutorial", &[("text", &text)])));
    }

    *shown = current;
}

fn stamp(at: u64, text: String) -> String {
    format!("[{at:>7} ms] {text}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    const SWIPE_TRACE: &str = r#"
        [[step]]
        at = 0
        event = { type = "open", path = "paper.pdf" }

        [[step]]
        at = 20
        event = { type = "engine", event = { type = "loaded", total_pages = 3 } }

        [[step]]
        at = 1000
        event = { type = "pointer", contact = 1, phase = "down", x = 300.0, y = 300.0 }

        [[step]]
        at = 1075
        event = { type = "pointer", contact = 1, phase = "move", x = 200.0, y = 300.0 }

        [[step]]
        at = 1150
        event = { type = "pointer", contact = 1, phase = "up", x = 100.0, y = 300.0 }
    "#;

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    #[test]
    fn swipe_trace_turns_page() {
        let trace = Trace::parse(SWIPE_TRACE).expect("valid trace");
        let report = run(&trace, ViewerSettings::default(), &english(), true);

        assert_eq!(report.navigation.page, 2);
        assert_eq!(report.navigation.total_pages, 3);
        assert_eq!(report.gestures.len(), 1);
        assert!(report.lines.iter().any(|line| line.ends_with("Page 2")));
    }

    #[test]
    fn tutorial_is_reported_once() {
        let trace = Trace::parse(SWIPE_TRACE).expect("valid trace");
        let report = run(&trace, ViewerSettings::default(), &english(), false);
        assert!(report.has_seen_tutorial);
        let tutorial_lines = report
            .lines
            .iter()
            .filter(|line| line.contains("Tutorial:"))
            .count();
        assert_eq!(tutorial_lines, 1);
    }

    #[test]
    fn repeated_boundary_hits_are_each_reported() {
        let trace = r#"
            [[step]]
            at = 0
            event = { type = "open", path = "memo.pdf" }

            [[step]]
            at = 10
            event = { type = "engine", event = { type = "loaded", total_pages = 1 } }

            [[step]]
            at = 1000
            event = { type = "next-page" }

            [[step]]
            at = 1500
            event = { type = "next-page" }
        "#;
        let trace = Trace::parse(trace).expect("valid trace");
        let report = run(&trace, ViewerSettings::default(), &english(), true);
        let hits = report
            .lines
            .iter()
            .filter(|line| line.ends_with("Already on the last page"))
            .count();
        assert_eq!(hits, 2);
    }

    #[test]
    fn unordered_steps_are_rejected() {
        let trace = r#"
            [[step]]
            at = 10
            event = { type = "tick" }

            [[step]]
            at = 5
            event = { type = "tick" }
        "#;
        assert!(matches!(Trace::parse(trace), Err(Error::Trace(_))));
    }

    #[test]
    fn unknown_event_type_is_a_trace_error() {
        let trace = r#"
            [[step]]
            at = 0
            event = { type = "shake" }
        "#;
        assert!(matches!(Trace::parse(trace), Err(Error::Trace(_))));
    }

    #[test]
    fn load_failure_is_reported_as_alert() {
        let trace = r#"
            [[step]]
            at = 0
            event = { type = "open", path = "broken.pdf" }

            [[step]]
            at = 30
            event = { type = "engine", event = { type = "load-failed", detail = "no pages" } }
        "#;
        let trace = Trace::parse(trace).expect("valid trace");
        let report = run(&trace, ViewerSettings::default(), &english(), true);
        assert_eq!(report.navigation.total_pages, 0);
        assert!(report
            .lines
            .iter()
            .any(|line| line.contains("Alert: The document has no pages")));
    }

    #[test]
    fn find_events_default_to_current_search() {
        let trace = r#"
            [[step]]
            at = 0
            event = { type = "open", path = "paper.pdf" }

            [[step]]
            at = 10
            event = { type = "engine", event = { type = "loaded", total_pages = 8 } }

            [[step]]
            at = 100
            event = { type = "query", text = "invariant" }

            [[step]]
            at = 200
            event = { type = "submit" }

            [[step]]
            at = 300
            event = { type = "engine", event = { type = "matches-count", total = 3, current = 1 } }

            [[step]]
            at = 310
            event = { type = "engine", event = { type = "find-control-state", state = 0, selected = { page_idx = 4 } } }
        "#;
        let trace = Trace::parse(trace).expect("valid trace");
        let report = run(&trace, ViewerSettings::default(), &english(), true);
        assert!(report.search.has_results);
        assert_eq!(report.search.total_matches, 3);
        assert_eq!(report.navigation.page, 5);
    }

    #[test]
    fn debounced_search_subscribes_before_same_step_engine_event() {
        let trace = r#"
            [[step]]
            at = 0
            event = { type = "open", path = "paper.pdf" }

            [[step]]
            at = 10
            event = { type = "engine", event = { type = "loaded", total_pages = 8 } }

            [[step]]
            at = 100
            event = { type = "query", text = "lemma" }

            [[step]]
            at = 1700
            event = { type = "engine", event = { type = "matches-count", total = 2, current = 1 } }
        "#;
        let trace = Trace::parse(trace).expect("valid trace");
        let report = run(&trace, ViewerSettings::default(), &english(), true);
        assert!(report.search.has_results);
        assert_eq!(report.search.total_matches, 2);
    }
}
