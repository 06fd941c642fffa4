// SPDX-License-Identifier: MPL-2.0
//! Document viewer driven by touch gestures.
//!
//! [`Viewer`] is the orchestrator. It owns the sub-components in
//! [`subcomponents`] and talks to the renderer through the
//! [`RenderingEngine`] trait.

pub mod component;
pub mod engine;
pub mod subcomponents;

pub use component::{Message, Viewer};
pub use engine::{
    DocumentSource, EngineCall, EngineEvent, FindRequest, FindState, HeadlessEngine, ListenerId,
    RawEngineEvent, RenderingEngine, SelectedFile,
};
pub use subcomponents::navigation::NavigationState;
pub use subcomponents::search::{SearchPhase, SearchState};
