// SPDX-License-Identifier: MPL-2.0
//! Navigation sub-component: page, zoom, rotation and pan mode.
//!
//! Page, zoom, rotation and pan-mode toggles share one action debounce, whatever
//! triggered them. Entering pan mode from a gesture, exiting it on timeout,
//! accumulating pan offsets and search-driven page jumps are not debounced.

use super::pan;
use crate::config::NavigationSettings;
use crate::domain::geometry::Vector;
use crate::domain::time::Timestamp;
use crate::domain::viewer::{RotationAngle, ZoomLevel};

/// What the renderer needs to draw the current page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    /// 1-based, 0 while no document is loaded.
    pub page: u32,
    pub total_pages: u32,
    pub zoom: ZoomLevel,
    pub rotation: RotationAngle,
}

/// Which end of the document was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    First,
    Last,
}

/// Which zoom bound was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomLimit {
    Min,
    Max,
}

/// Navigation sub-component state.
#[derive(Debug, Clone)]
pub struct State {
    view: NavigationState,
    pan: pan::State,
    settings: NavigationSettings,
    last_action: Option<Timestamp>,
}

/// Messages for the navigation sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    NextPage,
    PreviousPage,
    ZoomIn,
    ZoomOut,
    Rotate,
    TogglePanMode,
    /// Enters pan mode if it is off (long press, two-finger drag).
    EnterPanMode,
    /// Leaves pan mode if it is on (inactivity timeout).
    ExitPanMode,
    ApplyPanOffset(Vector),
    /// Shows the given 1-based page (search results).
    JumpToPage(u32),
}

/// Effects produced by navigation changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    None,
    /// Dropped by the action debounce.
    Debounced,
    /// Dropped because no document is loaded.
    NoDocument,
    PageChanged(u32),
    BoundaryReached(Boundary),
    ZoomChanged(ZoomLevel),
    ZoomLimitReached(ZoomLimit),
    Rotated(RotationAngle),
    PanModeEntered,
    PanModeExited,
    /// Accumulated pan offset after a delta.
    PanMoved(Vector),
}

impl State {
    #[must_use]
    pub fn new(settings: NavigationSettings) -> Self {
        Self {
            view: NavigationState {
                page: 0,
                total_pages: 0,
                zoom: settings.zoom_bounds.clamp(settings.default_zoom),
                rotation: RotationAngle::ZERO,
            },
            pan: pan::State::default(),
            settings,
            last_action: None,
        }
    }

    /// Resets the view for a freshly loaded document.
    pub fn load(&mut self, total_pages: u32) {
        *self = Self::new(self.settings);
        self.view.total_pages = total_pages;
        self.view.page = u32::from(total_pages > 0);
    }

    /// Forgets the current document.
    pub fn unload(&mut self) {
        *self = Self::new(self.settings);
    }

    /// Handle a navigation message at logical time `now`.
    pub fn handle(&mut self, msg: Message, now: Timestamp) -> Effect {
        let gated = matches!(
            msg,
            Message::NextPage
                | Message::PreviousPage
                | Message::ZoomIn
                | Message::ZoomOut
                | Message::Rotate
                | Message::TogglePanMode
        );

        if gated {
            if !self.has_document() {
                return Effect::NoDocument;
            }
            if self.is_debounced(now) {
                return Effect::Debounced;
            }
            self.last_action = Some(now);
        }

        match msg {
            Message::NextPage => {
                if self.view.page >= self.view.total_pages {
                    Effect::BoundaryReached(Boundary::Last)
                } else {
                    self.view.page += 1;
                    Effect::PageChanged(self.view.page)
                }
            }
            Message::PreviousPage => {
                if self.view.page <= 1 {
                    Effect::BoundaryReached(Boundary::First)
                } else {
                    self.view.page -= 1;
                    Effect::PageChanged(self.view.page)
                }
            }
            Message::ZoomIn => self.scale_zoom(self.settings.zoom_in_factor, ZoomLimit::Max),
            Message::ZoomOut => self.scale_zoom(self.settings.zoom_out_factor, ZoomLimit::Min),
            Message::Rotate => {
                self.view.rotation = self.view.rotation.rotate_clockwise();
                Effect::Rotated(self.view.rotation)
            }
            Message::TogglePanMode => {
                if self.pan.is_active() {
                    self.pan.deactivate();
                    Effect::PanModeExited
                } else {
                    self.pan.activate();
                    Effect::PanModeEntered
                }
            }
            Message::EnterPanMode => {
                if !self.has_document() {
                    Effect::NoDocument
                } else if self.pan.is_active() {
                    Effect::None
                } else {
                    self.pan.activate();
                    Effect::PanModeEntered
                }
            }
            Message::ExitPanMode => {
                if self.pan.is_active() {
                    self.pan.deactivate();
                    Effect::PanModeExited
                } else {
                    Effect::None
                }
            }
            Message::ApplyPanOffset(_) if !self.has_document() => Effect::NoDocument,
            Message::ApplyPanOffset(delta) => match self.pan.apply(delta) {
                Some(offset) => Effect::PanMoved(offset),
                None => Effect::None,
            },
            Message::JumpToPage(page) => {
                if !self.has_document() {
                    return Effect::NoDocument;
                }
                let page = page.clamp(1, self.view.total_pages);
                if page == self.view.page {
                    Effect::None
                } else {
                    self.view.page = page;
                    Effect::PageChanged(page)
                }
            }
        }
    }

    fn is_debounced(&self, now: Timestamp) -> bool {
        self.last_action
            .is_some_and(|last| now.saturating_duration_since(last) < self.settings.action_debounce)
    }

    fn scale_zoom(&mut self, factor: f32, limit: ZoomLimit) -> Effect {
        let bounds = self.settings.zoom_bounds;
        let zoomed = self.view.zoom.scaled(factor, bounds);
        if zoomed == self.view.zoom {
            return Effect::ZoomLimitReached(limit);
        }
        self.view.zoom = zoomed;
        Effect::ZoomChanged(zoomed)
    }

    #[must_use]
    pub fn view(&self) -> NavigationState {
        self.view
    }

    #[must_use]
    pub fn has_document(&self) -> bool {
        self.view.total_pages > 0
    }

    #[must_use]
    pub fn is_pan_mode_active(&self) -> bool {
        self.pan.is_active()
    }

    #[must_use]
    pub fn pan_offset(&self) -> Vector {
        self.pan.offset()
    }
}
