// SPDX-License-Identifier: MPL-2.0
//! Gesture recognition.
//!
//! [`GestureRecognizer`] turns the pointer stream into discrete [`Gesture`]s.
//! Single-contact classification (tap, double tap, long press, swipe, pan) and
//! two-contact classification (pan, pinch) live in their own submodules.

mod recognizer;
pub mod swipe;
pub mod tap;
pub mod two_finger;

pub use recognizer::GestureRecognizer;

use crate::domain::geometry::{Point, Vector};

/// Dominant direction of a swipe, in screen space (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    Left,
    Right,
    Up,
    Down,
}

/// Whether two contacts moved apart or together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinchDirection {
    /// Contacts moved together.
    In,
    /// Contacts moved apart.
    Out,
}

/// Outcome of one pointer event or timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// A short stationary press. Not bound to any action on its own.
    Tap(Point),
    DoubleTap(Point),
    LongPress(Point),
    Swipe(SwipeDirection),
    /// Single-contact drag while pan mode is active, relative to the last delta.
    PanDelta(Vector),
    /// Movement of the two-contact center, relative to the last delta.
    TwoFingerPanDelta(Vector),
    /// A stationary tap while pan mode is active.
    PanModeToggled,
    Pinch(PinchDirection),
}
