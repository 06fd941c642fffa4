// SPDX-License-Identifier: MPL-2.0
//! Raw pointer input, unified across touch, mouse and pen.

mod pointer;

pub use pointer::{
    ContactId, InvalidGesture, NormalizedEvent, Phase, PointerInput, PointerKind, PointerSession,
    PointerTracker,
};
