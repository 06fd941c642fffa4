// SPDX-License-Identifier: MPL-2.0
//! User interface components and state management.
//!
//! This module organizes all UI-related code following a component-based architecture
//! with the Elm-style "state down, messages up" pattern.
//!
//! # Viewer
//!
//! - [`viewer`] - Document viewer orchestrating gestures, navigation, search and feedback
//!
//! # Shared Infrastructure
//!
//! - [`input`] - Pointer events and per-contact tracking
//! - [`gestures`] - Tap, swipe, long-press, pan and pinch recognition
//! - [`timers`] - Logical-time registry for every delayed callback
//! - [`notifications`] - Localizable user-facing messages

pub mod gestures;
pub mod input;
pub mod notifications;
pub mod timers;
pub mod viewer;
