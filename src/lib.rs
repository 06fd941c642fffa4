// SPDX-License-Identifier: MPL-2.0
//! `gesture_reader` is the core of a touch-driven document viewer.
//!
//! It turns raw pointer events into gestures, gestures into page, zoom,
//! rotation and pan changes, drives a debounced text search against an
//! external rendering engine, and manages short-lived feedback. All timing
//! is logical: the host passes a millisecond timestamp with every event.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod ui;

#[cfg(test)]
mod test_utils;
