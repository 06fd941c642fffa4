// SPDX-License-Identifier: MPL-2.0
//! Viewer domain types.
//!
//! Value objects for the navigation state that are independent of any
//! rendering engine or presentation layer.

pub mod newtypes;

pub use newtypes::{RotationAngle, ZoomBounds, ZoomLevel};
