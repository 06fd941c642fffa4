// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core value objects with ZERO external dependencies.
//!
//! This module contains pure domain types and the rules that keep them valid.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`geometry`]: Screen-space points and vectors ([`Point`](geometry::Point),
//!   [`Vector`](geometry::Vector))
//! - [`time`]: Logical event time ([`Timestamp`](time::Timestamp))
//! - [`viewer`]: Viewer value objects ([`ZoomLevel`](viewer::ZoomLevel),
//!   [`ZoomBounds`](viewer::ZoomBounds), [`RotationAngle`](viewer::RotationAngle))

pub mod geometry;
pub mod time;
pub mod viewer;
