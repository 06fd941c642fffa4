// SPDX-License-Identifier: MPL-2.0
//! Nested TEA sub-components for the viewer.
//!
//! Each sub-component owns its state and exposes a `handle()` (or small
//! set of show/hide calls) returning effects for the orchestrator to apply.
//!
//! ```text
//! component.rs (orchestrator)
//!     ├── navigation - Page, zoom, rotation, action debounce
//!     ├── pan        - Pan-mode flag and offset
//!     ├── search     - Query, debounced search, find results
//!     └── feedback   - Auto-hiding notification, glyph, overlays, alert
//! ```

pub mod feedback;
pub mod navigation;
pub mod pan;
pub mod search;
