// SPDX-License-Identifier: MPL-2.0
//! Pan mode flag and accumulated offset.

use crate::domain::geometry::Vector;

/// Pan sub-component state.
///
/// The offset is only meaningful while pan mode is active and is exactly zero
/// whenever it is not.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct State {
    active: bool,
    offset: Vector,
}

impl State {
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.offset = Vector::ZERO;
    }

    /// Accumulates `delta`, returning the new offset. Ignored while inactive.
    pub fn apply(&mut self, delta: Vector) -> Option<Vector> {
        if !self.active {
            return None;
        }
        self.offset += delta;
        Some(self.offset)
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }
}
