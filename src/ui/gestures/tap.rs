// SPDX-License-Identifier: MPL-2.0
//! Tap pairing into double taps.

use crate::domain::geometry::Point;
use crate::domain::time::Timestamp;
use std::time::Duration;

/// The last tap that did not complete a double tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapRecord {
    pub time: Timestamp,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapKind {
    Single,
    Double,
}

/// Pairs consecutive taps that are close in time and space.
#[derive(Debug, Clone, Default)]
pub struct TapDetector {
    last: Option<TapRecord>,
}

impl TapDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a tap at `position`.
    ///
    /// A double tap consumes the stored record, so a third tap starts over.
    pub fn register(
        &mut self,
        time: Timestamp,
        position: Point,
        max_delay: Duration,
        max_distance: f32,
    ) -> TapKind {
        let pairs_with_last = self.last.is_some_and(|last| {
            time.saturating_duration_since(last.time) < max_delay
                && last.position.distance_to(position) < max_distance
        });

        if pairs_with_last {
            self.last = None;
            TapKind::Double
        } else {
            self.last = Some(TapRecord { time, position });
            TapKind::Single
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<TapRecord> {
        self.last
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}
