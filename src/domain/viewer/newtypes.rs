// SPDX-License-Identifier: MPL-2.0
//! Viewer newtypes.
//!
//! This module provides type-safe wrappers for navigation values,
//! ensuring they are always within valid ranges.

// =============================================================================
// ZoomBounds
// =============================================================================

/// Smallest zoom bound accepted, whatever the configuration says.
const ABSOLUTE_MIN_ZOOM: f32 = 0.05;

/// Inclusive zoom range for a viewer.
///
/// Bounds come from configuration, so the constructor repairs inverted or
/// non-positive input instead of rejecting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomBounds {
    min: f32,
    max: f32,
}

impl ZoomBounds {
    /// Creates a zoom range, swapping inverted bounds and raising
    /// non-positive or non-finite ones to a small positive floor.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        let sanitize = |value: f32| {
            if value.is_finite() {
                value.max(ABSOLUTE_MIN_ZOOM)
            } else {
                ABSOLUTE_MIN_ZOOM
            }
        };
        let (a, b) = (sanitize(min), sanitize(max));
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    #[must_use]
    pub fn min(self) -> f32 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f32 {
        self.max
    }

    /// Clamps a raw zoom factor into this range.
    #[must_use]
    pub fn clamp(self, value: f32) -> ZoomLevel {
        if value.is_nan() {
            return ZoomLevel(self.min);
        }
        ZoomLevel(value.clamp(self.min, self.max))
    }

    /// Returns whether `zoom` sits on the upper bound.
    #[must_use]
    pub fn is_max(self, zoom: ZoomLevel) -> bool {
        zoom.0 >= self.max
    }

    /// Returns whether `zoom` sits on the lower bound.
    #[must_use]
    pub fn is_min(self, zoom: ZoomLevel) -> bool {
        zoom.0 <= self.min
    }
}

// =============================================================================
// ZoomLevel
// =============================================================================

/// Zoom factor (1.0 = 100%), only constructible through [`ZoomBounds::clamp`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomLevel(f32);

impl ZoomLevel {
    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Returns the factor as a rounded percentage for display.
    #[must_use]
    pub fn as_percent(self) -> u32 {
        // Factors are bounded well below u32::MAX / 100.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.0 * 100.0).round() as u32;
        percent
    }

    /// Multiplies by `factor` and clamps the result into `bounds`.
    #[must_use]
    pub fn scaled(self, factor: f32, bounds: ZoomBounds) -> Self {
        bounds.clamp(self.0 * factor)
    }
}

// =============================================================================
// RotationAngle
// =============================================================================

/// Rotation angle in 90° increments.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always one of: 0°, 90°, 180°, or 270°.
///
/// # Example
///
/// ```
/// use gesture_reader::domain::viewer::RotationAngle;
///
/// let angle = RotationAngle::default();
/// let full = angle
///     .rotate_clockwise()
///     .rotate_clockwise()
///     .rotate_clockwise()
///     .rotate_clockwise();
/// assert_eq!(full, angle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    /// No rotation (0°).
    pub const ZERO: Self = Self(0);

    /// Creates a rotation, rounding down to a 90° step and wrapping at 360°.
    #[must_use]
    pub fn new(degrees: u16) -> Self {
        Self(((degrees / 90) * 90) % 360)
    }

    /// Returns the angle in degrees.
    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    /// Rotates 90° clockwise.
    #[must_use]
    pub fn rotate_clockwise(self) -> Self {
        Self((self.0 + 90) % 360)
    }

    /// Returns true if width and height swap when rendering (90° and 270°).
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.0 == 90 || self.0 == 270
    }
}
