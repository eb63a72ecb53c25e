//! Unit conversion utilities
//!
//! Layout happens in integer drawing-space units. A fixed number of those
//! units (the resolution, in dots per inch) make up one physical inch, and
//! the toolpath backend works in inches.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Nominal resolution used when nothing else is configured
pub const DEFAULT_DPI: i32 = 72;

/// Largest accepted resolution
///
/// Templates span at most 120 base units, so every layout coordinate stays
/// far inside `i32` at this resolution.
pub const MAX_DPI: i32 = 1 << 20;

/// Drawing-space resolution
///
/// Immutable once built; threaded explicitly into the converter callers and
/// the layout engine instead of living in a global.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Resolution {
    dpi: i32,
}

impl Resolution {
    /// Create a resolution of `dpi` drawing units per inch.
    pub fn new(dpi: i32) -> CoreResult<Self> {
        if !(1..=MAX_DPI).contains(&dpi) {
            return Err(CoreError::InvalidResolution { dpi });
        }
        Ok(Self { dpi })
    }

    /// Drawing units per inch
    pub fn dpi(&self) -> i32 {
        self.dpi
    }

    /// One eighth of an inch in drawing units, rounded up.
    ///
    /// Every spacing in the layout is a multiple of this.
    pub fn base_unit(&self) -> i32 {
        (self.dpi + 7) / 8
    }

    /// Convert a drawing-space coordinate to inches.
    ///
    /// Total over all integers; negative input gives negative output.
    pub fn to_inches(&self, units: i32) -> f64 {
        f64::from(units) / f64::from(self.dpi)
    }

    /// Convert inches back to (fractional) drawing units.
    pub fn to_units(&self, inches: f64) -> f64 {
        inches * f64::from(self.dpi)
    }

    /// Convert a drawing-space coordinate to millimeters.
    pub fn to_millimeters(&self, units: i32) -> f64 {
        self.to_inches(units) * MM_PER_INCH
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self { dpi: DEFAULT_DPI }
    }
}

impl TryFrom<i32> for Resolution {
    type Error = CoreError;

    fn try_from(dpi: i32) -> Result<Self, Self::Error> {
        Self::new(dpi)
    }
}

impl From<Resolution> for i32 {
    fn from(resolution: Resolution) -> Self {
        resolution.dpi
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dpi", self.dpi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_unit() {
        let res = Resolution::default();
        assert_eq!(res.dpi(), 72);
        assert_eq!(res.base_unit(), 9);
    }

    #[test]
    fn test_base_unit_rounds_up() {
        assert_eq!(Resolution::new(100).unwrap().base_unit(), 13);
        assert_eq!(Resolution::new(8).unwrap().base_unit(), 1);
        assert_eq!(Resolution::new(1).unwrap().base_unit(), 1);
    }

    #[test]
    fn test_to_inches() {
        let res = Resolution::default();
        assert_eq!(res.to_inches(72), 1.0);
        assert_eq!(res.to_inches(9), 0.125);
        assert_eq!(res.to_inches(0), 0.0);
        assert_eq!(res.to_inches(-36), -0.5);
    }

    #[test]
    fn test_to_millimeters() {
        let res = Resolution::default();
        assert!((res.to_millimeters(72) - 25.4).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_resolution() {
        assert!(matches!(
            Resolution::new(0),
            Err(CoreError::InvalidResolution { dpi: 0 })
        ));
        assert!(Resolution::new(-72).is_err());
    }

    #[test]
    fn test_resolution_upper_bound() {
        assert!(Resolution::new(MAX_DPI).is_ok());
        assert_eq!(Resolution::new(MAX_DPI).unwrap().base_unit(), 131_072);
        assert!(matches!(
            Resolution::new(MAX_DPI + 1),
            Err(CoreError::InvalidResolution { .. })
        ));
        assert!(Resolution::new(200_000_000).is_err());
        assert!(Resolution::new(i32::MAX).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Resolution::default().to_string(), "72 dpi");
    }
}
