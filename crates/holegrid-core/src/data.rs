//! Layout data model
//!
//! Holes are never collected into a document. They are produced while the
//! layout is traversed and handed straight to a drawing surface.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in drawing-space units
///
/// Origin is the top-left corner of the work surface; y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position. Both components must be non-negative.
    pub fn new(x: i32, y: i32) -> Self {
        debug_assert!(
            x >= 0 && y >= 0,
            "position must be non-negative, got ({x}, {y})"
        );
        Self { x, y }
    }

    /// Position shifted by `dx`, `dy`.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A hole to drill: a center and a radius, both in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hole {
    pub center: Position,
    pub radius: i32,
}

impl Hole {
    pub fn new(center: Position, radius: i32) -> Self {
        Self { center, radius }
    }
}
