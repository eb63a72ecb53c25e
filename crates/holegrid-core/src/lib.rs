//! # Holegrid Core
//!
//! Core types and contracts shared by every Holegrid crate:
//! the drawing-space data model, resolution and unit conversion, and the
//! [`DrawingSurface`] interface that decouples where holes go from how a
//! hole is realized.

pub mod data;
pub mod error;
pub mod surface;
pub mod units;

pub use data::{Hole, Position};
pub use error::{CoreError, CoreResult, SurfaceError, SurfaceResult, SurfaceStage};
pub use surface::{DrawingSurface, HoleRecorder, SurfaceGuard};
pub use units::{Resolution, DEFAULT_DPI, MAX_DPI, MM_PER_INCH};
