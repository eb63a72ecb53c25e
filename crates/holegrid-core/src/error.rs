//! Error types for the core crate.
//!
//! Covers invalid core configuration and failures raised by drawing
//! surfaces while writing their output.

use crate::units::MAX_DPI;
use std::io;
use thiserror::Error;

/// Errors raised while building core values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Resolution must be a positive number of units per inch, small
    /// enough that layout coordinates fit in an `i32`.
    #[error("Invalid resolution: {dpi} dpi (must be 1 to {max})", max = MAX_DPI)]
    InvalidResolution {
        /// The rejected value.
        dpi: i32,
    },
}

/// Drawing surface lifecycle stage, used in call-order errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceStage {
    /// `start` has not been called yet
    #[default]
    Fresh,
    /// Between `start` and `end`
    Started,
    /// `end` has been called
    Finished,
}

/// Errors raised by a drawing surface.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// The surface was driven out of `start` / `circle` / `end` order.
    #[error("Surface call '{call}' not allowed while {stage:?}")]
    OutOfOrder {
        /// The rejected call.
        call: &'static str,
        /// The stage the surface was in.
        stage: SurfaceStage,
    },

    /// Writing to the output stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for core value construction.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type alias for drawing surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;
