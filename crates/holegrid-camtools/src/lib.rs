//! # Holegrid CAM Tools
//!
//! Turns a hole layout into a drilling program for a CNC router.
//!
//! - **Machine parameters**: floor depth, travel height, bit size, feed and
//!   the peck policy that splits each plunge into chip-clearing passes
//! - **Toolpath renderer**: a [`holegrid_core::DrawingSurface`] that writes
//!   G-Code (`G20`, `G90`, `G0`, `G1`, `G4`)

pub mod error;
pub mod machine;
pub mod toolpath;

pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use machine::{MachineParameters, PeckPolicy, MAX_PASSES, MIN_FEED_RATE};
pub use toolpath::ToolpathRenderer;
