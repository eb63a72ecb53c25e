//! Drawing surface contract
//!
//! Layout code decides where holes go; a [`DrawingSurface`] decides how a
//! hole is realized. The toolpath backend turns each hole into plunge
//! motions, the vector backend into a circle element.
//!
//! Call sequence for every surface:
//!
//! ```text
//! start ─▶ circle* ─▶ end
//! ```
//!
//! `start` and `end` run exactly once. Backends use [`SurfaceGuard`] to
//! reject anything else before writing a byte.

use crate::data::{Hole, Position};
use crate::error::{SurfaceError, SurfaceResult, SurfaceStage};

/// A backend that can realize a hole layout
pub trait DrawingSurface {
    /// Declare the canvas extent in drawing units and emit any preamble.
    fn start(&mut self, width: i32, height: i32, attrs: &[&str]) -> SurfaceResult<()>;

    /// Realize one hole centered at (`x`, `y`).
    ///
    /// On return the backend must be safe to travel to the next hole.
    fn circle(&mut self, x: i32, y: i32, radius: i32, attrs: &[&str]) -> SurfaceResult<()>;

    /// Finish the output and park the tool or cursor.
    fn end(&mut self) -> SurfaceResult<()>;

    /// Convenience wrapper over [`DrawingSurface::circle`].
    fn draw_hole(&mut self, hole: Hole) -> SurfaceResult<()> {
        self.circle(hole.center.x, hole.center.y, hole.radius, &[])
    }
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for Box<S> {
    fn start(&mut self, width: i32, height: i32, attrs: &[&str]) -> SurfaceResult<()> {
        (**self).start(width, height, attrs)
    }

    fn circle(&mut self, x: i32, y: i32, radius: i32, attrs: &[&str]) -> SurfaceResult<()> {
        (**self).circle(x, y, radius, attrs)
    }

    fn end(&mut self) -> SurfaceResult<()> {
        (**self).end()
    }
}

/// Enforces `start` / `circle` / `end` ordering for a surface
#[derive(Debug, Default, Clone)]
pub struct SurfaceGuard {
    stage: SurfaceStage,
    holes: usize,
}

impl SurfaceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle stage
    pub fn stage(&self) -> SurfaceStage {
        self.stage
    }

    /// Holes accepted so far
    pub fn holes(&self) -> usize {
        self.holes
    }

    /// Transition `Fresh → Started`.
    pub fn begin(&mut self) -> SurfaceResult<()> {
        self.expect("start", SurfaceStage::Fresh)?;
        self.stage = SurfaceStage::Started;
        Ok(())
    }

    /// Admit one hole. Only valid while `Started`.
    pub fn admit(&mut self) -> SurfaceResult<()> {
        self.expect("circle", SurfaceStage::Started)?;
        self.holes += 1;
        Ok(())
    }

    /// Transition `Started → Finished`.
    pub fn finish(&mut self) -> SurfaceResult<()> {
        self.expect("end", SurfaceStage::Started)?;
        self.stage = SurfaceStage::Finished;
        Ok(())
    }

    fn expect(&self, call: &'static str, stage: SurfaceStage) -> SurfaceResult<()> {
        if self.stage == stage {
            Ok(())
        } else {
            Err(SurfaceError::OutOfOrder {
                call,
                stage: self.stage,
            })
        }
    }
}

/// Surface that records holes in call order instead of rendering them
///
/// Backs `holegrid --dry-run` and is used to inspect the traversal order
/// of a layout.
#[derive(Debug, Default, Clone)]
pub struct HoleRecorder {
    guard: SurfaceGuard,
    canvas: Option<(i32, i32)>,
    holes: Vec<Hole>,
}

impl HoleRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canvas extent passed to `start`, if it has been called
    pub fn canvas(&self) -> Option<(i32, i32)> {
        self.canvas
    }

    /// Recorded holes in call order
    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    /// Whether `end` has been called
    pub fn is_finished(&self) -> bool {
        self.guard.stage() == SurfaceStage::Finished
    }
}

impl DrawingSurface for HoleRecorder {
    fn start(&mut self, width: i32, height: i32, _attrs: &[&str]) -> SurfaceResult<()> {
        self.guard.begin()?;
        self.canvas = Some((width, height));
        Ok(())
    }

    fn circle(&mut self, x: i32, y: i32, radius: i32, _attrs: &[&str]) -> SurfaceResult<()> {
        self.guard.admit()?;
        self.holes.push(Hole::new(Position::new(x, y), radius));
        Ok(())
    }

    fn end(&mut self) -> SurfaceResult<()> {
        self.guard.finish()
    }
}
