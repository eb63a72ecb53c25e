//! SVG preview surface
//!
//! Writes the layout as a standalone SVG document, one `<circle>` per hole,
//! in drawing units. Meant for checking a layout by eye before cutting.

use holegrid_core::{DrawingSurface, SurfaceGuard, SurfaceResult};
use std::io::Write;
use tracing::debug;

/// Drawing surface that writes an SVG document
#[derive(Debug)]
pub struct SvgRenderer<W: Write> {
    out: W,
    guard: SurfaceGuard,
}

impl<W: Write> SvgRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            guard: SurfaceGuard::new(),
        }
    }

    pub fn holes_drawn(&self) -> usize {
        self.guard.holes()
    }

    /// Consume the renderer and hand back the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Extra attributes, each preceded by a space
fn extra(attrs: &[&str]) -> String {
    attrs.iter().map(|a| format!(" {}", a)).collect()
}

impl<W: Write> DrawingSurface for SvgRenderer<W> {
    fn start(&mut self, width: i32, height: i32, attrs: &[&str]) -> SurfaceResult<()> {
        self.guard.begin()?;
        debug!(width, height, "Starting SVG document");

        writeln!(self.out, "<?xml version=\"1.0\"?>")?;
        writeln!(self.out, "<!-- Generated by Holegrid -->")?;
        writeln!(
            self.out,
            "<svg width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\"",
            width, height, width, height
        )?;
        writeln!(self.out, "     xmlns=\"http://www.w3.org/2000/svg\"")?;
        writeln!(
            self.out,
            "     xmlns:xlink=\"http://www.w3.org/1999/xlink\"{}>",
            extra(attrs)
        )?;
        Ok(())
    }

    fn circle(&mut self, x: i32, y: i32, radius: i32, attrs: &[&str]) -> SurfaceResult<()> {
        self.guard.admit()?;
        writeln!(
            self.out,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{} />",
            x,
            y,
            radius,
            extra(attrs)
        )?;
        Ok(())
    }

    fn end(&mut self) -> SurfaceResult<()> {
        self.guard.finish()?;
        writeln!(self.out, "</svg>")?;
        self.out.flush()?;
        debug!(holes = self.guard.holes(), "SVG document complete");
        Ok(())
    }
}
