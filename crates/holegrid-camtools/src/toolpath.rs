//! G-Code drawing surface
//!
//! Realizes each hole as a peck drilling cycle:
//!
//! ```text
//! G0 X<x> Y<y>          rapid to the hole at travel height
//! G1 Z<d1> F<feed>      first pass
//! G1 Z0.00000 F<feed>   back to the surface to clear chips
//! ...
//! G1 Z<floor> F<feed>   last pass, no surface retract
//! G1 Z<travel> F<feed>  back to travel height
//! ```
//!
//! Output is inch mode with absolute positioning.

use crate::error::CamToolResult;
use crate::machine::MachineParameters;
use holegrid_core::{DrawingSurface, Resolution, SurfaceGuard, SurfaceResult};
use std::io::{self, Write};
use tracing::{debug, info, trace};

/// Drawing surface that writes a drilling program
#[derive(Debug)]
pub struct ToolpathRenderer<W: Write> {
    out: W,
    params: MachineParameters,
    resolution: Resolution,
    depths: Vec<f64>,
    feed: String,
    width: i32,
    height: i32,
    header: bool,
    guard: SurfaceGuard,
}

impl<W: Write> ToolpathRenderer<W> {
    /// Create a renderer writing to `out`.
    ///
    /// Parameters are validated here; on error nothing has been written.
    pub fn new(out: W, params: MachineParameters, resolution: Resolution) -> CamToolResult<Self> {
        params.validate()?;
        let depths = params.plunge_depths();
        debug!(
            policy = %params.peck_policy,
            passes = depths.len(),
            "Plunge schedule {:?}",
            depths
        );
        Ok(Self {
            out,
            params,
            resolution,
            depths,
            feed: format_feed(params.feed_rate),
            width: 0,
            height: 0,
            header: false,
            guard: SurfaceGuard::new(),
        })
    }

    /// Emit a comment block describing the run before the program.
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn params(&self) -> &MachineParameters {
        &self.params
    }

    /// Canvas extent passed to `start`, in drawing units
    pub fn canvas(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn holes_drawn(&self) -> usize {
        self.guard.holes()
    }

    /// Consume the renderer and hand back the output stream.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_header(&mut self) -> SurfaceResult<()> {
        let p = self.params;
        writeln!(self.out, "; Holegrid drilling program")?;
        writeln!(
            self.out,
            "; Canvas: {:.3} x {:.3} in",
            self.resolution.to_inches(self.width),
            self.resolution.to_inches(self.height)
        )?;
        writeln!(self.out, "; Bit: {:.5} in", p.bit_size)?;
        writeln!(
            self.out,
            "; Depth: {:.5} in in {} passes ({})",
            p.z_depth,
            self.depths.len(),
            p.peck_policy
        )?;
        writeln!(self.out, "; Travel: {:.5} in", p.z_travel)?;
        Ok(())
    }

    fn write_preamble(&mut self) -> SurfaceResult<()> {
        writeln!(self.out, "G20")?;
        writeln!(self.out, "G90")?;
        write_z(&mut self.out, self.params.z_travel, &self.feed)?;
        Ok(())
    }

    fn write_rapid(&mut self, x: f64, y: f64) -> SurfaceResult<()> {
        writeln!(self.out, "G0 X{:.5} Y{:.5}", x, y)?;
        Ok(())
    }
}

impl<W: Write> DrawingSurface for ToolpathRenderer<W> {
    fn start(&mut self, width: i32, height: i32, _attrs: &[&str]) -> SurfaceResult<()> {
        self.guard.begin()?;
        self.width = width;
        self.height = height;
        debug!(width, height, "Starting toolpath");

        if self.header {
            self.write_header()?;
        }
        self.write_preamble()
    }

    fn circle(&mut self, x: i32, y: i32, _radius: i32, _attrs: &[&str]) -> SurfaceResult<()> {
        self.guard.admit()?;
        let fx = self.resolution.to_inches(x);
        let fy = self.resolution.to_inches(y);
        trace!(x, y, fx, fy, "Drilling hole");

        self.write_rapid(fx, fy)?;
        let last = self.depths.len() - 1;
        for (i, &depth) in self.depths.iter().enumerate() {
            write_z(&mut self.out, depth, &self.feed)?;
            if i < last {
                write_z(&mut self.out, 0.0, &self.feed)?;
            }
        }
        write_z(&mut self.out, self.params.z_travel, &self.feed)?;
        Ok(())
    }

    fn end(&mut self) -> SurfaceResult<()> {
        self.guard.finish()?;
        self.write_preamble()?;
        self.write_rapid(0.0, 0.0)?;
        writeln!(self.out, "G4 P{}", self.params.dwell_seconds)?;
        self.out.flush()?;

        info!(
            holes = self.guard.holes(),
            passes_per_hole = self.depths.len(),
            "Toolpath complete"
        );
        Ok(())
    }
}

fn write_z<W: Write>(out: &mut W, z: f64, feed: &str) -> io::Result<()> {
    writeln!(out, "G1 Z{:.5} F{}", z, feed)
}

/// Feed word value: one decimal when that is exact, otherwise up to four.
fn format_feed(feed: f64) -> String {
    let short = format!("{:.1}", feed);
    if short.parse::<f64>().is_ok_and(|v| v == feed) {
        return short;
    }
    let long = format!("{:.4}", feed);
    let trimmed = long.trim_end_matches('0');
    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}
