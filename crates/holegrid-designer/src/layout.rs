//! Hole layout generation.
//!
//! Every spacing is a multiple of the base unit `u` (an eighth of an inch
//! in drawing units):
//!
//! - holes in a cluster are `2u` apart
//! - a cluster of five holes spans `8u`
//! - consecutive clusters in a group start `12u` apart
//!
//! Generators walk their primary axis in increasing order and call the
//! surface once per hole. Nothing is collected.

use holegrid_core::{DrawingSurface, Hole, Position, Resolution, SurfaceResult};

/// Holes per cluster
pub const CLUSTER_SIZE: i32 = 5;

/// Direction a cluster or group advances in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left to right
    Horizontal,
    /// Top to bottom
    Vertical,
}

impl Axis {
    fn advance(self, pos: Position, distance: i32) -> Position {
        match self {
            Self::Horizontal => pos.offset(distance, 0),
            Self::Vertical => pos.offset(0, distance),
        }
    }
}

/// Generates hole positions from a fixed resolution
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine {
    resolution: Resolution,
    unit: i32,
}

impl LayoutEngine {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            unit: resolution.base_unit(),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Base unit `u`
    pub fn unit(&self) -> i32 {
        self.unit
    }

    /// Distance between holes in a cluster
    pub fn hole_pitch(&self) -> i32 {
        2 * self.unit
    }

    /// Distance from the first to the last hole of a cluster
    pub fn cluster_span(&self) -> i32 {
        (CLUSTER_SIZE - 1) * self.hole_pitch()
    }

    /// Distance between the first holes of consecutive clusters in a group
    pub fn group_pitch(&self) -> i32 {
        self.hole_pitch() + CLUSTER_SIZE * self.hole_pitch()
    }

    /// Radius of every hole
    pub fn hole_radius(&self) -> i32 {
        self.unit / 2
    }

    /// Holes of one cluster starting at `origin`, advancing along `axis`.
    pub fn cluster_holes(&self, origin: Position, axis: Axis) -> impl Iterator<Item = Hole> {
        let pitch = self.hole_pitch();
        let radius = self.hole_radius();
        (0..CLUSTER_SIZE).map(move |i| Hole::new(axis.advance(origin, i * pitch), radius))
    }

    /// Holes of `count` clusters along `cluster_axis`, the clusters
    /// themselves placed one group pitch apart along `group_axis`.
    pub fn group_holes(
        &self,
        origin: Position,
        cluster_axis: Axis,
        group_axis: Axis,
        count: usize,
    ) -> impl Iterator<Item = Hole> {
        let engine = *self;
        let pitch = self.group_pitch();
        (0..count as i32).flat_map(move |i| {
            engine.cluster_holes(group_axis.advance(origin, i * pitch), cluster_axis)
        })
    }

    /// Row: vertical clusters placed left to right
    pub fn row_holes(&self, origin: Position, count: usize) -> impl Iterator<Item = Hole> {
        self.group_holes(origin, Axis::Vertical, Axis::Horizontal, count)
    }

    /// Column: horizontal clusters placed top to bottom
    pub fn column_holes(&self, origin: Position, count: usize) -> impl Iterator<Item = Hole> {
        self.group_holes(origin, Axis::Horizontal, Axis::Vertical, count)
    }

    /// Rail: clusters chained end to end along their own axis
    pub fn rail_holes(
        &self,
        origin: Position,
        axis: Axis,
        count: usize,
    ) -> impl Iterator<Item = Hole> {
        self.group_holes(origin, axis, axis, count)
    }

    /// Draw every hole in `holes` on `surface`, returning how many were drawn.
    pub fn draw<S, I>(&self, surface: &mut S, holes: I) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
        I: IntoIterator<Item = Hole>,
    {
        let mut drawn = 0;
        for hole in holes {
            surface.draw_hole(hole)?;
            drawn += 1;
        }
        Ok(drawn)
    }

    pub fn cluster_vertical<S>(&self, surface: &mut S, origin: Position) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        self.draw(surface, self.cluster_holes(origin, Axis::Vertical))
    }

    pub fn cluster_horizontal<S>(&self, surface: &mut S, origin: Position) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        self.draw(surface, self.cluster_holes(origin, Axis::Horizontal))
    }

    /// Draw a row of `count` vertical clusters.
    pub fn row<S>(&self, surface: &mut S, origin: Position, count: usize) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        self.draw(surface, self.row_holes(origin, count))
    }

    /// Draw a column of `count` horizontal clusters.
    pub fn column<S>(&self, surface: &mut S, origin: Position, count: usize) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        self.draw(surface, self.column_holes(origin, count))
    }

    pub fn rail_vertical<S>(
        &self,
        surface: &mut S,
        origin: Position,
        count: usize,
    ) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        self.draw(surface, self.rail_holes(origin, Axis::Vertical, count))
    }

    pub fn rail_horizontal<S>(
        &self,
        surface: &mut S,
        origin: Position,
        count: usize,
    ) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        self.draw(surface, self.rail_holes(origin, Axis::Horizontal, count))
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(Resolution::default())
    }
}
