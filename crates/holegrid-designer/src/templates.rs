//! Board templates
//!
//! A template places rows, columns and rails on a fixed canvas and drives a
//! surface through the whole `start` / holes / `end` sequence.

use crate::layout::LayoutEngine;
use holegrid_core::{DrawingSurface, Position, SurfaceResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

/// Canvas width in base units
const CANVAS_WIDTH_UNITS: i32 = 28 * 2;
/// Canvas height in base units
const CANVAS_HEIGHT_UNITS: i32 = 120;

/// Clusters per vertical rail of the perimeter template
const SIDE_RAIL_CLUSTERS: usize = 9;
/// Clusters per horizontal rail of the perimeter template
const END_RAIL_CLUSTERS: usize = 3;

/// Rows in the snake template
const SNAKE_ROWS: i32 = 9;
/// Clusters per snake row
const SNAKE_ROW_CLUSTERS: usize = 4;

/// Hole pattern placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    /// Doubled rails framing all four edges
    #[default]
    Perimeter,
    /// Rows stacked down the board, every other row shifted half a group
    Snake,
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Perimeter => write!(f, "perimeter"),
            Self::Snake => write!(f, "snake"),
        }
    }
}

impl FromStr for Template {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "perimeter" | "frame" => Ok(Self::Perimeter),
            "snake" => Ok(Self::Snake),
            _ => Err(format!("Unknown template: {}", s)),
        }
    }
}

impl Template {
    /// Canvas extent in drawing units
    pub fn canvas(&self, engine: &LayoutEngine) -> (i32, i32) {
        let u = engine.unit();
        (u * CANVAS_WIDTH_UNITS, u * CANVAS_HEIGHT_UNITS)
    }

    /// Holes the template produces
    pub fn hole_count(&self) -> usize {
        let per_cluster = crate::layout::CLUSTER_SIZE as usize;
        match self {
            Self::Perimeter => 4 * per_cluster * (SIDE_RAIL_CLUSTERS + END_RAIL_CLUSTERS),
            Self::Snake => SNAKE_ROWS as usize * SNAKE_ROW_CLUSTERS * per_cluster,
        }
    }

    /// Run the full surface sequence: `start`, every hole, `end`.
    ///
    /// Returns the number of holes drawn.
    pub fn render<S>(&self, engine: &LayoutEngine, surface: &mut S) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        let (width, height) = self.canvas(engine);
        info!(template = %self, width, height, "Rendering layout");

        surface.start(width, height, &[])?;
        let drawn = self.draw_holes(engine, surface)?;
        surface.end()?;

        debug!(drawn, "Layout rendered");
        Ok(drawn)
    }

    /// Draw the template's holes on an already started surface.
    pub fn draw_holes<S>(&self, engine: &LayoutEngine, surface: &mut S) -> SurfaceResult<usize>
    where
        S: DrawingSurface + ?Sized,
    {
        match self {
            Self::Perimeter => draw_perimeter(engine, surface),
            Self::Snake => draw_snake(engine, surface),
        }
    }
}

fn draw_perimeter<S>(engine: &LayoutEngine, surface: &mut S) -> SurfaceResult<usize>
where
    S: DrawingSurface + ?Sized,
{
    let u = engine.unit();
    let left = 5 * u;
    let top = u;
    let separation = 3 * u;
    let inset = 6 * u;
    let bottom = top + inset * 2 + 101 * u;
    let right = left + 11 * u + 15 * u * 2;

    let mut drawn = 0;

    // left edge
    for x in [left, left + separation] {
        drawn += engine.rail_vertical(surface, Position::new(x, top + inset), SIDE_RAIL_CLUSTERS)?;
    }
    // top and bottom edges
    for y in [top, top + separation, bottom, bottom + separation] {
        drawn +=
            engine.rail_horizontal(surface, Position::new(left + inset, y), END_RAIL_CLUSTERS)?;
    }
    // right edge
    for x in [right, right + separation] {
        drawn += engine.rail_vertical(surface, Position::new(x, top + inset), SIDE_RAIL_CLUSTERS)?;
    }

    Ok(drawn)
}

fn draw_snake<S>(engine: &LayoutEngine, surface: &mut S) -> SurfaceResult<usize>
where
    S: DrawingSurface + ?Sized,
{
    let u = engine.unit();
    let left = 5 * u;
    let top = 7 * u;
    let shift = engine.group_pitch() / 2;

    let mut drawn = 0;
    for i in 0..SNAKE_ROWS {
        let x = if i % 2 == 0 { left } else { left + shift };
        let y = top + i * engine.group_pitch();
        drawn += engine.row(surface, Position::new(x, y), SNAKE_ROW_CLUSTERS)?;
    }
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holegrid_core::{HoleRecorder, Resolution, MAX_DPI};

    #[test]
    fn test_canvas_at_72_dpi() {
        let engine = LayoutEngine::default();
        assert_eq!(Template::Perimeter.canvas(&engine), (504, 1080));
    }

    #[test]
    fn test_hole_counts_match_render() {
        let engine = LayoutEngine::default();
        for template in [Template::Perimeter, Template::Snake] {
            let mut rec = HoleRecorder::new();
            let drawn = template.render(&engine, &mut rec).unwrap();
            assert_eq!(drawn, template.hole_count());
            assert_eq!(rec.holes().len(), drawn);
            assert!(rec.is_finished());
        }
        assert_eq!(Template::Perimeter.hole_count(), 240);
        assert_eq!(Template::Snake.hole_count(), 180);
    }

    #[test]
    fn test_perimeter_first_and_last_holes() {
        let engine = LayoutEngine::default();
        let mut rec = HoleRecorder::new();
        Template::Perimeter.render(&engine, &mut rec).unwrap();
        let holes = rec.holes();
        assert_eq!(holes[0].center, Position::new(45, 63));
        assert_eq!(holes[0].radius, 4);
        // last hole: right rail, second line, last cluster bottom
        assert_eq!(holes[holes.len() - 1].center, Position::new(441, 63 + 8 * 108 + 72));
    }

    #[test]
    fn test_holes_stay_on_canvas() {
        let engine = LayoutEngine::default();
        for template in [Template::Perimeter, Template::Snake] {
            let (w, h) = template.canvas(&engine);
            let mut rec = HoleRecorder::new();
            template.render(&engine, &mut rec).unwrap();
            for hole in rec.holes() {
                assert!(hole.center.x + hole.radius <= w, "{template}: {}", hole.center);
                assert!(hole.center.y + hole.radius <= h, "{template}: {}", hole.center);
            }
        }
    }

    #[test]
    fn test_largest_resolution_stays_in_range() {
        let engine = LayoutEngine::new(Resolution::new(MAX_DPI).unwrap());
        for template in [Template::Perimeter, Template::Snake] {
            let (w, h) = template.canvas(&engine);
            assert!(w > 0 && h > 0);
            let mut rec = HoleRecorder::new();
            assert_eq!(template.render(&engine, &mut rec).unwrap(), template.hole_count());
            for hole in rec.holes() {
                assert!(hole.center.x >= 0 && hole.center.x + hole.radius <= w);
                assert!(hole.center.y >= 0 && hole.center.y + hole.radius <= h);
            }
        }
    }

    #[test]
    fn test_parse_template() {
        assert_eq!("Perimeter".parse::<Template>().unwrap(), Template::Perimeter);
        assert_eq!("snake".parse::<Template>().unwrap(), Template::Snake);
        assert!("spiral".parse::<Template>().is_err());
    }
}
