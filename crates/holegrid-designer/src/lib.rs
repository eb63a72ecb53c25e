//! # Holegrid Designer
//!
//! Decides where holes go and drives any [`holegrid_core::DrawingSurface`]
//! through them.
//!
//! ## Components
//!
//! - **Layout engine**: clusters of five holes, rows (vertical clusters
//!   side by side), columns (horizontal clusters stacked) and rails
//!   (clusters chained end to end)
//! - **Templates**: complete boards built from those primitives
//! - **SVG renderer**: a preview surface writing one circle per hole
//!
//! ```text
//! Template ──▶ LayoutEngine ──▶ DrawingSurface
//!                                 ├── ToolpathRenderer (holegrid-camtools)
//!                                 └── SvgRenderer
//! ```

pub mod layout;
pub mod svg_renderer;
pub mod templates;

pub use layout::{Axis, LayoutEngine, CLUSTER_SIZE};
pub use svg_renderer::SvgRenderer;
pub use templates::Template;
