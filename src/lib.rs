//! # Holegrid
//!
//! Lays out a grid of drilled-hole clusters on a rectangular board and
//! renders it either as a G-Code drilling program or as an SVG preview.
//!
//! ## Architecture
//!
//! Holegrid is organized as a workspace with multiple crates:
//!
//! 1. **holegrid-core** - Data model, unit conversion, drawing surface contract
//! 2. **holegrid-camtools** - Machine parameters and the G-Code renderer
//! 3. **holegrid-designer** - Layout engine, templates, SVG renderer
//! 4. **holegrid-settings** - Run configuration and settings files
//! 5. **holegrid** - CLI binary that wires them together

pub mod app;
pub mod cli;

pub use app::{dry_run, open_output, render_to, run, select_surface};
pub use cli::Cli;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Version string with build date, for `--version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")");

/// Initialize logging
///
/// Sets up structured logging with:
/// - Output on stderr, so a program written to stdout stays clean
/// - RUST_LOG environment variable support, falling back to `verbosity`
///   (0 = warn, 1 = info, 2 = debug, 3+ = trace)
pub fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
