//! Command line interface
//!
//! Settings are layered: built-in defaults, then a config file, then flags.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use holegrid_settings::{Config, OutputFormat, PeckPolicy, Template};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug, Default)]
#[command(
    name = "holegrid",
    version,
    long_version = crate::LONG_VERSION,
    about = "Lay out a drilled hole grid and render it as G-Code or SVG"
)]
pub struct Cli {
    /// Output format (nc, svg)
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Floor depth of every hole in inches (must be negative)
    #[arg(long, allow_negative_numbers = true)]
    pub zdepth: Option<f64>,

    /// Safe travel height in inches
    #[arg(long, allow_negative_numbers = true)]
    pub ztravel: Option<f64>,

    /// Diameter of the drill bit in inches
    #[arg(long, allow_negative_numbers = true)]
    pub bitsize: Option<f64>,

    /// Output file, empty for stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Settings file (.toml or .json); defaults to the user config file if present
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Board template (perimeter, snake)
    #[arg(long)]
    pub template: Option<Template>,

    /// Drawing units per inch
    #[arg(long)]
    pub dpi: Option<i32>,

    /// Plunge pass policy (fixed-step, half-depth)
    #[arg(long)]
    pub peck_policy: Option<PeckPolicy>,

    /// Prefix G-Code output with a comment block
    #[arg(long)]
    pub header: bool,

    /// Lay out the template and report it without writing any output
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Load the base configuration: `--config`, else the user config file
    /// if one exists, else defaults. Validation waits until the flags are
    /// applied.
    fn base_config(&self) -> Result<Config> {
        if let Some(path) = &self.config {
            return Config::read_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()));
        }

        match Config::default_path() {
            Ok(path) if path.is_file() => {
                debug!(path = %path.display(), "Using user config file");
                Config::read_from_file(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))
            }
            _ => Ok(Config::default()),
        }
    }

    /// Final configuration with flags applied on top. Not yet validated.
    pub fn resolve(&self) -> Result<Config> {
        let mut config = self.base_config()?;
        self.apply(&mut config);
        Ok(config)
    }

    /// Apply the flags that were given to `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(out) = &self.out {
            config.output.path = if out.as_os_str().is_empty() {
                None
            } else {
                Some(out.clone())
            };
        }
        if self.header {
            config.output.header = true;
        }
        if let Some(template) = self.template {
            config.layout.template = template;
        }
        if let Some(dpi) = self.dpi {
            config.layout.dpi = dpi;
        }
        if let Some(z_depth) = self.zdepth {
            config.machine.z_depth = z_depth;
        }
        if let Some(z_travel) = self.ztravel {
            config.machine.z_travel = z_travel;
        }
        if let Some(bit_size) = self.bitsize {
            config.machine.bit_size = bit_size;
        }
        if let Some(policy) = self.peck_policy {
            config.machine.peck_policy = policy;
        }
    }
}
