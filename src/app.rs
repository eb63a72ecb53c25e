//! Run orchestration
//!
//! Order matters for the failure guarantees:
//! 1. validate the configuration (no file is created on a bad depth)
//! 2. open the output destination
//! 3. build the renderer and drive the template through it

use anyhow::{Context, Result};
use holegrid_camtools::ToolpathRenderer;
use holegrid_core::{DrawingSurface, HoleRecorder};
use holegrid_designer::{LayoutEngine, SvgRenderer};
use holegrid_settings::{Config, OutputFormat};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Open the output stream: the file at `path`, or stdout when `None`.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Build the drawing surface the configuration asks for.
pub fn select_surface<'a, W: Write + 'a>(
    config: &Config,
    out: W,
) -> Result<Box<dyn DrawingSurface + 'a>> {
    let surface: Box<dyn DrawingSurface + 'a> = match config.output.format {
        OutputFormat::Nc => Box::new(
            ToolpathRenderer::new(out, config.machine, config.resolution()?)
                .context("Invalid machine parameters")?
                .with_header(config.output.header),
        ),
        OutputFormat::Svg => Box::new(SvgRenderer::new(out)),
    };
    Ok(surface)
}

/// Render the configured layout into `out`. Returns the number of holes.
pub fn render_to<W: Write>(config: &Config, out: W) -> Result<usize> {
    config.validate().context("Invalid configuration")?;
    let engine = LayoutEngine::new(config.resolution()?);
    let mut surface = select_surface(config, out)?;
    let drawn = config
        .layout
        .template
        .render(&engine, &mut surface)
        .context("Failed to write output")?;
    Ok(drawn)
}

/// Lay out the configured template on a recording surface. Nothing is
/// opened or written.
pub fn dry_run(config: &Config) -> Result<HoleRecorder> {
    config.validate().context("Invalid configuration")?;
    let engine = LayoutEngine::new(config.resolution()?);
    let mut recorder = HoleRecorder::new();
    config
        .layout
        .template
        .render(&engine, &mut recorder)
        .context("Failed to lay out template")?;
    Ok(recorder)
}

/// Validate, open the destination, and render.
pub fn run(config: &Config) -> Result<usize> {
    config.validate().context("Invalid configuration")?;
    let out = open_output(config.output.path.as_deref())?;
    let drawn = render_to(config, out)?;

    info!(
        format = %config.output.format,
        template = %config.layout.template,
        holes = drawn,
        "Run complete"
    );
    Ok(drawn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use holegrid_settings::SettingsError;
    use tempfile::tempdir;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["holegrid"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_render_to_gcode() {
        let mut out = Vec::new();
        let drawn = render_to(&Config::default(), &mut out).unwrap();
        assert_eq!(drawn, 240);

        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("G20\nG90\nG1 Z0.15000 F9.0\nG0 X0.62500 Y0.87500\n"));
        assert!(text.ends_with("G0 X0.00000 Y0.00000\nG4 P0.1\n"));
        assert_eq!(text.matches("G0 X").count(), 241);
    }

    #[test]
    fn test_render_to_svg() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Svg;
        let mut out = Vec::new();
        render_to(&config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("<circle").count(), 240);
        assert!(text.contains("<circle cx=\"45\" cy=\"63\" r=\"4\" />"));
    }

    #[test]
    fn test_bad_depth_writes_nothing() {
        let mut config = Config::default();
        config.machine.z_depth = 0.0;
        let mut out = Vec::new();
        assert!(render_to(&config, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_oversized_resolution_is_rejected() {
        let mut config = Config::default();
        config.layout.dpi = 200_000_000;
        assert!(matches!(config.validate(), Err(SettingsError::Layout(_))));

        let mut out = Vec::new();
        assert!(render_to(&config, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_low_feed_rate_is_rejected() {
        let mut config = Config::default();
        config.machine.feed_rate = 0.04;
        let mut out = Vec::new();
        assert!(render_to(&config, &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_dry_run_records_layout() {
        let mut config = Config::default();
        config.layout.template = holegrid_settings::Template::Snake;
        let recorder = dry_run(&config).unwrap();
        assert_eq!(recorder.holes().len(), 180);
        assert_eq!(recorder.canvas(), Some((504, 1080)));
        assert!(recorder.is_finished());
    }

    #[test]
    fn test_dry_run_rejects_bad_config() {
        let mut config = Config::default();
        config.machine.z_depth = 0.125;
        assert!(dry_run(&config).is_err());
    }

    #[test]
    fn test_run_writes_gcode_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("board.nc");
        let cli = parse(&["--out", out.to_str().unwrap(), "--zdepth", "-0.25"]);

        let drawn = run(&cli.resolve().unwrap()).unwrap();
        assert_eq!(drawn, 240);

        let text = std::fs::read_to_string(&out).unwrap();
        let first_hole: Vec<&str> = text.lines().skip(3).take(9).collect();
        assert_eq!(
            first_hole,
            vec![
                "G0 X0.62500 Y0.87500",
                "G1 Z-0.06250 F9.0",
                "G1 Z0.00000 F9.0",
                "G1 Z-0.12500 F9.0",
                "G1 Z0.00000 F9.0",
                "G1 Z-0.18750 F9.0",
                "G1 Z0.00000 F9.0",
                "G1 Z-0.25000 F9.0",
                "G1 Z0.15000 F9.0",
            ]
        );
        assert!(text.ends_with("G0 X0.00000 Y0.00000\nG4 P0.1\n"));
    }

    #[test]
    fn test_run_writes_svg_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("board.svg");
        let cli = parse(&[
            "--format",
            "svg",
            "--template",
            "snake",
            "--out",
            out.to_str().unwrap(),
        ]);

        assert_eq!(run(&cli.resolve().unwrap()).unwrap(), 180);
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.contains("<svg width=\"504\" height=\"1080\""));
        assert!(text.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_non_negative_depth_creates_no_output() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("never.nc");
        let cli = parse(&["--out", out.to_str().unwrap(), "--zdepth", "0.125"]);

        assert!(run(&cli.resolve().unwrap()).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_unwritable_destination_fails_before_rendering() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("missing-dir").join("board.nc");
        let cli = parse(&["--out", out.to_str().unwrap()]);

        let err = run(&cli.resolve().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }

    #[test]
    fn test_config_file_with_flag_override() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("holegrid.toml");
        let out = dir.path().join("board.nc");
        std::fs::write(
            &config,
            "[machine]\nz_depth = -0.5\nbit_size = 0.25\n\n[output]\nheader = true\n",
        )
        .unwrap();

        let cli = parse(&[
            "--config",
            config.to_str().unwrap(),
            "--zdepth",
            "-0.375",
            "--out",
            out.to_str().unwrap(),
        ]);
        let resolved = cli.resolve().unwrap();
        assert_eq!(resolved.machine.z_depth, -0.375);
        assert_eq!(resolved.machine.bit_size, 0.25);

        run(&resolved).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("; Holegrid drilling program\n"));
        assert!(text.contains("in 3 passes (fixed-step)"));
    }
}
