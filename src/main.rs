use clap::Parser;
use holegrid::{dry_run, init_logging, run, Cli, BUILD_DATE, VERSION};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;
    debug!(version = VERSION, built = BUILD_DATE, "Starting holegrid");

    let config = cli.resolve()?;
    if cli.dry_run {
        let recorder = dry_run(&config)?;
        let (width, height) = recorder.canvas().unwrap_or_default();
        println!(
            "{}: {} holes on a {}x{} canvas ({})",
            config.layout.template,
            recorder.holes().len(),
            width,
            height,
            config.resolution()?
        );
        return Ok(());
    }
    run(&config)?;

    Ok(())
}
