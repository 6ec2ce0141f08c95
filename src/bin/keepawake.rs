// keepawake CLI - plays a periodic tone so the attached soundbar stays on
// Runs until interrupted with Ctrl+C

use anyhow::{Context, Result};
use keepawake::cli::{self, Invocation};
use keepawake::constants::APP_NAME;
use keepawake::{Config, RodioOutput, Scheduler, Tone};
use log::{error, info, warn};
use std::sync::mpsc;

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();
}

fn main() -> Result<()> {
    let invocation = cli::parse_args(std::env::args().skip(1));
    init_logging(matches!(&invocation, Ok(inv) if inv.verbose()));

    let args = match invocation {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            println!("{}", cli::help_text());
            return Ok(());
        }
        Ok(Invocation::UnknownArgument(arg)) => {
            warn!("Unknown argument '{}'.", arg);
            println!("{}", cli::help_text());
            return Ok(());
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let config = Config::from_args(&args);

    // Build the tone before touching the audio device so a bad tone fails fast
    let tone = match Tone::synthesize(config.tone) {
        Ok(tone) => tone,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    info!("{} v{}", APP_NAME, env!("CARGO_PKG_VERSION"));
    config.log_overrides();

    // Must be in place before the scheduler thread exists.
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();
    ctrlc::set_handler(move || {
        let _ = shutdown_tx.send(());
    })
    .context("Failed to install Ctrl+C handler")?;

    let handle = match Scheduler::from_config(&config, tone).start(RodioOutput::open_default) {
        Ok(handle) => handle,
        Err(e) => {
            error!("Error initializing audio output: {}", e);
            std::process::exit(1);
        }
    };

    info!("Press Ctrl+C to stop.");

    // Blocks until Ctrl+C; a closed channel means the handler is gone, which
    // is treated the same way.
    let _ = shutdown_rx.recv();

    info!("Stopping...");
    let stats = handle.stop();
    info!(
        "Stopped. ({} played, {} skipped, {} failed)",
        stats.played, stats.skipped, stats.failed
    );

    Ok(())
}
