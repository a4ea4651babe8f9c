//! Main entry point for the serial temperature monitor.
//!
//! The program performs the following steps:
//! 1. Parses the command line and loads the layered configuration.
//! 2. Initializes logging for the selected run mode.
//! 3. Opens the serial port once; a failure leaves the reader inactive.
//! 4. Runs the interactive terminal UI or the headless loop until exit.
//!
//! # Errors
//!
//! The program exits with an error if:
//! * The configuration cannot be loaded or is invalid.
//! * The serial port cannot be opened in headless mode.
//! * The terminal cannot be initialized or drawn.
use anyhow::{Context, Result};

mod cli;
mod config;
mod error;
mod export;
mod logging;
mod monitor;
mod serial;
mod service;
mod ui;

use crate::cli::{Cli, RunMode};
use crate::config::AppConfig;
use crate::monitor::MonitorSession;
use crate::serial::{ByteSource, SerialPortSource};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    if cli.list_ports {
        for port in serial::port::list_ports()? {
            println!("{}", port);
        }
        return Ok(());
    }

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    config.apply_cli_overrides(&cli);
    config.validate()?;

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let mode = if cli.mode == RunMode::Interactive && !atty::is(atty::Stream::Stdout) {
        RunMode::Headless
    } else {
        cli.mode
    };

    logging::init(&config.logging, mode == RunMode::Interactive)?;
    tracing::info!(%mode, port = %config.serial.port, "serial-temp-monitor starting");

    let (source, open_error) = match SerialPortSource::open(&config.serial) {
        Ok(port) => (Some(Box::new(port) as Box<dyn ByteSource>), None),
        Err(e) => {
            tracing::error!(error = %e, "serial reader inactive for this session");
            (None, Some(e))
        }
    };

    let mut session = MonitorSession::new(source, config.monitor.clone());

    match mode {
        RunMode::Interactive => {
            service::run_interactive(&mut session, &config, open_error.map(|e| e.to_string()))?
        }
        RunMode::Headless => {
            if let Some(e) = open_error {
                return Err(error::AppError::from(e).into());
            }
            service::run_headless(&mut session, &config, cli.export.as_deref(), cli.json)?
        }
    }

    Ok(())
}
