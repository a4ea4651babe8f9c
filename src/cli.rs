//! Command-line interface argument parsing.
//!
//! This module defines the CLI structure and parsing logic using gumdrop,
//! supporting the interactive and headless run modes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use gumdrop::Options;

/// Run mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Interactive terminal UI mode (default)
    #[default]
    Interactive,
    /// Headless mode (no UI, logs and optional JSON lines only)
    Headless,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "interactive" | "tui" => Ok(RunMode::Interactive),
            "headless" | "daemon" => Ok(RunMode::Headless),
            other => Err(format!("unknown mode `{}` (expected interactive or headless)", other)),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Interactive => write!(f, "interactive"),
            RunMode::Headless => write!(f, "headless"),
        }
    }
}

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Convert LogLevel to an EnvFilter directive
    pub fn to_filter_string(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            other => Err(format!("unknown log level `{}`", other)),
        }
    }
}

/// serial-temp-monitor: live temperature readings from a serial device
#[derive(Debug, Options)]
pub struct Cli {
    #[options(help = "print help message")]
    pub help: bool,

    #[options(help = "run mode: interactive or headless", meta = "MODE", default = "interactive")]
    pub mode: RunMode,

    #[options(help = "path to configuration file", meta = "PATH", default = "temp-monitor.toml")]
    pub config: PathBuf,

    #[options(help = "log level (overrides config file)", meta = "LEVEL")]
    pub log_level: Option<LogLevel>,

    #[options(help = "serial port name (overrides config file)", meta = "NAME")]
    pub port: Option<String>,

    #[options(help = "baud rate (overrides config file)", meta = "N")]
    pub baud_rate: Option<u32>,

    #[options(help = "headless mode: export the log table as CSV on exit", meta = "PATH")]
    pub export: Option<PathBuf>,

    #[options(help = "JSON logs, plus one JSON object per reading in headless mode")]
    pub json: bool,

    #[options(no_short, help = "print the effective configuration as TOML and exit")]
    pub print_config: bool,

    #[options(no_short, help = "list available serial ports and exit")]
    pub list_ports: bool,
}

impl Cli {
    /// Parse command-line arguments, exiting on error or `--help`
    pub fn parse_args() -> Self {
        Self::parse_args_default_or_exit()
    }

    /// Parse an explicit argument list (without the program name)
    #[cfg(test)]
    pub fn parse_from<S: AsRef<str>>(args: &[S]) -> Result<Self, gumdrop::Error> {
        Self::parse_args_default(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(LogLevel::Info.to_filter_string(), "info");
        assert_eq!(LogLevel::Debug.to_filter_string(), "debug");
        assert_eq!(LogLevel::Error.to_filter_string(), "error");
    }

    #[test]
    fn test_default_values() {
        let cli = Cli::parse_from::<&str>(&[]).unwrap();
        assert_eq!(cli.mode, RunMode::Interactive);
        assert_eq!(cli.config, PathBuf::from("temp-monitor.toml"));
        assert_eq!(cli.log_level, None);
        assert!(cli.port.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_headless_with_export() {
        let cli = Cli::parse_from(&["-m", "headless", "-e", "out.csv", "-l", "debug"]).unwrap();
        assert_eq!(cli.mode, RunMode::Headless);
        assert_eq!(cli.export, Some(PathBuf::from("out.csv")));
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::parse_from(&["--mode", "gui"]).is_err());
    }
}
