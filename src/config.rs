//! Application configuration management.
//!
//! Configuration is layered with the `config` crate: built-in defaults, an
//! optional TOML file, `TEMPMON_<SECTION>__<KEY>` environment variables and
//! finally CLI overrides. It is read once at startup and never changes for
//! the rest of the session.

use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Prefix for environment variable overrides
const ENV_PREFIX: &str = "TEMPMON";

/// Top-level application configuration
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub serial: SerialConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Serial line settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SerialConfig {
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    #[serde(default = "default_data_bits")]
    pub data_bits: u8,
    #[serde(default)]
    pub parity: ParitySetting,
    #[serde(default = "default_stop_bits")]
    pub stop_bits: u8,
    #[serde(default)]
    pub flow_control: FlowControlSetting,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ParitySetting {
    #[default]
    None,
    Odd,
    Even,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FlowControlSetting {
    #[default]
    None,
    Software,
    Hardware,
}

/// Threshold and display formatting of readings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Readings strictly above this value raise an overheat alert
    #[serde(default = "default_overheat_threshold")]
    pub overheat_threshold: f64,
    /// Decimal places used for every displayed and exported value
    #[serde(default = "default_decimals")]
    pub decimals: usize,
    /// chrono format string for log table timestamps
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

/// CSV export configuration
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct ExportConfig {
    /// Path offered by the export prompt
    #[serde(default)]
    pub default_path: Option<PathBuf>,
}

/// Terminal UI configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeSetting,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeSetting {
    #[default]
    Light,
    Dark,
}

/// Headless service configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
    #[serde(default)]
    pub json: bool,
}

// Default value functions
fn default_port() -> String {
    if cfg!(windows) {
        "COM4".to_string()
    } else {
        "/dev/ttyUSB0".to_string()
    }
}

fn default_baud_rate() -> u32 {
    9600
}

fn default_data_bits() -> u8 {
    8
}

fn default_stop_bits() -> u8 {
    1
}

fn default_overheat_threshold() -> f64 {
    48.44
}

fn default_decimals() -> usize {
    1
}

fn default_time_format() -> String {
    "%H:%M:%S".to_string()
}

fn default_tick_ms() -> u64 {
    50
}

fn default_poll_interval() -> u64 {
    20
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            data_bits: default_data_bits(),
            parity: ParitySetting::default(),
            stop_bits: default_stop_bits(),
            flow_control: FlowControlSetting::default(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            overheat_threshold: default_overheat_threshold(),
            decimals: default_decimals(),
            time_format: default_time_format(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeSetting::default(),
            tick_ms: default_tick_ms(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let defaults = ::config::Config::try_from(&AppConfig::default())
            .map_err(ConfigError::LoadError)?;

        let settings = ::config::Config::builder()
            .add_source(defaults)
            .add_source(::config::File::from(path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(ConfigError::LoadError)?;

        let config: AppConfig = settings
            .try_deserialize()
            .map_err(ConfigError::LoadError)?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.serial.port.trim().is_empty() {
            return Err(invalid("serial.port", "cannot be empty"));
        }

        if self.serial.baud_rate == 0 {
            return Err(invalid("serial.baud_rate", "must be greater than 0"));
        }

        if !(5..=8).contains(&self.serial.data_bits) {
            return Err(invalid("serial.data_bits", "must be 5, 6, 7, or 8"));
        }

        if self.serial.stop_bits != 1 && self.serial.stop_bits != 2 {
            return Err(invalid("serial.stop_bits", "must be 1 or 2"));
        }

        if !self.monitor.overheat_threshold.is_finite() {
            return Err(invalid("monitor.overheat_threshold", "must be a finite number"));
        }

        if self.monitor.decimals > 6 {
            return Err(invalid("monitor.decimals", "must be at most 6"));
        }

        if self.monitor.time_format.is_empty() {
            return Err(invalid("monitor.time_format", "cannot be empty"));
        }

        if self.monitor.time_format.contains([',', '\n', '\r']) {
            return Err(invalid(
                "monitor.time_format",
                "cannot contain commas or line breaks",
            ));
        }

        if StrftimeItems::new(&self.monitor.time_format).any(|item| matches!(item, Item::Error)) {
            return Err(invalid("monitor.time_format", "is not a valid strftime format"));
        }

        if self.ui.tick_ms == 0 {
            return Err(invalid("ui.tick_ms", "must be greater than 0"));
        }

        if self.service.poll_interval_ms == 0 {
            return Err(invalid("service.poll_interval_ms", "must be greater than 0"));
        }

        if crate::logging::parse_level(&self.logging.level).is_none() {
            return Err(invalid(
                "logging.level",
                "must be one of trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }

    /// Apply CLI argument overrides to configuration
    pub fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(port) = &cli.port {
            self.serial.port = port.clone();
        }

        if let Some(baud_rate) = cli.baud_rate {
            self.serial.baud_rate = baud_rate;
        }

        if let Some(level) = cli.log_level {
            self.logging.level = level.to_filter_string().to_string();
        }

        if cli.json {
            self.logging.json = true;
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::RenderError(e.to_string()).into())
    }
}

fn invalid(field: &str, message: &str) -> crate::error::AppError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.serial.data_bits, 8);
        assert_eq!(config.serial.parity, ParitySetting::None);
        assert_eq!(config.serial.stop_bits, 1);
        assert_eq!(config.serial.flow_control, FlowControlSetting::None);
        assert_eq!(config.monitor.overheat_threshold, 48.44);
        assert_eq!(config.monitor.decimals, 1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_baud_rate() {
        let mut config = AppConfig::default();
        config.serial.baud_rate = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_data_bits() {
        let mut config = AppConfig::default();
        config.serial.data_bits = 9;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_finite_threshold() {
        let mut config = AppConfig::default();
        config.monitor.overheat_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_time_format() {
        let mut config = AppConfig::default();
        config.monitor.time_format = "%Q".to_string();
        assert!(config.validate().is_err());

        config.monitor.time_format = "%H,%M,%S".to_string();
        assert!(config.validate().is_err());

        config.monitor.time_format = "%H:%M:%S\n".to_string();
        assert!(config.validate().is_err());

        config.monitor.time_format = "%H:%M:%S%.3f".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_unknown_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.monitor.overheat_threshold, 48.44);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[serial]\nport = \"/dev/ttyACM0\"\n\n[monitor]\noverheat_threshold = 40.0\n\n[ui]\ntheme = \"dark\""
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.serial.port, "/dev/ttyACM0");
        assert_eq!(config.serial.baud_rate, 9600);
        assert_eq!(config.monitor.overheat_threshold, 40.0);
        assert_eq!(config.monitor.decimals, 1);
        assert_eq!(config.ui.theme, ThemeSetting::Dark);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[serial]\nstop_bits = 3").unwrap();
        assert!(AppConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = crate::cli::Cli::parse_from(&["--port", "COM7", "--baud-rate", "115200", "--json"])
            .unwrap();
        let mut config = AppConfig::default();
        config.apply_cli_overrides(&cli);
        assert_eq!(config.serial.port, "COM7");
        assert_eq!(config.serial.baud_rate, 115200);
        assert!(config.logging.json);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AppConfig::default();
        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("overheat_threshold = 48.44"));
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
