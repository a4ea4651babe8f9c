//! Temperature tracking: readings, running statistics, the overheat state
//! and the display collaborator they are reported to.

use chrono::{DateTime, Local};
use serde::Serialize;

pub mod session;
pub mod stats;
pub mod tracker;

pub use session::MonitorSession;
pub use stats::Statistics;
pub use tracker::TemperatureTracker;

/// A single decoded temperature value and the wall-clock time it arrived
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub received_at: DateTime<Local>,
}

impl Reading {
    pub fn new(value: f64, received_at: DateTime<Local>) -> Self {
        Self { value, received_at }
    }
}

/// Overheat state, re-evaluated on every reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MonitorState {
    #[default]
    Normal,
    Overheat,
}

impl MonitorState {
    pub fn label(&self) -> &'static str {
        match self {
            MonitorState::Normal => "Normal",
            MonitorState::Overheat => "Overheat!",
        }
    }
}

/// One row of the log table, stored exactly as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub time: String,
    pub temperature: String,
}

/// Raised once for every reading above the overheat threshold
#[derive(Debug, Clone, PartialEq)]
pub struct OverheatAlert {
    pub value: f64,
    pub text: String,
}

/// Min, max and average as displayed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsText {
    pub min: String,
    pub max: String,
    pub average: String,
}

/// Display collaborator notified by the tracker, in this order per reading:
/// `show_reading`, `set_state`, `raise_alert` (overheat only),
/// `show_statistics`, `append_log`.
#[cfg_attr(test, mockall::automock)]
pub trait MonitorSink {
    fn show_reading(&mut self, reading: &Reading);
    fn set_state(&mut self, state: MonitorState);
    fn raise_alert(&mut self, alert: &OverheatAlert);
    fn show_statistics(&mut self, stats: &StatisticsText);
    fn append_log(&mut self, entry: &LogEntry);
}

/// Format a value with a fixed number of decimals.
///
/// Uses Rust's float formatting, which rounds the exact binary value to the
/// nearest decimal. `48.45` is stored slightly above the tie and shows as
/// `48.5`.
pub fn format_value(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}
