//! The temperature tracker: threshold evaluation, history, statistics and
//! the log table.

use std::fmt::Write;

use super::stats::RunningStats;
use super::{
    LogEntry, MonitorSink, MonitorState, OverheatAlert, Reading, Statistics, format_value,
};
use crate::config::MonitorConfig;

const DEFAULT_TIME_FORMAT: &str = "%H:%M:%S";

/// Owns the session history and the log table
#[derive(Debug)]
pub struct TemperatureTracker {
    config: MonitorConfig,
    state: MonitorState,
    history: Vec<Reading>,
    log: Vec<LogEntry>,
    stats: RunningStats,
    alerts_raised: usize,
}

impl TemperatureTracker {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: MonitorState::Normal,
            history: Vec::new(),
            log: Vec::new(),
            stats: RunningStats::default(),
            alerts_raised: 0,
        }
    }

    /// Process one validated reading and report it to the sink
    pub fn record(&mut self, reading: Reading, sink: &mut dyn MonitorSink) {
        let decimals = self.config.decimals;
        sink.show_reading(&reading);

        self.state = if reading.value > self.config.overheat_threshold {
            MonitorState::Overheat
        } else {
            MonitorState::Normal
        };
        sink.set_state(self.state);

        if self.state == MonitorState::Overheat {
            let alert = OverheatAlert {
                value: reading.value,
                text: format!("High temperature: {}°C", format_value(reading.value, decimals)),
            };
            tracing::warn!(
                value = reading.value,
                threshold = self.config.overheat_threshold,
                "overheat threshold exceeded"
            );
            self.alerts_raised += 1;
            sink.raise_alert(&alert);
        }

        self.history.push(reading);
        self.stats.push(reading.value);
        if let Some(stats) = self.stats.summary() {
            sink.show_statistics(&stats.format(decimals));
        }

        let entry = LogEntry {
            time: self.format_time(&reading),
            temperature: format_value(reading.value, decimals),
        };
        sink.append_log(&entry);
        self.log.push(entry);
    }

    /// Receipt time in the configured format, `HH:MM:SS` if it cannot render
    fn format_time(&self, reading: &Reading) -> String {
        let mut time = String::new();
        if write!(time, "{}", reading.received_at.format(&self.config.time_format)).is_err() {
            tracing::warn!(format = %self.config.time_format, "invalid time format");
            return reading.received_at.format(DEFAULT_TIME_FORMAT).to_string();
        }
        time
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    pub fn history(&self) -> &[Reading] {
        &self.history
    }

    /// The log table rows, in arrival order
    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn statistics(&self) -> Option<Statistics> {
        self.stats.summary()
    }

    pub fn alerts_raised(&self) -> usize {
        self.alerts_raised
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::{MockMonitorSink, StatisticsText};
    use chrono::{Local, TimeZone};
    use mockall::Sequence;
    use mockall::predicate::*;

    fn at(h: u32, m: u32, s: u32) -> chrono::DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 17, h, m, s).unwrap()
    }

    /// Sink that accepts every call
    fn permissive_sink() -> MockMonitorSink {
        let mut sink = MockMonitorSink::new();
        sink.expect_show_reading().return_const(());
        sink.expect_set_state().return_const(());
        sink.expect_raise_alert().return_const(());
        sink.expect_show_statistics().return_const(());
        sink.expect_append_log().return_const(());
        sink
    }

    #[test]
    fn test_worked_example_alerts() {
        let mut tracker = TemperatureTracker::new(MonitorConfig::default());
        let mut sink = MockMonitorSink::new();
        sink.expect_show_reading().times(4).return_const(());
        sink.expect_set_state().times(4).return_const(());
        sink.expect_show_statistics().times(4).return_const(());
        sink.expect_append_log().times(4).return_const(());
        sink.expect_raise_alert()
            .withf(|alert: &OverheatAlert| alert.text == "High temperature: 99.0°C")
            .times(1)
            .return_const(());
        sink.expect_raise_alert()
            .withf(|alert: &OverheatAlert| alert.text == "High temperature: 48.5°C")
            .times(1)
            .return_const(());

        for (i, value) in [23.5, 99.0, 48.44, 48.45].into_iter().enumerate() {
            tracker.record(Reading::new(value, at(12, 0, i as u32)), &mut sink);
        }

        assert_eq!(tracker.alerts_raised(), 2);
        assert_eq!(tracker.state(), MonitorState::Overheat);
        let text = tracker.statistics().unwrap().format(1);
        assert_eq!(
            text,
            StatisticsText {
                min: "23.5".to_string(),
                max: "99.0".to_string(),
                average: "54.8".to_string(),
            }
        );
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let mut tracker = TemperatureTracker::new(MonitorConfig::default());
        let mut sink = MockMonitorSink::new();
        sink.expect_show_reading().return_const(());
        sink.expect_set_state()
            .with(eq(MonitorState::Normal))
            .times(1)
            .return_const(());
        sink.expect_raise_alert().never();
        sink.expect_show_statistics().return_const(());
        sink.expect_append_log().return_const(());

        tracker.record(Reading::new(48.44, at(8, 0, 0)), &mut sink);
        assert_eq!(tracker.state(), MonitorState::Normal);
        assert_eq!(tracker.alerts_raised(), 0);
    }

    #[test]
    fn test_repeated_overheat_alerts_every_reading() {
        let mut tracker = TemperatureTracker::new(MonitorConfig::default());
        let mut sink = MockMonitorSink::new();
        sink.expect_show_reading().return_const(());
        sink.expect_set_state().return_const(());
        sink.expect_raise_alert().times(3).return_const(());
        sink.expect_show_statistics().return_const(());
        sink.expect_append_log().return_const(());

        for value in [50.0, 51.0, 20.0, 60.0] {
            tracker.record(Reading::new(value, at(9, 0, 0)), &mut sink);
        }
        assert_eq!(tracker.alerts_raised(), 3);
    }

    #[test]
    fn test_sink_call_order() {
        let mut tracker = TemperatureTracker::new(MonitorConfig::default());
        let mut sink = MockMonitorSink::new();
        let mut seq = Sequence::new();

        sink.expect_show_reading()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_set_state()
            .with(eq(MonitorState::Overheat))
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_raise_alert()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_show_statistics()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        sink.expect_append_log()
            .withf(|entry: &LogEntry| entry.time == "14:03:09" && entry.temperature == "70.1")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        tracker.record(Reading::new(70.06, at(14, 3, 9)), &mut sink);
    }

    #[test]
    fn test_log_and_history_follow_arrival_order() {
        let mut tracker = TemperatureTracker::new(MonitorConfig::default());
        let mut sink = permissive_sink();

        tracker.record(Reading::new(21.04, at(10, 0, 1)), &mut sink);
        tracker.record(Reading::new(19.96, at(10, 0, 2)), &mut sink);

        let values: Vec<f64> = tracker.history().iter().map(|r| r.value).collect();
        assert_eq!(values, vec![21.04, 19.96]);
        assert_eq!(
            tracker.log(),
            &[
                LogEntry {
                    time: "10:00:01".to_string(),
                    temperature: "21.0".to_string(),
                },
                LogEntry {
                    time: "10:00:02".to_string(),
                    temperature: "20.0".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_no_statistics_before_first_reading() {
        let tracker = TemperatureTracker::new(MonitorConfig::default());
        assert!(tracker.statistics().is_none());
        assert!(tracker.log().is_empty());
    }

    #[test]
    fn test_custom_threshold_and_decimals() {
        let config = MonitorConfig {
            overheat_threshold: 30.0,
            decimals: 2,
            ..MonitorConfig::default()
        };
        let mut tracker = TemperatureTracker::new(config);
        let mut sink = permissive_sink();

        tracker.record(Reading::new(30.126, at(1, 2, 3)), &mut sink);
        assert_eq!(tracker.state(), MonitorState::Overheat);
        assert_eq!(tracker.log()[0].temperature, "30.13");
    }

    #[test]
    fn test_unrenderable_time_format_falls_back() {
        let config = MonitorConfig {
            time_format: "%Q".to_string(),
            ..MonitorConfig::default()
        };
        let mut tracker = TemperatureTracker::new(config);
        let mut sink = permissive_sink();

        tracker.record(Reading::new(20.0, at(14, 3, 9)), &mut sink);
        assert_eq!(tracker.log()[0].time, "14:03:09");
        assert_eq!(tracker.log()[0].temperature, "20.0");
    }
}
