//! Run loops for the interactive and headless modes.
//!
//! Both loops are single-threaded: they pull from the session, let it
//! report to a display collaborator, and then wait for input or for the
//! next poll interval.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use chrono::Local;
use serde::Serialize;

use crate::config::AppConfig;
use crate::error::{Result, ServiceError, UiError};
use crate::export::{ExportOutcome, export_csv};
use crate::monitor::{
    LogEntry, MonitorSession, MonitorSink, MonitorState, OverheatAlert, Reading, StatisticsText,
};
use crate::ui::{self, App, AppCommand};

/// Headless display collaborator: tracing events and optional JSON lines
pub struct ConsoleSink<W: Write> {
    out: W,
    json: bool,
    state: MonitorState,
    stats: Option<StatisticsText>,
}

/// One JSON line per logged reading
#[derive(Debug, Serialize)]
struct ReadingRecord<'a> {
    time: &'a str,
    temperature: &'a str,
    state: MonitorState,
    min: Option<&'a str>,
    max: Option<&'a str>,
    average: Option<&'a str>,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            state: MonitorState::Normal,
            stats: None,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_record(&mut self, entry: &LogEntry) -> io::Result<()> {
        let record = ReadingRecord {
            time: &entry.time,
            temperature: &entry.temperature,
            state: self.state,
            min: self.stats.as_ref().map(|s| s.min.as_str()),
            max: self.stats.as_ref().map(|s| s.max.as_str()),
            average: self.stats.as_ref().map(|s| s.average.as_str()),
        };
        serde_json::to_writer(&mut self.out, &record)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write> MonitorSink for ConsoleSink<W> {
    fn show_reading(&mut self, reading: &Reading) {
        tracing::trace!(value = reading.value, "reading received");
    }

    fn set_state(&mut self, state: MonitorState) {
        if state != self.state {
            tracing::info!(state = state.label(), "state changed");
        }
        self.state = state;
    }

    fn raise_alert(&mut self, alert: &OverheatAlert) {
        tracing::warn!(value = alert.value, "{}", alert.text);
    }

    fn show_statistics(&mut self, stats: &StatisticsText) {
        self.stats = Some(stats.clone());
    }

    fn append_log(&mut self, entry: &LogEntry) {
        let (min, max, average) = match &self.stats {
            Some(s) => (s.min.as_str(), s.max.as_str(), s.average.as_str()),
            None => ("--", "--", "--"),
        };
        tracing::info!(
            time = %entry.time,
            temperature = %entry.temperature,
            min,
            max,
            average,
            "reading logged"
        );

        if self.json {
            if let Err(e) = self.write_record(entry) {
                tracing::error!(error = %e, "failed to write reading record");
            }
        }
    }
}

/// Setup signal handlers for graceful shutdown
pub fn setup_signal_handler(stop_signal: Arc<AtomicBool>) -> Result<()> {
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, stop_signal.clone())
            .map_err(|e| ServiceError::SignalError(e.to_string()))?;
    }
    Ok(())
}

/// Run without a UI until interrupted, optionally exporting on exit
pub fn run_headless(
    session: &mut MonitorSession,
    config: &AppConfig,
    export_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let port = session
        .source_name()
        .unwrap_or_else(|| "<none>".to_string());
    tracing::info!(
        port = %port,
        threshold = config.monitor.overheat_threshold,
        "starting headless monitor"
    );

    let stop = Arc::new(AtomicBool::new(false));
    setup_signal_handler(stop.clone())?;

    let mut sink = ConsoleSink::new(io::stdout(), json);
    let interval = Duration::from_millis(config.service.poll_interval_ms);
    let mut failure = None;

    while !stop.load(Ordering::SeqCst) {
        match session.poll(&mut sink) {
            Ok(0) => thread::sleep(interval),
            Ok(_) => {}
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    let tracker = session.tracker();
    tracing::info!(
        readings = tracker.history().len(),
        alerts = tracker.alerts_raised(),
        state = tracker.state().label(),
        unterminated_bytes = session.reader().pending().len(),
        "monitor stopped"
    );

    match export_csv(export_path, tracker.log()) {
        Ok(ExportOutcome::Written { .. } | ExportOutcome::Cancelled) => {}
        Err(e) => tracing::error!(error = %e, "export failed"),
    }

    match failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

/// Run the terminal UI until the user quits or the process is signalled
pub fn run_interactive(
    session: &mut MonitorSession,
    config: &AppConfig,
    open_error: Option<String>,
) -> Result<()> {
    let stop = Arc::new(AtomicBool::new(false));
    setup_signal_handler(stop.clone())?;

    let mut terminal =
        ratatui::try_init().map_err(|e| UiError::InitializationError(e.to_string()))?;
    let result = interactive_loop(&mut terminal, session, config, open_error, &stop);
    ratatui::restore();
    result
}

/// Whether the interactive loop should end
fn should_exit(app: &App, stop: &AtomicBool) -> bool {
    app.should_quit || stop.load(Ordering::SeqCst)
}

fn interactive_loop(
    terminal: &mut ratatui::DefaultTerminal,
    session: &mut MonitorSession,
    config: &AppConfig,
    open_error: Option<String>,
    stop: &AtomicBool,
) -> Result<()> {
    let port = session.source_name();
    let mut app = App::new(
        config.ui.theme.into(),
        port.as_deref(),
        config.monitor.overheat_threshold,
        default_export_path(config),
    );
    if let Some(message) = open_error {
        app.show_session_error(message);
    }

    let tick = Duration::from_millis(config.ui.tick_ms);

    while !should_exit(&app, stop) {
        if let Err(e) = session.poll(&mut app) {
            app.show_session_error(e.to_string());
        }

        terminal
            .draw(|frame| ui::draw(frame, &app, session))
            .map_err(|e| UiError::RenderError(e.to_string()))?;

        let action = ui::handle_input(tick, app.input_mode())
            .map_err(|e| UiError::InputError(e.to_string()))?;

        if let AppCommand::Export(path) = app.apply(action) {
            let result = export_csv(path.as_deref(), session.tracker().log());
            app.export_finished(result);
        }
    }

    tracing::info!(
        readings = session.tracker().history().len(),
        signalled = stop.load(Ordering::SeqCst),
        "interactive session ended"
    );
    Ok(())
}

/// Configured export path, or a timestamped file in the working directory
fn default_export_path(config: &AppConfig) -> PathBuf {
    config.export.default_path.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "temperatures_{}.csv",
            Local::now().format("%Y%m%d_%H%M%S")
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;

    #[test]
    fn test_console_sink_json_lines() {
        let mut session = MonitorSession::new(None, MonitorConfig::default());
        let mut sink = ConsoleSink::new(Vec::new(), true);
        session.ingest(b"23.5\nabc\n99.1\n", &mut sink);

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let records: Vec<serde_json::Value> = output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["temperature"], "23.5");
        assert_eq!(records[0]["state"], "normal");
        assert_eq!(records[1]["temperature"], "99.1");
        assert_eq!(records[1]["state"], "overheat");
        assert_eq!(records[1]["min"], "23.5");
        assert_eq!(records[1]["average"], "61.3");
        assert_eq!(
            records[1]["time"].as_str().unwrap(),
            session.tracker().log()[1].time
        );
    }

    #[test]
    fn test_console_sink_plain_writes_nothing_to_stdout() {
        let mut session = MonitorSession::new(None, MonitorConfig::default());
        let mut sink = ConsoleSink::new(Vec::new(), false);
        session.ingest(b"20.0\n", &mut sink);
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn test_sigterm_sets_stop_flag() {
        let stop = Arc::new(AtomicBool::new(false));
        setup_signal_handler(stop.clone()).unwrap();

        let app = App::new(
            crate::ui::theme::Theme::Light,
            None,
            48.44,
            PathBuf::from("out.csv"),
        );
        assert!(!should_exit(&app, &stop));

        signal_hook::low_level::raise(signal_hook::consts::SIGTERM).unwrap();
        assert!(stop.load(Ordering::SeqCst));
        assert!(should_exit(&app, &stop));
    }

    #[test]
    fn test_quit_key_exits_without_signal() {
        let stop = AtomicBool::new(false);
        let mut app = App::new(
            crate::ui::theme::Theme::Dark,
            None,
            48.44,
            PathBuf::from("out.csv"),
        );
        app.apply(crate::ui::input::InputAction::Quit);
        assert!(should_exit(&app, &stop));
    }

    #[test]
    fn test_default_export_path() {
        let mut config = AppConfig::default();
        let generated = default_export_path(&config);
        let name = generated.to_string_lossy();
        assert!(name.starts_with("temperatures_") && name.ends_with(".csv"));

        config.export.default_path = Some(PathBuf::from("/tmp/log.csv"));
        assert_eq!(default_export_path(&config), PathBuf::from("/tmp/log.csv"));
    }
}
