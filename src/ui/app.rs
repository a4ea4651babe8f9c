//! Application state management for the TUI.
//!
//! The `App` is the interactive display collaborator: the tracker reports
//! every reading to it through `MonitorSink`, and keyboard actions update
//! its view state.

use std::path::PathBuf;

use crate::error::ExportError;
use crate::export::ExportOutcome;
use crate::monitor::{LogEntry, MonitorSink, MonitorState, OverheatAlert, Reading, StatisticsText};
use crate::ui::input::{InputAction, InputMode};
use crate::ui::theme::Theme;

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

/// A modal message box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dialog {
    /// Overheat warning, readings keep flowing behind it
    Alert(String),
    /// Fatal session error such as a port that failed to open
    Error(String),
}

/// Work the UI asks the run loop to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    None,
    /// Export the log table; `None` means the prompt was cancelled
    Export(Option<PathBuf>),
}

/// Application state
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,
    pub theme: Theme,
    /// Last reading received
    pub current: Option<Reading>,
    pub state: MonitorState,
    pub statistics: Option<StatisticsText>,
    /// Rows of the log table
    pub log: Vec<LogEntry>,
    /// Selected log row; `None` follows the newest row
    pub selected_row: Option<usize>,
    pub dialog: Option<Dialog>,
    /// Text of the export prompt while it is open
    pub prompt: Option<String>,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
    pub alerts_raised: usize,
    pub overheat_threshold: f64,
    default_export_path: PathBuf,
}

impl App {
    /// Create a new application state
    pub fn new(
        theme: Theme,
        source: Option<&str>,
        overheat_threshold: f64,
        default_export_path: PathBuf,
    ) -> Self {
        let status_message = match source {
            Some(name) => format!("Reading from {}", name),
            None => "Serial reader inactive".to_string(),
        };

        Self {
            should_quit: false,
            theme,
            current: None,
            state: MonitorState::Normal,
            statistics: None,
            log: Vec::new(),
            selected_row: None,
            dialog: None,
            prompt: None,
            show_help: false,
            status_message: Some(status_message),
            error_message: None,
            alerts_raised: 0,
            overheat_threshold,
            default_export_path,
        }
    }

    /// Which input mapping applies right now
    pub fn input_mode(&self) -> InputMode {
        if self.prompt.is_some() {
            InputMode::Prompt
        } else if self.dialog.is_some() {
            InputMode::Dialog
        } else {
            InputMode::Normal
        }
    }

    /// Apply a user action, returning any work for the run loop
    pub fn apply(&mut self, action: InputAction) -> AppCommand {
        match action {
            InputAction::Quit => self.should_quit = true,
            InputAction::ToggleTheme => {
                self.theme = self.theme.toggled();
                self.set_status(format!("Theme: {}", self.theme.name()));
            }
            InputAction::StartExport => {
                self.prompt = Some(self.default_export_path.display().to_string());
            }
            InputAction::ToggleHelp => self.show_help = !self.show_help,
            InputAction::ScrollUp => self.scroll_up(1),
            InputAction::ScrollDown => self.scroll_down(1),
            InputAction::PageUp => self.scroll_up(PAGE_SIZE),
            InputAction::PageDown => self.scroll_down(PAGE_SIZE),
            InputAction::ScrollTop => {
                if !self.log.is_empty() {
                    self.selected_row = Some(0);
                }
            }
            InputAction::ScrollBottom => self.selected_row = None,
            InputAction::Dismiss => self.dialog = None,
            InputAction::PromptInput(c) => {
                if let Some(input) = self.prompt.as_mut() {
                    input.push(c);
                }
            }
            InputAction::PromptBackspace => {
                if let Some(input) = self.prompt.as_mut() {
                    input.pop();
                }
            }
            InputAction::PromptSubmit => {
                if let Some(input) = self.prompt.take() {
                    let path = input.trim();
                    if path.is_empty() {
                        return AppCommand::Export(None);
                    }
                    self.default_export_path = PathBuf::from(path);
                    return AppCommand::Export(Some(self.default_export_path.clone()));
                }
            }
            InputAction::PromptCancel => {
                if self.prompt.take().is_some() {
                    return AppCommand::Export(None);
                }
            }
            InputAction::None => {}
        }
        AppCommand::None
    }

    /// Report the result of an export request
    pub fn export_finished(&mut self, result: Result<ExportOutcome, ExportError>) {
        match result {
            Ok(ExportOutcome::Cancelled) => {}
            Ok(ExportOutcome::Written { path, rows }) => {
                self.clear_error();
                self.set_status(format!("Exported {} rows to {}", rows, path.display()));
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Show a session-level error once, as a dialog
    pub fn show_session_error(&mut self, message: String) {
        self.set_error(message.clone());
        self.dialog = Some(Dialog::Error(message));
    }


    /// Index of the highlighted log row, if any
    pub fn highlighted_row(&self) -> Option<usize> {
        match self.selected_row {
            Some(row) => Some(row.min(self.log.len().saturating_sub(1))),
            None => self.log.len().checked_sub(1),
        }
    }

    fn scroll_up(&mut self, rows: usize) {
        if let Some(row) = self.highlighted_row() {
            self.selected_row = Some(row.saturating_sub(rows));
        }
    }

    fn scroll_down(&mut self, rows: usize) {
        if let Some(row) = self.highlighted_row() {
            let next = row + rows;
            self.selected_row = if next + 1 >= self.log.len() {
                None
            } else {
                Some(next)
            };
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Set error message
    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}

impl MonitorSink for App {
    fn show_reading(&mut self, reading: &Reading) {
        self.current = Some(*reading);
    }

    fn set_state(&mut self, state: MonitorState) {
        self.state = state;
    }

    fn raise_alert(&mut self, alert: &OverheatAlert) {
        self.alerts_raised += 1;
        if !matches!(self.dialog, Some(Dialog::Error(_))) {
            self.dialog = Some(Dialog::Alert(alert.text.clone()));
        }
    }

    fn show_statistics(&mut self, stats: &StatisticsText) {
        self.statistics = Some(stats.clone());
    }

    fn append_log(&mut self, entry: &LogEntry) {
        self.log.push(entry.clone());
    }
}
