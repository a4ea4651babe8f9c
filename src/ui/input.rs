//! Input handling for the TUI.
//!
//! This module handles keyboard input and translates it into application
//! actions. The same key means different things while a dialog or the
//! export prompt is open.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Which part of the UI currently receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Dialog,
    Prompt,
}

/// Actions that can be performed based on user input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Quit the application
    Quit,
    /// Switch between light and dark theme
    ToggleTheme,
    /// Open the export prompt
    StartExport,
    /// Toggle help panel
    ToggleHelp,
    /// Scroll the log table
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
    /// Close the open dialog
    Dismiss,
    /// Export prompt editing
    PromptInput(char),
    PromptBackspace,
    PromptSubmit,
    PromptCancel,
    /// No action
    None,
}

/// Wait up to `timeout` for a key and return the corresponding action
pub fn handle_input(timeout: Duration, mode: InputMode) -> std::io::Result<InputAction> {
    if event::poll(timeout)? {
        if let Event::Key(key_event) = event::read()? {
            if key_event.kind != KeyEventKind::Press {
                return Ok(InputAction::None);
            }
            return Ok(map_key_to_action(key_event, mode));
        }
    }
    Ok(InputAction::None)
}

/// Map a key event to an application action
fn map_key_to_action(key_event: KeyEvent, mode: InputMode) -> InputAction {
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return InputAction::Quit;
    }

    match mode {
        InputMode::Prompt => match key_event.code {
            KeyCode::Enter => InputAction::PromptSubmit,
            KeyCode::Esc => InputAction::PromptCancel,
            KeyCode::Backspace => InputAction::PromptBackspace,
            KeyCode::Char(c) => InputAction::PromptInput(c),
            _ => InputAction::None,
        },
        InputMode::Dialog => match key_event.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => InputAction::Dismiss,
            KeyCode::Char('q') | KeyCode::Char('Q') => InputAction::Quit,
            _ => InputAction::None,
        },
        InputMode::Normal => match key_event.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputAction::Quit,

            // Theme
            KeyCode::Char('t') | KeyCode::Char('T') => InputAction::ToggleTheme,

            // Export
            KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('s') => {
                InputAction::StartExport
            }

            // Scroll the log table
            KeyCode::Up | KeyCode::Char('k') => InputAction::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => InputAction::ScrollDown,
            KeyCode::PageUp => InputAction::PageUp,
            KeyCode::PageDown => InputAction::PageDown,
            KeyCode::Home | KeyCode::Char('g') => InputAction::ScrollTop,
            KeyCode::End | KeyCode::Char('G') => InputAction::ScrollBottom,

            // Help
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::F(1) => {
                InputAction::ToggleHelp
            }

            _ => InputAction::None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_quit_actions() {
        assert_eq!(
            map_key_to_action(key(KeyCode::Char('q')), InputMode::Normal),
            InputAction::Quit
        );
        assert_eq!(
            map_key_to_action(key(KeyCode::Esc), InputMode::Normal),
            InputAction::Quit
        );
        assert_eq!(
            map_key_to_action(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                InputMode::Prompt
            ),
            InputAction::Quit
        );
    }

    #[test]
    fn test_prompt_captures_text() {
        assert_eq!(
            map_key_to_action(key(KeyCode::Char('q')), InputMode::Prompt),
            InputAction::PromptInput('q')
        );
        assert_eq!(
            map_key_to_action(key(KeyCode::Esc), InputMode::Prompt),
            InputAction::PromptCancel
        );
        assert_eq!(
            map_key_to_action(key(KeyCode::Enter), InputMode::Prompt),
            InputAction::PromptSubmit
        );
    }

    #[test]
    fn test_dialog_dismiss() {
        assert_eq!(
            map_key_to_action(key(KeyCode::Esc), InputMode::Dialog),
            InputAction::Dismiss
        );
        assert_eq!(
            map_key_to_action(key(KeyCode::Char('t')), InputMode::Dialog),
            InputAction::None
        );
    }

    #[test]
    fn test_navigation() {
        assert_eq!(
            map_key_to_action(key(KeyCode::Up), InputMode::Normal),
            InputAction::ScrollUp
        );
        assert_eq!(
            map_key_to_action(key(KeyCode::End), InputMode::Normal),
            InputAction::ScrollBottom
        );
    }
}
