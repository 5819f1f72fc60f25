//! Application state management for the terminal calculator.
//!
//! This module contains the main application state and mode management
//! for the terminal user interface.

use super::session::Session;
use std::path::PathBuf;
use tracing::warn;

/// Represents the current mode of the application.
///
/// The mode determines how key presses are interpreted and which popups
/// are drawn over the tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Typing the answer to the current prompt
    Prompt,
    /// Outcome of the last attempt is displayed and must be acknowledged
    Notice,
    /// Help screen is displayed
    Help,
    /// Session has ended; the summary table is shown
    Summary,
}

/// Message shown after an attempt is recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub is_error: bool,
}

/// Main application state containing the session and UI state.
///
/// # Examples
///
/// ```
/// use tcalc::application::{App, AppMode};
///
/// let app = App::default();
/// assert_eq!(app.mode, AppMode::Prompt);
/// assert!(app.input.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// The calculator session being driven
    pub session: Session,
    /// Current application mode
    pub mode: AppMode,
    /// Answer being typed at the prompt
    pub input: String,
    /// Cursor position within the input buffer, in characters
    pub cursor_position: usize,
    /// Outcome of the most recent attempt, while it is displayed
    pub notice: Option<Notice>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// How many rows the history table is scrolled back from the newest
    pub history_scroll: usize,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Where to write the session report when the session ends
    pub report_path: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            session: Session::new(),
            mode: AppMode::Prompt,
            input: String::new(),
            cursor_position: 0,
            notice: None,
            help_scroll: 0,
            history_scroll: 0,
            status_message: None,
            report_path: None,
        }
    }
}

impl App {
    pub fn with_report_path(report_path: Option<PathBuf>) -> Self {
        Self {
            report_path,
            ..Self::default()
        }
    }

    /// Submits the input buffer as the answer to the current prompt.
    ///
    /// When the answer completes an attempt the outcome is shown as a notice
    /// and the history view jumps back to the newest row.
    pub fn submit_input(&mut self) {
        let answer = std::mem::take(&mut self.input);
        self.cursor_position = 0;
        self.status_message = None;

        if let Some(attempt) = self.session.submit(&answer) {
            self.notice = Some(Notice {
                message: attempt.notification(),
                is_error: !attempt.is_ok(),
            });
            self.history_scroll = 0;
            self.mode = AppMode::Notice;
        }
    }

    /// Dismisses the notice and returns to the prompt.
    pub fn acknowledge_notice(&mut self) {
        self.notice = None;
        self.mode = AppMode::Prompt;
    }

    /// Ends the session, discarding any partially entered attempt.
    pub fn cancel_session(&mut self) {
        self.session.cancel();
        self.input.clear();
        self.cursor_position = 0;
        self.notice = None;
        self.history_scroll = 0;
        self.mode = AppMode::Summary;
    }

    /// Processes the result of writing the session report.
    ///
    /// # Arguments
    ///
    /// * `result` - Result of the write (path written, or error message)
    pub fn set_report_result(&mut self, result: Result<String, String>) {
        match result {
            Ok(path) => {
                self.status_message = Some(format!("Report written to {}", path));
            }
            Err(error) => {
                warn!(%error, "report write failed");
                self.status_message = Some(format!("Report failed: {}", error));
            }
        }
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = if self.session.is_finished() {
            AppMode::Summary
        } else {
            AppMode::Prompt
        };
    }

    pub fn scroll_history_back(&mut self, rows: usize) {
        let max_scroll = self.session.history().len().saturating_sub(1);
        self.history_scroll = (self.history_scroll + rows).min(max_scroll);
    }

    pub fn scroll_history_forward(&mut self, rows: usize) {
        self.history_scroll = self.history_scroll.saturating_sub(rows);
    }

    pub fn insert_char(&mut self, c: char) {
        let index = self.byte_index();
        self.input.insert(index, c);
        self.cursor_position += 1;
    }

    /// Backspace.
    pub fn delete_char_before_cursor(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    /// Delete.
    pub fn delete_char_at_cursor(&mut self) {
        if self.cursor_position < self.input_len() {
            let index = self.byte_index();
            self.input.remove(index);
        }
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input_len();
    }

    fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor_position)
            .map(|(index, _)| index)
            .unwrap_or(self.input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SessionState;

    fn type_answer(app: &mut App, text: &str) {
        for c in text.chars() {
            app.insert_char(c);
        }
        app.submit_input();
    }

    #[test]
    fn test_app_default() {
        let app = App::default();
        assert_eq!(app.mode, AppMode::Prompt);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
        assert!(app.notice.is_none());
        assert!(app.status_message.is_none());
        assert!(app.report_path.is_none());
        assert_eq!(app.session.state(), SessionState::AwaitingFirstOperand);
    }

    #[test]
    fn test_submit_advances_prompts() {
        let mut app = App::default();
        type_answer(&mut app, "6");
        assert_eq!(app.mode, AppMode::Prompt);
        assert_eq!(app.session.state(), SessionState::AwaitingSecondOperand);
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn test_completed_attempt_shows_notice() {
        let mut app = App::default();
        type_answer(&mut app, "6");
        type_answer(&mut app, "3");
        type_answer(&mut app, "*");

        assert_eq!(app.mode, AppMode::Notice);
        assert_eq!(
            app.notice,
            Some(Notice { message: "6 * 3 = 18".to_string(), is_error: false })
        );

        app.acknowledge_notice();
        assert_eq!(app.mode, AppMode::Prompt);
        assert!(app.notice.is_none());
        assert_eq!(app.session.history().len(), 1);
    }

    #[test]
    fn test_error_notice() {
        let mut app = App::default();
        type_answer(&mut app, "6");
        type_answer(&mut app, "0");
        type_answer(&mut app, "%");

        let notice = app.notice.clone().unwrap();
        assert!(notice.is_error);
        assert_eq!(notice.message, "Error: Modulus by zero");
    }

    #[test]
    fn test_cancel_session() {
        let mut app = App::default();
        type_answer(&mut app, "1");
        app.insert_char('2');

        app.cancel_session();
        assert_eq!(app.mode, AppMode::Summary);
        assert!(app.session.is_finished());
        assert!(app.input.is_empty());
        assert!(app.session.history().is_empty());
    }

    #[test]
    fn test_report_result_messages() {
        let mut app = App::default();
        app.set_report_result(Ok("out.csv".to_string()));
        assert_eq!(app.status_message.as_deref(), Some("Report written to out.csv"));

        app.set_report_result(Err("disk full".to_string()));
        assert_eq!(app.status_message.as_deref(), Some("Report failed: disk full"));
    }

    #[test]
    fn test_cursor_editing() {
        let mut app = App::default();
        for c in "1.5".chars() {
            app.insert_char(c);
        }
        app.move_cursor_home();
        app.insert_char('-');
        assert_eq!(app.input, "-1.5");

        app.move_cursor_end();
        app.delete_char_before_cursor();
        assert_eq!(app.input, "-1.");

        app.move_cursor_home();
        app.delete_char_at_cursor();
        assert_eq!(app.input, "1.");
        assert_eq!(app.cursor_position, 0);

        app.move_cursor_left();
        assert_eq!(app.cursor_position, 0);
        app.move_cursor_right();
        app.move_cursor_right();
        app.move_cursor_right();
        assert_eq!(app.cursor_position, 2);
    }

    #[test]
    fn test_cursor_with_multibyte_input() {
        let mut app = App::default();
        app.insert_char('é');
        app.insert_char('1');
        app.move_cursor_left();
        app.delete_char_before_cursor();
        assert_eq!(app.input, "1");
        assert_eq!(app.cursor_position, 0);
    }

    #[test]
    fn test_help_returns_to_previous_mode() {
        let mut app = App::default();
        app.open_help();
        assert_eq!(app.mode, AppMode::Help);
        app.close_help();
        assert_eq!(app.mode, AppMode::Prompt);

        app.cancel_session();
        app.open_help();
        app.close_help();
        assert_eq!(app.mode, AppMode::Summary);
    }

    #[test]
    fn test_history_scroll_bounds() {
        let mut app = App::default();
        for answers in [["1", "1", "+"], ["2", "2", "+"], ["3", "3", "+"]] {
            for answer in answers {
                type_answer(&mut app, answer);
            }
            app.acknowledge_notice();
        }

        app.scroll_history_back(10);
        assert_eq!(app.history_scroll, 2);
        app.scroll_history_forward(1);
        assert_eq!(app.history_scroll, 1);
        app.scroll_history_forward(5);
        assert_eq!(app.history_scroll, 0);
    }
}
