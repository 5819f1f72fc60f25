use crate::application::{App, AppMode};
use crate::infrastructure::ReportWriter;
use crossterm::event::{KeyCode, KeyModifiers};

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        match app.mode {
            AppMode::Prompt => Self::handle_prompt_mode(app, key, modifiers),
            AppMode::Notice => Self::handle_notice_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
            AppMode::Summary => Self::handle_summary_mode(app, key),
        }
    }

    fn handle_prompt_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('c') | KeyCode::Char('d') = key {
                Self::end_session(app);
            }
            return;
        }

        match key {
            KeyCode::Enter => {
                app.submit_input();
            }
            KeyCode::Esc => {
                Self::end_session(app);
            }
            KeyCode::F(1) => {
                app.open_help();
            }
            KeyCode::Backspace => {
                app.delete_char_before_cursor();
            }
            KeyCode::Delete => {
                app.delete_char_at_cursor();
            }
            KeyCode::Left => {
                app.move_cursor_left();
            }
            KeyCode::Right => {
                app.move_cursor_right();
            }
            KeyCode::Home => {
                app.move_cursor_home();
            }
            KeyCode::End => {
                app.move_cursor_end();
            }
            KeyCode::PageUp => {
                app.scroll_history_back(5);
            }
            KeyCode::PageDown => {
                app.scroll_history_forward(5);
            }
            KeyCode::Char(c) => {
                app.insert_char(c);
            }
            _ => {}
        }
    }

    fn handle_notice_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                app.acknowledge_notice();
            }
            _ => {}
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('?') | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if app.help_scroll > 0 {
                    app.help_scroll -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.help_scroll += 1;
            }
            KeyCode::PageUp => {
                app.help_scroll = app.help_scroll.saturating_sub(5);
            }
            KeyCode::PageDown => {
                app.help_scroll += 5;
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }

    /// Quitting is handled by the main loop; only scrolling and help here.
    fn handle_summary_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Up | KeyCode::PageUp | KeyCode::Char('k') => {
                app.scroll_history_back(if key == KeyCode::PageUp { 5 } else { 1 });
            }
            KeyCode::Down | KeyCode::PageDown | KeyCode::Char('j') => {
                app.scroll_history_forward(if key == KeyCode::PageDown { 5 } else { 1 });
            }
            KeyCode::F(1) | KeyCode::Char('?') => {
                app.open_help();
            }
            _ => {}
        }
    }

    /// Cancels the session and writes the report, if one was requested.
    fn end_session(app: &mut App) {
        app.cancel_session();
        if let Some(path) = app.report_path.clone() {
            let result = ReportWriter::write(&app.session, &path).map_err(|e| e.to_string());
            app.set_report_result(result);
        }
    }
}
