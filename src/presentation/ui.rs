use crate::application::{App, AppMode};
use crate::domain::{HistoryRow, SummaryStats};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

const OK_STYLE: Style = Style::new().fg(Color::Green);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const HEADER_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

pub fn render_ui(f: &mut Frame, app: &App) {
    let summary_height = if app.session.is_finished() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(summary_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_history(f, app, chunks[1]);
    if app.session.is_finished() {
        render_summary(f, &app.session.summary(), chunks[2]);
    }
    render_status_bar(f, app, chunks[3]);

    match app.mode {
        AppMode::Notice => {
            if let Some(notice) = &app.notice {
                render_notice_popup(f, &notice.message, notice.is_error);
            }
        }
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Prompt | AppMode::Summary => {}
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let header = Paragraph::new(format!(
        "tcalc - Terminal Calculator | Attempts: {} | Valid results: {}",
        app.session.history().len(),
        app.session.valid_results().len()
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn render_history(f: &mut Frame, app: &App, area: Rect) {
    let history = app.session.history();
    let visible_rows = (area.height as usize).saturating_sub(3);
    let end = history.len().saturating_sub(app.history_scroll);
    let start = end.saturating_sub(visible_rows);

    let header = Row::new(HistoryRow::HEADERS.map(|h| Cell::from(h).style(HEADER_STYLE))).height(1);

    let rows: Vec<Row> = history[start..end]
        .iter()
        .map(|attempt| {
            let row = attempt.to_row();
            let result_style = if attempt.is_ok() { OK_STYLE } else { ERROR_STYLE };
            Row::new(vec![
                Cell::from(row.number_1),
                Cell::from(row.operator),
                Cell::from(row.number_2),
                Cell::from(row.result).style(result_style),
            ])
        })
        .collect();

    let title = if app.history_scroll > 0 {
        format!("History (rows {}-{} of {})", start + 1, end, history.len())
    } else {
        "History".to_string()
    };

    let widths = [
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(14),
        Constraint::Min(10),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_summary(f: &mut Frame, stats: &SummaryStats, area: Rect) {
    let header = Row::new(SummaryStats::HEADERS.map(|h| Cell::from(h).style(HEADER_STYLE))).height(1);
    let row = Row::new(stats.cells().map(Cell::from));

    let table = Table::new(vec![row], [Constraint::Ratio(1, 4); 4])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Summary"))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let prompt = app.session.prompt_message().unwrap_or("");
    let input_text = match app.mode {
        AppMode::Prompt => format!("{} {}", prompt, app.input),
        AppMode::Notice => "Enter/Space/Esc: continue".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
        AppMode::Summary => match &app.status_message {
            Some(status) => format!("{} | q/Enter/Esc: quit", status),
            None => "Session ended | ↑↓: scroll history | F1/?: help | q/Enter/Esc: quit".to_string(),
        },
    };

    let title = match app.mode {
        AppMode::Prompt => "Input (Enter: submit | Esc: end session | F1: help)",
        _ => "Status",
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(match app.mode {
            AppMode::Prompt => Style::default().fg(Color::Green),
            AppMode::Notice => Style::default(),
            AppMode::Help => Style::default().fg(Color::Cyan),
            AppMode::Summary => Style::default().fg(Color::Yellow),
        });
    f.render_widget(input, area);

    if app.mode == AppMode::Prompt {
        let before_cursor = prompt.chars().count() + 1 + app.cursor_position;
        let x = area.x + 1 + before_cursor as u16;
        if x < area.x + area.width.saturating_sub(1) {
            f.set_cursor_position((x, area.y + 1));
        }
    }
}

fn render_notice_popup(f: &mut Frame, message: &str, is_error: bool) {
    let area = f.area();
    let width = (message.chars().count() as u16 + 4).max(30).min(area.width);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(5) / 2,
        width,
        height: 5u16.min(area.height),
    };

    f.render_widget(Clear, popup_area);

    let (title, style) = if is_error {
        ("Error", ERROR_STYLE)
    } else {
        ("Result", OK_STYLE)
    };
    let popup = Paragraph::new(format!("{}\n\n[Enter] OK", message))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(title).style(style));

    f.render_widget(popup, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("tcalc Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"TCALC REFERENCE

=== HOW IT WORKS ===
Each calculation asks three questions in turn:
  1. the first number (x)
  2. the second number (y)
  3. the operator
Every completed calculation is added to the history, whether it
succeeded or not. Ending the session shows the summary table.

=== NUMBERS ===
Plain decimals only: 3, -2.5, .5, -.5, 10.
Not accepted: exponents (1e5), a leading +, separators (1,000)
Surrounding spaces are ignored.

=== OPERATORS ===
+       Addition                    6 + 3 = 9
-       Subtraction                 6 - 3 = 3
*       Multiplication              6 * 3 = 18
/       Division                    6 / 3 = 2
%       Remainder                   6 % 4 = 2

The remainder takes the sign of x: -7 % 3 = -1
Dividing by zero, or taking a remainder by zero, is an error.

=== SUMMARY ===
Minimum, maximum, average (two decimals) and total of the
successful results. Shows N/A when nothing succeeded.

=== KEYS ===
Enter           Submit the answer / dismiss a result
Esc, Ctrl+C     End the session (the current calculation is dropped)
←→ Home End     Move the cursor
Backspace/Del   Edit the answer
PgUp/PgDn       Scroll the history
F1              Show this help
q               Quit once the summary is shown

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn run_answers(app: &mut App, answers: &[&str]) {
        for answer in answers {
            app.input = answer.to_string();
            app.submit_input();
            if app.notice.is_some() {
                app.acknowledge_notice();
            }
        }
    }

    #[test]
    fn test_prompt_screen() {
        let app = App::default();
        let screen = render_to_string(&app);
        assert!(screen.contains("Number 1"));
        assert!(screen.contains("Operator"));
        assert!(screen.contains("Enter the first number (x):"));
        assert!(!screen.contains("Minimum"));
    }

    #[test]
    fn test_history_rows_rendered() {
        let mut app = App::default();
        run_answers(&mut app, &["10", "2", "/", "1", "0", "/"]);
        let screen = render_to_string(&app);
        assert!(screen.contains("Error: Division by zero"));
        assert!(screen.contains("Attempts: 2"));
        assert!(screen.contains("Valid results: 1"));
    }

    #[test]
    fn test_summary_rendered_after_cancel() {
        let mut app = App::default();
        run_answers(&mut app, &["10", "2", "/"]);
        app.cancel_session();
        let screen = render_to_string(&app);
        assert!(screen.contains("Minimum"));
        assert!(screen.contains("5.00"));
    }

    #[test]
    fn test_empty_summary_shows_not_applicable() {
        let mut app = App::default();
        app.cancel_session();
        let screen = render_to_string(&app);
        assert_eq!(screen.matches("N/A").count(), 4);
    }

    #[test]
    fn test_notice_popup() {
        let mut app = App::default();
        for answer in ["6", "3", "*"] {
            app.input = answer.to_string();
            app.submit_input();
        }
        let screen = render_to_string(&app);
        assert!(screen.contains("6 * 3 = 18"));
        assert!(screen.contains("[Enter] OK"));
    }

    #[test]
    fn test_help_popup() {
        let mut app = App::default();
        app.open_help();
        let screen = render_to_string(&app);
        assert!(screen.contains("TCALC REFERENCE"));
    }
}
