//! Line-oriented frontend for terminals where the full-screen UI is not
//! wanted (pipes, scripts, dumb terminals).

use crate::application::{Prompter, Session};
use crate::domain::{Attempt, HistoryRow, SummaryStats};
use rustyline::error::ReadlineError;
use rustyline::{Config as RlConfig, DefaultEditor};
use tracing::warn;

/// [`Prompter`] backed by rustyline. Ctrl-C or Ctrl-D at any prompt ends the
/// session.
pub struct ConsolePrompter {
    editor: DefaultEditor,
}

impl ConsolePrompter {
    pub fn new() -> rustyline::Result<Self> {
        let rl_config = RlConfig::builder().auto_add_history(true).build();
        let editor = DefaultEditor::with_config(rl_config)?;
        Ok(Self { editor })
    }
}

impl Prompter for ConsolePrompter {
    fn prompt(&mut self, message: &str) -> Option<String> {
        match self.editor.readline(&format!("{message} ")) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(err) => {
                warn!(error = %err, "failed to read input, ending session");
                None
            }
        }
    }

    fn notify(&mut self, message: &str, is_error: bool) {
        if is_error {
            println!("!! {message}");
        } else {
            println!("=> {message}");
        }
    }

    fn append_history(&mut self, attempt: &Attempt) {
        let row = attempt.to_row();
        println!("   [{}]", row.cells().join(" | "));
    }
}

/// Renders the history and summary tables of a finished session.
pub fn render_session_tables(session: &Session) -> String {
    let history: Vec<Vec<String>> = session
        .history()
        .iter()
        .map(|attempt| {
            let row = attempt.to_row();
            row.cells().iter().map(|cell| cell.to_string()).collect()
        })
        .collect();
    let summary = vec![session.summary().cells().to_vec()];

    format!(
        "History\n{}\nSummary\n{}",
        format_table(&HistoryRow::HEADERS, &history),
        format_table(&SummaryStats::HEADERS, &summary)
    )
}

/// Formats rows as a plain-text table with columns padded to fit.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let separator = widths
        .iter()
        .map(|w| "-".repeat(w + 2))
        .collect::<Vec<_>>()
        .join("+");
    let separator = format!("+{separator}+\n");

    let mut out = separator.clone();
    out.push_str(&format_row(headers.iter().copied(), &widths));
    out.push_str(&separator);
    if rows.is_empty() {
        let inner = separator.trim_end().len() - 2;
        out.push_str(&format!("|{:^inner$}|\n", "(no attempts)"));
    }
    for row in rows {
        out.push_str(&format_row(row.iter().map(String::as_str), &widths));
    }
    out.push_str(&separator);
    out
}

fn format_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| {
            let padding = width.saturating_sub(cell.chars().count());
            format!(" {}{} ", cell, " ".repeat(padding))
        })
        .collect();
    format!("|{}|\n", padded.join("|"))
}
