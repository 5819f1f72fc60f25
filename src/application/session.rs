//! The calculator session: prompt sequencing, attempt recording and the
//! accumulated results.
//!
//! A [`Session`] can be driven one answer at a time (the TUI does this from
//! key events) or through a blocking [`Prompter`] with [`run_session`].

use crate::domain::{evaluate_attempt, Attempt, Outcome, SummaryStats};
use tracing::{debug, info};

/// Where the session is in the prompt cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingFirstOperand,
    AwaitingSecondOperand,
    AwaitingOperator,
    /// The user cancelled a prompt; no further input is accepted.
    Terminal,
}

impl SessionState {
    /// Prompt text for this state, `None` once the session has ended.
    pub fn prompt_message(self) -> Option<&'static str> {
        match self {
            SessionState::AwaitingFirstOperand => Some("Enter the first number (x):"),
            SessionState::AwaitingSecondOperand => Some("Enter the second number (y):"),
            SessionState::AwaitingOperator => Some("Enter operator (+, -, *, /, %):"),
            SessionState::Terminal => None,
        }
    }
}

/// A synchronous source of answers and sink for notifications.
///
/// Returning `None` from [`Prompter::prompt`] is the cancel gesture and ends
/// the session.
pub trait Prompter {
    fn prompt(&mut self, message: &str) -> Option<String>;

    /// Blocks until the user has seen the outcome of an attempt.
    fn notify(&mut self, message: &str, is_error: bool);

    /// Called once per recorded attempt, before [`Prompter::notify`].
    fn append_history(&mut self, _attempt: &Attempt) {}
}

/// Recorder for one interactive session.
///
/// # Examples
///
/// ```
/// use tcalc::application::{Session, SessionState};
///
/// let mut session = Session::new();
/// session.submit("10");
/// session.submit("2");
/// let attempt = session.submit("/").unwrap();
/// assert_eq!(attempt.result_text(), "5");
///
/// session.cancel();
/// assert_eq!(session.state(), SessionState::Terminal);
/// assert_eq!(session.summary().cells(), ["5", "5", "5.00", "5"]);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    first: Option<String>,
    second: Option<String>,
    history: Vec<Attempt>,
    valid_results: Vec<f64>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            state: SessionState::AwaitingFirstOperand,
            first: None,
            second: None,
            history: Vec::new(),
            valid_results: Vec::new(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn prompt_message(&self) -> Option<&'static str> {
        self.state.prompt_message()
    }

    pub fn is_finished(&self) -> bool {
        self.state == SessionState::Terminal
    }

    /// Every recorded attempt, oldest first.
    pub fn history(&self) -> &[Attempt] {
        &self.history
    }

    /// Values of the successful attempts, in the order they were recorded.
    pub fn valid_results(&self) -> &[f64] {
        &self.valid_results
    }

    pub fn summary(&self) -> SummaryStats {
        SummaryStats::from_results(&self.valid_results)
    }

    /// Feeds the answer to the current prompt.
    ///
    /// The third answer completes the attempt: it is validated, evaluated and
    /// appended to the history, and the recorded attempt is returned. Answers
    /// after the session has ended are ignored.
    pub fn submit(&mut self, text: &str) -> Option<&Attempt> {
        debug!(state = ?self.state, input = text, "answer submitted");
        match self.state {
            SessionState::AwaitingFirstOperand => {
                self.first = Some(text.to_string());
                self.state = SessionState::AwaitingSecondOperand;
                None
            }
            SessionState::AwaitingSecondOperand => {
                self.second = Some(text.to_string());
                self.state = SessionState::AwaitingOperator;
                None
            }
            SessionState::AwaitingOperator => {
                let first = self.first.take().unwrap_or_default();
                let second = self.second.take().unwrap_or_default();
                self.state = SessionState::AwaitingFirstOperand;
                Some(self.record(first, second, text.to_string()))
            }
            SessionState::Terminal => None,
        }
    }

    /// Ends the session. A partially entered attempt is discarded.
    pub fn cancel(&mut self) {
        if self.state == SessionState::Terminal {
            return;
        }
        self.first = None;
        self.second = None;
        self.state = SessionState::Terminal;
        info!(
            attempts = self.history.len(),
            valid = self.valid_results.len(),
            "session ended"
        );
    }

    fn record(&mut self, first: String, second: String, operator: String) -> &Attempt {
        let outcome = match evaluate_attempt(&first, &second, &operator) {
            Ok(equation) => Outcome::Ok(equation),
            Err(err) => Outcome::Error(err),
        };

        if let Some(value) = outcome.value() {
            self.valid_results.push(value);
        }

        let attempt = Attempt { first, operator, second, outcome };
        info!(
            number = self.history.len() + 1,
            ok = attempt.is_ok(),
            result = %attempt.result_text(),
            "attempt recorded"
        );
        self.history.push(attempt);
        &self.history[self.history.len() - 1]
    }
}

/// Runs a blocking prompt loop until the prompter cancels.
///
/// Each completed attempt produces exactly one history append and exactly one
/// notification. The finished session is returned for summary rendering.
pub fn run_session<P: Prompter>(prompter: &mut P) -> Session {
    let mut session = Session::new();

    while let Some(message) = session.prompt_message() {
        let Some(answer) = prompter.prompt(message) else {
            session.cancel();
            break;
        };

        if let Some(attempt) = session.submit(&answer) {
            prompter.append_history(attempt);
            prompter.notify(&attempt.notification(), !attempt.is_ok());
        }
    }

    session
}
