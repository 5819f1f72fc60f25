//! Application layer managing session state and user workflows.
//!
//! This module coordinates between the domain layer and presentation layer:
//! the calculator session state machine and the terminal application state
//! wrapped around it.

pub mod session;
pub mod state;

pub use session::*;
pub use state::*;
