//! Presentation layer handling terminal UI and user input.
//!
//! This module manages the full-screen interface using ratatui, handles
//! keyboard input, and provides the line-oriented console frontend.

pub mod ui;
pub mod input;
pub mod console;

pub use ui::*;
pub use input::*;
pub use console::*;
