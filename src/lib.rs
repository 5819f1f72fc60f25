//! TCALC - Terminal Calculator Library
//!
//! An interactive two-operand calculator that records every attempt in a
//! history table and summarises the successful results when the session ends.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
