//! Infrastructure layer providing external service integrations.
//!
//! This module writes finished sessions out to report files.

pub mod report;

pub use report::*;
