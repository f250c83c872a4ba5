//! Shared test utilities for the tagshield workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`host`]: [`FakeHost`], a small HTML parser and printer
//! - [`formatter`]: [`ScriptedFormatter`], an expression formatter with canned answers

pub mod formatter;
pub mod host;

pub use formatter::ScriptedFormatter;
pub use host::{FakeHost, FakeHostError};
