//! Directive attribute formatting for tagshield.
//!
//! Directive attributes (`x-data`, `:class`, `@click`, ...) carry script
//! expressions that an HTML formatter treats as opaque strings. This crate
//! hands those values to an external [`ExpressionFormatter`], then fits the
//! result back into the attribute: collapsing short values onto one line and
//! re-indenting multi-line values to line up with the surrounding markup.
//!
//! Formatters that do their work asynchronously implement
//! [`AsyncExpressionFormatter`] and are driven through [`BlockingFormatter`].
//!
//! Formatting never fails from the caller's point of view. When the external
//! formatter rejects a value, the original text is kept.

pub mod adapter;
pub mod config;
pub mod directive;
pub mod error;
pub mod formatter;

pub use adapter::{DirectiveFormatter, SHORT_VALUE_WIDTH, format_directive_value};
pub use config::{Dialect, ExpressionConfig, LayoutOptions, QuoteStyle};
pub use directive::{DirectiveAttribute, DirectiveKind, classify};
pub use error::{ExpressionError, Result};
pub use formatter::{AsyncExpressionFormatter, BlockingFormatter, ExpressionFormatter};
