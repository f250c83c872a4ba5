//! Template-aware HTML formatting for tagshield.
//!
//! Wraps an HTML formatter ([`HtmlHost`]) so it can format documents that
//! embed `{% ... %}` / `{{ ... }}` template tags and directive attributes:
//!
//! 1. template tags are swapped for placeholders ([`shield_scan`]),
//! 2. the host parses the rewritten text,
//! 3. directive attribute values are formatted ([`shield_expr`]),
//! 4. the host prints its document,
//! 5. placeholders are swapped back for the normalized tags ([`shield_doc`]).

pub mod ast;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod pipeline;

pub use ast::{Attribute, Document, Element, Node, SourceSpan};
pub use config::{FormatOptions, IndentSource};
pub use error::{Error, Result, Stage};
pub use host::{HostContext, HtmlHost};
pub use pipeline::{Formatted, Pipeline};
