//! The HTML formatter being wrapped

use shield_doc::DocRef;
use shield_scan::{LineMap, NestingTable, PlaceholderMapping};
use std::fmt::Display;

use crate::ast::Document;
use crate::config::FormatOptions;

/// Options and scan results available to the host during one run
#[derive(Debug, Clone, Copy)]
pub struct HostContext<'a> {
    pub options: &'a FormatOptions,
    pub placeholders: &'a PlaceholderMapping,
    pub nesting: &'a NestingTable,
    pub line_map: &'a LineMap,
}

impl HostContext<'_> {
    /// Nesting depth at the source line of a rewritten-text offset
    pub fn depth_at_offset(&self, offset: usize) -> usize {
        let line = self.line_map.source_line(offset);
        self.nesting
            .depth_at(line)
            .map_or(0, |depth| depth.max(0) as usize)
    }
}

/// An HTML formatter that parses text into a [`Document`] and prints it as a
/// layout [`Doc`](shield_doc::Doc) tree.
///
/// The text handed to [`parse`](HtmlHost::parse) has every template tag
/// replaced by a placeholder, so it is plain HTML.
pub trait HtmlHost {
    type Error: Display;

    fn parse(&self, text: &str, ctx: &HostContext<'_>) -> Result<Document, Self::Error>;

    /// Runs after parsing and before directive values are formatted
    fn preprocess(&self, document: &mut Document, ctx: &HostContext<'_>) -> Result<(), Self::Error> {
        let _ = (document, ctx);
        Ok(())
    }

    fn print(&self, document: &Document, ctx: &HostContext<'_>) -> Result<DocRef, Self::Error>;

    /// Lay out a printed document as text
    fn render(&self, doc: &DocRef, ctx: &HostContext<'_>) -> Result<String, Self::Error>;
}
