//! Orchestrates scan, host parse, directive formatting, print, reinsertion

use shield_doc::{DocRef, ReinsertStats, Reinserter};
use shield_expr::{DirectiveFormatter, ExpressionFormatter, classify};
use shield_scan::ScanOutput;

use crate::ast::{Document, Element};
use crate::config::{FormatOptions, IndentSource};
use crate::error::{Error, Result, Stage};
use crate::host::{HostContext, HtmlHost};

/// A printed document with template tags restored
#[derive(Debug)]
pub struct Formatted {
    pub doc: DocRef,
    pub stats: ReinsertStats,
    /// Template tags found in the input
    pub tags: usize,
    /// Directive attributes handed to the expression formatter
    pub directives: usize,
}

/// Wraps an [`HtmlHost`] so it can format documents containing template tags.
///
/// Each call to [`format`](Pipeline::format) scans independently; nothing is
/// carried between documents.
pub struct Pipeline<H, F> {
    host: H,
    formatter: F,
    options: FormatOptions,
}

impl<H, F> Pipeline<H, F>
where
    H: HtmlHost,
    F: ExpressionFormatter,
{
    pub fn new(host: H, formatter: F, options: FormatOptions) -> Self {
        Self {
            host,
            formatter,
            options,
        }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn formatter(&self) -> &F {
        &self.formatter
    }

    /// Format `text` into the host's layout tree
    pub fn format(&self, text: &str) -> Result<Formatted> {
        let scan = shield_scan::scan(text);
        let (formatted, _) = self.run(&scan)?;
        Ok(formatted)
    }

    /// Format `text` and render it with the host
    pub fn format_to_string(&self, text: &str) -> Result<String> {
        let scan = shield_scan::scan(text);
        let (formatted, ctx) = self.run(&scan)?;
        self.host
            .render(&formatted.doc, &ctx)
            .map_err(|e| self.host_error(Stage::Render, e))
    }

    fn run<'s>(&'s self, scan: &'s ScanOutput) -> Result<(Formatted, HostContext<'s>)> {
        let ctx = HostContext {
            options: &self.options,
            placeholders: &scan.mapping,
            nesting: &scan.nesting,
            line_map: &scan.line_map,
        };

        let mut document = self
            .host
            .parse(&scan.rewritten, &ctx)
            .map_err(|e| self.host_error(Stage::Parse, e))?;
        self.host
            .preprocess(&mut document, &ctx)
            .map_err(|e| self.host_error(Stage::Preprocess, e))?;

        let directives = self.format_directives(&mut document, &ctx);

        let doc = self
            .host
            .print(&document, &ctx)
            .map_err(|e| self.host_error(Stage::Print, e))?;

        let stats = Reinserter::new(&scan.mapping)
            .with_escape(self.options.tag_quote_escape)
            .reinsert(&doc);

        let formatted = Formatted {
            doc,
            stats,
            tags: scan.mapping.len(),
            directives,
        };
        Ok((formatted, ctx))
    }

    /// Replace directive attribute values in place; returns how many were seen
    fn format_directives(&self, document: &mut Document, ctx: &HostContext<'_>) -> usize {
        let directives = DirectiveFormatter::new(&self.formatter, self.options.layout());
        let mut count = 0;

        document.walk_elements_mut(&mut |element| {
            let column = self.context_column(element, ctx);
            for attr in &mut element.attrs {
                let Some(value) = attr.value.as_deref() else {
                    continue;
                };
                if value.is_empty() || classify(&attr.name).is_none() {
                    continue;
                }
                let formatted = directives.format(&attr.name, value, column);
                attr.value = Some(formatted);
                count += 1;
            }
        });

        count
    }

    fn context_column(&self, element: &Element, ctx: &HostContext<'_>) -> usize {
        match self.options.indent_source {
            IndentSource::Nesting => ctx.depth_at_offset(element.span.offset),
            IndentSource::SourceColumn => element.span.col,
        }
    }

    fn host_error(&self, stage: Stage, error: H::Error) -> Error {
        let error = Error::host(stage, error);
        tracing::warn!(%stage, error = %error, "HTML formatter failed");
        error
    }
}
