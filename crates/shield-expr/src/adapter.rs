//! Formatting directive values with an external expression formatter

use regex::Regex;
use std::sync::LazyLock;

use crate::config::{ExpressionConfig, LayoutOptions};
use crate::directive::{DirectiveAttribute, DirectiveKind};
use crate::formatter::ExpressionFormatter;

/// Collapsed values at least this wide keep their multi-line layout
pub const SHORT_VALUE_WIDTH: usize = 60;

static ARROW_WRAPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\s*\)\s*=>\s*").expect("Invalid arrow wrapper regex"));

static TEMPLATE_LITERAL_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*\n[^`]*`").expect("Invalid template literal regex"));

static UNINDENTED_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[^\s{}]").expect("Invalid unindented break regex"));

static TRAILING_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+\n").expect("Invalid trailing indent regex"));

/// Format a directive attribute value.
///
/// Returns `value` unchanged for ordinary attributes, empty values, and
/// whenever the external formatter fails. `column` is the indentation level,
/// in indent units, that continuation lines are aligned to.
pub fn format_directive_value<F>(
    formatter: &F,
    name: &str,
    value: &str,
    layout: &LayoutOptions,
    column: usize,
) -> String
where
    F: ExpressionFormatter + ?Sized,
{
    let Some(attr) = DirectiveAttribute::new(name, value, column) else {
        return value.to_string();
    };

    let config = ExpressionConfig::embedded(layout);
    let formatted = match formatter.format(&attr.wrapped(), &config) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::debug!(attribute = name, error = %e, "Keeping unformatted directive value");
            return value.to_string();
        }
    };

    let mut text = formatted.trim().to_string();
    if attr.kind == DirectiveKind::Expression {
        text = unwrap_expression(&text).to_string();
    }

    relayout(&text, column, layout)
}

/// Formats directive values against fixed layout options
pub struct DirectiveFormatter<'f, F: ?Sized> {
    formatter: &'f F,
    layout: LayoutOptions,
}

impl<'f, F> DirectiveFormatter<'f, F>
where
    F: ExpressionFormatter + ?Sized,
{
    pub fn new(formatter: &'f F, layout: LayoutOptions) -> Self {
        Self { formatter, layout }
    }

    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    pub fn format(&self, name: &str, value: &str, column: usize) -> String {
        format_directive_value(self.formatter, name, value, &self.layout, column)
    }
}

/// Strip the arrow-function wrapper and one redundant pair of parentheses
fn unwrap_expression(formatted: &str) -> &str {
    let text = match ARROW_WRAPPER.find(formatted) {
        Some(m) => {
            // The wrapper is always the first thing the formatter prints.
            if formatted[..m.start()].trim().is_empty() {
                formatted[m.end()..].trim()
            } else {
                formatted
            }
        }
        None => formatted,
    };

    let body = text.strip_suffix(';').unwrap_or(text);
    if body.starts_with('(') && closes_at_end(body) {
        &body[1..body.len() - 1]
    } else {
        text
    }
}

/// Whether the `(` at the start of `text` is closed by its last character
fn closes_at_end(text: &str) -> bool {
    let last = text.len() - 1;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, ch) in text.char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == q {
                quote = None;
            }
            continue;
        }
        match ch {
            '"' | '\'' | '`' => quote = Some(ch),
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == last;
                }
            }
            _ => {}
        }
    }
    false
}

/// Choose single- or multi-line layout and indent to `column`
fn relayout(text: &str, column: usize, layout: &LayoutOptions) -> String {
    let mut text = text.to_string();

    if text.contains('\n') && !TEMPLATE_LITERAL_BREAK.is_match(&text) {
        let one_line = text.replace('\n', " ");
        let width = one_line.chars().count();
        if width + column * layout.tab_width <= layout.print_width && width < SHORT_VALUE_WIDTH {
            text = one_line;
        }
    }

    let unit = layout.indent_unit();
    if UNINDENTED_BREAK.is_match(&text) {
        let body = text.replace('\n', &format!("\n{unit}"));
        text = format!("\n{unit}{body}\n");
    } else if text.ends_with(';') {
        text.pop();
    }

    let indentation = unit.repeat(column);
    let text = text.replace('\n', &format!("\n{indentation}"));
    TRAILING_INDENT.replace_all(&text, "\n").into_owned()
}
