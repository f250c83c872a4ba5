//! Layout settings and the configuration handed to expression formatters

use serde::{Deserialize, Serialize};

/// Layout settings of the surrounding HTML document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutOptions {
    /// Maximum line width
    pub print_width: usize,
    /// Width of one indentation level
    pub tab_width: usize,
    /// Indent with tabs instead of spaces
    pub use_tabs: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            print_width: 80,
            tab_width: 2,
            use_tabs: false,
        }
    }
}

impl LayoutOptions {
    /// One level of indentation
    pub fn indent_unit(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.tab_width)
        }
    }
}

/// Script dialect the expression is parsed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    JavaScript,
    TypeScript,
}

/// Preferred string literal quotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
}

/// Configuration passed to an [`ExpressionFormatter`](crate::ExpressionFormatter)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionConfig {
    pub dialect: Dialect,
    pub indent_width: usize,
    pub use_tabs: bool,
    pub quote_style: QuoteStyle,
    pub print_width: usize,
    /// The source is a fragment embedded in another document; formatters
    /// should skip file-level concerns such as pragmas and final newlines
    pub embedded: bool,
}

impl ExpressionConfig {
    /// Configuration for a directive value embedded in HTML.
    ///
    /// Single quotes are forced so the formatted value can sit inside a
    /// double-quoted attribute.
    pub fn embedded(layout: &LayoutOptions) -> Self {
        Self {
            dialect: Dialect::TypeScript,
            indent_width: layout.tab_width,
            use_tabs: layout.use_tabs,
            quote_style: QuoteStyle::Single,
            print_width: layout.print_width,
            embedded: true,
        }
    }
}
