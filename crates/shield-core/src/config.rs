//! Formatting options and config file loading

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use shield_expr::LayoutOptions;
use shield_scan::QuoteEscape;
use std::path::Path;

/// How the indentation column for directive values is chosen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndentSource {
    /// Element nesting depth at the element's source line
    #[default]
    Nesting,
    /// Column the element starts at in the host's input
    SourceColumn,
}

/// Options for one formatting run.
///
/// Missing fields take their defaults, so an empty file is a valid config:
///
/// ```
/// use shield_core::FormatOptions;
///
/// let options = FormatOptions::from_toml_str("printWidth = 100").unwrap();
/// assert_eq!(options.print_width, 100);
/// assert_eq!(options.tab_width, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormatOptions {
    pub print_width: usize,
    pub tab_width: usize,
    pub use_tabs: bool,
    /// Escaping for double quotes in reinserted template tags
    pub tag_quote_escape: QuoteEscape,
    pub indent_source: IndentSource,
}

impl Default for FormatOptions {
    fn default() -> Self {
        let layout = LayoutOptions::default();
        Self {
            print_width: layout.print_width,
            tab_width: layout.tab_width,
            use_tabs: layout.use_tabs,
            tag_quote_escape: QuoteEscape::default(),
            indent_source: IndentSource::default(),
        }
    }
}

impl FormatOptions {
    /// Load options from a file.
    ///
    /// Format is detected from file extension:
    /// - `.toml` -> TOML
    /// - `.json` -> JSON
    /// - `.yaml`, `.yml` -> YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_lowercase();

        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_path_buf(),
            format: format.into(),
            message,
        };

        let options = match extension.as_str() {
            "toml" => {
                let content = std::fs::read_to_string(path)?;
                toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string()))?
            }
            "json" => {
                let content = std::fs::read_to_string(path)?;
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))?
            }
            "yaml" | "yml" => {
                let content = std::fs::read_to_string(path)?;
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))?
            }
            _ => return Err(Error::UnsupportedConfigFormat { extension }),
        };

        tracing::debug!(path = %path.display(), ?options, "Loaded format options");
        Ok(options)
    }

    /// Parse options from inline TOML
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: "<inline>".into(),
            format: "TOML".into(),
            message: e.to_string(),
        })
    }

    /// Layout settings handed to the directive formatter
    pub fn layout(&self) -> LayoutOptions {
        LayoutOptions {
            print_width: self.print_width,
            tab_width: self.tab_width,
            use_tabs: self.use_tabs,
        }
    }

    /// One level of indentation
    pub fn indent_unit(&self) -> String {
        self.layout().indent_unit()
    }
}
