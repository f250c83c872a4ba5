//! Error types for shield-core

use std::fmt;
use std::path::PathBuf;

/// Result type for shield-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Host formatter stage that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Preprocess,
    Print,
    Render,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parse => "parse",
            Self::Preprocess => "preprocess",
            Self::Print => "print",
            Self::Render => "render",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while formatting a document
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTML formatter failed to {stage}: {message}")]
    Host { stage: Stage, message: String },

    #[error("Failed to parse {format} config at {}: {message}", .path.display())]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported config format: .{extension}")]
    UnsupportedConfigFormat { extension: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn host(stage: Stage, error: impl fmt::Display) -> Self {
        Self::Host {
            stage,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_error_message() {
        let err = Error::host(Stage::Parse, "unexpected `<`");
        assert_eq!(err.to_string(), "HTML formatter failed to parse: unexpected `<`");
    }
}
