//! Error types for shield-expr

/// Result type for expression formatting
pub type Result<T> = std::result::Result<T, ExpressionError>;

/// Failures reported by an external expression formatter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    #[error("Failed to parse expression at {line}:{column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Expression formatter failed: {0}")]
    Formatter(String),
}

impl ExpressionError {
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            column,
            message: message.into(),
        }
    }
}
