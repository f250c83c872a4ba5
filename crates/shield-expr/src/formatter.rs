//! The external expression formatter seam

use async_trait::async_trait;
use tokio::runtime::{self, Runtime};

use crate::config::ExpressionConfig;
use crate::error::{ExpressionError, Result};

/// A formatter for script expressions and statements.
///
/// Implementations wrap whatever code formatter the host has available. The
/// call is synchronous and all-or-nothing; any `Err` makes the caller keep
/// the unformatted value.
pub trait ExpressionFormatter {
    fn format(&self, source: &str, config: &ExpressionConfig) -> Result<String>;
}

impl<F> ExpressionFormatter for F
where
    F: Fn(&str, &ExpressionConfig) -> Result<String>,
{
    fn format(&self, source: &str, config: &ExpressionConfig) -> Result<String> {
        self(source, config)
    }
}

/// A formatter whose work completes asynchronously.
///
/// The call is still all-or-nothing: no partial output, no cancellation.
/// Wrap it in [`BlockingFormatter`] to use it where an
/// [`ExpressionFormatter`] is expected.
#[async_trait]
pub trait AsyncExpressionFormatter: Send + Sync {
    async fn format(&self, source: &str, config: &ExpressionConfig) -> Result<String>;
}

/// Drives an [`AsyncExpressionFormatter`] to completion on its own
/// current-thread runtime.
///
/// Must not be called from inside another tokio runtime.
pub struct BlockingFormatter<F> {
    inner: F,
    runtime: Runtime,
}

impl<F: AsyncExpressionFormatter> BlockingFormatter<F> {
    pub fn new(inner: F) -> Result<Self> {
        let runtime = runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| ExpressionError::Formatter(format!("Failed to start runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: AsyncExpressionFormatter> ExpressionFormatter for BlockingFormatter<F> {
    fn format(&self, source: &str, config: &ExpressionConfig) -> Result<String> {
        self.runtime.block_on(self.inner.format(source, config))
    }
}
