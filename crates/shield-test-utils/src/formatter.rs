//! Expression formatter answering from a fixed table

use shield_expr::{ExpressionConfig, ExpressionError, ExpressionFormatter, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// Returns a scripted output for each known source and a parse error for
/// anything else. Every call is recorded.
#[derive(Debug, Default)]
pub struct ScriptedFormatter {
    answers: HashMap<String, String>,
    calls: RefCell<Vec<(String, ExpressionConfig)>>,
}

impl ScriptedFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `source` with `output`
    pub fn answer(mut self, source: impl Into<String>, output: impl Into<String>) -> Self {
        self.answers.insert(source.into(), output.into());
        self
    }

    /// Sources passed to [`format`](ExpressionFormatter::format), in call order
    pub fn sources(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(source, _)| source.clone()).collect()
    }

    pub fn configs(&self) -> Vec<ExpressionConfig> {
        self.calls.borrow().iter().map(|(_, config)| config.clone()).collect()
    }
}

impl ExpressionFormatter for ScriptedFormatter {
    fn format(&self, source: &str, config: &ExpressionConfig) -> Result<String> {
        self.calls
            .borrow_mut()
            .push((source.to_string(), config.clone()));
        self.answers
            .get(source)
            .cloned()
            .ok_or_else(|| ExpressionError::parse(1, 1, format!("unexpected input `{source}`")))
    }
}
