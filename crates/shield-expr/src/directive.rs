//! Directive attribute recognition

use regex::Regex;
use std::sync::LazyLock;

/// Attributes whose value is an expression to evaluate
static EXPRESSION_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?::[\w-]+|x-(?:data|show|bind|text|html|model|modelable|if|id)[.\w\-:]*)")
        .expect("Invalid expression attribute regex")
});

/// Attributes whose value is a statement run on an event or hook
static STATEMENT_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@[\w-]+|x-(?:init|on|effect)[.\w\-:]*)")
        .expect("Invalid statement attribute regex")
});

/// What a directive attribute's value contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `x-data`, `x-show`, `:class`, ...
    Expression,
    /// `x-init`, `x-on:click`, `@click`, ...
    Statement,
}

/// Classify an attribute name; `None` for ordinary attributes
pub fn classify(name: &str) -> Option<DirectiveKind> {
    if EXPRESSION_ATTRIBUTE.is_match(name) {
        Some(DirectiveKind::Expression)
    } else if STATEMENT_ATTRIBUTE.is_match(name) {
        Some(DirectiveKind::Statement)
    } else {
        None
    }
}

/// A directive attribute about to be formatted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectiveAttribute<'a> {
    pub name: &'a str,
    pub kind: DirectiveKind,
    pub raw_expression: &'a str,
    /// Indentation level of the element carrying the attribute
    pub source_column: usize,
}

impl<'a> DirectiveAttribute<'a> {
    /// Recognize a directive; `None` for ordinary attributes and empty values
    pub fn new(name: &'a str, value: &'a str, source_column: usize) -> Option<Self> {
        if value.is_empty() {
            return None;
        }
        let kind = classify(name)?;
        Some(Self {
            name,
            kind,
            raw_expression: value,
            source_column,
        })
    }

    /// Source text handed to the expression formatter.
    ///
    /// Expressions are wrapped in an arrow function so that object literals
    /// and other bare expressions parse as a complete program.
    pub fn wrapped(&self) -> String {
        match self.kind {
            DirectiveKind::Expression => format!("() => ({})", self.raw_expression),
            DirectiveKind::Statement => self.raw_expression.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_not_a_directive() {
        assert!(DirectiveAttribute::new("x-data", "", 0).is_none());
    }

    #[test]
    fn wrapping_depends_on_kind() {
        let expr = DirectiveAttribute::new("x-show", "open", 0).unwrap();
        assert_eq!(expr.wrapped(), "() => (open)");

        let stmt = DirectiveAttribute::new("@click", "open = !open", 0).unwrap();
        assert_eq!(stmt.wrapped(), "open = !open");
    }
}
