//! Putting template tags back into a formatted document

use regex::{Captures, Regex};
use shield_scan::{PlaceholderMapping, QuoteEscape, RenderMode, normalize_with};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::sync::LazyLock;

use crate::tree::{Doc, DocRef};

/// Placeholder key in either render mode, for any marker variant; group 2
/// is the marker variant, group 3 the index
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<!--)?__TAG(\d*)_(\d+)__(-->)?").expect("Invalid placeholder regex")
});

/// Counters from one reinsertion pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReinsertStats {
    /// Distinct nodes visited
    pub visited: usize,
    /// Placeholders replaced with their tag
    pub substituted: usize,
    /// Placeholder-shaped tokens with no matching record, left in place
    pub unresolved: usize,
}

/// Replaces placeholder keys in text leaves with normalized tag text.
///
/// Nodes are tracked by identity, so shared subtrees are processed once and
/// cyclic documents terminate.
pub struct Reinserter<'m> {
    mapping: &'m PlaceholderMapping,
    escape: QuoteEscape,
    seen: HashSet<*const RefCell<Doc>>,
    stats: ReinsertStats,
}

impl<'m> Reinserter<'m> {
    pub fn new(mapping: &'m PlaceholderMapping) -> Self {
        Self {
            mapping,
            escape: QuoteEscape::default(),
            seen: HashSet::new(),
            stats: ReinsertStats::default(),
        }
    }

    /// Quote escaping applied to tags reinserted into attribute values
    pub fn with_escape(mut self, escape: QuoteEscape) -> Self {
        self.escape = escape;
        self
    }

    /// Walk `doc` and substitute every known placeholder
    pub fn reinsert(mut self, doc: &DocRef) -> ReinsertStats {
        if !self.mapping.is_empty() {
            self.visit(doc);
        }
        tracing::debug!(
            visited = self.stats.visited,
            substituted = self.stats.substituted,
            unresolved = self.stats.unresolved,
            "Reinserted template tags"
        );
        self.stats
    }

    fn visit(&mut self, node: &DocRef) {
        if !self.seen.insert(Rc::as_ptr(node)) {
            return;
        }
        self.stats.visited += 1;

        // Release the borrow before descending; a child may be this node.
        let children = {
            let mut doc = node.borrow_mut();
            if let Doc::Text(text) = &mut *doc {
                self.substitute(text);
            }
            doc.children()
        };
        for child in &children {
            self.visit(child);
        }
    }

    fn substitute(&mut self, text: &mut String) {
        let mapping = self.mapping;
        if !text.contains(mapping.marker()) {
            return;
        }

        let escape = self.escape;
        let stats = &mut self.stats;
        let replaced = PLACEHOLDER
            .replace_all(text.as_str(), |caps: &Captures| {
                let whole = &caps[0];
                if !is_marker(mapping.marker(), &caps[2]) {
                    // Literal text from the source document
                    return whole.to_string();
                }
                let record = caps[3]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| mapping.by_index(index));
                let Some(record) = record else {
                    stats.unresolved += 1;
                    tracing::debug!(placeholder = whole, "No template tag recorded for placeholder");
                    return whole.to_string();
                };

                stats.substituted += 1;
                let escape = if record.placement.needs_quote_escape() {
                    escape
                } else {
                    QuoteEscape::None
                };
                let tag = normalize_with(&record.original, escape);
                if whole == record.key || record.mode == RenderMode::Comment {
                    tag
                } else {
                    // A bare key that happens to sit between comment delimiters
                    format!(
                        "{}{tag}{}",
                        caps.get(1).map_or("", |m| m.as_str()),
                        caps.get(4).map_or("", |m| m.as_str()),
                    )
                }
            })
            .into_owned();
        *text = replaced;
    }
}

/// Whether `__TAG{variant}_` is `marker`
fn is_marker(marker: &str, variant: &str) -> bool {
    marker
        .strip_prefix("__TAG")
        .and_then(|rest| rest.strip_suffix('_'))
        == Some(variant)
}

/// Substitute placeholders in `doc` without quote escaping
pub fn reinsert(doc: &DocRef, mapping: &PlaceholderMapping) -> ReinsertStats {
    Reinserter::new(mapping).reinsert(doc)
}
