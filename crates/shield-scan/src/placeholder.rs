//! Placeholder keys and the template tags they stand in for

use std::collections::HashMap;
use std::ops::Range;

/// Substring shared by every placeholder key, in both render modes, unless
/// the source already contains it (see [`marker_for`])
pub const PLACEHOLDER_MARKER: &str = "__TAG_";

/// Marker for placeholders in `source`.
///
/// [`PLACEHOLDER_MARKER`] when the source does not contain it, otherwise the
/// first of `__TAG0_`, `__TAG1_`, ... that it does not contain.
///
/// ```
/// use shield_scan::placeholder::marker_for;
///
/// assert_eq!(marker_for("<p>{{ a }}</p>"), "__TAG_");
/// assert_eq!(marker_for("<p>__TAG_0__</p>"), "__TAG0_");
/// ```
pub fn marker_for(source: &str) -> String {
    if !source.contains(PLACEHOLDER_MARKER) {
        return PLACEHOLDER_MARKER.to_string();
    }
    let mut n = 0usize;
    loop {
        let marker = format!("__TAG{n}_");
        if !source.contains(&marker) {
            return marker;
        }
        n += 1;
    }
}

/// How a placeholder key is rendered into the rewritten text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// HTML comment: `<!--__TAG_n__-->`, for tags in document content
    Comment,
    /// Bare token: `__TAG_n__`, for tags inside an HTML tag or a string
    Bare,
}

impl RenderMode {
    /// Render the key for the placeholder with the given marker and index
    pub fn render(&self, marker: &str, index: usize) -> String {
        match self {
            Self::Comment => format!("<!--{marker}{index}__-->"),
            Self::Bare => format!("{marker}{index}__"),
        }
    }
}

/// Where a template tag was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Document content, between elements
    Content,
    /// Inside an HTML tag, outside any quoted attribute value
    Tag,
    /// Inside a quoted attribute value
    AttributeValue,
}

impl Placement {
    pub fn render_mode(&self) -> RenderMode {
        match self {
            Self::Content => RenderMode::Comment,
            Self::Tag | Self::AttributeValue => RenderMode::Bare,
        }
    }

    /// Whether a reinserted tag must have its quotes escaped here
    pub fn needs_quote_escape(&self) -> bool {
        matches!(self, Self::AttributeValue)
    }
}

/// A template tag extracted from the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// The placeholder key substituted into the rewritten text
    pub key: String,
    /// Discovery index embedded in the key
    pub index: usize,
    /// Render mode the key was generated with
    pub mode: RenderMode,
    pub placement: Placement,
    /// The exact tag text, delimiters included
    pub original: String,
    /// Byte offset of the opening delimiter in the source
    pub start: usize,
    /// Byte offset one past the closing delimiter in the source
    pub end: usize,
}

impl TagRecord {
    /// Half-open byte range of the tag in the source
    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Ordered mapping of placeholder key to extracted tag.
///
/// Iteration order is discovery order, which is also source order because
/// template tags never nest inside each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMapping {
    marker: String,
    records: Vec<TagRecord>,
    by_key: HashMap<String, usize>,
}

impl Default for PlaceholderMapping {
    fn default() -> Self {
        Self::with_marker(PLACEHOLDER_MARKER)
    }
}

impl PlaceholderMapping {
    /// Create an empty mapping using [`PLACEHOLDER_MARKER`]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            records: Vec::new(),
            by_key: HashMap::new(),
        }
    }

    /// Substring shared by every key in this mapping
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Allocate the next key and record the tag under it
    pub(crate) fn insert(
        &mut self,
        placement: Placement,
        original: &str,
        start: usize,
        end: usize,
    ) -> &TagRecord {
        let index = self.records.len();
        let mode = placement.render_mode();
        let key = mode.render(&self.marker, index);
        self.by_key.insert(key.clone(), index);
        self.records.push(TagRecord {
            key,
            index,
            mode,
            placement,
            original: original.to_string(),
            start,
            end,
        });
        &self.records[index]
    }

    /// Look up a record by its full key
    pub fn get(&self, key: &str) -> Option<&TagRecord> {
        self.by_key.get(key).map(|&i| &self.records[i])
    }

    /// Look up a record by its discovery index
    pub fn by_index(&self, index: usize) -> Option<&TagRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in discovery order
    pub fn records(&self) -> &[TagRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TagRecord> {
        self.records.iter()
    }

    /// Rebuild the text with every recorded span replaced by its key
    pub fn apply(&self, source: &str) -> String {
        let mut result = String::with_capacity(source.len());
        let mut last = 0;
        for record in &self.records {
            result.push_str(&source[last..record.start]);
            result.push_str(&record.key);
            last = record.end;
        }
        result.push_str(&source[last..]);
        result
    }
}

impl<'a> IntoIterator for &'a PlaceholderMapping {
    type Item = &'a TagRecord;
    type IntoIter = std::slice::Iter<'a, TagRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_modes() {
        assert_eq!(RenderMode::Comment.render(PLACEHOLDER_MARKER, 3), "<!--__TAG_3__-->");
        assert_eq!(RenderMode::Bare.render(PLACEHOLDER_MARKER, 12), "__TAG_12__");
        assert_eq!(RenderMode::Bare.render("__TAG0_", 1), "__TAG0_1__");
    }

    #[test]
    fn insert_allocates_sequential_keys() {
        let mut mapping = PlaceholderMapping::new();
        mapping.insert(Placement::Content, "{{ a }}", 0, 7);
        mapping.insert(Placement::Tag, "{% b %}", 10, 17);

        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.records()[0].key, "<!--__TAG_0__-->");
        assert_eq!(mapping.records()[1].key, "__TAG_1__");
        assert_eq!(mapping.get("__TAG_1__").unwrap().original, "{% b %}");
        assert!(mapping.get("__TAG_0__").is_none());
    }

    #[test]
    fn apply_replaces_spans_in_order() {
        let source = "a{{ x }}b{% y %}c";
        let mut mapping = PlaceholderMapping::new();
        mapping.insert(Placement::Tag, "{{ x }}", 1, 8);
        mapping.insert(Placement::AttributeValue, "{% y %}", 9, 16);

        assert_eq!(mapping.apply(source), "a__TAG_0__b__TAG_1__c");
    }

    #[test]
    fn keys_use_the_mapping_marker() {
        let mut mapping = PlaceholderMapping::with_marker("__TAG3_");
        mapping.insert(Placement::Content, "{{ a }}", 0, 7);
        assert_eq!(mapping.marker(), "__TAG3_");
        assert_eq!(mapping.records()[0].key, "<!--__TAG3_0__-->");
    }

    #[test]
    fn placement_decides_render_mode_and_escaping() {
        assert_eq!(Placement::Content.render_mode(), RenderMode::Comment);
        assert_eq!(Placement::Tag.render_mode(), RenderMode::Bare);
        assert_eq!(Placement::AttributeValue.render_mode(), RenderMode::Bare);
        assert!(!Placement::Content.needs_quote_escape());
        assert!(!Placement::Tag.needs_quote_escape());
        assert!(Placement::AttributeValue.needs_quote_escape());
    }

    #[test]
    fn marker_skips_every_variant_in_source() {
        assert_eq!(marker_for("__TAG_ __TAG0_ __TAG1_"), "__TAG2_");
    }

    #[test]
    fn apply_on_empty_mapping_is_identity() {
        let mapping = PlaceholderMapping::new();
        assert_eq!(mapping.apply("<p>plain</p>"), "<p>plain</p>");
    }
}
