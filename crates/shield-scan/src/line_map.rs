//! Mapping positions in the rewritten text back to the source

use crate::placeholder::PlaceholderMapping;

/// Translates byte offsets in the rewritten text to source offsets and lines.
///
/// A placeholder rarely has the same length as the tag it replaced, and tags
/// spanning several lines collapse to one, so the host's line numbers drift
/// from the source lines the [`NestingTable`](crate::NestingTable) is indexed by.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    /// (end of a placeholder in the rewritten text, cumulative source - rewritten delta)
    shifts: Vec<(usize, isize)>,
    /// Source offsets at which each line begins
    line_starts: Vec<usize>,
}

impl LineMap {
    pub fn build(source: &str, mapping: &PlaceholderMapping) -> Self {
        let mut shifts = Vec::with_capacity(mapping.len());
        let mut delta: isize = 0;
        for record in mapping {
            let rewritten_start = (record.start as isize - delta) as usize;
            let rewritten_end = rewritten_start + record.key.len();
            delta += (record.end - record.start) as isize - record.key.len() as isize;
            shifts.push((rewritten_end, delta));
        }

        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            shifts,
            line_starts,
        }
    }

    /// Source offset for an offset in the rewritten text
    pub fn source_offset(&self, rewritten: usize) -> usize {
        let idx = self.shifts.partition_point(|(end, _)| *end <= rewritten);
        let delta = if idx == 0 { 0 } else { self.shifts[idx - 1].1 };
        (rewritten as isize + delta).max(0) as usize
    }

    /// 0-based source line for an offset in the rewritten text
    pub fn source_line(&self, rewritten: usize) -> usize {
        let offset = self.source_offset(rewritten);
        self.line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan;

    #[test]
    fn identity_without_tags() {
        let source = "<p>\n<b>\n</b>\n</p>";
        let map = LineMap::build(source, &PlaceholderMapping::new());
        assert_eq!(map.source_offset(5), 5);
        assert_eq!(map.source_line(0), 0);
        assert_eq!(map.source_line(4), 1);
        assert_eq!(map.source_line(source.len()), 3);
    }

    #[test]
    fn multi_line_tag_shifts_following_lines() {
        let source = "{% if\n  x %}\n<div x-data=\"{}\">";
        let output = scan(source);
        let div = output.rewritten.find("<div").unwrap();

        assert_eq!(output.rewritten.lines().count(), 2);
        assert_eq!(output.line_map.source_line(div), 2);
        assert_eq!(output.line_map.source_offset(div), source.find("<div").unwrap());
    }

    #[test]
    fn placeholder_longer_than_tag() {
        let source = "{{x}}\n<p>";
        let output = scan(source);
        let p = output.rewritten.find("<p>").unwrap();
        assert_eq!(output.line_map.source_offset(p), 6);
        assert_eq!(output.line_map.source_line(p), 1);
    }
}
