//! Per-line HTML element nesting depth

/// Element nesting depth per source line.
///
/// Entry `i` holds the depth recorded for 0-based line `i`: the running depth
/// when the line began, raised to the depth after the last opening tag on
/// that line. Depths go negative on unbalanced input and are left that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingTable {
    depths: Vec<isize>,
}

impl Default for NestingTable {
    fn default() -> Self {
        Self { depths: vec![0] }
    }
}

impl NestingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new line at the given running depth
    pub(crate) fn start_line(&mut self, depth: isize) {
        self.depths.push(depth);
    }

    /// Overwrite the current line's entry
    pub(crate) fn set_current(&mut self, depth: isize) {
        if let Some(last) = self.depths.last_mut() {
            *last = depth;
        }
    }

    /// Depth recorded for a 0-based line
    pub fn depth_at(&self, line: usize) -> Option<isize> {
        self.depths.get(line).copied()
    }

    /// Number of lines covered; always at least one
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// Entry for the last line
    pub fn last(&self) -> isize {
        self.depths.last().copied().unwrap_or_default()
    }

    pub fn as_slice(&self) -> &[isize] {
        &self.depths
    }
}

impl From<Vec<isize>> for NestingTable {
    fn from(depths: Vec<isize>) -> Self {
        if depths.is_empty() {
            Self::default()
        } else {
            Self { depths }
        }
    }
}
