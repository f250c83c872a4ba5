//! Single-pass delimiter scanner.
//!
//! Walks the document once, keeping a stack of [`Frame`]s that says what kind
//! of region the cursor is in. The stack makes it possible to tell a `{%`
//! inside an attribute value (extract it) from one inside a string literal
//! of another template tag (leave it), and to ignore `>` inside quoted
//! attribute values when tracking element nesting.

use crate::line_map::LineMap;
use crate::nesting::NestingTable;
use crate::placeholder::{Placement, PlaceholderMapping, marker_for};

/// Elements that never have a closing tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Template tag delimiter family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `{% ... %}`
    Percent,
    /// `{{ ... }}`
    Brace,
}

impl Delimiter {
    /// Delimiter opened by `{` followed by `next`
    fn opened_by(next: Option<u8>) -> Option<Self> {
        match next {
            Some(b'%') => Some(Self::Percent),
            Some(b'{') => Some(Self::Brace),
            _ => None,
        }
    }

    fn closes(&self, ch: u8, next: Option<u8>) -> bool {
        let lead = match self {
            Self::Percent => b'%',
            Self::Brace => b'}',
        };
        ch == lead && next == Some(b'}')
    }
}

/// Scanner state; the innermost region is the top of the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    Default,
    InTag {
        delimiter: Delimiter,
        placement: Placement,
        start: usize,
    },
    InString {
        quote: u8,
    },
    InHtmlTag {
        closing: bool,
        void: bool,
    },
}

/// Everything one scan produces
#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Source text with every extracted tag replaced by its key
    pub rewritten: String,
    pub mapping: PlaceholderMapping,
    pub nesting: NestingTable,
    /// Running nesting depth at end of input
    pub final_depth: isize,
    pub line_map: LineMap,
}

struct Scanner<'a> {
    text: &'a str,
    stack: Vec<Frame>,
    mapping: PlaceholderMapping,
    nesting: NestingTable,
    depth: isize,
}

/// Extract template tags from `text`.
///
/// Unterminated tags and strings are not errors: the scan simply ends with
/// frames left on the stack, and an unclosed tag's text stays in the output.
pub fn scan(text: &str) -> ScanOutput {
    let mut scanner = Scanner {
        text,
        stack: vec![Frame::Default],
        mapping: PlaceholderMapping::with_marker(marker_for(text)),
        nesting: NestingTable::new(),
        depth: 0,
    };
    scanner.run();

    let residual = scanner.stack.len() - 1;
    if residual > 0 {
        tracing::debug!(
            residual,
            innermost = ?scanner.stack.last(),
            "Scan ended inside an unterminated region"
        );
    }
    tracing::debug!(
        tags = scanner.mapping.len(),
        lines = scanner.nesting.len(),
        final_depth = scanner.depth,
        "Scanned document"
    );

    let rewritten = scanner.mapping.apply(text);
    let line_map = LineMap::build(text, &scanner.mapping);
    ScanOutput {
        rewritten,
        mapping: scanner.mapping,
        nesting: scanner.nesting,
        final_depth: scanner.depth,
        line_map,
    }
}

impl Scanner<'_> {
    fn run(&mut self) {
        let text = self.text;
        let bytes = text.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            let ch = bytes[i];
            let next = bytes.get(i + 1).copied();
            let prev = i.checked_sub(1).map(|p| bytes[p]);

            if ch == b'\n' {
                self.nesting.start_line(self.depth);
            }

            let opener = if ch == b'{' {
                Delimiter::opened_by(next)
            } else {
                None
            };
            let is_quote = ch == b'"' || ch == b'\'';

            match self.top() {
                Frame::Default => {
                    if let Some(delimiter) = opener {
                        self.open_tag(delimiter, Placement::Content, i);
                        i += 1;
                    } else if ch == b'<' && !matches!(next, Some(b'!' | b'?')) {
                        let closing = next == Some(b'/');
                        let void = tag_name(&bytes[i + 1..])
                            .is_some_and(|name| VOID_ELEMENTS.contains(&name.as_str()));
                        self.stack.push(Frame::InHtmlTag { closing, void });
                        if !closing {
                            self.depth += 1;
                            self.nesting.set_current(self.depth);
                        }
                    }
                }
                Frame::InTag {
                    delimiter,
                    placement,
                    start,
                } => {
                    if is_quote {
                        self.stack.push(Frame::InString { quote: ch });
                    } else if delimiter.closes(ch, next) {
                        let end = i + 2;
                        self.mapping.insert(placement, &text[start..end], start, end);
                        self.stack.pop();
                        i += 1;
                    }
                }
                Frame::InString { quote } => {
                    if let Some(delimiter) = opener.filter(|_| !self.string_in_tag()) {
                        self.open_tag(delimiter, Placement::AttributeValue, i);
                        i += 1;
                    } else if ch == quote && prev != Some(b'\\') {
                        self.stack.pop();
                    }
                }
                Frame::InHtmlTag { closing, void } => {
                    if let Some(delimiter) = opener {
                        self.open_tag(delimiter, Placement::Tag, i);
                        i += 1;
                    } else if is_quote {
                        self.stack.push(Frame::InString { quote: ch });
                    } else if ch == b'>' {
                        if closing || void || prev == Some(b'/') {
                            self.depth -= 1;
                        }
                        self.stack.pop();
                    }
                }
            }

            i += 1;
        }
    }

    fn top(&self) -> Frame {
        self.stack.last().copied().unwrap_or(Frame::Default)
    }

    fn open_tag(&mut self, delimiter: Delimiter, placement: Placement, start: usize) {
        self.stack.push(Frame::InTag {
            delimiter,
            placement,
            start,
        });
    }

    /// Whether the string on top of the stack belongs to a template tag
    fn string_in_tag(&self) -> bool {
        self.stack.len() >= 2 && matches!(self.stack[self.stack.len() - 2], Frame::InTag { .. })
    }
}

/// Lowercased element name following a `<`, tolerating `/` and whitespace
fn tag_name(rest: &[u8]) -> Option<String> {
    let mut pos = 0;
    let skip_ws = |pos: &mut usize| {
        while rest.get(*pos).is_some_and(u8::is_ascii_whitespace) {
            *pos += 1;
        }
    };

    skip_ws(&mut pos);
    if rest.get(pos) == Some(&b'/') {
        pos += 1;
    }
    skip_ws(&mut pos);

    let start = pos;
    while rest
        .get(pos)
        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_')
    {
        pos += 1;
    }

    (pos > start).then(|| String::from_utf8_lossy(&rest[start..pos]).to_ascii_lowercase())
}
