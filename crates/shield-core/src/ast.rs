//! Minimal HTML syntax tree exchanged with the host formatter

/// Position of a node in the text handed to the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceSpan {
    /// Byte offset
    pub offset: usize,
    /// 0-based line
    pub line: usize,
    /// 0-based column, in characters
    pub col: usize,
}

impl SourceSpan {
    /// Span of the byte at `offset` in `text`.
    ///
    /// Offsets past the end are clamped; offsets inside a multibyte
    /// character count that character's column.
    pub fn at(text: &str, offset: usize) -> Self {
        let offset = offset.min(text.len());
        let before = &text.as_bytes()[..offset];
        let line_start = before
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line = before.iter().filter(|&&b| b == b'\n').count();
        let col = String::from_utf8_lossy(&before[line_start..]).chars().count();
        Self { offset, line, col }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    /// `None` for valueless attributes such as `disabled`
    pub value: Option<String>,
    pub span: SourceSpan,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
            span: SourceSpan::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub span: SourceSpan,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs.iter().find(|attr| attr.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    /// Comment body without the `<!--` / `-->` delimiters
    Comment(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

impl Document {
    /// Visit every element depth-first, parents before children
    pub fn walk_elements_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        walk_nodes_mut(&mut self.children, f);
    }

    /// All elements in depth-first order
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_elements(&self.children, &mut out);
        out
    }
}

fn walk_nodes_mut<F>(nodes: &mut [Node], f: &mut F)
where
    F: FnMut(&mut Element),
{
    for node in nodes {
        if let Node::Element(element) = node {
            f(element);
            walk_nodes_mut(&mut element.children, f);
        }
    }
}

fn collect_elements<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            out.push(element);
            collect_elements(&element.children, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(name: &str, children: Vec<Node>) -> Node {
        Node::Element(Element {
            name: name.into(),
            attrs: Vec::new(),
            span: SourceSpan::default(),
            children,
        })
    }

    #[test]
    fn span_at_offset() {
        let text = "<div>\n  <p>";
        assert_eq!(
            SourceSpan::at(text, 8),
            SourceSpan {
                offset: 8,
                line: 1,
                col: 2
            }
        );
        assert_eq!(SourceSpan::at(text, 0), SourceSpan::default());
    }

    #[test]
    fn span_counts_characters() {
        let text = "é <p>";
        assert_eq!(SourceSpan::at(text, 3).col, 2);
        assert_eq!(SourceSpan::at(text, 100).offset, text.len());
    }

    #[test]
    fn walk_is_depth_first() {
        let mut doc = Document {
            children: vec![
                element("a", vec![element("b", vec![]), Node::Text("t".into())]),
                element("c", vec![]),
            ],
        };

        let mut seen = Vec::new();
        doc.walk_elements_mut(&mut |el| seen.push(el.name.clone()));
        assert_eq!(seen, ["a", "b", "c"]);

        let names: Vec<_> = doc.elements().iter().map(|el| el.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
