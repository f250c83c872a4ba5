//! A small HTML host for exercising the pipeline.
//!
//! Parses elements, attributes, text and comments; prints every element's
//! children on their own lines and breaks attributes onto separate lines
//! when the opening tag does not fit.

use shield_core::ast::{Attribute, Document, Element, Node, SourceSpan};
use shield_core::{HostContext, HtmlHost, Stage};
use shield_doc::builders::{array, group, hardline, indent, line, softline, text};
use shield_doc::{CommandKind, Doc, DocRef};
use shield_scan::VOID_ELEMENTS;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FakeHostError(pub String);

#[derive(Debug, Clone, Default)]
pub struct FakeHost {
    fail_at: Option<Stage>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host that fails at `stage` with a fixed message
    pub fn failing(stage: Stage) -> Self {
        Self {
            fail_at: Some(stage),
        }
    }

    fn check(&self, stage: Stage) -> Result<(), FakeHostError> {
        match self.fail_at {
            Some(fail) if fail == stage => Err(FakeHostError(format!("scripted {stage} failure"))),
            _ => Ok(()),
        }
    }
}

impl HtmlHost for FakeHost {
    type Error = FakeHostError;

    fn parse(&self, text: &str, _ctx: &HostContext<'_>) -> Result<Document, Self::Error> {
        self.check(Stage::Parse)?;
        let mut parser = Parser { text, pos: 0 };
        let children = parser.nodes(None)?;
        Ok(Document { children })
    }

    fn preprocess(&self, _document: &mut Document, _ctx: &HostContext<'_>) -> Result<(), Self::Error> {
        self.check(Stage::Preprocess)
    }

    fn print(&self, document: &Document, _ctx: &HostContext<'_>) -> Result<DocRef, Self::Error> {
        self.check(Stage::Print)?;
        // One `>` node closes every opening tag.
        let gt = text(">");
        Ok(array(join_lines(
            document
                .children
                .iter()
                .filter_map(|node| print_node(node, &gt))
                .collect(),
        )))
    }

    fn render(&self, doc: &DocRef, ctx: &HostContext<'_>) -> Result<String, Self::Error> {
        self.check(Stage::Render)?;
        let mut renderer = Renderer {
            out: String::new(),
            unit: ctx.options.indent_unit(),
            width: ctx.options.print_width,
        };
        renderer.emit(doc, 0, false);
        renderer.out.push('\n');
        Ok(renderer.out)
    }
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn nodes(&mut self, parent: Option<&str>) -> Result<Vec<Node>, FakeHostError> {
        let mut nodes = Vec::new();

        while self.pos < self.text.len() {
            let rest = self.rest();

            if let Some(after) = rest.strip_prefix("</") {
                let close = after
                    .find('>')
                    .ok_or_else(|| FakeHostError("unterminated closing tag".into()))?;
                let name = after[..close].trim().to_ascii_lowercase();
                self.pos += 2 + close + 1;
                return match parent {
                    Some(open) if open == name => Ok(nodes),
                    _ => Err(FakeHostError(format!("unexpected closing tag </{name}>"))),
                };
            }

            if let Some(after) = rest.strip_prefix("<!--") {
                let (body, len) = match after.find("-->") {
                    Some(end) => (&after[..end], 4 + end + 3),
                    None => (after, rest.len()),
                };
                nodes.push(Node::Comment(body.to_string()));
                self.pos += len;
            } else if rest.starts_with("<!") {
                let len = rest.find('>').map_or(rest.len(), |i| i + 1);
                nodes.push(Node::Text(rest[..len].to_string()));
                self.pos += len;
            } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic()) {
                nodes.push(Node::Element(self.element()?));
            } else {
                let len = rest
                    .char_indices()
                    .skip(1)
                    .find(|&(_, c)| c == '<')
                    .map_or(rest.len(), |(i, _)| i);
                nodes.push(Node::Text(rest[..len].to_string()));
                self.pos += len;
            }
        }

        Ok(nodes)
    }

    fn element(&mut self) -> Result<Element, FakeHostError> {
        let span = SourceSpan::at(self.text, self.pos);
        self.pos += 1;
        let name = self
            .take_while(|c| c.is_ascii_alphanumeric() || c == '-')
            .to_ascii_lowercase();

        let mut attrs = Vec::new();
        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                break;
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                self_closing = true;
                break;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break;
            }
            if let Some(attr) = self.attribute() {
                attrs.push(attr);
            }
        }

        let children = if self_closing || VOID_ELEMENTS.contains(&name.as_str()) {
            Vec::new()
        } else {
            self.nodes(Some(&name))?
        };

        Ok(Element {
            name,
            attrs,
            span,
            children,
        })
    }

    fn attribute(&mut self) -> Option<Attribute> {
        let span = SourceSpan::at(self.text, self.pos);
        let name = self.take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/');
        if name.is_empty() {
            // Stray `=` or `/`
            let skip = self.rest().chars().next().map_or(0, char::len_utf8);
            self.pos += skip;
            return None;
        }

        let before_value = self.pos;
        self.skip_whitespace();
        let value = if self.rest().starts_with('=') {
            self.pos += 1;
            self.skip_whitespace();
            Some(self.value())
        } else {
            self.pos = before_value;
            None
        };

        Some(Attribute {
            name: name.to_string(),
            value,
            span,
        })
    }

    fn value(&mut self) -> String {
        let rest = self.rest();
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let body = &rest[1..];
                match body.find(quote) {
                    Some(end) => {
                        self.pos += 1 + end + 1;
                        body[..end].to_string()
                    }
                    None => {
                        self.pos = self.text.len();
                        body.to_string()
                    }
                }
            }
            _ => self
                .take_while(|c| !c.is_whitespace() && c != '>')
                .to_string(),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }
}

fn join_lines(docs: Vec<DocRef>) -> Vec<DocRef> {
    let mut parts = Vec::with_capacity(docs.len() * 2);
    for (i, doc) in docs.into_iter().enumerate() {
        if i > 0 {
            parts.push(hardline());
        }
        parts.push(doc);
    }
    parts
}

fn print_node(node: &Node, gt: &DocRef) -> Option<DocRef> {
    match node {
        Node::Text(raw) => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| text(trimmed))
        }
        Node::Comment(body) => Some(text(format!("<!--{body}-->"))),
        Node::Element(element) => Some(print_element(element, gt)),
    }
}

fn print_element(element: &Element, gt: &DocRef) -> DocRef {
    let attrs = element
        .attrs
        .iter()
        .flat_map(|attr| {
            let printed = match &attr.value {
                Some(value) => format!("{}=\"{value}\"", attr.name),
                None => attr.name.clone(),
            };
            [line(), text(printed)]
        })
        .collect();
    let open = group(array(vec![
        text(format!("<{}", element.name)),
        indent(array(attrs)),
        softline(),
        Rc::clone(gt),
    ]));

    if VOID_ELEMENTS.contains(&element.name.as_str()) {
        return open;
    }

    let close = text(format!("</{}>", element.name));
    let children: Vec<DocRef> = element
        .children
        .iter()
        .filter_map(|child| print_node(child, gt))
        .collect();
    if children.is_empty() {
        return array(vec![open, close]);
    }

    let mut body = Vec::with_capacity(children.len() * 2);
    for child in children {
        body.push(hardline());
        body.push(child);
    }
    array(vec![open, indent(array(body)), hardline(), close])
}

struct Renderer {
    out: String,
    unit: String,
    width: usize,
}

impl Renderer {
    fn emit(&mut self, node: &DocRef, level: usize, flat: bool) {
        let doc = node.borrow();
        match &*doc {
            Doc::Text(text) => self.out.push_str(text),
            Doc::Array(parts) => {
                for part in parts {
                    self.emit(part, level, flat);
                }
            }
            Doc::Command(command) => match command.kind {
                CommandKind::Line if flat => self.out.push(' '),
                CommandKind::SoftLine if flat => {}
                CommandKind::Line | CommandKind::SoftLine | CommandKind::HardLine => {
                    self.newline(level)
                }
                CommandKind::BreakParent => {}
                CommandKind::Group => {
                    let flat = flat || self.fits(node);
                    self.emit_children(&doc, level, flat);
                }
                CommandKind::Indent => self.emit_children(&doc, level + 1, flat),
                _ => self.emit_children(&doc, level, flat),
            },
        }
    }

    fn emit_children(&mut self, doc: &Doc, level: usize, flat: bool) {
        for child in doc.children() {
            self.emit(&child, level, flat);
        }
    }

    fn newline(&mut self, level: usize) {
        self.out.push('\n');
        self.out.push_str(&self.unit.repeat(level));
    }

    /// Whether `node` fits on the rest of the current line without breaking
    fn fits(&self, node: &DocRef) -> bool {
        let mut probe = String::new();
        if !flat_text(node, &mut probe) || probe.contains('\n') {
            return false;
        }
        let line_start = self.out.rfind('\n').map_or(0, |i| i + 1);
        let column = self.out[line_start..].chars().count();
        column + probe.chars().count() <= self.width
    }
}

/// Flat rendering of `node`; false if it contains a forced break
fn flat_text(node: &DocRef, out: &mut String) -> bool {
    let doc = node.borrow();
    match &*doc {
        Doc::Text(text) => {
            out.push_str(text);
            true
        }
        Doc::Command(command) if command.kind == CommandKind::Line => {
            out.push(' ');
            true
        }
        Doc::Command(command)
            if matches!(command.kind, CommandKind::HardLine | CommandKind::BreakParent) =>
        {
            false
        }
        _ => doc.children().iter().all(|child| flat_text(child, out)),
    }
}
