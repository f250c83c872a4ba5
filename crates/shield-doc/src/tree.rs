//! The formatted document graph

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

/// Shared handle to a document node.
///
/// Printers reuse nodes, so one node can be reachable from several parents
/// and, in degenerate cases, from itself.
pub type DocRef = Rc<RefCell<Doc>>;

/// A node of the formatted document
#[derive(Debug, Clone)]
pub enum Doc {
    Text(String),
    Array(Vec<DocRef>),
    Command(Command),
}

/// Layout commands understood by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Group,
    Indent,
    Align,
    Fill,
    IfBreak,
    LineSuffix,
    Label,
    Line,
    SoftLine,
    HardLine,
    BreakParent,
}

/// A layout command with either one child or a sequence of children
#[derive(Debug, Clone)]
pub struct Command {
    pub kind: CommandKind,
    pub contents: Option<DocRef>,
    pub parts: Option<Vec<DocRef>>,
}

impl Doc {
    pub fn into_ref(self) -> DocRef {
        Rc::new(RefCell::new(self))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Direct children, `contents` taking precedence over `parts`
    pub fn children(&self) -> Vec<DocRef> {
        match self {
            Self::Text(_) => Vec::new(),
            Self::Array(parts) => parts.clone(),
            Self::Command(command) => match (&command.contents, &command.parts) {
                (Some(contents), _) => vec![Rc::clone(contents)],
                (None, Some(parts)) => parts.clone(),
                (None, None) => Vec::new(),
            },
        }
    }
}

/// Text leaves in document order, each node visited once
pub fn leaves(doc: &DocRef) -> Vec<String> {
    fn collect(node: &DocRef, seen: &mut HashSet<*const RefCell<Doc>>, out: &mut Vec<String>) {
        if !seen.insert(Rc::as_ptr(node)) {
            return;
        }
        let children = {
            let doc = node.borrow();
            if let Some(text) = doc.as_text() {
                out.push(text.to_string());
            }
            doc.children()
        };
        for child in &children {
            collect(child, seen, out);
        }
    }

    let mut out = Vec::new();
    collect(doc, &mut HashSet::new(), &mut out);
    out
}
