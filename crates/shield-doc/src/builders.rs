//! Constructors for document nodes

use crate::tree::{Command, CommandKind, Doc, DocRef};

pub fn text(text: impl Into<String>) -> DocRef {
    Doc::Text(text.into()).into_ref()
}

pub fn array(parts: Vec<DocRef>) -> DocRef {
    Doc::Array(parts).into_ref()
}

fn wrap(kind: CommandKind, contents: DocRef) -> DocRef {
    Doc::Command(Command {
        kind,
        contents: Some(contents),
        parts: None,
    })
    .into_ref()
}

fn leaf(kind: CommandKind) -> DocRef {
    Doc::Command(Command {
        kind,
        contents: None,
        parts: None,
    })
    .into_ref()
}

pub fn group(contents: DocRef) -> DocRef {
    wrap(CommandKind::Group, contents)
}

pub fn indent(contents: DocRef) -> DocRef {
    wrap(CommandKind::Indent, contents)
}

pub fn line_suffix(contents: DocRef) -> DocRef {
    wrap(CommandKind::LineSuffix, contents)
}

pub fn fill(parts: Vec<DocRef>) -> DocRef {
    Doc::Command(Command {
        kind: CommandKind::Fill,
        contents: None,
        parts: Some(parts),
    })
    .into_ref()
}

pub fn line() -> DocRef {
    leaf(CommandKind::Line)
}

pub fn softline() -> DocRef {
    leaf(CommandKind::SoftLine)
}

pub fn hardline() -> DocRef {
    leaf(CommandKind::HardLine)
}

pub fn break_parent() -> DocRef {
    leaf(CommandKind::BreakParent)
}
