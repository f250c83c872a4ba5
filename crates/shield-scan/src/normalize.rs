//! Whitespace normalization for extracted template tags

use serde::{Deserialize, Serialize};

/// Escaping applied to double quotes when a tag is written back.
///
/// Which variant is right depends on where the placeholder landed: inside a
/// double-quoted attribute value the tag's own quotes must not terminate it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuoteEscape {
    /// Leave quotes untouched
    #[default]
    None,
    /// `"` becomes `\"`
    Backslash,
    /// `"` becomes `&quot;`
    HtmlEntity,
}

/// Collapse runs of spaces outside quoted substrings into a single space.
///
/// ```
/// use shield_scan::normalize;
///
/// assert_eq!(normalize("{%  trans   \"a  b\"  %}"), "{% trans \"a  b\" %}");
/// ```
pub fn normalize(tag: &str) -> String {
    normalize_with(tag, QuoteEscape::None)
}

/// [`normalize`], then escape double quotes as requested
pub fn normalize_with(tag: &str, escape: QuoteEscape) -> String {
    let mut out = String::with_capacity(tag.len());
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut after_space = false;

    for ch in tag.chars() {
        match quote {
            Some(q) => {
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None if ch == ' ' => {
                if !after_space {
                    out.push(' ');
                }
                after_space = true;
                continue;
            }
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None => {}
        }
        after_space = false;
        push_escaped(&mut out, ch, escape);
    }

    out
}

fn push_escaped(out: &mut String, ch: char, escape: QuoteEscape) {
    match (ch, escape) {
        ('"', QuoteEscape::Backslash) => out.push_str("\\\""),
        ('"', QuoteEscape::HtmlEntity) => out.push_str("&quot;"),
        _ => out.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_spaces_outside_quotes() {
        assert_eq!(normalize("{%   if    x   %}"), "{% if x %}");
    }

    #[test]
    fn keeps_spaces_inside_double_quotes() {
        assert_eq!(normalize(r#"{% trans "a  b" %}"#), r#"{% trans "a  b" %}"#);
    }

    #[test]
    fn keeps_spaces_inside_single_quotes() {
        assert_eq!(normalize("{{  x|default:'a   b'  }}"), "{{ x|default:'a   b' }}");
    }

    #[test]
    fn escaped_quote_does_not_close_string() {
        assert_eq!(
            normalize(r#"{% a  "x \"  y"  %}"#),
            r#"{% a "x \"  y" %}"#
        );
    }

    #[test]
    fn tabs_and_newlines_are_left_alone() {
        assert_eq!(normalize("{%\tif\n  x %}"), "{%\tif\n x %}");
    }

    #[test]
    fn backslash_escape() {
        assert_eq!(
            normalize_with(r#"{% url  "home" %}"#, QuoteEscape::Backslash),
            r#"{% url \"home\" %}"#
        );
    }

    #[test]
    fn html_entity_escape() {
        assert_eq!(
            normalize_with(r#"{% url "home" %}"#, QuoteEscape::HtmlEntity),
            "{% url &quot;home&quot; %}"
        );
    }
}
