//! End-to-end formatting of templated pages
//!
//! This test exercises the complete flow: config loading -> scan -> host parse
//! -> directive formatting -> print -> tag reinsertion -> render.

use pretty_assertions::assert_eq;
use rstest::rstest;
use shield_core::{FormatOptions, Pipeline};
use shield_expr::{ExpressionConfig, ExpressionError};
use shield_test_utils::FakeHost;
use std::fs;
use tempfile::TempDir;

const PAGE: &str = r#"{% extends "base.html" %}
{% block content %}
<main x-data="{ items : [] , open:false }">
<ul>
{% for item in items %}
<li class="{% if item.active %}active{% endif %}">{{ item.name }}</li>
{% endfor %}
</ul>
<button @click="open = !open">Toggle</button>
</main>
{% endblock %}
"#;

const FORMATTED_PAGE: &str = r#"{% extends "base.html" %}
{% block content %}
<main x-data="{ items: [], open: false }">
  <ul>
    {% for item in items %}
    <li class="{% if item.active %}active{% endif %}">
      {{ item.name }}
    </li>
    {% endfor %}
  </ul>
  <button @click="open=!open">
    Toggle
  </button>
</main>
{% endblock %}
"#;

/// Drops whitespace and spaces out object punctuation
fn compact(source: &str) -> String {
    source
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace(':', ": ")
        .replace(',', ", ")
        .replace('{', "{ ")
        .replace('}', " }")
}

fn toy_formatter(source: &str, _config: &ExpressionConfig) -> shield_expr::Result<String> {
    match source
        .strip_prefix("() => (")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(body) => Ok(format!("() => ({});\n", compact(body))),
        None if source.contains('{') => Err(ExpressionError::Formatter(
            "statement blocks unsupported".into(),
        )),
        None => Ok(format!("{};\n", compact(source))),
    }
}

type ToyFormatter = fn(&str, &ExpressionConfig) -> shield_expr::Result<String>;

fn pipeline(options: FormatOptions) -> Pipeline<FakeHost, ToyFormatter> {
    Pipeline::new(FakeHost::new(), toy_formatter as ToyFormatter, options)
}

#[test]
fn formats_templated_page() {
    let output = pipeline(FormatOptions::default())
        .format_to_string(PAGE)
        .unwrap();
    assert_eq!(output, FORMATTED_PAGE);
}

#[test]
fn formatting_is_idempotent() {
    let pipeline = pipeline(FormatOptions::default());
    let once = pipeline.format_to_string(PAGE).unwrap();
    let twice = pipeline.format_to_string(&once).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn every_tag_is_reinserted_once() {
    let formatted = pipeline(FormatOptions::default()).format(PAGE).unwrap();
    assert_eq!(formatted.tags, 8);
    assert_eq!(formatted.stats.substituted, 8);
    assert_eq!(formatted.stats.unresolved, 0);
    assert_eq!(formatted.directives, 2);
}

#[test]
fn options_loaded_from_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("shield.toml");
    fs::write(&path, "useTabs = true\n").unwrap();

    let options = FormatOptions::load(&path).unwrap();
    let output = pipeline(options)
        .format_to_string("<ul>\n<li>{{ a }}</li>\n</ul>")
        .unwrap();
    assert_eq!(output, "<ul>\n\t<li>\n\t\t{{ a }}\n\t</li>\n</ul>\n");
}

#[test]
fn tag_spanning_lines_keeps_its_line_breaks() {
    let output = pipeline(FormatOptions::default())
        .format_to_string("<p>{% trans   \"a  b\"\n   count=n %}</p>")
        .unwrap();
    assert_eq!(output, "<p>\n  {% trans \"a  b\"\n count=n %}\n</p>\n");
}

#[rstest]
#[case::expression(r#"<p x-text="user . name"></p>"#, "<p x-text=\"user.name\"></p>\n")]
#[case::statement(
    r#"<button @click="count ++">+</button>"#,
    "<button @click=\"count++\">\n  +\n</button>\n"
)]
#[case::empty_value(r#"<div x-show="" hidden></div>"#, "<div x-show=\"\" hidden></div>\n")]
#[case::formatter_error(
    r#"<div @click="if (a) { b() }"></div>"#,
    "<div @click=\"if (a) { b() }\"></div>\n"
)]
fn directive_values_end_to_end(#[case] source: &str, #[case] expected: &str) {
    let output = pipeline(FormatOptions::default())
        .format_to_string(source)
        .unwrap();
    assert_eq!(output, expected);
}
