//! Property tests over generated templated documents

use proptest::prelude::*;
use shield_core::{FormatOptions, Pipeline};
use shield_doc::leaves;
use shield_scan::normalize;
use shield_test_utils::{FakeHost, ScriptedFormatter};

/// One line of a generated document and the template tag it contains, if any
fn line() -> impl Strategy<Value = (String, Option<String>)> {
    let word = "[a-z]{1,8}";
    prop_oneof![
        word.prop_map(|w| {
            let tag = format!("{{%  {w}  %}}");
            (tag.clone(), Some(tag))
        }),
        word.prop_map(|w| {
            let tag = format!("{{{{ {w}|upper }}}}");
            (format!("<p>{tag}</p>"), Some(tag))
        }),
        word.prop_map(|w| {
            let tag = format!("{{% url \"{w}\" %}}");
            (format!("<a href=\"{tag}\">{w}</a>"), Some(tag))
        }),
        word.prop_map(|w| (format!("<span>{w}</span>"), None)),
    ]
}

fn pipeline() -> Pipeline<FakeHost, ScriptedFormatter> {
    Pipeline::new(
        FakeHost::new(),
        ScriptedFormatter::new(),
        FormatOptions::default(),
    )
}

proptest! {
    #[test]
    fn every_tag_survives_formatting(lines in prop::collection::vec(line(), 1..12)) {
        let source = lines.iter().map(|(line, _)| line.as_str()).collect::<Vec<_>>().join("\n");
        let tags: Vec<&String> = lines.iter().filter_map(|(_, tag)| tag.as_ref()).collect();

        let formatted = pipeline().format(&source).unwrap();
        prop_assert_eq!(formatted.tags, tags.len());
        prop_assert_eq!(formatted.stats.substituted, tags.len());
        prop_assert_eq!(formatted.stats.unresolved, 0);

        let printed = leaves(&formatted.doc).concat();
        prop_assert!(!printed.contains("__TAG_"));
        for tag in tags {
            prop_assert!(printed.contains(&normalize(tag)));
        }
    }

    #[test]
    fn plain_documents_pass_through_scan(words in prop::collection::vec("[a-z]{1,8}", 1..8)) {
        let source = words
            .iter()
            .map(|w| format!("<div title=\"{w}\">{w}</div>"))
            .collect::<Vec<_>>()
            .join("\n");

        let formatted = pipeline().format(&source).unwrap();
        prop_assert_eq!(formatted.tags, 0);
        prop_assert_eq!(formatted.stats.visited, 0);
    }
}
