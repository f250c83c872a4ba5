use proptest::prelude::*;
use shield_scan::{normalize, scan};

const CONTAINERS: &[&str] = &["div", "span", "section", "ul", "li", "p", "template"];
const VOIDS: &[&str] = &["<br>", "<hr/>", "<img src=\"a.png\">", "<input type=\"text\" />"];

fn balanced_markup() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z \n]{0,8}",
        prop::sample::select(VOIDS).prop_map(str::to_string),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop::sample::select(CONTAINERS),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(name, children)| format!("<{name}>\n{}</{name}>", children.concat()))
    })
}

fn templated_markup() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("{% if user %}".to_string()),
        Just("{{ user.name }}".to_string()),
        Just("{% trans \"a  %} b\" %}".to_string()),
        Just("<a href=\"{% url 'x' %}\">".to_string()),
        Just("</a>".to_string()),
        Just("\n".to_string()),
        "[a-z<>/=\"' {}%]{0,6}",
    ];
    prop::collection::vec(piece, 0..12).prop_map(|pieces| pieces.concat())
}

proptest! {
    #[test]
    fn test_text_without_braces_is_unchanged(s in "[^{]*") {
        let output = scan(&s);
        prop_assert!(output.mapping.is_empty(), "unexpected records: {:?}", output.mapping);
        prop_assert_eq!(output.rewritten, s);
    }

    #[test]
    fn test_records_point_at_their_source(s in templated_markup()) {
        let output = scan(&s);
        for record in &output.mapping {
            prop_assert!(record.end > record.start, "empty span for {:?}", record);
            prop_assert_eq!(&s[record.span()], record.original.as_str());
            prop_assert!(
                record.original.starts_with('{'),
                "tag does not start with an opener: {:?}",
                record.original
            );
            prop_assert!(
                record.original.ends_with('}'),
                "tag does not end with a closer: {:?}",
                record.original
            );
        }
    }

    #[test]
    fn test_keys_are_unique_and_increasing(s in templated_markup()) {
        let output = scan(&s);
        let indices: Vec<usize> = output.mapping.iter().map(|r| r.index).collect();
        prop_assert!(
            indices.windows(2).all(|w| w[0] < w[1]),
            "indices not increasing: {:?}",
            indices
        );
        for record in &output.mapping {
            let token = format!("{}{}__", output.mapping.marker(), record.index);
            prop_assert!(
                record.key.contains(&token),
                "key {:?} does not contain {:?}",
                record.key,
                token
            );
            prop_assert_eq!(output.rewritten.matches(record.key.as_str()).count(), 1);
        }
    }

    #[test]
    fn test_nesting_balances_for_matched_elements(s in balanced_markup()) {
        let output = scan(&s);
        prop_assert_eq!(output.final_depth, 0);
        prop_assert_eq!(output.nesting.len(), s.matches('\n').count() + 1);
        prop_assert!(
            output.nesting.as_slice().iter().all(|&d| d >= 0),
            "negative depth in {:?}",
            output.nesting
        );
    }

    #[test]
    fn test_literal_markers_are_not_keys(literal in "__TAG[0-2]?_[0-9]__", s in templated_markup()) {
        let source = format!("{literal}{s}");
        let output = scan(&source);
        prop_assert!(
            !literal.contains(output.mapping.marker()),
            "marker {:?} collides with {:?}",
            output.mapping.marker(),
            literal
        );
        prop_assert!(output.rewritten.starts_with(&literal), "literal rewritten: {:?}", output.rewritten);
    }

    #[test]
    fn test_normalize_is_idempotent(s in "\\PC*") {
        let once = normalize(&s);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_scan_never_panics(s in "\\PC*") {
        let _ = scan(&s);
    }
}
