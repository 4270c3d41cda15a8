//! Token extraction edge cases.

use easel::console::next_token;
use pretty_assertions::assert_eq;

fn extract(input: &str) -> (String, String) {
    let ext = next_token(input);
    (ext.token, ext.remainder.to_string())
}

#[test]
fn test_leading_markers_form_part_of_the_name() {
    // Leading spaces skipped, the two dashes accepted (no alphanumeric seen
    // yet), then "foo", then the space terminates the token.
    assert_eq!(
        extract("  --foo bar"),
        ("--foo".to_string(), "bar".to_string())
    );
}

#[test]
fn test_marker_inside_name_is_dropped() {
    assert_eq!(extract("ab-cd ef"), ("abcd".to_string(), "ef".to_string()));
}

#[test]
fn test_separator_only_buffer_is_drained() {
    assert_eq!(extract("   "), (String::new(), String::new()));
}

#[test]
fn test_names_are_case_insensitive() {
    assert_eq!(extract("SaveAs now"), ("saveas".to_string(), "now".to_string()));
}

#[test]
fn test_all_separator_classes_terminate() {
    for sep in ['\r', '\n', '\t', ' '] {
        let input = format!("line{sep}rest");
        assert_eq!(
            extract(&input),
            ("line".to_string(), "rest".to_string()),
            "separator {sep:?}"
        );
    }
}

#[test]
fn test_retokenizing_remainder_equals_single_scan() {
    // Extracting once and then re-extracting from the remainder behaves
    // like one scan with an internal cursor.
    let (first, rest) = extract("new  line\tsave");
    assert_eq!(first, "new");
    let (second, rest) = extract(&rest);
    assert_eq!(second, "line");
    let (third, rest) = extract(&rest);
    assert_eq!(third, "save");
    assert_eq!(rest, "");
}
