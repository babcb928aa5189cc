//! Property tests for number allocation, key derivation, and round-trips.

use std::collections::HashSet;
use std::path::PathBuf;

use proptest::prelude::*;

use locsync::{
    Config, Group, Patterns, derive_clear_key, escape_pattern, make_full_key,
    strings_file::{parse_resource_str, render_resource_file},
};

fn value_strategy() -> impl Strategy<Value = String> {
    // Printable values without quotes or line terminators.
    proptest::string::string_regex("[ -!#-~]{1,24}").expect("valid strategy")
}

proptest! {
    #[test]
    fn distinct_values_get_distinct_monotonic_numbers(values in proptest::collection::vec(value_strategy(), 1..32)) {
        let mut group = Group::new("Views.Home");
        let mut last = 0u32;
        let mut numbers_by_value = std::collections::HashMap::new();
        for value in &values {
            let number = group.add_new(value).number;
            match numbers_by_value.get(value) {
                Some(&existing) => prop_assert_eq!(existing, number),
                None => {
                    prop_assert!(number > last, "fresh numbers increase monotonically");
                    last = number;
                    numbers_by_value.insert(value.clone(), number);
                }
            }
        }

        let distinct: HashSet<&String> = values.iter().collect();
        prop_assert_eq!(group.len(), distinct.len());

        let assigned: HashSet<u32> = numbers_by_value.values().copied().collect();
        prop_assert_eq!(assigned.len(), numbers_by_value.len());
    }

    #[test]
    fn add_new_is_idempotent(value in value_strategy()) {
        let mut group = Group::new("Views.Home");
        let first = group.add_new(&value).clone();
        let second = group.add_new(&value).clone();
        prop_assert_eq!(first, second);
        prop_assert_eq!(group.len(), 1);
    }

    #[test]
    fn derive_clear_key_total_over_source_paths(
        segments in proptest::collection::vec("[A-Za-z][A-Za-z0-9]{0,12}", 1..5)
    ) {
        let path = format!("{}.swift", segments.join("/"));
        let clear_key = derive_clear_key(&path, "swift").unwrap();
        prop_assert_eq!(clear_key, segments.join("."));
    }

    #[test]
    fn full_key_parse_inverts_make(
        segments in proptest::collection::vec("[A-Za-z][A-Za-z0-9]{0,8}", 1..4),
        number in 1u32..10_000
    ) {
        let config = Config::default();
        let patterns = Patterns::new(&config).unwrap();
        let clear_key = segments.join(".");
        let text = make_full_key(&clear_key, &config.localized_prefix, number);
        let parsed = patterns.parse_full_key(&text).unwrap();
        prop_assert_eq!(parsed.clear_key, clear_key);
        prop_assert_eq!(parsed.number, number);
    }

    #[test]
    fn escaped_prefix_never_changes_match_semantics(prefix in "[a-zA-Z?*.+()\\[\\]{}|^$:]{1,8}") {
        // Whatever operators the prefix contains, the compiled patterns
        // must treat it literally.
        let config = Config::default().with_string_prefix(prefix.clone());
        let patterns = Patterns::new(&config).unwrap();
        let line = format!("x = \"{}.Some value\"", prefix);
        let (_, value) = patterns.find_localize_call(&line, 0).unwrap();
        prop_assert_eq!(value, "Some value");
    }

    #[test]
    fn writer_output_reparses_identically(
        entries in proptest::collection::btree_map(
            (proptest::collection::vec("[A-Za-z][A-Za-z0-9]{0,6}", 1..3), 1u32..50),
            value_strategy(),
            1..16
        )
    ) {
        let config = Config::default();
        let patterns = Patterns::new(&config).unwrap();
        let path = PathBuf::from("en.lproj/Localizable.strings");

        let mut content = String::new();
        for ((segments, number), value) in &entries {
            content.push_str(&format!(
                "\"{}\" = \"{}\";\n",
                make_full_key(&segments.join("."), &config.localized_prefix, *number),
                value
            ));
        }

        let parsed = parse_resource_str(&content, &path, &patterns).unwrap();
        let first = render_resource_file(&parsed, &config.localized_prefix);
        let reparsed = parse_resource_str(&first, &path, &patterns).unwrap();
        let second = render_resource_file(&reparsed, &config.localized_prefix);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn escape_pattern_escapes_the_fixed_operator_set() {
    let operators = r"\^$*+.|{}[]():?";
    let escaped = escape_pattern(operators);
    let expected: String = operators.chars().flat_map(|c| ['\\', c]).collect();
    assert_eq!(escaped, expected);
}
