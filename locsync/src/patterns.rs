//! The pattern library: compiled matchers for resource statements and
//! marker call sites.
//!
//! All matching is line-oriented. The parametrized patterns embed the
//! configured marker strings literally; [`escape_pattern`] neutralizes any
//! operator characters they contain before compilation. The compiled set
//! lives in a [`Patterns`] value owned by the caller; there is no global
//! pattern table.

use regex::Regex;

use crate::{
    config::Config,
    error::Error,
    key::{ClearKey, FullKey},
};

/// The operator characters that must be escaped before a configured
/// prefix is embedded into a pattern.
pub const PATTERN_OPERATORS: [char; 15] = [
    '\\', '^', '$', '*', '+', '.', '|', '{', '}', '[', ']', '(', ')', ':', '?',
];

/// Escapes every pattern operator in `text` so it matches literally.
pub fn escape_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if PATTERN_OPERATORS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// One classified resource-file line.
///
/// `Entry` carries the fully decomposed key and value. `Plain` lines
/// (comments, spacing, statements with unmanaged keys) are preserved
/// verbatim by the writer. `Malformed` lines look like resource statements
/// but fail field extraction and are fatal to the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLine {
    Entry { key: FullKey, value: String },
    Plain,
    Malformed { reason: String },
}

/// The compiled matcher set for one configuration.
#[derive(Debug)]
pub struct Patterns {
    /// Strict resource statement: `"key" = "value";` with optional trailer.
    resource_line: Regex,
    /// Opening of a value field, used to classify malformed statements.
    value_open: Regex,
    /// A raw literal marked for localization: `"<stringPrefix>.<text>"`.
    localize_call: Regex,
    /// A resolved reference: `"<fullKey>".<methodPrefix>`.
    keyref_call: Regex,
    /// Any quoted full key, in source or resource text.
    any_keyref: Regex,
    /// A full key on its own: `<clearKey>.<localizedPrefix>_<number>`.
    full_key: Regex,
    /// The `.<localizedPrefix>_` infix marking a key as managed.
    localized_infix: String,
}

impl Patterns {
    /// Compiles the matcher set for `config`, escaping the configured
    /// marker strings so operator characters in them match literally.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let string_prefix = escape_pattern(&config.string_prefix);
        let localized_prefix = escape_pattern(&config.localized_prefix);
        let method_prefix = escape_pattern(&config.method_prefix);

        Ok(Patterns {
            resource_line: Regex::new(r#"^"(?P<key>[^"]+)"\s*=\s*"(?P<value>.*)"\s*;.*$"#)?,
            value_open: Regex::new(r#"=\s*""#)?,
            localize_call: Regex::new(&format!(
                r#""\s*{}\.(?P<value>[^"]*)""#,
                string_prefix
            ))?,
            keyref_call: Regex::new(&format!(
                r#""(?P<clear>[^"]+)\.{}_(?P<number>\d+)"\.{}\b"#,
                localized_prefix, method_prefix
            ))?,
            any_keyref: Regex::new(&format!(
                r#""(?P<clear>[^"]+)\.{}_(?P<number>\d+)\s*""#,
                localized_prefix
            ))?,
            full_key: Regex::new(&format!(
                r#"^(?P<clear>.+)\.{}_(?P<number>\d+)$"#,
                localized_prefix
            ))?,
            localized_infix: format!(".{}_", config.localized_prefix),
        })
    }

    /// Parses `text` as a full key, or returns `None` if it is not of the
    /// exact `<clearKey>.<localizedPrefix>_<number>` form. A `None` here
    /// means "not a managed key", never an error.
    pub fn parse_full_key(&self, text: &str) -> Option<FullKey> {
        let caps = self.full_key.captures(text)?;
        let number: u32 = caps["number"].parse().ok()?;
        Some(FullKey::new(&caps["clear"], number))
    }

    /// Classifies one resource-file line into an entry, a passthrough
    /// line, or a malformed statement with the failure reason.
    pub fn classify_resource_line(&self, line: &str) -> ResourceLine {
        let trimmed = line.trim();
        if trimmed.is_empty() || !trimmed.starts_with('"') || !trimmed.contains('=') {
            return ResourceLine::Plain;
        }

        let Some(caps) = self.resource_line.captures(trimmed) else {
            let reason = if !trimmed.contains(';') {
                "missing terminating ';'"
            } else if !self.value_open.is_match(trimmed) {
                "missing value quotes"
            } else {
                "unparsable resource statement"
            };
            return ResourceLine::Malformed {
                reason: reason.to_string(),
            };
        };

        let key_text = &caps["key"];
        match self.parse_full_key(key_text) {
            Some(key) => ResourceLine::Entry {
                key,
                value: caps["value"].to_string(),
            },
            // A key carrying the managed infix must parse completely.
            None if key_text.contains(&self.localized_infix) => ResourceLine::Malformed {
                reason: "key has a non-numeric suffix".to_string(),
            },
            None => ResourceLine::Plain,
        }
    }

    /// Finds the next raw-literal call site at or after `start`, returning
    /// the byte range of the whole quoted call and the literal value.
    pub fn find_localize_call(&self, line: &str, start: usize) -> Option<(std::ops::Range<usize>, String)> {
        let caps = self.localize_call.captures_at(line, start)?;
        let whole = caps.get(0).expect("capture 0 always present");
        Some((whole.range(), caps["value"].to_string()))
    }

    /// Iterates the resolved references (`"<fullKey>".<method>`) in a line.
    pub fn keyref_calls<'a>(&'a self, line: &'a str) -> impl Iterator<Item = FullKey> + 'a {
        self.keyref_call.captures_iter(line).filter_map(|caps| {
            let number: u32 = caps["number"].parse().ok()?;
            Some(FullKey::new(&caps["clear"], number))
        })
    }

    /// Iterates every quoted full key occurring in a line, regardless of
    /// surrounding context. Used by pruning and rename propagation.
    pub fn any_keyrefs<'a>(&'a self, line: &'a str) -> impl Iterator<Item = FullKey> + 'a {
        self.any_keyref.captures_iter(line).filter_map(|caps| {
            let number: u32 = caps["number"].parse().ok()?;
            Some(FullKey::new(&caps["clear"], number))
        })
    }

    /// The quoted prefix `"<clearKey>.<localizedPrefix>_` used when
    /// rewriting renamed keys textually.
    pub fn quoted_key_prefix(&self, clear_key: &ClearKey, localized_prefix: &str) -> String {
        format!("\"{}.{}_", clear_key, localized_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> Patterns {
        Patterns::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_escape_pattern_operators() {
        assert_eq!(escape_pattern("a.b"), r"a\.b");
        assert_eq!(escape_pattern("x?"), r"x\?");
        assert_eq!(escape_pattern(r"a\b"), r"a\\b");
        assert_eq!(escape_pattern("{[()]}"), r"\{\[\(\)\]\}");
        assert_eq!(escape_pattern("plain_word-1"), "plain_word-1");
    }

    #[test]
    fn test_classify_entry() {
        let p = patterns();
        let line = "\"Views.Home.String_1\" = \"Hi\";";
        match p.classify_resource_line(line) {
            ResourceLine::Entry { key, value } => {
                assert_eq!(key, FullKey::new("Views.Home", 1));
                assert_eq!(value, "Hi");
            }
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_entry_with_surrounding_whitespace() {
        let p = patterns();
        let line = "  \"Views.Home.String_2\"  =  \"Hello there\" ; ";
        match p.classify_resource_line(line) {
            ResourceLine::Entry { key, value } => {
                assert_eq!(key, FullKey::new("Views.Home", 2));
                assert_eq!(value, "Hello there");
            }
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_preserves_value_exactly() {
        let p = patterns();
        let line = "\"A.String_1\" = \"  spaced  out  \";";
        match p.classify_resource_line(line) {
            ResourceLine::Entry { value, .. } => assert_eq!(value, "  spaced  out  "),
            other => panic!("expected entry, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_plain_lines() {
        let p = patterns();
        assert_eq!(p.classify_resource_line(""), ResourceLine::Plain);
        assert_eq!(p.classify_resource_line("// comment"), ResourceLine::Plain);
        assert_eq!(p.classify_resource_line("/* block */"), ResourceLine::Plain);
        // A statement with an unmanaged key is preserved, not managed.
        assert_eq!(
            p.classify_resource_line("\"plain_key\" = \"Value\";"),
            ResourceLine::Plain
        );
    }

    #[test]
    fn test_classify_missing_semicolon_is_malformed() {
        let p = patterns();
        match p.classify_resource_line("\"A.String_1\" = \"Hi\"") {
            ResourceLine::Malformed { reason } => assert!(reason.contains("';'")),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_missing_value_quotes_is_malformed() {
        let p = patterns();
        match p.classify_resource_line("\"A.String_1\" = Hi;") {
            ResourceLine::Malformed { reason } => assert!(reason.contains("value quotes")),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_non_numeric_suffix_is_malformed() {
        let p = patterns();
        match p.classify_resource_line("\"A.String_x\" = \"Hi\";") {
            ResourceLine::Malformed { reason } => assert!(reason.contains("non-numeric")),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_full_key() {
        let p = patterns();
        let key = p.parse_full_key("Views.Home.String_12").unwrap();
        assert_eq!(key.clear_key, "Views.Home");
        assert_eq!(key.number, 12);

        assert!(p.parse_full_key("Views.Home").is_none());
        assert!(p.parse_full_key("Views.Home.String_").is_none());
        assert!(p.parse_full_key("Views.Home.String_1x").is_none());
        assert!(p.parse_full_key(".String_1").is_none());
    }

    #[test]
    fn test_find_localize_call() {
        let p = patterns();
        let line = "label.text = \"localize.Hello, world\"";
        let (range, value) = p.find_localize_call(line, 0).unwrap();
        assert_eq!(&line[range], "\"localize.Hello, world\"");
        assert_eq!(value, "Hello, world");
    }

    #[test]
    fn test_find_localize_call_repeats_on_tail() {
        let p = patterns();
        let line = "f(\"localize.One\", \"localize.Two\")";
        let (first, v1) = p.find_localize_call(line, 0).unwrap();
        assert_eq!(v1, "One");
        let (_, v2) = p.find_localize_call(line, first.end).unwrap();
        assert_eq!(v2, "Two");
    }

    #[test]
    fn test_find_localize_call_ignores_resolved_references() {
        let p = patterns();
        let line = "label.text = \"Views.Home.String_1\".localized";
        assert!(p.find_localize_call(line, 0).is_none());
    }

    #[test]
    fn test_keyref_calls() {
        let p = patterns();
        let line = "title = \"Views.Home.String_3\".localized";
        let keys: Vec<_> = p.keyref_calls(line).collect();
        assert_eq!(keys, vec![FullKey::new("Views.Home", 3)]);
    }

    #[test]
    fn test_keyref_calls_requires_method() {
        let p = patterns();
        // A bare quoted key without the method call is not a resolved reference.
        assert_eq!(p.keyref_calls("x = \"Views.Home.String_3\"").count(), 0);
    }

    #[test]
    fn test_any_keyrefs_matches_resource_statements_too() {
        let p = patterns();
        let line = "\"Views.Home.String_3\" = \"Hi\";";
        let keys: Vec<_> = p.any_keyrefs(line).collect();
        assert_eq!(keys, vec![FullKey::new("Views.Home", 3)]);
    }

    #[test]
    fn test_prefix_operators_are_matched_literally() {
        // A prefix containing pattern operators must not corrupt matching.
        let config = Config::default()
            .with_string_prefix("l10n.mark")
            .with_localized_prefix("S+r");
        let p = Patterns::new(&config).unwrap();

        let (_, value) = p
            .find_localize_call("x = \"l10n.mark.Hello\"", 0)
            .unwrap();
        assert_eq!(value, "Hello");
        // "l10nXmark" must not match even though '.' is a regex wildcard.
        assert!(p.find_localize_call("x = \"l10nXmark.Hello\"", 0).is_none());

        let key = p.parse_full_key("Views.Home.S+r_4").unwrap();
        assert_eq!(key.number, 4);
        assert!(p.parse_full_key("Views.Home.SSr_4").is_none());
    }
}
