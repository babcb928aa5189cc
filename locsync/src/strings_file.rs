//! Parser and writer for `"key" = "value";` resource files.
//!
//! Parsing is strict: a line that looks like a resource statement but
//! fails field extraction halts the run. Lines that are not statements
//! (comments, spacing, statements with unmanaged keys) pass through
//! verbatim: a run before the first entry becomes the file preamble, any
//! other run attaches to the group of the next entry, and a trailing run
//! becomes the file trailer.
//!
//! Writing is a whole-file rewrite in canonical order: preamble, then one
//! block per clear key in sorted order (each block's passthrough lines
//! followed by its entries in ascending number order), then the trailer.
//! A comment is therefore not guaranteed to stay adjacent to the key it
//! once preceded.

use std::path::Path;

use crate::{
    error::Error,
    patterns::{Patterns, ResourceLine},
    store::ResourceFile,
    walk,
};

/// Parses resource-file content into a [`ResourceFile`] rooted at `path`.
pub fn parse_resource_str(
    content: &str,
    path: &Path,
    patterns: &Patterns,
) -> Result<ResourceFile, Error> {
    let mut file = ResourceFile::new(path);
    let mut pending: Vec<String> = Vec::new();
    let mut seen_entry = false;

    for (idx, raw) in content.lines().enumerate() {
        match patterns.classify_resource_line(raw) {
            ResourceLine::Entry { key, value } => {
                for line in pending.drain(..) {
                    if seen_entry {
                        file.group_mut(&key.clear_key).push_passthrough(line);
                    } else {
                        file.push_preamble(line);
                    }
                }
                file.add_existing(&key, &value);
                seen_entry = true;
            }
            ResourceLine::Plain => pending.push(raw.to_string()),
            ResourceLine::Malformed { reason } => {
                return Err(Error::malformed_line(path, idx + 1, raw, reason));
            }
        }
    }

    for line in pending {
        file.push_trailer(line);
    }

    Ok(file)
}

/// Reads and parses one resource file from disk, decoding a BOM if present.
pub fn read_resource_file(path: &Path, patterns: &Patterns) -> Result<ResourceFile, Error> {
    let content = walk::read_to_string(path)?;
    parse_resource_str(&content, path, patterns)
}

/// Renders a [`ResourceFile`] to canonical text.
pub fn render_resource_file(file: &ResourceFile, localized_prefix: &str) -> String {
    let mut out = String::new();
    for line in file.preamble() {
        out.push_str(line);
        out.push('\n');
    }
    for (_, group) in file.groups() {
        for line in group.passthrough() {
            out.push_str(line);
            out.push('\n');
        }
        for entry in group.sorted_entries() {
            out.push_str(&format!(
                "\"{}\" = \"{}\";\n",
                entry.full_key(localized_prefix),
                entry.value
            ));
        }
    }
    for line in file.trailer() {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Writes a [`ResourceFile`] back to its path, squashing excess blank lines.
pub fn write_resource_file(file: &ResourceFile, localized_prefix: &str) -> Result<(), Error> {
    let rendered = render_resource_file(file, localized_prefix);
    walk::write_file(file.path(), &walk::squash_blank_lines(&rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use indoc::indoc;
    use std::path::PathBuf;

    fn patterns() -> Patterns {
        Patterns::new(&Config::default()).unwrap()
    }

    fn parse(content: &str) -> ResourceFile {
        parse_resource_str(content, &PathBuf::from("en.lproj/Localizable.strings"), &patterns())
            .unwrap()
    }

    #[test]
    fn test_parse_basic_statements() {
        let file = parse(indoc! {r#"
            "Views.Home.String_1" = "Hi";
            "Views.Home.String_2" = "Bye";
        "#});
        let group = file.group("Views.Home").unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.get(1).unwrap().value, "Hi");
        assert_eq!(group.get(2).unwrap().value, "Bye");
        assert_eq!(group.last_number(), 2);
    }

    #[test]
    fn test_parse_attaches_comment_to_next_entry_group() {
        let file = parse(indoc! {r#"
            // generated header

            "App.String_1" = "Start";
            /* home screen */
            "Views.Home.String_1" = "Hi";
        "#});
        assert_eq!(file.preamble(), ["// generated header", ""]);
        let home = file.group("Views.Home").unwrap();
        assert_eq!(home.passthrough(), ["/* home screen */"]);
        assert!(file.group("App").unwrap().passthrough().is_empty());
    }

    #[test]
    fn test_parse_trailer_lines() {
        let file = parse(indoc! {r#"
            "App.String_1" = "Start";
            // the end
        "#});
        assert_eq!(file.trailer(), ["// the end"]);
    }

    #[test]
    fn test_parse_unmanaged_statement_is_passthrough() {
        let file = parse(indoc! {r#"
            "CFBundleDisplayName" = "My App";
            "App.String_1" = "Start";
        "#});
        assert_eq!(file.entry_count(), 1);
        assert_eq!(file.preamble(), ["\"CFBundleDisplayName\" = \"My App\";"]);
    }

    #[test]
    fn test_parse_malformed_statement_is_fatal() {
        let content = "\"App.String_1\" = Start;\n";
        let err = parse_resource_str(
            content,
            &PathBuf::from("en.lproj/Localizable.strings"),
            &patterns(),
        )
        .unwrap_err();
        match err {
            Error::MalformedLine { line_number, reason, .. } => {
                assert_eq!(line_number, 1);
                assert!(reason.contains("value quotes"));
            }
            other => panic!("expected malformed line, got {}", other),
        }
    }

    #[test]
    fn test_render_sorts_groups_and_numbers() {
        let file = parse(indoc! {r#"
            "Views.Home.String_2" = "Bye";
            "App.String_1" = "Start";
            "Views.Home.String_1" = "Hi";
        "#});
        let rendered = render_resource_file(&file, "String");
        assert_eq!(
            rendered,
            indoc! {r#"
                "App.String_1" = "Start";
                "Views.Home.String_1" = "Hi";
                "Views.Home.String_2" = "Bye";
            "#}
        );
    }

    #[test]
    fn test_round_trip_is_stable() {
        let original = parse(indoc! {r#"
            // header

            "Views.Home.String_1" = "Hi";
            /* note */
            "Views.Start.String_1" = "Go";
        "#});
        let first = render_resource_file(&original, "String");
        let reparsed = parse(&first);
        let second = render_resource_file(&reparsed, "String");
        assert_eq!(first, second);
    }

    #[test]
    fn test_value_whitespace_survives_round_trip() {
        let file = parse("\"A.String_1\" = \"  two  spaces  \";\n");
        let rendered = render_resource_file(&file, "String");
        assert_eq!(rendered, "\"A.String_1\" = \"  two  spaces  \";\n");
    }
}
