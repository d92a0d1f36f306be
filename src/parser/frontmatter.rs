//! YAML frontmatter parsing.

use crate::error::{DebriefError, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Frontmatter extraction result.
#[derive(Debug, Clone)]
pub struct FrontmatterSplit<'a> {
    /// The raw YAML string (without delimiters).
    pub yaml: Option<&'a str>,
    /// The text after the frontmatter.
    pub body: &'a str,
}

/// Split raw file text into frontmatter YAML and body.
///
/// Frontmatter must open with `---` at the very start of the text and close
/// with `---` on its own line; anything else yields no frontmatter and the
/// full text as body.
pub fn split_frontmatter(text: &str) -> FrontmatterSplit<'_> {
    if !text.starts_with("---") {
        return FrontmatterSplit { yaml: None, body: text };
    }

    let after_open = &text[3..];
    let yaml_start = if after_open.starts_with('\n') {
        4
    } else if after_open.starts_with("\r\n") {
        5
    } else {
        // No newline after the opening ---, not valid frontmatter.
        return FrontmatterSplit { yaml: None, body: text };
    };

    // The closing delimiter must sit on its own line, or end the file.
    let remaining = &text[yaml_start..];
    let closing = remaining
        .find("\n---\n")
        .or_else(|| remaining.find("\n---\r\n"))
        .or_else(|| remaining.ends_with("\n---").then(|| remaining.len() - 4));

    let Some(pos) = closing else {
        return FrontmatterSplit { yaml: None, body: text };
    };

    let yaml_end = yaml_start + pos;
    let body_start = yaml_end + 4; // past the \n---
    let body = text
        .get(body_start..)
        .map(|rest| {
            rest.strip_prefix("\r\n")
                .or_else(|| rest.strip_prefix('\n'))
                .unwrap_or(rest)
        })
        .unwrap_or("");

    FrontmatterSplit {
        yaml: Some(&text[yaml_start..yaml_end]),
        body,
    }
}

/// Parse frontmatter into a YAML mapping.
///
/// Text with no frontmatter yields an empty mapping. Frontmatter that is
/// valid YAML but not a mapping is rejected.
pub fn parse_frontmatter(text: &str, path: &Path) -> Result<Mapping> {
    let Some(yaml) = split_frontmatter(text).yaml else {
        return Ok(Mapping::new());
    };

    let value: Value =
        serde_yaml::from_str(yaml).map_err(|e| DebriefError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        _ => Err(DebriefError::InvalidFrontmatter {
            path: path.to_path_buf(),
            message: "expected a mapping".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn test_path() -> PathBuf {
        PathBuf::from("note.md")
    }

    #[test]
    fn test_split_no_frontmatter() {
        let split = split_frontmatter("Just some content");
        assert!(split.yaml.is_none());
        assert_eq!(split.body, "Just some content");
    }

    #[test]
    fn test_split_with_frontmatter() {
        let text = "---\ntitle: Test\ntags: [a, b]\n---\n\nContent here";
        let split = split_frontmatter(text);
        assert_eq!(split.yaml, Some("title: Test\ntags: [a, b]"));
        assert_eq!(split.body, "\nContent here");
    }

    #[test]
    fn test_split_frontmatter_at_eof() {
        let split = split_frontmatter("---\ntitle: Test\n---");
        assert_eq!(split.yaml, Some("title: Test"));
        assert_eq!(split.body, "");
    }

    #[test]
    fn test_split_no_closing_delimiter() {
        let split = split_frontmatter("---\ntitle: Test\n\nContent without closing");
        assert!(split.yaml.is_none());
    }

    #[test]
    fn test_split_triple_dash_in_body() {
        let text = "---\ntitle: Test\n---\n\n---\n\nDashes in the body";
        let split = split_frontmatter(text);
        assert_eq!(split.yaml, Some("title: Test"));
        assert!(split.body.contains("---"));
    }

    #[test]
    fn test_parse_frontmatter_mapping() {
        let text = "---\nstatus: active\ntags:\n  - project\n---\n\nBody";
        let mapping = parse_frontmatter(text, &test_path()).unwrap();

        assert_eq!(
            mapping.get("status").and_then(Value::as_str),
            Some("active")
        );
        let tags = mapping.get("tags").and_then(Value::as_sequence).unwrap();
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_parse_frontmatter_absent_is_empty() {
        let mapping = parse_frontmatter("No frontmatter here", &test_path()).unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn test_parse_frontmatter_invalid_yaml() {
        let text = "---\ninvalid: yaml: syntax:\n---\nBody";
        let result = parse_frontmatter(text, &test_path());
        assert!(matches!(
            result,
            Err(DebriefError::InvalidFrontmatter { .. })
        ));
    }

    #[test]
    fn test_parse_frontmatter_non_mapping() {
        let text = "---\n- just\n- a list\n---\nBody";
        let result = parse_frontmatter(text, &test_path());
        assert!(matches!(
            result,
            Err(DebriefError::InvalidFrontmatter { .. })
        ));
    }
}
