//! Hashtag extraction.

use crate::parser::code_block::{find_code_block_ranges, is_in_code_block};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Tag pattern: # followed by word characters.
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

/// All tag captures in the text, in order of appearance, without the leading
/// #. Duplicates are kept; matches inside fenced or inline code are skipped.
pub fn parse_tags(text: &str) -> Vec<String> {
    let code_ranges = find_code_block_ranges(text);
    let mut tags = Vec::new();

    for caps in TAG.captures_iter(text) {
        let Some(m) = caps.get(1) else { continue };
        if is_in_code_block(m.start(), &code_ranges) {
            continue;
        }
        tags.push(m.as_str().to_string());
    }

    tags
}

/// Unique tags in first-appearance order.
pub fn unique_tags(tags: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}
