//! Wikilink extraction.

use crate::parser::code_block::{find_code_block_ranges, is_in_code_block};
use regex::Regex;
use std::sync::LazyLock;

// Wikilink pattern: [[target]] with optional #heading, #^block, and |alias
// parts, or an embed prefixed with !.
// (!?)                     - Optional ! for embeds (group 1)
// \[\[                     - Opening [[
// ([^\]\|#]+)              - Target (group 2)
// (?:#\^([a-zA-Z0-9_-]+))? - Block reference (group 3)
// (?:#([^\]\|]+))?         - Heading reference (group 4)
// (?:\|([^\]]+))?          - Alias (group 5)
// \]\]                     - Closing ]]
static WIKILINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[\[([^\]\|#]+)(?:#\^([a-zA-Z0-9_-]+))?(?:#([^\]\|]+))?(?:\|([^\]]+))?\]\]")
        .unwrap()
});

/// Link targets in the text, trimmed, in order of appearance. Embeds and
/// matches inside fenced or inline code are skipped; heading, block, and
/// alias parts are dropped. Duplicates are kept.
pub fn parse_wikilinks(text: &str) -> Vec<String> {
    let code_ranges = find_code_block_ranges(text);
    let mut targets = Vec::new();

    for caps in WIKILINK.captures_iter(text) {
        let embed = caps.get(1).map(|m| !m.as_str().is_empty()).unwrap_or(false);
        if embed {
            continue;
        }
        let Some(target) = caps.get(2) else { continue };
        if is_in_code_block(target.start(), &code_ranges) {
            continue;
        }
        targets.push(target.as_str().trim().to_string());
    }

    targets
}
