//! Code block detection, for skipping tags and links inside code.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// Inline code spans; double backticks may contain single backticks.
static INLINE_DOUBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"``(?:[^`]|`[^`])*``").unwrap());
static INLINE_SINGLE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`[^`\n]+`").unwrap());

/// Byte ranges of code in the text: fenced blocks first, then inline spans
/// outside them, sorted by start.
pub fn find_code_block_ranges(text: &str) -> Vec<Range<usize>> {
    let mut ranges = fenced_ranges(text);

    for regex in [&INLINE_DOUBLE, &INLINE_SINGLE] {
        for m in regex.find_iter(text) {
            if overlaps(&ranges, m.start(), m.end()) {
                continue;
            }
            ranges.push(m.start()..m.end());
        }
    }

    ranges.sort_by_key(|r| r.start);
    ranges
}

/// Whether a byte offset falls inside any of the ranges.
pub fn is_in_code_block(offset: usize, ranges: &[Range<usize>]) -> bool {
    ranges.iter().any(|r| r.contains(&offset))
}

/// Fenced blocks: an opening fence line through its closing fence line.
/// A fence that never closes is not code.
fn fenced_ranges(text: &str) -> Vec<Range<usize>> {
    let lines = line_spans(text);
    let mut ranges = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let (start, end) = lines[i];
        let Some((fence_char, fence_len)) = fence_opening(&text[start..end]) else {
            i += 1;
            continue;
        };

        let close = lines[i + 1..]
            .iter()
            .position(|&(s, e)| fence_closing(&text[s..e], fence_char, fence_len));

        match close {
            Some(offset) => {
                let (_, close_end) = lines[i + 1 + offset];
                ranges.push(start..close_end);
                i += offset + 2;
            }
            None => i += 1,
        }
    }

    ranges
}

/// Byte span of each line, excluding the trailing newline.
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;

    for (i, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            spans.push((start, i));
            start = i + 1;
        }
    }
    if start < text.len() {
        spans.push((start, text.len()));
    }

    spans
}

/// An opening fence: three or more backticks or tildes starting the line,
/// with an optional info string after. Returns the fence character and the
/// run length.
fn fence_opening(line: &str) -> Option<(char, usize)> {
    let first = line.chars().next()?;
    if first != '`' && first != '~' {
        return None;
    }

    let len = line.chars().take_while(|&c| c == first).count();
    (len >= 3).then_some((first, len))
}

/// A closing fence: nothing but fence characters, at least as many as the
/// opening run.
fn fence_closing(line: &str, fence_char: char, fence_len: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= fence_len && trimmed.chars().all(|c| c == fence_char)
}

fn overlaps(ranges: &[Range<usize>], start: usize, end: usize) -> bool {
    ranges.iter().any(|r| start < r.end && r.start < end)
}
