//! Checkbox task-line parsing with emoji metadata tokens.

use crate::error::{DebriefError, Result};
use crate::types::{Task, TaskPriority};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Regex for the checkbox token. Matched anywhere in the line, not only at
/// the start, so indented and quoted task lines still count.
static CHECKBOX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- \[([ xX])\]").unwrap());

/// Regex matching any priority glyph, built from the glyph table.
static PRIORITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let glyphs: Vec<&str> = TaskPriority::GLYPHS.iter().map(|(_, g)| *g).collect();
    Regex::new(&glyphs.join("|")).unwrap()
});

/// Regex for a due-date token: calendar glyph, one space, ISO date.
static DUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"📅 (\d{4}-\d{2}-\d{2})").unwrap());

/// Regex for a completion-date token: check glyph, one space, ISO date.
static COMPLETION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"✅ (\d{4}-\d{2}-\d{2})").unwrap());

/// Regex for hashtag tokens in task text.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\w+)").unwrap());

/// Parse a single line into a [`Task`].
///
/// Returns `Ok(None)` when the line carries no checkbox token; that is the
/// normal non-task outcome, not an error. Metadata tokens are extracted in a
/// fixed order (priority glyph, due date, completion date, then tags), and
/// each extraction splices exactly the byte range it matched out of the
/// working text, so removing one token can never corrupt another. Only the
/// first occurrence of the priority and date tokens is consumed; later
/// duplicates stay in the content.
pub fn parse_task_line(line: &str) -> Result<Option<Task>> {
    let Some(caps) = CHECKBOX_REGEX.captures(line) else {
        return Ok(None);
    };

    let symbol = caps.get(1).map(|m| m.as_str()).unwrap_or(" ");
    let completed = symbol.eq_ignore_ascii_case("x");

    let checkbox_end = caps.get(0).map(|m| m.end()).unwrap_or(0);
    let mut remaining = line[checkbox_end..].trim().to_string();

    let priority = extract_priority(&mut remaining);
    let due_date = extract_date(&mut remaining, &DUE_REGEX)?;
    let completion_date = extract_date(&mut remaining, &COMPLETION_REGEX)?;
    let tags = extract_tags(&mut remaining);

    Ok(Some(Task {
        content: remaining.trim().to_string(),
        completed,
        priority,
        due_date,
        completion_date,
        tags,
    }))
}

/// Parse all tasks from file content, applying [`parse_task_line`] to every
/// line independently and preserving line order.
pub fn parse_file_tasks(content: &str) -> Result<Vec<Task>> {
    let mut tasks = Vec::new();
    for line in content.lines() {
        if let Some(task) = parse_task_line(line.trim())? {
            tasks.push(task);
        }
    }
    Ok(tasks)
}

/// Remove a byte range from the remaining string.
fn remove_range(remaining: &mut String, start: usize, end: usize) {
    *remaining = format!("{}{}", &remaining[..start], &remaining[end..]);
}

/// Extract the leftmost priority glyph, splicing it out of the text.
fn extract_priority(remaining: &mut String) -> Option<TaskPriority> {
    let (start, end, priority) = {
        let m = PRIORITY_REGEX.find(remaining)?;
        (m.start(), m.end(), TaskPriority::from_glyph(m.as_str())?)
    };
    remove_range(remaining, start, end);
    Some(priority)
}

/// Extract the first date token matching `pattern`, splicing the whole token
/// out of the text. A matched token whose digits do not form a real calendar
/// date fails the parse.
fn extract_date(remaining: &mut String, pattern: &Regex) -> Result<Option<NaiveDate>> {
    let Some(caps) = pattern.captures(remaining) else {
        return Ok(None);
    };

    let (start, end) = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or((0, 0));
    let token = caps.get(1).map(|m| m.as_str()).unwrap_or("").to_string();

    let date = NaiveDate::parse_from_str(&token, "%Y-%m-%d")
        .map_err(|e| DebriefError::DateParse { token, source: e })?;

    remove_range(remaining, start, end);
    Ok(Some(date))
}

/// Extract every hashtag token, splicing each matched range out of the text.
/// Captures are collected in order of appearance; duplicates are kept.
fn extract_tags(remaining: &mut String) -> Vec<String> {
    let mut tags = Vec::new();
    let mut ranges = Vec::new();

    for caps in TAG_REGEX.captures_iter(remaining) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            tags.push(name.as_str().to_string());
            ranges.push((whole.start(), whole.end()));
        }
    }

    // Splice right to left so earlier ranges stay valid.
    for (start, end) in ranges.into_iter().rev() {
        remove_range(remaining, start, end);
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Task {
        parse_task_line(line).unwrap().expect("expected a task")
    }

    #[test]
    fn test_parse_simple_task() {
        let task = parse("- [ ] A simple task");
        assert_eq!(task.content, "A simple task");
        assert!(!task.completed);
        assert_eq!(task.priority, None);
        assert_eq!(task.due_date, None);
        assert_eq!(task.completion_date, None);
        assert!(task.tags.is_empty());
    }

    #[test]
    fn test_parse_completed_task() {
        assert!(parse("- [x] Done").completed);
        assert!(parse("- [X] Done").completed);
        assert!(!parse("- [ ] Not done").completed);
    }

    #[test]
    fn test_non_task_line() {
        assert_eq!(parse_task_line("Just a note").unwrap(), None);
        assert_eq!(parse_task_line("").unwrap(), None);
        assert_eq!(parse_task_line("# Heading").unwrap(), None);
    }

    #[test]
    fn test_checkbox_mid_line() {
        let task = parse("Today: - [ ] buy milk");
        assert_eq!(task.content, "buy milk");
    }

    #[test]
    fn test_indented_task() {
        let task = parse("    - [ ] nested item");
        assert_eq!(task.content, "nested item");
    }

    #[test]
    fn test_parse_priority_glyphs() {
        for (priority, glyph) in TaskPriority::GLYPHS {
            let task = parse(&format!("- [ ] Task {}", glyph));
            assert_eq!(task.priority, Some(priority));
            assert_eq!(task.content, "Task");
        }
    }

    #[test]
    fn test_priority_leftmost_wins() {
        let task = parse("- [ ] Task 🔽 then ⏫");
        assert_eq!(task.priority, Some(TaskPriority::Medium));
        // Only the matched glyph is removed; the later one stays.
        assert!(task.content.contains("⏫"));
    }

    #[test]
    fn test_parse_due_date() {
        let task = parse("- [ ] Pay rent 📅 2024-03-15");
        assert_eq!(
            task.due_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert_eq!(task.content, "Pay rent");
    }

    #[test]
    fn test_parse_completion_date() {
        let task = parse("- [x] Done ✅ 2024-03-20");
        assert!(task.completed);
        assert_eq!(
            task.completion_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap())
        );
        assert_eq!(task.due_date, None);
        assert_eq!(task.content, "Done");
    }

    #[test]
    fn test_parse_both_dates() {
        let task = parse("- [x] Ship it 📅 2024-03-15 ✅ 2024-03-14");
        assert_eq!(
            task.due_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert_eq!(
            task.completion_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 14).unwrap())
        );
        assert_eq!(task.content, "Ship it");
    }

    #[test]
    fn test_impossible_date_is_error() {
        let result = parse_task_line("- [ ] Task 📅 2024-13-45");
        assert!(matches!(result, Err(DebriefError::DateParse { .. })));
    }

    #[test]
    fn test_malformed_date_not_matched() {
        // Wrong digit grouping never matches; the token stays in the content.
        let task = parse("- [ ] Task 📅 2024-3-5");
        assert_eq!(task.due_date, None);
        assert!(task.content.contains("📅 2024-3-5"));
    }

    #[test]
    fn test_second_due_date_untouched() {
        let task = parse("- [ ] Task 📅 2024-03-15 📅 2024-04-01");
        assert_eq!(
            task.due_date,
            Some(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap())
        );
        assert!(task.content.contains("📅 2024-04-01"));
    }

    #[test]
    fn test_parse_tags() {
        let task = parse("- [ ] Task #home #errand");
        assert_eq!(task.tags, vec!["home", "errand"]);
        assert_eq!(task.content, "Task");
    }

    #[test]
    fn test_duplicate_tags_kept() {
        let task = parse("- [ ] Task #a #b #a");
        assert_eq!(task.tags, vec!["a", "b", "a"]);
    }

    #[test]
    fn test_tag_prefix_overlap() {
        // Range-based removal must not eat "#a" out of "#ab".
        let task = parse("- [ ] Task #a #ab");
        assert_eq!(task.tags, vec!["a", "ab"]);
        assert_eq!(task.content, "Task");
    }

    #[test]
    fn test_unicode_tag() {
        let task = parse("- [ ] Задача #проект");
        assert_eq!(task.tags, vec!["проект"]);
        assert_eq!(task.content, "Задача");
    }

    #[test]
    fn test_full_task_line() {
        let task = parse("- [ ] Write report 🔼 📅 2024-05-01 #work #q2");
        assert_eq!(task.content, "Write report");
        assert_eq!(task.priority, Some(TaskPriority::High));
        assert_eq!(
            task.due_date,
            Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap())
        );
        assert_eq!(task.tags, vec!["work", "q2"]);
    }

    #[test]
    fn test_parse_is_idempotent_per_line() {
        let line = "- [x] Review draft ⏬ ✅ 2024-02-02 #review";
        let first = parse(line);
        let second = parse(line);
        assert_eq!(first, second);
    }

    #[test]
    fn test_interior_whitespace_kept() {
        // Splicing a mid-line token leaves the surrounding spaces in place.
        let task = parse("- [ ] Before 📅 2024-01-02 after");
        assert_eq!(task.content, "Before  after");
    }

    #[test]
    fn test_parse_file_tasks() {
        let content = "# Plan\n\n- [ ] First step #setup\nSome prose in between.\n  - [x] Second step ✅ 2024-01-10\nNot a task.\n";
        let tasks = parse_file_tasks(content).unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].content, "First step");
        assert_eq!(tasks[0].tags, vec!["setup"]);
        assert_eq!(tasks[1].content, "Second step");
        assert!(tasks[1].completed);
    }

    #[test]
    fn test_parse_file_tasks_propagates_date_error() {
        let content = "- [ ] Fine\n- [ ] Broken 📅 2024-00-10\n";
        assert!(matches!(
            parse_file_tasks(content),
            Err(DebriefError::DateParse { .. })
        ));
    }
}
