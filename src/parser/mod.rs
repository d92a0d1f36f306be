//! Parsers for Obsidian markdown syntax.

pub mod code_block;
pub mod frontmatter;
pub mod tag;
pub mod task;
pub mod wikilink;

pub use code_block::find_code_block_ranges;
pub use frontmatter::{parse_frontmatter, split_frontmatter, FrontmatterSplit};
pub use tag::{parse_tags, unique_tags};
pub use task::{parse_file_tasks, parse_task_line};
pub use wikilink::parse_wikilinks;
