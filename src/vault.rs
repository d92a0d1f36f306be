//! Vault indexing: the metadata contract and the directory-backed provider.

use crate::error::{DebriefError, Result};
use crate::parser::frontmatter::{parse_frontmatter, split_frontmatter};
use crate::parser::tag;
use crate::parser::wikilink;
use glob::glob;
use serde_yaml::{Mapping, Value};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Read-only vault metadata consumed by the project loader.
///
/// The file index maps each logical name to a vault-relative (or absolute)
/// path; its iteration order is the index order and must be deterministic.
/// The per-name operations fail with [`DebriefError::NameNotInIndex`] when
/// the name is unknown.
pub trait VaultIndex {
    /// Vault root directory; relative index paths resolve against it.
    fn root(&self) -> &Path;

    /// Logical name -> path for every markdown file in the vault.
    fn file_index(&self) -> &BTreeMap<String, PathBuf>;

    /// Tags for a file (frontmatter and body), without the leading #.
    fn tags(&self, name: &str) -> Result<Vec<String>>;

    /// Parsed YAML frontmatter for a file.
    fn front_matter(&self, name: &str) -> Result<Mapping>;

    /// Names of files linking to this file.
    fn backlinks(&self, name: &str) -> Result<Vec<String>>;

    /// Names this file links to.
    fn wikilinks(&self, name: &str) -> Result<Vec<String>>;
}

/// Per-file metadata gathered during the scan.
#[derive(Debug, Clone, Default)]
struct FileMeta {
    tags: Vec<String>,
    front_matter: Mapping,
    wikilinks: Vec<String>,
    backlinks: Vec<String>,
}

/// A vault indexed by scanning a directory tree once.
///
/// Index keys are NFC-normalized file stems; files sharing a stem are
/// keyed by their relative path without extension instead, which for a
/// root-level file is the bare stem itself. Hidden files and directories
/// are skipped.
#[derive(Debug, Clone)]
pub struct DirectoryVault {
    root: PathBuf,
    index: BTreeMap<String, PathBuf>,
    meta: BTreeMap<String, FileMeta>,
}

impl DirectoryVault {
    /// Scan a vault directory and build the index.
    pub fn scan(root: impl Into<PathBuf>) -> Result<Self> {
        let root: PathBuf = root.into();

        if !root.is_dir() {
            return Err(DebriefError::VaultNotFound(root));
        }
        let root = root.canonicalize()?;

        let index = build_index(&markdown_files(&root)?);

        let mut meta: BTreeMap<String, FileMeta> = BTreeMap::new();
        for (key, relative) in &index {
            meta.insert(key.clone(), gather_meta(&root.join(relative)));
        }

        link_backlinks(&index, &mut meta);

        Ok(Self { root, index, meta })
    }

    fn meta_for(&self, name: &str) -> Result<&FileMeta> {
        self.meta
            .get(name)
            .ok_or_else(|| DebriefError::NameNotInIndex(name.to_string()))
    }
}

impl VaultIndex for DirectoryVault {
    fn root(&self) -> &Path {
        &self.root
    }

    fn file_index(&self) -> &BTreeMap<String, PathBuf> {
        &self.index
    }

    fn tags(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.meta_for(name)?.tags.clone())
    }

    fn front_matter(&self, name: &str) -> Result<Mapping> {
        Ok(self.meta_for(name)?.front_matter.clone())
    }

    fn backlinks(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.meta_for(name)?.backlinks.clone())
    }

    fn wikilinks(&self, name: &str) -> Result<Vec<String>> {
        Ok(self.meta_for(name)?.wikilinks.clone())
    }
}

/// Enumerate markdown files under the root, vault-relative, sorted by path.
fn markdown_files(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = root.join("**/*.md");
    let pattern_str = pattern.to_string_lossy();

    let mut files = Vec::new();

    for entry in glob(&pattern_str)? {
        match entry {
            Ok(path) => {
                if let Ok(relative) = path.strip_prefix(root) {
                    // Skip hidden files and directories (.obsidian, .trash).
                    if !relative
                        .components()
                        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
                    {
                        files.push(relative.to_path_buf());
                    }
                }
            }
            Err(e) => {
                eprintln!("Warning: glob error: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Assign an index key to every file.
///
/// A file with an unambiguous stem is keyed by that stem. Files sharing a
/// stem are keyed by their relative path without extension; for a
/// root-level file that path equals the stem, so every file keeps a key
/// and none displaces another.
fn build_index(files: &[PathBuf]) -> BTreeMap<String, PathBuf> {
    let mut stem_counts: BTreeMap<String, usize> = BTreeMap::new();
    for relative in files {
        *stem_counts.entry(stem_key(relative)).or_insert(0) += 1;
    }

    let mut index = BTreeMap::new();
    for relative in files {
        let stem = stem_key(relative);
        let key = if stem_counts[&stem] == 1 {
            stem
        } else {
            path_key(relative)
        };
        index.insert(key, relative.clone());
    }

    index
}

/// NFC-normalized file stem.
fn stem_key(relative: &Path) -> String {
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| relative.to_string_lossy().into_owned());
    stem.nfc().collect()
}

/// NFC-normalized relative path without extension.
fn path_key(relative: &Path) -> String {
    let path = relative.with_extension("");
    path.to_string_lossy().as_ref().nfc().collect()
}

/// Gather tags, frontmatter, and wikilinks for one file.
///
/// Unreadable or non-UTF-8 files stay in the index with empty metadata, and
/// frontmatter that fails to parse degrades to an empty mapping; the loader
/// reports such files when they are actually loaded.
fn gather_meta(path: &Path) -> FileMeta {
    let Ok(bytes) = std::fs::read(path) else {
        return FileMeta::default();
    };
    let Ok(text) = String::from_utf8(bytes) else {
        return FileMeta::default();
    };

    let split = split_frontmatter(&text);
    let front_matter = parse_frontmatter(&text, path).unwrap_or_default();

    let mut tags = frontmatter_tags(&front_matter);
    tags.extend(tag::parse_tags(split.body));
    let tags = tag::unique_tags(&tags);

    let wikilinks = dedup(wikilink::parse_wikilinks(split.body));

    FileMeta {
        tags,
        front_matter,
        wikilinks,
        backlinks: Vec::new(),
    }
}

/// Tags listed under the frontmatter `tags` key: a YAML sequence or a
/// comma-separated string.
fn frontmatter_tags(front_matter: &Mapping) -> Vec<String> {
    let mut tags = Vec::new();

    match front_matter.get("tags") {
        Some(Value::Sequence(seq)) => {
            for value in seq {
                if let Some(raw) = value.as_str() {
                    push_clean_tag(&mut tags, raw);
                }
            }
        }
        Some(Value::String(list)) => {
            for raw in list.split(',') {
                push_clean_tag(&mut tags, raw);
            }
        }
        _ => {}
    }

    tags
}

fn push_clean_tag(tags: &mut Vec<String>, raw: &str) {
    let tag = raw.trim().trim_start_matches('#');
    if !tag.is_empty() {
        tags.push(tag.to_string());
    }
}

/// Drop duplicate names, keeping first-appearance order.
fn dedup(names: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    names.into_iter().filter(|n| seen.insert(n.clone())).collect()
}

/// Derive backlinks by inverting wikilinks.
///
/// Linkers are visited in index order, so each backlink list is sorted by
/// linking file name; a linker appears at most once per target.
fn link_backlinks(index: &BTreeMap<String, PathBuf>, meta: &mut BTreeMap<String, FileMeta>) {
    let mut links: Vec<(String, String)> = Vec::new(); // (target key, linker)

    for (name, file_meta) in meta.iter() {
        let mut seen = HashSet::new();
        for target in &file_meta.wikilinks {
            if let Some(key) = resolve_target(index, target) {
                if seen.insert(key.clone()) {
                    links.push((key, name.clone()));
                }
            }
        }
    }

    for (key, linker) in links {
        if let Some(file_meta) = meta.get_mut(&key) {
            file_meta.backlinks.push(linker);
        }
    }
}

/// Resolve a wikilink target to an index key: exact name first, then the
/// target's base stem, with any .md extension dropped.
fn resolve_target(index: &BTreeMap<String, PathBuf>, target: &str) -> Option<String> {
    let trimmed = target.trim();
    let trimmed = trimmed.strip_suffix(".md").unwrap_or(trimmed);
    let cleaned: String = trimmed.nfc().collect();

    if index.contains_key(cleaned.as_str()) {
        return Some(cleaned);
    }

    let stem = cleaned.rsplit('/').next().unwrap_or(cleaned.as_str());
    if index.contains_key(stem) {
        return Some(stem.to_string());
    }

    None
}
