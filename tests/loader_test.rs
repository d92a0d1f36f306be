//! End-to-end library tests: scan a real directory, assemble projects.

use debrief::{DebriefError, DirectoryVault, ProjectLoader, TaskPriority};
use std::path::Path;
use tempfile::TempDir;

fn write_note(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn loader_for(dir: &TempDir) -> ProjectLoader<DirectoryVault> {
    let vault = DirectoryVault::scan(dir.path()).unwrap();
    ProjectLoader::new(vault)
}

#[test]
fn assembles_project_from_scanned_directory() {
    let dir = TempDir::new().unwrap();
    write_note(
        dir.path(),
        "Garden.md",
        "---\nstatus: active\npriority: high\ndue_date: 2025-09-30\ntags:\n  - project\n---\n\nSeason plan.\n\n- [ ] Order seeds 📅 2025-03-15 ⏫ #shopping\n",
    );
    write_note(
        dir.path(),
        "Beds.md",
        "Layout notes for [[Garden]].\n\n- [x] Measure plot ✅ 2025-02-01\n- [ ] Build frames 🔼\n",
    );
    write_note(dir.path(), "Recipes.md", "Unrelated note; mentions [[Beds]].\n");

    let loader = loader_for(&dir);
    let project = loader.load_project("Garden").unwrap().unwrap();

    assert_eq!(project.status, "active");
    assert_eq!(project.priority, Some(TaskPriority::High));
    assert_eq!(project.due_date.unwrap().to_string(), "2025-09-30");

    let working: Vec<&str> = project
        .working_files
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(working, vec!["Beds"]);

    let tasks = project.all_tasks();
    assert_eq!(tasks.len(), 3);
    assert_eq!(tasks[0].content, "Order seeds");
    assert_eq!(tasks[0].priority, Some(TaskPriority::Highest));
    assert_eq!(tasks[0].due_date.unwrap().to_string(), "2025-03-15");
    assert_eq!(tasks[0].tags, vec!["shopping"]);
    assert_eq!(project.pending_tasks().len(), 2);
    assert_eq!(project.completed_tasks().len(), 1);
}

#[test]
fn non_project_files_load_as_none() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "Journal.md", "#daily entry\n\n- [ ] Stretch\n");

    let loader = loader_for(&dir);
    assert!(loader.load_project("Journal").unwrap().is_none());
}

#[test]
fn shared_working_file_joins_both_projects() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "Alpha.md", "#project\n\n- [ ] Alpha work\n");
    write_note(dir.path(), "Beta.md", "#project\n\n- [ ] Beta work\n");
    write_note(
        dir.path(),
        "Shared.md",
        "Feeds [[Alpha]] and [[Beta]].\n\n- [ ] Common chore\n",
    );

    let loader = loader_for(&dir);
    let scan = loader.load_all_projects();

    assert!(scan.failures.is_empty());
    let names: Vec<&str> = scan
        .projects
        .iter()
        .map(|p| p.main_file.name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);

    for project in &scan.projects {
        let working: Vec<&str> = project
            .working_files
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(working, vec!["Shared"]);
        assert_eq!(project.all_tasks().len(), 2);
    }
}

#[test]
fn scan_skips_broken_files_and_keeps_going() {
    let dir = TempDir::new().unwrap();
    write_note(dir.path(), "Good.md", "#project\n\n- [ ] Fine\n");
    write_note(
        dir.path(),
        "Bad.md",
        "#project\n\n- [ ] Launch 📅 2024-13-99\n",
    );

    let loader = loader_for(&dir);
    let scan = loader.load_all_projects();

    assert_eq!(scan.projects.len(), 1);
    assert_eq!(scan.projects[0].main_file.name, "Good");
    assert_eq!(scan.failures.len(), 1);
    assert_eq!(scan.failures[0].name, "Bad");
    assert!(matches!(
        scan.failures[0].error,
        DebriefError::DateParse { .. }
    ));

    assert!(matches!(
        loader.load_project("Bad"),
        Err(DebriefError::DateParse { .. })
    ));
}

#[test]
fn vault_root_must_exist() {
    assert!(matches!(
        DirectoryVault::scan("/no/such/vault"),
        Err(DebriefError::VaultNotFound(_))
    ));
}
