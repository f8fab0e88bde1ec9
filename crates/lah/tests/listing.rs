//! Integration tests for the listing pipeline.
//!
//! Each test lists a scratch directory; tests that read `COLUMNS` or
//! `LAH_CONFIG` are serialized since they share process environment.

use std::fs;
use std::path::Path;
use std::process::Command;

use lah::entry::SortOrder;
use lah::git::{DirStatus, FileState};
use lah::{list, Config, ListError, ListOptions, Listing, TOO_SMALL_MESSAGE};
use lah_render::tabular::{measure, strip_escapes};
use serial_test::serial;

fn scratch() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.md"), "some notes").unwrap();
    fs::write(dir.path().join("Build.rs"), "fn main() {}").unwrap();
    fs::write(dir.path().join(".env"), "").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    dir
}

fn options(path: &Path, width: Option<usize>) -> ListOptions {
    ListOptions {
        path: path.to_path_buf(),
        sort: SortOrder::default(),
        git: false,
        width,
    }
}

fn rendered(listing: Listing) -> String {
    match listing {
        Listing::Rendered(table) => strip_escapes(&table).into_owned(),
        other => panic!("expected a table, got {:?}", other),
    }
}

fn line_of(table: &str, needle: &str) -> usize {
    table
        .lines()
        .position(|l| l.contains(needle))
        .unwrap_or_else(|| panic!("{} not in table:\n{}", needle, table))
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn table_fits_budget_and_keeps_alignment() {
    let dir = scratch();
    let table = rendered(list(&options(dir.path(), Some(100)), &Config::default()).unwrap());

    let lines: Vec<&str> = table.lines().collect();
    // top, header, separator, four entries, bottom
    assert_eq!(lines.len(), 8);
    let width = measure(lines[0]);
    assert!(width <= 90, "table is {} wide for a budget of 90", width);
    assert!(lines.iter().all(|l| measure(l) == width));
    assert!(lines[0].starts_with('╭'));
    assert!(lines[1].contains("Name") && lines[1].contains("Perms"));
}

#[test]
fn directories_come_first_then_names_ignoring_case() {
    let dir = scratch();
    let table = rendered(list(&options(dir.path(), Some(100)), &Config::default()).unwrap());

    let order = [
        line_of(&table, "src"),
        line_of(&table, ".env"),
        line_of(&table, "Build.rs"),
        line_of(&table, "notes.md"),
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]), "order {:?}", order);
}

#[test]
fn reverse_flips_names_but_not_directories() {
    let dir = scratch();
    let mut opts = options(dir.path(), Some(100));
    opts.sort.reverse = true;
    let table = rendered(list(&opts, &Config::default()).unwrap());

    let order = [
        line_of(&table, "src"),
        line_of(&table, "notes.md"),
        line_of(&table, "Build.rs"),
        line_of(&table, ".env"),
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]), "order {:?}", order);
}

#[test]
fn empty_directory_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let listing = list(&options(dir.path(), Some(100)), &Config::default()).unwrap();
    assert_eq!(listing, Listing::Empty);
    assert_eq!(listing.output(), None);
}

#[test]
fn narrow_terminal_gets_the_advisory() {
    let dir = scratch();
    let listing = list(&options(dir.path(), Some(30)), &Config::default()).unwrap();
    assert!(matches!(listing, Listing::TooSmall(_)));
    assert_eq!(listing.output(), Some(TOO_SMALL_MESSAGE));
}

#[test]
fn long_names_are_cut_with_an_ellipsis() {
    let dir = tempfile::tempdir().unwrap();
    let long = "an-exceptionally-long-file-name-that-cannot-possibly-fit.txt";
    fs::write(dir.path().join(long), "").unwrap();

    let table = rendered(list(&options(dir.path(), Some(70)), &Config::default()).unwrap());
    assert!(!table.contains(long));
    assert!(table.contains("an-exceptionally"));
    assert!(table.contains('…'));
    assert!(table.lines().all(|l| measure(l) <= 60));
}

#[test]
fn missing_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = list(&options(&dir.path().join("missing"), Some(100)), &Config::default())
        .unwrap_err();
    assert!(matches!(err, ListError::Metadata { .. }));
}

#[test]
fn git_column_appears_on_request() {
    let dir = scratch();
    let mut opts = options(dir.path(), Some(120));
    opts.git = true;
    let table = rendered(list(&opts, &Config::default()).unwrap());
    assert!(table.lines().nth(1).is_some_and(|header| header.contains("Git")));
}

// ============================================================================
// Git status
// ============================================================================

/// Run git in `dir`; false when git is unavailable or the command fails.
fn git(dir: &Path, args: &[&str]) -> bool {
    Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .is_ok_and(|out| out.status.success())
}

#[test]
fn untracked_and_ignored_directories_pass_state_to_children() {
    let repo = tempfile::tempdir().unwrap();
    let root = repo.path();
    if !git(root, &["init", "-q"]) {
        return;
    }
    fs::write(root.join(".gitignore"), "gen/\n").unwrap();
    fs::create_dir(root.join("fresh")).unwrap();
    fs::write(root.join("fresh").join("new.txt"), "x").unwrap();
    fs::create_dir(root.join("gen")).unwrap();
    fs::write(root.join("gen").join("out.bin"), "x").unwrap();

    let fresh = DirStatus::load(&root.join("fresh")).unwrap();
    assert_eq!(fresh.state("new.txt"), FileState::Untracked);

    let generated = DirStatus::load(&root.join("gen")).unwrap();
    assert_eq!(generated.state("out.bin"), FileState::Ignored);

    let mut opts = options(&root.join("fresh"), Some(120));
    opts.git = true;
    let table = rendered(list(&opts, &Config::default()).unwrap());
    let row = &table.lines().collect::<Vec<_>>()[line_of(&table, "new.txt")];
    assert!(row.contains("new "), "row {:?}", row);
    assert!(!table.contains("(clean)"));
}

// ============================================================================
// Environment
// ============================================================================

#[test]
#[serial]
fn columns_variable_sets_the_width() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "x").unwrap();

    std::env::set_var("COLUMNS", "64");
    let listing = list(&options(dir.path(), None), &Config::default());
    std::env::remove_var("COLUMNS");

    // 64 columns minus the margin leaves exactly the column minimums.
    let table = rendered(listing.unwrap());
    assert!(table.lines().all(|l| measure(l) == 54));
}

#[test]
#[serial]
fn config_file_changes_the_border() {
    let dir = scratch();
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("config.yaml");
    fs::write(&config_path, "border: ascii\ncolumns:\n  name: { min: 20 }\n").unwrap();

    std::env::set_var("LAH_CONFIG", &config_path);
    let config = Config::load();
    std::env::remove_var("LAH_CONFIG");

    let config = config.unwrap();
    let table = rendered(list(&options(dir.path(), Some(100)), &config).unwrap());
    assert!(table.starts_with('+'));
    // "| " + 20-wide name + " |"
    let header = table.lines().nth(1).unwrap();
    assert_eq!(header.find(" | ").map(|i| i - 2), Some(20));
}

#[test]
#[serial]
fn broken_config_file_is_reported() {
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("config.yaml");
    fs::write(&config_path, "margin: -4\n").unwrap();

    std::env::set_var("LAH_CONFIG", &config_path);
    let err = Config::load().unwrap_err();
    std::env::remove_var("LAH_CONFIG");

    assert!(matches!(err, ListError::ConfigParse { .. }));
}
