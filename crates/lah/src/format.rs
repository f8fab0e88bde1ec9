//! Cell text for each listing column.
//!
//! Every formatter has a plain form (used by tests and for reasoning about
//! widths) and a styled form. Styling goes through `console`, so it switches
//! off by itself when colors are disabled.

use chrono::{DateTime, Utc};
use console::Style;
use lah_render::tabular::TabularRow;

use crate::entry::{FileEntry, FileKind};
use crate::git::FileState;

const SIZE_UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Human-readable size: `N B` below 1 KiB, otherwise one decimal.
pub fn size_text(size: u64, is_dir: bool) -> String {
    if is_dir {
        return "-".to_string();
    }

    const UNIT: u64 = 1024;
    if size < UNIT {
        return format!("{} B", size);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT && exp + 1 < SIZE_UNITS.len() {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    format!("{:.1} {}", size as f64 / div as f64, SIZE_UNITS[exp])
}

pub fn format_size(size: u64, is_dir: bool) -> String {
    let style = if is_dir {
        Style::new().cyan()
    } else {
        Style::new().white().bright()
    };
    style.apply_to(size_text(size, is_dir)).to_string()
}

fn age_text_and_style(modified: DateTime<Utc>, now: DateTime<Utc>) -> (String, Style) {
    let age = now.signed_duration_since(modified);
    let hours = age.num_hours();

    if age.num_milliseconds() < 0 {
        ("future".to_string(), Style::new().blue())
    } else if age.num_seconds() < 60 {
        (
            format!("{} seconds ago", age.num_seconds()),
            Style::new().green(),
        )
    } else if age.num_minutes() < 60 {
        (
            format!("{} minutes ago", age.num_minutes()),
            Style::new().green(),
        )
    } else if hours < 24 {
        (format!("{} hours ago", hours), Style::new().yellow())
    } else if hours < 24 * 7 {
        (
            format!("{} days ago", hours / 24),
            Style::new().yellow().bright(),
        )
    } else if hours < 24 * 30 {
        (format!("{} weeks ago", hours / (24 * 7)), Style::new().red())
    } else if hours < 24 * 365 {
        (
            format!("{} months ago", hours / (24 * 30)),
            Style::new().red().bright(),
        )
    } else {
        (
            format!("{} years ago", hours / (24 * 365)),
            Style::new().black().bright(),
        )
    }
}

/// Relative age such as `3 hours ago`; months are 30 days.
pub fn modified_text(modified: DateTime<Utc>, now: DateTime<Utc>) -> String {
    age_text_and_style(modified, now).0
}

pub fn format_modified(modified: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (text, style) = age_text_and_style(modified, now);
    style.apply_to(text).to_string()
}

fn permission_chars(kind: FileKind, mode: u32) -> Vec<(char, Style)> {
    let type_style = match kind {
        FileKind::File => Style::new().cyan(),
        FileKind::Dir => Style::new().cyan().bold(),
        FileKind::Symlink => Style::new().magenta().bold(),
        _ => Style::new().yellow().bold(),
    };
    let unset = Style::new().black().bright();

    let mut out = Vec::with_capacity(10);
    out.push((kind.type_char(), type_style));

    // (shift, special bit, special char)
    let triplets = [(6, 0o4000, 's'), (3, 0o2000, 's'), (0, 0o1000, 't')];
    for (shift, special, mark) in triplets {
        let bits = (mode >> shift) & 0o7;
        out.push(if bits & 0o4 != 0 {
            ('r', Style::new().green().bold())
        } else {
            ('-', unset.clone())
        });
        out.push(if bits & 0o2 != 0 {
            ('w', Style::new().yellow().bold())
        } else {
            ('-', unset.clone())
        });

        let exec = bits & 0o1 != 0;
        let special_set = mode & special != 0;
        let mark_style = if mark == 't' {
            Style::new().red().bold()
        } else {
            Style::new().magenta().bold()
        };
        out.push(match (exec, special_set) {
            (true, true) => (mark, mark_style),
            (false, true) => (mark.to_ascii_uppercase(), mark_style),
            (true, false) => ('x', Style::new().red().bold()),
            (false, false) => ('-', unset.clone()),
        });
    }
    out
}

/// `ls -l` style mode string, e.g. `drwxr-xr-x`.
pub fn permissions_text(kind: FileKind, mode: u32) -> String {
    permission_chars(kind, mode)
        .into_iter()
        .map(|(c, _)| c)
        .collect()
}

pub fn format_permissions(kind: FileKind, mode: u32) -> String {
    permission_chars(kind, mode)
        .into_iter()
        .map(|(c, style)| style.apply_to(c).to_string())
        .collect()
}

/// Color for an entry's name, by type, then mode, then extension.
pub fn name_style(entry: &FileEntry) -> Style {
    if entry.is_dir() {
        return Style::new().blue().bold();
    }
    if entry.is_executable() {
        return Style::new().red();
    }
    if entry.hidden {
        return Style::new().yellow();
    }
    match entry.extension().as_deref() {
        Some("go" | "rs" | "py" | "js" | "ts" | "jsx" | "tsx") => Style::new().green(),
        Some("md" | "txt" | "rst") => Style::new().yellow(),
        Some("yml" | "yaml" | "json" | "toml" | "ini") => Style::new().magenta(),
        _ => Style::new().white(),
    }
}

pub fn format_name(entry: &FileEntry) -> String {
    name_style(entry).apply_to(&entry.name).to_string()
}

pub fn format_git(state: FileState) -> String {
    let style = match state {
        FileState::Clean => Style::new().green(),
        FileState::Changed { .. } => Style::new().green().bold(),
        _ => Style::new().yellow(),
    };
    let text = state.to_string();
    if text.is_empty() {
        return text;
    }
    style.apply_to(text).to_string()
}

/// One listing row, ready to be turned into cells.
#[derive(Clone, Debug)]
pub struct EntryRow<'a> {
    pub entry: &'a FileEntry,
    pub now: DateTime<Utc>,
    /// `Some` when the git column is shown.
    pub git: Option<FileState>,
}

impl TabularRow for EntryRow<'_> {
    fn to_row(&self) -> Vec<String> {
        let entry = self.entry;
        let mut cells = vec![
            format_name(entry),
            format_size(entry.size, entry.is_dir()),
            format_modified(entry.modified, self.now),
            format_permissions(entry.kind, entry.mode),
        ];
        if let Some(state) = self.git {
            cells.push(format_git(state));
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use lah_render::tabular::{measure, strip_escapes};
    use std::path::PathBuf;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn file(name: &str, kind: FileKind, mode: u32) -> FileEntry {
        FileEntry {
            name: name.to_string(),
            path: PathBuf::from(name),
            size: 2048,
            kind,
            mode,
            modified: now() - Duration::hours(3),
            hidden: name.starts_with('.'),
        }
    }

    #[test]
    fn sizes() {
        assert_eq!(size_text(0, false), "0 B");
        assert_eq!(size_text(1023, false), "1023 B");
        assert_eq!(size_text(1024, false), "1.0 KB");
        assert_eq!(size_text(1536, false), "1.5 KB");
        assert_eq!(size_text(1024 * 1024, false), "1.0 MB");
        assert_eq!(size_text(5 * 1024 * 1024 * 1024, false), "5.0 GB");
        assert_eq!(size_text(4096, true), "-");
    }

    #[test]
    fn huge_sizes_stay_in_terabytes() {
        assert_eq!(size_text(2048 * 1024u64.pow(4), false), "2048.0 TB");
    }

    #[test]
    fn ages() {
        let n = now();
        assert_eq!(modified_text(n + Duration::seconds(5), n), "future");
        assert_eq!(modified_text(n - Duration::seconds(42), n), "42 seconds ago");
        assert_eq!(modified_text(n - Duration::minutes(5), n), "5 minutes ago");
        assert_eq!(modified_text(n - Duration::hours(23), n), "23 hours ago");
        assert_eq!(modified_text(n - Duration::days(3), n), "3 days ago");
        assert_eq!(modified_text(n - Duration::days(14), n), "2 weeks ago");
        assert_eq!(modified_text(n - Duration::days(65), n), "2 months ago");
        assert_eq!(modified_text(n - Duration::days(800), n), "2 years ago");
    }

    #[test]
    fn age_boundaries() {
        let n = now();
        assert_eq!(modified_text(n - Duration::seconds(60), n), "1 minutes ago");
        assert_eq!(modified_text(n - Duration::days(7), n), "1 weeks ago");
        assert_eq!(modified_text(n - Duration::days(30), n), "1 months ago");
        assert_eq!(modified_text(n - Duration::days(365), n), "1 years ago");
    }

    #[test]
    fn permission_strings() {
        assert_eq!(permissions_text(FileKind::Dir, 0o755), "drwxr-xr-x");
        assert_eq!(permissions_text(FileKind::File, 0o644), "-rw-r--r--");
        assert_eq!(permissions_text(FileKind::Symlink, 0o777), "lrwxrwxrwx");
        assert_eq!(permissions_text(FileKind::Fifo, 0o600), "prw-------");
    }

    #[test]
    fn special_bits_take_the_execute_slot() {
        assert_eq!(permissions_text(FileKind::File, 0o4755), "-rwsr-xr-x");
        assert_eq!(permissions_text(FileKind::File, 0o2755), "-rwxr-sr-x");
        assert_eq!(permissions_text(FileKind::Dir, 0o1777), "drwxrwxrwt");
        assert_eq!(permissions_text(FileKind::File, 0o4644), "-rwSr--r--");
    }

    #[test]
    fn styled_cells_measure_like_plain_text() {
        let n = now();
        let styled = format_permissions(FileKind::Dir, 0o755);
        assert_eq!(strip_escapes(&styled), "drwxr-xr-x");
        assert_eq!(measure(&format_size(1536, false)), 6);
        assert_eq!(measure(&format_modified(n - Duration::hours(3), n)), 11);
    }

    #[test]
    fn name_colors_by_kind() {
        assert_eq!(
            name_style(&file("src", FileKind::Dir, 0o755)),
            Style::new().blue().bold()
        );
        assert_eq!(
            name_style(&file("run.sh", FileKind::File, 0o755)),
            Style::new().red()
        );
        assert_eq!(
            name_style(&file(".env", FileKind::File, 0o644)),
            Style::new().yellow()
        );
        assert_eq!(
            name_style(&file("main.RS", FileKind::File, 0o644)),
            Style::new().green()
        );
        assert_eq!(
            name_style(&file("Cargo.toml", FileKind::File, 0o644)),
            Style::new().magenta()
        );
        assert_eq!(
            name_style(&file("image.png", FileKind::File, 0o644)),
            Style::new().white()
        );
    }

    #[test]
    fn git_cells() {
        assert_eq!(strip_escapes(&format_git(FileState::Clean)), "(clean)");
        assert_eq!(format_git(FileState::Unknown), "");
        assert_eq!(strip_escapes(&format_git(FileState::Untracked)), "new");
    }

    #[test]
    fn row_has_git_cell_only_when_requested() {
        let entry = file("notes.md", FileKind::File, 0o644);
        let mut row = EntryRow {
            entry: &entry,
            now: now(),
            git: None,
        };
        let cells = row.to_row();
        assert_eq!(cells.len(), 4);
        assert_eq!(strip_escapes(&cells[0]), "notes.md");
        assert_eq!(strip_escapes(&cells[1]), "2.0 KB");
        assert_eq!(strip_escapes(&cells[2]), "3 hours ago");
        assert_eq!(strip_escapes(&cells[3]), "-rw-r--r--");

        row.git = Some(FileState::Changed {
            added: 1,
            deleted: 0,
        });
        let cells = row.to_row();
        assert_eq!(cells.len(), 5);
        assert_eq!(strip_escapes(&cells[4]), "+1 -0");
    }
}
