//! Working tree status for the listed directory.
//!
//! One `git status` call covers the whole listing. Paths in porcelain output
//! are relative to the repository root, so `rev-parse --show-prefix` supplies
//! the listed directory's own position to strip.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Failures while asking git for status.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// `git` could not be run or exited unsuccessfully.
    #[error("`{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The directory is not inside a git work tree.
    #[error("{} is not inside a git repository", .path.display())]
    NotARepository { path: PathBuf },

    /// Output did not look like porcelain status.
    #[error("unexpected git status output: {0}")]
    ParseError(String),
}

/// Status of one listed entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FileState {
    /// Tracked and unchanged.
    #[default]
    Clean,
    /// Changes in the entry, or anywhere under it for a directory.
    Changed { added: usize, deleted: usize },
    /// Not tracked.
    Untracked,
    /// Matched by an ignore rule.
    Ignored,
    /// No repository information.
    Unknown,
}

impl fmt::Display for FileState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileState::Clean => f.write_str("(clean)"),
            FileState::Changed { added, deleted } => write!(f, "+{} -{}", added, deleted),
            FileState::Untracked => f.write_str("new"),
            FileState::Ignored | FileState::Unknown => Ok(()),
        }
    }
}

impl FileState {
    fn merge(self, other: FileState) -> FileState {
        match (self, other) {
            (
                FileState::Changed { added, deleted },
                FileState::Changed {
                    added: a,
                    deleted: d,
                },
            ) => FileState::Changed {
                added: added + a,
                deleted: deleted + d,
            },
            (changed @ FileState::Changed { .. }, _) => changed,
            (_, changed @ FileState::Changed { .. }) => changed,
            (FileState::Clean, other) => other,
            (existing, _) => existing,
        }
    }
}

/// Per-entry status for one directory.
///
/// The default value stands for a directory outside any repository, where
/// every entry is [`FileState::Unknown`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirStatus {
    in_repo: bool,
    /// Set when the listed directory is itself untracked or ignored; git
    /// then reports only the directory, never its children.
    inherited: Option<FileState>,
    states: HashMap<String, FileState>,
}

impl DirStatus {
    /// Query git for the status of everything under `dir`.
    pub fn load(dir: &Path) -> Result<Self, GitError> {
        let prefix = run_git(dir, &["rev-parse", "--show-prefix"])?;
        let prefix = String::from_utf8_lossy(&prefix.stdout).trim().to_string();
        let status = run_git(dir, &["status", "--porcelain", "-z", "--ignored", "--", "."])?;
        let parsed = Self::parse(&prefix, &status.stdout)?;
        log::debug!(
            "git status: prefix {:?}, {} entries with state",
            prefix,
            parsed.states.len()
        );
        Ok(parsed)
    }

    /// Parse `git status --porcelain -z` output.
    ///
    /// `prefix` is the listed directory relative to the repository root,
    /// empty or ending in `/`.
    pub fn parse(prefix: &str, porcelain: &[u8]) -> Result<Self, GitError> {
        let text = String::from_utf8_lossy(porcelain);
        let mut records = text.split('\0').filter(|r| !r.is_empty());
        let mut status = DirStatus {
            in_repo: true,
            inherited: None,
            states: HashMap::new(),
        };

        while let Some(record) = records.next() {
            if record.len() < 4 || record.as_bytes()[2] != b' ' {
                return Err(GitError::ParseError(record.to_string()));
            }
            let (x, y) = (record.as_bytes()[0], record.as_bytes()[1]);
            let path = &record[3..];

            // Renames and copies carry the source path as a separate record.
            if matches!(x, b'R' | b'C') || matches!(y, b'R' | b'C') {
                records.next();
            }

            // The listed directory itself, or an ancestor, collapsed to one record.
            if path.ends_with('/') && prefix.starts_with(path) {
                if let state @ (FileState::Untracked | FileState::Ignored) = classify(x, y, false)
                {
                    status.inherited = Some(state);
                }
                continue;
            }

            let Some(rel) = path.strip_prefix(prefix) else {
                continue;
            };
            let rel = rel.trim_end_matches('/');
            let (top, nested) = match rel.split_once('/') {
                Some((top, _)) => (top, true),
                None => (rel, false),
            };
            if top.is_empty() {
                continue;
            }

            let state = classify(x, y, nested);
            let slot = status.states.entry(top.to_string()).or_default();
            *slot = slot.merge(state);
        }

        Ok(status)
    }

    /// State of a direct child of the listed directory.
    pub fn state(&self, name: &str) -> FileState {
        if !self.in_repo {
            return FileState::Unknown;
        }
        self.states
            .get(name)
            .copied()
            .or(self.inherited)
            .unwrap_or_default()
    }

    /// Status for `dir`, or the outside-a-repository value when git fails.
    pub fn load_or_unknown(dir: &Path) -> Self {
        Self::load(dir).unwrap_or_else(|err| {
            log::debug!("no git status for {}: {}", dir.display(), err);
            DirStatus::default()
        })
    }
}

fn classify(x: u8, y: u8, nested: bool) -> FileState {
    match (x, y) {
        (b'?', b'?') if nested => FileState::Changed {
            added: 1,
            deleted: 0,
        },
        (b'?', b'?') => FileState::Untracked,
        (b'!', b'!') if nested => FileState::Clean,
        (b'!', b'!') => FileState::Ignored,
        _ => {
            let has = |c: u8| x == c || y == c;
            let added = usize::from(has(b'A'))
                + usize::from(has(b'M'))
                + usize::from(has(b'R') || has(b'C'));
            let deleted = usize::from(has(b'D'));
            FileState::Changed { added, deleted }
        }
    }
}

fn run_git(dir: &Path, args: &[&str]) -> Result<Output, GitError> {
    let command = format!("git {}", args.join(" "));
    log::debug!("$ {} [{}]", command, dir.display());

    let output = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(args)
        .output()
        .map_err(|err| GitError::CommandFailed {
            command: command.clone(),
            message: err.to_string(),
        })?;

    if output.status.success() {
        return Ok(output);
    }

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.contains("not a git repository") {
        return Err(GitError::NotARepository {
            path: dir.to_path_buf(),
        });
    }
    Err(GitError::CommandFailed {
        command,
        message: stderr,
    })
}
