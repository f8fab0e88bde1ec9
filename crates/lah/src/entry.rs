//! Directory entries and their ordering.

use std::cmp::Ordering;
use std::fs::{self, FileType, Metadata};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::ListError;

/// What kind of filesystem object an entry is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    File,
    Dir,
    Symlink,
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
}

impl FileKind {
    /// Leading character of an `ls -l` style mode string.
    pub fn type_char(self) -> char {
        match self {
            FileKind::File => '-',
            FileKind::Dir => 'd',
            FileKind::Symlink => 'l',
            FileKind::CharDevice => 'c',
            FileKind::BlockDevice => 'b',
            FileKind::Fifo => 'p',
            FileKind::Socket => 's',
        }
    }

    #[cfg(unix)]
    fn from_file_type(ft: FileType) -> Self {
        use std::os::unix::fs::FileTypeExt;

        if ft.is_dir() {
            FileKind::Dir
        } else if ft.is_symlink() {
            FileKind::Symlink
        } else if ft.is_char_device() {
            FileKind::CharDevice
        } else if ft.is_block_device() {
            FileKind::BlockDevice
        } else if ft.is_fifo() {
            FileKind::Fifo
        } else if ft.is_socket() {
            FileKind::Socket
        } else {
            FileKind::File
        }
    }

    #[cfg(not(unix))]
    fn from_file_type(ft: FileType) -> Self {
        if ft.is_dir() {
            FileKind::Dir
        } else if ft.is_symlink() {
            FileKind::Symlink
        } else {
            FileKind::File
        }
    }
}

/// Mode bits: permissions plus setuid (0o4000), setgid (0o2000), sticky (0o1000).
#[cfg(unix)]
fn mode_bits(meta: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(meta: &Metadata) -> u32 {
    if meta.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// One item in a directory listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub kind: FileKind,
    pub mode: u32,
    pub modified: DateTime<Utc>,
    pub hidden: bool,
}

impl FileEntry {
    /// Build an entry from metadata that was read without following symlinks.
    pub fn from_metadata(path: PathBuf, meta: &Metadata) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let modified = meta
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        FileEntry {
            hidden: name.starts_with('.'),
            name,
            path,
            size: meta.len(),
            kind: FileKind::from_file_type(meta.file_type()),
            mode: mode_bits(meta),
            modified,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Dir
    }

    /// Any execute bit set.
    pub fn is_executable(&self) -> bool {
        self.mode & 0o111 != 0
    }

    /// Lowercased extension without the dot, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    }
}

/// Read one level of `dir`, hidden entries included.
///
/// Entries whose metadata cannot be read are skipped with a warning.
pub fn read_entries(dir: &Path) -> Result<Vec<FileEntry>, ListError> {
    let read = fs::read_dir(dir).map_err(|source| ListError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for item in read {
        let item = match item {
            Ok(item) => item,
            Err(err) => {
                log::warn!("skipping unreadable entry in {}: {}", dir.display(), err);
                continue;
            }
        };
        let path = item.path();
        match fs::symlink_metadata(&path) {
            Ok(meta) => entries.push(FileEntry::from_metadata(path, &meta)),
            Err(err) => log::warn!("skipping {}: {}", path.display(), err),
        }
    }

    log::debug!("read {} entries from {}", entries.len(), dir.display());
    Ok(entries)
}

/// How entries are ordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SortOrder {
    /// Order by modification time instead of name.
    pub by_modified: bool,
    pub reverse: bool,
}

/// Sort entries in place.
///
/// By name: directories first, then case-insensitive name; `reverse` flips
/// the name order only. By time: newest first, or oldest first on `reverse`.
pub fn sort_entries(entries: &mut [FileEntry], order: SortOrder) {
    if order.by_modified {
        entries.sort_by(|a, b| {
            let ord = b.modified.cmp(&a.modified);
            if order.reverse {
                ord.reverse()
            } else {
                ord
            }
        });
        return;
    }

    entries.sort_by(|a, b| match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let ord = a.name.to_lowercase().cmp(&b.name.to_lowercase());
            if order.reverse {
                ord.reverse()
            } else {
                ord
            }
        }
    });
}
