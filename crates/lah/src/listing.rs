//! The listing pipeline: entries to cells, cells to widths, widths to text.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use console::Style;
use lah_render::tabular::{
    Align, CellGrid, Column, ColumnConstraint, PaintGrid, Table, TableSpec, TabularRow,
};
use lah_render::LayoutError;

use crate::config::Config;
use crate::entry::{read_entries, sort_entries, FileEntry, SortOrder};
use crate::error::ListError;
use crate::format::EntryRow;
use crate::git::DirStatus;
use crate::terminal;

/// Printed instead of a table when the budget cannot hold one.
pub const TOO_SMALL_MESSAGE: &str =
    "Terminal is too small to display the table. Please widen your terminal window.";

/// The columns a listing can show, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Name,
    Size,
    Modified,
    Perms,
    Git,
}

impl ColumnKind {
    pub fn header(self) -> &'static str {
        match self {
            ColumnKind::Name => "Name",
            ColumnKind::Size => "Size",
            ColumnKind::Modified => "Modified",
            ColumnKind::Perms => "Perms",
            ColumnKind::Git => "Git",
        }
    }

    pub fn default_constraint(self) -> ColumnConstraint {
        match self {
            ColumnKind::Name => ColumnConstraint::bounded(15, 50),
            ColumnKind::Size => ColumnConstraint::bounded(6, 10),
            ColumnKind::Modified => ColumnConstraint::bounded(10, 15),
            ColumnKind::Perms => ColumnConstraint::bounded(10, 12),
            ColumnKind::Git => ColumnConstraint::bounded(6, 12),
        }
    }

    /// Size and permission strings are never cut.
    pub fn shrinkable(self) -> bool {
        !matches!(self, ColumnKind::Size | ColumnKind::Perms)
    }

    fn align(self) -> Align {
        match self {
            ColumnKind::Size => Align::Right,
            _ => Align::Left,
        }
    }

    fn column(self, config: &Config) -> Column {
        let column =
            Column::new(self.header(), config.columns.constraint(self)).align(self.align());
        if self.shrinkable() {
            column
        } else {
            column.fixed()
        }
    }

    /// Columns shown, with or without git status.
    pub fn visible(git: bool) -> Vec<ColumnKind> {
        let mut kinds = vec![
            ColumnKind::Name,
            ColumnKind::Size,
            ColumnKind::Modified,
            ColumnKind::Perms,
        ];
        if git {
            kinds.push(ColumnKind::Git);
        }
        kinds
    }
}

/// What a listing run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Listing {
    /// A painted table, without a trailing newline.
    Rendered(String),
    /// The directory has no entries; nothing is printed.
    Empty,
    /// The budget cannot hold the table.
    TooSmall(LayoutError),
}

impl Listing {
    /// Text to print, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            Listing::Rendered(table) => Some(table),
            Listing::Empty => None,
            Listing::TooSmall(_) => Some(TOO_SMALL_MESSAGE),
        }
    }
}

/// Inputs to a listing run that come from the command line.
#[derive(Clone, Debug, Default)]
pub struct ListOptions {
    pub path: PathBuf,
    pub sort: SortOrder,
    pub git: bool,
    /// Terminal width; detected when `None`.
    pub width: Option<usize>,
}

/// Build the table spec for the visible columns.
pub fn table_spec(git: bool, config: &Config) -> TableSpec {
    TableSpec::builder()
        .columns(ColumnKind::visible(git).into_iter().map(|k| k.column(config)))
        .border(config.border)
        .build()
}

/// Header plus one row per entry.
pub fn build_grid(
    spec: &TableSpec,
    entries: &[FileEntry],
    now: DateTime<Utc>,
    git: Option<&DirStatus>,
) -> Result<CellGrid, LayoutError> {
    let mut grid = CellGrid::new(spec.headers());
    for entry in entries {
        let row = EntryRow {
            entry,
            now,
            git: git.map(|status| status.state(&entry.name)),
        };
        grid.push_row(row.to_row())?;
    }
    Ok(grid)
}

/// Lay out and paint already-sorted entries within `budget` columns.
pub fn render_entries(
    entries: &[FileEntry],
    now: DateTime<Utc>,
    git: Option<&DirStatus>,
    config: &Config,
    budget: usize,
) -> Result<Listing, ListError> {
    if entries.is_empty() {
        return Ok(Listing::Empty);
    }

    let spec = table_spec(git.is_some(), config);
    let grid = build_grid(&spec, entries, now, git)?;

    let widths = match spec.resolve(&grid, budget) {
        Ok(widths) => widths,
        Err(err) if err.is_budget_error() => {
            log::debug!("not painting: {}", err);
            return Ok(Listing::TooSmall(err));
        }
        Err(err) => return Err(err.into()),
    };

    let table = Table::new(&spec)
        .header_style(Style::new().cyan().bold())
        .border_style(Style::new().green());
    Ok(Listing::Rendered(table.paint(&grid, &widths.widths)))
}

/// Read, sort, and render the directory named in `options`.
pub fn list(options: &ListOptions, config: &Config) -> Result<Listing, ListError> {
    let path = &options.path;
    fs::metadata(path).map_err(|source| ListError::Metadata {
        path: path.clone(),
        source,
    })?;

    let mut entries = read_entries(path)?;
    if entries.is_empty() {
        return Ok(Listing::Empty);
    }
    sort_entries(&mut entries, options.sort);

    let git = options.git.then(|| DirStatus::load_or_unknown(path));
    let columns = options.width.or_else(terminal::detect_columns);
    let budget = terminal::budget(columns, config);
    log::debug!("budget {} from width {:?}", budget, columns);

    render_entries(&entries, Utc::now(), git.as_ref(), config, budget)
}
