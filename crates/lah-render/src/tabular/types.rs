//! Core types for table layout configuration.
//!
//! This module defines the data structures the layout engine works on: the
//! cell grid, per-column width constraints, border decorations, and the
//! [`TableSpec`] that ties them together.

use serde::{Deserialize, Serialize};

use super::decorator::BorderStyle;
use super::measure::measure;
use crate::error::LayoutError;

/// Minimum width used for any column without a declared minimum.
pub const DEFAULT_MIN_WIDTH: usize = 4;

/// Text alignment within a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left-align text (pad on the right).
    #[default]
    Left,
    /// Right-align text (pad on the left).
    Right,
    /// Center text (pad on both sides).
    Center,
}

/// Minimum and maximum width for one column.
///
/// A missing or zero bound leaves the column unconstrained in that
/// direction. When both are set and `min > max`, the minimum wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConstraint {
    #[serde(default)]
    pub min: Option<usize>,
    #[serde(default)]
    pub max: Option<usize>,
}

impl ColumnConstraint {
    /// Constraint with both bounds.
    pub fn bounded(min: usize, max: usize) -> Self {
        ColumnConstraint {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Constraint with only a lower bound.
    pub fn at_least(min: usize) -> Self {
        ColumnConstraint {
            min: Some(min),
            max: None,
        }
    }

    /// Constraint with only an upper bound.
    pub fn at_most(max: usize) -> Self {
        ColumnConstraint {
            min: None,
            max: Some(max),
        }
    }

    /// The declared minimum, treating zero as absent.
    pub fn declared_min(&self) -> Option<usize> {
        self.min.filter(|&m| m > 0)
    }

    /// The declared maximum, treating zero as absent.
    pub fn declared_max(&self) -> Option<usize> {
        self.max.filter(|&m| m > 0)
    }

    /// Clamp a width into this column's range. The floor is applied last so
    /// it always holds.
    pub fn clamp(&self, width: usize) -> usize {
        let mut w = width;
        if let Some(max) = self.declared_max() {
            w = w.min(max);
        }
        if let Some(min) = self.declared_min() {
            w = w.max(min);
        }
        w
    }
}

/// Ordered constraints, indexed by column.
///
/// May be shorter than the table: columns past the end get
/// [`DEFAULT_MIN_WIDTH`] and no maximum.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintSet(Vec<ColumnConstraint>);

impl ConstraintSet {
    pub fn new(constraints: Vec<ColumnConstraint>) -> Self {
        ConstraintSet(constraints)
    }

    /// Build from parallel min/max lists, where 0 means unconstrained.
    ///
    /// ```rust
    /// use lah_render::tabular::ConstraintSet;
    ///
    /// let set = ConstraintSet::from_bounds(&[15, 6], &[50, 10]);
    /// assert_eq!(set.min_for(0), 15);
    /// assert_eq!(set.min_for(5), 4);
    /// ```
    pub fn from_bounds(mins: &[usize], maxs: &[usize]) -> Self {
        let len = mins.len().max(maxs.len());
        (0..len)
            .map(|i| ColumnConstraint {
                min: mins.get(i).copied().filter(|&m| m > 0),
                max: maxs.get(i).copied().filter(|&m| m > 0),
            })
            .collect()
    }

    pub fn get(&self, index: usize) -> Option<&ColumnConstraint> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Effective minimum for a column: its declared minimum, or
    /// [`DEFAULT_MIN_WIDTH`] when none is declared.
    pub fn min_for(&self, index: usize) -> usize {
        self.get(index)
            .and_then(ColumnConstraint::declared_min)
            .unwrap_or(DEFAULT_MIN_WIDTH)
    }

    /// Clamp a column's width. Columns without an entry are raised to the
    /// default minimum.
    pub fn clamp(&self, index: usize, width: usize) -> usize {
        match self.get(index) {
            Some(constraint) => constraint.clamp(width),
            None => width.max(DEFAULT_MIN_WIDTH),
        }
    }
}

impl FromIterator<ColumnConstraint> for ConstraintSet {
    fn from_iter<I: IntoIterator<Item = ColumnConstraint>>(iter: I) -> Self {
        ConstraintSet(iter.into_iter().collect())
    }
}

impl From<Vec<ColumnConstraint>> for ConstraintSet {
    fn from(constraints: Vec<ColumnConstraint>) -> Self {
        ConstraintSet(constraints)
    }
}

/// Rectangular grid of formatted (possibly styled) cells. Row 0 is the header.
///
/// Every row has the same number of cells as the header; constructors reject
/// anything else.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellGrid {
    rows: Vec<Vec<String>>,
}

impl CellGrid {
    /// Start a grid with its header row.
    pub fn new<S: Into<String>, I: IntoIterator<Item = S>>(header: I) -> Self {
        CellGrid {
            rows: vec![header.into_iter().map(Into::into).collect()],
        }
    }

    /// Build a grid from all rows at once, the first being the header.
    pub fn from_rows<S: Into<String>>(rows: Vec<Vec<S>>) -> Result<Self, LayoutError> {
        let mut iter = rows.into_iter();
        let Some(header) = iter.next() else {
            return Ok(CellGrid::default());
        };
        let mut grid = CellGrid::new(header);
        for row in iter {
            grid.push_row(row)?;
        }
        Ok(grid)
    }

    /// Append a data row.
    pub fn push_row<S: Into<String>, I: IntoIterator<Item = S>>(
        &mut self,
        row: I,
    ) -> Result<(), LayoutError> {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if self.rows.is_empty() {
            self.rows.push(row);
            return Ok(());
        }
        let expected = self.num_columns();
        if row.len() != expected {
            return Err(LayoutError::RaggedRow {
                row: self.rows.len(),
                expected,
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn num_columns(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// All rows including the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Data rows, without the header.
    pub fn body(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// True when the grid has no rows at all.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Decorations for table rows (separators, prefixes, suffixes).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decorations {
    /// Separator between columns (e.g., "  " or " │ ").
    pub column_sep: String,
    /// Prefix at the start of each row.
    pub row_prefix: String,
    /// Suffix at the end of each row.
    pub row_suffix: String,
}

impl Decorations {
    /// Create decorations with just a column separator.
    pub fn with_separator(sep: impl Into<String>) -> Self {
        Decorations {
            column_sep: sep.into(),
            row_prefix: String::new(),
            row_suffix: String::new(),
        }
    }

    /// Set the column separator.
    pub fn separator(mut self, sep: impl Into<String>) -> Self {
        self.column_sep = sep.into();
        self
    }

    /// Set the row prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.row_prefix = prefix.into();
        self
    }

    /// Set the row suffix.
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.row_suffix = suffix.into();
        self
    }

    /// Display columns spent on edges.
    pub fn edge_width(&self) -> usize {
        measure(&self.row_prefix) + measure(&self.row_suffix)
    }

    /// Display columns of one separator.
    pub fn separator_width(&self) -> usize {
        measure(&self.column_sep)
    }

    /// Border overhead for `num_columns` columns:
    /// `(num_columns - 1) * separator + edges`.
    pub fn overhead(&self, num_columns: usize) -> usize {
        if num_columns == 0 {
            return 0;
        }
        self.separator_width() * (num_columns - 1) + self.edge_width()
    }
}

/// Configuration for a single column in a table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Header title.
    pub header: String,
    /// Width bounds.
    #[serde(default)]
    pub width: ColumnConstraint,
    /// Whether the fit engine may take width from this column.
    #[serde(default = "default_shrink")]
    pub shrink: bool,
    /// Text alignment within the column.
    #[serde(default)]
    pub align: Align,
}

fn default_shrink() -> bool {
    true
}

impl Column {
    /// Create a shrinkable, left-aligned column.
    pub fn new(header: impl Into<String>, width: ColumnConstraint) -> Self {
        Column {
            header: header.into(),
            width,
            shrink: true,
            align: Align::Left,
        }
    }

    /// Exempt this column from shrinking.
    pub fn fixed(mut self) -> Self {
        self.shrink = false;
        self
    }

    /// Set the text alignment.
    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Shorthand for `.align(Align::Right)`.
    pub fn right(self) -> Self {
        self.align(Align::Right)
    }
}

/// Complete table specification: columns plus border style.
///
/// ```rust
/// use lah_render::tabular::{BorderStyle, Column, ColumnConstraint, TableSpec};
///
/// let spec = TableSpec::builder()
///     .column(Column::new("Name", ColumnConstraint::bounded(15, 50)))
///     .column(Column::new("Size", ColumnConstraint::bounded(6, 10)).fixed().right())
///     .border(BorderStyle::Rounded)
///     .build();
///
/// assert_eq!(spec.num_columns(), 2);
/// assert_eq!(spec.shrinkable(), vec![true, false]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSpec {
    pub columns: Vec<Column>,
    #[serde(default)]
    pub border: BorderStyle,
}

impl TableSpec {
    pub fn builder() -> TableSpecBuilder {
        TableSpecBuilder::default()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Header titles in column order.
    pub fn headers(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.header.clone()).collect()
    }

    pub fn constraints(&self) -> ConstraintSet {
        self.columns.iter().map(|c| c.width).collect()
    }

    pub fn shrinkable(&self) -> Vec<bool> {
        self.columns.iter().map(|c| c.shrink).collect()
    }

    /// Row decorations implied by the border style.
    pub fn decorations(&self) -> Decorations {
        self.border.decorations()
    }
}

/// Builder for [`TableSpec`].
#[derive(Clone, Debug, Default)]
pub struct TableSpecBuilder {
    columns: Vec<Column>,
    border: BorderStyle,
}

impl TableSpecBuilder {
    /// Add a column to the table.
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Add multiple columns from an iterator.
    pub fn columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn border(mut self, border: BorderStyle) -> Self {
        self.border = border;
        self
    }

    pub fn build(self) -> TableSpec {
        TableSpec {
            columns: self.columns,
            border: self.border,
        }
    }
}
