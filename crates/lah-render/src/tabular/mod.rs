//! Terminal-width-aware table layout.
//!
//! This module measures styled cell text, resolves column widths under
//! min/max constraints and a terminal budget, and paints the result as a
//! box-drawn table.
//!
//! ## Pipeline
//!
//! | Step | Function |
//! |------|----------|
//! | Measure a cell, ignoring escape sequences | [`measure`] |
//! | Widest cell per column | [`natural_widths`] |
//! | Apply min/max bounds | [`clamp_widths`] |
//! | Shrink to fit the terminal | [`fit_widths`] |
//! | All of the above | [`compute_layout`] / [`TableSpec::resolve`] |
//! | Draw it | [`Table`] via [`PaintGrid`] |
//!
//! ## Example
//!
//! ```rust
//! use lah_render::tabular::{
//!     BorderStyle, CellGrid, Column, ColumnConstraint, PaintGrid, Table, TableSpec,
//! };
//!
//! let spec = TableSpec::builder()
//!     .column(Column::new("Name", ColumnConstraint::bounded(15, 50)))
//!     .column(Column::new("Size", ColumnConstraint::bounded(6, 10)).fixed().right())
//!     .border(BorderStyle::Rounded)
//!     .build();
//!
//! let mut grid = CellGrid::new(spec.headers());
//! grid.push_row(["Cargo.toml", "1.2 KB"]).unwrap();
//!
//! match spec.resolve(&grid, 60) {
//!     Ok(widths) => println!("{}", Table::new(&spec).paint(&grid, &widths.widths)),
//!     Err(err) => eprintln!("{}", err),
//! }
//! ```
//!
//! ## Width model
//!
//! Width is the number of characters left after removing `ESC [ … <letter>`
//! sequences. Multi-byte characters count once. A malformed sequence is
//! counted as literal text rather than dropped.

mod decorator;
mod measure;
mod resolve;
mod traits;
mod types;

pub use decorator::{BorderStyle, Table};
pub use resolve::{clamp_widths, compute_layout, fit_widths, natural_widths, ResolvedWidths};
pub use traits::{PaintGrid, TabularRow};
pub use types::{
    Align, CellGrid, Column, ColumnConstraint, ConstraintSet, Decorations, TableSpec,
    TableSpecBuilder, DEFAULT_MIN_WIDTH,
};

pub use measure::{measure, pad_center, pad_left, pad_right, strip_escapes, truncate_end};
