//! Common imports for building and painting tables.
//!
//! ```rust
//! use lah_render::prelude::*;
//! ```

pub use crate::tabular::{
    BorderStyle, CellGrid, Column, ColumnConstraint, PaintGrid, Table, TableSpec,
};
pub use crate::LayoutError;
