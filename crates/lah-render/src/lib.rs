//! # lah-render - table layout for terminal listings
//!
//! `lah-render` fits a grid of styled cells into a terminal of a given width
//! and draws it with box characters. It is the rendering foundation of the
//! `lah` directory lister but has no knowledge of files.
//!
//! ## Core Concepts
//!
//! - [`tabular::measure`]: character width with escape sequences ignored
//! - [`tabular::TableSpec`]: columns, their width bounds, and which may shrink
//! - [`tabular::compute_layout`]: natural widths -> clamp -> fit
//! - [`tabular::Table`]: the box-drawing painter
//! - [`LayoutError`]: why a table could not be fitted
//!
//! Everything here is pure and synchronous. Each call works only on its
//! arguments, so layouts can be computed from any thread.

mod error;
pub mod prelude;
pub mod tabular;

pub use error::LayoutError;
