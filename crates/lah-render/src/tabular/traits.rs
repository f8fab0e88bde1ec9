//! The painting seam between layout and output.
//!
//! Layout only produces numbers. Anything that can turn a grid plus final
//! widths into text implements [`PaintGrid`], so the box-drawn [`Table`]
//! can be swapped for another renderer without touching width resolution.
//!
//! [`Table`]: super::Table

use super::types::CellGrid;

/// Paints a cell grid at fixed column widths.
///
/// Implementations must pad or truncate every cell to exactly its column's
/// width as measured by [`measure`](super::measure), so rows line up with
/// the budget the layout engine planned for.
pub trait PaintGrid {
    /// Render the whole grid, header first.
    fn paint(&self, grid: &CellGrid, widths: &[usize]) -> String;
}

/// Trait for types that can be converted to a row of cells.
///
/// # Example
///
/// ```rust
/// use lah_render::tabular::TabularRow;
///
/// struct Pair(&'static str, u32);
///
/// impl TabularRow for Pair {
///     fn to_row(&self) -> Vec<String> {
///         vec![self.0.to_string(), self.1.to_string()]
///     }
/// }
///
/// assert_eq!(Pair("a", 1).to_row(), vec!["a", "1"]);
/// ```
pub trait TabularRow {
    /// Converts this instance to a row of string values.
    fn to_row(&self) -> Vec<String>;
}
