//! Table decorator for adding borders, headers, and separators.
//!
//! [`Table`] paints a [`CellGrid`] given final column widths. It never
//! decides widths itself; those come from the layout engine, which uses the
//! same [`Decorations`] so the painted rows come out exactly as wide as the
//! layout budgeted.
//!
//! # Example
//!
//! ```rust
//! use lah_render::tabular::{BorderStyle, CellGrid, Column, ColumnConstraint, PaintGrid, Table, TableSpec};
//!
//! let spec = TableSpec::builder()
//!     .column(Column::new("Name", ColumnConstraint::bounded(4, 20)))
//!     .column(Column::new("Size", ColumnConstraint::bounded(4, 8)).right())
//!     .border(BorderStyle::Light)
//!     .build();
//!
//! let grid = CellGrid::from_rows(vec![vec!["Name", "Size"], vec!["a.txt", "3 B"]]).unwrap();
//! let widths = spec.resolve(&grid, 80).unwrap();
//! let out = Table::new(&spec).paint(&grid, &widths.widths);
//!
//! assert!(out.starts_with('┌'));
//! assert!(out.contains("│ a.txt │  3 B │"));
//! ```

use console::Style;
use serde::{Deserialize, Serialize};

use super::measure::{pad_center, pad_left, pad_right, truncate_end};
use super::traits::PaintGrid;
use super::types::{Align, CellGrid, Decorations, TableSpec};

/// Border style for table decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// No borders.
    None,
    /// ASCII borders: +, -, |
    Ascii,
    /// Light Unicode box-drawing characters: ┌, ─, ┐, │, └, ┘, ├, ┼, ┤, ┬, ┴
    Light,
    /// Heavy Unicode box-drawing characters: ┏, ━, ┓, ┃, ┗, ┛, ┣, ╋, ┫, ┳, ┻
    Heavy,
    /// Double-line Unicode box-drawing: ╔, ═, ╗, ║, ╚, ╝, ╠, ╬, ╣, ╦, ╩
    Double,
    /// Rounded corners with light lines: ╭, ─, ╮, │, ╰, ╯, ├, ┼, ┤, ┬, ┴
    #[default]
    Rounded,
}

impl BorderStyle {
    /// Get the box-drawing characters for this border style.
    fn chars(&self) -> Option<BorderChars> {
        let chars = match self {
            BorderStyle::None => return None,
            BorderStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                left_t: '+',
                cross: '+',
                right_t: '+',
                top_t: '+',
                bottom_t: '+',
            },
            BorderStyle::Light => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
            BorderStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                left_t: '┣',
                cross: '╋',
                right_t: '┫',
                top_t: '┳',
                bottom_t: '┻',
            },
            BorderStyle::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                left_t: '╠',
                cross: '╬',
                right_t: '╣',
                top_t: '╦',
                bottom_t: '╩',
            },
            BorderStyle::Rounded => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
        };
        Some(chars)
    }

    /// Row decorations for this style: `"│ "`, `" │ "`, `" │"` with the
    /// style's vertical character, or a two-space gap for [`BorderStyle::None`].
    pub fn decorations(&self) -> Decorations {
        match self.chars() {
            None => Decorations::with_separator("  "),
            Some(c) => Decorations::with_separator(format!(" {} ", c.vertical))
                .prefix(format!("{} ", c.vertical))
                .suffix(format!(" {}", c.vertical)),
        }
    }
}

impl std::str::FromStr for BorderStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(BorderStyle::None),
            "ascii" => Ok(BorderStyle::Ascii),
            "light" => Ok(BorderStyle::Light),
            "heavy" => Ok(BorderStyle::Heavy),
            "double" => Ok(BorderStyle::Double),
            "rounded" => Ok(BorderStyle::Rounded),
            other => Err(format!(
                "unknown border style '{}' (expected none, ascii, light, heavy, double, rounded)",
                other
            )),
        }
    }
}

/// Box-drawing characters for a border style.
#[derive(Clone, Copy, Debug)]
struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    left_t: char,
    cross: char,
    right_t: char,
    top_t: char,
    bottom_t: char,
}

/// Type of horizontal line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineType {
    Top,
    Middle,
    Bottom,
}

/// Marker for a cell cut short.
const ELLIPSIS: &str = "…";

/// A box-drawn table painter bound to a [`TableSpec`].
#[derive(Clone, Debug)]
pub struct Table<'a> {
    spec: &'a TableSpec,
    header_style: Option<Style>,
    border_style: Option<Style>,
}

impl<'a> Table<'a> {
    pub fn new(spec: &'a TableSpec) -> Self {
        Table {
            spec,
            header_style: None,
            border_style: None,
        }
    }

    /// Style applied to header cell text.
    pub fn header_style(mut self, style: Style) -> Self {
        self.header_style = Some(style);
        self
    }

    /// Style applied to every border character.
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = Some(style);
        self
    }

    /// Fit one cell to `width`: truncate with `…` if too wide, style, then
    /// pad by alignment. Padding stays outside the style.
    fn fit_cell(&self, cell: &str, width: usize, align: Align, style: Option<&Style>) -> String {
        let cut = truncate_end(cell, width, ELLIPSIS);
        let text = match style {
            Some(style) => style.apply_to(cut).to_string(),
            None => cut,
        };
        match align {
            Align::Left => pad_right(&text, width),
            Align::Right => pad_left(&text, width),
            Align::Center => pad_center(&text, width),
        }
    }

    fn paint_border(&self, s: &str) -> String {
        match &self.border_style {
            Some(style) if !s.is_empty() => style.apply_to(s).to_string(),
            _ => s.to_string(),
        }
    }

    /// Format one row of cells, wrapped in the row decorations.
    pub fn row<S: AsRef<str>>(&self, cells: &[S], widths: &[usize], header: bool) -> String {
        let deco = self.spec.decorations();
        let sep = self.paint_border(&deco.column_sep);
        let style = if header {
            self.header_style.as_ref()
        } else {
            None
        };

        let mut line = self.paint_border(&deco.row_prefix);
        for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
            if i > 0 {
                line.push_str(&sep);
            }
            let align = self
                .spec
                .columns
                .get(i)
                .map(|c| c.align)
                .unwrap_or_default();
            line.push_str(&self.fit_cell(cell.as_ref(), width, align, style));
        }
        line.push_str(&self.paint_border(&deco.row_suffix));
        line
    }

    /// Generate a horizontal line (top, middle, or bottom).
    fn horizontal_line(&self, widths: &[usize], line_type: LineType) -> String {
        let Some(chars) = self.spec.border.chars() else {
            return String::new();
        };
        let deco = self.spec.decorations();

        let (left, joint, right) = match line_type {
            LineType::Top => (chars.top_left, chars.top_t, chars.top_right),
            LineType::Middle => (chars.left_t, chars.cross, chars.right_t),
            LineType::Bottom => (chars.bottom_left, chars.bottom_t, chars.bottom_right),
        };

        // Each decoration's vertical bar becomes the corner/joint, every
        // other position becomes a horizontal stroke.
        let rule = |piece: &str, with: char| -> String {
            piece
                .chars()
                .map(|c| if c == chars.vertical { with } else { chars.horizontal })
                .collect()
        };

        let mut line = rule(&deco.row_prefix, left);
        for (i, &width) in widths.iter().enumerate() {
            if i > 0 {
                line.push_str(&rule(&deco.column_sep, joint));
            }
            line.extend(std::iter::repeat(chars.horizontal).take(width));
        }
        line.push_str(&rule(&deco.row_suffix, right));
        self.paint_border(&line)
    }

    /// Generate the top border row.
    pub fn top_border(&self, widths: &[usize]) -> String {
        self.horizontal_line(widths, LineType::Top)
    }

    /// Generate a horizontal separator row.
    pub fn separator_row(&self, widths: &[usize]) -> String {
        self.horizontal_line(widths, LineType::Middle)
    }

    /// Generate the bottom border row.
    pub fn bottom_border(&self, widths: &[usize]) -> String {
        self.horizontal_line(widths, LineType::Bottom)
    }
}

impl PaintGrid for Table<'_> {
    /// Render the complete table: top border, header, header separator,
    /// data rows, bottom border. Lines are joined with `\n`, no trailing
    /// newline. An empty grid paints as an empty string.
    fn paint(&self, grid: &CellGrid, widths: &[usize]) -> String {
        let Some(header) = grid.header() else {
            return String::new();
        };

        let mut output = Vec::with_capacity(grid.rows().len() + 3);
        let top = self.top_border(widths);
        if !top.is_empty() {
            output.push(top);
        }

        output.push(self.row(header, widths, true));
        let sep = self.separator_row(widths);
        if !sep.is_empty() {
            output.push(sep);
        }

        for row in grid.body() {
            output.push(self.row(row, widths, false));
        }

        let bottom = self.bottom_border(widths);
        if !bottom.is_empty() {
            output.push(bottom);
        }

        output.join("\n")
    }
}
