//! Width resolution algorithm for table columns.
//!
//! Three steps, each usable on its own:
//!
//! 1. [`natural_widths`]: widest measured cell per column, header included.
//! 2. [`clamp_widths`]: pull each column into its min/max range.
//! 3. [`fit_widths`]: shrink eligible columns until the table fits the
//!    terminal budget, or report that it cannot.
//!
//! [`compute_layout`] runs all three. Widths are never grown past their
//! clamped value; a table narrower than the terminal stays narrow.

use log::{debug, trace};

use super::measure::measure;
use super::types::{CellGrid, ConstraintSet, Decorations, TableSpec};
use crate::error::LayoutError;

/// Resolved widths for all columns in a table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedWidths {
    /// Width for each column in display columns.
    pub widths: Vec<usize>,
}

impl ResolvedWidths {
    /// Get the width of a specific column.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.widths.get(index).copied()
    }

    /// Get the total width of all columns (without decorations).
    pub fn total(&self) -> usize {
        self.widths.iter().sum()
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Natural width of every column: the widest measured cell, header included.
///
/// An empty grid yields an empty vector.
pub fn natural_widths(grid: &CellGrid) -> Vec<usize> {
    let mut widths = vec![0; grid.num_columns()];
    for row in grid.rows() {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(measure(cell));
        }
    }
    widths
}

/// Clamp natural widths into each column's constraint range.
pub fn clamp_widths(natural: &[usize], constraints: &ConstraintSet) -> Vec<usize> {
    natural
        .iter()
        .enumerate()
        .map(|(i, &w)| constraints.clamp(i, w))
        .collect()
}

/// Shrink clamped widths so `sum + overhead` fits in `budget`.
///
/// Columns whose `shrinkable` flag is false are left alone; columns past the
/// end of `shrinkable` count as shrinkable. Width is taken from each eligible
/// column in proportion to its slack (width above its minimum), then any
/// rounding shortfall is taken one column at a time, largest remaining slack
/// first, lowest index on ties.
///
/// # Errors
///
/// [`LayoutError::TerminalTooSmall`] when the budget is below every minimum
/// plus overhead; [`LayoutError::NoShrinkableSlack`] when the eligible
/// columns cannot give up enough width.
pub fn fit_widths(
    clamped: &[usize],
    constraints: &ConstraintSet,
    shrinkable: &[bool],
    overhead: usize,
    budget: usize,
) -> Result<Vec<usize>, LayoutError> {
    let floor: usize = (0..clamped.len())
        .map(|i| constraints.min_for(i))
        .sum::<usize>()
        + overhead;
    if budget < floor {
        debug!("layout: budget {} below floor {}", budget, floor);
        return Err(LayoutError::TerminalTooSmall {
            budget,
            required: floor,
        });
    }

    let total = clamped.iter().sum::<usize>() + overhead;
    if total <= budget {
        trace!("layout: total {} fits budget {}", total, budget);
        return Ok(clamped.to_vec());
    }

    let excess = total - budget;
    let slack: Vec<usize> = clamped
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            if shrinkable.get(i).copied().unwrap_or(true) {
                w.saturating_sub(constraints.min_for(i))
            } else {
                0
            }
        })
        .collect();
    let total_slack: usize = slack.iter().sum();
    debug!(
        "layout: excess {} over budget {}, slack {:?} (total {})",
        excess, budget, slack, total_slack
    );
    if total_slack == 0 {
        return Err(LayoutError::NoShrinkableSlack { excess });
    }

    let mut widths = clamped.to_vec();
    let mut remaining = slack.clone();

    // Proportional pass.
    let mut absorbed = 0;
    for (i, &s) in slack.iter().enumerate() {
        let reduction = (s * excess / total_slack).min(s);
        widths[i] -= reduction;
        remaining[i] -= reduction;
        absorbed += reduction;
    }

    // Top-up pass for the rounding shortfall.
    let mut shortfall = excess.saturating_sub(absorbed);
    let mut order: Vec<usize> = (0..remaining.len()).filter(|&i| remaining[i] > 0).collect();
    order.sort_by(|&a, &b| remaining[b].cmp(&remaining[a]).then(a.cmp(&b)));
    while shortfall > 0 && !order.is_empty() {
        for &i in &order {
            if shortfall == 0 {
                break;
            }
            if remaining[i] > 0 {
                widths[i] -= 1;
                remaining[i] -= 1;
                shortfall -= 1;
            }
        }
        order.retain(|&i| remaining[i] > 0);
    }

    if shortfall > 0 {
        debug!("layout: slack exhausted with {} columns still over", shortfall);
        return Err(LayoutError::NoShrinkableSlack { excess: shortfall });
    }

    trace!("layout: fitted widths {:?}", widths);
    Ok(widths)
}

/// Compute final column widths for a grid.
///
/// Runs [`natural_widths`], [`clamp_widths`], and [`fit_widths`], taking the
/// border overhead from `decorations`.
///
/// # Example
///
/// ```rust
/// use lah_render::tabular::{compute_layout, CellGrid, ConstraintSet, Decorations};
///
/// let grid = CellGrid::from_rows(vec![
///     vec!["Name", "Size"],
///     vec!["Cargo.toml", "1.2 KB"],
/// ]).unwrap();
/// let constraints = ConstraintSet::from_bounds(&[15, 6], &[50, 10]);
/// let deco = Decorations::with_separator(" │ ").prefix("│ ").suffix(" │");
///
/// let resolved = compute_layout(&grid, &constraints, &[true, false], &deco, 80).unwrap();
/// assert_eq!(resolved.widths, vec![15, 6]);
/// ```
pub fn compute_layout(
    grid: &CellGrid,
    constraints: &ConstraintSet,
    shrinkable: &[bool],
    decorations: &Decorations,
    budget: usize,
) -> Result<ResolvedWidths, LayoutError> {
    let columns = grid.num_columns();
    if columns == 0 {
        return Ok(ResolvedWidths::default());
    }

    let natural = natural_widths(grid);
    let clamped = clamp_widths(&natural, constraints);
    debug!("layout: natural {:?}, clamped {:?}", natural, clamped);

    let widths = fit_widths(
        &clamped,
        constraints,
        shrinkable,
        decorations.overhead(columns),
        budget,
    )?;
    Ok(ResolvedWidths { widths })
}

impl TableSpec {
    /// Resolve widths for `grid` against this spec's constraints, shrink
    /// flags, and border decorations.
    pub fn resolve(&self, grid: &CellGrid, budget: usize) -> Result<ResolvedWidths, LayoutError> {
        compute_layout(
            grid,
            &self.constraints(),
            &self.shrinkable(),
            &self.decorations(),
            budget,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tabular::{BorderStyle, Column, ColumnConstraint};

    fn listing_constraints() -> ConstraintSet {
        ConstraintSet::from_bounds(&[15, 6, 10, 10], &[50, 10, 15, 12])
    }

    const LISTING_SHRINK: [bool; 4] = [true, false, true, false];

    #[test]
    fn natural_widths_take_column_max() {
        let grid = CellGrid::from_rows(vec![
            vec!["Name", "Size"],
            vec!["\x1b[34mdocs\x1b[0m", "-"],
            vec!["README.md", "\x1b[97m4.1 KB\x1b[0m"],
        ])
        .unwrap();
        assert_eq!(natural_widths(&grid), vec![9, 6]);
    }

    #[test]
    fn natural_widths_header_counts() {
        let grid = CellGrid::from_rows(vec![vec!["Modified"], vec!["now"]]).unwrap();
        assert_eq!(natural_widths(&grid), vec![8]);
    }

    #[test]
    fn natural_widths_empty_grid() {
        assert!(natural_widths(&CellGrid::default()).is_empty());
    }

    #[test]
    fn clamp_applies_bounds() {
        let clamped = clamp_widths(&[3, 40, 12, 10, 2], &listing_constraints());
        // last column has no entry: default minimum 4
        assert_eq!(clamped, vec![15, 10, 12, 10, 4]);
    }

    #[test]
    fn clamp_min_wins_over_max() {
        let set = ConstraintSet::from_bounds(&[10], &[6]);
        assert_eq!(clamp_widths(&[8], &set), vec![10]);
    }

    #[test]
    fn fit_unchanged_when_it_fits() {
        let widths = fit_widths(&[22, 7, 14, 10], &listing_constraints(), &LISTING_SHRINK, 11, 70)
            .unwrap();
        assert_eq!(widths, vec![22, 7, 14, 10]);
    }

    #[test]
    fn fit_exact_budget_is_unchanged() {
        let widths = fit_widths(&[22, 7, 14, 10], &listing_constraints(), &LISTING_SHRINK, 11, 64)
            .unwrap();
        assert_eq!(widths, vec![22, 7, 14, 10]);
    }

    #[test]
    fn fit_proportional_with_top_up() {
        // excess 4, slack Name 7 / Modified 4: floor(28/11)=2, floor(16/11)=1,
        // shortfall 1 goes to Name (largest remaining slack)
        let widths = fit_widths(&[22, 7, 14, 10], &listing_constraints(), &LISTING_SHRINK, 11, 60)
            .unwrap();
        assert_eq!(widths, vec![19, 7, 13, 10]);
        assert_eq!(widths.iter().sum::<usize>() + 11, 60);
    }

    #[test]
    fn fit_below_floor_is_too_small() {
        let err = fit_widths(&[22, 7, 14, 10], &listing_constraints(), &LISTING_SHRINK, 11, 50)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::TerminalTooSmall {
                budget: 50,
                required: 52
            }
        );
    }

    #[test]
    fn fit_fixed_columns_block_fitting() {
        // Size sits at 10 (min 6) but is fixed; Name and Modified already at min
        let err = fit_widths(&[15, 10, 10, 10], &listing_constraints(), &LISTING_SHRINK, 11, 52)
            .unwrap_err();
        assert_eq!(err, LayoutError::NoShrinkableSlack { excess: 4 });
    }

    #[test]
    fn fit_slack_runs_out() {
        // floor 52 passes at 54, but only Modified has slack (1) against excess 3
        let err = fit_widths(&[15, 10, 11, 10], &listing_constraints(), &LISTING_SHRINK, 11, 54)
            .unwrap_err();
        assert_eq!(err, LayoutError::NoShrinkableSlack { excess: 2 });
    }

    #[test]
    fn fit_tie_goes_to_lowest_index() {
        let set = ConstraintSet::from_bounds(&[4, 4, 4], &[]);
        // equal slack 6 each, excess 2: floor(12/18)=0 each, shortfall 2
        let widths = fit_widths(&[10, 10, 10], &set, &[], 0, 28).unwrap();
        assert_eq!(widths, vec![9, 9, 10]);
    }

    #[test]
    fn fit_drains_to_minimum() {
        let set = ConstraintSet::from_bounds(&[5, 5], &[]);
        let widths = fit_widths(&[9, 7], &set, &[true, true], 0, 10).unwrap();
        assert_eq!(widths, vec![5, 5]);
    }

    #[test]
    fn fit_missing_flags_mean_shrinkable() {
        let set = ConstraintSet::from_bounds(&[4, 4], &[]);
        let widths = fit_widths(&[10, 10], &set, &[false], 0, 16).unwrap();
        assert_eq!(widths, vec![10, 6]);
    }

    #[test]
    fn compute_layout_empty_grid() {
        let resolved = compute_layout(
            &CellGrid::default(),
            &listing_constraints(),
            &LISTING_SHRINK,
            &Decorations::default(),
            10,
        )
        .unwrap();
        assert!(resolved.is_empty());
    }

    #[test]
    fn compute_layout_scenario() {
        let grid = CellGrid::from_rows(vec![
            vec!["Name", "Size", "Modified", "Perms"],
            vec![
                "a_rather_long_filename",
                "1.0 KB",
                "\x1b[33m3 hours ago\x1b[0m",
                "-rw-r--r--",
            ],
            vec!["b", "512 B", "12 minutes ago", "drwxr-xr-x"],
            vec!["c", "10.0 MB", "2 days ago", "-rwxr-xr-x"],
        ])
        .unwrap();
        let deco = Decorations::with_separator(" │ ").prefix("│").suffix("│");

        let roomy =
            compute_layout(&grid, &listing_constraints(), &LISTING_SHRINK, &deco, 70).unwrap();
        assert_eq!(roomy.widths, vec![22, 7, 14, 10]);

        let tight =
            compute_layout(&grid, &listing_constraints(), &LISTING_SHRINK, &deco, 60).unwrap();
        assert_eq!(tight.widths, vec![19, 7, 13, 10]);

        let err =
            compute_layout(&grid, &listing_constraints(), &LISTING_SHRINK, &deco, 50).unwrap_err();
        assert!(err.is_budget_error());
    }

    #[test]
    fn spec_resolve_uses_border_overhead() {
        let spec = TableSpec::builder()
            .column(Column::new("Name", ColumnConstraint::bounded(4, 20)))
            .column(Column::new("Size", ColumnConstraint::bounded(4, 8)).fixed())
            .border(BorderStyle::Light)
            .build();
        let grid = CellGrid::from_rows(vec![
            vec!["Name", "Size"],
            vec!["abcdefghijklmnop", "1 KB"],
        ])
        .unwrap();

        // overhead "│ " + " │ " + " │" = 7; 16 + 4 + 7 = 27
        assert_eq!(spec.resolve(&grid, 27).unwrap().widths, vec![16, 4]);
        assert_eq!(spec.resolve(&grid, 20).unwrap().widths, vec![9, 4]);
    }

    #[test]
    fn resolved_widths_accessors() {
        let resolved = ResolvedWidths {
            widths: vec![10, 20, 30],
        };

        assert_eq!(resolved.get(0), Some(10));
        assert_eq!(resolved.get(3), None);
        assert_eq!(resolved.total(), 60);
        assert_eq!(resolved.len(), 3);
        assert!(!resolved.is_empty());
    }
}
