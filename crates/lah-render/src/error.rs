//! Error types for table layout.
//!
//! None of these are fatal to a caller: budget errors mean "do not paint",
//! and the caller is expected to tell the user to widen the terminal.

/// Errors returned by grid construction and width resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The budget is below the sum of column minimums plus border overhead.
    #[error("terminal too small: table needs at least {required} columns, {budget} available")]
    TerminalTooSmall { budget: usize, required: usize },

    /// Shrinkable columns cannot give up enough width to fit the budget.
    #[error("cannot fit table: {excess} columns over budget with no shrinkable width left")]
    NoShrinkableSlack { excess: usize },

    /// A data row has a different number of cells than the header.
    #[error("row {row} has {found} cells, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

impl LayoutError {
    /// True for the errors that mean the terminal budget cannot hold the table.
    pub fn is_budget_error(&self) -> bool {
        matches!(
            self,
            LayoutError::TerminalTooSmall { .. } | LayoutError::NoShrinkableSlack { .. }
        )
    }
}
