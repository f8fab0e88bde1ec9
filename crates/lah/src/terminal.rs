//! Terminal width detection and the table budget derived from it.

use std::process::Command;

use crate::config::Config;

/// Parse a positive column count.
fn parse_columns(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|&w| w > 0)
}

/// Width from the `COLUMNS` environment variable.
pub fn columns_from_env() -> Option<usize> {
    std::env::var("COLUMNS").ok().and_then(|v| parse_columns(&v))
}

fn columns_from_tty() -> Option<usize> {
    terminal_size::terminal_size().map(|(w, _)| w.0 as usize)
}

fn columns_from_tput() -> Option<usize> {
    let output = Command::new("tput").arg("cols").output().ok()?;
    if !output.status.success() {
        return None;
    }
    parse_columns(&String::from_utf8_lossy(&output.stdout))
}

/// Detect terminal width: `COLUMNS`, then the tty, then `tput cols`.
pub fn detect_columns() -> Option<usize> {
    if let Some(w) = columns_from_env() {
        log::debug!("terminal width {} from COLUMNS", w);
        return Some(w);
    }
    if let Some(w) = columns_from_tty() {
        log::debug!("terminal width {} from tty", w);
        return Some(w);
    }
    let w = columns_from_tput();
    match w {
        Some(w) => log::debug!("terminal width {} from tput", w),
        None => log::debug!("terminal width unknown"),
    }
    w
}

/// Columns available to the table.
///
/// Known widths lose the configured margin; unknown widths use the fallback.
/// The result never drops below `min_budget`.
pub fn budget(columns: Option<usize>, config: &Config) -> usize {
    let raw = match columns {
        Some(cols) => cols.saturating_sub(config.margin),
        None => config.fallback_budget,
    };
    raw.max(config.min_budget)
}
