//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use lah_render::tabular::BorderStyle;

use crate::config::Config;
use crate::entry::SortOrder;
use crate::listing::ListOptions;

/// List a directory as a box-drawn table fitted to the terminal.
#[derive(Parser, Debug)]
#[command(name = "lah", version)]
#[command(about = "A modern ls: box-drawn tables, colors, and git status")]
pub struct Cli {
    /// Directory to list
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Sort by modification time, newest first
    #[arg(short = 't', long)]
    pub sort_modified: bool,

    /// Reverse the sort order
    #[arg(short, long)]
    pub reverse: bool,

    /// Show git status inline
    #[arg(short, long)]
    pub git: bool,

    /// Terminal width to fit instead of detecting it
    #[arg(short, long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Border style: none, ascii, light, heavy, double, rounded
    #[arg(long, value_name = "STYLE")]
    pub border: Option<BorderStyle>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Log debug information to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn options(&self) -> ListOptions {
        ListOptions {
            path: self.path.clone(),
            sort: SortOrder {
                by_modified: self.sort_modified,
                reverse: self.reverse,
            },
            git: self.git,
            width: self.width,
        }
    }

    /// Apply flags that override the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(border) = self.border {
            config.border = border;
        }
    }
}
