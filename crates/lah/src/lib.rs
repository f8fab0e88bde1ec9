//! # lah
//!
//! A directory lister that prints file metadata as a colorized, box-drawn
//! table sized to the terminal. Column widths come from
//! [`lah_render::tabular`]; this crate gathers the entries, formats the
//! cells, and decides what to print.
//!
//! ```no_run
//! use lah::{list, Config, ListOptions, Listing};
//!
//! let options = ListOptions { path: ".".into(), width: Some(100), ..Default::default() };
//! match list(&options, &Config::default()).unwrap() {
//!     Listing::Rendered(table) => println!("{}", table),
//!     other => println!("{:?}", other.output()),
//! }
//! ```

pub mod cli;
pub mod config;
pub mod entry;
mod error;
pub mod format;
pub mod git;
pub mod listing;
pub mod terminal;

pub use config::Config;
pub use error::ListError;
pub use listing::{list, ListOptions, Listing, TOO_SMALL_MESSAGE};
