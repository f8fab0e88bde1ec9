//! Error types for producing a listing.

use std::io;
use std::path::PathBuf;

use lah_render::LayoutError;

/// Errors that can stop a listing.
///
/// Layout budget failures are not in here: they are reported through
/// [`Listing::TooSmall`](crate::listing::Listing::TooSmall) and printed as an
/// advisory instead.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The target directory could not be read.
    #[error("cannot read directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Metadata for the target path could not be read.
    #[error("cannot stat {}: {source}", .path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file exists but could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid YAML for this schema.
    #[error("invalid config {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The cell grid could not be assembled.
    #[error("table layout failed: {0}")]
    Layout(#[from] LayoutError),
}
