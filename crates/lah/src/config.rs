//! User configuration.
//!
//! Read from `$LAH_CONFIG`, or `<config dir>/lah/config.yaml` when that is
//! unset. A missing file means defaults. Column bounds merge per field, so
//! `name: { min: 20 }` keeps the default maximum of 50; a bound of `0`
//! removes it.
//!
//! ```yaml
//! border: rounded
//! margin: 10
//! columns:
//!   name: { min: 20, max: 60 }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use lah_render::tabular::{BorderStyle, ColumnConstraint};
use serde::Deserialize;

use crate::error::ListError;
use crate::listing::ColumnKind;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LAH_CONFIG";

/// Settings that shape the listing table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Border drawing style.
    pub border: BorderStyle,
    /// Terminal columns left unused beside the table.
    pub margin: usize,
    /// Smallest budget the table is ever given.
    pub min_budget: usize,
    /// Budget used when the terminal width cannot be detected.
    pub fallback_budget: usize,
    /// Per-column width overrides.
    pub columns: ColumnsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            border: BorderStyle::Rounded,
            margin: 10,
            min_budget: 40,
            fallback_budget: 70,
            columns: ColumnsConfig::default(),
        }
    }
}

/// Optional width bounds per listing column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnsConfig {
    pub name: Option<ColumnConstraint>,
    pub size: Option<ColumnConstraint>,
    pub modified: Option<ColumnConstraint>,
    pub perms: Option<ColumnConstraint>,
    pub git: Option<ColumnConstraint>,
}

impl ColumnsConfig {
    /// Effective bounds for a column: overrides merged onto the defaults.
    pub fn constraint(&self, kind: ColumnKind) -> ColumnConstraint {
        let default = kind.default_constraint();
        let over = match kind {
            ColumnKind::Name => self.name,
            ColumnKind::Size => self.size,
            ColumnKind::Modified => self.modified,
            ColumnKind::Perms => self.perms,
            ColumnKind::Git => self.git,
        };
        match over {
            Some(o) => ColumnConstraint {
                min: o.min.or(default.min),
                max: o.max.or(default.max),
            },
            None => default,
        }
    }
}

impl Config {
    /// Parse a config document. Blank input yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Where the config file is looked up.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("lah").join("config.yaml"))
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ListError> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::debug!("no config directory on this platform, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ListError> {
        if !path.exists() {
            log::debug!("config {} not found, using defaults", path.display());
            return Ok(Config::default());
        }

        let text = fs::read_to_string(path).map_err(|source| ListError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text).map_err(|source| ListError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_listing_columns() {
        let config = Config::default();
        assert_eq!(config.border, BorderStyle::Rounded);
        assert_eq!(config.margin, 10);
        assert_eq!(
            config.columns.constraint(ColumnKind::Name),
            ColumnConstraint::bounded(15, 50)
        );
        assert_eq!(
            config.columns.constraint(ColumnKind::Git),
            ColumnConstraint::bounded(6, 12)
        );
    }

    #[test]
    fn blank_document_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn partial_column_override_keeps_other_bound() {
        let config = Config::from_yaml("columns:\n  name: { min: 20 }\n").unwrap();
        assert_eq!(
            config.columns.constraint(ColumnKind::Name),
            ColumnConstraint::bounded(20, 50)
        );
        assert_eq!(
            config.columns.constraint(ColumnKind::Size),
            ColumnConstraint::bounded(6, 10)
        );
    }

    #[test]
    fn zero_bound_removes_limit() {
        let config = Config::from_yaml("columns:\n  name: { max: 0 }\n").unwrap();
        let name = config.columns.constraint(ColumnKind::Name);
        assert_eq!(name.declared_max(), None);
        assert_eq!(name.clamp(200), 200);
    }

    #[test]
    fn top_level_fields() {
        let config = Config::from_yaml("border: ascii\nmargin: 2\nmin_budget: 30\n").unwrap();
        assert_eq!(config.border, BorderStyle::Ascii);
        assert_eq!(config.margin, 2);
        assert_eq!(config.min_budget, 30);
        assert_eq!(config.fallback_budget, 70);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Config::from_yaml("colour: true\n").is_err());
        assert!(Config::from_yaml("border: wavy\n").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_names_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "margin: [1, 2").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ListError::ConfigParse { .. }));
        assert!(err.to_string().contains("config.yaml"));
    }
}
