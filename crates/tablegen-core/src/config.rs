mod column;
pub use column::{ColumnOverride, TypeOverride};

mod raw;
use raw::RawConfig;

mod table;
pub use table::{Label, TableConfig};

use crate::schema::Base;
use crate::Result;
use std::path::Path;

/// Normalized user configuration.
///
/// The raw file surface allows several shorthand forms (bare strings for
/// column overrides, tuple-form focus columns, a single implicit base). All
/// of those are collapsed here at the loading boundary so the translation
/// engine only ever sees one shape.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub bases: Vec<BaseConfig>,
}

#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// Which base this block applies to. `None` only for the implicit
    /// default block of a config without a `defaultBase`.
    pub base: Option<BaseRef>,

    /// Configured tables. Empty means every table, with defaults.
    pub tables: Vec<TableConfig>,
}

/// Reference to a base, by id or by display name.
///
/// Name matching trims surrounding whitespace and is case-sensitive. The
/// bare-string config form tries the id first and falls back to the name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseRef {
    Id(String),
    Name(String),
    Loose(String),
}

impl Config {
    /// Load a config file. A missing file is not an error: it means
    /// "generate for all accessible bases and tables".
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, generating everything");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(contents)?;
        Ok(raw.normalize())
    }

    /// True if the run should process this base at all.
    pub fn selects(&self, base: &Base) -> bool {
        if self.bases.is_empty() {
            return true;
        }
        self.bases.iter().any(|config| config.applies_to(base))
    }

    /// The config block governing this base, if any.
    pub fn base_config(&self, base: &Base) -> Option<&BaseConfig> {
        self.bases.iter().find(|config| config.applies_to(base))
    }

    /// Per-table config lookup that tolerates a missing config entirely.
    pub fn table_config(&self, base: &Base, table_name: &str) -> Option<&TableConfig> {
        self.base_config(base)?.table_config(table_name)
    }
}

impl BaseConfig {
    pub fn applies_to(&self, base: &Base) -> bool {
        match &self.base {
            Some(base_ref) => base_ref.matches(base),
            None => true,
        }
    }

    pub fn table_config(&self, table_name: &str) -> Option<&TableConfig> {
        self.tables.iter().find(|table| table.name == table_name)
    }
}

impl BaseRef {
    pub fn matches(&self, base: &Base) -> bool {
        match self {
            Self::Id(id) => id == &base.id,
            Self::Name(name) => name.trim() == base.name.trim(),
            Self::Loose(value) => value == &base.id || value.trim() == base.name.trim(),
        }
    }
}
