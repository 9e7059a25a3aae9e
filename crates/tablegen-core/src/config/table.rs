use super::ColumnOverride;
use heck::ToLowerCamelCase;
use indexmap::IndexMap;

/// Normalized per-table configuration with all defaults resolved.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Remote table display name this block configures.
    pub name: String,

    /// Identifier used for file and symbol names in the generated output.
    pub alias: String,

    pub label: Label,

    /// Allowlist of field display names to process. `None` means all fields.
    pub focus_columns: Option<Vec<String>>,

    /// Per-column overrides, keyed by field display name.
    pub overrides: IndexMap<String, ColumnOverride>,

    /// Allowlist of view names to emit list endpoints for. `None` means all.
    pub views: Option<Vec<String>>,

    /// Columns whose value can stand in for the record id in lookups by
    /// alternate key.
    pub record_id_columns: Vec<String>,
}

/// Singular/plural labels used in emitted endpoint names and docs.
#[derive(Debug, Clone)]
pub struct Label {
    pub singular: String,
    pub plural: String,
}

impl TableConfig {
    /// A config block for a table the user never mentioned: everything
    /// defaulted, nothing restricted.
    pub fn defaults(table_name: &str) -> Self {
        Self {
            name: table_name.to_string(),
            alias: table_name.to_lower_camel_case(),
            label: Label::derive(table_name),
            focus_columns: None,
            overrides: IndexMap::new(),
            views: None,
            record_id_columns: vec![],
        }
    }

    pub fn override_for(&self, field_name: &str) -> Option<&ColumnOverride> {
        self.overrides.get(field_name)
    }

    /// True if the field participates in the queryable surface.
    pub fn in_focus(&self, field_name: &str) -> bool {
        match &self.focus_columns {
            Some(columns) => columns.iter().any(|column| column == field_name),
            None => true,
        }
    }
}

impl Label {
    pub fn derive(table_name: &str) -> Self {
        Self {
            singular: pluralizer::pluralize(table_name, 1, false),
            plural: pluralizer::pluralize(table_name, 2, false),
        }
    }
}
