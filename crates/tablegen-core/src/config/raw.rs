//! The raw serde surface of the config file.
//!
//! Everything in here exists only to be normalized; nothing raw escapes this
//! module.

use super::table::Label;
use super::{BaseConfig, BaseRef, ColumnOverride, Config, TableConfig, TypeOverride};
use heck::ToLowerCamelCase;
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RawConfig {
    default_base: Option<RawBaseRef>,

    /// Tables of the default base.
    #[serde(default)]
    tables: Vec<RawTable>,

    /// Additional explicit base blocks for multi-base configs.
    #[serde(default)]
    bases: Vec<RawBase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBase {
    base: RawBaseRef,
    #[serde(default)]
    tables: Vec<RawTable>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawBaseRef {
    Shorthand(String),
    ById { id: String },
    ByName { name: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTable {
    name: String,
    alias: Option<String>,
    label: Option<RawLabel>,
    focus_columns: Option<Vec<RawFocusColumn>>,
    #[serde(default)]
    column_name_to_object_property_mapper: IndexMap<String, RawColumnOverride>,
    views: Option<Vec<String>>,
    #[serde(default)]
    record_id_columns: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLabel {
    singular: Option<String>,
    plural: Option<String>,
}

/// A focus column is either a bare display name or a `[name, override]` tuple.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawFocusColumn {
    Name(String),
    WithOverride(String, RawColumnOverride),
}

/// Shorthand string or detailed object; the duck-typed union of the config
/// surface, made explicit here and collapsed by [`RawColumnOverride::normalize`].
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawColumnOverride {
    Shorthand(String),
    Detailed(RawDetailedOverride),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDetailedOverride {
    property_name: Option<String>,
    #[serde(rename = "type")]
    ty: Option<TypeOverride>,
    required: Option<bool>,
    editable: Option<bool>,
    creatable: Option<bool>,
    prefers_single: Option<bool>,
}

impl RawConfig {
    pub(super) fn normalize(self) -> Config {
        let mut bases = vec![];

        if self.default_base.is_some() || !self.tables.is_empty() {
            bases.push(BaseConfig {
                base: self.default_base.map(RawBaseRef::normalize),
                tables: self.tables.into_iter().map(RawTable::normalize).collect(),
            });
        }

        for raw in self.bases {
            bases.push(BaseConfig {
                base: Some(raw.base.normalize()),
                tables: raw.tables.into_iter().map(RawTable::normalize).collect(),
            });
        }

        Config { bases }
    }
}

impl RawBaseRef {
    fn normalize(self) -> BaseRef {
        match self {
            Self::Shorthand(value) => BaseRef::Loose(value),
            Self::ById { id } => BaseRef::Id(id),
            Self::ByName { name } => BaseRef::Name(name),
        }
    }
}

impl RawTable {
    fn normalize(self) -> TableConfig {
        let mut overrides: IndexMap<String, ColumnOverride> = self
            .column_name_to_object_property_mapper
            .into_iter()
            .map(|(name, raw)| (name, raw.normalize()))
            .collect();

        // Tuple-form focus columns contribute both a focus entry and an
        // override. An explicit mapper entry for the same column wins.
        let focus_columns = self.focus_columns.map(|columns| {
            columns
                .into_iter()
                .map(|column| match column {
                    RawFocusColumn::Name(name) => name,
                    RawFocusColumn::WithOverride(name, raw) => {
                        overrides.entry(name.clone()).or_insert_with(|| raw.normalize());
                        name
                    }
                })
                .collect()
        });

        let label = match self.label {
            Some(label) => Label {
                singular: label
                    .singular
                    .unwrap_or_else(|| pluralizer::pluralize(&self.name, 1, false)),
                plural: label
                    .plural
                    .unwrap_or_else(|| pluralizer::pluralize(&self.name, 2, false)),
            },
            None => Label::derive(&self.name),
        };

        TableConfig {
            alias: self
                .alias
                .unwrap_or_else(|| self.name.to_lower_camel_case()),
            label,
            name: self.name,
            focus_columns,
            overrides,
            views: self.views,
            record_id_columns: self.record_id_columns,
        }
    }
}

impl RawColumnOverride {
    fn normalize(self) -> ColumnOverride {
        match self {
            Self::Shorthand(property_name) => ColumnOverride {
                property_name: Some(property_name),
                ..ColumnOverride::default()
            },
            Self::Detailed(detailed) => ColumnOverride {
                property_name: detailed.property_name,
                ty: detailed.ty,
                required: detailed.required,
                editable: detailed.editable,
                creatable: detailed.creatable,
                prefers_single: detailed.prefers_single,
            },
        }
    }
}
