use crate::config::{TableConfig, TypeOverride};
use crate::schema::Table;
use crate::translate::{
    classify, property_name, queryable_fields, resolve_root, should_flatten_lookup, synthesize,
    PropertyName,
};
use indexmap::IndexMap;

/// Derived mapping for one column, built by layering the user override over
/// inferred defaults. The override wins per-key; keys it leaves out keep the
/// inferred value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMapping {
    pub property: PropertyName,

    /// The field resolves to a single value rather than a list.
    pub prefers_single: bool,

    /// A lookup kept as a list of per-record values.
    pub is_value_list: bool,

    /// Post-decode coercion declared by the user.
    pub ty_override: Option<TypeOverride>,

    pub required: bool,
    pub editable: bool,
    pub creatable: bool,
}

/// A lookup column mapping plus the direct link field it rides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupColumn {
    pub mapping: ColumnMapping,

    /// Display name of the parent link field on the same table.
    pub parent: String,
}

/// Validation/type strings for one field, ready for interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub validation: String,
    pub request_validation: Option<String>,
    pub property_type: String,
}

/// Everything the emission layer needs for one table.
///
/// Built once per table per run; a pure function of (table, all tables, user
/// config), so rebuilding with the same inputs yields identical output.
#[derive(Debug, Clone)]
pub struct TableMapping {
    pub table_id: String,
    pub table_name: String,
    pub config: TableConfig,

    /// Direct fields, keyed by display name, in classification order.
    pub columns: IndexMap<String, ColumnMapping>,

    /// Lookup fields, keyed by display name, in classification order.
    pub lookups: IndexMap<String, LookupColumn>,

    /// Validation schema group covering both direct and lookup fields.
    pub schemas: IndexMap<String, SchemaEntry>,

    /// Sorted queryable property names, dotted for lookups.
    pub queryable: Vec<String>,

    /// The attachment shape appears somewhere in the schema group.
    pub uses_attachment: bool,
}

impl TableMapping {
    pub fn build(table: &Table, all: &[Table], config: Option<&TableConfig>) -> Self {
        let config = config
            .cloned()
            .unwrap_or_else(|| TableConfig::defaults(&table.name));

        let classified = classify(table);

        let mut columns = IndexMap::new();
        let mut lookups = IndexMap::new();
        let mut schemas = IndexMap::new();
        let mut uses_attachment = false;

        for field in &classified.direct {
            let user_override = config.override_for(&field.name);
            let root = resolve_root(field, table, all);
            let property = property_name(root, all, user_override);
            let schema = synthesize(field, table, all);
            uses_attachment |= schema.uses_attachment();

            let editable = user_override
                .and_then(|o| o.editable)
                .unwrap_or_else(|| field.ty().is_editable());
            columns.insert(
                field.name.clone(),
                ColumnMapping {
                    property,
                    prefers_single: user_override
                        .and_then(|o| o.prefers_single)
                        .unwrap_or(field.options.prefers_single_record_link),
                    is_value_list: false,
                    ty_override: user_override.and_then(|o| o.ty),
                    required: user_override.and_then(|o| o.required).unwrap_or(false),
                    creatable: user_override.and_then(|o| o.creatable).unwrap_or(editable),
                    editable,
                },
            );
            schemas.insert(
                field.name.clone(),
                SchemaEntry {
                    validation: schema.response_rule(),
                    request_validation: schema.request_rule(),
                    property_type: schema.property_type(),
                },
            );
        }

        for field in &classified.lookup {
            // Classification guarantees the parent link resolves.
            let Some(parent) = classified.parent_of(field) else {
                continue;
            };
            let user_override = config.override_for(&field.name);
            let root = resolve_root(field, table, all);
            let property = property_name(root, all, user_override);
            let schema = synthesize(field, table, all);
            uses_attachment |= schema.uses_attachment();

            let flattened = user_override
                .and_then(|o| o.prefers_single)
                .unwrap_or_else(|| should_flatten_lookup(field, table, all));
            lookups.insert(
                field.name.clone(),
                LookupColumn {
                    mapping: ColumnMapping {
                        property,
                        prefers_single: flattened,
                        is_value_list: !flattened,
                        ty_override: user_override.and_then(|o| o.ty),
                        required: user_override.and_then(|o| o.required).unwrap_or(false),
                        editable: false,
                        creatable: false,
                    },
                    parent: parent.name.clone(),
                },
            );
            schemas.insert(
                field.name.clone(),
                SchemaEntry {
                    validation: schema.response_rule(),
                    request_validation: None,
                    property_type: schema.property_type(),
                },
            );
        }

        let direct_names: IndexMap<String, String> = columns
            .iter()
            .map(|(name, mapping)| (name.clone(), mapping.property.key.clone()))
            .collect();
        let lookup_names: IndexMap<String, (String, String)> = lookups
            .iter()
            .map(|(name, lookup)| {
                (
                    name.clone(),
                    (lookup.mapping.property.key.clone(), lookup.parent.clone()),
                )
            })
            .collect();
        let queryable = queryable_fields(
            config.focus_columns.as_deref(),
            &direct_names,
            &lookup_names,
        );

        Self {
            table_id: table.id.clone(),
            table_name: table.name.clone(),
            config,
            columns,
            lookups,
            schemas,
            queryable,
            uses_attachment,
        }
    }
}
