use crate::{GeneratedFile, Imports, Interpolations, Template};
use anyhow::Result;
use heck::ToUpperCamelCase;
use tablegen_core::TableMapping;

const SCHEMA_TEMPLATE: Template = Template::new(include_str!("../templates/schema.ts.tmpl"));
const CLIENT_TEMPLATE: Template = Template::new(include_str!("../templates/client.ts.tmpl"));

/// Render one table's generated files from its translation output.
///
/// Lookup fields do not appear as top-level schema entries; they ride inside
/// their parent link's object shape, and surface separately only in the
/// property map (as dotted paths) and the queryable list.
pub fn generate_table(mapping: &TableMapping) -> Result<Vec<GeneratedFile>> {
    let alias = &mapping.config.alias;
    let type_name = mapping.config.label.singular.to_upper_camel_case();

    let mut imports = Imports::new();
    imports.add("zod", "z");
    if mapping.uses_attachment {
        imports.add("./attachment", "attachmentSchema");
        imports.add("./attachment", "Attachment");
    }

    let mut values = Interpolations::new();
    values
        .set("alias", alias.clone())
        .set("clientName", format!("{type_name}Client"))
        .set("typeName", type_name)
        .set("tableId", ts_escape(&mapping.table_id))
        .set("tableName", ts_escape(&mapping.table_name))
        .set("routePath", alias.clone())
        .set("imports", imports.render())
        .set("schemaFields", schema_fields(mapping))
        .set("requestFields", request_fields(mapping))
        .set("typeFields", type_fields(mapping))
        .set("propertyEntries", property_entries(mapping))
        .set("coercionEntries", coercion_entries(mapping))
        .set("queryableFields", queryable_fields(mapping));

    tracing::debug!(table = %mapping.table_name, "rendering generated files");

    Ok(vec![
        GeneratedFile {
            path: format!("{alias}.ts"),
            contents: SCHEMA_TEMPLATE.render(&values)?,
        },
        GeneratedFile {
            path: format!("{alias}Client.ts"),
            contents: CLIENT_TEMPLATE.render(&values)?,
        },
    ])
}

fn schema_fields(mapping: &TableMapping) -> String {
    let mut lines = vec![];
    for (name, column) in &mapping.columns {
        let Some(entry) = mapping.schemas.get(name) else {
            continue;
        };
        lines.push(format!("  {}: {},", column.property.key, entry.validation));
    }
    lines.join("\n")
}

fn request_fields(mapping: &TableMapping) -> String {
    let mut lines = vec![];
    for (name, column) in &mapping.columns {
        if !column.editable && !column.creatable {
            continue;
        }
        let Some(rule) = mapping
            .schemas
            .get(name)
            .and_then(|entry| entry.request_validation.clone())
        else {
            continue;
        };
        let rule = if column.required {
            rule
        } else {
            format!("{rule}.optional()")
        };
        lines.push(format!("  {}: {rule},", column.property.key));
    }
    lines.join("\n")
}

fn type_fields(mapping: &TableMapping) -> String {
    let mut lines = vec![];
    for (name, column) in &mapping.columns {
        let Some(entry) = mapping.schemas.get(name) else {
            continue;
        };
        let optional = if column.required { "" } else { "?" };
        lines.push(format!(
            "  {}{optional}: {} | null;",
            column.property.key, entry.property_type
        ));
    }
    lines.join("\n")
}

fn property_entries(mapping: &TableMapping) -> String {
    let mut lines = vec![];
    for (name, column) in &mapping.columns {
        lines.push(format!(
            "  \"{}\": {{ property: \"{}\", editable: {}, required: {}, list: false }},",
            ts_escape(name),
            column.property.key,
            column.editable,
            column.required,
        ));
    }
    for (name, lookup) in &mapping.lookups {
        let parent_key = mapping
            .columns
            .get(&lookup.parent)
            .map(|parent| parent.property.key.as_str())
            .unwrap_or(lookup.parent.as_str());
        lines.push(format!(
            "  \"{}\": {{ property: \"{parent_key}.{}\", editable: false, required: {}, list: {} }},",
            ts_escape(name),
            lookup.mapping.property.key,
            lookup.mapping.required,
            lookup.mapping.is_value_list,
        ));
    }
    lines.join("\n")
}

fn coercion_entries(mapping: &TableMapping) -> String {
    let mut lines = vec![];
    let columns = mapping
        .columns
        .iter()
        .map(|(name, column)| (name, &column.ty_override));
    let lookups = mapping
        .lookups
        .iter()
        .map(|(name, lookup)| (name, &lookup.mapping.ty_override));
    for (name, ty_override) in columns.chain(lookups) {
        if let Some(ty) = ty_override {
            lines.push(format!("  \"{}\": \"{}\",", ts_escape(name), ty.as_str()));
        }
    }
    lines.join("\n")
}

fn queryable_fields(mapping: &TableMapping) -> String {
    mapping
        .queryable
        .iter()
        .map(|field| format!("  \"{field}\","))
        .collect::<Vec<_>>()
        .join("\n")
}

fn ts_escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
