use crate::config::ColumnOverride;
use crate::schema::{table_by_id, Field, Table};
use heck::{ToLowerCamelCase, ToUpperCamelCase};

/// A field's canonical property name.
///
/// `path` keeps the full dotted form for cross-referencing (queryable
/// selectors, nested lookups); `key` is the bare terminal segment used as the
/// field's own property key. They are equal unless the user supplied a dotted
/// override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyName {
    pub key: String,
    pub path: String,
}

impl PropertyName {
    fn from_path(path: String) -> Self {
        let key = path.rsplit('.').next().unwrap_or(&path).to_string();
        Self { key, path }
    }
}

/// Camel-case a display name into a property identifier.
///
/// Strips everything that is neither alphanumeric nor whitespace before case
/// conversion, and shields a leading digit with `_`.
pub fn derive_property_name(display: &str) -> String {
    let cleaned: String = display
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let name = cleaned.to_lower_camel_case();
    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        format!("_{name}")
    } else {
        name
    }
}

/// Derive the property name for a field.
///
/// A user override wins outright. Otherwise the name derives from the
/// *resolved root* field's display name: a lookup mirrors its target's
/// semantics, so it inherits the target's name rather than its own.
///
/// Record links additionally get a relationship-disambiguation suffix: when
/// the root link knows its inverse field on the linked table and the derived
/// name does not already read as an id, `<LinkedTable><InverseField>Id` (or
/// `Ids` for a multi-record inverse) is appended. This keeps two links into
/// the same target table from colliding.
pub fn property_name(
    root: &Field,
    all: &[Table],
    user_override: Option<&ColumnOverride>,
) -> PropertyName {
    if let Some(path) = user_override.and_then(|o| o.property_name.clone()) {
        return PropertyName::from_path(path);
    }

    let mut name = derive_property_name(&root.name);

    if root.is_record_link() && !name.ends_with("Id") && !name.ends_with("Ids") {
        if let Some(suffix) = inverse_link_suffix(root, all) {
            name.push_str(&suffix);
        }
    }

    PropertyName::from_path(name)
}

fn inverse_link_suffix(link: &Field, all: &[Table]) -> Option<String> {
    let linked = link.linked_table_id().and_then(|id| table_by_id(all, id))?;
    let inverse_id = link.options.inverse_link_field_id.as_deref()?;
    let inverse = linked.field(inverse_id)?;

    let cardinality = if inverse.options.prefers_single_record_link {
        "Id"
    } else {
        "Ids"
    };
    Some(format!(
        "{}{}{}",
        upper_camel(&linked.name),
        upper_camel(&inverse.name),
        cardinality
    ))
}

fn upper_camel(display: &str) -> String {
    let cleaned: String = display
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    cleaned.to_upper_camel_case()
}
