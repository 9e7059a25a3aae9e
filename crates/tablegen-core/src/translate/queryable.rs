use indexmap::IndexMap;

/// Compute the property names safe to expose as sort/filter/select query
/// fields.
///
/// `direct` maps a direct field's display name to its property key; `lookups`
/// maps a lookup's display name to its property key and the display name of
/// the direct link field it rides. A direct field qualifies when its display
/// name is in the focus list (absent list means all). A lookup qualifies as a
/// dotted `parent.child` path when both it and its parent are in scope.
///
/// The output is sorted lexicographically. Deterministic ordering here is a
/// correctness requirement: generated files must diff reproducibly.
pub fn queryable_fields(
    focus: Option<&[String]>,
    direct: &IndexMap<String, String>,
    lookups: &IndexMap<String, (String, String)>,
) -> Vec<String> {
    let in_scope =
        |name: &str| focus.is_none_or(|columns| columns.iter().any(|column| column == name));

    let mut fields = vec![];

    for (name, property) in direct {
        if in_scope(name) {
            fields.push(property.clone());
        }
    }

    for (name, (property, parent_name)) in lookups {
        if !in_scope(name) || !in_scope(parent_name) {
            continue;
        }
        if let Some(parent_property) = direct.get(parent_name) {
            fields.push(format!("{parent_property}.{property}"));
        }
    }

    fields.sort();
    fields
}
