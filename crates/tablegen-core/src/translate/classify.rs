use crate::schema::{Field, Table};
use std::collections::HashSet;

/// A table's fields partitioned into direct values and lookups.
#[derive(Debug)]
pub struct Classified<'a> {
    pub direct: Vec<&'a Field>,
    pub lookup: Vec<&'a Field>,
}

/// Partition a table's fields.
///
/// A field lands in `lookup` iff it is a multi-lookup whose declared link
/// field is actually present on the same table; a dangling link-field id
/// signals a field that did not survive an upstream filter, so the lookup is
/// dropped with a diagnostic. Everything else is `direct`.
///
/// Duplicates are resolved first-wins: direct fields by display name, lookups
/// by (link field id, target field id) pair after a display-name sort. The
/// dedup is intentional compatibility behavior; it gets a diagnostic because
/// it can mask schema modeling mistakes upstream.
pub fn classify(table: &Table) -> Classified<'_> {
    let mut direct = vec![];
    let mut seen_names = HashSet::new();

    for field in &table.fields {
        if field.is_lookup() {
            continue;
        }
        if !seen_names.insert(field.name.as_str()) {
            tracing::warn!(
                table = %table.name,
                field = %field.name,
                "duplicate field display name, keeping first occurrence"
            );
            continue;
        }
        direct.push(field);
    }

    let mut lookup: Vec<&Field> = table
        .fields
        .iter()
        .filter(|field| {
            if !field.is_lookup() {
                return false;
            }
            let resolves = field
                .link_field_id()
                .is_some_and(|id| table.field(id).is_some());
            if !resolves {
                tracing::debug!(
                    table = %table.name,
                    field = %field.name,
                    "lookup rides a missing link field, dropping"
                );
            }
            resolves
        })
        .collect();
    lookup.sort_by(|a, b| a.name.cmp(&b.name));

    let mut seen_refs = HashSet::new();
    lookup.retain(|field| {
        let key = (field.link_field_id(), field.target_field_id());
        if !seen_refs.insert(key) {
            tracing::debug!(
                table = %table.name,
                field = %field.name,
                "duplicate lookup reference, keeping first occurrence"
            );
            return false;
        }
        true
    });

    Classified { direct, lookup }
}

impl<'a> Classified<'a> {
    /// Direct fields a client may write through the records API.
    pub fn editable(&self) -> impl Iterator<Item = &'a Field> + '_ {
        self.direct
            .iter()
            .copied()
            .filter(|field| field.ty().is_editable())
    }

    /// The direct link field a lookup rides, if classified.
    pub fn parent_of(&self, lookup: &Field) -> Option<&'a Field> {
        let link_id = lookup.link_field_id()?;
        self.direct.iter().copied().find(|field| field.id == link_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use crate::test_util::*;

    #[test]
    fn partitions_direct_and_lookup() {
        let roles = table(
            "tblRoles",
            "Roles",
            vec![field("fldName", "Name", FieldType::SingleLineText)],
        );
        let people = table(
            "tblPeople",
            "People",
            vec![
                field("fldFull", "Full Name", FieldType::SingleLineText),
                link_field("fldRole", "Role", "tblRoles", true),
                lookup_field("fldRoleName", "Role Name", "fldRole", "fldName"),
            ],
        );
        let all = vec![people, roles];

        let classified = classify(&all[0]);
        let direct: Vec<_> = classified.direct.iter().map(|f| f.id.as_str()).collect();
        let lookup: Vec<_> = classified.lookup.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(direct, ["fldFull", "fldRole"]);
        assert_eq!(lookup, ["fldRoleName"]);
    }

    #[test]
    fn dangling_lookup_is_dropped_entirely() {
        let people = table(
            "tblPeople",
            "People",
            vec![
                field("fldFull", "Full Name", FieldType::SingleLineText),
                lookup_field("fldOrphan", "Orphan", "fldGone", "fldAlsoGone"),
            ],
        );
        let all = vec![people];

        let classified = classify(&all[0]);
        assert_eq!(classified.direct.len(), 1);
        assert!(classified.lookup.is_empty());
    }

    #[test]
    fn duplicate_display_names_keep_first() {
        let people = table(
            "tblPeople",
            "People",
            vec![
                field("fldA", "Name", FieldType::SingleLineText),
                field("fldB", "Name", FieldType::Email),
            ],
        );
        let all = vec![people];

        let classified = classify(&all[0]);
        assert_eq!(classified.direct.len(), 1);
        assert_eq!(classified.direct[0].id, "fldA");
    }

    #[test]
    fn duplicate_lookup_references_keep_lowest_name() {
        let roles = table(
            "tblRoles",
            "Roles",
            vec![field("fldName", "Name", FieldType::SingleLineText)],
        );
        let people = table(
            "tblPeople",
            "People",
            vec![
                link_field("fldRole", "Role", "tblRoles", true),
                lookup_field("fldZ", "Z Role Name", "fldRole", "fldName"),
                lookup_field("fldA", "A Role Name", "fldRole", "fldName"),
            ],
        );
        let all = vec![people, roles];

        let classified = classify(&all[0]);
        assert_eq!(classified.lookup.len(), 1);
        assert_eq!(classified.lookup[0].id, "fldA");
    }

    #[test]
    fn editable_allowlist_excludes_computed_fields() {
        let people = table(
            "tblPeople",
            "People",
            vec![
                field("fldFull", "Full Name", FieldType::SingleLineText),
                field("fldCount", "Openings", FieldType::Count),
                formula_field("fldCalc", "Score", FieldType::Number),
                field("fldRollup", "Total", FieldType::Rollup),
            ],
        );
        let all = vec![people];

        let classified = classify(&all[0]);
        let editable: Vec<_> = classified.editable().map(|f| f.id.as_str()).collect();
        assert_eq!(editable, ["fldFull"]);
    }
}
