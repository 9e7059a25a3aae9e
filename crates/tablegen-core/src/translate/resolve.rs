use crate::schema::{table_by_id, Field, FieldType, Table};

/// Recursion cap for reference chains.
///
/// Resolution always moves to a different table per hop, so looping requires
/// a link cycle across tables. The remote system does not prevent those, so
/// excess depth degrades to "unresolved" instead of walking forever.
pub const MAX_DEPTH: usize = 32;

/// Resolve the root field a lookup ultimately represents.
///
/// Non-lookup fields are their own root. For a lookup, the chain is: link
/// field on the current table, linked table, target field on that table; if
/// the target is itself a lookup, the walk repeats there. Any missing hop
/// (dangling link field, unknown table, missing target) is a degraded
/// fallback to the field under inspection, not an error.
pub fn resolve_root<'a>(field: &'a Field, table: &'a Table, all: &'a [Table]) -> &'a Field {
    resolve_root_at(field, table, all, 0)
}

fn resolve_root_at<'a>(
    field: &'a Field,
    table: &'a Table,
    all: &'a [Table],
    depth: usize,
) -> &'a Field {
    if !field.is_lookup() {
        return field;
    }
    if depth >= MAX_DEPTH {
        tracing::warn!(
            field = %field.name,
            table = %table.name,
            "reference chain exceeds depth cap, treating lookup as unresolved"
        );
        return field;
    }

    let Some(link) = field.link_field_id().and_then(|id| table.field(id)) else {
        tracing::debug!(field = %field.name, "lookup rides a missing link field");
        return field;
    };
    let Some(linked) = link.linked_table_id().and_then(|id| table_by_id(all, id)) else {
        tracing::debug!(field = %field.name, "link points at an unknown table");
        return field;
    };
    let Some(target) = field.target_field_id().and_then(|id| linked.field(id)) else {
        tracing::debug!(field = %field.name, "lookup target missing on linked table");
        return field;
    };

    resolve_root_at(target, linked, all, depth + 1)
}

/// Decide whether a lookup should be flattened to a single value.
///
/// A lookup flattens iff the link it rides prefers a single record and the
/// one-level-up expansion is not itself list-producing. A multi-value lookup
/// target defers the decision one more hop (chained single-record
/// flattening); a `multipleSelects` target always stays a list. An unresolved
/// hop never flattens: the rule synthesized for the same chain degrades to a
/// permissive list, and the mapping must agree with it.
pub fn should_flatten_lookup(field: &Field, table: &Table, all: &[Table]) -> bool {
    flatten_at(field, table, all, 0)
}

fn flatten_at(field: &Field, table: &Table, all: &[Table], depth: usize) -> bool {
    if depth >= MAX_DEPTH {
        return false;
    }

    let Some(link) = field.link_field_id().and_then(|id| table.field(id)) else {
        return false;
    };
    if !link.options.prefers_single_record_link {
        return false;
    }

    let target = link
        .linked_table_id()
        .and_then(|id| table_by_id(all, id))
        .and_then(|linked| {
            field
                .target_field_id()
                .and_then(|id| linked.field(id))
                .map(|target| (linked, target))
        });

    match target {
        Some((linked, target)) => match target.ty() {
            FieldType::MultipleSelects => false,
            ty if ty.is_lookup() => flatten_at(target, linked, all, depth + 1),
            _ => true,
        },
        // Unresolved chains stay lists, matching their synthesized rule.
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
    use crate::test_util::*;

    /// people.Role Name -> (link to roles) -> roles.Name
    fn two_table_chain() -> Vec<Table> {
        let roles = table(
            "tblRoles",
            "Roles",
            vec![field("fldName", "Name", FieldType::SingleLineText)],
        );
        let people = table(
            "tblPeople",
            "People",
            vec![
                link_field("fldRole", "Current Role", "tblRoles", true),
                lookup_field("fldRoleName", "Current Role Name", "fldRole", "fldName"),
            ],
        );
        vec![people, roles]
    }

    #[test]
    fn non_lookup_is_its_own_root() {
        let all = two_table_chain();
        let people = &all[0];
        let link = people.field("fldRole").unwrap();
        assert_eq!(resolve_root(link, people, &all).id, "fldRole");
    }

    #[test]
    fn single_hop_lookup_resolves_to_target() {
        let all = two_table_chain();
        let people = &all[0];
        let lookup = people.field("fldRoleName").unwrap();
        let root = resolve_root(lookup, people, &all);
        assert_eq!(root.id, "fldName");
        assert!(!root.is_lookup());
    }

    #[test]
    fn lookup_of_lookup_resolves_transitively() {
        // companies.Name <- roles.Company Name (lookup) <- people.Role Company Name
        let companies = table(
            "tblCompanies",
            "Companies",
            vec![field("fldCoName", "Name", FieldType::SingleLineText)],
        );
        let roles = table(
            "tblRoles",
            "Roles",
            vec![
                link_field("fldCo", "Company", "tblCompanies", true),
                lookup_field("fldCoNameLk", "Company Name", "fldCo", "fldCoName"),
            ],
        );
        let people = table(
            "tblPeople",
            "People",
            vec![
                link_field("fldRole", "Role", "tblRoles", true),
                lookup_field("fldDeep", "Role Company Name", "fldRole", "fldCoNameLk"),
            ],
        );
        let all = vec![people, roles, companies];

        let people = &all[0];
        let deep = people.field("fldDeep").unwrap();
        let root = resolve_root(deep, people, &all);
        assert_eq!(root.id, "fldCoName");
        assert_eq!(root.ty(), FieldType::SingleLineText);
    }

    #[test]
    fn dangling_link_field_falls_back_to_self() {
        let people = table(
            "tblPeople",
            "People",
            vec![lookup_field("fldLk", "Orphan", "fldMissing", "fldAlsoMissing")],
        );
        let all = vec![people];
        let people = &all[0];
        let lookup = people.field("fldLk").unwrap();
        assert_eq!(resolve_root(lookup, people, &all).id, "fldLk");
    }

    #[test]
    fn cyclic_chain_terminates_within_depth_cap() {
        // a.Mirror looks up b.Mirror which looks up a.Mirror again.
        let a = table(
            "tblA",
            "A",
            vec![
                link_field("fldAtoB", "To B", "tblB", true),
                lookup_field("fldAMirror", "Mirror", "fldAtoB", "fldBMirror"),
            ],
        );
        let b = table(
            "tblB",
            "B",
            vec![
                link_field("fldBtoA", "To A", "tblA", true),
                lookup_field("fldBMirror", "Mirror", "fldBtoA", "fldAMirror"),
            ],
        );
        let all = vec![a, b];

        let a = &all[0];
        let lookup = a.field("fldAMirror").unwrap();
        // Must return, and must return a field from the cycle.
        let root = resolve_root(lookup, a, &all);
        assert!(root.is_lookup());
    }

    #[test]
    fn flatten_requires_single_preferring_link() {
        let mut all = two_table_chain();
        let people = &all[0];
        let lookup = people.field("fldRoleName").unwrap();
        assert!(should_flatten_lookup(lookup, people, &all));

        // Same chain, link no longer prefers a single record.
        all[0].fields[0].options.prefers_single_record_link = false;
        let people = &all[0];
        let lookup = people.field("fldRoleName").unwrap();
        assert!(!should_flatten_lookup(lookup, people, &all));
    }

    #[test]
    fn unresolved_target_never_flattens() {
        // The link prefers a single record but points at a table that is not
        // in the base; the lookup must stay a list.
        let people = table(
            "tblPeople",
            "People",
            vec![
                link_field("fldRole", "Role", "tblMissing", true),
                lookup_field("fldRoleName", "Role Name", "fldRole", "fldGone"),
            ],
        );
        let all = vec![people];
        let people = &all[0];
        let lookup = people.field("fldRoleName").unwrap();
        assert!(!should_flatten_lookup(lookup, people, &all));
    }

    #[test]
    fn multiple_selects_target_never_flattens() {
        let roles = table(
            "tblRoles",
            "Roles",
            vec![field("fldTags", "Tags", FieldType::MultipleSelects)],
        );
        let people = table(
            "tblPeople",
            "People",
            vec![
                link_field("fldRole", "Role", "tblRoles", true),
                lookup_field("fldTagsLk", "Role Tags", "fldRole", "fldTags"),
            ],
        );
        let all = vec![people, roles];
        let people = &all[0];
        let lookup = people.field("fldTagsLk").unwrap();
        assert!(!should_flatten_lookup(lookup, people, &all));
    }

    #[test]
    fn chained_single_links_flatten_through_lookup_target() {
        let companies = table(
            "tblCompanies",
            "Companies",
            vec![field("fldCoName", "Name", FieldType::SingleLineText)],
        );
        let roles = table(
            "tblRoles",
            "Roles",
            vec![
                link_field("fldCo", "Company", "tblCompanies", true),
                lookup_field("fldCoNameLk", "Company Name", "fldCo", "fldCoName"),
            ],
        );
        let people = table(
            "tblPeople",
            "People",
            vec![
                link_field("fldRole", "Role", "tblRoles", true),
                lookup_field("fldDeep", "Role Company Name", "fldRole", "fldCoNameLk"),
            ],
        );
        let all = vec![people, roles, companies];
        let people = &all[0];
        let deep = people.field("fldDeep").unwrap();
        assert!(should_flatten_lookup(deep, people, &all));
    }

    #[test]
    fn chained_flatten_stops_at_multi_record_link() {
        // Outer link prefers single, but the inner link is a plain list link.
        let companies = table(
            "tblCompanies",
            "Companies",
            vec![field("fldCoName", "Name", FieldType::SingleLineText)],
        );
        let roles = table(
            "tblRoles",
            "Roles",
            vec![
                link_field("fldCo", "Companies", "tblCompanies", false),
                lookup_field("fldCoNameLk", "Company Names", "fldCo", "fldCoName"),
            ],
        );
        let people = table(
            "tblPeople",
            "People",
            vec![
                link_field("fldRole", "Role", "tblRoles", true),
                lookup_field("fldDeep", "Role Company Names", "fldRole", "fldCoNameLk"),
            ],
        );
        let all = vec![people, roles, companies];
        let people = &all[0];
        let deep = people.field("fldDeep").unwrap();
        assert!(!should_flatten_lookup(deep, people, &all));
    }
}
