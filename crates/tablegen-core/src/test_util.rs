//! Synthetic schema builders shared by the unit tests.

use crate::schema::{Field, FieldOptions, FieldType, FormulaResult, Table};

pub(crate) fn table(id: &str, name: &str, fields: Vec<Field>) -> Table {
    Table {
        id: id.to_string(),
        name: name.to_string(),
        primary_field_id: fields.first().map(|field| field.id.clone()),
        fields,
        views: vec![],
    }
}

pub(crate) fn field(id: &str, name: &str, ty: FieldType) -> Field {
    Field {
        id: id.to_string(),
        name: name.to_string(),
        ty: Some(ty),
        description: None,
        options: FieldOptions::default(),
    }
}

pub(crate) fn link_field(
    id: &str,
    name: &str,
    linked_table_id: &str,
    prefers_single: bool,
) -> Field {
    let mut link = field(id, name, FieldType::MultipleRecordLinks);
    link.options.linked_table_id = Some(linked_table_id.to_string());
    link.options.prefers_single_record_link = prefers_single;
    link
}

pub(crate) fn lookup_field(
    id: &str,
    name: &str,
    link_field_id: &str,
    target_field_id: &str,
) -> Field {
    let mut lookup = field(id, name, FieldType::MultipleLookupValues);
    lookup.options.record_link_field_id = Some(link_field_id.to_string());
    lookup.options.field_id_in_linked_table = Some(target_field_id.to_string());
    lookup
}

pub(crate) fn formula_field(id: &str, name: &str, result: FieldType) -> Field {
    let mut formula = field(id, name, FieldType::Formula);
    formula.options.result = Some(FormulaResult { ty: Some(result) });
    formula
}
