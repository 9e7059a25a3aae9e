mod base;
pub use base::Base;

mod field;
pub use field::{Choice, Field, FieldOptions, FieldType, FormulaResult};

mod table;
pub use table::Table;

mod view;
pub use view::View;

/// Find a table by id within a fetched base.
///
/// Reference chains are always expressed in terms of table ids, so this is
/// the only lookup the resolver needs across tables.
pub fn table_by_id<'a>(tables: &'a [Table], id: &str) -> Option<&'a Table> {
    tables.iter().find(|table| table.id == id)
}
