use serde::Deserialize;

/// A typed attribute on a table.
///
/// A field is either a direct value, a link to records in another table, or a
/// computed value (lookup, formula, rollup) that indirectly references other
/// fields. The reference wiring lives in [`FieldOptions`].
#[derive(Debug, Clone, Deserialize)]
pub struct Field {
    /// Uniquely identifies the field within the containing table.
    pub id: String,

    /// The field's display name.
    pub name: String,

    /// The declared remote type. Absent for fields the remote API predates.
    #[serde(rename = "type")]
    pub ty: Option<FieldType>,

    #[serde(default)]
    pub description: Option<String>,

    /// Type-specific wiring (reference ids, formula result, select choices).
    #[serde(default)]
    pub options: FieldOptions,
}

/// The closed set of remote field type tags, wire spelling preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    SingleLineText,
    MultilineText,
    RichText,
    Email,
    Url,
    PhoneNumber,
    SingleSelect,
    MultipleSelects,
    Number,
    Percent,
    Currency,
    Rating,
    Count,
    AutoNumber,
    Duration,
    Checkbox,
    Date,
    DateTime,
    CreatedTime,
    LastModifiedTime,
    MultipleRecordLinks,
    Lookup,
    MultipleLookupValues,
    Formula,
    Rollup,
    MultipleAttachments,
    Button,
    Barcode,
    SingleCollaborator,
    MultipleCollaborators,
    CreatedBy,
    LastModifiedBy,
    ExternalSyncSource,
    AiText,
    /// Forward-compatibility escape hatch: tags this build does not know
    /// degrade to read-only permissive handling.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOptions {
    /// For lookups: id of the link field *on the same table* the lookup rides.
    pub record_link_field_id: Option<String>,

    /// For lookups: id of the mirrored field on the linked table.
    pub field_id_in_linked_table: Option<String>,

    /// For record links: id of the table the link points at.
    pub linked_table_id: Option<String>,

    /// For record links: id of the inverse link field on the linked table.
    pub inverse_link_field_id: Option<String>,

    /// For record links: the link holds at most one record, changing its
    /// cardinality from list to single.
    pub prefers_single_record_link: bool,

    /// For formulas (and rollups): the computed result type.
    pub result: Option<FormulaResult>,

    /// For selects: the declared choice set.
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormulaResult {
    #[serde(rename = "type")]
    pub ty: Option<FieldType>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl Field {
    /// Gets the declared type, treating an absent tag as [`FieldType::Unknown`].
    pub fn ty(&self) -> FieldType {
        self.ty.unwrap_or(FieldType::Unknown)
    }

    pub fn is_lookup(&self) -> bool {
        self.ty().is_lookup()
    }

    pub fn is_record_link(&self) -> bool {
        self.ty() == FieldType::MultipleRecordLinks
    }

    pub fn is_formula(&self) -> bool {
        self.ty() == FieldType::Formula
    }

    /// For lookups, the id of the link field on the same table.
    pub fn link_field_id(&self) -> Option<&str> {
        self.options.record_link_field_id.as_deref()
    }

    /// For lookups, the id of the mirrored field on the linked table.
    pub fn target_field_id(&self) -> Option<&str> {
        self.options.field_id_in_linked_table.as_deref()
    }

    /// For record links, the id of the table the link points at.
    pub fn linked_table_id(&self) -> Option<&str> {
        self.options.linked_table_id.as_deref()
    }
}

impl FieldType {
    pub fn is_lookup(self) -> bool {
        matches!(self, Self::Lookup | Self::MultipleLookupValues)
    }

    /// True for types whose value is a list.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::MultipleSelects
                | Self::MultipleLookupValues
                | Self::Lookup
                | Self::MultipleRecordLinks
                | Self::MultipleAttachments
                | Self::MultipleCollaborators
        )
    }

    /// True for types a client may write through the records API.
    ///
    /// Computed and system-maintained fields (lookup, formula, rollup, count,
    /// autonumber, created/modified stamps, collaborators) are never directly
    /// editable.
    pub fn is_editable(self) -> bool {
        matches!(
            self,
            Self::SingleLineText
                | Self::MultilineText
                | Self::RichText
                | Self::Email
                | Self::Url
                | Self::PhoneNumber
                | Self::SingleSelect
                | Self::MultipleSelects
                | Self::Number
                | Self::Percent
                | Self::Currency
                | Self::Rating
                | Self::Checkbox
                | Self::Date
                | Self::DateTime
                | Self::MultipleRecordLinks
        )
    }
}
