use super::{Field, View};
use serde::Deserialize;

/// A named collection of typed fields and views.
///
/// Identity is the id: display names may collide across bases.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: String,

    pub name: String,

    #[serde(default)]
    pub primary_field_id: Option<String>,

    /// Ordered as the remote API returns them.
    pub fields: Vec<Field>,

    #[serde(default)]
    pub views: Vec<View>,
}

impl Table {
    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}
