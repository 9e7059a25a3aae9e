use serde::Deserialize;

/// A top-level container of tables in the remote database.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base {
    /// Uniquely identifies the base.
    pub id: String,

    /// The display name. Not unique across an account.
    pub name: String,

    /// Access level the credential has on this base.
    #[serde(default)]
    pub permission_level: Option<String>,
}
