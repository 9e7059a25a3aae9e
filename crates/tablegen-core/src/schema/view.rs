use serde::Deserialize;

/// A saved view on a table. Carried through so a table config's view
/// allowlist can filter which list endpoints are emitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct View {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<String>,
}
