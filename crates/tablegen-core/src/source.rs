use crate::schema::{Base, Table};
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// The remote metadata service boundary.
///
/// Two idempotent read calls are all the generator consumes. Transport,
/// authentication, and pagination live behind this trait; implementations are
/// external collaborators.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn list_bases(&self) -> Result<Vec<Base>>;

    async fn list_tables(&self, base_id: &str) -> Result<Vec<Table>>;
}

/// A metadata source backed by a JSON snapshot file.
///
/// Snapshot shape: `{ "bases": [...], "tables": { "<baseId>": [...] } }`.
/// Used for offline generation and as the test double for the trait.
#[derive(Debug)]
pub struct JsonSource {
    snapshot: Snapshot,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    bases: Vec<Base>,
    tables: HashMap<String, Vec<Table>>,
}

impl JsonSource {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let snapshot = serde_json::from_str(contents).context("malformed metadata snapshot")?;
        Ok(Self { snapshot })
    }
}

#[async_trait]
impl MetadataSource for JsonSource {
    async fn list_bases(&self) -> Result<Vec<Base>> {
        Ok(self.snapshot.bases.clone())
    }

    async fn list_tables(&self, base_id: &str) -> Result<Vec<Table>> {
        self.snapshot
            .tables
            .get(base_id)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no table metadata for base {base_id}"))
    }
}
