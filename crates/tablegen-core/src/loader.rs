use crate::config::Config;
use crate::schema::{Base, Table};
use crate::source::MetadataSource;
use crate::Result;
use anyhow::Context;
use std::time::Duration;

/// A base with its full table metadata fetched.
#[derive(Debug, Clone)]
pub struct LoadedBase {
    pub base: Base,
    pub tables: Vec<Table>,
}

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// List the bases the run should process.
///
/// The base listing is the only call the whole run depends on, so a failure
/// here is fatal. Config filtering happens after the fetch: an empty config
/// selects everything.
pub async fn select_bases(
    source: &dyn MetadataSource,
    config: &Config,
    timeout: Duration,
) -> Result<Vec<Base>> {
    let bases = tokio::time::timeout(timeout, source.list_bases())
        .await
        .context("timed out listing bases")??;

    let selected: Vec<Base> = bases
        .into_iter()
        .filter(|base| config.selects(base))
        .collect();
    tracing::info!(count = selected.len(), "bases selected for generation");
    Ok(selected)
}

/// Fetch one base's tables.
///
/// Failures (including timeout) are scoped to this base: the caller skips it
/// and keeps generating for its siblings.
pub async fn load_base(
    source: &dyn MetadataSource,
    base: Base,
    timeout: Duration,
) -> Result<LoadedBase> {
    let tables = tokio::time::timeout(timeout, source.list_tables(&base.id))
        .await
        .with_context(|| format!("timed out listing tables for base {}", base.id))?
        .with_context(|| format!("failed to list tables for base {}", base.id))?;

    tracing::debug!(base = %base.name, tables = tables.len(), "loaded base metadata");
    Ok(LoadedBase { base, tables })
}
