pub mod config;
pub use config::Config;

pub mod loader;
pub use loader::LoadedBase;

pub mod mapping;
pub use mapping::{ColumnMapping, TableMapping};

pub mod schema;
pub use schema::{Base, Field, FieldType, Table, View};

pub mod source;
pub use source::{JsonSource, MetadataSource};

pub mod translate;

#[cfg(test)]
pub(crate) mod test_util;

/// A Result type alias that uses [`anyhow::Error`].
pub type Result<T> = anyhow::Result<T>;
