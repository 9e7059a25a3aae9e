//! The emission driver.
//!
//! Consumes the per-table outputs of the translation engine and turns them
//! into rendered source files via explicit key-value interpolation maps. The
//! translation core stays templating-agnostic; everything string-shaped
//! happens here.

mod imports;
pub use imports::Imports;

mod interpolate;
pub use interpolate::{Interpolations, Template};

mod table;
pub use table::generate_table;

/// One rendered output file, path relative to the table's output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub contents: String,
}
