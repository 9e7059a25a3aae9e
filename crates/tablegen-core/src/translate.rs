//! The field/column translation engine.
//!
//! Takes a table's raw field metadata plus the full set of tables in the base
//! and deterministically derives, per field: a canonical property name, a
//! validation/parsing rule, a lookup-flattening decision, and a
//! queryable-field classification. Every function here is pure: same inputs,
//! same outputs, no caching, no shared state.

mod classify;
pub use classify::{classify, Classified};

mod coerce;
pub use coerce::apply_override;

mod property;
pub use property::{derive_property_name, property_name, PropertyName};

mod queryable;
pub use queryable::queryable_fields;

mod resolve;
pub use resolve::{resolve_root, should_flatten_lookup, MAX_DEPTH};

mod synth;
pub use synth::{synthesize, FieldSchema, Validation};
