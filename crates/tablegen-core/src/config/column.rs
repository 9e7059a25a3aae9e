use serde::Deserialize;

/// Normalized per-column override.
///
/// The raw surface accepts either a bare string (shorthand for the property
/// name) or a detailed object; both normalize to this shape, so downstream
/// merge logic never branches on the form.
#[derive(Debug, Clone, Default)]
pub struct ColumnOverride {
    /// Explicit property name. May be dotted (`parent.child`) for lookups;
    /// the terminal segment becomes the bare key.
    pub property_name: Option<String>,

    /// Post-decode coercion for the raw value.
    pub ty: Option<TypeOverride>,

    pub required: Option<bool>,
    pub editable: Option<bool>,
    pub creatable: Option<bool>,

    /// Force the single-record-link flattening decision.
    pub prefers_single: Option<bool>,
}

/// Explicit value-coercion target declared by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TypeOverride {
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "number[]")]
    NumberArray,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "string[]")]
    StringArray,
}

impl TypeOverride {
    pub fn is_array(self) -> bool {
        matches!(self, Self::NumberArray | Self::StringArray)
    }

    /// The element rule for array overrides, itself for scalar ones.
    pub fn element(self) -> Self {
        match self {
            Self::NumberArray => Self::Number,
            Self::StringArray => Self::String,
            other => other,
        }
    }

    /// The wire spelling accepted by the config surface.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::NumberArray => "number[]",
            Self::String => "string",
            Self::StringArray => "string[]",
        }
    }
}
