use super::{resolve_root, should_flatten_lookup, MAX_DEPTH};
use crate::schema::{Field, FieldType, Table};
use std::collections::HashSet;
use std::fmt;

/// The validation and typing surface derived for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    /// Response-side parsing rule. Rendered nullish: the remote API omits
    /// empty fields, and absence must never be a validation failure.
    pub validation: Validation,

    /// Request-side rule, present only for directly editable fields. Record
    /// links shrink to a shallow `{id}` reference on the request side.
    pub request_validation: Option<Validation>,
}

/// A validation rule, rendered to the emitted schema language via `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Str,
    Email,
    Url,
    Number,
    Boolean,
    Any,
    /// Structured attachment shape, emitted as a shared named schema.
    Attachment,
    /// `{ label, url }`.
    Button,
    /// Full linked-record shape: the record id plus the lookup fields chained
    /// off the same link, keyed by their derived property names.
    LinkedRecord {
        single: bool,
        children: Vec<(String, Validation)>,
    },
    /// Shallow `{id}` reference used on the request side of record links.
    RecordRef { single: bool },
    Array(Box<Validation>),
    /// Formula result unioned with the computed-error sentinel shape.
    Union(Box<Validation>, Box<Validation>),
    /// `{ specialValue }`, the shape formulas yield instead of a value when
    /// their computation errors.
    FormulaError,
}

/// Derive the validation rule and property type for a field.
///
/// Reference kinds recurse: lookups unwrap to their resolved root's rule
/// (array-wrapped unless the flatten decision says scalar), formulas unwrap
/// to their declared result type unioned with the error shape, record links
/// expand to the linked-record object shape. Unrecognized types degrade to a
/// permissive `any` rule, never an error.
pub fn synthesize(field: &Field, table: &Table, all: &[Table]) -> FieldSchema {
    let validation = response_validation(field, table, all, 0);

    let request_validation = if field.ty().is_editable() {
        Some(match field.ty() {
            FieldType::MultipleRecordLinks => Validation::RecordRef {
                single: field.options.prefers_single_record_link,
            },
            _ => validation.clone(),
        })
    } else {
        None
    };

    FieldSchema {
        validation,
        request_validation,
    }
}

fn response_validation(field: &Field, table: &Table, all: &[Table], depth: usize) -> Validation {
    if depth >= MAX_DEPTH {
        return Validation::Any;
    }

    match field.ty() {
        FieldType::MultipleRecordLinks => Validation::LinkedRecord {
            single: field.options.prefers_single_record_link,
            children: link_children(field, table, all, depth),
        },
        ty if ty.is_lookup() => {
            let root = resolve_root(field, table, all);
            if root.is_lookup() {
                // Unresolved chain: permissive list.
                return Validation::Array(Box::new(Validation::Any));
            }
            let inner = leaf_validation(root, depth + 1);
            if should_flatten_lookup(field, table, all) {
                inner
            } else {
                Validation::Array(Box::new(inner))
            }
        }
        FieldType::Formula => formula_validation(field),
        ty => base_validation(ty),
    }
}

/// Lookup fields on `table` riding the given link, as (property key, rule)
/// pairs for the linked-record object shape.
///
/// Candidates mirror the classifier's lookup set: name-sorted, then
/// deduplicated on the shared target so two lookups over the same reference
/// cannot emit a duplicate object key.
fn link_children(
    link: &Field,
    table: &Table,
    all: &[Table],
    depth: usize,
) -> Vec<(String, Validation)> {
    let mut candidates: Vec<&Field> = table
        .fields
        .iter()
        .filter(|candidate| {
            candidate.is_lookup() && candidate.link_field_id() == Some(link.id.as_str())
        })
        .collect();
    candidates.sort_by(|a, b| a.name.cmp(&b.name));

    let mut seen_targets = HashSet::new();
    candidates
        .into_iter()
        .filter(|lookup| seen_targets.insert(lookup.target_field_id()))
        .map(|lookup| {
            let root = resolve_root(lookup, table, all);
            let key = super::property_name(root, all, None).key;
            (key, leaf_validation(root, depth + 1))
        })
        .collect()
}

/// Rule for a resolved root field viewed as a per-record value.
///
/// Roots are non-lookup by construction. A record-link root stays a shallow
/// reference rather than re-expanding its own chained lookups.
fn leaf_validation(root: &Field, depth: usize) -> Validation {
    if depth >= MAX_DEPTH {
        return Validation::Any;
    }
    match root.ty() {
        FieldType::MultipleRecordLinks => Validation::RecordRef {
            single: root.options.prefers_single_record_link,
        },
        FieldType::Formula => formula_validation(root),
        ty => base_validation(ty),
    }
}

fn formula_validation(field: &Field) -> Validation {
    let result = field
        .options
        .result
        .as_ref()
        .and_then(|result| result.ty)
        .map(base_validation)
        .unwrap_or(Validation::Any);
    Validation::Union(Box::new(result), Box::new(Validation::FormulaError))
}

fn base_validation(ty: FieldType) -> Validation {
    use FieldType::*;

    match ty {
        SingleLineText | MultilineText | RichText | PhoneNumber | SingleSelect | AiText => {
            Validation::Str
        }
        Email => Validation::Email,
        Url => Validation::Url,
        Number | Percent | Currency | Rating | Count | AutoNumber => Validation::Number,
        Checkbox => Validation::Boolean,
        // Dates stay opaque strings, never parsed at this layer.
        Date | DateTime | CreatedTime | LastModifiedTime => Validation::Str,
        MultipleSelects => Validation::Array(Box::new(Validation::Str)),
        MultipleAttachments => Validation::Array(Box::new(Validation::Attachment)),
        Button => Validation::Button,
        _ => Validation::Any,
    }
}

impl FieldSchema {
    /// The response-side rule string, nullish at the top level.
    pub fn response_rule(&self) -> String {
        format!("{}.nullish()", self.validation)
    }

    pub fn request_rule(&self) -> Option<String> {
        self.request_validation
            .as_ref()
            .map(|validation| validation.to_string())
    }

    pub fn property_type(&self) -> String {
        self.validation.ts_type()
    }

    /// True if the attachment shape appears anywhere in the rule, so the
    /// emitter can collect the shared schema import.
    pub fn uses_attachment(&self) -> bool {
        self.validation.uses_attachment()
            || self
                .request_validation
                .as_ref()
                .is_some_and(Validation::uses_attachment)
    }
}

impl Validation {
    /// The emitted property type string.
    pub fn ts_type(&self) -> String {
        match self {
            Self::Str | Self::Email | Self::Url => "string".to_string(),
            Self::Number => "number".to_string(),
            Self::Boolean => "boolean".to_string(),
            Self::Any => "unknown".to_string(),
            Self::Attachment => "Attachment".to_string(),
            Self::Button => "{ label: string; url: string }".to_string(),
            Self::FormulaError => "{ specialValue: string }".to_string(),
            Self::RecordRef { single: true } => "{ id: string }".to_string(),
            Self::RecordRef { single: false } => "{ id: string }[]".to_string(),
            Self::LinkedRecord { single, children } => {
                let mut body = "{ id: string".to_string();
                for (key, child) in children {
                    body.push_str(&format!("; {key}: {} | null", child.ts_type()));
                }
                body.push_str(" }");
                if *single {
                    body
                } else {
                    format!("{body}[]")
                }
            }
            Self::Array(inner) => {
                let inner = inner.ts_type();
                if inner.contains(' ') || inner.contains('|') {
                    format!("({inner})[]")
                } else {
                    format!("{inner}[]")
                }
            }
            Self::Union(a, b) => format!("{} | {}", a.ts_type(), b.ts_type()),
        }
    }

    pub fn uses_attachment(&self) -> bool {
        match self {
            Self::Attachment => true,
            Self::Array(inner) => inner.uses_attachment(),
            Self::Union(a, b) => a.uses_attachment() || b.uses_attachment(),
            Self::LinkedRecord { children, .. } => {
                children.iter().any(|(_, child)| child.uses_attachment())
            }
            _ => false,
        }
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(fmt, "z.string()"),
            Self::Email => write!(fmt, "z.string().email()"),
            Self::Url => write!(fmt, "z.string().url()"),
            Self::Number => write!(fmt, "z.number()"),
            Self::Boolean => write!(fmt, "z.boolean()"),
            Self::Any => write!(fmt, "z.any()"),
            Self::Attachment => write!(fmt, "attachmentSchema"),
            Self::Button => write!(fmt, "z.object({{ label: z.string(), url: z.string() }})"),
            Self::FormulaError => write!(fmt, "z.object({{ specialValue: z.string() }})"),
            Self::RecordRef { single } => {
                if *single {
                    write!(fmt, "z.object({{ id: z.string() }})")
                } else {
                    write!(fmt, "z.array(z.object({{ id: z.string() }}))")
                }
            }
            Self::LinkedRecord { single, children } => {
                let mut body = "z.object({ id: z.string()".to_string();
                for (key, child) in children {
                    body.push_str(&format!(", {key}: {child}.nullish()"));
                }
                body.push_str(" })");
                if *single {
                    write!(fmt, "{body}")
                } else {
                    write!(fmt, "z.array({body})")
                }
            }
            Self::Array(inner) => write!(fmt, "z.array({inner})"),
            Self::Union(a, b) => write!(fmt, "z.union([{a}, {b}])"),
        }
    }
}
