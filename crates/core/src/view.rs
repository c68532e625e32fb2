//! View normalizer: reduces reference fields of a record to ids.
//!
//! Reference fields are declared per record type, never inferred from the
//! runtime shape of a value. A field that is not declared is copied as-is,
//! even when it happens to hold an object with an `id` key.
//!
//! Only the immediate reference is reduced: a referenced record's own
//! references are not followed.

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::identity::Identity;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Typed normalization
// ---------------------------------------------------------------------------

/// Conversion of a record into its normalized view.
///
/// Views implement this trait with `View = Self`, so normalizing a view is
/// the identity and `to_view` is idempotent.
pub trait IntoView {
    type View: Identity + Clone;

    fn to_view(&self) -> Self::View;
}

/// Reduce a single reference to the referenced record's id.
///
/// Absent references, and references to records that were never saved,
/// become `None`.
pub fn reference_id<T: Identity>(reference: Option<&T>) -> Option<DbId> {
    reference.and_then(|r| r.id())
}

/// Reduce a collection reference to the ids of the referenced records.
///
/// Unsaved records have no id to point at and are left out.
pub fn reference_ids<T: Identity>(references: &[T]) -> Vec<DbId> {
    references.iter().filter_map(|r| r.id()).collect()
}

/// Implement [`IntoView`] for a view type as a plain clone.
macro_rules! impl_view_identity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::view::IntoView for $ty {
                type View = $ty;

                fn to_view(&self) -> Self::View {
                    self.clone()
                }
            }
        )+
    };
}

pub(crate) use impl_view_identity;

// ---------------------------------------------------------------------------
// Declared reference tables
// ---------------------------------------------------------------------------

/// Whether a reference field points at one record or at a list of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Single,
    Collection,
}

/// A declared reference field, named as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceField {
    pub name: &'static str,
    pub kind: ReferenceKind,
}

impl ReferenceField {
    pub const fn single(name: &'static str) -> Self {
        Self {
            name,
            kind: ReferenceKind::Single,
        }
    }

    pub const fn collection(name: &'static str) -> Self {
        Self {
            name,
            kind: ReferenceKind::Collection,
        }
    }
}

/// Record types that publish their reference table for untyped payloads.
pub trait DeclaredReferences {
    const REFERENCES: &'static [ReferenceField];
}

// ---------------------------------------------------------------------------
// Schema-driven JSON normalization
// ---------------------------------------------------------------------------

/// Normalize a raw JSON record against a declared reference table.
///
/// - `null` and absent reference fields pass through.
/// - Numbers in reference position are treated as already-reduced ids, so a
///   view normalizes to itself.
/// - A referenced object is replaced by its `id` (`null` when it has none).
/// - Unsaved objects inside a collection reference are dropped.
///
/// Any other value in a reference position is a validation error.
pub fn normalize_value(record: &Value, references: &[ReferenceField]) -> Result<Value, CoreError> {
    let object = record.as_object().ok_or_else(|| {
        CoreError::Validation(format!(
            "record must be a JSON object, got {}",
            json_kind(record)
        ))
    })?;

    let mut view: Map<String, Value> = object.clone();
    for field in references {
        let Some(value) = object.get(field.name) else {
            continue;
        };
        let reduced = match field.kind {
            ReferenceKind::Single => reduce_single(field.name, value)?,
            ReferenceKind::Collection => reduce_collection(field.name, value)?,
        };
        view.insert(field.name.to_string(), reduced);
    }
    Ok(Value::Object(view))
}

/// Normalize every record of a JSON array (a REST list response).
pub fn normalize_list(records: &Value, references: &[ReferenceField]) -> Result<Vec<Value>, CoreError> {
    let items = records.as_array().ok_or_else(|| {
        CoreError::Validation(format!(
            "record list must be a JSON array, got {}",
            json_kind(records)
        ))
    })?;
    items
        .iter()
        .map(|item| normalize_value(item, references))
        .collect()
}

fn reduce_single(field: &str, value: &Value) -> Result<Value, CoreError> {
    match value {
        Value::Null | Value::Number(_) => Ok(value.clone()),
        Value::Object(referenced) => object_id(field, referenced),
        other => Err(not_a_reference(field, other)),
    }
}

fn reduce_collection(field: &str, value: &Value) -> Result<Value, CoreError> {
    let items = match value {
        Value::Null => return Ok(Value::Null),
        Value::Array(items) => items,
        other => return Err(not_a_reference(field, other)),
    };

    let mut ids = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Number(_) => ids.push(item.clone()),
            Value::Object(referenced) => match object_id(field, referenced)? {
                Value::Null => {}
                id => ids.push(id),
            },
            other => return Err(not_a_reference(field, other)),
        }
    }
    Ok(Value::Array(ids))
}

fn object_id(field: &str, referenced: &Map<String, Value>) -> Result<Value, CoreError> {
    match referenced.get("id") {
        None | Some(Value::Null) => Ok(Value::Null),
        Some(id @ Value::Number(_)) => Ok(id.clone()),
        Some(other) => Err(CoreError::Validation(format!(
            "field '{field}' references a record whose id is {}, expected a number",
            json_kind(other)
        ))),
    }
}

fn not_a_reference(field: &str, value: &Value) -> CoreError {
    CoreError::Validation(format!(
        "field '{field}' is declared as a reference but holds {}",
        json_kind(value)
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
