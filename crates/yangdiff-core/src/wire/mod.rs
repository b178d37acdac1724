//! Protocol-level change messages.
//!
//! [`Notification`] mirrors the telemetry protocol's notification message:
//! an optional prefix, an atomic flag, `(path, value)` updates and deleted
//! paths. Leaf values travel as [`TypedValue`]s produced by
//! [`encode_typed_value`].

use crate::errors::{Result, YangDiffError};
use crate::path::Path;
use crate::tree::LeafValue;
use serde::{Deserialize, Serialize};

/// YANG decimal64 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decimal64 {
    pub digits: i64,
    pub precision: u32,
}

/// A leaf-list on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarArray {
    pub element: Vec<TypedValue>,
}

/// The protocol's typed value union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypedValue {
    StringVal(String),
    IntVal(i64),
    UintVal(u64),
    BoolVal(bool),
    BytesVal(Vec<u8>),
    DoubleVal(f64),
    DecimalVal(Decimal64),
    LeaflistVal(ScalarArray),
}

/// A single `(path, value)` update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub path: Path,
    pub val: TypedValue,
}

/// A change message.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Path>,
    #[serde(default)]
    pub atomic: bool,
    #[serde(default)]
    pub update: Vec<Update>,
    #[serde(default)]
    pub delete: Vec<Path>,
}

impl Notification {
    pub fn is_empty(&self) -> bool {
        self.update.is_empty() && self.delete.is_empty()
    }

    /// Canonical strings of the update paths, relative to the prefix.
    pub fn update_paths(&self) -> Vec<String> {
        self.update.iter().map(|u| u.path.to_string()).collect()
    }

    pub fn delete_paths(&self) -> Vec<String> {
        self.delete.iter().map(Path::to_string).collect()
    }

    /// The value updated at a canonical path string, if any.
    pub fn value_at(&self, path: &str) -> Option<&TypedValue> {
        self.update
            .iter()
            .find(|u| u.path.to_string() == path)
            .map(|u| &u.val)
    }

    /// JSON rendering for diagnostics and golden files.
    ///
    /// # Errors
    ///
    /// `Serialization` if the message cannot be rendered.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn encoding_error(path: &Path, value: &LeafValue, reason: &str) -> YangDiffError {
    YangDiffError::ValueEncoding {
        path: path.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Encode a leaf value as a wire value.
///
/// Enums encode as their name, `empty` as `BoolVal(true)`, unions as the
/// value they hold.
///
/// # Errors
///
/// `ValueEncoding` for enum values without a defined name and for
/// leaf-lists that contain leaf-lists.
pub fn encode_typed_value(path: &Path, value: &LeafValue) -> Result<TypedValue> {
    match value {
        LeafValue::String(s) => Ok(TypedValue::StringVal(s.clone())),
        LeafValue::Bool(b) => Ok(TypedValue::BoolVal(*b)),
        LeafValue::Int(i) => Ok(TypedValue::IntVal(*i)),
        LeafValue::Uint(u) => Ok(TypedValue::UintVal(*u)),
        LeafValue::Float(f) => Ok(TypedValue::DoubleVal(*f)),
        LeafValue::Decimal { digits, precision } => Ok(TypedValue::DecimalVal(Decimal64 {
            digits: *digits,
            precision: *precision,
        })),
        LeafValue::Bytes(b) => Ok(TypedValue::BytesVal(b.clone())),
        LeafValue::Empty => Ok(TypedValue::BoolVal(true)),
        LeafValue::Enum(e) => e
            .name()
            .map(|n| TypedValue::StringVal(n.to_string()))
            .ok_or_else(|| encoding_error(path, value, "enum value has no defined name")),
        LeafValue::Union(inner) => encode_typed_value(path, inner),
        LeafValue::LeafList(items) => {
            let element = items
                .iter()
                .map(|item| match item {
                    LeafValue::LeafList(_) => {
                        Err(encoding_error(path, value, "leaf-list elements must be scalars"))
                    }
                    scalar => encode_typed_value(path, scalar),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(TypedValue::LeaflistVal(ScalarArray { element }))
        }
    }
}
