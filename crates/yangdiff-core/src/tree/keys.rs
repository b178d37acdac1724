//! List keys: the key accessor and the key stringifier.

use super::{LeafValue, Node, Record};
use crate::errors::{Result, YangDiffError};
use std::collections::BTreeMap;

/// Identity of a list entry: its key fields rendered as wire strings.
pub type EntryKey = BTreeMap<String, String>;

/// Capability of records that are entries of a keyed list.
pub trait ListEntry {
    /// The declared key fields of this entry, by key name.
    ///
    /// # Errors
    ///
    /// `InvalidKeyMap` if the record declares no keys, or a key field is
    /// unset or not a leaf.
    fn key_map(&self) -> Result<BTreeMap<String, &LeafValue>>;

    /// Key fields rendered as their canonical wire strings.
    ///
    /// # Errors
    ///
    /// As [`ListEntry::key_map`], plus `KeyStringFailure` for keys that
    /// have no string rendering.
    fn key_strings(&self) -> Result<EntryKey> {
        self.key_map()?
            .into_iter()
            .map(|(name, value)| {
                let rendered = key_value_as_string(&name, value)?;
                Ok((name, rendered))
            })
            .collect()
    }

    /// `k1=v1,k2=v2` label for messages, with backslash, `,` and `=` escaped.
    fn key_label(&self) -> Result<String> {
        Ok(render_key_label(&self.key_strings()?))
    }
}

/// Render an [`EntryKey`] as a `k1=v1,k2=v2` label.
pub fn render_key_label(key: &EntryKey) -> String {
    let mut out = String::new();
    for (i, (k, v)) in key.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_escaped(&mut out, k);
        out.push('=');
        push_escaped(&mut out, v);
    }
    out
}

fn push_escaped(out: &mut String, s: &str) {
    for c in s.chars() {
        if matches!(c, '\\' | ',' | '=') {
            out.push('\\');
        }
        out.push(c);
    }
}

impl ListEntry for Record {
    fn key_map(&self) -> Result<BTreeMap<String, &LeafValue>> {
        let schema = self.schema();
        if !schema.is_keyed() {
            return Err(YangDiffError::InvalidKeyMap {
                record: schema.name.clone(),
                reason: "record declares no key fields".to_string(),
            });
        }

        let mut keys = BTreeMap::new();
        for key in &schema.keys {
            match self.get(key) {
                Some(Node::Leaf(value)) => {
                    keys.insert(key.clone(), value);
                }
                Some(_) => {
                    return Err(YangDiffError::InvalidKeyMap {
                        record: schema.name.clone(),
                        reason: format!("key field {} is not a leaf", key),
                    })
                }
                None => {
                    return Err(YangDiffError::InvalidKeyMap {
                        record: schema.name.clone(),
                        reason: format!("key field {} is not set", key),
                    })
                }
            }
        }
        Ok(keys)
    }
}

/// Render a key value as its canonical wire string.
///
/// # Errors
///
/// `KeyStringFailure` for floating point, decimal, binary, empty and
/// leaf-list keys, and for enum values without a defined name.
pub fn key_value_as_string(key: &str, value: &LeafValue) -> Result<String> {
    let unsupported = |what: &str| YangDiffError::KeyStringFailure {
        key: key.to_string(),
        reason: format!("{} values cannot be used as list keys", what),
    };

    match value {
        LeafValue::String(s) => Ok(s.clone()),
        LeafValue::Bool(b) => Ok(b.to_string()),
        LeafValue::Int(i) => Ok(i.to_string()),
        LeafValue::Uint(u) => Ok(u.to_string()),
        LeafValue::Enum(e) => e.name().map(str::to_string).ok_or_else(|| {
            YangDiffError::KeyStringFailure {
                key: key.to_string(),
                reason: format!("{} has no name for value {}", e.ty.name, e.value),
            }
        }),
        LeafValue::Union(inner) => key_value_as_string(key, inner),
        LeafValue::Float(_) => Err(unsupported("floating point")),
        LeafValue::Decimal { .. } => Err(unsupported("decimal64")),
        LeafValue::Bytes(_) => Err(unsupported("binary")),
        LeafValue::Empty => Err(unsupported("empty")),
        LeafValue::LeafList(_) => Err(unsupported("leaf-list")),
    }
}
