//! Data tree snapshots.
//!
//! A snapshot is a [`Record`] whose fields hold [`Node`]s. Records are
//! checked against their [`RecordSchema`] as values are set, so a tree that
//! exists is always shaped like its schema. Snapshots are plain values: the
//! diff engine only ever borrows them.

pub mod keys;

use crate::errors::{Result, YangDiffError};
use crate::schema::{EnumType, FieldKind, RecordSchema};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

pub use keys::{key_value_as_string, render_key_label, EntryKey, ListEntry};

/// A value of an enumerated type. `0` means unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub ty: Arc<EnumType>,
    pub value: i64,
}

impl EnumValue {
    pub fn new(ty: &Arc<EnumType>, value: i64) -> Self {
        Self {
            ty: Arc::clone(ty),
            value,
        }
    }

    pub fn is_unset(&self) -> bool {
        self.value == 0
    }

    pub fn name(&self) -> Option<&str> {
        self.ty.name_of(self.value)
    }
}

/// Scalar, leaf-list, enumerated and union leaf values.
#[derive(Debug, Clone, PartialEq)]
pub enum LeafValue {
    String(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    /// YANG decimal64: `digits * 10^-precision`
    Decimal { digits: i64, precision: u32 },
    Bytes(Vec<u8>),
    /// YANG `empty`: presence only
    Empty,
    Enum(EnumValue),
    /// A value held through a union type
    Union(Box<LeafValue>),
    LeafList(Vec<LeafValue>),
}

impl LeafValue {
    pub fn string(s: impl Into<String>) -> Self {
        LeafValue::String(s.into())
    }

    pub fn union(inner: LeafValue) -> Self {
        LeafValue::Union(Box::new(inner))
    }

    /// True for an enum (possibly behind one union wrapper) holding 0.
    pub fn is_unset_enum(&self) -> bool {
        let unwrapped = match self {
            LeafValue::Union(inner) => inner.as_ref(),
            other => other,
        };
        matches!(unwrapped, LeafValue::Enum(e) if e.is_unset())
    }

    /// Values that carry no data and are treated as absent.
    pub fn is_empty_value(&self) -> bool {
        matches!(self, LeafValue::LeafList(items) if items.is_empty())
    }
}

impl fmt::Display for LeafValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeafValue::String(s) => write!(f, "{:?}", s),
            LeafValue::Bool(b) => write!(f, "{}", b),
            LeafValue::Int(i) => write!(f, "{}", i),
            LeafValue::Uint(u) => write!(f, "{}", u),
            LeafValue::Float(x) => write!(f, "{}", x),
            LeafValue::Decimal { digits, precision } => {
                write!(f, "{}e-{}", digits, precision)
            }
            LeafValue::Bytes(b) => write!(f, "bytes[{}]", b.len()),
            LeafValue::Empty => f.write_str("empty"),
            LeafValue::Enum(e) => match e.name() {
                Some(name) => f.write_str(name),
                None => write!(f, "{}({})", e.ty.name, e.value),
            },
            LeafValue::Union(inner) => inner.fmt(f),
            LeafValue::LeafList(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    item.fmt(f)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A node of the data tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf(LeafValue),
    Container(Record),
    List(KeyedList),
    OrderedList(OrderedList),
}

impl From<LeafValue> for Node {
    fn from(value: LeafValue) -> Self {
        Node::Leaf(value)
    }
}

impl From<Record> for Node {
    fn from(record: Record) -> Self {
        Node::Container(record)
    }
}

impl From<KeyedList> for Node {
    fn from(list: KeyedList) -> Self {
        Node::List(list)
    }
}

impl From<OrderedList> for Node {
    fn from(list: OrderedList) -> Self {
        Node::OrderedList(list)
    }
}

/// An instance of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    fields: BTreeMap<String, Node>,
}

impl Record {
    pub fn new(schema: &Arc<RecordSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            fields: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    pub fn type_name(&self) -> &str {
        &self.schema.name
    }

    pub fn get(&self, field: &str) -> Option<&Node> {
        self.fields.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Node> {
        self.fields.get_mut(field)
    }

    /// The leaf value of a field, if it holds one.
    pub fn leaf(&self, field: &str) -> Option<&LeafValue> {
        match self.fields.get(field) {
            Some(Node::Leaf(v)) => Some(v),
            _ => None,
        }
    }

    /// Set a field, checking it against the schema.
    ///
    /// # Errors
    ///
    /// - `FieldNotInSchema` if the record type declares no such field
    /// - `FieldKindMismatch` if the node does not match the declared kind
    pub fn set(&mut self, field: &str, node: impl Into<Node>) -> Result<()> {
        let node = node.into();
        let decl = self
            .schema
            .lookup(field)
            .ok_or_else(|| YangDiffError::FieldNotInSchema {
                record: self.schema.name.clone(),
                field: field.to_string(),
            })?;

        let fits = match (&decl.kind, &node) {
            (FieldKind::Leaf, Node::Leaf(v)) => !matches!(v, LeafValue::LeafList(_)),
            (FieldKind::LeafList, Node::Leaf(LeafValue::LeafList(_))) => true,
            (FieldKind::Container(s), Node::Container(r)) => s.name == r.schema.name,
            (FieldKind::List { entry, ordered: false }, Node::List(l)) => {
                entry.name == l.entry_schema.name
            }
            (FieldKind::List { entry, ordered: true }, Node::OrderedList(l)) => {
                entry.name == l.entry_schema.name
            }
            (FieldKind::Annotation, Node::Leaf(_)) => true,
            _ => false,
        };
        if !fits {
            return Err(YangDiffError::FieldKindMismatch {
                record: self.schema.name.clone(),
                field: field.to_string(),
                expected: decl.kind.describe().to_string(),
            });
        }

        self.fields.insert(field.to_string(), node);
        Ok(())
    }

    /// Builder form of [`Record::set`].
    pub fn with(mut self, field: &str, node: impl Into<Node>) -> Result<Self> {
        self.set(field, node)?;
        Ok(self)
    }

    pub fn clear(&mut self, field: &str) -> Option<Node> {
        self.fields.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn check_entry_schema(expected: &RecordSchema, entry: &Record) -> Result<()> {
    if expected.name != entry.schema.name {
        return Err(YangDiffError::FieldKindMismatch {
            record: expected.name.clone(),
            field: entry.schema.name.clone(),
            expected: format!("entries of type {}", expected.name),
        });
    }
    Ok(())
}

/// A keyed list whose entry order carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedList {
    entry_schema: Arc<RecordSchema>,
    entries: BTreeMap<EntryKey, Record>,
}

impl KeyedList {
    pub fn new(entry_schema: &Arc<RecordSchema>) -> Self {
        Self {
            entry_schema: Arc::clone(entry_schema),
            entries: BTreeMap::new(),
        }
    }

    /// Insert an entry under its key.
    ///
    /// # Errors
    ///
    /// Fails if the entry cannot produce its key, or the key is taken.
    pub fn insert(&mut self, entry: Record) -> Result<()> {
        check_entry_schema(&self.entry_schema, &entry)?;
        let key = entry.key_strings()?;
        if self.entries.contains_key(&key) {
            return Err(YangDiffError::DuplicateListKey {
                record: self.entry_schema.name.clone(),
                key: render_key_label(&key),
            });
        }
        self.entries.insert(key, entry);
        Ok(())
    }

    pub fn with(mut self, entry: Record) -> Result<Self> {
        self.insert(entry)?;
        Ok(self)
    }

    pub fn entries(&self) -> impl Iterator<Item = &Record> {
        self.entries.values()
    }

    pub fn get(&self, key: &EntryKey) -> Option<&Record> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &EntryKey) -> Option<Record> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An ordered-by-user list: entry order is part of the data.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList {
    entry_schema: Arc<RecordSchema>,
    entries: Vec<Record>,
    keys: BTreeSet<EntryKey>,
}

impl OrderedList {
    pub fn new(entry_schema: &Arc<RecordSchema>) -> Self {
        Self {
            entry_schema: Arc::clone(entry_schema),
            entries: Vec::new(),
            keys: BTreeSet::new(),
        }
    }

    /// Append an entry at the end of the list.
    ///
    /// # Errors
    ///
    /// Fails if the entry cannot produce its key, or the key is taken.
    pub fn append(&mut self, entry: Record) -> Result<()> {
        check_entry_schema(&self.entry_schema, &entry)?;
        let key = entry.key_strings()?;
        if self.keys.contains(&key) {
            return Err(YangDiffError::DuplicateListKey {
                record: self.entry_schema.name.clone(),
                key: render_key_label(&key),
            });
        }
        self.keys.insert(key);
        self.entries.push(entry);
        Ok(())
    }

    pub fn with(mut self, entry: Record) -> Result<Self> {
        self.append(entry)?;
        Ok(self)
    }

    pub fn entries(&self) -> &[Record] {
        &self.entries
    }

    pub fn contains_key(&self, key: &EntryKey) -> bool {
        self.keys.contains(key)
    }

    /// Remove the entry with the given key, keeping the order of the rest.
    pub fn remove(&mut self, key: &EntryKey) -> Option<Record> {
        if !self.keys.remove(key) {
            return None;
        }
        let idx = self
            .entries
            .iter()
            .position(|e| e.key_strings().ok().as_ref() == Some(key))?;
        Some(self.entries.remove(idx))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
