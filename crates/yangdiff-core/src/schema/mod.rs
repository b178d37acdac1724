//! Schema descriptor tables.
//!
//! Each record type of a YANG-derived model is described by a
//! [`RecordSchema`]: an ordered table of [`FieldSchema`] entries, each
//! declaring the relative schema paths (aliases) the field is reachable
//! through, an optional shadow alias set, and the kind of node it holds.
//! These tables are normally produced by a code generator; tests and small
//! agents can build them by hand with the builder methods below.

use std::collections::BTreeMap;
use std::sync::Arc;

/// A relative schema path, one entry per segment (`"config/name"` → `["config", "name"]`).
pub type SchemaPath = Vec<String>;

/// Split a `/`-separated relative path into segments.
///
/// Empty segments are dropped, so `"config/name"`, `"/config/name"` and
/// `"config//name"` all yield the same path.
pub fn schema_path(spec: &str) -> SchemaPath {
    spec.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// What a field holds.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A scalar, enumerated or union value
    Leaf,
    /// An ordered sequence of scalars
    LeafList,
    /// A nested record
    Container(Arc<RecordSchema>),
    /// A keyed collection of records; `ordered` marks ordered-by-user lists
    List {
        entry: Arc<RecordSchema>,
        ordered: bool,
    },
    /// Internally reserved metadata; never part of the data tree
    Annotation,
}

impl FieldKind {
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Leaf => "leaf",
            FieldKind::LeafList => "leaf-list",
            FieldKind::Container(_) => "container",
            FieldKind::List { ordered: false, .. } => "list",
            FieldKind::List { ordered: true, .. } => "ordered list",
            FieldKind::Annotation => "annotation",
        }
    }
}

/// One row of a record's descriptor table.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub kind: FieldKind,
    /// Primary aliases, in declaration order
    pub aliases: Vec<SchemaPath>,
    /// Alternate aliases used when shadow paths are preferred
    pub shadow_aliases: Vec<SchemaPath>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: FieldKind, aliases: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind,
            aliases: aliases.iter().map(|a| schema_path(a)).collect(),
            shadow_aliases: Vec::new(),
        }
    }

    pub fn leaf(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self::new(name, FieldKind::Leaf, aliases)
    }

    pub fn leaf_list(name: impl Into<String>, aliases: &[&str]) -> Self {
        Self::new(name, FieldKind::LeafList, aliases)
    }

    pub fn container(name: impl Into<String>, aliases: &[&str], schema: Arc<RecordSchema>) -> Self {
        Self::new(name, FieldKind::Container(schema), aliases)
    }

    pub fn list(name: impl Into<String>, aliases: &[&str], entry: Arc<RecordSchema>) -> Self {
        Self::new(
            name,
            FieldKind::List {
                entry,
                ordered: false,
            },
            aliases,
        )
    }

    pub fn ordered_list(
        name: impl Into<String>,
        aliases: &[&str],
        entry: Arc<RecordSchema>,
    ) -> Self {
        Self::new(
            name,
            FieldKind::List {
                entry,
                ordered: true,
            },
            aliases,
        )
    }

    /// A reserved metadata field; it declares no aliases.
    pub fn annotation(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Annotation, &[])
    }

    /// Declare the shadow alias set of this field.
    pub fn with_shadow(mut self, aliases: &[&str]) -> Self {
        self.shadow_aliases = aliases.iter().map(|a| schema_path(a)).collect();
        self
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self.kind, FieldKind::Annotation)
    }
}

/// Descriptor table for one record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    pub name: String,
    pub fields: Vec<FieldSchema>,
    /// Names of the key fields, for records used as list entries
    pub keys: Vec<String>,
}

impl RecordSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            keys: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare the key fields of a list-entry record.
    pub fn keys(mut self, keys: &[&str]) -> Self {
        self.keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn build(self) -> Arc<RecordSchema> {
        Arc::new(self)
    }

    pub fn lookup(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_keyed(&self) -> bool {
        !self.keys.is_empty()
    }
}

/// An enumerated type: integer values and their wire names.
///
/// The value 0 is reserved for "unset" and must not be declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    variants: BTreeMap<i64, String>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, variants: &[(i64, &str)]) -> Arc<EnumType> {
        Arc::new(Self {
            name: name.into(),
            variants: variants
                .iter()
                .map(|(v, n)| (*v, n.to_string()))
                .collect(),
        })
    }

    /// Wire name of an enum value, if defined
    pub fn name_of(&self, value: i64) -> Option<&str> {
        self.variants.get(&value).map(String::as_str)
    }
}
