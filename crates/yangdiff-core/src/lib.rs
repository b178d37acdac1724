//! yangdiff core - diffs of YANG-modelled data trees
//!
//! This crate computes telemetry change notifications between two snapshots
//! of a schema-described data tree, including:
//! - Descriptor tables for record types and their schema-path aliases
//! - A snapshot model with keyed and ordered-by-user lists
//! - Wire paths with a canonical string form and its parser
//! - Typed wire values, updates and notifications
//! - The diff engine, with and without atomic republishing of ordered lists
//! - A two-layer error facility and a structured logging facility

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod path;
pub mod schema;
pub mod tree;
pub mod wire;

pub use yangdiff_core_types;

// Re-export commonly used types
pub use diff::{diff, diff_with_atomic, DiffOptions};
pub use errors::{ExError, ExErrorKind, Result, YangDiffError};
pub use path::{Path, PathElem, PathSpec};
pub use schema::{EnumType, FieldKind, FieldSchema, RecordSchema};
pub use tree::{EnumValue, KeyedList, LeafValue, ListEntry, Node, OrderedList, Record};
pub use wire::{Notification, TypedValue, Update};
