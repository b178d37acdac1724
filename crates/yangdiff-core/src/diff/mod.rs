//! YANG data-tree diff engine.
//!
//! Computes the change notifications that turn one snapshot into another.
//!
//! ## Entry points
//!
//! ```
//! use yangdiff_core::diff::{diff, DiffOptions};
//! use yangdiff_core::schema::{FieldSchema, RecordSchema};
//! use yangdiff_core::tree::{LeafValue, Record};
//!
//! let schema = RecordSchema::new("Device")
//!     .field(FieldSchema::leaf("str", &["str"]))
//!     .build();
//! let original = Record::new(&schema);
//! let modified = Record::new(&schema)
//!     .with("str", LeafValue::string("cabernet-sauvignon"))
//!     .unwrap();
//!
//! let n = diff(&original, &modified, &DiffOptions::default()).unwrap();
//! assert_eq!(n.update_paths(), vec!["/str"]);
//! ```
//!
//! ## Pipeline
//!
//! 1. [`resolver`] pairs each node with its path-set in a traversal-local
//!    side table.
//! 2. [`mod@extract`] collects the populated leaves of each snapshot.
//! 3. [`compare`] matches the leaf-sets by canonical path string.
//! 4. [`atomic`] republishes changed ordered lists as atomic messages.
//! 5. [`assemble`] orders the output messages.
//!
//! ## Guarantees
//!
//! - **Read-only inputs**: snapshots are never written to and may be shared
//!   by concurrent diffs.
//! - **No partial output**: the first failure aborts the call.
//! - **Determinism**: identical inputs produce identical notifications.
//!   Non-atomic update and delete order is sorted by canonical path, but
//!   callers should treat it as a set.

pub mod assemble;
pub mod atomic;
pub mod compare;
pub mod engine;
pub mod extract;
pub mod options;
pub mod resolver;

pub use engine::{diff, diff_in_context, diff_with_atomic, diff_with_atomic_in_context};
pub use extract::{extract, LeafSet};
pub use options::DiffOptions;
