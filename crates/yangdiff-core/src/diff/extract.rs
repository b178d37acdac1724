//! Leaf-set extraction.
//!
//! Walks a snapshot pre-order, depth-first, in schema field order, and
//! collects every populated leaf together with its resolved path-set.
//! Containers and keyed lists are never reported themselves; only their
//! descendants are. Ordered lists are either walked like keyed lists or,
//! in atomic mode, reported whole as a single leaf.

use crate::diff::options::DiffOptions;
use crate::diff::resolver::{resolve, resolve_entry, select_aliases, NodeId, PathAnnotations};
use crate::errors::{Result, YangDiffError};
use crate::path::{Path, PathSpec};
use crate::tree::{LeafValue, Node, OrderedList, Record};
use std::collections::HashSet;

/// Populated leaves of one snapshot, in traversal order.
#[derive(Debug, Default)]
pub struct LeafSet<'a> {
    leaves: Vec<(PathSpec, &'a Node)>,
}

impl<'a> LeafSet<'a> {
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathSpec, &'a Node)> + '_ {
        self.leaves.iter().map(|(spec, node)| (spec, *node))
    }

    /// The leaf recorded at a canonical path string, if any.
    pub fn get(&self, path: &str) -> Option<&'a Node> {
        self.leaves
            .iter()
            .find(|(spec, _)| spec.paths.iter().any(|p| p.to_string() == path))
            .map(|(_, node)| *node)
    }
}

/// Extract the leaf-set of a snapshot.
///
/// With `ordered_as_leaf`, every non-empty ordered list is recorded as one
/// leaf at its own path-set and its entries are not visited.
///
/// # Errors
///
/// Any alias, path or key failure aborts the extraction; no partial
/// leaf-set is returned.
pub fn extract<'a>(
    root: &'a Record,
    ordered_as_leaf: bool,
    opts: &DiffOptions,
) -> Result<LeafSet<'a>> {
    let mut walker = Walker::new(opts, ordered_as_leaf, false);
    walker.visit_record(root, None)?;
    tracing::debug!(
        record = root.type_name(),
        leaves = walker.leaves.len(),
        ordered_as_leaf,
        "extracted leaf set"
    );
    Ok(LeafSet {
        leaves: walker.leaves,
    })
}

/// Extract every leaf below the entries of an ordered list, in list order.
///
/// # Errors
///
/// `NestedOrderedList` if any entry holds a non-empty ordered list, plus the
/// failures of [`extract`].
pub fn extract_ordered_entries<'a>(
    list_path: &Path,
    list: &'a OrderedList,
    opts: &DiffOptions,
) -> Result<LeafSet<'a>> {
    let mut walker = Walker::new(opts, false, true);
    let list_id = walker
        .annotations
        .insert(PathSpec::single(list_path.clone()));
    for entry in list.entries() {
        walker.visit_entry(entry, list_id)?;
    }
    Ok(LeafSet {
        leaves: walker.leaves,
    })
}

struct Walker<'a, 'o> {
    opts: &'o DiffOptions,
    ordered_as_leaf: bool,
    reject_nested_ordered: bool,
    annotations: PathAnnotations,
    seen: HashSet<Vec<String>>,
    leaves: Vec<(PathSpec, &'a Node)>,
}

impl<'a, 'o> Walker<'a, 'o> {
    fn new(opts: &'o DiffOptions, ordered_as_leaf: bool, reject_nested_ordered: bool) -> Self {
        Self {
            opts,
            ordered_as_leaf,
            reject_nested_ordered,
            annotations: PathAnnotations::new(),
            seen: HashSet::new(),
            leaves: Vec::new(),
        }
    }

    /// Visit the fields of `record`, whose own path-set is annotated at `id`
    /// (`None` for the tree root).
    fn visit_record(&mut self, record: &'a Record, id: Option<NodeId>) -> Result<()> {
        let schema = record.schema();
        for field in &schema.fields {
            if field.is_annotation() {
                continue;
            }
            let aliases = select_aliases(&schema.name, field, self.opts)?;
            let Some(node) = record.get(&field.name) else {
                continue;
            };
            let ancestor = match id {
                Some(id) => Some(self.annotations.get(id)?),
                None => None,
            };
            let spec = resolve(ancestor, aliases, None)?;
            self.visit_node(node, spec)?;
        }
        Ok(())
    }

    fn visit_node(&mut self, node: &'a Node, spec: PathSpec) -> Result<()> {
        match node {
            Node::Leaf(value) => {
                if !is_absent(value) {
                    self.record_leaf(spec, node);
                }
                Ok(())
            }
            Node::Container(child) => {
                let id = self.annotations.insert(spec);
                self.visit_record(child, Some(id))
            }
            Node::List(list) => {
                let id = self.annotations.insert(spec);
                for entry in list.entries() {
                    self.visit_entry(entry, id)?;
                }
                Ok(())
            }
            Node::OrderedList(list) => {
                if list.is_empty() {
                    return Ok(());
                }
                if self.reject_nested_ordered {
                    return Err(YangDiffError::NestedOrderedList {
                        path: spec
                            .paths
                            .first()
                            .map(Path::to_string)
                            .unwrap_or_default(),
                    });
                }
                if self.ordered_as_leaf {
                    self.record_leaf(spec, node);
                    return Ok(());
                }
                let id = self.annotations.insert(spec);
                for entry in list.entries() {
                    self.visit_entry(entry, id)?;
                }
                Ok(())
            }
        }
    }

    fn visit_entry(&mut self, entry: &'a Record, list: NodeId) -> Result<()> {
        let spec = resolve_entry(self.annotations.get(list)?, entry)?;
        let id = self.annotations.insert(spec);
        self.visit_record(entry, Some(id))
    }

    fn record_leaf(&mut self, spec: PathSpec, node: &'a Node) {
        if !self.seen.insert(spec.canonical_strings()) {
            tracing::trace!(paths = ?spec.canonical_strings(), "alias collision, leaf already reported");
            return;
        }
        self.leaves.push((spec, node));
    }
}

/// Leaves that carry no data: empty leaf-lists and unset enums.
fn is_absent(value: &LeafValue) -> bool {
    value.is_empty_value() || value.is_unset_enum()
}
