//! Leaf-set comparison.
//!
//! Both leaf-sets are flattened to maps keyed by canonical path string, one
//! entry per alias rendering, so every alias takes part in matching on its
//! own. Scalar changes become updates and deletes; ordered lists reported as
//! leaves are routed to the atomic grouper as [`OrderedListChange`]s.

use crate::diff::extract::LeafSet;
use crate::diff::options::DiffOptions;
use crate::errors::{Result, YangDiffError};
use crate::path::Path;
use crate::tree::{Node, OrderedList};
use crate::wire::{encode_typed_value, Update};
use std::collections::BTreeMap;

/// An ordered list whose content differs between the two snapshots.
///
/// `modified` is `None` when the list only exists in the original.
#[derive(Debug, Clone)]
pub struct OrderedListChange<'a> {
    pub path: Path,
    pub original: Option<&'a OrderedList>,
    pub modified: Option<&'a OrderedList>,
}

/// Comparator output.
#[derive(Debug, Default)]
pub struct Comparison<'a> {
    pub updates: Vec<Update>,
    pub deletes: Vec<Path>,
    pub ordered: Vec<OrderedListChange<'a>>,
}

impl Comparison<'_> {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deletes.is_empty() && self.ordered.is_empty()
    }
}

type StringPathMap<'s, 'a> = BTreeMap<String, (&'s Path, &'a Node)>;

fn to_string_path_map<'s, 'a>(set: &'s LeafSet<'a>) -> StringPathMap<'s, 'a> {
    let mut map = BTreeMap::new();
    for (spec, node) in set.iter() {
        for path in &spec.paths {
            map.entry(path.to_string()).or_insert((path, node));
        }
    }
    map
}

/// Compare two leaf-sets.
///
/// # Errors
///
/// `ValueEncoding` if a changed leaf cannot be encoded; `Internal` if a
/// leaf-set holds a container or keyed list.
pub fn compare<'a>(
    original: &LeafSet<'a>,
    modified: &LeafSet<'a>,
    opts: &DiffOptions,
) -> Result<Comparison<'a>> {
    let orig_map = to_string_path_map(original);
    let mod_map = to_string_path_map(modified);
    let mut out = Comparison::default();

    for (key, (path, orig_node)) in &orig_map {
        match mod_map.get(key) {
            Some((_, mod_node)) => {
                if orig_node != mod_node {
                    emit_update(&mut out, path, Some(*orig_node), *mod_node)?;
                }
            }
            None => match *orig_node {
                Node::OrderedList(list) => out.ordered.push(OrderedListChange {
                    path: (*path).clone(),
                    original: Some(list),
                    modified: None,
                }),
                _ => out.deletes.push((*path).clone()),
            },
        }
    }

    if !opts.ignore_additions {
        for (key, (path, mod_node)) in &mod_map {
            if !orig_map.contains_key(key) {
                emit_update(&mut out, path, None, *mod_node)?;
            }
        }
    }

    tracing::debug!(
        orig_paths = orig_map.len(),
        mod_paths = mod_map.len(),
        updates = out.updates.len(),
        deletes = out.deletes.len(),
        ordered = out.ordered.len(),
        "compared leaf sets"
    );
    Ok(out)
}

fn emit_update<'a>(
    out: &mut Comparison<'a>,
    path: &Path,
    orig_node: Option<&'a Node>,
    mod_node: &'a Node,
) -> Result<()> {
    match mod_node {
        Node::Leaf(value) => {
            out.updates.push(Update {
                path: path.clone(),
                val: encode_typed_value(path, value)?,
            });
            Ok(())
        }
        Node::OrderedList(list) => {
            let original = match orig_node {
                Some(Node::OrderedList(orig)) => Some(orig),
                _ => None,
            };
            out.ordered.push(OrderedListChange {
                path: path.clone(),
                original,
                modified: Some(list),
            });
            Ok(())
        }
        Node::Container(_) | Node::List(_) => Err(YangDiffError::Internal {
            message: format!("leaf set holds a non-leaf node at {}", path),
        }),
    }
}
