//! Atomic grouping of ordered-by-user lists.
//!
//! A changed ordered list is republished whole: one atomic notification
//! whose prefix is the list's parent container and whose updates are every
//! leaf of every entry, in list order, relative to that prefix. Entries
//! removed from the list are deleted at their entry path. A list that no
//! longer exists is deleted leaf by leaf.

use crate::diff::compare::OrderedListChange;
use crate::diff::extract::extract_ordered_entries;
use crate::diff::options::DiffOptions;
use crate::errors::{Result, YangDiffError};
use crate::path::Path;
use crate::tree::{ListEntry, Node, OrderedList};
use crate::wire::{encode_typed_value, Notification, Update};

/// Grouper output: atomic messages plus deletes for the trailing
/// non-atomic message.
#[derive(Debug, Default)]
pub struct AtomicGroup {
    pub notifications: Vec<Notification>,
    pub deletes: Vec<Path>,
}

/// Build the atomic notification for an ordered list at `path`.
///
/// Returns `None` for an empty list.
///
/// # Errors
///
/// `NestedOrderedList` if an entry holds an ordered list of its own;
/// `ValueEncoding` if an entry leaf cannot be encoded.
pub fn atomic_notification(
    path: &Path,
    list: &OrderedList,
    opts: &DiffOptions,
) -> Result<Option<Notification>> {
    if list.is_empty() {
        return Ok(None);
    }
    let prefix = path.parent().unwrap_or_else(Path::root);
    let leaves = extract_ordered_entries(path, list, opts)?;

    let mut update = Vec::with_capacity(leaves.len());
    for (spec, node) in leaves.iter() {
        let Node::Leaf(value) = node else {
            return Err(YangDiffError::Internal {
                message: format!("ordered list entry at {} yielded a non-leaf node", path),
            });
        };
        for absolute in &spec.paths {
            let relative = absolute
                .strip_prefix(&prefix)
                .ok_or_else(|| YangDiffError::Internal {
                    message: format!("{} is not below atomic prefix {}", absolute, prefix),
                })?;
            update.push(Update {
                val: encode_typed_value(absolute, value)?,
                path: relative,
            });
        }
    }

    Ok(Some(Notification {
        prefix: Some(prefix),
        atomic: true,
        update,
        delete: Vec::new(),
    }))
}

/// Entry paths (`…/list[key=v]`) of entries in `original` that `modified`
/// no longer holds.
///
/// # Errors
///
/// Key accessor or stringifier failures.
pub fn removed_entry_paths(
    path: &Path,
    original: &OrderedList,
    modified: &OrderedList,
) -> Result<Vec<Path>> {
    let mut out = Vec::new();
    for entry in original.entries() {
        let key = entry.key_strings()?;
        if !modified.contains_key(&key) {
            out.push(path.clone().with_last_keys(&key));
        }
    }
    Ok(out)
}

/// Leaf paths of every entry of a list that was deleted outright.
///
/// # Errors
///
/// As [`atomic_notification`].
pub fn leaf_delete_paths(path: &Path, list: &OrderedList, opts: &DiffOptions) -> Result<Vec<Path>> {
    let leaves = extract_ordered_entries(path, list, opts)?;
    Ok(leaves
        .iter()
        .flat_map(|(spec, _)| spec.paths.iter().cloned())
        .collect())
}

/// Group every ordered-list change reported by the comparator.
///
/// # Errors
///
/// The first failure of [`atomic_notification`], [`removed_entry_paths`]
/// or [`leaf_delete_paths`].
pub fn group(changes: &[OrderedListChange<'_>], opts: &DiffOptions) -> Result<AtomicGroup> {
    let mut out = AtomicGroup::default();
    for change in changes {
        match (change.original, change.modified) {
            (original, Some(modified)) => {
                if let Some(notification) = atomic_notification(&change.path, modified, opts)? {
                    out.notifications.push(notification);
                }
                if let Some(original) = original {
                    out.deletes
                        .extend(removed_entry_paths(&change.path, original, modified)?);
                }
            }
            (Some(original), None) => {
                out.deletes
                    .extend(leaf_delete_paths(&change.path, original, opts)?);
            }
            (None, None) => {}
        }
    }
    tracing::debug!(
        changes = changes.len(),
        atomic = out.notifications.len(),
        deletes = out.deletes.len(),
        "grouped ordered lists"
    );
    Ok(out)
}
