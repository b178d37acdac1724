//! Notification assembly.

use crate::errors::{Result, YangDiffError};
use crate::path::Path;
use crate::wire::{Notification, Update};

/// Order the output messages of one diff.
///
/// Atomic notifications come first, in grouper order, followed by a single
/// non-atomic notification carrying `updates` and `deletes` when either is
/// non-empty. Replaying the list in order installs every atomic block before
/// the remaining scalar changes and deletions are applied.
pub fn assemble(
    updates: Vec<Update>,
    deletes: Vec<Path>,
    atomic: Vec<Notification>,
) -> Vec<Notification> {
    let mut out = atomic;
    if !updates.is_empty() || !deletes.is_empty() {
        out.push(Notification {
            prefix: None,
            atomic: false,
            update: updates,
            delete: deletes,
        });
    }
    out
}

/// Collapse assembled messages into the single notification a non-atomic
/// diff returns.
///
/// # Errors
///
/// `Internal` if more than one message was assembled.
pub fn single_notification(mut notifications: Vec<Notification>) -> Result<Notification> {
    match notifications.len() {
        0 => Ok(Notification::default()),
        1 => Ok(notifications.remove(0)),
        n => Err(YangDiffError::Internal {
            message: format!("non-atomic diff assembled {} notifications, expected one", n),
        }),
    }
}
