//! Diff entry points.
//!
//! [`diff`] returns exactly one non-atomic notification with ordered lists
//! flattened into ordinary leaf updates. [`diff_with_atomic`] republishes
//! every changed ordered list as its own atomic notification and returns
//! those first, followed by at most one non-atomic notification.
//!
//! Both entry points own lifecycle logging. Each call is tagged with the
//! `request_id` of its [`RequestContext`], fresh unless the caller passes
//! one through the `_in_context` variants.

use crate::diff::assemble::{assemble, single_notification};
use crate::diff::atomic::group;
use crate::diff::compare::{compare, Comparison};
use crate::diff::extract::extract;
use crate::diff::options::DiffOptions;
use crate::errors::{Result, YangDiffError};
use crate::tree::Record;
use crate::wire::Notification;
use crate::{log_op_end, log_op_error, log_op_start};
use std::sync::Arc;
use std::time::Instant;
use yangdiff_core_types::{RequestContext, TraceId};

const OP_DIFF: &str = "diff";
const OP_DIFF_WITH_ATOMIC: &str = "diff_with_atomic";

/// Compute the non-atomic notification turning `original` into `modified`.
///
/// Identical snapshots produce an empty notification.
///
/// # Errors
///
/// - `TypeMismatch`: the snapshots are of different record types
/// - `MissingSchemaPath`: a populated or unpopulated field declares no alias
/// - `InvalidKeyMap` / `KeyStringFailure`: a list entry key cannot be rendered
/// - `ValueEncoding`: a changed leaf has no wire encoding
pub fn diff(original: &Record, modified: &Record, opts: &DiffOptions) -> Result<Notification> {
    diff_in_context(&RequestContext::new(), original, modified, opts)
}

/// [`diff`] with caller-supplied correlation identifiers.
///
/// # Errors
///
/// As [`diff`].
pub fn diff_in_context(
    ctx: &RequestContext,
    original: &Record,
    modified: &Record,
    opts: &DiffOptions,
) -> Result<Notification> {
    let start = Instant::now();
    let trace_id = trace_of(ctx);
    log_op_start!(
        OP_DIFF,
        request_id = %ctx.request_id,
        trace_id = trace_id,
        record = original.type_name()
    );

    let notification = run(original, modified, false, opts)
        .and_then(single_notification)
        .map_err(|e| {
            log_op_error!(
                OP_DIFF,
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                request_id = %ctx.request_id,
                trace_id = trace_id
            );
            e
        })?;

    log_op_end!(
        OP_DIFF,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %ctx.request_id,
        trace_id = trace_id,
        updates_len = notification.update.len(),
        deletes_len = notification.delete.len()
    );
    Ok(notification)
}

/// Compute the ordered notification list turning `original` into `modified`.
///
/// Every ordered list whose content changed yields one atomic notification
/// (prefix at the list's parent, updates in list order). Entries removed
/// from such a list, and lists removed outright, are deleted in the trailing
/// non-atomic notification.
///
/// # Errors
///
/// As [`diff`], plus `NestedOrderedList` if a changed ordered list holds
/// entries with an ordered list of their own.
pub fn diff_with_atomic(
    original: &Record,
    modified: &Record,
    opts: &DiffOptions,
) -> Result<Vec<Notification>> {
    diff_with_atomic_in_context(&RequestContext::new(), original, modified, opts)
}

/// [`diff_with_atomic`] with caller-supplied correlation identifiers.
///
/// # Errors
///
/// As [`diff_with_atomic`].
pub fn diff_with_atomic_in_context(
    ctx: &RequestContext,
    original: &Record,
    modified: &Record,
    opts: &DiffOptions,
) -> Result<Vec<Notification>> {
    let start = Instant::now();
    let trace_id = trace_of(ctx);
    log_op_start!(
        OP_DIFF_WITH_ATOMIC,
        request_id = %ctx.request_id,
        trace_id = trace_id,
        record = original.type_name()
    );

    let notifications = run(original, modified, true, opts).map_err(|e| {
        log_op_error!(
            OP_DIFF_WITH_ATOMIC,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = %ctx.request_id,
            trace_id = trace_id
        );
        e
    })?;

    log_op_end!(
        OP_DIFF_WITH_ATOMIC,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = %ctx.request_id,
        trace_id = trace_id,
        atomic_len = notifications.iter().filter(|n| n.atomic).count(),
        notifications = notifications.len()
    );
    Ok(notifications)
}

fn trace_of(ctx: &RequestContext) -> &str {
    ctx.trace_id.as_ref().map(TraceId::as_str).unwrap_or_default()
}

fn run(
    original: &Record,
    modified: &Record,
    atomic: bool,
    opts: &DiffOptions,
) -> Result<Vec<Notification>> {
    check_same_type(original, modified)?;

    let orig_leaves = extract(original, atomic, opts)?;
    let mod_leaves = extract(modified, atomic, opts)?;
    tracing::debug!(
        orig_leaves = orig_leaves.len(),
        mod_leaves = mod_leaves.len(),
        atomic,
        "leaf sets ready"
    );

    let Comparison {
        updates,
        mut deletes,
        ordered,
    } = compare(&orig_leaves, &mod_leaves, opts)?;
    let grouped = group(&ordered, opts)?;
    deletes.extend(grouped.deletes);

    Ok(assemble(updates, deletes, grouped.notifications))
}

fn check_same_type(original: &Record, modified: &Record) -> Result<()> {
    let (a, b) = (original.schema(), modified.schema());
    if Arc::ptr_eq(a, b) || a == b {
        return Ok(());
    }
    Err(YangDiffError::TypeMismatch {
        original: a.name.clone(),
        modified: b.name.clone(),
    })
}
