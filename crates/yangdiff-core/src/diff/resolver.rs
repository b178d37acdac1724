//! Path-set resolution.
//!
//! A node's path-set is the cross product of its ancestor's path-set and its
//! own aliases; list entries additionally key the last segment of every
//! candidate. Resolved path-sets are kept in a traversal-local side table
//! ([`PathAnnotations`]) indexed by [`NodeId`], so snapshots are never
//! written to and may be shared between concurrent diffs.

use crate::diff::options::DiffOptions;
use crate::errors::{Result, YangDiffError};
use crate::path::{Path, PathSpec};
use crate::schema::{FieldSchema, SchemaPath};
use crate::tree::{ListEntry, Record};

/// Traversal-local index of a visited container, list or list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

/// Side table of resolved path-sets for one traversal.
#[derive(Debug, Default)]
pub struct PathAnnotations {
    specs: Vec<Option<PathSpec>>,
}

impl PathAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate an id whose path-set is not known yet.
    pub fn reserve(&mut self) -> NodeId {
        self.specs.push(None);
        NodeId(self.specs.len() - 1)
    }

    pub fn annotate(&mut self, id: NodeId, spec: PathSpec) {
        if let Some(slot) = self.specs.get_mut(id.0) {
            *slot = Some(spec);
        }
    }

    /// Allocate an id and record its path-set in one step.
    pub fn insert(&mut self, spec: PathSpec) -> NodeId {
        let id = self.reserve();
        self.annotate(id, spec);
        id
    }

    /// # Errors
    ///
    /// `MissingAncestorAnnotation` if `id` was never annotated.
    pub fn get(&self, id: NodeId) -> Result<&PathSpec> {
        self.specs
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(YangDiffError::MissingAncestorAnnotation { node: id.0 })
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Pick the aliases a field is reported under.
///
/// Shadow aliases win when preferred and declared; with
/// `map_to_single_path` only the alias with the fewest segments is kept,
/// the first one declared on a tie.
///
/// # Errors
///
/// `MissingSchemaPath` if the chosen alias set is empty.
pub fn select_aliases<'f>(
    record: &str,
    field: &'f FieldSchema,
    opts: &DiffOptions,
) -> Result<&'f [SchemaPath]> {
    let mut aliases: &[SchemaPath] = &field.aliases;
    if opts.prefer_shadow_path && !field.shadow_aliases.is_empty() {
        aliases = &field.shadow_aliases;
    }

    let missing = || YangDiffError::MissingSchemaPath {
        record: record.to_string(),
        field: field.name.clone(),
    };
    if aliases.is_empty() {
        return Err(missing());
    }

    if opts.map_to_single_path {
        let shortest = aliases.iter().min_by_key(|a| a.len()).ok_or_else(missing)?;
        aliases = std::slice::from_ref(shortest);
    }
    Ok(aliases)
}

/// Resolve a node's absolute path-set.
///
/// Without an ancestor every alias becomes one path. Otherwise each ancestor
/// path is paired with each alias. When `entry` is given, the last segment
/// of every candidate carries the entry's key predicate.
///
/// # Errors
///
/// `InvalidKeyMap` / `KeyStringFailure` if the entry's keys cannot be read
/// or rendered.
pub fn resolve(
    ancestor: Option<&PathSpec>,
    aliases: &[SchemaPath],
    entry: Option<&Record>,
) -> Result<PathSpec> {
    let candidates: Vec<Path> = match ancestor {
        None => aliases.iter().map(|a| Path::from_segments(a)).collect(),
        Some(spec) => spec
            .paths
            .iter()
            .flat_map(|parent| aliases.iter().map(move |a| parent.append(a)))
            .collect(),
    };

    let Some(entry) = entry else {
        return Ok(PathSpec::new(candidates));
    };
    let keys = entry.key_strings()?;
    Ok(PathSpec::new(
        candidates
            .into_iter()
            .map(|p| p.with_last_keys(&keys))
            .collect(),
    ))
}

/// Resolve a list entry below its list's path-set.
///
/// # Errors
///
/// As [`resolve`].
pub fn resolve_entry(list: &PathSpec, entry: &Record) -> Result<PathSpec> {
    resolve(Some(list), &[SchemaPath::new()], Some(entry))
}
