//! Wire paths.
//!
//! A [`Path`] is a sequence of [`PathElem`] segments, each with an optional
//! key predicate map. Its `Display` output is the canonical path string used
//! as the matching key throughout diffing: segments joined by `/`, key
//! predicates rendered as `[name=value]` in key-name order, and the reserved
//! characters `/ [ ] = \` escaped with a backslash. [`Path::from_str`]
//! parses the same grammar, so `p.to_string().parse::<Path>() == Ok(p)`.

mod parse;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One segment of a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct PathElem {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub key: BTreeMap<String, String>,
}

impl PathElem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: BTreeMap::new(),
        }
    }

    pub fn with_key(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.key.insert(name.into(), value.into());
        self
    }
}

/// An absolute path, or a path relative to a notification prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Path {
    pub elem: Vec<PathElem>,
}

impl Path {
    /// The empty path, rendered as `/`.
    pub fn root() -> Self {
        Self::default()
    }

    /// A key-less path from plain segment names.
    pub fn from_segments<S: AsRef<str>>(segments: &[S]) -> Self {
        Self {
            elem: segments.iter().map(|s| PathElem::new(s.as_ref())).collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.elem.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elem.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elem.is_empty()
    }

    pub fn last(&self) -> Option<&PathElem> {
        self.elem.last()
    }

    /// This path extended by key-less relative segments.
    pub fn append<S: AsRef<str>>(&self, segments: &[S]) -> Path {
        let mut out = self.clone();
        out.elem
            .extend(segments.iter().map(|s| PathElem::new(s.as_ref())));
        out
    }

    /// This path with the last segment's key predicate replaced.
    ///
    /// The root path has no segment to key and is returned unchanged.
    pub fn with_last_keys(mut self, keys: &BTreeMap<String, String>) -> Path {
        if let Some(last) = self.elem.last_mut() {
            last.key = keys.clone();
        }
        self
    }

    /// The path without its last segment; `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.elem.is_empty() {
            return None;
        }
        Some(Path {
            elem: self.elem[..self.elem.len() - 1].to_vec(),
        })
    }

    /// The first `len` segments of this path.
    pub fn truncate(&self, len: usize) -> Path {
        Path {
            elem: self.elem.iter().take(len).cloned().collect(),
        }
    }

    pub fn has_prefix(&self, prefix: &Path) -> bool {
        prefix.elem.len() <= self.elem.len() && self.elem[..prefix.elem.len()] == prefix.elem[..]
    }

    /// The remainder of this path below `prefix`.
    pub fn strip_prefix(&self, prefix: &Path) -> Option<Path> {
        if !self.has_prefix(prefix) {
            return None;
        }
        Some(Path {
            elem: self.elem[prefix.elem.len()..].to_vec(),
        })
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    for c in s.chars() {
        if matches!(c, '/' | '[' | ']' | '=' | '\\') {
            write!(f, "\\{}", c)?;
        } else {
            write!(f, "{}", c)?;
        }
    }
    Ok(())
}

impl fmt::Display for PathElem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_escaped(f, &self.name)?;
        for (k, v) in &self.key {
            f.write_str("[")?;
            write_escaped(f, k)?;
            f.write_str("=")?;
            write_escaped(f, v)?;
            f.write_str("]")?;
        }
        Ok(())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elem.is_empty() {
            return f.write_str("/");
        }
        for elem in &self.elem {
            write!(f, "/{}", elem)?;
        }
        Ok(())
    }
}

/// The resolved path-set of one node: every absolute path it is reachable at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PathSpec {
    pub paths: Vec<Path>,
}

impl PathSpec {
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    pub fn single(path: Path) -> Self {
        Self { paths: vec![path] }
    }

    /// Canonical string of every member path, in member order.
    pub fn canonical_strings(&self) -> Vec<String> {
        self.paths.iter().map(Path::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
