//! Parser for canonical path strings.

use super::{Path, PathElem};
use crate::errors::{Result, YangDiffError};
use std::collections::BTreeMap;
use std::str::{Chars, FromStr};

impl FromStr for Path {
    type Err = YangDiffError;

    /// Parse `/a/b[k=v]/c`. A leading `/` is optional; `""` and `"/"` are the root.
    ///
    /// Unescaped `/` is accepted inside key values, since device names such
    /// as `eth0/1` are commonly written that way.
    fn from_str(s: &str) -> Result<Self> {
        parse_path(s).map_err(|reason| YangDiffError::InvalidPath {
            input: s.to_string(),
            reason: reason.to_string(),
        })
    }
}

fn parse_path(s: &str) -> std::result::Result<Path, &'static str> {
    let body = s.strip_prefix('/').unwrap_or(s);
    if body.is_empty() {
        return Ok(Path::root());
    }

    let mut elem = Vec::new();
    let mut name = String::new();
    let mut key = BTreeMap::new();
    let mut after_key = false;
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '/' => {
                if name.is_empty() {
                    return Err("empty path segment");
                }
                elem.push(PathElem {
                    name: std::mem::take(&mut name),
                    key: std::mem::take(&mut key),
                });
                after_key = false;
            }
            '[' => {
                if name.is_empty() {
                    return Err("key predicate without a segment name");
                }
                let (k, v) = read_key(&mut chars)?;
                if key.insert(k, v).is_some() {
                    return Err("duplicate key in predicate");
                }
                after_key = true;
            }
            ']' | '=' => return Err("unescaped reserved character in segment name"),
            _ if after_key => return Err("segment name continues after key predicate"),
            '\\' => name.push(chars.next().ok_or("dangling escape")?),
            other => name.push(other),
        }
    }

    if name.is_empty() {
        return Err("empty path segment");
    }
    elem.push(PathElem { name, key });
    Ok(Path { elem })
}

fn read_key(chars: &mut Chars<'_>) -> std::result::Result<(String, String), &'static str> {
    let mut k = String::new();
    loop {
        match chars.next() {
            None => return Err("unterminated key predicate"),
            Some('=') => break,
            Some('\\') => k.push(chars.next().ok_or("dangling escape")?),
            Some('[') | Some(']') | Some('/') => {
                return Err("unescaped reserved character in key name")
            }
            Some(c) => k.push(c),
        }
    }
    if k.is_empty() {
        return Err("empty key name");
    }

    let mut v = String::new();
    loop {
        match chars.next() {
            None => return Err("unterminated key predicate"),
            Some(']') => break,
            Some('\\') => v.push(chars.next().ok_or("dangling escape")?),
            Some('[') | Some('=') => return Err("unescaped reserved character in key value"),
            Some(c) => v.push(c),
        }
    }
    Ok((k, v))
}
