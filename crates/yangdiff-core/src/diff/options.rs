//! Per-invocation diff options.
//!
//! Options deserialize from TOML or JSON with every field optional; keys
//! this version does not know are ignored.
//!
//! ```
//! use yangdiff_core::diff::DiffOptions;
//!
//! let opts = DiffOptions::from_toml_str("map_to_single_path = true").unwrap();
//! assert!(opts.map_to_single_path);
//! assert!(!opts.ignore_additions);
//! ```

use crate::errors::{Result, YangDiffError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Drop updates for paths present only in the modified snapshot
    pub ignore_additions: bool,
    /// Report each leaf at its single shortest alias
    pub map_to_single_path: bool,
    /// Use a field's shadow aliases when it declares any
    pub prefer_shadow_path: bool,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_additions(mut self) -> Self {
        self.ignore_additions = true;
        self
    }

    pub fn map_to_single_path(mut self) -> Self {
        self.map_to_single_path = true;
        self
    }

    pub fn prefer_shadow_path(mut self) -> Self {
        self.prefer_shadow_path = true;
        self
    }

    /// Load options from TOML text.
    ///
    /// # Errors
    ///
    /// `InvalidOptions` if the text is not valid TOML or a value has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load options from JSON text.
    ///
    /// # Errors
    ///
    /// `InvalidOptions` if the text is not valid JSON or a value has the wrong type.
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| YangDiffError::InvalidOptions {
            reason: e.to_string(),
        })
    }
}
