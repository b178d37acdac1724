use yangdiff_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using YangDiffError
pub type Result<T> = std::result::Result<T, YangDiffError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every kind maps to a stable error code and to one of the coarse
/// [`ExErrorCategory`] groups callers branch on. Codes are part of the
/// public contract and never change once published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural
    TypeMismatch,
    MissingSchemaPath,
    MissingAncestorAnnotation,
    FieldNotInSchema,
    FieldKindMismatch,

    // Key
    InvalidKeyMap,
    KeyStringFailure,
    DuplicateListKey,

    // Value
    ValueEncoding,
    InvalidPath,

    // Atomic policy
    NestedOrderedList,

    // Configuration
    InvalidOptions,
    Serialization,

    // Internal
    Internal,
}

/// Coarse error grouping used for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorCategory {
    /// Mismatched snapshots or a malformed schema/tree
    Structural,
    /// List key extraction or rendering failed
    Key,
    /// A leaf value or path could not be rendered on the wire
    Value,
    /// Atomicity was requested for a tree that cannot express it
    AtomicPolicy,
    /// Options or serialized input could not be read
    Configuration,
    /// Internal invariant violation
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::TypeMismatch => "ERR_TYPE_MISMATCH",
            ExErrorKind::MissingSchemaPath => "ERR_MISSING_SCHEMA_PATH",
            ExErrorKind::MissingAncestorAnnotation => "ERR_MISSING_ANCESTOR_ANNOTATION",
            ExErrorKind::FieldNotInSchema => "ERR_FIELD_NOT_IN_SCHEMA",
            ExErrorKind::FieldKindMismatch => "ERR_FIELD_KIND_MISMATCH",
            ExErrorKind::InvalidKeyMap => "ERR_INVALID_KEY_MAP",
            ExErrorKind::KeyStringFailure => "ERR_KEY_STRING_FAILURE",
            ExErrorKind::DuplicateListKey => "ERR_DUPLICATE_LIST_KEY",
            ExErrorKind::ValueEncoding => "ERR_VALUE_ENCODING",
            ExErrorKind::InvalidPath => "ERR_INVALID_PATH",
            ExErrorKind::NestedOrderedList => "ERR_NESTED_ORDERED_LIST",
            ExErrorKind::InvalidOptions => "ERR_INVALID_OPTIONS",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Get the category this kind belongs to
    pub fn category(&self) -> ExErrorCategory {
        match self {
            ExErrorKind::TypeMismatch
            | ExErrorKind::MissingSchemaPath
            | ExErrorKind::MissingAncestorAnnotation
            | ExErrorKind::FieldNotInSchema
            | ExErrorKind::FieldKindMismatch => ExErrorCategory::Structural,
            ExErrorKind::InvalidKeyMap
            | ExErrorKind::KeyStringFailure
            | ExErrorKind::DuplicateListKey => ExErrorCategory::Key,
            ExErrorKind::ValueEncoding | ExErrorKind::InvalidPath => ExErrorCategory::Value,
            ExErrorKind::NestedOrderedList => ExErrorCategory::AtomicPolicy,
            ExErrorKind::InvalidOptions | ExErrorKind::Serialization => {
                ExErrorCategory::Configuration
            }
            ExErrorKind::Internal => ExErrorCategory::Internal,
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification of a failure together with the context needed
/// to diagnose it (offending path, record type or field name).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    record: Option<String>,
    field: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            record: None,
            field: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the canonical path the failure relates to
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add the record type the failure relates to
    pub fn with_record(mut self, record: impl Into<String>) -> Self {
        self.record = Some(record.into());
        self
    }

    /// Add the field name the failure relates to
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn category(&self) -> ExErrorCategory {
        self.kind.category()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn record(&self) -> Option<&str> {
        self.record.as_deref()
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(record) = &self.record {
            write!(f, " (record: {})", record)?;
        }
        if let Some(field) = &self.field {
            write!(f, " (field: {})", field)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for tree diffing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum YangDiffError {
    // ===== Structural Errors =====
    /// The two snapshots are instances of different record schemas
    #[error("cannot diff records of different types: original {original}, modified {modified}")]
    TypeMismatch { original: String, modified: String },

    /// A data field declares no schema path alias
    #[error("field {field} of {record} declares no schema path")]
    MissingSchemaPath { record: String, field: String },

    /// A node was visited before its ancestor's path-set was resolved
    #[error("no resolved path recorded for ancestor node {node}")]
    MissingAncestorAnnotation { node: usize },

    /// A value was set under a name the record schema does not declare
    #[error("record {record} has no field named {field}")]
    FieldNotInSchema { record: String, field: String },

    /// A value does not match the kind its field declares
    #[error("field {field} of {record} expects {expected}")]
    FieldKindMismatch {
        record: String,
        field: String,
        expected: String,
    },

    // ===== Key Errors =====
    /// A list entry could not produce its key fields
    #[error("invalid key map for {record}: {reason}")]
    InvalidKeyMap { record: String, reason: String },

    /// A key value has no canonical string rendering
    #[error("cannot render key {key} as a string: {reason}")]
    KeyStringFailure { key: String, reason: String },

    /// A list already holds an entry with the same key
    #[error("duplicate key {key} in list of {record}")]
    DuplicateListKey { record: String, key: String },

    // ===== Value Errors =====
    /// A leaf value could not be encoded as a wire value
    #[error("cannot encode value {value} at {path}: {reason}")]
    ValueEncoding {
        path: String,
        value: String,
        reason: String,
    },

    /// A path string does not follow the canonical grammar
    #[error("invalid path {input:?}: {reason}")]
    InvalidPath { input: String, reason: String },

    // ===== Atomic Policy Errors =====
    /// An ordered list nests another ordered list and atomicity was requested
    #[error("nested ordered list at {path} cannot be represented atomically")]
    NestedOrderedList { path: String },

    // ===== Configuration Errors =====
    /// Diff options could not be parsed
    #[error("invalid diff options: {reason}")]
    InvalidOptions { reason: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    // ===== Internal Errors =====
    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<YangDiffError> for ExError {
    fn from(err: YangDiffError) -> Self {
        match err {
            YangDiffError::TypeMismatch { original, modified } => {
                ExError::new(ExErrorKind::TypeMismatch)
                    .with_record(original.clone())
                    .with_message(format!(
                        "original is {} but modified is {}",
                        original, modified
                    ))
            }

            YangDiffError::MissingSchemaPath { record, field } => {
                ExError::new(ExErrorKind::MissingSchemaPath)
                    .with_record(record)
                    .with_field(field)
                    .with_message("field declares no schema path")
            }

            YangDiffError::MissingAncestorAnnotation { node } => {
                ExError::new(ExErrorKind::MissingAncestorAnnotation)
                    .with_message(format!("node {} has no resolved ancestor path", node))
            }

            YangDiffError::FieldNotInSchema { record, field } => {
                ExError::new(ExErrorKind::FieldNotInSchema)
                    .with_record(record)
                    .with_field(field)
                    .with_message("field is not declared by the schema")
            }

            YangDiffError::FieldKindMismatch {
                record,
                field,
                expected,
            } => ExError::new(ExErrorKind::FieldKindMismatch)
                .with_record(record)
                .with_field(field)
                .with_message(format!("expected {}", expected)),

            YangDiffError::InvalidKeyMap { record, reason } => {
                ExError::new(ExErrorKind::InvalidKeyMap)
                    .with_record(record)
                    .with_message(reason)
            }

            YangDiffError::KeyStringFailure { key, reason } => {
                ExError::new(ExErrorKind::KeyStringFailure)
                    .with_field(key)
                    .with_message(reason)
            }

            YangDiffError::DuplicateListKey { record, key } => {
                ExError::new(ExErrorKind::DuplicateListKey)
                    .with_record(record)
                    .with_message(format!("duplicate key {}", key))
            }

            YangDiffError::ValueEncoding {
                path,
                value,
                reason,
            } => ExError::new(ExErrorKind::ValueEncoding)
                .with_path(path)
                .with_message(format!("{}: {}", value, reason)),

            YangDiffError::InvalidPath { input, reason } => {
                ExError::new(ExErrorKind::InvalidPath)
                    .with_path(input)
                    .with_message(reason)
            }

            YangDiffError::NestedOrderedList { path } => {
                ExError::new(ExErrorKind::NestedOrderedList)
                    .with_path(path)
                    .with_message("ordered lists cannot be nested under atomic publication")
            }

            YangDiffError::InvalidOptions { reason } => {
                ExError::new(ExErrorKind::InvalidOptions).with_message(reason)
            }

            YangDiffError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            YangDiffError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

/// Conversion from serde_json::Error to YangDiffError
impl From<serde_json::Error> for YangDiffError {
    fn from(err: serde_json::Error) -> Self {
        YangDiffError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for YangDiffError {
    fn from(err: toml::de::Error) -> Self {
        YangDiffError::InvalidOptions {
            reason: err.to_string(),
        }
    }
}
