//! Failure types.

use thiserror::Error;

/// A hyperlink target could not be built or expanded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid URI \"{uri}\": {reason}")]
    InvalidUri { uri: String, reason: String },
    #[error("invalid URI template \"{template}\": {reason}")]
    InvalidTemplate { template: String, reason: String },
    #[error("property \"{0}\" has an object value, which cannot be added to a plain URI")]
    ObjectProperty(String),
    #[error("expansion of \"{template}\" failed: {reason}")]
    Expansion { template: String, reason: String },
}

/// A structurally valid JSON object does not form a valid entity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{entity} is missing required field \"{field}\"")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
    #[error("{entity} field \"{field}\" must be {expected}, found {found}")]
    WrongType {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{entity} must be an object, found {found}")]
    NotAnObject {
        entity: &'static str,
        found: &'static str,
    },
    #[error("property \"{name}\" has more than one of \"value\", \"array\" and \"object\"")]
    AmbiguousPayload { name: String },
    #[error("unsupported version \"{0}\"")]
    UnsupportedVersion(String),
    #[error("unsupported query encoding \"{0}\"")]
    UnsupportedEncoding(String),
    #[error("{entity} field \"{field}\": {source}")]
    InvalidTarget {
        entity: &'static str,
        field: &'static str,
        #[source]
        source: TargetError,
    },
    #[error("{location}: {source}")]
    Nested {
        location: String,
        #[source]
        source: Box<ValidationError>,
    },
}

impl ValidationError {
    /// Prefix `location` (e.g. `queries[0]`) to the path of this error.
    pub fn at(self, location: impl Into<String>) -> Self {
        let location = location.into();
        match self {
            ValidationError::Nested {
                location: inner,
                source,
            } => ValidationError::Nested {
                location: format!("{location}.{inner}"),
                source,
            },
            other => ValidationError::Nested {
                location,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, with any location prefixes stripped.
    pub fn root(&self) -> &ValidationError {
        match self {
            ValidationError::Nested { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Top-level failure of a parse, build or write call.
#[derive(Debug, Error)]
pub enum CollectionJsonError {
    #[error("malformed input: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("malformed input: top-level value must be an object, found {0}")]
    NotAnObject(&'static str),
    #[error("malformed input: missing top-level \"{0}\" key")]
    MissingWrapper(&'static str),
    #[error("invalid document: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Target(#[from] TargetError),
    #[error("failed to write document: {0}")]
    Write(#[source] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
