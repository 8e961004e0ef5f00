//! Error types for yangschema
//!
//! This module defines all error types used throughout the library.
//! Every failure is a typed, caller-visible value; nothing in the crate
//! aborts the process on malformed input.

use crate::locations::SourceLocation;
use std::fmt;
use thiserror::Error;

/// Result type alias using yangschema Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for yangschema operations
#[derive(Error, Debug)]
pub enum Error {
    /// A literal does not match the lexical grammar of its type, or
    /// overflows the numeric width
    #[error("literal format error: {0}")]
    LiteralFormat(String),

    /// A parsed value lies outside every interval of a range restriction
    #[error("range violation: {0}")]
    RangeViolation(String),

    /// A layered restriction is wider than the one it derives from
    #[error("restriction narrowing error: {0}")]
    RestrictionNarrowing(DataModelError),

    /// An interval was added that does not lie strictly past the current maximum
    #[error("out of order interval: {0}")]
    OutOfOrder(DataModelError),

    /// A restriction without any interval was queried
    #[error("empty restriction: {0}")]
    EmptyRestriction(DataModelError),

    /// Every member type of a union rejected the literal
    #[error("no union member matched: {0}")]
    NoUnionMemberMatched(String),

    /// A structured schema path could not be mapped onto the schema tree
    #[error("unresolved schema path: {0}")]
    UnresolvedSchemaPath(String),

    /// A resource identifier builder was driven in an illegal order
    #[error("invalid key composition: {0}")]
    InvalidKeyComposition(String),

    /// A model with the same id is already registered
    #[error("model with id '{0}' already exists")]
    DuplicateModel(String),

    /// A model failed structural validation
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A model or module lookup that requires presence failed
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// No serializer is bound to the requested data format
    #[error("data format {0} is not registered")]
    FormatNotRegistered(String),

    /// Schema tree construction error
    #[error("schema error: {0}")]
    Schema(String),

    /// Encoding error (data tree to external stream)
    #[error("encoding error: {0}")]
    Encode(String),

    /// Decoding error (external stream to data tree)
    #[error("decoding error: {0}")]
    Decode(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// XML parsing or writing error
    #[error("XML error: {0}")]
    Xml(String),

    /// URL parsing error
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Limit exceeded error
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),
}

impl Error {
    /// Returns true if the error was raised while converting a literal
    pub fn is_literal_error(&self) -> bool {
        matches!(
            self,
            Error::LiteralFormat(_) | Error::RangeViolation(_) | Error::NoUnionMemberMatched(_)
        )
    }
}

/// Error raised while compiling a data model statement, with the
/// position of the offending statement when known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataModelError {
    /// Error message
    pub message: String,
    /// Location of the statement in the source module
    pub location: Option<SourceLocation>,
}

impl DataModelError {
    /// Create a new data model error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Option<SourceLocation>) -> Self {
        self.location = location;
        self
    }
}

impl fmt::Display for DataModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;

        if let Some(ref loc) = self.location {
            write!(f, " {}", loc)?;
        }

        Ok(())
    }
}

impl std::error::Error for DataModelError {}
