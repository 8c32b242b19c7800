//! Error types for schema validation and schema registration
//!
//! Copyright (c) 2025 mcschema Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Category of a data-time validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A required object field is absent
    MissingRequiredField,
    /// An object field is not declared by the schema
    ExtraneousField,
    /// The runtime type of a value is not accepted by the node
    TypeMismatch,
    /// A number lies outside its declared bounds
    OutOfRange,
    /// A string is not a member of its enum or resource pool
    UnknownEnumValue,
    /// A reference name is missing from the schema registry
    UnresolvedReference,
    /// A delegated structural validator reported a problem
    ExternalValidatorFailure,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "missing_required_field",
            Self::ExtraneousField => "extraneous_field",
            Self::TypeMismatch => "type_mismatch",
            Self::OutOfRange => "out_of_range",
            Self::UnknownEnumValue => "unknown_enum_value",
            Self::UnresolvedReference => "unresolved_reference",
            Self::ExternalValidatorFailure => "external_validator_failure",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation problem, tagged with its path from the root value
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct ValidationError {
    /// Dotted path from the root (`$` for the root itself)
    pub path: String,
    /// What went wrong
    pub kind: ErrorKind,
    /// Human-readable detail
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Validation error at '{}': {} ({})",
            self.path, self.message, self.kind
        )
    }
}

impl ValidationError {
    /// Create a new validation error
    pub fn new<P, M>(path: P, kind: ErrorKind, message: M) -> Self
    where
        P: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

/// All validation problems found in one pass over a value tree
#[derive(Debug, Clone, Default, Error, Serialize, Deserialize)]
pub struct ValidationErrors {
    /// Collected errors in discovery order
    pub errors: Vec<ValidationError>,
    /// Stop collecting once this many errors are held
    #[serde(skip)]
    limit: Option<usize>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} validation error(s) occurred:", self.errors.len())?;
        for (i, error) in self.errors.iter().enumerate() {
            write!(f, "\n{}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl ValidationErrors {
    /// Create an unbounded error collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a collection that ignores errors past `limit`
    pub fn with_limit(limit: usize) -> Self {
        Self {
            errors: Vec::new(),
            limit: Some(limit),
        }
    }

    /// Add an error to the collection
    pub fn add(&mut self, error: ValidationError) {
        if !self.is_full() {
            self.errors.push(error);
        }
    }

    /// Shorthand for `add(ValidationError::new(..))`
    pub fn report<P, M>(&mut self, path: P, kind: ErrorKind, message: M)
    where
        P: Into<String>,
        M: Into<String>,
    {
        self.add(ValidationError::new(path, kind, message));
    }

    /// Whether the configured limit has been reached
    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.errors.len() >= limit)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Errors of one kind
    pub fn by_kind(&self, kind: ErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// Errors reported at exactly `path`
    pub fn at_path<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.path == path)
    }

    /// Ok if no errors were collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        let mut errors = Self::new();
        errors.add(error);
        errors
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

/// Result type for schema registration and lookup
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Configuration-time errors; any of these aborts initialization
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A name was registered twice with different nodes
    #[error("Schema '{name}' is already registered with a different node")]
    DuplicateSchema { name: String },

    /// Two choice shapes claim the same runtime type
    #[error("Choice in '{schema}' has more than one shape for runtime type '{tag}'")]
    OverlappingChoice { schema: String, tag: String },

    /// A reference names a schema that was never registered
    #[error("Reference to unknown schema '{name}' (from '{from}')")]
    UnresolvedReference { name: String, from: String },

    /// A string node names an external validator that is not installed
    #[error("Unknown external validator '{name}' (in '{schema}')")]
    UnknownValidator { name: String, schema: String },

    /// A closed enum has no literals to accept
    #[error("Enum '{name}' (in '{schema}') declares no values")]
    EmptyEnum { name: String, schema: String },

    /// A number node's bounds admit no value
    #[error("Number range {range} (in '{schema}') admits no value")]
    EmptyRange { range: String, schema: String },
}

impl SchemaError {
    /// Name of the registered schema the error was found in, if any
    pub fn schema(&self) -> Option<&str> {
        match self {
            Self::DuplicateSchema { name } => Some(name),
            Self::OverlappingChoice { schema, .. } => Some(schema),
            Self::UnresolvedReference { from, .. } => Some(from),
            Self::UnknownValidator { schema, .. } => Some(schema),
            Self::EmptyEnum { schema, .. } => Some(schema),
            Self::EmptyRange { schema, .. } => Some(schema),
        }
    }
}
