//! Error types for waypoint-router

use std::fmt;
use thiserror::Error;

/// Result type alias for router operations
pub type Result<T> = std::result::Result<T, Error>;

/// Which field of a route definition collided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionField {
    Path,
    Name,
}

impl fmt::Display for DefinitionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionField::Path => f.write_str("path"),
            DefinitionField::Name => f.write_str("name"),
        }
    }
}

/// Error types for the router
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two definitions share a path or a name
    #[error("Duplicate route {field}: {value}")]
    DuplicateDefinition { field: DefinitionField, value: String },

    /// A definition is malformed
    #[error("Invalid route definition {path:?}: {reason}")]
    InvalidDefinition { path: String, reason: &'static str },

    /// Navigation target cannot be resolved
    #[error("Invalid navigation target: {0}")]
    InvalidTarget(#[from] InvalidTarget),
}

/// Reasons a navigation target is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTarget {
    /// No route carries this name
    #[error("unknown route name {0:?}")]
    UnknownName(String),

    /// Path is syntactically invalid
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },

    /// The table has no route at `/`
    #[error("no home route is defined")]
    NoHomeRoute,
}
