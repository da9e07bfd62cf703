// Copyright 2025 Cowboy AI, LLC.

//! Error types for catalog, path and decoding operations

use thiserror::Error;

use crate::catalog::Namespace;

/// Errors that can occur while building, resolving or rendering URLs
#[derive(Debug, Clone, Error)]
pub enum RouteError {
    /// A slug does not name any entry of the namespace
    #[error("Not found: no {namespace} with slug '{slug}'")]
    NotFound {
        /// Namespace that was searched
        namespace: Namespace,
        /// Slug that was searched for
        slug: String,
    },

    /// Invariant violation (a programming error in the caller)
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// Strict decoding found more than one structurally valid tuple
    #[error("Ambiguous decode of '{slug}': {} candidates ({})", candidates.len(), candidates.join(", "))]
    AmbiguousDecode {
        /// The flat slug being decoded
        slug: String,
        /// Canonical paths of every candidate tuple
        candidates: Vec<String>,
    },

    /// Two catalog names in one namespace normalize to the same slug
    #[error("Duplicate slug in {namespace}: '{slug}'")]
    DuplicateSlug {
        /// Namespace holding the collision
        namespace: Namespace,
        /// The colliding slug
        slug: String,
    },

    /// A catalog name normalizes to the empty slug
    #[error("Empty slug in {namespace}: name '{name}' has no alphanumeric characters")]
    EmptySlug {
        /// Namespace holding the entry
        namespace: Namespace,
        /// Display name of the entry
        name: String,
    },

    /// A city was declared without any locality
    #[error("City '{0}' has no localities")]
    EmptyCity(String),

    /// A string could not be parsed as a canonical path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// A string is not in slug form
    #[error("Invalid slug: '{0}'")]
    InvalidSlug(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O error (file name and message)
    #[error("I/O error: {0}")]
    Io(String),
}

/// Result type for URL-space operations
pub type RouteResult<T> = Result<T, RouteError>;

impl From<serde_json::Error> for RouteError {
    fn from(err: serde_json::Error) -> Self {
        RouteError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RouteError {
    fn from(err: toml::de::Error) -> Self {
        RouteError::Config(err.to_string())
    }
}

impl From<std::io::Error> for RouteError {
    fn from(err: std::io::Error) -> Self {
        RouteError::Io(err.to_string())
    }
}

impl RouteError {
    /// Build a not-found error for a namespace lookup
    pub fn not_found(namespace: Namespace, slug: impl Into<String>) -> Self {
        RouteError::NotFound {
            namespace,
            slug: slug.into(),
        }
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, RouteError::NotFound { .. })
    }

    /// Check if this error was raised while validating a catalog
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            RouteError::DuplicateSlug { .. } | RouteError::EmptySlug { .. } | RouteError::EmptyCity(_)
        )
    }
}
