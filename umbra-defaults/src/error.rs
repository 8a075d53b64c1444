//! # Defaults Error Types
//!
//! This module provides the error types of the defaults engine. Two families exist:
//!
//! - **[ParseError]**: the outcome of a single parser stage for a single entry.
//!   These never abort a load; the builder turns them into [LoadWarning]s.
//! - **[DefaultsError]**: failures outside a load pass, such as reading a
//!   properties file or a configuration file.

use std::path::PathBuf;
use thiserror::Error;

use crate::resource::ResourceError;

/// Reason recorded on a value left unresolved by a missing reference target.
pub const FORWARD_REFERENCE: &str = "forward-reference";
/// Reason recorded on a value whose reference target is itself unresolved.
pub const UNRESOLVED_TARGET: &str = "unresolved-target";

/// Failure of one parser stage for one entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Insets need exactly four comma-separated integers.
    #[error("Invalid insets '{0}': expected top,left,bottom,right")]
    InvalidInsets(String),

    /// Sizes need exactly two comma-separated integers.
    #[error("Invalid size '{0}': expected width,height")]
    InvalidSize(String),

    /// A font declaration that does not follow `family-style-size`.
    #[error("Invalid font '{0}': expected family-style-size")]
    InvalidFont(String),

    /// A hex color of the wrong length or with non-hex digits.
    #[error("Invalid color format: {0}")]
    InvalidColor(String),

    /// The parenthesized `(width,height)` part of an icon path is malformed.
    #[error("Invalid icon dimension in '{0}'")]
    InvalidDimension(String),

    /// The icon path is empty once tag and dimension are stripped.
    #[error("Empty icon path in '{0}'")]
    EmptyIconPath(String),

    /// The trailing bracket of an icon path is not a known tag.
    #[error("Invalid tag on icon path: '{0}'")]
    MalformedIconTag(String),

    /// A `%name` reference whose target has not been declared (yet).
    #[error("Could not reference value '{0}'. May be a forward reference")]
    ForwardReference(String),

    /// A `%name` reference whose target is itself unresolved.
    #[error("Referenced value '{0}' is unresolved")]
    UnresolvedTarget(String),

    /// No factory is registered under the requested type name.
    #[error("No factory registered for type '{0}'")]
    UnknownType(String),

    /// A registered factory failed to construct its instance.
    #[error("Failed to instantiate '{type_name}': {message}")]
    Instantiation {
        /// The requested type name.
        type_name: String,
        /// The message reported by the factory.
        message: String,
    },

    /// The resource loader could not provide the requested icon.
    #[error("Resource unavailable: {0}")]
    Resource(#[from] ResourceError),

}

impl ParseError {
    /// The diagnostic category this error belongs to.
    pub fn kind(&self) -> WarningKind {
        match self {
            ParseError::ForwardReference(_) | ParseError::UnresolvedTarget(_) => {
                WarningKind::UnresolvedReference
            },
            ParseError::MalformedIconTag(_) => WarningKind::MalformedIconTag,
            ParseError::UnknownType(_) | ParseError::Instantiation { .. } => {
                WarningKind::InstantiationFailure
            },
            _ => WarningKind::RecoverableParseFailure,
        }
    }

    /// The reason stored in an `Unresolved` value produced by this error.
    pub fn unresolved_reason(&self) -> String {
        match self {
            ParseError::ForwardReference(_) => FORWARD_REFERENCE.to_string(),
            ParseError::UnresolvedTarget(_) => UNRESOLVED_TARGET.to_string(),
            other => other.to_string(),
        }
    }
}

/// Diagnostic categories of non-fatal load failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    /// A value does not match the grammar of its inferred kind.
    RecoverableParseFailure,
    /// A `%name` reference whose target was not found.
    UnresolvedReference,
    /// An icon path with an unknown bracket tag.
    MalformedIconTag,
    /// A named type could not be constructed.
    InstantiationFailure,
}

/// A warning accumulated while building a defaults table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("while loading '{key}': {error}")]
pub struct LoadWarning {
    /// The key of the entry that produced the warning.
    pub key: String,
    /// What went wrong.
    pub error: ParseError,
}

impl LoadWarning {
    /// Create a warning for `key`.
    pub fn new(key: impl Into<String>, error: ParseError) -> Self {
        Self {
            key: key.into(),
            error,
        }
    }

    /// The diagnostic category of this warning.
    pub fn kind(&self) -> WarningKind {
        self.error.kind()
    }
}

/// Errors that can occur outside a load pass.
#[derive(Debug, Error)]
pub enum DefaultsError {
    /// Source or configuration file not found.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Failed to read a source or configuration file.
    #[error("Failed to read {0}: {1}")]
    ReadError(PathBuf, std::io::Error),

    /// Failed to parse a configuration file.
    #[error("Failed to parse configuration {0}: {1}")]
    ConfigError(PathBuf, String),

    /// A configuration setting holds an unusable value.
    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting {
        /// The setting name.
        key: String,
        /// The offending value.
        value: String,
    },
}

/// Result type alias for fallible operations outside a load pass.
pub type DefaultsResult<T> = Result<T, DefaultsError>;

impl DefaultsError {
    /// Create a read error, mapping `NotFound` I/O errors to [DefaultsError::NotFound].
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::ReadError(path, source)
        }
    }

    /// Create a configuration parse error.
    pub fn config_error(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        Self::ConfigError(path.into(), details.into())
    }

    /// Create an invalid setting error.
    pub fn invalid_setting(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.into(),
            value: value.into(),
        }
    }
}
