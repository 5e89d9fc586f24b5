//! Error types for the cascade engine.

use css_syntax::SyntaxError;
use thiserror::Error;

/// A convenient Result alias for engine operations.
pub type Result<T> = std::result::Result<T, CssError>;

/// Errors raised by cascading, computing and updating styles.
///
/// Every variant is fatal to the call that produced it. A failed cascade
/// leaves the element without a style map.
#[derive(Error, Debug)]
pub enum CssError {
    /// A style sheet could not be parsed.
    #[error("syntax error in style sheet {uri}: {source}")]
    StyleSheet {
        uri: String,
        #[source]
        source: SyntaxError,
    },

    /// An inline style or presentational hint attribute could not be parsed
    /// or turned into a value.
    #[error("invalid {attribute} attribute {text:?} in {uri}: {message}")]
    Attribute {
        uri: String,
        attribute: String,
        text: String,
        message: String,
    },

    /// A media list could not be parsed.
    #[error("invalid media list {text:?}: {source}")]
    Media {
        text: String,
        #[source]
        source: SyntaxError,
    },

    /// A declaration named a property that is neither a longhand nor a
    /// shorthand in the registry.
    #[error("unknown property: {0}")]
    UnknownProperty(String),

    /// A value manager rejected a value.
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },

    /// An imported style sheet could not be loaded.
    #[error("failed to load style sheet {uri}: {message}")]
    Load { uri: String, message: String },

    /// A style change listener failed, aborting the rest of the dispatch.
    #[error("style change listener failed: {0}")]
    Listener(String),

    /// An internal invariant was violated.
    #[error("invalid engine state: {0}")]
    InvalidState(String),
}

impl CssError {
    pub(crate) fn invalid_value(property: &str, message: impl Into<String>) -> Self {
        CssError::InvalidValue {
            property: property.to_string(),
            message: message.into(),
        }
    }
}
