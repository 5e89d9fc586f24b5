//! Error types for CSS parsing.
//!
//! This module defines the errors that can occur when parsing stylesheets,
//! declaration blocks, single property values or media lists.

use thiserror::Error;

use crate::color::ColorParseError;

/// Errors that can occur during CSS parsing.
///
/// # Examples
///
/// ```rust
/// use css_syntax::parser::parse_stylesheet;
///
/// // Missing closing brace
/// let result = parse_stylesheet("rect { fill: red;");
/// assert!(result.is_err());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SyntaxError {
    /// Invalid CSS syntax was encountered during parsing.
    ///
    /// The string contains details about what was unexpected and where.
    #[error("CSS syntax error: {0}")]
    InvalidSyntax(String),

    /// The parser stopped before the end of the input.
    #[error("unexpected tokens: {0:?}")]
    UnexpectedTokens(String),

    /// A color literal could not be decoded.
    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),
}

impl SyntaxError {
    pub(crate) fn from_nom(err: nom::Err<nom::error::Error<&str>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Self::InvalidSyntax("incomplete input".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => Self::InvalidSyntax(format!(
                "{:?} at {:?}",
                e.code,
                truncate(e.input)
            )),
        }
    }
}

fn truncate(input: &str) -> &str {
    match input.char_indices().nth(40) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}
