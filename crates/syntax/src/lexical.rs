//! Lexical form of property values.
//!
//! The parser does not know what a property means; it only splits the value
//! text into [`LexicalUnit`]s. Value managers in the engine turn a
//! [`LexicalValue`] into a typed value.

use std::fmt;

/// A single token-level component of a property value.
#[derive(Clone, Debug, PartialEq)]
pub enum LexicalUnit {
    /// An identifier such as `bold` or `inherit`.
    Ident(String),
    /// A unitless number.
    Number(f64),
    /// A number followed by a unit identifier (`12px`, `1.5em`).
    Dimension(f64, String),
    /// A number followed by `%`.
    Percentage(f64),
    /// `#` followed by name characters, without the `#`.
    Hash(String),
    /// A quoted string, unescaped.
    String(String),
    /// The content of `url(...)`, unquoted and trimmed.
    Url(String),
    /// A function call with its comma-aware argument list.
    Function { name: String, args: Vec<LexicalUnit> },
    /// The `,` separator.
    Comma,
    /// The `/` separator.
    Slash,
}

impl LexicalUnit {
    /// Returns the identifier text when the unit is an identifier.
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            LexicalUnit::Ident(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for an identifier equal to `name`, ignoring ASCII case.
    pub fn is_ident(&self, name: &str) -> bool {
        self.as_ident().is_some_and(|s| s.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LexicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexicalUnit::Ident(s) => write!(f, "{}", s),
            LexicalUnit::Number(n) => write!(f, "{}", n),
            LexicalUnit::Dimension(n, unit) => write!(f, "{}{}", n, unit),
            LexicalUnit::Percentage(n) => write!(f, "{}%", n),
            LexicalUnit::Hash(h) => write!(f, "#{}", h),
            LexicalUnit::String(s) => write!(f, "{:?}", s),
            LexicalUnit::Url(u) => write!(f, "url({})", u),
            LexicalUnit::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 && !matches!(arg, LexicalUnit::Comma) {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
            LexicalUnit::Comma => write!(f, ","),
            LexicalUnit::Slash => write!(f, "/"),
        }
    }
}

/// A whitespace-separated sequence of lexical units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LexicalValue {
    pub units: Vec<LexicalUnit>,
}

impl LexicalValue {
    pub fn new(units: Vec<LexicalUnit>) -> Self {
        Self { units }
    }

    /// Returns the only unit, if the value has exactly one.
    pub fn single(&self) -> Option<&LexicalUnit> {
        match self.units.as_slice() {
            [unit] => Some(unit),
            _ => None,
        }
    }

    /// True when the value is the single keyword `inherit`.
    pub fn is_inherit(&self) -> bool {
        self.single().is_some_and(|u| u.is_ident("inherit"))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl fmt::Display for LexicalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, unit) in self.units.iter().enumerate() {
            if i > 0 && !matches!(unit, LexicalUnit::Comma) {
                write!(f, " ")?;
            }
            write!(f, "{}", unit)?;
        }
        Ok(())
    }
}
