//! Typed property values.
//!
//! Value managers turn a [`LexicalValue`](css_syntax::LexicalValue) into a
//! [`Value`] when a declaration is compiled, and turn a cascaded [`Value`] into
//! a computed one on first lookup. When computing changes a value, the style
//! map stores a [`Value::Computed`] wrapper so the cascaded value can be put
//! back when the computed value is invalidated.

use std::fmt;

use css_syntax::RgbaColor;
use url::Url;

/// Length units understood by the builtin value managers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    Px,
    Em,
    Ex,
    /// Multiples of the element's computed line-height.
    Lh,
    Pt,
    Pc,
    In,
    Cm,
    Mm,
}

impl LengthUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        let unit = match name.to_ascii_lowercase().as_str() {
            "px" => LengthUnit::Px,
            "em" => LengthUnit::Em,
            "ex" => LengthUnit::Ex,
            "lh" => LengthUnit::Lh,
            "pt" => LengthUnit::Pt,
            "pc" => LengthUnit::Pc,
            "in" => LengthUnit::In,
            "cm" => LengthUnit::Cm,
            "mm" => LengthUnit::Mm,
            _ => return None,
        };
        Some(unit)
    }

    pub fn name(self) -> &'static str {
        match self {
            LengthUnit::Px => "px",
            LengthUnit::Em => "em",
            LengthUnit::Ex => "ex",
            LengthUnit::Lh => "lh",
            LengthUnit::Pt => "pt",
            LengthUnit::Pc => "pc",
            LengthUnit::In => "in",
            LengthUnit::Cm => "cm",
            LengthUnit::Mm => "mm",
        }
    }

    /// Pixels per unit for absolute units, at 96 pixels per inch.
    pub fn absolute_px(self) -> Option<f64> {
        match self {
            LengthUnit::Px => Some(1.0),
            LengthUnit::In => Some(96.0),
            LengthUnit::Pt => Some(96.0 / 72.0),
            LengthUnit::Pc => Some(16.0),
            LengthUnit::Cm => Some(96.0 / 2.54),
            LengthUnit::Mm => Some(96.0 / 25.4),
            LengthUnit::Em | LengthUnit::Ex | LengthUnit::Lh => None,
        }
    }
}

/// Angle units, used by orientation properties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AngleUnit {
    Deg,
    Grad,
    Rad,
}

impl AngleUnit {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "deg" => Some(AngleUnit::Deg),
            "grad" => Some(AngleUnit::Grad),
            "rad" => Some(AngleUnit::Rad),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AngleUnit::Deg => "deg",
            AngleUnit::Grad => "grad",
            AngleUnit::Rad => "rad",
        }
    }
}

/// A property value, either cascaded or computed.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The `inherit` keyword.
    Inherit,
    Ident(String),
    Number(f64),
    Length(f64, LengthUnit),
    Angle(f64, AngleUnit),
    Percentage(f64),
    Color(RgbaColor),
    String(String),
    /// An absolute URI, resolved against the base URI of its declaration.
    Uri(Url),
    /// A comma-separated list, such as a font family list.
    List(Vec<Value>),
    /// A computed value that differs from its cascaded value.
    Computed(Box<ComputedValue>),
}

/// The pair stored in a style map once computing changed a value.
#[derive(Clone, Debug, PartialEq)]
pub struct ComputedValue {
    pub cascaded: Value,
    pub computed: Value,
}

impl Value {
    pub fn ident(name: impl Into<String>) -> Self {
        Value::Ident(name.into())
    }

    pub fn px(value: f64) -> Self {
        Value::Length(value, LengthUnit::Px)
    }

    pub fn is_inherit(&self) -> bool {
        matches!(self, Value::Inherit)
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self.computed() {
            Value::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// The length in pixels, for a computed absolute length.
    pub fn as_px(&self) -> Option<f64> {
        match self.computed() {
            Value::Length(v, LengthUnit::Px) => Some(*v),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.computed() {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<RgbaColor> {
        match self.computed() {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// The final value: the inner computed value of a wrapper, or `self`.
    pub fn computed(&self) -> &Value {
        match self {
            Value::Computed(cv) => &cv.computed,
            other => other,
        }
    }

    /// The value as cascaded: the inner cascaded value of a wrapper, or `self`.
    pub fn cascaded(&self) -> &Value {
        match self {
            Value::Computed(cv) => &cv.cascaded,
            other => other,
        }
    }

    /// Consumes the value, keeping only its cascaded part.
    pub fn into_cascaded(self) -> Value {
        match self {
            Value::Computed(cv) => cv.cascaded,
            other => other,
        }
    }

    pub(crate) fn wrap_computed(cascaded: Value, computed: Value) -> Self {
        Value::Computed(Box::new(ComputedValue { cascaded, computed }))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Inherit => write!(f, "inherit"),
            Value::Ident(name) => write!(f, "{}", name),
            Value::Number(n) => write!(f, "{}", n),
            Value::Length(v, unit) => write!(f, "{}{}", v, unit.name()),
            Value::Angle(v, unit) => write!(f, "{}{}", v, unit.name()),
            Value::Percentage(p) => write!(f, "{}%", p),
            Value::Color(c) => write!(f, "{}", c),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Uri(u) => write!(f, "url({})", u),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Computed(cv) => write!(f, "{}", cv.computed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_units() {
        assert_eq!(LengthUnit::In.absolute_px(), Some(96.0));
        assert_eq!(LengthUnit::Pt.absolute_px().map(|v| v * 72.0), Some(96.0));
        assert_eq!(LengthUnit::Em.absolute_px(), None);
    }

    #[test]
    fn test_wrapper_accessors() {
        let v = Value::wrap_computed(Value::Length(2.0, LengthUnit::Em), Value::px(32.0));
        assert_eq!(v.as_px(), Some(32.0));
        assert_eq!(v.cascaded(), &Value::Length(2.0, LengthUnit::Em));
        assert_eq!(v.to_string(), "32px");
        assert_eq!(v.into_cascaded().to_string(), "2em");
    }
}
