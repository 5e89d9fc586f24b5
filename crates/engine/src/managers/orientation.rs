use css_syntax::{LexicalUnit, LexicalValue};

use super::{Computed, ParseContext, StyleAccess, ValueManager, single_unit, unexpected};
use crate::error::{CssError, Result};
use crate::value::{AngleUnit, Value};

/// An inherited angle property such as `glyph-orientation-vertical`.
///
/// Accepts `auto` (when allowed), an angle in `deg`, `grad` or `rad`, or a
/// unitless zero. Angles compute to degrees.
#[derive(Debug)]
pub struct GlyphOrientationManager {
    name: &'static str,
    allow_auto: bool,
}

impl GlyphOrientationManager {
    pub const fn vertical() -> Self {
        Self {
            name: "glyph-orientation-vertical",
            allow_auto: true,
        }
    }

    pub const fn horizontal() -> Self {
        Self {
            name: "glyph-orientation-horizontal",
            allow_auto: false,
        }
    }
}

impl ValueManager for GlyphOrientationManager {
    fn property_name(&self) -> &str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn default_value(&self) -> Value {
        if self.allow_auto {
            Value::ident("auto")
        } else {
            Value::Angle(0.0, AngleUnit::Deg)
        }
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        match single_unit(self.name, value)? {
            LexicalUnit::Ident(name) if self.allow_auto && name.eq_ignore_ascii_case("auto") => {
                Ok(Value::ident("auto"))
            }
            LexicalUnit::Dimension(v, unit) => AngleUnit::from_name(unit)
                .map(|u| Value::Angle(*v, u))
                .ok_or_else(|| CssError::invalid_value(self.name, format!("not an angle unit: {}", unit))),
            LexicalUnit::Number(n) if *n == 0.0 => Ok(Value::Angle(0.0, AngleUnit::Deg)),
            other => Err(unexpected(self.name, other)),
        }
    }

    fn compute_value(&self, _access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        let degrees = match value {
            Value::Angle(v, AngleUnit::Deg) => return Ok(Computed::new(Value::Angle(v, AngleUnit::Deg))),
            Value::Angle(v, AngleUnit::Grad) => v * 0.9,
            Value::Angle(v, AngleUnit::Rad) => v.to_degrees(),
            other => return Ok(Computed::new(other)),
        };
        Ok(Computed::new(Value::Angle(degrees, AngleUnit::Deg)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::parse_property_value;

    #[test]
    fn test_orientation_values() {
        let m = GlyphOrientationManager::vertical();
        let create = |text: &str| m.create_value(&parse_property_value(text).unwrap(), &ParseContext::default());
        assert_eq!(create("auto").unwrap(), Value::ident("auto"));
        assert_eq!(create("90deg").unwrap(), Value::Angle(90.0, AngleUnit::Deg));
        assert_eq!(create("0").unwrap(), Value::Angle(0.0, AngleUnit::Deg));
        assert!(create("90").is_err());
        assert!(create("90px").is_err());
        assert!(GlyphOrientationManager::horizontal()
            .create_value(&parse_property_value("auto").unwrap(), &ParseContext::default())
            .is_err());
    }
}
