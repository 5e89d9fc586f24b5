//! Color-valued properties.
//!
//! `currentcolor` is kept as an identifier in the cascaded value and resolved
//! when computing: against the element's own `color`, or against the parent's
//! `color` for the `color` property itself.

use css_syntax::{LexicalUnit, LexicalValue, RgbaColor};

use super::{Computed, Dependencies, ParseContext, StyleAccess, ValueManager, single_unit, unexpected};
use crate::error::{CssError, Result};
use crate::value::Value;

const CURRENT_COLOR: &str = "currentcolor";

pub(crate) fn parse_color(property: &str, value: &LexicalValue) -> Result<Value> {
    let unit = single_unit(property, value)?;
    let text = match unit {
        LexicalUnit::Ident(name) if name.eq_ignore_ascii_case(CURRENT_COLOR) => {
            return Ok(Value::ident(CURRENT_COLOR));
        }
        LexicalUnit::Ident(_) | LexicalUnit::Function { .. } | LexicalUnit::Hash(_) => {
            unit.to_string()
        }
        other => return Err(unexpected(property, other)),
    };
    RgbaColor::parse(&text)
        .map(Value::Color)
        .map_err(|e| CssError::invalid_value(property, e.to_string()))
}

fn is_current_color(value: &Value) -> bool {
    matches!(value, Value::Ident(name) if name == CURRENT_COLOR)
}

/// The `color` property: inherited, black by default.
#[derive(Debug, Default)]
pub struct ColorManager;

impl ValueManager for ColorManager {
    fn property_name(&self) -> &str {
        "color"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn default_value(&self) -> Value {
        Value::Color(RgbaColor::black())
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        parse_color(self.property_name(), value)
    }

    fn compute_value(&self, access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        if !is_current_color(&value) {
            return Ok(Computed::new(value));
        }
        let index = access
            .registry()
            .color_index()
            .ok_or_else(|| CssError::InvalidState("no color property registered".into()))?;
        let parent = access
            .parent_computed(index)?
            .unwrap_or_else(|| self.default_value());
        Ok(Computed::with(parent.computed().clone(), Dependencies::PARENT))
    }
}

/// A non-inherited color property such as `background-color`.
#[derive(Debug)]
pub struct PaintColorManager {
    name: &'static str,
    default: Value,
}

impl PaintColorManager {
    pub fn new(name: &'static str, default: Value) -> Self {
        Self { name, default }
    }

    pub fn background_color() -> Self {
        Self::new("background-color", Value::Color(RgbaColor::transparent()))
    }

    pub fn border_color() -> Self {
        Self::new("border-color", Value::ident(CURRENT_COLOR))
    }
}

impl ValueManager for PaintColorManager {
    fn property_name(&self) -> &str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        false
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        parse_color(self.name, value)
    }

    fn compute_value(&self, access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        if !is_current_color(&value) {
            return Ok(Computed::new(value));
        }
        let index = access
            .registry()
            .color_index()
            .ok_or_else(|| CssError::InvalidState("no color property registered".into()))?;
        let color = access.computed(index)?;
        Ok(Computed::with(color.computed().clone(), Dependencies::COLOR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::parse_property_value;

    fn parse(text: &str) -> Result<Value> {
        parse_color("color", &parse_property_value(text).unwrap())
    }

    #[test]
    fn test_color_forms() {
        assert_eq!(parse("red").unwrap(), Value::Color(RgbaColor::rgb(255, 0, 0)));
        assert_eq!(parse("#00f").unwrap(), Value::Color(RgbaColor::rgb(0, 0, 255)));
        assert_eq!(
            parse("rgb(0, 128, 0)").unwrap(),
            Value::Color(RgbaColor::rgb(0, 128, 0))
        );
        assert_eq!(parse("CurrentColor").unwrap(), Value::ident("currentcolor"));
    }

    #[test]
    fn test_invalid_colors() {
        assert!(matches!(parse("nocolor"), Err(CssError::InvalidValue { .. })));
        assert!(parse("12px").is_err());
        assert!(parse("red blue").is_err());
    }
}
