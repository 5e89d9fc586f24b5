use css_syntax::{LexicalUnit, LexicalValue};

use super::{
    Computed, ParseContext, StyleAccess, ValueManager, length_from_unit, resolve_length,
    single_unit, unexpected,
};
use crate::error::{CssError, Result};
use crate::value::Value;

/// A length property such as `width` or `margin-left`.
///
/// Percentages are kept as they are: they resolve against layout, which is
/// not the engine's concern.
#[derive(Debug)]
pub struct LengthManager {
    name: &'static str,
    inherited: bool,
    allow_auto: bool,
    allow_negative: bool,
    default: Value,
}

impl LengthManager {
    pub fn new(name: &'static str, default: Value) -> Self {
        Self {
            name,
            inherited: false,
            allow_auto: false,
            allow_negative: false,
            default,
        }
    }

    pub fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }

    pub fn allow_auto(mut self) -> Self {
        self.allow_auto = true;
        self
    }

    pub fn allow_negative(mut self) -> Self {
        self.allow_negative = true;
        self
    }

    /// `width` and `height`.
    pub fn size(name: &'static str) -> Self {
        Self::new(name, Value::ident("auto")).allow_auto()
    }

    /// One side of the margin.
    pub fn margin(name: &'static str) -> Self {
        Self::new(name, Value::px(0.0)).allow_auto().allow_negative()
    }

    pub fn text_indent() -> Self {
        Self::new("text-indent", Value::px(0.0))
            .inherited()
            .allow_negative()
    }
}

impl ValueManager for LengthManager {
    fn property_name(&self) -> &str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        let unit = single_unit(self.name, value)?;
        let created = match unit {
            LexicalUnit::Ident(name) if self.allow_auto && name.eq_ignore_ascii_case("auto") => {
                return Ok(Value::ident("auto"));
            }
            LexicalUnit::Percentage(p) => Value::Percentage(*p),
            other => length_from_unit(self.name, other)?.ok_or_else(|| unexpected(self.name, other))?,
        };
        match created {
            Value::Length(v, _) | Value::Percentage(v) if v < 0.0 && !self.allow_negative => {
                Err(CssError::invalid_value(self.name, "negative length"))
            }
            created => Ok(created),
        }
    }

    fn compute_value(&self, access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        match value {
            Value::Length(v, unit) => resolve_length(access, v, unit),
            other => Ok(Computed::new(other)),
        }
    }
}
