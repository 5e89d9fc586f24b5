use css_syntax::{LexicalUnit, LexicalValue};

use super::{ParseContext, ValueManager, single_unit, unexpected};
use crate::error::Result;
use crate::value::Value;

/// A number clamped into `[0, 1]`, such as `opacity`. Percentages are
/// accepted and divided by 100.
#[derive(Debug)]
pub struct UnitIntervalManager {
    name: &'static str,
    inherited: bool,
}

impl UnitIntervalManager {
    pub const fn new(name: &'static str, inherited: bool) -> Self {
        Self { name, inherited }
    }

    pub const fn opacity() -> Self {
        Self::new("opacity", false)
    }
}

impl ValueManager for UnitIntervalManager {
    fn property_name(&self) -> &str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn default_value(&self) -> Value {
        Value::Number(1.0)
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        let n = match single_unit(self.name, value)? {
            LexicalUnit::Number(n) => *n,
            LexicalUnit::Percentage(p) => p / 100.0,
            other => return Err(unexpected(self.name, other)),
        };
        Ok(Value::Number(n.clamp(0.0, 1.0)))
    }
}
