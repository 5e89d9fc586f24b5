use css_syntax::{LexicalUnit, LexicalValue};

use super::{
    Computed, Dependencies, ParseContext, StyleAccess, ValueManager, font_size_px,
    length_from_unit, resolve_length, single_unit, unexpected,
};
use crate::error::{CssError, Result};
use crate::value::{LengthUnit, Value};

/// Multiple of the font-size used for `line-height: normal`.
pub const NORMAL_FACTOR: f64 = 1.2;

/// `line-height`: `normal`, a number, a length or a percentage.
///
/// Numbers stay numbers so that descendants scale them by their own
/// font-size. Percentages and font-relative lengths become pixels.
#[derive(Debug, Default)]
pub struct LineHeightManager;

impl ValueManager for LineHeightManager {
    fn property_name(&self) -> &str {
        "line-height"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn default_value(&self) -> Value {
        Value::ident("normal")
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        let name = self.property_name();
        let created = match single_unit(name, value)? {
            LexicalUnit::Ident(ident) if ident.eq_ignore_ascii_case("normal") => {
                return Ok(Value::ident("normal"));
            }
            LexicalUnit::Number(n) => Value::Number(*n),
            LexicalUnit::Percentage(p) => Value::Percentage(*p),
            other => match length_from_unit(name, other)? {
                Some(Value::Length(_, LengthUnit::Lh)) | None => return Err(unexpected(name, other)),
                Some(length) => length,
            },
        };
        match created {
            Value::Number(v) | Value::Length(v, _) | Value::Percentage(v) if v < 0.0 => {
                Err(CssError::invalid_value(name, "negative line height"))
            }
            created => Ok(created),
        }
    }

    fn compute_value(&self, access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        match value {
            Value::Percentage(p) => Ok(Computed::with(
                Value::px(p / 100.0 * font_size_px(access)?),
                Dependencies::FONT_SIZE,
            )),
            Value::Length(v, unit) => resolve_length(access, v, unit),
            other => Ok(Computed::new(other)),
        }
    }
}
