//! Font properties.
//!
//! `font-size` resolves every relative form against the parent's computed
//! font-size, so it never depends on the element's own values. Keyword sizes
//! follow a 1.2 scale around `medium`.

use css_syntax::{LexicalUnit, LexicalValue};

use super::{
    Computed, Dependencies, ParseContext, StyleAccess, ValueManager, length_from_unit,
    single_unit, unexpected,
};
use crate::error::{CssError, Result};
use crate::value::{LengthUnit, Value};

/// The initial font-size, in pixels.
pub const MEDIUM_FONT_SIZE: f64 = 16.0;

/// Ratio between adjacent keyword sizes.
const SCALE: f64 = 1.2;

const SIZE_KEYWORDS: [(&str, f64); 7] = [
    ("xx-small", 9.0),
    ("x-small", 10.0),
    ("small", 13.0),
    ("medium", MEDIUM_FONT_SIZE),
    ("large", 18.0),
    ("x-large", 24.0),
    ("xx-large", 32.0),
];

#[derive(Debug, Default)]
pub struct FontSizeManager;

impl FontSizeManager {
    fn parent_px(access: &mut dyn StyleAccess) -> Result<f64> {
        let index = access
            .registry()
            .font_size_index()
            .ok_or_else(|| CssError::InvalidState("no font-size property registered".into()))?;
        Ok(access
            .parent_computed(index)?
            .and_then(|v| v.as_px())
            .unwrap_or(MEDIUM_FONT_SIZE))
    }
}

impl ValueManager for FontSizeManager {
    fn property_name(&self) -> &str {
        "font-size"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn default_value(&self) -> Value {
        Value::px(MEDIUM_FONT_SIZE)
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        let unit = single_unit(self.property_name(), value)?;
        let created = match unit {
            LexicalUnit::Ident(name) => {
                let name = name.to_ascii_lowercase();
                let known = name == "smaller"
                    || name == "larger"
                    || SIZE_KEYWORDS.iter().any(|(k, _)| *k == name);
                if !known {
                    return Err(CssError::invalid_value(
                        self.property_name(),
                        format!("unknown font size: {}", name),
                    ));
                }
                Value::Ident(name)
            }
            LexicalUnit::Percentage(p) => Value::Percentage(*p),
            other => match length_from_unit(self.property_name(), other)? {
                // `lh` would depend on a line-height that depends on font-size.
                Some(Value::Length(_, LengthUnit::Lh)) | None => {
                    return Err(unexpected(self.property_name(), other));
                }
                Some(length) => length,
            },
        };
        match created {
            Value::Length(v, _) | Value::Percentage(v) if v < 0.0 => Err(CssError::invalid_value(
                self.property_name(),
                "negative font size",
            )),
            created => Ok(created),
        }
    }

    fn compute_value(&self, access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        let relative = |px: f64| Computed::with(Value::px(px), Dependencies::PARENT);
        match &value {
            Value::Length(v, unit) => match unit.absolute_px() {
                Some(factor) => Ok(Computed::new(Value::px(v * factor))),
                None if *unit == LengthUnit::Ex => Ok(relative(v * 0.5 * Self::parent_px(access)?)),
                None => Ok(relative(v * Self::parent_px(access)?)),
            },
            Value::Percentage(p) => Ok(relative(p / 100.0 * Self::parent_px(access)?)),
            Value::Ident(name) if name == "smaller" => Ok(relative(Self::parent_px(access)? / SCALE)),
            Value::Ident(name) if name == "larger" => Ok(relative(Self::parent_px(access)? * SCALE)),
            Value::Ident(name) => SIZE_KEYWORDS
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, px)| Computed::new(Value::px(*px)))
                .ok_or_else(|| CssError::invalid_value(self.property_name(), format!("unknown font size: {}", name))),
            _ => Ok(Computed::new(value)),
        }
    }
}

/// `font-family`: a comma-separated list of family names.
///
/// Unquoted multi-word names are joined with single spaces, and generic
/// families stay identifiers.
#[derive(Debug, Default)]
pub struct FontFamilyManager;

const GENERIC_FAMILIES: [&str; 5] = ["serif", "sans-serif", "cursive", "fantasy", "monospace"];

impl ValueManager for FontFamilyManager {
    fn property_name(&self) -> &str {
        "font-family"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn default_value(&self) -> Value {
        Value::List(vec![Value::ident("serif")])
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        let mut families = Vec::new();
        for group in value.units.split(|u| matches!(u, LexicalUnit::Comma)) {
            let family = match group {
                [LexicalUnit::String(name)] => Value::String(name.clone()),
                [LexicalUnit::Ident(name)]
                    if GENERIC_FAMILIES.contains(&name.to_ascii_lowercase().as_str()) =>
                {
                    Value::Ident(name.to_ascii_lowercase())
                }
                words if !words.is_empty() => {
                    let parts = words
                        .iter()
                        .map(|w| w.as_ident().ok_or_else(|| unexpected(self.property_name(), w)))
                        .collect::<Result<Vec<_>>>()?;
                    Value::String(parts.join(" "))
                }
                _ => {
                    return Err(CssError::invalid_value(
                        self.property_name(),
                        "empty family name",
                    ));
                }
            };
            families.push(family);
        }
        Ok(Value::List(families))
    }
}

/// `font-weight`: numeric weights, `normal`/`bold`, and the parent-relative
/// `bolder`/`lighter`.
#[derive(Debug, Default)]
pub struct FontWeightManager;

impl FontWeightManager {
    fn bolder(parent: f64) -> f64 {
        if parent < 350.0 {
            400.0
        } else if parent < 550.0 {
            700.0
        } else if parent < 750.0 {
            900.0
        } else {
            parent
        }
    }

    fn lighter(parent: f64) -> f64 {
        if parent < 100.0 {
            parent
        } else if parent < 550.0 {
            100.0
        } else if parent < 750.0 {
            400.0
        } else {
            700.0
        }
    }
}

impl ValueManager for FontWeightManager {
    fn property_name(&self) -> &str {
        "font-weight"
    }

    fn is_inherited(&self) -> bool {
        true
    }

    fn default_value(&self) -> Value {
        Value::Number(400.0)
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        match single_unit(self.property_name(), value)? {
            LexicalUnit::Number(n) if (1.0..=1000.0).contains(n) => Ok(Value::Number(*n)),
            LexicalUnit::Ident(name) => match name.to_ascii_lowercase().as_str() {
                "normal" => Ok(Value::Number(400.0)),
                "bold" => Ok(Value::Number(700.0)),
                relative @ ("bolder" | "lighter") => Ok(Value::ident(relative)),
                other => Err(CssError::invalid_value(
                    self.property_name(),
                    format!("unknown weight: {}", other),
                )),
            },
            other => Err(unexpected(self.property_name(), other)),
        }
    }

    fn compute_value(&self, access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        let Some(relative) = value.as_ident().map(str::to_string) else {
            return Ok(Computed::new(value));
        };
        let index = access
            .registry()
            .index_of(self.property_name())
            .ok_or_else(|| CssError::InvalidState("font-weight is not registered".into()))?;
        let parent = access
            .parent_computed(index)?
            .and_then(|v| v.as_number())
            .unwrap_or(400.0);
        let weight = if relative == "bolder" {
            Self::bolder(parent)
        } else {
            Self::lighter(parent)
        };
        Ok(Computed::with(Value::Number(weight), Dependencies::PARENT))
    }
}
