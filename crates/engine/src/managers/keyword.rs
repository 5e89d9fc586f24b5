use css_syntax::{LexicalUnit, LexicalValue};

use super::{ParseContext, ValueManager, single_unit, unexpected};
use crate::error::{CssError, Result};
use crate::value::Value;

/// A property whose values are a fixed set of identifiers.
#[derive(Debug)]
pub struct KeywordManager {
    name: &'static str,
    inherited: bool,
    default: &'static str,
    keywords: &'static [&'static str],
}

impl KeywordManager {
    pub const fn new(
        name: &'static str,
        inherited: bool,
        default: &'static str,
        keywords: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            inherited,
            default,
            keywords,
        }
    }

    pub const fn display() -> Self {
        Self::new(
            "display",
            false,
            "inline",
            &["inline", "block", "list-item", "inline-block", "table", "none"],
        )
    }

    pub const fn visibility() -> Self {
        Self::new("visibility", true, "visible", &["visible", "hidden", "collapse"])
    }

    pub const fn font_style() -> Self {
        Self::new("font-style", true, "normal", &["normal", "italic", "oblique"])
    }
}

impl ValueManager for KeywordManager {
    fn property_name(&self) -> &str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn default_value(&self) -> Value {
        Value::ident(self.default)
    }

    fn create_value(&self, value: &LexicalValue, _ctx: &ParseContext<'_>) -> Result<Value> {
        match single_unit(self.name, value)? {
            LexicalUnit::Ident(name) => {
                let name = name.to_ascii_lowercase();
                if self.keywords.contains(&name.as_str()) {
                    Ok(Value::Ident(name))
                } else {
                    Err(CssError::invalid_value(
                        self.name,
                        format!("unknown keyword: {}", name),
                    ))
                }
            }
            other => Err(unexpected(self.name, other)),
        }
    }
}
