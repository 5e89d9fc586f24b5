use css_syntax::{LexicalUnit, LexicalValue};

use super::{ParseContext, ValueManager, single_unit, unexpected};
use crate::error::{CssError, Result};
use crate::value::Value;

/// A `none | url(...)` property such as `clip-path`.
///
/// Relative references are resolved when the value is created, against the
/// base URI of the sheet or element the declaration came from.
#[derive(Debug)]
pub struct UriManager {
    name: &'static str,
    inherited: bool,
}

impl UriManager {
    pub const fn new(name: &'static str, inherited: bool) -> Self {
        Self { name, inherited }
    }

    pub const fn clip_path() -> Self {
        Self::new("clip-path", false)
    }

    pub const fn marker_start() -> Self {
        Self::new("marker-start", true)
    }
}

impl ValueManager for UriManager {
    fn property_name(&self) -> &str {
        self.name
    }

    fn is_inherited(&self) -> bool {
        self.inherited
    }

    fn default_value(&self) -> Value {
        Value::ident("none")
    }

    fn create_value(&self, value: &LexicalValue, ctx: &ParseContext<'_>) -> Result<Value> {
        match single_unit(self.name, value)? {
            LexicalUnit::Ident(name) if name.eq_ignore_ascii_case("none") => Ok(Value::ident("none")),
            LexicalUnit::Url(href) => ctx
                .resolve_uri(href)
                .map(Value::Uri)
                .map_err(|e| CssError::invalid_value(self.name, format!("bad url {:?}: {}", href, e))),
            other => Err(unexpected(self.name, other)),
        }
    }
}
