//! Per-property value logic.
//!
//! Each registered property has a [`ValueManager`] that knows whether the
//! property is inherited, what its initial value is, how to turn a lexical
//! value into a [`Value`] and how to resolve relative values. Shorthands have
//! a [`ShorthandManager`] that expands them into longhands before any value
//! is created.
//!
//! ## Builtin managers
//!
//! - [`color`]: `color`, `background-color`, `border-color`
//! - [`font`]: `font-family`, `font-size`, `font-style`, `font-weight`
//! - [`keyword`]: plain keyword properties such as `display`
//! - [`length`]: lengths such as `width` and `margin-top`
//! - [`line_height`]: `line-height`
//! - [`number`]: `opacity`
//! - [`orientation`]: `glyph-orientation-vertical`, `glyph-orientation-horizontal`
//! - [`uri`]: `clip-path`, `marker-start`
//! - [`margin`]: the `margin` shorthand

pub mod color;
pub mod font;
pub mod keyword;
pub mod length;
pub mod line_height;
pub mod margin;
pub mod number;
pub mod orientation;
pub mod uri;

use bitflags::bitflags;
use css_syntax::{LexicalUnit, LexicalValue};
use url::Url;

use crate::error::{CssError, Result};
use crate::registry::PropertyRegistry;
use crate::value::{LengthUnit, Value};

bitflags! {
    /// What a computed value was derived from, besides its cascaded value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Dependencies: u8 {
        /// The parent's computed value of the same property.
        const PARENT      = 0b0001;
        /// The element's own computed font-size.
        const FONT_SIZE   = 0b0010;
        /// The element's own computed line-height.
        const LINE_HEIGHT = 0b0100;
        /// The element's own computed color.
        const COLOR       = 0b1000;
    }
}

/// A resolved value and the dependencies it was resolved with.
#[derive(Clone, Debug, PartialEq)]
pub struct Computed {
    pub value: Value,
    pub dependencies: Dependencies,
}

impl Computed {
    /// A value that needed nothing but itself.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            dependencies: Dependencies::empty(),
        }
    }

    pub fn with(value: Value, dependencies: Dependencies) -> Self {
        Self {
            value,
            dependencies,
        }
    }
}

/// Context for turning lexical values into typed values.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseContext<'a> {
    /// Base URI for relative `url()` values.
    pub base_uri: Option<&'a Url>,
}

impl<'a> ParseContext<'a> {
    pub fn new(base_uri: Option<&'a Url>) -> Self {
        Self { base_uri }
    }

    /// Resolves `href` against the base URI, or parses it as absolute.
    pub fn resolve_uri(&self, href: &str) -> std::result::Result<Url, url::ParseError> {
        match self.base_uri {
            Some(base) => base.join(href),
            None => Url::parse(href),
        }
    }
}

/// Read access to other computed values while resolving one property.
///
/// Lookups are computed on demand and memoized in the style maps they
/// belong to.
pub trait StyleAccess {
    /// The pseudo-element being resolved, if any.
    fn pseudo_element(&self) -> Option<&str>;

    fn registry(&self) -> &PropertyRegistry;

    /// The computed value of another property of the same element and
    /// pseudo-element. Asking for the property being resolved is an
    /// [`CssError::InvalidState`].
    fn computed(&mut self, index: usize) -> Result<Value>;

    /// The computed value of a property of the stylable parent, or `None` at
    /// the root. Pseudo-elements are never consulted on the parent.
    fn parent_computed(&mut self, index: usize) -> Result<Option<Value>>;
}

/// Value logic for one longhand property.
///
/// `inherit` never reaches a manager: declarations carrying it are stored as
/// [`Value::Inherit`] and resolved by the engine.
pub trait ValueManager: Send + Sync {
    fn property_name(&self) -> &str;

    fn is_inherited(&self) -> bool;

    fn default_value(&self) -> Value;

    /// Converts a parsed value into a cascaded value.
    fn create_value(&self, value: &LexicalValue, ctx: &ParseContext<'_>) -> Result<Value>;

    /// Resolves a cascaded (or default) value into a computed value.
    ///
    /// Managers whose values never depend on anything keep the default.
    fn compute_value(&self, _access: &mut dyn StyleAccess, value: Value) -> Result<Computed> {
        Ok(Computed::new(value))
    }
}

/// Expansion of one shorthand property into longhands.
pub trait ShorthandManager: Send + Sync {
    fn property_name(&self) -> &str;

    /// Returns `(longhand name, value)` pairs in declaration order.
    fn expand(&self, value: &LexicalValue) -> Result<Vec<(String, LexicalValue)>>;
}

pub(crate) fn single_unit<'v>(property: &str, value: &'v LexicalValue) -> Result<&'v LexicalUnit> {
    value
        .single()
        .ok_or_else(|| CssError::invalid_value(property, format!("expected one value, got {:?}", value.to_string())))
}

pub(crate) fn unexpected(property: &str, unit: &LexicalUnit) -> CssError {
    CssError::invalid_value(property, format!("unexpected {}", unit))
}

/// Converts a dimension into a length. Unitless zero is `0px`.
pub(crate) fn length_from_unit(property: &str, unit: &LexicalUnit) -> Result<Option<Value>> {
    match unit {
        LexicalUnit::Dimension(v, name) => LengthUnit::from_name(name)
            .map(|u| Some(Value::Length(*v, u)))
            .ok_or_else(|| CssError::invalid_value(property, format!("unknown unit: {}", name))),
        LexicalUnit::Number(v) if *v == 0.0 => Ok(Some(Value::px(0.0))),
        _ => Ok(None),
    }
}

/// The computed font-size of the element, in pixels.
pub(crate) fn font_size_px(access: &mut dyn StyleAccess) -> Result<f64> {
    let index = access
        .registry()
        .font_size_index()
        .ok_or_else(|| CssError::InvalidState("no font-size property registered".into()))?;
    access
        .computed(index)?
        .as_px()
        .ok_or_else(|| CssError::InvalidState("font-size did not compute to pixels".into()))
}

/// The computed line-height of the element, in pixels.
pub(crate) fn line_height_px(access: &mut dyn StyleAccess) -> Result<f64> {
    let index = access
        .registry()
        .line_height_index()
        .ok_or_else(|| CssError::InvalidState("no line-height property registered".into()))?;
    let line_height = access.computed(index)?;
    if let Some(px) = line_height.as_px() {
        return Ok(px);
    }
    let factor = match line_height.computed() {
        Value::Number(n) => *n,
        _ => line_height::NORMAL_FACTOR,
    };
    Ok(factor * font_size_px(access)?)
}

/// Resolves a length into pixels, declaring the dependencies it used.
pub(crate) fn resolve_length(
    access: &mut dyn StyleAccess,
    value: f64,
    unit: LengthUnit,
) -> Result<Computed> {
    if let Some(factor) = unit.absolute_px() {
        return Ok(Computed::new(Value::px(value * factor)));
    }
    match unit {
        LengthUnit::Em => Ok(Computed::with(
            Value::px(value * font_size_px(access)?),
            Dependencies::FONT_SIZE,
        )),
        LengthUnit::Ex => Ok(Computed::with(
            Value::px(value * font_size_px(access)? * 0.5),
            Dependencies::FONT_SIZE,
        )),
        _ => Ok(Computed::with(
            Value::px(value * line_height_px(access)?),
            Dependencies::LINE_HEIGHT | Dependencies::FONT_SIZE,
        )),
    }
}
