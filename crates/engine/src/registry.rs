//! The property registry.
//!
//! A [`PropertyRegistry`] fixes the index of every longhand property for the
//! lifetime of an engine. Style maps are indexed by these positions, and
//! compiled declarations carry them instead of names.
//!
//! ## Standard properties
//!
//! [`PropertyRegistry::standard`] returns a shared registry with the builtin
//! managers in the order of the constants in [`props`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::managers::color::{ColorManager, PaintColorManager};
use crate::managers::font::{FontFamilyManager, FontSizeManager, FontWeightManager};
use crate::managers::keyword::KeywordManager;
use crate::managers::length::LengthManager;
use crate::managers::line_height::LineHeightManager;
use crate::managers::margin::MarginShorthandManager;
use crate::managers::number::UnitIntervalManager;
use crate::managers::orientation::GlyphOrientationManager;
use crate::managers::uri::UriManager;
use crate::managers::{ShorthandManager, ValueManager};
use crate::value::Value;

/// Indices of the standard registry.
pub mod props {
    pub const COLOR: usize = 0;
    pub const DISPLAY: usize = 1;
    pub const FONT_FAMILY: usize = 2;
    pub const FONT_SIZE: usize = 3;
    pub const FONT_STYLE: usize = 4;
    pub const FONT_WEIGHT: usize = 5;
    pub const LINE_HEIGHT: usize = 6;
    pub const VISIBILITY: usize = 7;
    pub const OPACITY: usize = 8;
    pub const WIDTH: usize = 9;
    pub const HEIGHT: usize = 10;
    pub const MARGIN_TOP: usize = 11;
    pub const MARGIN_RIGHT: usize = 12;
    pub const MARGIN_BOTTOM: usize = 13;
    pub const MARGIN_LEFT: usize = 14;
    pub const TEXT_INDENT: usize = 15;
    pub const BACKGROUND_COLOR: usize = 16;
    pub const BORDER_COLOR: usize = 17;
    pub const GLYPH_ORIENTATION_VERTICAL: usize = 18;
    pub const GLYPH_ORIENTATION_HORIZONTAL: usize = 19;
    pub const CLIP_PATH: usize = 20;
    pub const MARKER_START: usize = 21;
}

static STANDARD: Lazy<Arc<PropertyRegistry>> = Lazy::new(|| {
    Arc::new(PropertyRegistry::new(
        vec![
            Box::new(ColorManager),
            Box::new(KeywordManager::display()),
            Box::new(FontFamilyManager),
            Box::new(FontSizeManager),
            Box::new(KeywordManager::font_style()),
            Box::new(FontWeightManager),
            Box::new(LineHeightManager),
            Box::new(KeywordManager::visibility()),
            Box::new(UnitIntervalManager::opacity()),
            Box::new(LengthManager::size("width")),
            Box::new(LengthManager::size("height")),
            Box::new(LengthManager::margin("margin-top")),
            Box::new(LengthManager::margin("margin-right")),
            Box::new(LengthManager::margin("margin-bottom")),
            Box::new(LengthManager::margin("margin-left")),
            Box::new(LengthManager::text_indent()),
            Box::new(PaintColorManager::background_color()),
            Box::new(PaintColorManager::border_color()),
            Box::new(GlyphOrientationManager::vertical()),
            Box::new(GlyphOrientationManager::horizontal()),
            Box::new(UriManager::clip_path()),
            Box::new(UriManager::marker_start()),
        ],
        vec![Box::new(MarginShorthandManager)],
    ))
});

/// Property descriptors in index order, plus the shorthand table.
pub struct PropertyRegistry {
    managers: Vec<Box<dyn ValueManager>>,
    shorthands: Vec<Box<dyn ShorthandManager>>,
    indices: HashMap<String, usize>,
    shorthand_indices: HashMap<String, usize>,
    font_size_index: Option<usize>,
    line_height_index: Option<usize>,
    color_index: Option<usize>,
}

impl PropertyRegistry {
    /// Builds a registry. When a name appears twice, lookups find the first.
    pub fn new(
        managers: Vec<Box<dyn ValueManager>>,
        shorthands: Vec<Box<dyn ShorthandManager>>,
    ) -> Self {
        let mut indices = HashMap::with_capacity(managers.len());
        for (i, manager) in managers.iter().enumerate() {
            indices.entry(manager.property_name().to_string()).or_insert(i);
        }
        let mut shorthand_indices = HashMap::with_capacity(shorthands.len());
        for (i, shorthand) in shorthands.iter().enumerate() {
            shorthand_indices
                .entry(shorthand.property_name().to_string())
                .or_insert(i);
        }
        let font_size_index = indices.get("font-size").copied();
        let line_height_index = indices.get("line-height").copied();
        let color_index = indices.get("color").copied();

        Self {
            managers,
            shorthands,
            indices,
            shorthand_indices,
            font_size_index,
            line_height_index,
            color_index,
        }
    }

    /// The shared builtin registry.
    pub fn standard() -> Arc<PropertyRegistry> {
        Arc::clone(&STANDARD)
    }

    /// Number of longhand properties.
    pub fn len(&self) -> usize {
        self.managers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.managers.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn shorthand_index_of(&self, name: &str) -> Option<usize> {
        self.shorthand_indices.get(name).copied()
    }

    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn manager(&self, index: usize) -> &dyn ValueManager {
        self.managers[index].as_ref()
    }

    pub fn shorthand(&self, index: usize) -> &dyn ShorthandManager {
        self.shorthands[index].as_ref()
    }

    pub fn property_name(&self, index: usize) -> &str {
        self.manager(index).property_name()
    }

    pub fn is_inherited(&self, index: usize) -> bool {
        self.manager(index).is_inherited()
    }

    pub fn default_value(&self, index: usize) -> Value {
        self.manager(index).default_value()
    }

    pub fn font_size_index(&self) -> Option<usize> {
        self.font_size_index
    }

    pub fn line_height_index(&self) -> Option<usize> {
        self.line_height_index
    }

    pub fn color_index(&self) -> Option<usize> {
        self.color_index
    }
}

impl fmt::Debug for PropertyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.managers.iter().map(|m| m.property_name()).collect();
        f.debug_struct("PropertyRegistry")
            .field("properties", &names)
            .field("shorthands", &self.shorthands.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_indices() {
        let registry = PropertyRegistry::standard();
        assert_eq!(registry.len(), 22);
        assert_eq!(
            registry.index_of("glyph-orientation-horizontal"),
            Some(props::GLYPH_ORIENTATION_HORIZONTAL)
        );
        assert_eq!(registry.index_of("marker-start"), Some(props::MARKER_START));
        assert_eq!(registry.index_of("color"), Some(props::COLOR));
        assert_eq!(registry.index_of("font-size"), Some(props::FONT_SIZE));
        assert_eq!(registry.index_of("border-color"), Some(props::BORDER_COLOR));
        assert_eq!(registry.font_size_index(), Some(props::FONT_SIZE));
        assert_eq!(registry.line_height_index(), Some(props::LINE_HEIGHT));
        assert_eq!(registry.color_index(), Some(props::COLOR));
        assert_eq!(registry.index_of("margin"), None);
        assert_eq!(registry.shorthand_index_of("margin"), Some(0));
    }

    #[test]
    fn test_first_occurrence_wins() {
        let registry = PropertyRegistry::new(
            vec![
                Box::new(KeywordManager::display()),
                Box::new(ColorManager),
                Box::new(ColorManager),
            ],
            Vec::new(),
        );
        assert_eq!(registry.color_index(), Some(1));
        assert_eq!(registry.index_of("color"), Some(1));
        assert_eq!(registry.font_size_index(), None);
    }

    #[test]
    fn test_inheritance_table() {
        let registry = PropertyRegistry::standard();
        assert!(registry.is_inherited(props::COLOR));
        assert!(registry.is_inherited(props::FONT_SIZE));
        assert!(!registry.is_inherited(props::DISPLAY));
        assert!(!registry.is_inherited(props::WIDTH));
        assert!(!registry.is_inherited(props::CLIP_PATH));
        assert!(registry.is_inherited(props::MARKER_START));
        assert_eq!(registry.default_value(props::FONT_SIZE), Value::px(16.0));
    }
}
