//! Style resolution for element trees.
//!
//! This crate bundles the two workspace crates:
//!
//! - [`syntax`] (`css-syntax`): style sheets, declarations, selectors and
//!   media lists parsed into raw rules
//! - [`engine`] (`css-engine`): the cascade, computed values and incremental
//!   invalidation over any tree implementing [`CssDocument`]
//!
//! Most users only need the [`prelude`].
//!
//! ```rust
//! use cascade::prelude::*;
//!
//! let engine: CssEngine = CssEngine::new(PropertyRegistry::standard(), EngineOptions::new());
//! let mut doc = Document::new();
//! let svg = doc.create_root("svg");
//! doc.set_attribute(svg, "style", "color: #00f");
//! let text = doc.append_element(svg, "text");
//!
//! let color = engine.computed_style(&mut doc, text, None, props::COLOR).unwrap();
//! assert_eq!(color.as_color(), Some(RgbaColor::rgb(0, 0, 255)));
//! ```

pub use css_engine as engine;
pub use css_syntax as syntax;

pub use css_engine::{CssDocument, CssEngine, CssError, EngineOptions, Result};

/// The types needed to style a document.
pub mod prelude {
    pub use css_engine::dom::{Document, NodeId};
    pub use css_engine::{
        CssDocument, CssEngine, CssError, EngineOptions, PropertyRegistry, StyleChangeEvent,
        StyleMap, StyleSheet, StyleSheetLoader, Value, props,
    };
    pub use css_syntax::{MediaList, RgbaColor};
}
