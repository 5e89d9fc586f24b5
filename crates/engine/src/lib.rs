//! # css-engine - CSS cascade and computed styles
//!
//! Resolves the style of every element of a document from style sheets,
//! presentational attributes and inline styles, and keeps the results
//! current as inline styles change.
//!
//! - **Cascade**: user-agent, user, presentational hint, author and inline
//!   declarations merged into one [`StyleMap`] per element and pseudo-element
//! - **Computed values**: inheritance and relative units (`em`, `lh`,
//!   `currentcolor`, ...) resolved on demand and memoized in the style map
//! - **Invalidation**: inline style changes patch the affected values, clear
//!   the dependents in the subtree and notify listeners
//!
//! The engine does not own the tree. Any tree implementing [`CssDocument`]
//! can be styled; [`dom::Document`] is a small arena tree that does.
//!
//! ## Quick Start
//!
//! ```rust
//! use css_engine::{CssEngine, EngineOptions, PropertyRegistry, Value, props};
//! use css_engine::dom::Document;
//!
//! let engine: CssEngine = CssEngine::new(PropertyRegistry::standard(), EngineOptions::new());
//! let sheet = engine
//!     .parse_style_sheet("svg { font-size: 12px } rect { width: 2em }", None, "")
//!     .unwrap();
//!
//! let mut doc = Document::new();
//! let svg = doc.create_root("svg");
//! doc.append_style_sheet(svg, sheet);
//! let rect = doc.append_element(svg, "rect");
//!
//! let width = engine.computed_style(&mut doc, rect, None, props::WIDTH).unwrap();
//! assert_eq!(width, Value::px(24.0));
//!
//! let change = doc.set_attribute(svg, "style", "font-size: 20px");
//! engine.handle_attr_modified(&mut doc, svg, &change).unwrap();
//! let width = engine.computed_style(&mut doc, rect, None, props::WIDTH).unwrap();
//! assert_eq!(width, Value::px(40.0));
//! ```
//!
//! ## Modules
//!
//! - [`registry`]: property indices and the builtin property table
//! - [`managers`]: per-property parsing and value computation
//! - [`style_map`]: per-element slots with origin and state flags
//! - [`matcher`]: rule selection and specificity ordering
//! - [`document`]: the tree collaborator trait and attribute mutations
//! - [`events`]: style change notifications

pub mod document;
pub mod dom;
pub mod error;
pub mod events;
pub mod managers;
pub mod matcher;
pub mod registry;
pub mod sheet;
pub mod style_map;
pub mod value;

mod cascade;
mod computed;
mod engine;
mod propagate;

pub use document::{Attr, AttrChange, AttrMutation, CssDocument};
pub use dom::{Document, NodeId};
pub use engine::{CssEngine, EngineOptions};
pub use error::{CssError, Result};
pub use events::{CssEngineListener, ListenerError, ListenerId, StyleChangeEvent};
pub use managers::{Computed, Dependencies, ParseContext, ShorthandManager, StyleAccess, ValueManager};
pub use registry::{PropertyRegistry, props};
pub use sheet::{
    DeclarationEntry, ImportRule, LoadError, MediaRule, Rule, StyleDeclaration, StyleRule,
    StyleSheet, StyleSheetLoader,
};
pub use style_map::{Origin, SlotFlags, StyleMap};
pub use value::{AngleUnit, ComputedValue, LengthUnit, Value};
