//! # css-syntax - CSS parsing for the cascade engine
//!
//! This crate turns CSS text into structured, property-agnostic data:
//!
//! - **Parsing**: stylesheets into [`RawRule`]s, declaration blocks into
//!   [`RawDeclaration`]s, single values into [`LexicalValue`]s and media lists
//!   into [`MediaList`]s
//! - **Selectors**: the selector model with [`Specificity`], and matching
//!   against any tree that implements [`ElementTree`]
//! - **Colors**: [`RgbaColor`] literal parsing
//!
//! Property names are not interpreted here. The engine's property registry
//! decides which names exist and how their values are typed.
//!
//! ## Quick Start
//!
//! ```rust
//! use css_syntax::parser::parse_stylesheet;
//!
//! let source = r#"
//!     rect { fill: red; stroke-width: 2px; }
//!     @media print {
//!         rect.primary { fill: black !important; }
//!     }
//! "#;
//!
//! let rules = parse_stylesheet(source).expect("valid CSS");
//! assert_eq!(rules.len(), 2);
//! ```
//!
//! ## Supported Syntax
//!
//! - Type, universal, class, ID and attribute selectors
//! - `:first-child`, pseudo-elements (`::before`, legacy `:before`)
//! - Descendant, child (`>`), adjacent (`+`) and general sibling (`~`)
//!   combinators
//! - `@media` groups (nestable) and `@import`
//! - `!important`
//! - Block comments (`/* */`)

pub mod color;
pub mod error;
pub mod lexical;
pub mod matching;
pub mod media;
pub mod parser;
pub mod rule;
pub mod selector;

pub use color::{ColorParseError, RgbaColor};
pub use error::SyntaxError;
pub use lexical::{LexicalUnit, LexicalValue};
pub use matching::ElementTree;
pub use media::MediaList;
pub use parser::{parse_declarations, parse_media, parse_property_value, parse_stylesheet};
pub use rule::{RawDeclaration, RawRule};
pub use selector::{
    Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList, SelectorPart,
    Specificity,
};
