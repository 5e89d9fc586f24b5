//! Parsed, uncompiled stylesheet rules.
//!
//! These carry property names and lexical values exactly as written. The
//! engine compiles them against its property registry.

use crate::lexical::LexicalValue;
use crate::media::MediaList;
use crate::selector::SelectorList;

/// A `name: value [!important]` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct RawDeclaration {
    pub name: String,
    pub value: LexicalValue,
    pub important: bool,
}

impl RawDeclaration {
    pub fn new(name: impl Into<String>, value: LexicalValue, important: bool) -> Self {
        Self {
            name: name.into(),
            value,
            important,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RawRule {
    /// `selectors { declarations }`
    Style {
        selectors: SelectorList,
        declarations: Vec<RawDeclaration>,
    },
    /// `@media list { rules }`
    Media { media: MediaList, rules: Vec<RawRule> },
    /// `@import "href" list;`
    Import { href: String, media: MediaList },
}

impl RawRule {
    /// The declarations of a style rule, empty for any other rule.
    pub fn declarations(&self) -> &[RawDeclaration] {
        match self {
            RawRule::Style { declarations, .. } => declarations,
            _ => &[],
        }
    }
}
