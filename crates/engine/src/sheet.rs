//! Compiled style sheets.
//!
//! A [`StyleSheet`] is the parser's output with every declaration resolved
//! against a [`PropertyRegistry`]: shorthands expanded, names replaced by
//! property indices and values created by the value managers.

use css_syntax::{MediaList, RawDeclaration, SelectorList};
use url::Url;

use crate::error::{CssError, Result};
use crate::managers::ParseContext;
use crate::registry::PropertyRegistry;
use crate::value::Value;

/// One compiled declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct DeclarationEntry {
    pub index: usize,
    pub value: Value,
    pub important: bool,
}

/// The declarations of a rule or an inline style, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDeclaration {
    entries: Vec<DeclarationEntry>,
}

impl StyleDeclaration {
    /// Compiles raw declarations.
    ///
    /// Unknown property names and rejected values are errors. `inherit` is
    /// stored as [`Value::Inherit`] without consulting the value manager.
    pub fn compile(
        registry: &PropertyRegistry,
        raw: &[RawDeclaration],
        ctx: &ParseContext<'_>,
    ) -> Result<Self> {
        let mut declaration = StyleDeclaration::default();
        for decl in raw {
            if let Some(index) = registry.index_of(&decl.name) {
                let value = create_value(registry, index, &decl.value, ctx)?;
                declaration.push(index, value, decl.important);
            } else if let Some(shorthand) = registry.shorthand_index_of(&decl.name) {
                for (name, value) in registry.shorthand(shorthand).expand(&decl.value)? {
                    let index = registry
                        .index_of(&name)
                        .ok_or_else(|| CssError::UnknownProperty(name.clone()))?;
                    let value = create_value(registry, index, &value, ctx)?;
                    declaration.push(index, value, decl.important);
                }
            } else {
                return Err(CssError::UnknownProperty(decl.name.clone()));
            }
        }
        Ok(declaration)
    }

    pub fn push(&mut self, index: usize, value: Value, important: bool) {
        self.entries.push(DeclarationEntry {
            index,
            value,
            important,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeclarationEntry> {
        self.entries.iter()
    }
}

pub(crate) fn create_value(
    registry: &PropertyRegistry,
    index: usize,
    value: &css_syntax::LexicalValue,
    ctx: &ParseContext<'_>,
) -> Result<Value> {
    if value.is_inherit() {
        return Ok(Value::Inherit);
    }
    registry.manager(index).create_value(value, ctx)
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleRule {
    pub selectors: SelectorList,
    pub declaration: StyleDeclaration,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MediaRule {
    pub media: MediaList,
    pub rules: Vec<Rule>,
}

/// An `@import` with the rules of the sheet it loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct ImportRule {
    pub uri: Url,
    pub media: MediaList,
    pub rules: Vec<Rule>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Style(StyleRule),
    Media(MediaRule),
    Import(ImportRule),
}

/// A compiled style sheet with its media, title and alternate flag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleSheet {
    rules: Vec<Rule>,
    media: MediaList,
    title: Option<String>,
    alternate: bool,
    uri: Option<Url>,
}

impl StyleSheet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_media(mut self, media: MediaList) -> Self {
        self.media = media;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Marks the sheet as an alternate sheet. It then applies only when its
    /// title is the engine's selected alternate title.
    pub fn alternate(mut self) -> Self {
        self.alternate = true;
        self
    }

    pub fn with_uri(mut self, uri: Option<Url>) -> Self {
        self.uri = uri;
        self
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn media(&self) -> &MediaList {
        &self.media
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_alternate(&self) -> bool {
        self.alternate
    }

    pub fn uri(&self) -> Option<&Url> {
        self.uri.as_ref()
    }
}

/// Error returned by a [`StyleSheetLoader`].
pub type LoadError = Box<dyn std::error::Error + Send + Sync>;

/// Fetches the text of imported style sheets.
pub trait StyleSheetLoader: Send + Sync {
    fn load(&self, uri: &Url) -> std::result::Result<String, LoadError>;
}

impl<F> StyleSheetLoader for F
where
    F: Fn(&Url) -> std::result::Result<String, LoadError> + Send + Sync,
{
    fn load(&self, uri: &Url) -> std::result::Result<String, LoadError> {
        self(uri)
    }
}
