//! The engine facade.
//!
//! A [`CssEngine`] holds everything that is shared by the elements of one
//! document: the property registry, the user-agent and user sheets, the
//! active media, the listeners and the loader used for `@import`. Per-element
//! state lives in the document, see [`CssDocument`].
//!
//! ```
//! use css_engine::{CssEngine, EngineOptions, PropertyRegistry, Value, props};
//! use css_engine::dom::Document;
//!
//! let mut doc = Document::new();
//! let svg = doc.create_root("svg");
//! let text = doc.append_element(svg, "text");
//! doc.set_attribute(svg, "style", "color: red; font-size: 20px");
//! doc.set_attribute(text, "style", "margin-left: 2em");
//!
//! let engine: CssEngine = CssEngine::new(PropertyRegistry::standard(), EngineOptions::default());
//! let margin = engine.computed_style(&mut doc, text, None, props::MARGIN_LEFT).unwrap();
//! assert_eq!(margin, Value::px(40.0));
//! ```

use std::fmt;
use std::sync::Arc;

use css_syntax::{MediaList, RawRule, parse_media, parse_stylesheet};
use url::Url;

use crate::document::CssDocument;
use crate::dom::NodeId;
use crate::error::{CssError, Result};
use crate::events::{CssEngineListener, ListenerError, ListenerId, ListenerSet, StyleChangeEvent};
use crate::managers::ParseContext;
use crate::registry::PropertyRegistry;
use crate::sheet::{ImportRule, MediaRule, Rule, StyleDeclaration, StyleRule, StyleSheet, StyleSheetLoader};

/// Configuration of a [`CssEngine`].
///
/// # Example
///
/// ```
/// use css_engine::EngineOptions;
///
/// let options = EngineOptions::new()
///     .pseudo_elements(["first-line", "before"])
///     .presentation_hints(None)
///     .media("screen")
///     .unwrap();
/// assert_eq!(options.pseudo_element_names().len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct EngineOptions {
    pub(crate) document_uri: Option<Url>,
    pub(crate) pseudo_elements: Vec<String>,
    pub(crate) style_attribute: Option<(Option<String>, String)>,
    pub(crate) hints_namespace: Option<Option<String>>,
    pub(crate) media: MediaList,
    pub(crate) alternate_title: Option<String>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            document_uri: None,
            pseudo_elements: Vec::new(),
            style_attribute: Some((None, "style".to_string())),
            hints_namespace: None,
            media: MediaList::default(),
            alternate_title: None,
        }
    }
}

impl EngineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The URI reported in errors and used as the base URI of elements the
    /// document gives no base for.
    pub fn document_uri(mut self, uri: Url) -> Self {
        self.document_uri = Some(uri);
        self
    }

    /// Pseudo-elements whose style maps are copied by
    /// [`CssEngine::import_cascaded_style_maps`].
    pub fn pseudo_elements<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pseudo_elements = names.into_iter().map(Into::into).collect();
        self
    }

    /// The attribute holding inline style declarations. Defaults to `style`
    /// in no namespace.
    pub fn style_attribute(mut self, namespace: Option<&str>, local_name: &str) -> Self {
        self.style_attribute = Some((namespace.map(str::to_string), local_name.to_string()));
        self
    }

    pub fn without_style_attribute(mut self) -> Self {
        self.style_attribute = None;
        self
    }

    /// Enables presentational hints: attributes in `namespace` named after a
    /// registered property are cascaded with the non-CSS origin.
    pub fn presentation_hints(mut self, namespace: Option<&str>) -> Self {
        self.hints_namespace = Some(namespace.map(str::to_string));
        self
    }

    /// Sets the active media from a media list such as `screen, print`.
    pub fn media(mut self, text: &str) -> Result<Self> {
        self.media = parse_media(text).map_err(|source| CssError::Media {
            text: text.to_string(),
            source,
        })?;
        Ok(self)
    }

    /// Selects the alternate style sheets with this title.
    pub fn alternate_title(mut self, title: impl Into<String>) -> Self {
        self.alternate_title = Some(title.into());
        self
    }

    pub fn pseudo_element_names(&self) -> &[String] {
        &self.pseudo_elements
    }

    pub fn active_media(&self) -> &MediaList {
        &self.media
    }
}

/// Resolves cascaded and computed styles for the elements of a document.
///
/// The engine is generic over the node handle of the documents it serves.
/// Every operation takes the document explicitly, so one engine serves one
/// document at a time and callers serialize access to it.
pub struct CssEngine<N = NodeId> {
    pub(crate) registry: Arc<PropertyRegistry>,
    pub(crate) options: EngineOptions,
    pub(crate) user_agent_sheet: Option<StyleSheet>,
    pub(crate) user_sheet: Option<StyleSheet>,
    loader: Option<Box<dyn StyleSheetLoader>>,
    pub(crate) listeners: ListenerSet<N>,
}

impl<N> fmt::Debug for CssEngine<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssEngine")
            .field("registry", &self.registry)
            .field("options", &self.options)
            .field("user_agent_sheet", &self.user_agent_sheet.is_some())
            .field("user_sheet", &self.user_sheet.is_some())
            .field("loader", &self.loader.is_some())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl<N> CssEngine<N>
where
    N: Copy + Eq + fmt::Debug,
{
    pub fn new(registry: Arc<PropertyRegistry>, options: EngineOptions) -> Self {
        Self {
            registry,
            options,
            user_agent_sheet: None,
            user_sheet: None,
            loader: None,
            listeners: ListenerSet::new(),
        }
    }

    pub fn registry(&self) -> &Arc<PropertyRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_user_agent_style_sheet(&mut self, sheet: Option<StyleSheet>) {
        self.user_agent_sheet = sheet;
    }

    pub fn set_user_style_sheet(&mut self, sheet: Option<StyleSheet>) {
        self.user_sheet = sheet;
    }

    /// Replaces the active media. Existing style maps are not recascaded.
    pub fn set_media(&mut self, text: &str) -> Result<()> {
        self.options.media = parse_media(text).map_err(|source| CssError::Media {
            text: text.to_string(),
            source,
        })?;
        Ok(())
    }

    pub fn set_alternate_style_sheet(&mut self, title: Option<String>) {
        self.options.alternate_title = title;
    }

    /// Sets the loader used to fetch `@import`ed sheets in
    /// [`parse_style_sheet`](Self::parse_style_sheet).
    pub fn set_style_sheet_loader(&mut self, loader: Option<Box<dyn StyleSheetLoader>>) {
        self.loader = loader;
    }

    pub fn add_listener(&self, listener: Arc<dyn CssEngineListener<N>>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Registers a closure as a listener.
    pub fn on_change<F>(&self, f: F) -> ListenerId
    where
        F: Fn(&StyleChangeEvent<N>) -> std::result::Result<(), ListenerError> + Send + Sync + 'static,
    {
        self.listeners.add(Arc::new(f))
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub(crate) fn fire_properties_changed(&self, node: N, properties: &[usize]) -> Result<()> {
        log::debug!("DISPATCH: {:?} properties={:?}", node, properties);
        self.listeners.dispatch(&StyleChangeEvent {
            node,
            properties: properties.iter().copied().collect(),
        })
    }

    /// The label used for the document in error values.
    pub(crate) fn document_label(&self) -> String {
        self.options
            .document_uri
            .as_ref()
            .map(Url::to_string)
            .unwrap_or_else(|| "about:blank".to_string())
    }

    /// The base URI for values declared on `node`.
    pub(crate) fn base_uri<D>(&self, doc: &D, node: N) -> Option<Url>
    where
        D: CssDocument<Node = N>,
    {
        doc.css_base(node).or_else(|| self.options.document_uri.clone())
    }

    /// Parses and compiles a style sheet.
    ///
    /// Relative URIs, including those of `@import` rules, resolve against
    /// `uri`. Imported sheets are fetched through the loader and compiled
    /// recursively; without a loader they stay empty, and an import that
    /// would revisit a sheet on the current import chain is left empty.
    /// `@import` rules after any other rule are ignored.
    pub fn parse_style_sheet(&self, text: &str, uri: Option<&Url>, media: &str) -> Result<StyleSheet> {
        let media = parse_media(media).map_err(|source| CssError::Media {
            text: media.to_string(),
            source,
        })?;
        let mut visiting: Vec<Url> = uri.into_iter().cloned().collect();
        let rules = self.load_rules(text, uri, &mut visiting)?;
        Ok(StyleSheet::new(rules)
            .with_media(media)
            .with_uri(uri.cloned()))
    }

    fn load_rules(&self, text: &str, uri: Option<&Url>, visiting: &mut Vec<Url>) -> Result<Vec<Rule>> {
        let raw = parse_stylesheet(text).map_err(|source| CssError::StyleSheet {
            uri: uri
                .map(Url::to_string)
                .unwrap_or_else(|| self.document_label()),
            source,
        })?;
        self.compile_rules(&raw, uri, visiting, true)
    }

    fn compile_rules(
        &self,
        raw: &[RawRule],
        base: Option<&Url>,
        visiting: &mut Vec<Url>,
        top_level: bool,
    ) -> Result<Vec<Rule>> {
        let ctx = ParseContext::new(base);
        let mut rules = Vec::with_capacity(raw.len());
        let mut leading = top_level;
        for rule in raw {
            match rule {
                RawRule::Import { href, media } => {
                    if !leading {
                        log::debug!("PARSE: ignoring @import {:?} after other rules", href);
                        continue;
                    }
                    let uri = ctx.resolve_uri(href).map_err(|e| CssError::Load {
                        uri: href.clone(),
                        message: e.to_string(),
                    })?;
                    let imported = self.load_import(&uri, visiting)?;
                    rules.push(Rule::Import(ImportRule {
                        uri,
                        media: media.clone(),
                        rules: imported,
                    }));
                }
                RawRule::Style {
                    selectors,
                    declarations,
                } => {
                    leading = false;
                    rules.push(Rule::Style(StyleRule {
                        selectors: selectors.clone(),
                        declaration: StyleDeclaration::compile(&self.registry, declarations, &ctx)?,
                    }));
                }
                RawRule::Media { media, rules: nested } => {
                    leading = false;
                    rules.push(Rule::Media(MediaRule {
                        media: media.clone(),
                        rules: self.compile_rules(nested, base, visiting, false)?,
                    }));
                }
            }
        }
        Ok(rules)
    }

    fn load_import(&self, uri: &Url, visiting: &mut Vec<Url>) -> Result<Vec<Rule>> {
        let Some(loader) = &self.loader else {
            log::debug!("PARSE: no loader for @import {}", uri);
            return Ok(Vec::new());
        };
        if visiting.contains(uri) {
            log::warn!("PARSE: cyclic @import of {}", uri);
            return Ok(Vec::new());
        }
        let text = loader.load(uri).map_err(|e| CssError::Load {
            uri: uri.to_string(),
            message: e.to_string(),
        })?;
        visiting.push(uri.clone());
        let result = self.load_rules(&text, Some(uri), visiting);
        visiting.pop();
        result
    }

    /// Copies the cascaded style maps of a subtree of another document.
    ///
    /// The source engine cascades `source_node` and each configured
    /// pseudo-element of it; the maps are attached to `dest_node` marked
    /// fixed. Stylable children are paired up by position, skipping sheet
    /// nodes on either side.
    pub fn import_cascaded_style_maps<S, D>(
        &self,
        source: &CssEngine<S::Node>,
        source_doc: &S,
        source_node: S::Node,
        dest_doc: &mut D,
        dest_node: N,
    ) -> Result<()>
    where
        S: CssDocument,
        D: CssDocument<Node = N>,
    {
        if source.registry.len() != self.registry.len() {
            return Err(CssError::InvalidState(format!(
                "cannot import style maps of {} properties into an engine with {}",
                source.registry.len(),
                self.registry.len()
            )));
        }
        self.import_subtree(source, source_doc, source_node, dest_doc, dest_node)
    }

    fn import_subtree<S, D>(
        &self,
        source: &CssEngine<S::Node>,
        source_doc: &S,
        source_node: S::Node,
        dest_doc: &mut D,
        dest_node: N,
    ) -> Result<()>
    where
        S: CssDocument,
        D: CssDocument<Node = N>,
    {
        if source_doc.is_stylable(source_node) && dest_doc.is_stylable(dest_node) {
            let pseudos = std::iter::once(None)
                .chain(self.options.pseudo_elements.iter().map(|p| Some(p.as_str())));
            for pseudo in pseudos {
                let mut map = source.cascaded_style_map(source_doc, source_node, pseudo)?;
                map.set_fixed(true);
                dest_doc.set_style_map(dest_node, pseudo, Some(map));
            }
        }
        // Sheet nodes and other unstylable children are skipped on both sides.
        let source_children: Vec<S::Node> = source_doc
            .children(source_node)
            .into_iter()
            .filter(|&child| source_doc.is_stylable(child))
            .collect();
        let dest_children: Vec<N> = dest_doc
            .children(dest_node)
            .into_iter()
            .filter(|&child| dest_doc.is_stylable(child))
            .collect();
        for (dest_child, source_child) in dest_children.into_iter().zip(source_children) {
            self.import_subtree(source, source_doc, source_child, dest_doc, dest_child)?;
        }
        Ok(())
    }

    /// Detaches every style map of the document, following imported
    /// subtrees.
    pub fn dispose<D>(&self, doc: &mut D)
    where
        D: CssDocument<Node = N>,
    {
        if let Some(root) = doc.root() {
            dispose_style_maps(doc, root);
        }
    }
}

fn dispose_style_maps<D: CssDocument>(doc: &mut D, node: D::Node) {
    doc.clear_style_maps(node);
    for child in doc.children(node) {
        dispose_style_maps(doc, child);
        if let Some(imported) = doc.imported_child(child) {
            dispose_style_maps(doc, imported);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = EngineOptions::default();
        assert!(options.pseudo_element_names().is_empty());
        assert!(options.active_media().is_empty());
        assert_eq!(options.style_attribute, Some((None, "style".to_string())));
        assert!(options.hints_namespace.is_none());
    }

    #[test]
    fn test_invalid_media_is_an_error() {
        assert!(matches!(
            EngineOptions::new().media("screen {"),
            Err(CssError::Media { .. })
        ));

        let mut engine: CssEngine = CssEngine::new(PropertyRegistry::standard(), EngineOptions::new());
        assert!(engine.set_media("print, screen").is_ok());
        assert_eq!(engine.options().active_media().len(), 2);
    }

    #[test]
    fn test_late_imports_are_ignored() {
        let engine: CssEngine = CssEngine::new(PropertyRegistry::standard(), EngineOptions::new());
        let base = Url::parse("http://example.com/a.css").unwrap();
        let sheet = engine
            .parse_style_sheet(
                "@import url(b.css); rect { color: red } @import url(c.css);",
                Some(&base),
                "",
            )
            .unwrap();
        assert_eq!(sheet.rules().len(), 2);
        match &sheet.rules()[0] {
            Rule::Import(import) => {
                assert_eq!(import.uri.as_str(), "http://example.com/b.css");
                assert!(import.rules.is_empty());
            }
            other => panic!("expected an import, got {:?}", other),
        }
    }
}
