//! Cascading declarations into style maps.
//!
//! Origins are applied from lowest to highest priority: the user-agent sheet,
//! the user sheet, presentational hints, the document's sheets and finally
//! the inline style. Within one sheet the matching rules are applied in
//! ascending specificity, so the last write wins.

use std::fmt;

use css_syntax::{parse_declarations, parse_property_value};

use crate::document::CssDocument;
use crate::engine::CssEngine;
use crate::error::{CssError, Result};
use crate::managers::ParseContext;
use crate::matcher::{collect_matching_rules, sort_by_specificity};
use crate::sheet::{StyleDeclaration, StyleSheet, create_value};
use crate::style_map::{Origin, StyleMap};

impl<N> CssEngine<N>
where
    N: Copy + Eq + fmt::Debug,
{
    /// Cascades a fresh style map for `(node, pseudo)`.
    ///
    /// The map is returned, not attached to the node. Fails on a node that is
    /// not stylable, and on an inline style or presentational hint that does
    /// not parse.
    pub fn cascaded_style_map<D>(&self, doc: &D, node: N, pseudo: Option<&str>) -> Result<StyleMap>
    where
        D: CssDocument<Node = N>,
    {
        if !doc.is_stylable(node) {
            return Err(CssError::InvalidState(format!("{:?} is not stylable", node)));
        }

        let mut map = StyleMap::new(self.registry.len());

        if let Some(sheet) = &self.user_agent_sheet {
            self.put_style_sheet_rules(doc, node, pseudo, &mut map, sheet, Origin::UserAgent);
        }
        if let Some(sheet) = &self.user_sheet {
            self.put_style_sheet_rules(doc, node, pseudo, &mut map, sheet, Origin::User);
        }

        let base = self.base_uri(doc, node);
        let ctx = ParseContext::new(base.as_ref());

        if self.options.hints_namespace.is_some() {
            self.put_presentation_hints(doc, node, &mut map, &ctx)?;
        }

        for sheet_node in doc.style_sheet_nodes() {
            let Some(sheet) = doc.style_sheet(sheet_node) else {
                continue;
            };
            if self.is_sheet_active(sheet) {
                self.put_style_sheet_rules(doc, node, pseudo, &mut map, sheet, Origin::Author);
            }
        }

        if let Some((namespace, local_name)) = &self.options.style_attribute {
            let style = doc.attribute_ns(node, namespace.as_deref(), local_name);
            if let Some(text) = style.filter(|s| !s.is_empty()) {
                let declaration = self.compile_inline_style(local_name, text, &ctx)?;
                for entry in declaration.iter() {
                    map.put_author_property(
                        entry.index,
                        entry.value.clone(),
                        entry.important,
                        Origin::InlineAuthor,
                    );
                }
            }
        }

        log::trace!("CASCADE: {:?} pseudo={:?}", node, pseudo);
        Ok(map)
    }

    /// Whether a document sheet takes part in the cascade: alternate sheets
    /// need the selected title, and the sheet's media must match.
    fn is_sheet_active(&self, sheet: &StyleSheet) -> bool {
        let selected = match (sheet.is_alternate(), sheet.title()) {
            (true, Some(title)) => self.options.alternate_title.as_deref() == Some(title),
            _ => true,
        };
        selected && sheet.media().matches(&self.options.media)
    }

    fn put_style_sheet_rules<D>(
        &self,
        doc: &D,
        node: N,
        pseudo: Option<&str>,
        map: &mut StyleMap,
        sheet: &StyleSheet,
        origin: Origin,
    ) where
        D: CssDocument<Node = N>,
    {
        let mut rules = Vec::new();
        collect_matching_rules(sheet.rules(), doc, node, pseudo, &self.options.media, &mut rules);
        sort_by_specificity(&mut rules, doc, node, pseudo);

        for rule in rules {
            for entry in rule.declaration.iter() {
                if origin == Origin::UserAgent {
                    map.put(entry.index, entry.value.clone(), entry.important, origin);
                } else {
                    map.put_author_property(entry.index, entry.value.clone(), entry.important, origin);
                }
            }
        }
    }

    fn put_presentation_hints<D>(
        &self,
        doc: &D,
        node: N,
        map: &mut StyleMap,
        ctx: &ParseContext<'_>,
    ) -> Result<()>
    where
        D: CssDocument<Node = N>,
    {
        let namespace = self.options.hints_namespace.as_ref().and_then(|ns| ns.as_deref());
        for attr in doc.attributes(node) {
            if attr.namespace != namespace {
                continue;
            }
            let Some(index) = self.registry.index_of(attr.local_name) else {
                continue;
            };
            let lexical = parse_property_value(attr.value)
                .map_err(|e| self.attribute_error(attr.local_name, attr.value, e.to_string()))?;
            let value = create_value(&self.registry, index, &lexical, ctx)
                .map_err(|e| self.attribute_error(attr.local_name, attr.value, e.to_string()))?;
            map.put_author_property(index, value, false, Origin::NonCss);
        }
        Ok(())
    }

    /// Parses and compiles the text of an inline style attribute.
    pub(crate) fn compile_inline_style(
        &self,
        attribute: &str,
        text: &str,
        ctx: &ParseContext<'_>,
    ) -> Result<StyleDeclaration> {
        let raw = parse_declarations(text)
            .map_err(|e| self.attribute_error(attribute, text, e.to_string()))?;
        StyleDeclaration::compile(&self.registry, &raw, ctx)
            .map_err(|e| self.attribute_error(attribute, text, e.to_string()))
    }

    fn attribute_error(&self, attribute: &str, text: &str, message: String) -> CssError {
        CssError::Attribute {
            uri: self.document_label(),
            attribute: attribute.to_string(),
            text: text.to_string(),
            message,
        }
    }
}
