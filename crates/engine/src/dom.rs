//! An arena-backed document.
//!
//! [`Document`] is a small element tree that implements [`CssDocument`]. Nodes
//! are addressed by [`NodeId`] and never freed; a `NodeId` from another
//! document is a logic error and panics on use.
//!
//! ```
//! use css_engine::dom::Document;
//!
//! let mut doc = Document::new();
//! let svg = doc.create_root("svg");
//! let rect = doc.append_element(svg, "rect");
//! let change = doc.set_attribute(rect, "style", "fill: red");
//! assert_eq!(change.new_value, "fill: red");
//! assert_eq!(doc.get_attribute(rect, "style"), Some("fill: red"));
//! ```

use css_syntax::ElementTree;
use url::Url;

use crate::document::{Attr, AttrChange, AttrMutation, CssDocument};
use crate::sheet::StyleSheet;
use crate::style_map::StyleMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

#[derive(Debug)]
enum NodeKind {
    Element {
        local_name: String,
        attributes: Vec<Attribute>,
        base: Option<Url>,
    },
    StyleSheet(StyleSheet),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    imported: Option<NodeId>,
    style_maps: Vec<(Option<String>, StyleMap)>,
}

impl NodeData {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            parent,
            children: Vec::new(),
            imported: None,
            style_maps: Vec::new(),
        }
    }

    fn is_element(&self) -> bool {
        matches!(self.kind, NodeKind::Element { .. })
    }
}

#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: Option<NodeId>,
    url: Option<Url>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(url: Url) -> Self {
        Self {
            url: Some(url),
            ..Self::default()
        }
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    fn push(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData::new(kind, parent));
        id
    }

    fn element(local_name: &str) -> NodeKind {
        NodeKind::Element {
            local_name: local_name.to_string(),
            attributes: Vec::new(),
            base: None,
        }
    }

    /// Creates the document element, replacing any previous root.
    pub fn create_root(&mut self, local_name: &str) -> NodeId {
        let id = self.push(Self::element(local_name), None);
        self.root = Some(id);
        id
    }

    pub fn append_element(&mut self, parent: NodeId, local_name: &str) -> NodeId {
        let id = self.push(Self::element(local_name), Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Appends a node carrying a style sheet, such as a `<style>` element.
    pub fn append_style_sheet(&mut self, parent: NodeId, sheet: StyleSheet) -> NodeId {
        let id = self.push(NodeKind::StyleSheet(sheet), Some(parent));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Creates the root of a subtree imported under `host`.
    pub fn import_root(&mut self, host: NodeId, local_name: &str) -> NodeId {
        let id = self.push(Self::element(local_name), Some(host));
        self.nodes[host.0].imported = Some(id);
        id
    }

    /// Sets the base URI of an element and its descendants.
    pub fn set_base(&mut self, node: NodeId, base: Url) {
        if let NodeKind::Element { base: slot, .. } = &mut self.nodes[node.0].kind {
            *slot = Some(base);
        }
    }

    pub fn get_attribute(&self, node: NodeId, local_name: &str) -> Option<&str> {
        self.attribute_ns(node, None, local_name)
    }

    /// Sets an attribute and returns the matching change notification.
    pub fn set_attribute(&mut self, node: NodeId, local_name: &str, value: &str) -> AttrMutation {
        self.set_attribute_ns(node, None, local_name, value)
    }

    pub fn set_attribute_ns(
        &mut self,
        node: NodeId,
        namespace: Option<&str>,
        local_name: &str,
        value: &str,
    ) -> AttrMutation {
        let mut mutation = AttrMutation::added(local_name, value);
        mutation.namespace = namespace.map(str::to_string);
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind {
            match attributes
                .iter_mut()
                .find(|a| a.namespace.as_deref() == namespace && a.local_name == local_name)
            {
                Some(existing) => {
                    mutation.change = AttrChange::Modification;
                    mutation.prev_value = std::mem::replace(&mut existing.value, value.to_string());
                }
                None => attributes.push(Attribute {
                    namespace: namespace.map(str::to_string),
                    local_name: local_name.to_string(),
                    value: value.to_string(),
                }),
            }
        }
        mutation
    }

    /// Removes an attribute, returning the change notification if it existed.
    pub fn remove_attribute(&mut self, node: NodeId, local_name: &str) -> Option<AttrMutation> {
        let NodeKind::Element { attributes, .. } = &mut self.nodes[node.0].kind else {
            return None;
        };
        let position = attributes
            .iter()
            .position(|a| a.namespace.is_none() && a.local_name == local_name)?;
        let removed = attributes.remove(position);
        Some(AttrMutation::removed(local_name, removed.value))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn collect_style_sheet_nodes(&self, node: NodeId, out: &mut Vec<NodeId>) {
        let data = &self.nodes[node.0];
        if matches!(data.kind, NodeKind::StyleSheet(_)) {
            out.push(node);
        }
        for &child in &data.children {
            self.collect_style_sheet_nodes(child, out);
        }
    }
}

impl ElementTree for Document {
    type Node = NodeId;

    fn local_name(&self, node: NodeId) -> &str {
        match &self.nodes[node.0].kind {
            NodeKind::Element { local_name, .. } => local_name,
            NodeKind::StyleSheet(_) => "",
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.attribute_ns(node, None, name)
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0]
            .parent
            .filter(|p| self.nodes[p.0].is_element())
    }

    fn previous_sibling_element(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.nodes[node.0].parent?;
        let siblings = &self.nodes[parent.0].children;
        let position = siblings.iter().position(|&s| s == node)?;
        siblings[..position]
            .iter()
            .rev()
            .copied()
            .find(|s| self.nodes[s.0].is_element())
    }
}

impl CssDocument for Document {
    fn is_stylable(&self, node: NodeId) -> bool {
        self.nodes[node.0].is_element()
    }

    fn parent_node(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn imported_child(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].imported
    }

    fn attributes(&self, node: NodeId) -> Vec<Attr<'_>> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .map(|a| Attr {
                    namespace: a.namespace.as_deref(),
                    local_name: &a.local_name,
                    value: &a.value,
                })
                .collect(),
            NodeKind::StyleSheet(_) => Vec::new(),
        }
    }

    fn attribute_ns(&self, node: NodeId, namespace: Option<&str>, local_name: &str) -> Option<&str> {
        match &self.nodes[node.0].kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|a| a.namespace.as_deref() == namespace && a.local_name == local_name)
                .map(|a| a.value.as_str()),
            NodeKind::StyleSheet(_) => None,
        }
    }

    fn css_base(&self, node: NodeId) -> Option<Url> {
        let mut current = Some(node);
        while let Some(id) = current {
            let data = &self.nodes[id.0];
            if let NodeKind::Element {
                base: Some(base), ..
            } = &data.kind
            {
                return Some(base.clone());
            }
            current = data.parent;
        }
        self.url.clone()
    }

    fn style_sheet_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.collect_style_sheet_nodes(root, &mut out);
        }
        out
    }

    fn style_sheet(&self, node: NodeId) -> Option<&StyleSheet> {
        match &self.nodes[node.0].kind {
            NodeKind::StyleSheet(sheet) => Some(sheet),
            NodeKind::Element { .. } => None,
        }
    }

    fn style_map(&self, node: NodeId, pseudo: Option<&str>) -> Option<&StyleMap> {
        self.nodes[node.0]
            .style_maps
            .iter()
            .find(|(key, _)| key.as_deref() == pseudo)
            .map(|(_, map)| map)
    }

    fn style_map_mut(&mut self, node: NodeId, pseudo: Option<&str>) -> Option<&mut StyleMap> {
        self.nodes[node.0]
            .style_maps
            .iter_mut()
            .find(|(key, _)| key.as_deref() == pseudo)
            .map(|(_, map)| map)
    }

    fn set_style_map(&mut self, node: NodeId, pseudo: Option<&str>, map: Option<StyleMap>) {
        let maps = &mut self.nodes[node.0].style_maps;
        maps.retain(|(key, _)| key.as_deref() != pseudo);
        if let Some(map) = map {
            maps.push((pseudo.map(str::to_string), map));
        }
    }

    fn clear_style_maps(&mut self, node: NodeId) {
        self.nodes[node.0].style_maps.clear();
    }

    fn root(&self) -> Option<NodeId> {
        self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation() {
        let mut doc = Document::new();
        let svg = doc.create_root("svg");
        let style = doc.append_style_sheet(svg, StyleSheet::default());
        let a = doc.append_element(svg, "rect");
        let b = doc.append_element(svg, "circle");

        assert_eq!(doc.previous_sibling_element(b), Some(a));
        assert_eq!(doc.previous_sibling_element(a), None);
        assert_eq!(doc.parent_element(a), Some(svg));
        assert!(!doc.is_stylable(style));
        assert_eq!(doc.style_sheet_nodes(), vec![style]);
        assert_eq!(doc.children(svg), vec![style, a, b]);
    }

    #[test]
    fn test_imported_subtree() {
        let mut doc = Document::new();
        let svg = doc.create_root("svg");
        let host = doc.append_element(svg, "use");
        let imported = doc.import_root(host, "g");

        assert_eq!(doc.imported_child(host), Some(imported));
        assert_eq!(doc.stylable_parent(imported), Some(host));
        assert!(doc.children(host).is_empty());
    }

    #[test]
    fn test_attribute_mutations() {
        let mut doc = Document::new();
        let svg = doc.create_root("svg");
        let added = doc.set_attribute(svg, "style", "fill: red");
        assert_eq!(added.change, AttrChange::Addition);

        let modified = doc.set_attribute(svg, "style", "fill: blue");
        assert_eq!(modified.change, AttrChange::Modification);
        assert_eq!(modified.prev_value, "fill: red");

        let removed = doc.remove_attribute(svg, "style").unwrap();
        assert_eq!(removed.change, AttrChange::Removal);
        assert_eq!(removed.prev_value, "fill: blue");
        assert!(doc.remove_attribute(svg, "style").is_none());
    }

    #[test]
    fn test_css_base_inherits() {
        let mut doc = Document::with_url(Url::parse("http://example.com/doc.svg").unwrap());
        let svg = doc.create_root("svg");
        let g = doc.append_element(svg, "g");
        let rect = doc.append_element(g, "rect");
        assert_eq!(doc.css_base(rect).unwrap().as_str(), "http://example.com/doc.svg");

        doc.set_base(g, Url::parse("http://example.com/assets/").unwrap());
        assert_eq!(doc.css_base(rect).unwrap().as_str(), "http://example.com/assets/");
    }

    #[test]
    fn test_style_map_slots() {
        let mut doc = Document::new();
        let svg = doc.create_root("svg");
        doc.set_style_map(svg, None, Some(StyleMap::new(2)));
        doc.set_style_map(svg, Some("before"), Some(StyleMap::new(3)));
        assert_eq!(doc.style_map(svg, None).map(StyleMap::len), Some(2));
        assert_eq!(doc.style_map(svg, Some("before")).map(StyleMap::len), Some(3));

        doc.set_style_map(svg, None, None);
        assert!(doc.style_map(svg, None).is_none());
        doc.clear_style_maps(svg);
        assert!(doc.style_map(svg, Some("before")).is_none());
    }
}
