//! The tree collaborator.
//!
//! The engine never owns a tree. It reads one through [`CssDocument`], and
//! stores style maps back on its nodes. Attribute changes are reported to the
//! engine as [`AttrMutation`]s by whoever mutates the tree.

use css_syntax::ElementTree;
use url::Url;

use crate::error::CssError;
use crate::sheet::StyleSheet;
use crate::style_map::StyleMap;

/// An attribute as seen by the cascade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Attr<'a> {
    pub namespace: Option<&'a str>,
    pub local_name: &'a str,
    pub value: &'a str,
}

/// A tree the engine can style.
///
/// Imported subtrees (such as the instance tree of an SVG `use` element) are
/// reached through [`imported_child`](CssDocument::imported_child): the root of
/// such a subtree reports its host as [`parent_node`](CssDocument::parent_node)
/// but is not one of the host's [`children`](CssDocument::children).
pub trait CssDocument: ElementTree {
    /// Whether the node can carry style maps.
    fn is_stylable(&self, node: Self::Node) -> bool;

    fn parent_node(&self, node: Self::Node) -> Option<Self::Node>;

    fn children(&self, node: Self::Node) -> Vec<Self::Node>;

    /// The root of a subtree imported under `node`, if any.
    fn imported_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn attributes(&self, node: Self::Node) -> Vec<Attr<'_>>;

    fn attribute_ns(&self, node: Self::Node, namespace: Option<&str>, local_name: &str)
    -> Option<&str>;

    /// The base URI for relative URIs in the node's inline style and hints.
    fn css_base(&self, node: Self::Node) -> Option<Url>;

    /// Nodes that carry a style sheet, in document order.
    fn style_sheet_nodes(&self) -> Vec<Self::Node>;

    fn style_sheet(&self, node: Self::Node) -> Option<&StyleSheet>;

    fn style_map(&self, node: Self::Node, pseudo: Option<&str>) -> Option<&StyleMap>;

    fn style_map_mut(&mut self, node: Self::Node, pseudo: Option<&str>) -> Option<&mut StyleMap>;

    /// Attaches or, with `None`, detaches a style map.
    fn set_style_map(&mut self, node: Self::Node, pseudo: Option<&str>, map: Option<StyleMap>);

    /// Detaches every style map of the node.
    fn clear_style_maps(&mut self, node: Self::Node);

    fn root(&self) -> Option<Self::Node>;

    /// The closest stylable ancestor, crossing from imported subtrees into
    /// their host.
    fn stylable_parent(&self, node: Self::Node) -> Option<Self::Node> {
        let mut current = self.parent_node(node);
        while let Some(candidate) = current {
            if self.is_stylable(candidate) {
                return Some(candidate);
            }
            current = self.parent_node(candidate);
        }
        None
    }
}

/// The kind of an attribute change, numbered as in DOM mutation events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum AttrChange {
    Modification = 1,
    Addition = 2,
    Removal = 3,
}

impl TryFrom<u16> for AttrChange {
    type Error = CssError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(AttrChange::Modification),
            2 => Ok(AttrChange::Addition),
            3 => Ok(AttrChange::Removal),
            other => Err(CssError::InvalidState(format!(
                "invalid attribute change kind: {}",
                other
            ))),
        }
    }
}

/// A notification that an attribute of an element changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttrMutation {
    pub namespace: Option<String>,
    pub local_name: String,
    pub change: AttrChange,
    /// The previous text, empty if the attribute was absent.
    pub prev_value: String,
    /// The new text, empty if the attribute was removed.
    pub new_value: String,
}

impl AttrMutation {
    pub fn new(
        local_name: impl Into<String>,
        change: AttrChange,
        prev_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self {
            namespace: None,
            local_name: local_name.into(),
            change,
            prev_value: prev_value.into(),
            new_value: new_value.into(),
        }
    }

    pub fn added(local_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(local_name, AttrChange::Addition, "", value)
    }

    pub fn modified(
        local_name: impl Into<String>,
        prev_value: impl Into<String>,
        new_value: impl Into<String>,
    ) -> Self {
        Self::new(local_name, AttrChange::Modification, prev_value, new_value)
    }

    pub fn removed(local_name: impl Into<String>, prev_value: impl Into<String>) -> Self {
        Self::new(local_name, AttrChange::Removal, prev_value, "")
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Whether the mutation concerns the attribute `(namespace, local_name)`.
    pub fn is_attribute(&self, namespace: Option<&str>, local_name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.local_name == local_name
    }
}
