//! Selector matching.
//!
//! Selectors are matched against any tree that implements [`ElementTree`].
//! Matching starts at the subject (rightmost) compound and walks leftwards
//! through the combinators:
//!
//! - Descendant (` `) and general sibling (`~`) try every candidate and
//!   backtrack when a later part fails
//! - Child (`>`) and adjacent sibling (`+`) have exactly one candidate
//!
//! A selector whose subject carries a pseudo-element matches only a request
//! for that pseudo-element, and a selector without one matches only the
//! element itself.

use crate::selector::{Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList};

/// The view of an element tree that selector matching needs.
pub trait ElementTree {
    /// A cheap handle to an element.
    type Node: Copy + Eq + std::fmt::Debug;

    /// The element's local name, matched by type selectors.
    fn local_name(&self, node: Self::Node) -> &str;

    /// The value of an attribute in no namespace.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;

    /// The parent element, if the parent is an element.
    fn parent_element(&self, node: Self::Node) -> Option<Self::Node>;

    /// The closest preceding sibling that is an element.
    fn previous_sibling_element(&self, node: Self::Node) -> Option<Self::Node>;
}

/// Checks a simple selector against a single element.
pub fn matches_simple<T: ElementTree>(tree: &T, node: T::Node, selector: &Selector) -> bool {
    match selector {
        Selector::Type(name) => tree.local_name(node) == name,
        Selector::Universal => true,
        Selector::Id(id) => tree.attribute(node, "id") == Some(id.as_str()),
        Selector::Class(class) => tree
            .attribute(node, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class)),
        Selector::Attribute(name, None) => tree.attribute(node, name).is_some(),
        Selector::Attribute(name, Some(value)) => tree.attribute(node, name) == Some(value.as_str()),
        Selector::PseudoClass(name) => match name.as_str() {
            "first-child" => tree.previous_sibling_element(node).is_none(),
            _ => false,
        },
        // Checked against the requested pseudo-element by the caller.
        Selector::PseudoElement(_) => false,
    }
}

fn matches_compound<T: ElementTree>(
    tree: &T,
    node: T::Node,
    compound: &CompoundSelector,
    subject: bool,
) -> bool {
    compound.selectors.iter().all(|s| match s {
        Selector::PseudoElement(_) => subject,
        other => matches_simple(tree, node, other),
    })
}

fn matches_part<T: ElementTree>(
    tree: &T,
    complex: &ComplexSelector,
    idx: usize,
    node: T::Node,
) -> bool {
    let subject = idx + 1 == complex.parts.len();
    if !matches_compound(tree, node, &complex.parts[idx].compound, subject) {
        return false;
    }
    if idx == 0 {
        return true;
    }

    let next = idx - 1;
    match complex.parts[next].combinator {
        Combinator::Child => tree
            .parent_element(node)
            .is_some_and(|parent| matches_part(tree, complex, next, parent)),
        Combinator::Descendant => {
            let mut ancestor = tree.parent_element(node);
            while let Some(candidate) = ancestor {
                if matches_part(tree, complex, next, candidate) {
                    return true;
                }
                ancestor = tree.parent_element(candidate);
            }
            false
        }
        Combinator::AdjacentSibling => tree
            .previous_sibling_element(node)
            .is_some_and(|sibling| matches_part(tree, complex, next, sibling)),
        Combinator::GeneralSibling => {
            let mut sibling = tree.previous_sibling_element(node);
            while let Some(candidate) = sibling {
                if matches_part(tree, complex, next, candidate) {
                    return true;
                }
                sibling = tree.previous_sibling_element(candidate);
            }
            false
        }
        // Only the subject part carries `None`.
        Combinator::None => false,
    }
}

impl ComplexSelector {
    /// Checks whether this selector matches the element/pseudo-element pair.
    pub fn matches<T: ElementTree>(&self, tree: &T, node: T::Node, pseudo: Option<&str>) -> bool {
        if self.parts.is_empty() {
            return false;
        }
        let same_pseudo = match (self.pseudo_element(), pseudo) {
            (None, None) => true,
            (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
            _ => false,
        };
        same_pseudo && matches_part(tree, self, self.parts.len() - 1, node)
    }
}

impl SelectorList {
    /// True if any selector of the list matches.
    pub fn matches_any<T: ElementTree>(&self, tree: &T, node: T::Node, pseudo: Option<&str>) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, node, pseudo))
    }
}
