//! Selector data structures and specificity.

use std::fmt;

/// CSS specificity for determining rule precedence.
///
/// Compared lexicographically: ids, then classes (including attribute
/// selectors and pseudo-classes), then types (including pseudo-elements).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity {
    pub ids: u32,
    pub classes: u32,
    pub types: u32,
}

impl Specificity {
    pub const fn new(ids: u32, classes: u32, types: u32) -> Self {
        Self { ids, classes, types }
    }

    /// A single integer weight with the same ordering for counts below 100.
    pub fn weight(&self) -> u32 {
        self.ids * 10_000 + self.classes * 100 + self.types
    }
}

impl std::ops::Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Self) -> Self::Output {
        Specificity {
            ids: self.ids + rhs.ids,
            classes: self.classes + rhs.classes,
            types: self.types + rhs.types,
        }
    }
}

/// A simple selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(String),
    Class(String),
    Id(String),
    Universal,
    /// `[name]` when the value is `None`, `[name=value]` otherwise.
    Attribute(String, Option<String>),
    PseudoClass(String),
    PseudoElement(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Type(name) => write!(f, "{}", name),
            Selector::Class(name) => write!(f, ".{}", name),
            Selector::Id(name) => write!(f, "#{}", name),
            Selector::Universal => write!(f, "*"),
            Selector::Attribute(name, None) => write!(f, "[{}]", name),
            Selector::Attribute(name, Some(value)) => write!(f, "[{}={:?}]", name, value),
            Selector::PseudoClass(name) => write!(f, ":{}", name),
            Selector::PseudoElement(name) => write!(f, "::{}", name),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompoundSelector {
    pub selectors: Vec<Selector>,
}

impl CompoundSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity::default();
        for s in &self.selectors {
            match s {
                Selector::Id(_) => spec.ids += 1,
                Selector::Class(_) | Selector::PseudoClass(_) | Selector::Attribute(_, _) => {
                    spec.classes += 1;
                }
                Selector::Type(_) | Selector::PseudoElement(_) => spec.types += 1,
                Selector::Universal => {}
            }
        }
        spec
    }

    /// The pseudo-element named by this compound, if any.
    pub fn pseudo_element(&self) -> Option<&str> {
        self.selectors.iter().find_map(|s| match s {
            Selector::PseudoElement(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// How a compound selector relates to the one after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// The last part of a complex selector.
    None,
    Descendant,
    Child,
    AdjacentSibling, // +
    GeneralSibling,  // ~
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorPart {
    pub compound: CompoundSelector,
    pub combinator: Combinator,
}

impl SelectorPart {
    pub fn new(compound: CompoundSelector, combinator: Combinator) -> Self {
        Self {
            compound,
            combinator,
        }
    }
}

/// A chain of compound selectors joined by combinators, leftmost first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub parts: Vec<SelectorPart>,
}

impl ComplexSelector {
    pub fn new(parts: Vec<SelectorPart>) -> Self {
        Self { parts }
    }

    pub fn specificity(&self) -> Specificity {
        self.parts
            .iter()
            .map(|p| p.compound.specificity())
            .fold(Specificity::default(), |acc, x| acc + x)
    }

    /// The pseudo-element of the subject compound, if any.
    pub fn pseudo_element(&self) -> Option<&str> {
        self.parts.last().and_then(|p| p.compound.pseudo_element())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<ComplexSelector>) -> Self {
        Self { selectors }
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(selectors: Vec<Selector>) -> SelectorPart {
        SelectorPart::new(CompoundSelector::new(selectors), Combinator::None)
    }

    #[test]
    fn test_specificity_counts() {
        let complex = ComplexSelector::new(vec![
            compound(vec![Selector::Type("g".into()), Selector::Id("main".into())]),
            compound(vec![
                Selector::Type("rect".into()),
                Selector::Class("a".into()),
                Selector::Attribute("x".into(), None),
                Selector::PseudoElement("before".into()),
            ]),
        ]);
        assert_eq!(complex.specificity(), Specificity::new(1, 2, 3));
        assert_eq!(complex.specificity().weight(), 10_203);
        assert_eq!(complex.pseudo_element(), Some("before"));
    }

    #[test]
    fn test_specificity_ordering() {
        assert!(Specificity::new(0, 0, 20) < Specificity::new(0, 1, 0));
        assert!(Specificity::new(0, 5, 0) < Specificity::new(1, 0, 0));
    }
}
