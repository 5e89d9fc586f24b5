//! Rule selection and specificity ordering.

use css_syntax::{ElementTree, MediaList, Specificity};

use crate::sheet::{Rule, StyleRule};

/// Collects the style rules that match `(node, pseudo)`, depth first.
///
/// A style rule is collected once if any of its selectors matches. Media and
/// import groups are entered only when their media list matches `media`.
pub fn collect_matching_rules<'r, T: ElementTree>(
    rules: &'r [Rule],
    tree: &T,
    node: T::Node,
    pseudo: Option<&str>,
    media: &MediaList,
    out: &mut Vec<&'r StyleRule>,
) {
    for rule in rules {
        match rule {
            Rule::Style(style) => {
                if style.selectors.matches_any(tree, node, pseudo) {
                    out.push(style);
                }
            }
            Rule::Media(group) => {
                if group.media.matches(media) {
                    collect_matching_rules(&group.rules, tree, node, pseudo, media, out);
                }
            }
            Rule::Import(import) => {
                if import.media.matches(media) {
                    collect_matching_rules(&import.rules, tree, node, pseudo, media, out);
                }
            }
        }
    }
}

/// The highest specificity among the rule's selectors that match.
pub fn effective_specificity<T: ElementTree>(
    rule: &StyleRule,
    tree: &T,
    node: T::Node,
    pseudo: Option<&str>,
) -> Specificity {
    rule.selectors
        .selectors
        .iter()
        .filter(|s| s.matches(tree, node, pseudo))
        .map(|s| s.specificity())
        .max()
        .unwrap_or_default()
}

/// Orders rules by ascending effective specificity, keeping document order
/// among equals, so that applying them in order lets the last write win.
pub fn sort_by_specificity<T: ElementTree>(
    rules: &mut [&StyleRule],
    tree: &T,
    node: T::Node,
    pseudo: Option<&str>,
) {
    rules.sort_by_cached_key(|rule| effective_specificity(rule, tree, node, pseudo));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::sheet::{MediaRule, StyleDeclaration};
    use css_syntax::parser::parse_selector_list;

    fn rule(selectors: &str) -> StyleRule {
        StyleRule {
            selectors: parse_selector_list(selectors).unwrap().1,
            declaration: StyleDeclaration::default(),
        }
    }

    #[test]
    fn test_effective_specificity_uses_best_matching_selector() {
        let mut doc = Document::new();
        let svg = doc.create_root("svg");
        let rect = doc.append_element(svg, "rect");
        doc.set_attribute(rect, "id", "r");

        let r = rule("#other, rect, svg rect#r, circle#r.x");
        assert_eq!(effective_specificity(&r, &doc, rect, None), Specificity::new(1, 0, 2));
    }

    #[test]
    fn test_sort_is_stable_and_ascending() {
        let mut doc = Document::new();
        let svg = doc.create_root("svg");
        let rect = doc.append_element(svg, "rect");
        doc.set_attribute(rect, "class", "a");

        let high = rule(".a");
        let first = rule("rect");
        let second = rule("rect, circle");
        let mut rules = vec![&high, &first, &second];
        sort_by_specificity(&mut rules, &doc, rect, None);
        assert!(std::ptr::eq(rules[0], &first));
        assert!(std::ptr::eq(rules[1], &second));
        assert!(std::ptr::eq(rules[2], &high));
    }

    #[test]
    fn test_media_groups_are_gated() {
        let mut doc = Document::new();
        let svg = doc.create_root("svg");

        let rules = vec![
            Rule::Style(rule("svg")),
            Rule::Media(MediaRule {
                media: MediaList::new(["print"]),
                rules: vec![Rule::Style(rule("svg"))],
            }),
        ];

        let mut out = Vec::new();
        collect_matching_rules(&rules, &doc, svg, None, &MediaList::new(["screen"]), &mut out);
        assert_eq!(out.len(), 1);

        out.clear();
        collect_matching_rules(&rules, &doc, svg, None, &MediaList::default(), &mut out);
        assert_eq!(out.len(), 2);

        out.clear();
        collect_matching_rules(&rules, &doc, svg, None, &MediaList::new(["all"]), &mut out);
        assert_eq!(out.len(), 2);
    }
}
