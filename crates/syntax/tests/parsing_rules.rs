//! Integration tests for full stylesheet parsing.
//!
//! - Style rules (selector list + declaration block)
//! - `@media` groups, including nested groups
//! - `@import` with string and `url()` targets
//! - `!important`
//! - Syntax errors

use css_syntax::parser::{parse_declarations, parse_media, parse_rule, parse_stylesheet};
use css_syntax::{LexicalUnit, MediaList, RawRule, Selector, SyntaxError};

// ============================================================================
// SIMPLE RULES
// ============================================================================

#[test]
fn test_rule_type_selector_single_declaration() {
    let (remaining, rule) = parse_rule("rect { fill: red; }").unwrap();
    assert!(remaining.is_empty());

    match rule {
        RawRule::Style {
            selectors,
            declarations,
        } => {
            assert_eq!(
                selectors.selectors[0].parts[0].compound.selectors[0],
                Selector::Type("rect".to_string())
            );
            assert_eq!(declarations.len(), 1);
            assert_eq!(declarations[0].name, "fill");
            assert_eq!(
                declarations[0].value.units,
                vec![LexicalUnit::Ident("red".to_string())]
            );
            assert!(!declarations[0].important);
        }
        other => panic!("expected style rule, got {:?}", other),
    }
}

#[test]
fn test_rule_without_trailing_semicolon() {
    let rules = parse_stylesheet("rect { fill: red; stroke: blue }").unwrap();
    assert_eq!(rules[0].declarations().len(), 2);
}

#[test]
fn test_empty_rule() {
    let rules = parse_stylesheet("rect {}").unwrap();
    assert_eq!(rules.len(), 1);
    assert!(rules[0].declarations().is_empty());
}

#[test]
fn test_property_names_are_lowercased() {
    let rules = parse_stylesheet("rect { FONT-SIZE: 12px }").unwrap();
    assert_eq!(rules[0].declarations()[0].name, "font-size");
}

#[test]
fn test_multiple_rules_keep_document_order() {
    let css = "rect { fill: red } .a { fill: blue } #b { fill: green }";
    let rules = parse_stylesheet(css).unwrap();
    let firsts: Vec<String> = rules
        .iter()
        .map(|r| r.declarations()[0].value.to_string())
        .collect();
    assert_eq!(firsts, vec!["red", "blue", "green"]);
}

#[test]
fn test_empty_stylesheet() {
    assert!(parse_stylesheet("").unwrap().is_empty());
    assert!(parse_stylesheet("  /* only a comment */  ").unwrap().is_empty());
}

// ============================================================================
// !IMPORTANT
// ============================================================================

#[test]
fn test_important_flag() {
    let decls = parse_declarations("fill: red !important; stroke: blue").unwrap();
    assert!(decls[0].important);
    assert!(!decls[1].important);
    assert_eq!(decls[0].value.to_string(), "red");
}

#[test]
fn test_important_with_spacing_and_case() {
    let decls = parse_declarations("fill: red ! IMPORTANT").unwrap();
    assert!(decls[0].important);
}

// ============================================================================
// AT-RULES
// ============================================================================

#[test]
fn test_media_rule() {
    let css = "@media print, screen { rect { fill: black } circle { fill: white } }";
    let rules = parse_stylesheet(css).unwrap();
    assert_eq!(rules.len(), 1);
    match &rules[0] {
        RawRule::Media { media, rules } => {
            assert_eq!(media, &MediaList::new(["print", "screen"]));
            assert_eq!(rules.len(), 2);
        }
        other => panic!("expected media rule, got {:?}", other),
    }
}

#[test]
fn test_nested_media_rule() {
    let css = "@media all { @media print { rect { fill: black } } }";
    let rules = parse_stylesheet(css).unwrap();
    match &rules[0] {
        RawRule::Media { rules, .. } => {
            assert!(matches!(rules[0], RawRule::Media { .. }));
        }
        other => panic!("expected media rule, got {:?}", other),
    }
}

#[test]
fn test_import_rule_forms() {
    let css = r#"
        @import "base.css";
        @import url(print.css) print;
        rect { fill: red }
    "#;
    let rules = parse_stylesheet(css).unwrap();
    assert_eq!(rules.len(), 3);
    assert_eq!(
        rules[0],
        RawRule::Import {
            href: "base.css".to_string(),
            media: MediaList::default(),
        }
    );
    assert_eq!(
        rules[1],
        RawRule::Import {
            href: "print.css".to_string(),
            media: MediaList::new(["print"]),
        }
    );
}

#[test]
fn test_parse_media_list() {
    assert!(parse_media("").unwrap().is_empty());
    let media = parse_media("screen , print").unwrap();
    assert_eq!(media.iter().collect::<Vec<_>>(), vec!["screen", "print"]);
}

// ============================================================================
// ERRORS
// ============================================================================

#[test]
fn test_unclosed_block_is_an_error() {
    let err = parse_stylesheet("rect { fill: red").unwrap_err();
    assert!(matches!(err, SyntaxError::UnexpectedTokens(_)));
}

#[test]
fn test_garbage_after_rules_is_an_error() {
    assert!(parse_stylesheet("rect { fill: red } }").is_err());
}

#[test]
fn test_declaration_without_value_is_an_error() {
    assert!(parse_declarations("fill: ;").is_err());
}
