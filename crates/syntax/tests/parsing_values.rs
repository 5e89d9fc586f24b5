//! Integration tests for property value parsing.
//!
//! - Identifiers, numbers, percentages and dimensions
//! - Hash tokens, strings and URLs
//! - Functions and separators
//! - Color literals

use css_syntax::parser::parse_property_value;
use css_syntax::{LexicalUnit, RgbaColor};

// ============================================================================
// SINGLE UNITS
// ============================================================================

#[test]
fn test_identifier() {
    let value = parse_property_value("bold").unwrap();
    assert_eq!(value.single(), Some(&LexicalUnit::Ident("bold".to_string())));
}

#[test]
fn test_inherit_keyword() {
    assert!(parse_property_value("inherit").unwrap().is_inherit());
    assert!(parse_property_value("INHERIT").unwrap().is_inherit());
    assert!(!parse_property_value("inherit bold").unwrap().is_inherit());
}

#[test]
fn test_numbers_and_dimensions() {
    let value = parse_property_value("1.5 12px 50% -2em").unwrap();
    assert_eq!(
        value.units,
        vec![
            LexicalUnit::Number(1.5),
            LexicalUnit::Dimension(12.0, "px".to_string()),
            LexicalUnit::Percentage(50.0),
            LexicalUnit::Dimension(-2.0, "em".to_string()),
        ]
    );
}

#[test]
fn test_hash_and_string() {
    let value = parse_property_value("#ff0000 'Times New Roman'").unwrap();
    assert_eq!(value.units[0], LexicalUnit::Hash("ff0000".to_string()));
    assert_eq!(value.units[1], LexicalUnit::String("Times New Roman".to_string()));
}

#[test]
fn test_url() {
    let value = parse_property_value("url(\"images/a.png\")").unwrap();
    assert_eq!(value.single(), Some(&LexicalUnit::Url("images/a.png".to_string())));
}

#[test]
fn test_comma_separated_list() {
    let value = parse_property_value("Arial, \"Helvetica Neue\", sans-serif").unwrap();
    assert_eq!(value.len(), 5);
    assert_eq!(value.units[1], LexicalUnit::Comma);
    assert_eq!(value.to_string(), "Arial, \"Helvetica Neue\", sans-serif");
}

#[test]
fn test_function() {
    let value = parse_property_value("rgb(10%, 20, 30)").unwrap();
    match value.single() {
        Some(LexicalUnit::Function { name, args }) => {
            assert_eq!(name, "rgb");
            assert_eq!(args[0], LexicalUnit::Percentage(10.0));
        }
        other => panic!("expected function, got {:?}", other),
    }
}

#[test]
fn test_empty_value_is_an_error() {
    assert!(parse_property_value("").is_err());
    assert!(parse_property_value("red }").is_err());
}

// ============================================================================
// COLOR LITERALS
// ============================================================================

#[test]
fn test_color_hex_forms() {
    assert_eq!(RgbaColor::parse("#f00").unwrap(), RgbaColor::rgb(255, 0, 0));
    assert_eq!(RgbaColor::parse("#00ff00").unwrap(), RgbaColor::rgb(0, 255, 0));
    assert!(RgbaColor::parse("#12").is_err());
}

#[test]
fn test_color_functions() {
    assert_eq!(
        RgbaColor::parse("rgb(0, 0, 255)").unwrap(),
        RgbaColor::rgb(0, 0, 255)
    );
    assert_eq!(
        RgbaColor::parse("hsl(0, 100%, 50%)").unwrap(),
        RgbaColor::rgb(255, 0, 0)
    );
}

#[test]
fn test_color_names() {
    assert_eq!(RgbaColor::parse("Navy").unwrap(), RgbaColor::rgb(0, 0, 128));
    assert!(RgbaColor::parse("transparent").unwrap().is_transparent());
    assert!(RgbaColor::parse("notacolor").is_err());
}
