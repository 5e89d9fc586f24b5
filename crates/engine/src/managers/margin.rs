use css_syntax::{LexicalUnit, LexicalValue};

use super::ShorthandManager;
use crate::error::{CssError, Result};

const SIDES: [&str; 4] = ["margin-top", "margin-right", "margin-bottom", "margin-left"];

/// The `margin` shorthand: one to four values, expanded clockwise from the
/// top edge.
#[derive(Debug, Default)]
pub struct MarginShorthandManager;

impl ShorthandManager for MarginShorthandManager {
    fn property_name(&self) -> &str {
        "margin"
    }

    fn expand(&self, value: &LexicalValue) -> Result<Vec<(String, LexicalValue)>> {
        if value.is_inherit() {
            return Ok(SIDES
                .iter()
                .map(|side| (side.to_string(), value.clone()))
                .collect());
        }
        if value.units.iter().any(|u| matches!(u, LexicalUnit::Comma | LexicalUnit::Slash)) {
            return Err(CssError::invalid_value("margin", "unexpected separator"));
        }
        let [top, right, bottom, left] = match value.units.as_slice() {
            [all] => [all, all, all, all],
            [vertical, horizontal] => [vertical, horizontal, vertical, horizontal],
            [top, horizontal, bottom] => [top, horizontal, bottom, horizontal],
            [top, right, bottom, left] => [top, right, bottom, left],
            _ => {
                return Err(CssError::invalid_value(
                    "margin",
                    format!("expected 1 to 4 values, got {}", value.len()),
                ));
            }
        };
        Ok(SIDES
            .iter()
            .zip([top, right, bottom, left])
            .map(|(side, unit)| (side.to_string(), LexicalValue::new(vec![unit.clone()])))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use css_syntax::parse_property_value;

    fn expand(text: &str) -> Result<Vec<(String, String)>> {
        let expanded = MarginShorthandManager.expand(&parse_property_value(text).unwrap())?;
        Ok(expanded
            .into_iter()
            .map(|(name, value)| (name, value.to_string()))
            .collect())
    }

    #[test]
    fn test_margin_expansion() {
        let values = |text: &str| -> Vec<String> {
            expand(text).unwrap().into_iter().map(|(_, v)| v).collect()
        };
        assert_eq!(values("1px"), vec!["1px", "1px", "1px", "1px"]);
        assert_eq!(values("1px 2px"), vec!["1px", "2px", "1px", "2px"]);
        assert_eq!(values("1px 2px 3px"), vec!["1px", "2px", "3px", "2px"]);
        assert_eq!(values("1px 2px 3px 4px"), vec!["1px", "2px", "3px", "4px"]);
        assert_eq!(expand("inherit").unwrap()[3], ("margin-left".to_string(), "inherit".to_string()));
    }

    #[test]
    fn test_margin_rejects_bad_counts() {
        assert!(expand("1px 2px 3px 4px 5px").is_err());
        assert!(expand("1px, 2px").is_err());
    }
}
