//! Numeric token parsing: numbers, percentages and dimensions.

use crate::lexical::LexicalUnit;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, digit1, one_of},
    combinator::{map_res, opt, recognize},
    sequence::{pair, tuple},
};

/// Parse a floating point or integer number, with an optional sign.
pub fn parse_number(input: &str) -> IResult<&str, f64> {
    map_res(
        recognize(tuple((
            opt(one_of("+-")),
            alt((
                recognize(pair(digit1, opt(pair(char('.'), digit1)))),
                recognize(pair(char('.'), digit1)),
            )),
        ))),
        |s: &str| s.parse::<f64>(),
    )(input)
}

/// Parse a number followed by `%`, a unit identifier, or nothing.
pub fn parse_numeric(input: &str) -> IResult<&str, LexicalUnit> {
    let (input, value) = parse_number(input)?;

    if let Ok((rest, _)) = char::<&str, nom::error::Error<&str>>('%')(input) {
        return Ok((rest, LexicalUnit::Percentage(value)));
    }

    let (input, unit) = opt(take_while1(|c: char| c.is_ascii_alphabetic()))(input)?;
    Ok((
        input,
        match unit {
            Some(unit) => LexicalUnit::Dimension(value, unit.to_ascii_lowercase()),
            None => LexicalUnit::Number(value),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(parse_number("12").unwrap(), ("", 12.0));
        assert_eq!(parse_number("-1.5x").unwrap(), ("x", -1.5));
        assert_eq!(parse_number(".5").unwrap(), ("", 0.5));
        assert!(parse_number("px").is_err());
    }

    #[test]
    fn test_numeric_units() {
        assert_eq!(
            parse_numeric("12PX;").unwrap(),
            (";", LexicalUnit::Dimension(12.0, "px".into()))
        );
        assert_eq!(parse_numeric("50%").unwrap(), ("", LexicalUnit::Percentage(50.0)));
        assert_eq!(parse_numeric("3 ").unwrap(), (" ", LexicalUnit::Number(3.0)));
    }
}
