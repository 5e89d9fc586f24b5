//! Property value parsing.
//!
//! A value is split into [`LexicalUnit`]s:
//!
//! - Identifiers: `bold`, `inherit`, `-custom-thing`
//! - Numbers, percentages and dimensions: `1`, `50%`, `1.5em`
//! - Hash tokens: `#f00`
//! - Strings: `"Times New Roman"`, `'x'`
//! - URLs: `url(image.png)`, `url("a b.png")`
//! - Functions: `rgb(0, 0, 255)`
//! - Separators: `,` and `/`
//!
//! The value ends at `;`, `}`, `!` or the end of the input.

use crate::lexical::{LexicalUnit, LexicalValue};
use crate::parser::units::parse_numeric;
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag_no_case, take_till, take_until, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    multi::many0,
    sequence::{delimited, preceded},
};

/// Parses a CSS identifier (alphanumeric characters, dashes, and underscores).
///
/// Identifiers are used for property names, type selectors, class names, etc.
pub fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '-' || c == '_')(input)
}

/// Parses a quoted string, returning its content.
pub fn parse_string(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c| c == '"'), char('"')),
        delimited(char('\''), take_till(|c| c == '\''), char('\'')),
    ))(input)
}

fn parse_hash(input: &str) -> IResult<&str, LexicalUnit> {
    map(preceded(char('#'), parse_ident), |s| {
        LexicalUnit::Hash(s.to_string())
    })(input)
}

fn parse_url(input: &str) -> IResult<&str, LexicalUnit> {
    let (input, _) = tag_no_case("url(")(input)?;
    let (input, _) = multispace0(input)?;
    if let Ok((rest, quoted)) = parse_string(input) {
        let (rest, _) = preceded(multispace0, char(')'))(rest)?;
        return Ok((rest, LexicalUnit::Url(quoted.to_string())));
    }
    let (input, raw) = take_until(")")(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, LexicalUnit::Url(raw.trim().to_string())))
}

fn parse_function(input: &str) -> IResult<&str, LexicalUnit> {
    let (input, name) = parse_ident(input)?;
    let (input, _) = char('(')(input)?;
    let (input, args) = many0(preceded(multispace0, parse_unit))(input)?;
    let (input, _) = preceded(multispace0, char(')'))(input)?;
    Ok((
        input,
        LexicalUnit::Function {
            name: name.to_ascii_lowercase(),
            args,
        },
    ))
}

/// Parses one lexical unit.
pub fn parse_unit(input: &str) -> IResult<&str, LexicalUnit> {
    alt((
        map(char(','), |_| LexicalUnit::Comma),
        map(char('/'), |_| LexicalUnit::Slash),
        map(parse_string, |s| LexicalUnit::String(s.to_string())),
        parse_hash,
        parse_numeric,
        parse_url,
        parse_function,
        map(parse_ident, |s| LexicalUnit::Ident(s.to_string())),
    ))(input)
}

/// Parses a whole property value: one or more units separated by optional
/// whitespace.
pub fn parse_value(input: &str) -> IResult<&str, LexicalValue> {
    let (input, units) = many0(preceded(multispace0, parse_unit))(input)?;
    if units.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Many1,
        )));
    }
    Ok((input, LexicalValue::new(units)))
}
