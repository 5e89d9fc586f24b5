//! CSS parsing entry points.
//!
//! - [`parse_stylesheet`]: a whole stylesheet into [`RawRule`]s
//! - [`parse_declarations`]: a declaration block such as a `style` attribute
//! - [`parse_property_value`]: a single value such as a presentation attribute
//! - [`parse_media`]: a comma-separated media list
//!
//! ## Submodules
//!
//! - [`comments`]: block comment stripping
//! - [`selectors`]: selector parsing (type, class, ID, combinators)
//! - [`units`]: numeric value and unit parsing
//! - [`values`]: lexical value parsing
//!
//! ## Example
//!
//! ```rust
//! use css_syntax::parser::parse_stylesheet;
//! use css_syntax::{RawRule, Selector};
//!
//! let rules = parse_stylesheet("rect { fill: red; }").unwrap();
//! match &rules[0] {
//!     RawRule::Style { selectors, declarations } => {
//!         assert_eq!(
//!             selectors.selectors[0].parts[0].compound.selectors[0],
//!             Selector::Type("rect".to_string())
//!         );
//!         assert_eq!(declarations[0].name, "fill");
//!     }
//!     _ => unreachable!(),
//! }
//! ```

pub mod comments;
pub mod selectors;
pub mod units;
pub mod values;

pub use crate::parser::comments::strip_comments;
pub use crate::parser::selectors::parse_selector_list;

use crate::error::SyntaxError;
use crate::media::MediaList;
use crate::parser::values::{parse_ident, parse_string, parse_value};
use crate::rule::{RawDeclaration, RawRule};
use crate::lexical::{LexicalUnit, LexicalValue};

use nom::{
    IResult,
    branch::alt,
    bytes::complete::tag_no_case,
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt},
    multi::{many0, separated_list0},
    sequence::{delimited, preceded, tuple},
};

/// Parses a full stylesheet.
pub fn parse_stylesheet(source: &str) -> Result<Vec<RawRule>, SyntaxError> {
    let clean = strip_comments(source);
    let (remaining, rules) = parse_rules(&clean).map_err(SyntaxError::from_nom)?;
    ensure_consumed(remaining)?;
    Ok(rules)
}

/// Parses a declaration block without braces, e.g. `fill: red; opacity: .5`.
pub fn parse_declarations(source: &str) -> Result<Vec<RawDeclaration>, SyntaxError> {
    let clean = strip_comments(source);
    let (remaining, declarations) =
        parse_declaration_list(&clean).map_err(SyntaxError::from_nom)?;
    ensure_consumed(remaining)?;
    Ok(declarations)
}

/// Parses a single property value.
pub fn parse_property_value(source: &str) -> Result<LexicalValue, SyntaxError> {
    let clean = strip_comments(source);
    let (remaining, value) = parse_value(&clean).map_err(SyntaxError::from_nom)?;
    ensure_consumed(remaining)?;
    Ok(value)
}

/// Parses a media list such as `screen, print`. Empty text is an empty list.
pub fn parse_media(source: &str) -> Result<MediaList, SyntaxError> {
    let (remaining, media) = parse_media_list(source).map_err(SyntaxError::from_nom)?;
    ensure_consumed(remaining)?;
    Ok(media)
}

fn ensure_consumed(remaining: &str) -> Result<(), SyntaxError> {
    let rest = remaining.trim();
    if rest.is_empty() {
        Ok(())
    } else {
        Err(SyntaxError::UnexpectedTokens(rest.to_string()))
    }
}

fn parse_rules(input: &str) -> IResult<&str, Vec<RawRule>> {
    many0(preceded(multispace0, alt((parse_at_rule, parse_rule))))(input)
}

/// Parses a style rule (e.g., "rect { fill: red; }").
pub fn parse_rule(input: &str) -> IResult<&str, RawRule> {
    let (input, _) = multispace0(input)?;
    let (input, selectors) = parse_selector_list(input)?;
    let (input, _) = multispace0(input)?;

    let (input, declarations) = delimited(
        char('{'),
        parse_declaration_list,
        preceded(multispace0, char('}')),
    )(input)?;

    Ok((
        input,
        RawRule::Style {
            selectors,
            declarations,
        },
    ))
}

fn parse_at_rule(input: &str) -> IResult<&str, RawRule> {
    let (input, _) = char('@')(input)?;
    alt((parse_media_rule, parse_import_rule))(input)
}

fn parse_media_rule(input: &str) -> IResult<&str, RawRule> {
    let (input, _) = tuple((tag_no_case("media"), multispace1))(input)?;
    let (input, media) = parse_media_list(input)?;
    let (input, rules) = delimited(
        preceded(multispace0, char('{')),
        parse_rules,
        preceded(multispace0, char('}')),
    )(input)?;
    Ok((input, RawRule::Media { media, rules }))
}

fn parse_import_rule(input: &str) -> IResult<&str, RawRule> {
    let (input, _) = tuple((tag_no_case("import"), multispace0))(input)?;
    let (input, href) = alt((
        map(parse_string, str::to_string),
        map(values::parse_unit, |unit| match unit {
            LexicalUnit::Url(url) => url,
            other => other.to_string(),
        }),
    ))(input)?;
    let (input, media) = parse_media_list(input)?;
    let (input, _) = preceded(multispace0, char(';'))(input)?;
    Ok((input, RawRule::Import { href, media }))
}

fn parse_media_list(input: &str) -> IResult<&str, MediaList> {
    let (input, media) = separated_list0(
        tuple((multispace0, char(','))),
        preceded(multispace0, parse_ident),
    )(input)?;
    Ok((input, MediaList::new(media)))
}

/// Parses declarations until a closing brace or the end of the input.
pub fn parse_declaration_list(input: &str) -> IResult<&str, Vec<RawDeclaration>> {
    let (input, items) = many0(alt((
        map(preceded(multispace0, char(';')), |_| None),
        map(parse_declaration, Some),
    )))(input)?;
    Ok((input, items.into_iter().flatten().collect()))
}

/// Parses one `name: value [!important]` declaration and its trailing `;`.
pub fn parse_declaration(input: &str) -> IResult<&str, RawDeclaration> {
    let (input, _) = multispace0(input)?;
    let (input, name) = parse_ident(input)?;
    let (input, _) = tuple((multispace0, char(':'), multispace0))(input)?;
    let (input, value) = parse_value(input)?;
    let (input, important) = opt(tuple((
        multispace0,
        char('!'),
        multispace0,
        tag_no_case("important"),
    )))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(char(';'))(input)?;

    Ok((
        input,
        RawDeclaration::new(name.to_ascii_lowercase(), value, important.is_some()),
    ))
}
