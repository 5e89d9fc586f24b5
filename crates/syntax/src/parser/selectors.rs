use crate::parser::values::{parse_ident, parse_string};
use crate::selector::{
    Combinator, ComplexSelector, CompoundSelector, Selector, SelectorList, SelectorPart,
};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_until},
    character::complete::{char, multispace0},
    combinator::map,
    multi::many0,
    sequence::{delimited, preceded, tuple},
};

/// Pseudo-elements that CSS2 also allows with a single colon.
const LEGACY_PSEUDO_ELEMENTS: [&str; 4] = ["before", "after", "first-line", "first-letter"];

/// Parses a simple selector: type, universal, class, id, attribute,
/// pseudo-class or pseudo-element.
pub fn parse_simple_selector(input: &str) -> IResult<&str, Selector> {
    alt((
        map(preceded(char('#'), parse_ident), |s| {
            Selector::Id(s.to_string())
        }),
        map(preceded(char('.'), parse_ident), |s| {
            Selector::Class(s.to_string())
        }),
        map(preceded(tag("::"), parse_ident), |s| {
            Selector::PseudoElement(s.to_ascii_lowercase())
        }),
        map(preceded(char(':'), parse_ident), |s| {
            let name = s.to_ascii_lowercase();
            if LEGACY_PSEUDO_ELEMENTS.contains(&name.as_str()) {
                Selector::PseudoElement(name)
            } else {
                Selector::PseudoClass(name)
            }
        }),
        map(char('*'), |_| Selector::Universal),
        parse_attribute_selector,
        map(parse_ident, |s| Selector::Type(s.to_string())),
    ))(input)
}

/// Parses a compound selector (e.g., "rect.primary#submit").
pub fn parse_compound_selector(input: &str) -> IResult<&str, CompoundSelector> {
    let (input, first) = parse_simple_selector(input)?;
    // No whitespace between simple selectors: `rect:first-child` chains.
    let (input, rest) = many0(parse_simple_selector)(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, CompoundSelector::new(selectors)))
}

/// Parses a complex selector with combinators (e.g., "g > rect").
pub fn parse_complex_selector(input: &str) -> IResult<&str, ComplexSelector> {
    let (mut input, mut current_compound) = parse_compound_selector(input)?;
    let mut parts = Vec::new();

    loop {
        let (rem, ws) = multispace0(input)?;

        // Explicit symbolic combinator: >, +, or ~
        let combinator_match: IResult<&str, Combinator> = alt((
            map(char('>'), |_| Combinator::Child),
            map(char('+'), |_| Combinator::AdjacentSibling),
            map(char('~'), |_| Combinator::GeneralSibling),
        ))(rem);

        if let Ok((after_op, found_combinator)) = combinator_match {
            let (after_ws, _) = multispace0(after_op)?;
            let (next_input, next_compound) = parse_compound_selector(after_ws)?;
            parts.push(SelectorPart::new(current_compound, found_combinator));
            current_compound = next_compound;
            input = next_input;
            continue;
        }

        // Whitespace followed by another compound is a descendant combinator.
        if !ws.is_empty() {
            if let Ok((next_input, next_compound)) = parse_compound_selector(rem) {
                parts.push(SelectorPart::new(current_compound, Combinator::Descendant));
                current_compound = next_compound;
                input = next_input;
                continue;
            }
        }

        break;
    }

    // The subject part always has Combinator::None
    parts.push(SelectorPart::new(current_compound, Combinator::None));
    Ok((input, ComplexSelector::new(parts)))
}

/// Parses a comma-separated list of selectors (e.g., "rect, .primary").
pub fn parse_selector_list(input: &str) -> IResult<&str, SelectorList> {
    let (input, _) = multispace0(input)?;
    let (input, first) = parse_complex_selector(input)?;
    let (input, rest) = many0(preceded(
        tuple((multispace0, char(','), multispace0)),
        parse_complex_selector,
    ))(input)?;

    let mut selectors = vec![first];
    selectors.extend(rest);
    Ok((input, SelectorList::new(selectors)))
}

fn parse_attribute_selector(input: &str) -> IResult<&str, Selector> {
    let (input, content) = delimited(char('['), take_until("]"), char(']'))(input)?;

    match content.find('=') {
        Some(idx) => {
            let name = content[..idx].trim();
            let raw = content[idx + 1..].trim();
            let value = match parse_string(raw) {
                Ok(("", quoted)) => quoted,
                _ => raw,
            };
            Ok((
                input,
                Selector::Attribute(name.to_string(), Some(value.to_string())),
            ))
        }
        None => Ok((input, Selector::Attribute(content.trim().to_string(), None))),
    }
}
