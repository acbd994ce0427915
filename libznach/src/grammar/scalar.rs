//! Keywords, numbers and identifiers.

use num_bigint::BigInt;

use super::{consumed_chars, NodeResult};
use crate::ast::{EmptyNode, LogicalNode, Number, NumberNode};
use crate::combinator::{
    alt, label, opt, pair, recognize, satisfy, tag, take_while1, tuple, value, with_error,
};
use crate::context::Context;
use crate::error::{IResult, ParseError};

pub const EMPTY_KEYWORD: &str = "пусто";
pub const TRUE_KEYWORD: &str = "так";
pub const FALSE_KEYWORD: &str = "ні";

// ============================================================================
// Keywords
// ============================================================================

/// `пусто`
pub fn parse_empty<'a>(input: &'a str, context: Context) -> NodeResult<'a, EmptyNode> {
    let (rest, keyword) = with_error(tag(EMPTY_KEYWORD), |i| {
        ParseError::new("`пусто`", i, "empty node")
    })(input)?;
    let next = context.add_columns(keyword.chars().count());
    Ok((rest, (EmptyNode { context }, next)))
}

/// `так` or `ні`
pub fn parse_logical<'a>(input: &'a str, context: Context) -> NodeResult<'a, LogicalNode> {
    let (rest, truth) = with_error(
        alt((value(tag(TRUE_KEYWORD), true), value(tag(FALSE_KEYWORD), false))),
        |i| ParseError::new("`так` or `ні`", i, "logical value"),
    )(input)?;
    let next = context.add_columns(consumed_chars(input, rest));
    Ok((rest, (LogicalNode { value: truth, context }, next)))
}

// ============================================================================
// Numbers
// ============================================================================

fn digits<'a>(input: &'a str) -> IResult<'a, &'a str> {
    take_while1("a decimal digit", |c| c.is_ascii_digit())(input)
}

/// `-?digits(.digits)?`, as written.
fn numeral<'a>(input: &'a str) -> IResult<'a, &'a str> {
    recognize(tuple((opt(tag("-")), digits, opt(pair(tag("."), digits)))))(input)
}

/// A number literal. Integers stay exact; a fractional part makes a float.
pub fn number_literal<'a>(input: &'a str) -> IResult<'a, Number> {
    let (rest, raw) = numeral(input)?;
    let number = if raw.contains('.') {
        raw.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| ParseError::new("a decimal number", input, "float out of range"))?
    } else {
        raw.parse::<BigInt>()
            .map(Number::Integer)
            .map_err(|_| ParseError::new("a decimal number", input, "malformed integer"))?
    };
    Ok((rest, number))
}

pub fn parse_number<'a>(input: &'a str, context: Context) -> NodeResult<'a, NumberNode> {
    let (rest, value) = label(number_literal, "a number")(input)?;
    let next = context.add_columns(consumed_chars(input, rest));
    Ok((rest, (NumberNode { value, context }, next)))
}

// ============================================================================
// Identifiers
// ============================================================================

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// A letter or underscore, then letters, digits and underscores.
pub fn identifier<'a>(input: &'a str) -> IResult<'a, &'a str> {
    recognize(pair(
        satisfy("a letter or `_`", is_identifier_start),
        opt(take_while1("a letter, digit or `_`", is_identifier_char)),
    ))(input)
}
