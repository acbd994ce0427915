//! Dictionaries, objects and lists.

use super::entries::list_of_entries;
use super::scalar::{identifier, parse_number};
use super::text::parse_text;
use super::{parse_node, NodeResult, Scope};
use crate::ast::{
    DictionaryEntryNode, DictionaryKey, DictionaryNode, ListNode, ObjectEntryNode, ObjectNode,
    TextNode,
};
use crate::combinator::{alt, label, map, preceded, tag, terminated, tuple, with_error};
use crate::context::{whitespace_offset, Context};
use crate::error::{IResult, ParseError};

/// Opening and closing tokens of a bracketed body.
struct Brackets {
    open: &'static str,
    close: &'static str,
    open_expected: &'static str,
    close_expected: &'static str,
    open_note: &'static str,
    close_note: &'static str,
}

const DICTIONARY: Brackets = Brackets {
    open: "(",
    close: ")",
    open_expected: "`(`",
    close_expected: "`)`",
    open_note: "start of a dictionary",
    close_note: "end of a dictionary",
};

const OBJECT_BODY: Brackets = Brackets {
    open: "(",
    close: ")",
    open_expected: "`(`",
    close_expected: "`)`",
    open_note: "start of an object body",
    close_note: "end of an object body",
};

const LIST: Brackets = Brackets {
    open: "[",
    close: "]",
    open_expected: "`[`",
    close_expected: "`]`",
    open_note: "start of a list",
    close_note: "end of a list",
};

/// The bracketed entries starting at `input`, and the context past the
/// closing bracket.
fn bracketed<'a, T, F>(
    input: &'a str,
    context: Context,
    brackets: &'static Brackets,
    entry: F,
) -> NodeResult<'a, Vec<T>>
where
    F: Fn(&'a str, Context) -> NodeResult<'a, T>,
{
    let open = preceded(tag(brackets.open), whitespace_offset);
    let (rest, after_open) = with_error(open, |i| {
        ParseError::new(brackets.open_expected, i, brackets.open_note)
    })(input)?;
    let context = context.add_columns(1).advance(after_open);

    let (rest, (entries, context)) = list_of_entries(rest, context, entry)?;

    let close = terminated(whitespace_offset, tag(brackets.close));
    let (rest, before_close) = with_error(close, |i| {
        ParseError::new(brackets.close_expected, i, brackets.close_note)
    })(rest)?;
    Ok((rest, (entries, context.advance(before_close).add_columns(1))))
}

/// `ws "=" ws` between a key and its value; returns the context past it.
fn key_value_separator<'a>(input: &'a str, context: Context) -> IResult<'a, Context> {
    let (rest, (before, _, behind)) = with_error(
        tuple((whitespace_offset, tag("="), whitespace_offset)),
        |i| ParseError::new("`=`", i, "separator between a key and its value"),
    )(input)?;
    Ok((rest, context.advance(before).add_columns(1).advance(behind)))
}

// ============================================================================
// Dictionaries
// ============================================================================

/// An identifier, quoted text or number. Identifiers become text keys.
fn dictionary_key<'a>(input: &'a str, context: Context) -> NodeResult<'a, DictionaryKey> {
    with_error(
        alt((
            map(identifier, move |name: &'a str| {
                let key = TextNode {
                    text: name.to_string(),
                    context,
                };
                (DictionaryKey::Text(key), context.add_columns(name.chars().count()))
            }),
            map(
                |i: &'a str| parse_text(i, context),
                |(key, next)| (DictionaryKey::Text(key), next),
            ),
            map(
                |i: &'a str| parse_number(i, context),
                |(key, next)| (DictionaryKey::Number(key), next),
            ),
        )),
        |i| ParseError::new("a dictionary key", i, "identifier, text or number"),
    )(input)
}

fn dictionary_entry<'a>(
    input: &'a str,
    context: Context,
    scope: Scope,
) -> NodeResult<'a, DictionaryEntryNode> {
    let (rest, (key, next)) = dictionary_key(input, context)?;
    let (rest, next) = key_value_separator(rest, next)?;
    let (rest, (value, next)) = parse_node(rest, next, scope)?;
    Ok((rest, (DictionaryEntryNode { key, value, context }, next)))
}

fn dictionary<'a>(
    input: &'a str,
    context: Context,
    scope: Scope,
) -> NodeResult<'a, DictionaryNode> {
    let entry = |i: &'a str, c: Context| {
        label(|i: &'a str| dictionary_entry(i, c, scope), "a dictionary entry")(i)
    };
    let (rest, (entries, next)) = bracketed(input, context, &DICTIONARY, entry)?;
    Ok((rest, (DictionaryNode { entries, context }, next)))
}

/// `( key = value, ... )`
pub fn parse_dictionary<'a>(
    input: &'a str,
    context: Context,
    scope: Scope,
) -> NodeResult<'a, DictionaryNode> {
    label(|i: &'a str| dictionary(i, context, scope), "a dictionary")(input)
}

// ============================================================================
// Objects
// ============================================================================

fn object_entry<'a>(
    input: &'a str,
    context: Context,
    scope: Scope,
) -> NodeResult<'a, ObjectEntryNode> {
    let (rest, key) = with_error(identifier, |i| {
        ParseError::new("an object entry key", i, "keys of an object are identifiers")
    })(input)?;
    let next = context.add_columns(key.chars().count());
    let (rest, next) = key_value_separator(rest, next)?;
    let (rest, (value, next)) = parse_node(rest, next, scope)?;
    let entry = ObjectEntryNode {
        key: key.to_string(),
        value,
        context,
    };
    Ok((rest, (entry, next)))
}

fn object<'a>(input: &'a str, context: Context, scope: Scope) -> NodeResult<'a, ObjectNode> {
    let (rest, name) = with_error(identifier, |i| {
        ParseError::new("an object name", i, "object name")
    })(input)?;
    let body = context.add_columns(name.chars().count());
    let entry = |i: &'a str, c: Context| {
        label(|i: &'a str| object_entry(i, c, scope), "an object entry")(i)
    };
    let (rest, (entries, next)) = bracketed(rest, body, &OBJECT_BODY, entry)?;
    let node = ObjectNode {
        identifier: name.to_string(),
        entries,
        context,
    };
    Ok((rest, (node, next)))
}

/// `Name( key = value, ... )`
pub fn parse_object<'a>(
    input: &'a str,
    context: Context,
    scope: Scope,
) -> NodeResult<'a, ObjectNode> {
    label(|i: &'a str| object(i, context, scope), "an object")(input)
}

// ============================================================================
// Lists
// ============================================================================

fn list<'a>(input: &'a str, context: Context, scope: Scope) -> NodeResult<'a, ListNode> {
    let entry = |i: &'a str, c: Context| parse_node(i, c, scope);
    let (rest, (entries, next)) = bracketed(input, context, &LIST, entry)?;
    Ok((rest, (ListNode { entries, context }, next)))
}

/// `[ value, ... ]`
pub fn parse_list<'a>(
    input: &'a str,
    context: Context,
    scope: Scope,
) -> NodeResult<'a, ListNode> {
    label(|i: &'a str| list(i, context, scope), "a list")(input)
}
