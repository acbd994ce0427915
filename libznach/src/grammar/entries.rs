//! Comma-separated entries shared by lists, dictionaries and objects.

use tracing::trace;

use super::NodeResult;
use crate::combinator::{tag, tuple};
use crate::context::{whitespace_offset, Context, Offset};
use crate::error::{IResult, ParseError};

/// `ws "," ws`
fn separator<'a>(input: &'a str) -> IResult<'a, (Offset, &'a str, Offset)> {
    tuple((whitespace_offset, tag(","), whitespace_offset))(input)
}

/// Parse entries with `entry` until no separator follows.
///
/// Zero entries is a success that consumes nothing, unless the first attempt
/// failed fatally. Once one entry has been read, every separator must be
/// followed by another entry, so a trailing comma fails.
pub fn list_of_entries<'a, T, F>(
    input: &'a str,
    context: Context,
    entry: F,
) -> NodeResult<'a, Vec<T>>
where
    F: Fn(&'a str, Context) -> NodeResult<'a, T>,
{
    let mut entries = Vec::new();
    let mut rest = input;
    let mut context = context;

    loop {
        let (after, (item, next)) = match entry(rest, context) {
            Ok(done) => done,
            Err(err) if entries.is_empty() && !err.fatal => return Ok((input, (entries, context))),
            Err(err) => return Err(ParseError::wrap("a list entry", rest, err)),
        };
        entries.push(item);
        trace!(
            index = entries.len() - 1,
            row = next.row,
            column = next.column,
            "entry"
        );
        rest = after;
        context = next;

        match separator(rest) {
            Ok((after, (before, _, behind))) => {
                rest = after;
                context = context.advance(before).add_columns(1).advance(behind);
            }
            Err(_) => break,
        }
    }

    Ok((rest, (entries, context)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::parse_number;
    use crate::ast::NumberNode;

    fn numbers<'a>(input: &'a str) -> NodeResult<'a, Vec<NumberNode>> {
        list_of_entries(input, Context::default(), parse_number)
    }

    fn values(nodes: &[NumberNode]) -> Vec<String> {
        nodes.iter().map(|node| node.value.to_string()).collect()
    }

    #[test]
    fn test_no_entries() {
        let (rest, (entries, next)) = numbers("]").unwrap();
        assert_eq!(rest, "]");
        assert!(entries.is_empty());
        assert_eq!(next, Context::default());
    }

    #[test]
    fn test_entries_and_contexts() {
        let (rest, (entries, next)) = numbers("1 ,\n 22,3]").unwrap();
        assert_eq!(rest, "]");
        assert_eq!(values(&entries), ["1", "22", "3"]);
        assert_eq!(entries[0].context, Context::new(0, 0));
        assert_eq!(entries[1].context, Context::new(1, 1));
        assert_eq!(entries[2].context, Context::new(1, 4));
        assert_eq!(next, Context::new(1, 5));
    }

    #[test]
    fn test_stops_without_separator() {
        let (rest, (entries, _)) = numbers("1 2").unwrap();
        assert_eq!(rest, " 2");
        assert_eq!(entries.len(), 1);
    }

    fn too_deep(input: &str, _: Context) -> NodeResult<'_, ()> {
        Err(ParseError::fatal("less nesting", input, "limit"))
    }

    #[test]
    fn test_fatal_first_entry_is_kept() {
        let err = list_of_entries("x]", Context::default(), too_deep).unwrap_err();
        assert!(err.fatal);
        assert_eq!(err.expected, "a list entry");
        assert_eq!(err.innermost().expected, "less nesting");
    }

    #[test]
    fn test_trailing_comma_fails() {
        let err = numbers("1, ]").unwrap_err();
        assert_eq!(err.expected, "a list entry");
        assert_eq!(err.remaining, "]");
        assert_eq!(err.innermost().remaining, "]");
    }
}
