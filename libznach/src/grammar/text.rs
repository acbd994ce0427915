//! Quoted text.

use super::{consumed_chars, NodeResult};
use crate::ast::TextNode;
use crate::combinator::{
    alt, delimited, label, many0, map, none_of, one_of, preceded, tag, value, with_error,
};
use crate::context::Context;
use crate::error::{IResult, ParseError};

fn unescape(c: char) -> char {
    match c {
        't' => '\t',
        other => other,
    }
}

/// One character of the text body, escapes resolved.
fn text_char<'a>(input: &'a str) -> IResult<'a, char> {
    alt((
        value(preceded(tag("\\"), tag("n")), '\n'),
        value(preceded(tag("\\"), tag("r")), '\r'),
        map(preceded(tag("\\"), one_of("\"t\\")), unescape),
        none_of("\"\\\n\r"),
    ))(input)
}

/// A double-quoted literal. Line breaks must be escaped.
pub fn text_literal<'a>(input: &'a str) -> IResult<'a, String> {
    map(
        delimited(
            with_error(tag("\""), |i| ParseError::new("`\"`", i, "start of text")),
            many0(text_char),
            with_error(tag("\""), |i| ParseError::new("`\"`", i, "end of text")),
        ),
        |chars: Vec<char>| chars.into_iter().collect::<String>(),
    )(input)
}

pub fn parse_text<'a>(input: &'a str, context: Context) -> NodeResult<'a, TextNode> {
    let (rest, text) = label(text_literal, "text")(input)?;
    let next = context.add_columns(consumed_chars(input, rest));
    Ok((rest, (TextNode { text, context }, next)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let (rest, (node, next)) = parse_text("\"привіт\", 1", Context::new(1, 2)).unwrap();
        assert_eq!(rest, ", 1");
        assert_eq!(node.text, "привіт");
        assert_eq!(node.context, Context::new(1, 2));
        assert_eq!(next, Context::new(1, 10));
    }

    #[test]
    fn test_escapes() {
        let (_, text) = text_literal(r#""a\nb\rc\td\"e\\f""#).unwrap();
        assert_eq!(text, "a\nb\rc\td\"e\\f");
    }

    #[test]
    fn test_columns_count_source_characters() {
        let (_, (_, next)) = parse_text(r#""\n""#, Context::default()).unwrap();
        assert_eq!(next, Context::new(0, 4));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(text_literal("\"\"x"), Ok(("x", String::new())));
    }

    #[test]
    fn test_raw_line_break_rejected() {
        let err = parse_text("\"a\nb\"", Context::default()).unwrap_err();
        assert_eq!(err.expected, "text");
        assert_eq!(err.innermost().remaining, "\nb\"");
    }

    #[test]
    fn test_unknown_escape_rejected() {
        let err = parse_text(r#""\q""#, Context::default()).unwrap_err();
        assert_eq!(err.innermost().remaining, r#"\q""#);
    }

    #[test]
    fn test_unterminated() {
        let err = parse_text("\"abc", Context::default()).unwrap_err();
        let inner = err.innermost();
        assert_eq!(inner.remaining, "");
        assert_eq!(inner.cause, crate::error::Cause::Custom("end of text".into()));
    }
}
