//! Znach parser implementation.
//!
//! Znach is a small textual value notation with Ukrainian keywords. A
//! document is a single value: `пусто`, a logical `так` or `ні`, a number,
//! quoted text, a list `[...]`, a dictionary `(key = value, ...)` or a named
//! object `Name(key = value, ...)`.
//!
//! # Parsing Pipeline
//!
//! There is no separate lexer. Parsers are plain functions over the remaining
//! input, built from the generic pieces in [`combinator`]:
//!
//! 1. **Leading whitespace** is measured to find where the root value starts.
//!
//! 2. **Grammar**: [`grammar::parse_root`] descends through the value
//!    variants, threading a [`Context`] so that every node records the row
//!    and column it starts at.
//!
//! 3. **Trailing input** other than whitespace, in the Unicode sense, is rejected.

pub mod ast;
pub mod combinator;
pub mod context;
mod error;
pub mod grammar;
mod options;

use tracing::debug;

pub use ast::{
    AstNode, DictionaryEntryNode, DictionaryKey, DictionaryNode, EmptyNode, ListNode, LogicalNode,
    Number, NumberNode, ObjectEntryNode, ObjectNode, TextNode,
};
pub use context::{Context, Offset};
pub use error::{Cause, Error, Frame, IResult, Location, ParseError, Result};
pub use options::{ParseOptions, DEFAULT_MAX_DEPTH};

/// Parse a znach document from a string.
///
/// # Example
///
/// ```
/// use libznach::parse;
///
/// let node = parse("Точка(x = 1, y = 2)").unwrap();
/// assert_eq!(node.as_object().unwrap().identifier, "Точка");
/// ```
pub fn parse(input: &str) -> Result<AstNode> {
    parse_with_filename(input, None)
}

/// Parse a znach document from a string with a filename for error messages.
pub fn parse_with_filename(input: &str, filename: Option<&str>) -> Result<AstNode> {
    let options = ParseOptions {
        filename: filename.map(String::from),
        ..ParseOptions::default()
    };
    parse_with_options(input, &options)
}

/// Parse a znach document with explicit options.
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<AstNode> {
    let filename = options.filename.as_deref();
    debug!(filename, len = input.len(), "parsing znach document");

    let (rest, leading) = context::whitespace_offset(input)
        .map_err(|err| Error::syntax(&err, input, filename))?;
    let start = Context::default().advance(leading);
    let scope = grammar::Scope::root(options.max_depth);

    let (rest, (node, _)) = grammar::parse_root(rest, start, scope).map_err(|err| {
        debug!(filename, expected = %err.innermost().expected, "parse failed");
        Error::syntax(&err, input, filename)
    })?;

    let rest = rest.trim_start();
    if !rest.is_empty() {
        debug!(filename, "trailing characters after root value");
        return Err(Error::trailing(rest, input, filename));
    }
    Ok(node)
}
