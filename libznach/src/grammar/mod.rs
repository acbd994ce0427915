//! Grammar of znach values.
//!
//! Each value variant has its own parser taking the remaining input and the
//! [`Context`] at which the value starts, and returning the node together with
//! the context just past it. Compound variants call back into [`parse_node`]
//! for their elements.

mod compound;
mod entries;
mod scalar;
mod text;

use tracing::debug;

use crate::ast::AstNode;
use crate::context::Context;
use crate::error::{IResult, ParseError};

pub use compound::{parse_dictionary, parse_list, parse_object};
pub use entries::list_of_entries;
pub use scalar::{
    identifier, number_literal, parse_empty, parse_logical, parse_number, EMPTY_KEYWORD,
    FALSE_KEYWORD, TRUE_KEYWORD,
};
pub use text::{parse_text, text_literal};

/// Outcome of a node parser: the node and the context just past it.
pub type NodeResult<'a, T> = IResult<'a, (T, Context)>;

const VALUE_EXPECTED: &str =
    "one of: `пусто`, `так`, `ні`, a number, text, an object, a dictionary or a list";

/// How many values enclose the one being parsed. The root value is at
/// depth one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    depth: usize,
    max_depth: usize,
}

impl Scope {
    /// The scope of a root value.
    pub fn root(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    /// Enter one more level of nesting, failing at the limit.
    pub fn descend<'a>(self, input: &'a str) -> Result<Self, ParseError<'a>> {
        if self.depth >= self.max_depth {
            debug!(max_depth = self.max_depth, "nesting limit reached");
            return Err(ParseError::fatal(
                format!("a value nested at most {} levels deep", self.max_depth),
                input,
                "nesting limit",
            ));
        }
        Ok(Self {
            depth: self.depth + 1,
            ..self
        })
    }
}

/// Number of characters between `input` and its suffix `rest`.
pub(crate) fn consumed_chars(input: &str, rest: &str) -> usize {
    input[..input.len() - rest.len()].chars().count()
}

/// The value variants in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Empty,
    Logical,
    Number,
    Text,
    Object,
    Dictionary,
    List,
}

impl Kind {
    const ALL: [Kind; 7] = [
        Kind::Empty,
        Kind::Logical,
        Kind::Number,
        Kind::Text,
        Kind::Object,
        Kind::Dictionary,
        Kind::List,
    ];

    /// What a value of this kind must look like.
    fn hint(self) -> &'static str {
        match self {
            Kind::Empty => "an empty node is written `пусто`",
            Kind::Logical => "a logical value is `так` or `ні`",
            Kind::Number => "a number is decimal, maybe negative, maybe fractional: `-12.5`",
            Kind::Text => "text is quoted, with `\\n` instead of a line break: `\"рядок\"`",
            Kind::Object => "an object looks like `Назва(ключ=\"значення\")`",
            Kind::Dictionary => "a dictionary looks like `(ключ=\"значення\")`",
            Kind::List => "a list looks like `[\"елемент\"]`",
        }
    }

    fn parse<'a>(self, input: &'a str, context: Context, scope: Scope) -> NodeResult<'a, AstNode> {
        match self {
            Kind::Empty => parse_empty(input, context)
                .map(|(rest, (node, next))| (rest, (AstNode::Empty(node), next))),
            Kind::Logical => parse_logical(input, context)
                .map(|(rest, (node, next))| (rest, (AstNode::Logical(node), next))),
            Kind::Number => parse_number(input, context)
                .map(|(rest, (node, next))| (rest, (AstNode::Number(node), next))),
            Kind::Text => parse_text(input, context)
                .map(|(rest, (node, next))| (rest, (AstNode::Text(node), next))),
            Kind::Object => parse_object(input, context, scope)
                .map(|(rest, (node, next))| (rest, (AstNode::Object(node), next))),
            Kind::Dictionary => parse_dictionary(input, context, scope)
                .map(|(rest, (node, next))| (rest, (AstNode::Dictionary(node), next))),
            Kind::List => parse_list(input, context, scope)
                .map(|(rest, (node, next))| (rest, (AstNode::List(node), next))),
        }
    }
}

/// Try each variant in order; on failure report the attempt that got
/// furthest into the input, or `no_progress` when none got past the first
/// character. A fatal failure ends the search at once.
///
/// The variants are disjoint on their first character, so the furthest
/// attempt is the one the author meant.
fn parse_value<'a, E>(
    input: &'a str,
    context: Context,
    scope: Scope,
    no_progress: E,
) -> NodeResult<'a, AstNode>
where
    E: FnOnce(&'a str) -> ParseError<'a>,
{
    let scope = scope.descend(input)?;
    let mut furthest: Option<ParseError<'a>> = None;
    for kind in Kind::ALL {
        let err = match kind.parse(input, context, scope) {
            Ok(done) => return Ok(done),
            Err(err) if err.fatal => return Err(ParseError::wrap("a value", input, err)),
            Err(err) => err,
        };
        let left = err.innermost().remaining.len();
        let further = match &furthest {
            Some(best) => left < best.innermost().remaining.len(),
            None => left < input.len(),
        };
        if further {
            furthest = Some(err);
        }
    }

    match furthest {
        Some(err) => Err(ParseError::wrap("a value", input, err)),
        None => Err(no_progress(input)),
    }
}

/// Parse any value starting at `context`.
pub fn parse_node<'a>(input: &'a str, context: Context, scope: Scope) -> NodeResult<'a, AstNode> {
    parse_value(input, context, scope, |i| ParseError::new("a value", i, VALUE_EXPECTED))
}

/// Parse the root value of a document.
///
/// Same as [`parse_node`], except that when nothing matched at all the
/// failure spells out what each variant should have looked like.
pub fn parse_root<'a>(input: &'a str, context: Context, scope: Scope) -> NodeResult<'a, AstNode> {
    parse_value(input, context, scope, |i| {
        let hints: Vec<&str> = Kind::ALL.iter().map(|kind| kind.hint()).collect();
        let message = format!("no value starts here;\n{}", hints.join(";\n"));
        ParseError::new("a value", i, message)
    })
}
