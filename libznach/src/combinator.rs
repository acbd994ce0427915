//! Parser combinators.
//!
//! A parser is any `Fn(&'a str) -> IResult<'a, O>`: it takes the remaining
//! input and either returns what is left after it together with its value, or
//! a [`ParseError`]. Parsers never touch their input, so a failed attempt can
//! always be retried from the same slice. Everything here is independent of
//! the znach grammar.

use crate::error::{IResult, ParseError};

// ============================================================================
// Token Parsers
// ============================================================================

/// Match a fixed literal.
pub fn tag<'a>(literal: &'static str) -> impl Fn(&'a str) -> IResult<'a, &'a str> {
    move |input: &'a str| match input.strip_prefix(literal) {
        Some(rest) => Ok((rest, &input[..literal.len()])),
        None => Err(ParseError::new(format!("`{}`", literal), input, "tag")),
    }
}

/// Match one character accepted by `predicate`.
pub fn satisfy<'a, F>(expected: &'static str, predicate: F) -> impl Fn(&'a str) -> IResult<'a, char>
where
    F: Fn(char) -> bool,
{
    move |input: &'a str| {
        let mut chars = input.chars();
        match chars.next() {
            Some(c) if predicate(c) => Ok((chars.as_str(), c)),
            _ => Err(ParseError::new(expected, input, "satisfy")),
        }
    }
}

/// Match one character listed in `chars`.
pub fn one_of<'a>(chars: &'static str) -> impl Fn(&'a str) -> IResult<'a, char> {
    satisfy("one of the listed characters", move |c| chars.contains(c))
}

/// Match one character not listed in `chars`.
pub fn none_of<'a>(chars: &'static str) -> impl Fn(&'a str) -> IResult<'a, char> {
    satisfy("none of the listed characters", move |c| !chars.contains(c))
}

/// Match the longest non-empty run of characters accepted by `predicate`.
pub fn take_while1<'a, F>(
    expected: &'static str,
    predicate: F,
) -> impl Fn(&'a str) -> IResult<'a, &'a str>
where
    F: Fn(char) -> bool,
{
    move |input: &'a str| {
        let rest = input.trim_start_matches(|c: char| predicate(c));
        if rest.len() == input.len() {
            return Err(ParseError::new(expected, input, "take_while1"));
        }
        Ok((rest, &input[..input.len() - rest.len()]))
    }
}

// ============================================================================
// Transformations
// ============================================================================

/// Transform the value of a successful parse.
pub fn map<'a, O1, O2, P, F>(parser: P, f: F) -> impl Fn(&'a str) -> IResult<'a, O2>
where
    P: Fn(&'a str) -> IResult<'a, O1>,
    F: Fn(O1) -> O2,
{
    move |input: &'a str| parser(input).map(|(rest, out)| (rest, f(out)))
}

/// Replace the value of a successful parse with `constant`.
pub fn value<'a, O, V, P>(parser: P, constant: V) -> impl Fn(&'a str) -> IResult<'a, V>
where
    P: Fn(&'a str) -> IResult<'a, O>,
    V: Clone,
{
    move |input: &'a str| parser(input).map(|(rest, _)| (rest, constant.clone()))
}

/// Return exactly the slice `parser` consumed.
pub fn recognize<'a, O, P>(parser: P) -> impl Fn(&'a str) -> IResult<'a, &'a str>
where
    P: Fn(&'a str) -> IResult<'a, O>,
{
    move |input: &'a str| {
        let (rest, _) = parser(input)?;
        Ok((rest, &input[..input.len() - rest.len()]))
    }
}

/// Succeed with `None`, consuming nothing, when `parser` fails.
pub fn opt<'a, O, P>(parser: P) -> impl Fn(&'a str) -> IResult<'a, Option<O>>
where
    P: Fn(&'a str) -> IResult<'a, O>,
{
    move |input: &'a str| match parser(input) {
        Ok((rest, out)) => Ok((rest, Some(out))),
        Err(err) if err.fatal => Err(err),
        Err(_) => Ok((input, None)),
    }
}

// ============================================================================
// Sequencing
// ============================================================================

/// Run two parsers one after the other, keeping both values.
pub fn pair<'a, O1, O2, P1, P2>(first: P1, second: P2) -> impl Fn(&'a str) -> IResult<'a, (O1, O2)>
where
    P1: Fn(&'a str) -> IResult<'a, O1>,
    P2: Fn(&'a str) -> IResult<'a, O2>,
{
    move |input: &'a str| {
        let (rest, a) = first(input)?;
        let (rest, b) = second(rest)?;
        Ok((rest, (a, b)))
    }
}

/// Keep the value of `first`; `second` must still match.
pub fn terminated<'a, O1, O2, P1, P2>(first: P1, second: P2) -> impl Fn(&'a str) -> IResult<'a, O1>
where
    P1: Fn(&'a str) -> IResult<'a, O1>,
    P2: Fn(&'a str) -> IResult<'a, O2>,
{
    map(pair(first, second), |(a, _)| a)
}

/// Keep the value of `second`; `first` must still match.
pub fn preceded<'a, O1, O2, P1, P2>(first: P1, second: P2) -> impl Fn(&'a str) -> IResult<'a, O2>
where
    P1: Fn(&'a str) -> IResult<'a, O1>,
    P2: Fn(&'a str) -> IResult<'a, O2>,
{
    map(pair(first, second), |(_, b)| b)
}

/// Keep the value of the middle parser.
pub fn delimited<'a, O1, O2, O3, P1, P2, P3>(
    first: P1,
    second: P2,
    third: P3,
) -> impl Fn(&'a str) -> IResult<'a, O2>
where
    P1: Fn(&'a str) -> IResult<'a, O1>,
    P2: Fn(&'a str) -> IResult<'a, O2>,
    P3: Fn(&'a str) -> IResult<'a, O3>,
{
    preceded(first, terminated(second, third))
}

/// A fixed-size sequence of parsers with possibly different outputs.
pub trait Tuple<'a, O> {
    fn parse_tuple(&self, input: &'a str) -> IResult<'a, O>;
}

macro_rules! tuple_impl {
    ($($P:ident $O:ident $o:ident $idx:tt),+) => {
        impl<'a, $($P, $O),+> Tuple<'a, ($($O,)+)> for ($($P,)+)
        where
            $($P: Fn(&'a str) -> IResult<'a, $O>),+
        {
            fn parse_tuple(&self, input: &'a str) -> IResult<'a, ($($O,)+)> {
                let rest = input;
                $(let (rest, $o) = (self.$idx)(rest)?;)+
                Ok((rest, ($($o,)+)))
            }
        }
    };
}

tuple_impl!(P0 O0 o0 0, P1 O1 o1 1);
tuple_impl!(P0 O0 o0 0, P1 O1 o1 1, P2 O2 o2 2);
tuple_impl!(P0 O0 o0 0, P1 O1 o1 1, P2 O2 o2 2, P3 O3 o3 3);
tuple_impl!(P0 O0 o0 0, P1 O1 o1 1, P2 O2 o2 2, P3 O3 o3 3, P4 O4 o4 4);
tuple_impl!(P0 O0 o0 0, P1 O1 o1 1, P2 O2 o2 2, P3 O3 o3 3, P4 O4 o4 4, P5 O5 o5 5);
tuple_impl!(P0 O0 o0 0, P1 O1 o1 1, P2 O2 o2 2, P3 O3 o3 3, P4 O4 o4 4, P5 O5 o5 5, P6 O6 o6 6);

/// Run every parser of `parsers` in order; the first failure aborts.
pub fn tuple<'a, O, L>(parsers: L) -> impl Fn(&'a str) -> IResult<'a, O>
where
    L: Tuple<'a, O>,
{
    move |input: &'a str| parsers.parse_tuple(input)
}

// ============================================================================
// Alternation and Repetition
// ============================================================================

/// A fixed-size choice between parsers with the same output.
pub trait Alt<'a, O> {
    fn choice(&self, input: &'a str) -> IResult<'a, O>;
}

macro_rules! alt_impl {
    ($($P:ident $idx:tt),+) => {
        impl<'a, O, $($P),+> Alt<'a, O> for ($($P,)+)
        where
            $($P: Fn(&'a str) -> IResult<'a, O>),+
        {
            fn choice(&self, input: &'a str) -> IResult<'a, O> {
                $(
                    match (self.$idx)(input) {
                        Ok(done) => return Ok(done),
                        Err(err) if err.fatal => return Err(err),
                        Err(_) => {}
                    }
                )+
                Err(ParseError::new("one of the provided parsers", input, "alt"))
            }
        }
    };
}

alt_impl!(P0 0, P1 1);
alt_impl!(P0 0, P1 1, P2 2);
alt_impl!(P0 0, P1 1, P2 2, P3 3);
alt_impl!(P0 0, P1 1, P2 2, P3 3, P4 4);
alt_impl!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5);
alt_impl!(P0 0, P1 1, P2 2, P3 3, P4 4, P5 5, P6 6);

/// Try each parser against the same input; the first success wins.
///
/// When all of them fail the error says nothing about which came closest, so
/// grammar rules wrap an alternation in [`with_error`] or [`label`].
pub fn alt<'a, O, L>(parsers: L) -> impl Fn(&'a str) -> IResult<'a, O>
where
    L: Alt<'a, O>,
{
    move |input: &'a str| parsers.choice(input)
}

/// Apply `parser` until it fails, collecting the values.
///
/// A success that consumes nothing would repeat forever, so it is an error.
pub fn many0<'a, O, P>(parser: P) -> impl Fn(&'a str) -> IResult<'a, Vec<O>>
where
    P: Fn(&'a str) -> IResult<'a, O>,
{
    move |input: &'a str| {
        let mut rest = input;
        let mut items = Vec::new();
        loop {
            match parser(rest) {
                Ok((next, item)) => {
                    if next.len() == rest.len() {
                        return Err(ParseError::new("parser that consumes input", rest, "many0"));
                    }
                    items.push(item);
                    rest = next;
                }
                Err(err) if err.fatal => return Err(err),
                Err(_) => return Ok((rest, items)),
            }
        }
    }
}

// ============================================================================
// Error Substitution
// ============================================================================

/// Replace any non-fatal failure of `parser` with the error built by
/// `make_error`.
pub fn with_error<'a, O, P, E>(parser: P, make_error: E) -> impl Fn(&'a str) -> IResult<'a, O>
where
    P: Fn(&'a str) -> IResult<'a, O>,
    E: Fn(&'a str) -> ParseError<'a>,
{
    move |input: &'a str| {
        parser(input).map_err(|err| if err.fatal { err } else { make_error(input) })
    }
}

/// Describe any failure of `parser` as `expected`, keeping it as the cause.
pub fn label<'a, O, P>(parser: P, expected: &'static str) -> impl Fn(&'a str) -> IResult<'a, O>
where
    P: Fn(&'a str) -> IResult<'a, O>,
{
    move |input: &'a str| parser(input).map_err(|err| ParseError::wrap(expected, input, err))
}
