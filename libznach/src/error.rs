//! Error types for znach parsing.
//!
//! Parsers fail with a [`ParseError`], a chain of frames from the outermost
//! production down to the token that was actually missing. The frames borrow
//! the remaining input so that discarded alternatives cost nothing to report.
//! Only the entry point turns a chain into the owned [`Error`] handed to
//! callers.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::context::Offset;

/// Result type for znach parsing operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a single parser: the remaining input and the parsed value.
pub type IResult<'a, O> = std::result::Result<(&'a str, O), ParseError<'a>>;

/// Longest piece of source quoted in a diagnostic.
const SNIPPET_CHARS: usize = 24;

/// What made a production fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cause<'a> {
    /// Leaf diagnostic message.
    Custom(Cow<'static, str>),
    /// The inner production that failed first.
    Nested(Box<ParseError<'a>>),
}

/// One failed production, linked to the failure that caused it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError<'a> {
    /// Description of what the production expected.
    pub expected: Cow<'static, str>,
    /// Input left at the point of failure.
    pub remaining: &'a str,
    pub cause: Cause<'a>,
    /// Set when no alternative or empty repetition may absorb the failure.
    pub fatal: bool,
}

impl<'a> ParseError<'a> {
    /// A leaf failure with a diagnostic message.
    pub fn new(
        expected: impl Into<Cow<'static, str>>,
        remaining: &'a str,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            expected: expected.into(),
            remaining,
            cause: Cause::Custom(message.into()),
            fatal: false,
        }
    }

    /// A leaf failure that aborts the whole parse, such as a resource limit.
    pub fn fatal(
        expected: impl Into<Cow<'static, str>>,
        remaining: &'a str,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            fatal: true,
            ..Self::new(expected, remaining, message)
        }
    }

    /// A failure described in terms of the inner failure that caused it.
    /// Fatality carries over from `inner`.
    pub fn wrap(
        expected: impl Into<Cow<'static, str>>,
        remaining: &'a str,
        inner: ParseError<'a>,
    ) -> Self {
        Self {
            expected: expected.into(),
            remaining,
            fatal: inner.fatal,
            cause: Cause::Nested(Box::new(inner)),
        }
    }

    /// Iterate the chain from this frame to the innermost one.
    pub fn chain(&self) -> impl Iterator<Item = &ParseError<'a>> {
        std::iter::successors(Some(self), |&err| match &err.cause {
            Cause::Nested(inner) => Some(inner.as_ref()),
            Cause::Custom(_) => None,
        })
    }

    /// The frame closest to the failing token.
    pub fn innermost(&self) -> &ParseError<'a> {
        let mut err = self;
        while let Cause::Nested(inner) = &err.cause {
            err = inner.as_ref();
        }
        err
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, found {}", self.expected, snippet(self.remaining))?;
        match &self.cause {
            Cause::Custom(message) => write!(f, " ({})", message),
            Cause::Nested(inner) => write!(f, " ({})", inner),
        }
    }
}

/// Quote the start of `remaining` for a diagnostic.
pub(crate) fn snippet(remaining: &str) -> String {
    if remaining.is_empty() {
        return "end of input".to_string();
    }
    match remaining.char_indices().nth(SNIPPET_CHARS) {
        Some((idx, _)) => format!("{:?}…", &remaining[..idx]),
        None => format!("{:?}", remaining),
    }
}

/// Position of a failure in the source, both zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Locate `remaining`, a suffix of `source`.
    pub fn of(source: &str, remaining: &str) -> Self {
        let consumed = &source[..source.len().saturating_sub(remaining.len())];
        let offset = Offset::of(consumed);
        Self {
            line: offset.rows,
            column: offset.columns,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// One rendered link of a failure chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Expected {
        expected: String,
        found: String,
        location: Location,
    },
    Note(String),
}

/// Error type for znach parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source does not match the grammar.
    #[error("{}", render_frames(.frames, .filename))]
    Syntax {
        filename: Option<String>,
        frames: Vec<Frame>,
    },

    /// A complete value was followed by more than whitespace.
    #[error("Unexpected trailing characters {found}{}", loc_suffix(.filename, .location))]
    TrailingCharacters {
        filename: Option<String>,
        found: String,
        location: Location,
    },
}

impl Error {
    /// Render a failure chain produced while parsing `source`.
    pub fn syntax(err: &ParseError<'_>, source: &str, filename: Option<&str>) -> Self {
        let mut frames = Vec::new();
        for frame in err.chain() {
            frames.push(Frame::Expected {
                expected: frame.expected.to_string(),
                found: snippet(frame.remaining),
                location: Location::of(source, frame.remaining),
            });
            if let Cause::Custom(message) = &frame.cause {
                frames.push(Frame::Note(message.to_string()));
            }
        }
        Error::Syntax {
            filename: filename.map(String::from),
            frames,
        }
    }

    /// Report the non-whitespace `rest` left after the root value.
    pub fn trailing(rest: &str, source: &str, filename: Option<&str>) -> Self {
        Error::TrailingCharacters {
            filename: filename.map(String::from),
            found: snippet(rest.trim_end()),
            location: Location::of(source, rest),
        }
    }

    /// Where parsing stopped: the innermost located frame.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::Syntax { frames, .. } => frames.iter().rev().find_map(|frame| match frame {
                Frame::Expected { location, .. } => Some(*location),
                Frame::Note(_) => None,
            }),
            Error::TrailingCharacters { location, .. } => Some(*location),
        }
    }
}

/// Format a location suffix for error messages.
fn loc_suffix(filename: &Option<String>, location: &Location) -> String {
    match filename {
        Some(name) => format!(" at {} of <{}>", location, name),
        None => format!(" at {}", location),
    }
}

fn render_frames(frames: &[Frame], filename: &Option<String>) -> String {
    let mut out = String::new();
    for (depth, frame) in frames.iter().enumerate() {
        match frame {
            Frame::Expected {
                expected,
                found,
                location,
            } => {
                if depth == 0 {
                    out.push_str("Expected ");
                } else {
                    out.push_str("\n  caused by: expected ");
                }
                out.push_str(expected);
                out.push_str(&loc_suffix(filename, location));
                out.push_str(", found ");
                out.push_str(found);
            }
            Frame::Note(message) => {
                out.push_str("\n  note: ");
                out.push_str(&message.replace('\n', "\n        "));
            }
        }
    }
    out
}
