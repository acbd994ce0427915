//! Position bookkeeping.
//!
//! A [`Context`] is the row/column at which a node starts. Parsers never
//! mutate one; every successful step hands back a new value. An [`Offset`]
//! is the row/column delta of a consumed span and is the only way spans
//! longer than a fixed token are folded into a context.

use crate::error::IResult;

/// Row/column position in the source, both zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Context {
    pub row: usize,
    pub column: usize,
}

impl Context {
    /// Create a context at the given position.
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Move down `rows` lines. Any line break discards the column progress.
    #[must_use]
    pub const fn add_rows(self, rows: usize) -> Self {
        if rows == 0 {
            return self;
        }
        Self {
            row: self.row + rows,
            column: 0,
        }
    }

    /// Move right `columns` characters on the current line.
    #[must_use]
    pub const fn add_columns(self, columns: usize) -> Self {
        Self {
            row: self.row,
            column: self.column + columns,
        }
    }

    /// Fold a consumed span into this context.
    #[must_use]
    pub const fn advance(self, offset: Offset) -> Self {
        self.add_rows(offset.rows).add_columns(offset.columns)
    }
}

/// Row/column delta of a consumed span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Offset {
    /// Number of line feeds in the span.
    pub rows: usize,
    /// Characters after the last line feed, or the whole span without one.
    pub columns: usize,
}

impl Offset {
    /// Measure an arbitrary span. Columns count `char`s, not bytes.
    pub fn of(span: &str) -> Self {
        let rows = span.matches('\n').count();
        let tail = match span.rfind('\n') {
            Some(idx) => &span[idx + 1..],
            None => span,
        };
        Self {
            rows,
            columns: tail.chars().count(),
        }
    }
}

/// Whitespace that separates tokens.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Consume the longest run of whitespace and report how far it moved.
///
/// Never fails: an empty run is `Offset { rows: 0, columns: 0 }`.
pub fn whitespace_offset(input: &str) -> IResult<'_, Offset> {
    let rest = input.trim_start_matches(is_whitespace);
    let span = &input[..input.len() - rest.len()];
    Ok((rest, Offset::of(span)))
}
