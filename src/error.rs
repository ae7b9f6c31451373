//! Error types for query rendering.

use thiserror::Error;

use crate::render::Dialect;

/// Errors raised while rendering a query against a dialect.
///
/// Building a query never fails: the same tree may be rendered against
/// several dialects, and only the render call can decide whether a construct
/// is expressible. A renderer either produces correct SQL or returns one of
/// these; it never silently drops a clause.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SqlError {
    /// The dialect's capability profile rejects a requested feature.
    #[error("{dialect} does not support {feature}")]
    Unsupported {
        dialect: Dialect,
        feature: &'static str,
    },

    /// ON CONFLICT DO UPDATE without conflict target columns, on a dialect
    /// that requires an explicit target.
    #[error("{dialect} requires conflict target columns for DO UPDATE")]
    MissingConflictTarget { dialect: Dialect },

    /// An INSERT VALUES row does not match the declared column list.
    #[error("VALUES row {row} has {got} terms, expected {expected}")]
    RowWidthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    /// NaN or an infinity has no SQL literal form.
    #[error("cannot render a non-finite float literal")]
    NonFiniteFloat,

    /// The builder holds no renderable statement (e.g. an UPDATE without
    /// SET assignments or an INSERT without rows or a source query).
    #[error("incomplete query: {0}")]
    Incomplete(&'static str),
}

/// Result type alias for render operations.
pub type SqlResult<T> = Result<T, SqlError>;
