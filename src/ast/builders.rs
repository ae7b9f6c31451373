//! Ergonomic builder functions for AST nodes.
//!
//! These helpers avoid the verbosity of constructing enum variants directly:
//!
//! ```
//! use sqlmason::prelude::*;
//!
//! let q = Select::from("orders")
//!     .column(col("id"))
//!     .column(func("LOWER", [col("email")]).alias("email"))
//!     .filter(col("total").gt(100) & col("status").eq("open"));
//! ```

use crate::ast::term::{Placeholder, Term};
use crate::ast::value::Value;

/// A column reference. A dotted name (`"users.id"`) becomes a qualified
/// field reference.
pub fn col(name: &str) -> Term {
    match name.split_once('.') {
        Some((table, column)) => Term::Field {
            name: column.to_string(),
            table: Some(table.to_string()),
        },
        None => Term::Field {
            name: name.to_string(),
            table: None,
        },
    }
}

/// All columns (*)
pub fn star() -> Term {
    Term::Star
}

/// A literal value term.
pub fn val(v: impl Into<Value>) -> Term {
    Term::Value(v.into())
}

/// The NULL literal.
pub fn null() -> Term {
    Term::Value(Value::Null)
}

/// A function call term. Zero arguments render as `NAME()`.
pub fn func<T: Into<Term>>(name: &str, args: impl IntoIterator<Item = T>) -> Term {
    Term::Function {
        name: name.to_string(),
        args: args.into_iter().map(Into::into).collect(),
    }
}

/// An explicit bind placeholder with a 1-based index, rendered per the
/// dialect's placeholder style (`$n` or `?`).
pub fn param(index: usize) -> Term {
    Term::Parameter(Placeholder::Index(index))
}

/// An explicit bind placeholder with verbatim text, e.g. `:user_id`.
pub fn named_param(text: &str) -> Term {
    Term::Parameter(Placeholder::Text(text.to_string()))
}

/// A reference to the proposed row inside an upsert DO UPDATE assignment.
/// Renders as `EXCLUDED."col"` on Postgres/SQLite and `VALUES(col)` on
/// MySQL.
pub fn excluded(column: &str) -> Term {
    Term::Excluded(column.to_string())
}
