//! Typed AST for SQL queries.
//!
//! The node types are plain data: terms (expressions), criteria (boolean
//! predicates), table references and the four statement builders. All of
//! them are immutable after construction; the builders accumulate clauses
//! through `mut self` fluent methods and never mutate during rendering.

pub mod builders;
mod criterion;
mod query;
mod table;
mod term;
mod value;

pub use criterion::{Comparator, Criterion};
pub use query::{ConflictAction, Delete, Insert, OnConflict, Select, Update};
pub use table::{
    Cte, IndexHint, Join, JoinKind, Order, OrderBy, RowLock, SetOp, TableLike, TableRef,
};
pub use term::{ArithOp, Placeholder, Term};
pub use value::Value;
