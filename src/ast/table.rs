use serde::{Deserialize, Serialize};

use crate::ast::criterion::Criterion;
use crate::ast::query::Select;
use crate::ast::term::Term;

/// A reference to a named table: name, optional schema, optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRef {
    pub name: String,
    pub schema: Option<String>,
    pub alias: Option<String>,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            alias: None,
        }
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// The name a qualified column reference should use: the alias when one
    /// is set, the table name otherwise.
    pub fn reference_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

impl From<&str> for TableRef {
    fn from(name: &str) -> Self {
        TableRef::new(name)
    }
}

impl From<String> for TableRef {
    fn from(name: String) -> Self {
        TableRef::new(name)
    }
}

/// A join target: either a named table or an aliased subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableLike {
    Table(TableRef),
    Subquery { query: Box<Select>, alias: String },
}

impl From<TableRef> for TableLike {
    fn from(t: TableRef) -> Self {
        TableLike::Table(t)
    }
}

impl From<&str> for TableLike {
    fn from(name: &str) -> Self {
        TableLike::Table(TableRef::new(name))
    }
}

impl From<String> for TableLike {
    fn from(name: String) -> Self {
        TableLike::Table(TableRef::new(name))
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// A join definition. Joins apply left to right in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Join {
    pub kind: JoinKind,
    pub target: TableLike,
    /// Join criterion; `None` only for cross joins.
    pub on: Option<Criterion>,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

impl Order {
    pub fn keyword(&self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry: a term and an optional direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBy {
    pub term: Term,
    pub order: Option<Order>,
}

/// Set operations combining two SELECTs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetOp {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            SetOp::Union => "UNION",
            SetOp::UnionAll => "UNION ALL",
            SetOp::Intersect => "INTERSECT",
            SetOp::Except => "EXCEPT",
        }
    }
}

/// An index hint attached to the FROM clause (MySQL-style).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexHint {
    Use(Vec<String>),
    Force(Vec<String>),
}

/// A `FOR UPDATE` row-locking clause on a SELECT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RowLock {
    pub nowait: bool,
    pub skip_locked: bool,
}

/// A common table expression: name, optional column list, owned inner
/// query and a recursive flag. One recursive entry upgrades the whole
/// `WITH` clause to `WITH RECURSIVE`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cte {
    pub name: String,
    pub columns: Vec<String>,
    pub query: Box<Select>,
    pub recursive: bool,
}

impl Cte {
    pub fn new(name: impl Into<String>, query: Select) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            query: Box::new(query),
            recursive: false,
        }
    }

    pub fn columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = cols.into_iter().map(Into::into).collect();
        self
    }

    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }
}
