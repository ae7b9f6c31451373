use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ast::criterion::{Comparator, Criterion};
use crate::ast::query::Select;
use crate::ast::value::Value;

/// Arithmetic operators for expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
}

impl ArithOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }

    /// Addition-level operators bind weaker than multiplication-level ones.
    pub fn is_additive(&self) -> bool {
        matches!(self, ArithOp::Add | ArithOp::Sub)
    }
}

/// An explicit placeholder inside a query, bound by the caller's driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placeholder {
    /// 1-based index; rendered per the dialect's placeholder style.
    Index(usize),
    /// Verbatim placeholder text, e.g. `:name`.
    Text(String),
}

/// A general expression node: column, literal, function call, arithmetic
/// expression or scalar subquery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Term {
    /// All columns (*)
    Star,
    /// A column reference, optionally qualified with a table name
    Field {
        name: String,
        table: Option<String>,
    },
    /// A literal value
    Value(Value),
    /// A function call (LOWER(x), COUNT(*), NOW())
    Function {
        name: String,
        args: Vec<Term>,
    },
    /// Infix arithmetic (left op right)
    Arithmetic {
        op: ArithOp,
        left: Box<Term>,
        right: Box<Term>,
    },
    /// Unary minus
    Negated(Box<Term>),
    /// A scalar subquery, rendered in parentheses
    Subquery(Box<Select>),
    /// An explicit bind placeholder
    Parameter(Placeholder),
    /// The "proposed row" pseudo-table reference used in upsert assignments.
    /// Renders as `EXCLUDED."col"` or `VALUES(col)` depending on dialect.
    Excluded(String),
    /// An aliased expression (expr AS alias)
    Aliased {
        term: Box<Term>,
        alias: String,
    },
}

impl Term {
    /// Attach an alias to this term (rendered `expr AS "alias"`).
    pub fn alias(self, alias: impl Into<String>) -> Term {
        Term::Aliased {
            term: Box::new(self),
            alias: alias.into(),
        }
    }

    pub fn eq(self, other: impl Into<Term>) -> Criterion {
        Criterion::Comparison {
            op: Comparator::Eq,
            left: self,
            right: other.into(),
        }
    }

    pub fn ne(self, other: impl Into<Term>) -> Criterion {
        Criterion::Comparison {
            op: Comparator::Ne,
            left: self,
            right: other.into(),
        }
    }

    pub fn gt(self, other: impl Into<Term>) -> Criterion {
        Criterion::Comparison {
            op: Comparator::Gt,
            left: self,
            right: other.into(),
        }
    }

    pub fn gte(self, other: impl Into<Term>) -> Criterion {
        Criterion::Comparison {
            op: Comparator::Gte,
            left: self,
            right: other.into(),
        }
    }

    pub fn lt(self, other: impl Into<Term>) -> Criterion {
        Criterion::Comparison {
            op: Comparator::Lt,
            left: self,
            right: other.into(),
        }
    }

    pub fn lte(self, other: impl Into<Term>) -> Criterion {
        Criterion::Comparison {
            op: Comparator::Lte,
            left: self,
            right: other.into(),
        }
    }

    pub fn between(self, low: impl Into<Term>, high: impl Into<Term>) -> Criterion {
        Criterion::Between {
            term: self,
            low: low.into(),
            high: high.into(),
        }
    }

    /// Membership in a list of terms. An empty list renders as the
    /// statically-false predicate `1=0`, never as invalid `IN ()`.
    pub fn is_in<T: Into<Term>>(self, items: impl IntoIterator<Item = T>) -> Criterion {
        Criterion::In {
            term: self,
            items: items.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    pub fn not_in<T: Into<Term>>(self, items: impl IntoIterator<Item = T>) -> Criterion {
        Criterion::In {
            term: self,
            items: items.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// Membership in the rows of a subquery.
    pub fn in_query(self, query: Select) -> Criterion {
        Criterion::InSubquery {
            term: self,
            query: Box::new(query),
            negated: false,
        }
    }

    pub fn not_in_query(self, query: Select) -> Criterion {
        Criterion::InSubquery {
            term: self,
            query: Box::new(query),
            negated: true,
        }
    }

    /// Pattern match. The pattern is passed through unescaped; escaping
    /// wildcard metacharacters is the caller's responsibility.
    pub fn like(self, pattern: impl Into<Term>) -> Criterion {
        Criterion::Like {
            term: self,
            pattern: pattern.into(),
            negated: false,
        }
    }

    pub fn not_like(self, pattern: impl Into<Term>) -> Criterion {
        Criterion::Like {
            term: self,
            pattern: pattern.into(),
            negated: true,
        }
    }

    pub fn is_null(self) -> Criterion {
        Criterion::IsNull {
            term: self,
            negated: false,
        }
    }

    pub fn not_null(self) -> Criterion {
        Criterion::IsNull {
            term: self,
            negated: true,
        }
    }
}

impl From<Value> for Term {
    fn from(v: Value) -> Self {
        Term::Value(v)
    }
}

macro_rules! term_from_value {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Term {
            fn from(v: $ty) -> Self {
                Term::Value(Value::from(v))
            }
        }
    )*};
}

term_from_value!(
    bool,
    i32,
    i64,
    f64,
    Decimal,
    &str,
    String,
    Uuid,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
);

impl From<Select> for Term {
    fn from(q: Select) -> Self {
        Term::Subquery(Box::new(q))
    }
}

impl<R: Into<Term>> std::ops::Add<R> for Term {
    type Output = Term;

    fn add(self, rhs: R) -> Term {
        Term::Arithmetic {
            op: ArithOp::Add,
            left: Box::new(self),
            right: Box::new(rhs.into()),
        }
    }
}

impl<R: Into<Term>> std::ops::Sub<R> for Term {
    type Output = Term;

    fn sub(self, rhs: R) -> Term {
        Term::Arithmetic {
            op: ArithOp::Sub,
            left: Box::new(self),
            right: Box::new(rhs.into()),
        }
    }
}

impl<R: Into<Term>> std::ops::Mul<R> for Term {
    type Output = Term;

    fn mul(self, rhs: R) -> Term {
        Term::Arithmetic {
            op: ArithOp::Mul,
            left: Box::new(self),
            right: Box::new(rhs.into()),
        }
    }
}

impl<R: Into<Term>> std::ops::Div<R> for Term {
    type Output = Term;

    fn div(self, rhs: R) -> Term {
        Term::Arithmetic {
            op: ArithOp::Div,
            left: Box::new(self),
            right: Box::new(rhs.into()),
        }
    }
}

impl std::ops::Neg for Term {
    type Output = Term;

    fn neg(self) -> Term {
        Term::Negated(Box::new(self))
    }
}
