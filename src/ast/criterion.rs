use serde::{Deserialize, Serialize};

use crate::ast::query::Select;
use crate::ast::term::Term;

/// Comparison operators, mapping 1:1 to their SQL symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparator {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    Ne,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Gte,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Lte,
}

impl Comparator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::Eq => "=",
            Comparator::Ne => "<>",
            Comparator::Gt => ">",
            Comparator::Gte => ">=",
            Comparator::Lt => "<",
            Comparator::Lte => "<=",
        }
    }
}

/// A boolean-valued predicate node.
///
/// Criteria compose with [`and`](Criterion::and), [`or`](Criterion::or) and
/// [`negate`](Criterion::negate) (or the `&`, `|` and `!` operators). The
/// renderer parenthesizes exactly where the boolean-algebra tree requires
/// it: an `Or` nested inside an `And` (and vice versa) gets parentheses,
/// same-kind chains stay flat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Criterion {
    /// left op right
    Comparison {
        op: Comparator,
        left: Term,
        right: Term,
    },
    /// term BETWEEN low AND high
    Between { term: Term, low: Term, high: Term },
    /// term [NOT] IN (items)
    In {
        term: Term,
        items: Vec<Term>,
        negated: bool,
    },
    /// term [NOT] IN (subquery)
    InSubquery {
        term: Term,
        query: Box<Select>,
        negated: bool,
    },
    /// term [NOT] LIKE pattern
    Like {
        term: Term,
        pattern: Term,
        negated: bool,
    },
    /// term IS [NOT] NULL
    IsNull { term: Term, negated: bool },
    /// NOT inner
    Not(Box<Criterion>),
    /// left AND right
    And(Box<Criterion>, Box<Criterion>),
    /// left OR right
    Or(Box<Criterion>, Box<Criterion>),
}

impl Criterion {
    pub fn and(self, other: Criterion) -> Criterion {
        Criterion::And(Box::new(self), Box::new(other))
    }

    pub fn or(self, other: Criterion) -> Criterion {
        Criterion::Or(Box::new(self), Box::new(other))
    }

    pub fn negate(self) -> Criterion {
        Criterion::Not(Box::new(self))
    }

    /// Fold an iterator of criteria into a single AND chain. Returns `None`
    /// for an empty iterator.
    pub fn all(criteria: impl IntoIterator<Item = Criterion>) -> Option<Criterion> {
        criteria.into_iter().reduce(Criterion::and)
    }

    /// Fold an iterator of criteria into a single OR chain. Returns `None`
    /// for an empty iterator.
    pub fn any(criteria: impl IntoIterator<Item = Criterion>) -> Option<Criterion> {
        criteria.into_iter().reduce(Criterion::or)
    }
}

impl std::ops::BitAnd for Criterion {
    type Output = Criterion;

    fn bitand(self, rhs: Criterion) -> Criterion {
        self.and(rhs)
    }
}

impl std::ops::BitOr for Criterion {
    type Output = Criterion;

    fn bitor(self, rhs: Criterion) -> Criterion {
        self.or(rhs)
    }
}

impl std::ops::Not for Criterion {
    type Output = Criterion;

    fn not(self) -> Criterion {
        self.negate()
    }
}
