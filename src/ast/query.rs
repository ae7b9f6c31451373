use serde::{Deserialize, Serialize};

use crate::ast::criterion::Criterion;
use crate::ast::table::{Cte, IndexHint, Join, JoinKind, Order, OrderBy, RowLock, SetOp, TableLike, TableRef};
use crate::ast::term::Term;

fn push_filter(slot: &mut Option<Criterion>, criterion: Criterion) {
    *slot = Some(match slot.take() {
        Some(existing) => existing.and(criterion),
        None => criterion,
    });
}

/// A SELECT query under construction.
///
/// Every fluent call is always legal; rendering never mutates the builder,
/// so a finished query can be rendered repeatedly (and concurrently) with
/// identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Select {
    pub from: Option<TableLike>,
    pub columns: Vec<Term>,
    pub distinct: bool,
    pub joins: Vec<Join>,
    pub filter: Option<Criterion>,
    pub group_by: Vec<Term>,
    pub having: Option<Criterion>,
    pub order_by: Vec<OrderBy>,
    /// LIMIT operand; a term so it can be parameterized.
    pub limit: Option<Term>,
    /// OFFSET operand; a term so it can be parameterized.
    pub offset: Option<Term>,
    pub ctes: Vec<Cte>,
    pub set_ops: Vec<(SetOp, Box<Select>)>,
    /// Index hints after FROM, dialect-gated.
    pub index_hints: Vec<IndexHint>,
    /// Row-locking clause, dialect-gated.
    pub lock: Option<RowLock>,
}

impl Select {
    /// Start a SELECT with no FROM clause (`SELECT 1`, `SELECT NOW()`).
    pub fn new() -> Self {
        Self {
            from: None,
            columns: vec![],
            distinct: false,
            joins: vec![],
            filter: None,
            group_by: vec![],
            having: None,
            order_by: vec![],
            limit: None,
            offset: None,
            ctes: vec![],
            set_ops: vec![],
            index_hints: vec![],
            lock: None,
        }
    }

    /// Start a SELECT from the given table.
    pub fn from(table: impl Into<TableLike>) -> Self {
        Self {
            from: Some(table.into()),
            columns: vec![],
            distinct: false,
            joins: vec![],
            filter: None,
            group_by: vec![],
            having: None,
            order_by: vec![],
            limit: None,
            offset: None,
            ctes: vec![],
            set_ops: vec![],
            index_hints: vec![],
            lock: None,
        }
    }

    /// Start a SELECT from an aliased subquery.
    pub fn from_query(query: Select, alias: impl Into<String>) -> Self {
        Self::from(TableLike::Subquery {
            query: Box::new(query),
            alias: alias.into(),
        })
    }

    /// Add a single select column. With no columns, `*` is rendered.
    pub fn column(mut self, col: impl Into<Term>) -> Self {
        self.columns.push(col.into());
        self
    }

    /// Add several select columns at once.
    pub fn columns<T: Into<Term>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// AND a criterion into the WHERE clause.
    pub fn filter(mut self, criterion: Criterion) -> Self {
        push_filter(&mut self.filter, criterion);
        self
    }

    pub fn join(mut self, kind: JoinKind, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.joins.push(Join {
            kind,
            target: target.into(),
            on: Some(on),
        });
        self
    }

    pub fn inner_join(self, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.join(JoinKind::Inner, target, on)
    }

    pub fn left_join(self, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.join(JoinKind::Left, target, on)
    }

    pub fn right_join(self, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.join(JoinKind::Right, target, on)
    }

    pub fn full_join(self, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.join(JoinKind::Full, target, on)
    }

    pub fn cross_join(mut self, target: impl Into<TableLike>) -> Self {
        self.joins.push(Join {
            kind: JoinKind::Cross,
            target: target.into(),
            on: None,
        });
        self
    }

    pub fn group_by<T: Into<Term>>(mut self, terms: impl IntoIterator<Item = T>) -> Self {
        self.group_by.extend(terms.into_iter().map(Into::into));
        self
    }

    /// AND a criterion into the HAVING clause.
    pub fn having(mut self, criterion: Criterion) -> Self {
        push_filter(&mut self.having, criterion);
        self
    }

    pub fn order_by(mut self, term: impl Into<Term>, order: Order) -> Self {
        self.order_by.push(OrderBy {
            term: term.into(),
            order: Some(order),
        });
        self
    }

    /// ORDER BY without an explicit direction.
    pub fn order_by_default(mut self, term: impl Into<Term>) -> Self {
        self.order_by.push(OrderBy {
            term: term.into(),
            order: None,
        });
        self
    }

    pub fn limit(mut self, limit: impl Into<Term>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<Term>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    /// Prepend a common table expression.
    pub fn with(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }

    pub fn union(mut self, other: Select) -> Self {
        self.set_ops.push((SetOp::Union, Box::new(other)));
        self
    }

    pub fn union_all(mut self, other: Select) -> Self {
        self.set_ops.push((SetOp::UnionAll, Box::new(other)));
        self
    }

    pub fn intersect(mut self, other: Select) -> Self {
        self.set_ops.push((SetOp::Intersect, Box::new(other)));
        self
    }

    pub fn except(mut self, other: Select) -> Self {
        self.set_ops.push((SetOp::Except, Box::new(other)));
        self
    }

    /// Hint the planner to prefer the named indexes (MySQL `USE INDEX`).
    pub fn use_index<I, S>(mut self, indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_hints
            .push(IndexHint::Use(indexes.into_iter().map(Into::into).collect()));
        self
    }

    /// Force the named indexes (MySQL `FORCE INDEX`).
    pub fn force_index<I, S>(mut self, indexes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.index_hints
            .push(IndexHint::Force(indexes.into_iter().map(Into::into).collect()));
        self
    }

    /// Lock selected rows with `FOR UPDATE`.
    pub fn for_update(mut self) -> Self {
        self.lock = Some(RowLock::default());
        self
    }

    /// `FOR UPDATE NOWAIT`: fail instead of waiting on locked rows.
    pub fn for_update_nowait(mut self) -> Self {
        self.lock = Some(RowLock {
            nowait: true,
            skip_locked: false,
        });
        self
    }

    /// `FOR UPDATE SKIP LOCKED`: skip rows another transaction holds.
    pub fn for_update_skip_locked(mut self) -> Self {
        self.lock = Some(RowLock {
            nowait: false,
            skip_locked: true,
        });
        self
    }
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

/// ON CONFLICT resolution behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConflictAction {
    /// DO NOTHING: the conflicting row is skipped.
    DoNothing,
    /// DO UPDATE SET: assignments applied to the existing row. Assignment
    /// values may reference the proposed row via [`Term::Excluded`].
    DoUpdate { assignments: Vec<(String, Term)> },
}

/// An upsert clause: conflict target columns and the resolution action.
/// An empty target list means the database-default constraint decides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnConflict {
    pub columns: Vec<String>,
    pub action: ConflictAction,
}

/// An INSERT query under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insert {
    pub table: TableRef,
    pub columns: Vec<String>,
    /// Literal rows for the VALUES clause. Each `values` call adds one row.
    pub rows: Vec<Vec<Term>>,
    /// Source query for INSERT ... SELECT; mutually exclusive with `rows`.
    pub source: Option<Box<Select>>,
    pub on_conflict: Option<OnConflict>,
    pub returning: Vec<Term>,
    pub ctes: Vec<Cte>,
}

impl Insert {
    pub fn into(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            columns: vec![],
            rows: vec![],
            source: None,
            on_conflict: None,
            returning: vec![],
            ctes: vec![],
        }
    }

    pub fn columns<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(cols.into_iter().map(Into::into));
        self
    }

    /// Append one VALUES row.
    pub fn values<T: Into<Term>>(mut self, row: impl IntoIterator<Item = T>) -> Self {
        self.rows.push(row.into_iter().map(Into::into).collect());
        self
    }

    /// Insert the rows produced by a SELECT instead of literal VALUES.
    pub fn from_select(mut self, query: Select) -> Self {
        self.source = Some(Box::new(query));
        self
    }

    /// Declare the conflict target columns. Defaults the action to
    /// DO NOTHING until [`do_update`](Insert::do_update) is called.
    pub fn on_conflict<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.on_conflict = Some(OnConflict {
            columns: cols.into_iter().map(Into::into).collect(),
            action: ConflictAction::DoNothing,
        });
        self
    }

    pub fn do_nothing(mut self) -> Self {
        let columns = self.on_conflict.take().map(|c| c.columns).unwrap_or_default();
        self.on_conflict = Some(OnConflict {
            columns,
            action: ConflictAction::DoNothing,
        });
        self
    }

    pub fn do_update<I, S, T>(mut self, assignments: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<Term>,
    {
        let columns = self.on_conflict.take().map(|c| c.columns).unwrap_or_default();
        self.on_conflict = Some(OnConflict {
            columns,
            action: ConflictAction::DoUpdate {
                assignments: assignments
                    .into_iter()
                    .map(|(c, t)| (c.into(), t.into()))
                    .collect(),
            },
        });
        self
    }

    pub fn returning<T: Into<Term>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.returning.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn returning_all(mut self) -> Self {
        self.returning = vec![Term::Star];
        self
    }

    pub fn with(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }
}

/// An UPDATE query under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub table: TableRef,
    pub joins: Vec<Join>,
    pub sets: Vec<(String, Term)>,
    pub filter: Option<Criterion>,
    /// Dialect-gated: only dialects with ordered-update support render these.
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Term>,
    pub returning: Vec<Term>,
    pub ctes: Vec<Cte>,
}

impl Update {
    pub fn table(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            joins: vec![],
            sets: vec![],
            filter: None,
            order_by: vec![],
            limit: None,
            returning: vec![],
            ctes: vec![],
        }
    }

    pub fn set(mut self, column: impl Into<String>, value: impl Into<Term>) -> Self {
        self.sets.push((column.into(), value.into()));
        self
    }

    pub fn filter(mut self, criterion: Criterion) -> Self {
        push_filter(&mut self.filter, criterion);
        self
    }

    /// Join another table into the update (MySQL-style `UPDATE ... JOIN`).
    pub fn join(mut self, kind: JoinKind, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.joins.push(Join {
            kind,
            target: target.into(),
            on: Some(on),
        });
        self
    }

    pub fn inner_join(self, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.join(JoinKind::Inner, target, on)
    }

    pub fn left_join(self, target: impl Into<TableLike>, on: Criterion) -> Self {
        self.join(JoinKind::Left, target, on)
    }

    pub fn order_by(mut self, term: impl Into<Term>, order: Order) -> Self {
        self.order_by.push(OrderBy {
            term: term.into(),
            order: Some(order),
        });
        self
    }

    pub fn limit(mut self, limit: impl Into<Term>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn returning<T: Into<Term>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.returning.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn returning_all(mut self) -> Self {
        self.returning = vec![Term::Star];
        self
    }

    pub fn with(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }
}

/// A DELETE query under construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub table: TableRef,
    pub filter: Option<Criterion>,
    /// Dialect-gated, as for [`Update`].
    pub order_by: Vec<OrderBy>,
    pub limit: Option<Term>,
    pub returning: Vec<Term>,
    pub ctes: Vec<Cte>,
}

impl Delete {
    pub fn from(table: impl Into<TableRef>) -> Self {
        Self {
            table: table.into(),
            filter: None,
            order_by: vec![],
            limit: None,
            returning: vec![],
            ctes: vec![],
        }
    }

    pub fn filter(mut self, criterion: Criterion) -> Self {
        push_filter(&mut self.filter, criterion);
        self
    }

    pub fn order_by(mut self, term: impl Into<Term>, order: Order) -> Self {
        self.order_by.push(OrderBy {
            term: term.into(),
            order: Some(order),
        });
        self
    }

    pub fn limit(mut self, limit: impl Into<Term>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn returning<T: Into<Term>>(mut self, cols: impl IntoIterator<Item = T>) -> Self {
        self.returning.extend(cols.into_iter().map(Into::into));
        self
    }

    pub fn returning_all(mut self) -> Self {
        self.returning = vec![Term::Star];
        self
    }

    pub fn with(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }
}
