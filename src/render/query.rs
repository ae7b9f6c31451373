//! Statement rendering for SELECT, INSERT, UPDATE and DELETE.

use crate::ast::{
    ConflictAction, Cte, Delete, IndexHint, Insert, Join, OrderBy, RowLock, Select, TableLike,
    TableRef, Term, Update,
};
use crate::error::{SqlError, SqlResult};

use super::context::RenderContext;
use super::dialect::{PaginationStyle, UpsertStyle};
use super::ToSql;

fn render_table_ref(table: &TableRef, ctx: &mut RenderContext) -> SqlResult<String> {
    let mut sql = match &table.schema {
        Some(schema) => format!("{}.{}", ctx.quote(schema), ctx.quote(&table.name)),
        None => ctx.quote(&table.name),
    };
    if let Some(alias) = &table.alias {
        sql = format!("{sql} AS {}", ctx.quote(alias));
    }
    Ok(sql)
}

fn render_table_like(target: &TableLike, ctx: &mut RenderContext) -> SqlResult<String> {
    match target {
        TableLike::Table(table) => render_table_ref(table, ctx),
        TableLike::Subquery { query, alias } => {
            ctx.depth += 1;
            let inner = query.render(ctx)?;
            ctx.depth -= 1;
            Ok(format!("({inner}) AS {}", ctx.quote(alias)))
        }
    }
}

fn render_terms(terms: &[Term], ctx: &mut RenderContext) -> SqlResult<String> {
    Ok(terms
        .iter()
        .map(|t| t.render(ctx))
        .collect::<SqlResult<Vec<_>>>()?
        .join(","))
}

fn render_joins(joins: &[Join], ctx: &mut RenderContext) -> SqlResult<String> {
    let mut sql = String::new();
    for join in joins {
        sql.push(' ');
        sql.push_str(join.kind.keyword());
        sql.push(' ');
        sql.push_str(&render_table_like(&join.target, ctx)?);
        if let Some(on) = &join.on {
            sql.push_str(" ON ");
            sql.push_str(&on.render(ctx)?);
        }
    }
    Ok(sql)
}

fn render_order_by(order_by: &[OrderBy], ctx: &mut RenderContext) -> SqlResult<String> {
    if order_by.is_empty() {
        return Ok(String::new());
    }
    let parts = order_by
        .iter()
        .map(|ob| {
            let term = ob.term.render(ctx)?;
            Ok(match ob.order {
                Some(order) => format!("{term} {}", order.keyword()),
                None => term,
            })
        })
        .collect::<SqlResult<Vec<_>>>()?;
    Ok(format!(" ORDER BY {}", parts.join(",")))
}

/// Renders the WITH prologue. The `RECURSIVE` keyword is printed only when
/// a recursive CTE is present and the dialect expects the keyword.
fn render_with(ctes: &[Cte], ctx: &mut RenderContext) -> SqlResult<String> {
    if ctes.is_empty() {
        return Ok(String::new());
    }
    if !ctx.profile.supports_with {
        return Err(SqlError::Unsupported {
            dialect: ctx.dialect,
            feature: "WITH",
        });
    }
    let recursive = ctes.iter().any(|cte| cte.recursive);
    if recursive && !ctx.profile.supports_recursive_with {
        return Err(SqlError::Unsupported {
            dialect: ctx.dialect,
            feature: "WITH RECURSIVE",
        });
    }
    let parts = ctes
        .iter()
        .map(|cte| {
            let mut part = ctx.quote(&cte.name);
            if !cte.columns.is_empty() {
                let cols = cte
                    .columns
                    .iter()
                    .map(|c| ctx.quote(c))
                    .collect::<Vec<_>>()
                    .join(",");
                part.push_str(&format!("({cols})"));
            }
            part.push_str(&format!(" AS ({})", cte.query.render(ctx)?));
            Ok(part)
        })
        .collect::<SqlResult<Vec<_>>>()?;
    let keyword = if recursive && ctx.profile.recursive_keyword {
        "WITH RECURSIVE "
    } else {
        "WITH "
    };
    Ok(format!("{keyword}{} ", parts.join(",")))
}

/// Renders LIMIT/OFFSET in whichever shape the dialect takes, including the
/// `ORDER BY (SELECT 0)` MSSQL needs before a bare OFFSET clause.
fn render_pagination(
    limit: Option<&Term>,
    offset: Option<&Term>,
    has_order_by: bool,
    ctx: &mut RenderContext,
) -> SqlResult<String> {
    if limit.is_none() && offset.is_none() {
        return Ok(String::new());
    }
    let mut sql = String::new();
    match ctx.profile.pagination {
        PaginationStyle::LimitOffset => {
            if let Some(limit) = limit {
                sql.push_str(&format!(" LIMIT {}", limit.render(ctx)?));
            }
            if let Some(offset) = offset {
                sql.push_str(&format!(" OFFSET {}", offset.render(ctx)?));
            }
        }
        PaginationStyle::OffsetFetch => {
            if !has_order_by {
                sql.push_str(" ORDER BY (SELECT 0)");
            }
            let offset = match offset {
                Some(offset) => offset.render(ctx)?,
                None => "0".to_string(),
            };
            sql.push_str(&format!(" OFFSET {offset} ROWS"));
            if let Some(limit) = limit {
                sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", limit.render(ctx)?));
            }
        }
        PaginationStyle::FetchRows => {
            if let Some(offset) = offset {
                sql.push_str(&format!(" OFFSET {} ROWS", offset.render(ctx)?));
            }
            if let Some(limit) = limit {
                sql.push_str(&format!(" FETCH NEXT {} ROWS ONLY", limit.render(ctx)?));
            }
        }
    }
    Ok(sql)
}

fn render_index_hints(hints: &[IndexHint], ctx: &mut RenderContext) -> SqlResult<String> {
    if hints.is_empty() {
        return Ok(String::new());
    }
    if !ctx.profile.supports_index_hints {
        return Err(SqlError::Unsupported {
            dialect: ctx.dialect,
            feature: "index hints",
        });
    }
    let mut sql = String::new();
    for hint in hints {
        let (keyword, names) = match hint {
            IndexHint::Use(names) => ("USE INDEX", names),
            IndexHint::Force(names) => ("FORCE INDEX", names),
        };
        let names = names.iter().map(|n| ctx.quote(n)).collect::<Vec<_>>().join(",");
        sql.push_str(&format!(" {keyword} ({names})"));
    }
    Ok(sql)
}

fn render_lock(lock: Option<&RowLock>, ctx: &mut RenderContext) -> SqlResult<String> {
    let Some(lock) = lock else {
        return Ok(String::new());
    };
    if !ctx.profile.supports_row_locking {
        return Err(SqlError::Unsupported {
            dialect: ctx.dialect,
            feature: "FOR UPDATE",
        });
    }
    let mut sql = " FOR UPDATE".to_string();
    if lock.nowait {
        sql.push_str(" NOWAIT");
    } else if lock.skip_locked {
        sql.push_str(" SKIP LOCKED");
    }
    Ok(sql)
}

fn render_returning(returning: &[Term], ctx: &mut RenderContext) -> SqlResult<String> {
    if returning.is_empty() {
        return Ok(String::new());
    }
    if !ctx.profile.supports_returning {
        return Err(SqlError::Unsupported {
            dialect: ctx.dialect,
            feature: "RETURNING",
        });
    }
    Ok(format!(" RETURNING {}", render_terms(returning, ctx)?))
}

impl ToSql for Select {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        let mut sql = render_with(&self.ctes, ctx)?;
        sql.push_str("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&render_terms(&self.columns, ctx)?);
        }
        if let Some(from) = &self.from {
            sql.push_str(" FROM ");
            sql.push_str(&render_table_like(from, ctx)?);
        }
        sql.push_str(&render_index_hints(&self.index_hints, ctx)?);
        sql.push_str(&render_joins(&self.joins, ctx)?);
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.render(ctx)?);
        }
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&render_terms(&self.group_by, ctx)?);
        }
        if let Some(having) = &self.having {
            sql.push_str(" HAVING ");
            sql.push_str(&having.render(ctx)?);
        }
        // Set operations combine whole SELECTs; ORDER BY, pagination and
        // locking apply to the combined statement and must follow the last
        // operand.
        for (op, other) in &self.set_ops {
            sql.push_str(&format!(" {} {}", op.keyword(), other.render(ctx)?));
        }
        sql.push_str(&render_order_by(&self.order_by, ctx)?);
        sql.push_str(&render_pagination(
            self.limit.as_ref(),
            self.offset.as_ref(),
            !self.order_by.is_empty(),
            ctx,
        )?);
        sql.push_str(&render_lock(self.lock.as_ref(), ctx)?);
        Ok(sql)
    }
}

/// Checks every VALUES row against the declared column count, or against the
/// first row when no columns are declared.
fn check_row_widths(insert: &Insert) -> SqlResult<()> {
    let expected = if insert.columns.is_empty() {
        match insert.rows.first() {
            Some(row) => row.len(),
            None => return Ok(()),
        }
    } else {
        insert.columns.len()
    };
    for (row, terms) in insert.rows.iter().enumerate() {
        if terms.len() != expected {
            return Err(SqlError::RowWidthMismatch {
                row,
                expected,
                got: terms.len(),
            });
        }
    }
    Ok(())
}

fn render_on_conflict(insert: &Insert, ctx: &mut RenderContext) -> SqlResult<String> {
    let Some(conflict) = &insert.on_conflict else {
        return Ok(String::new());
    };
    match ctx.profile.upsert {
        UpsertStyle::OnConflict => {
            let target = if conflict.columns.is_empty() {
                String::new()
            } else {
                let cols = conflict
                    .columns
                    .iter()
                    .map(|c| ctx.quote(c))
                    .collect::<Vec<_>>()
                    .join(",");
                format!(" ({cols})")
            };
            match &conflict.action {
                ConflictAction::DoNothing => Ok(format!(" ON CONFLICT{target} DO NOTHING")),
                ConflictAction::DoUpdate { assignments } => {
                    if conflict.columns.is_empty() {
                        return Err(SqlError::MissingConflictTarget {
                            dialect: ctx.dialect,
                        });
                    }
                    let sets = assignments
                        .iter()
                        .map(|(col, term)| Ok(format!("{}={}", ctx.quote(col), term.render(ctx)?)))
                        .collect::<SqlResult<Vec<_>>>()?
                        .join(",");
                    Ok(format!(" ON CONFLICT{target} DO UPDATE SET {sets}"))
                }
            }
        }
        UpsertStyle::OnDuplicateKey => match &conflict.action {
            // DO NOTHING already rendered as INSERT IGNORE.
            ConflictAction::DoNothing => Ok(String::new()),
            ConflictAction::DoUpdate { assignments } => {
                let sets = assignments
                    .iter()
                    .map(|(col, term)| Ok(format!("{}={}", ctx.quote(col), term.render(ctx)?)))
                    .collect::<SqlResult<Vec<_>>>()?
                    .join(",");
                Ok(format!(" ON DUPLICATE KEY UPDATE {sets}"))
            }
        },
        UpsertStyle::Unsupported => Err(SqlError::Unsupported {
            dialect: ctx.dialect,
            feature: "ON CONFLICT",
        }),
    }
}

impl ToSql for Insert {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        if self.rows.is_empty() && self.source.is_none() {
            return Err(SqlError::Incomplete("INSERT has no rows and no source query"));
        }
        check_row_widths(self)?;

        let mut sql = render_with(&self.ctes, ctx)?;
        let ignore = ctx.profile.upsert == UpsertStyle::OnDuplicateKey
            && matches!(
                self.on_conflict.as_ref().map(|c| &c.action),
                Some(ConflictAction::DoNothing)
            );
        sql.push_str(if ignore { "INSERT IGNORE INTO " } else { "INSERT INTO " });
        sql.push_str(&render_table_ref(&self.table, ctx)?);
        if !self.columns.is_empty() {
            let cols = self
                .columns
                .iter()
                .map(|c| ctx.quote(c))
                .collect::<Vec<_>>()
                .join(",");
            sql.push_str(&format!(" ({cols})"));
        }
        if let Some(source) = &self.source {
            sql.push(' ');
            sql.push_str(&source.render(ctx)?);
        } else {
            let rows = self
                .rows
                .iter()
                .map(|row| Ok(format!("({})", render_terms(row, ctx)?)))
                .collect::<SqlResult<Vec<_>>>()?
                .join(",");
            sql.push_str(&format!(" VALUES {rows}"));
        }
        sql.push_str(&render_on_conflict(self, ctx)?);
        sql.push_str(&render_returning(&self.returning, ctx)?);
        Ok(sql)
    }
}

impl ToSql for Update {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        if self.sets.is_empty() {
            return Err(SqlError::Incomplete("UPDATE has no SET assignments"));
        }
        if !self.joins.is_empty() && !ctx.profile.supports_join_in_update {
            return Err(SqlError::Unsupported {
                dialect: ctx.dialect,
                feature: "JOIN in UPDATE",
            });
        }
        if (!self.order_by.is_empty() || self.limit.is_some())
            && !ctx.profile.supports_ordered_update
        {
            return Err(SqlError::Unsupported {
                dialect: ctx.dialect,
                feature: "ORDER BY/LIMIT in UPDATE",
            });
        }

        let mut sql = render_with(&self.ctes, ctx)?;
        sql.push_str("UPDATE ");
        sql.push_str(&render_table_ref(&self.table, ctx)?);
        sql.push_str(&render_joins(&self.joins, ctx)?);
        let sets = self
            .sets
            .iter()
            .map(|(col, term)| Ok(format!("{}={}", ctx.quote(col), term.render(ctx)?)))
            .collect::<SqlResult<Vec<_>>>()?
            .join(",");
        sql.push_str(&format!(" SET {sets}"));
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.render(ctx)?);
        }
        sql.push_str(&render_order_by(&self.order_by, ctx)?);
        if let Some(limit) = &self.limit {
            sql.push_str(&format!(" LIMIT {}", limit.render(ctx)?));
        }
        sql.push_str(&render_returning(&self.returning, ctx)?);
        Ok(sql)
    }
}

impl ToSql for Delete {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        if (!self.order_by.is_empty() || self.limit.is_some())
            && !ctx.profile.supports_ordered_update
        {
            return Err(SqlError::Unsupported {
                dialect: ctx.dialect,
                feature: "ORDER BY/LIMIT in DELETE",
            });
        }

        let mut sql = render_with(&self.ctes, ctx)?;
        sql.push_str("DELETE FROM ");
        sql.push_str(&render_table_ref(&self.table, ctx)?);
        if let Some(filter) = &self.filter {
            sql.push_str(" WHERE ");
            sql.push_str(&filter.render(ctx)?);
        }
        sql.push_str(&render_order_by(&self.order_by, ctx)?);
        if let Some(limit) = &self.limit {
            sql.push_str(&format!(" LIMIT {}", limit.render(ctx)?));
        }
        sql.push_str(&render_returning(&self.returning, ctx)?);
        Ok(sql)
    }
}
