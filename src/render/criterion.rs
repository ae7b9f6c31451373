//! Criterion rendering.

use crate::ast::Criterion;
use crate::error::SqlResult;

use super::context::RenderContext;
use super::ToSql;

#[derive(PartialEq, Clone, Copy)]
enum Connective {
    And,
    Or,
}

/// A child conjunction is bracketed only when its connective differs from
/// the parent's, so `a AND b AND c` stays flat while `a OR (b AND c)` keeps
/// its grouping.
fn render_side(side: &Criterion, parent: Connective, ctx: &mut RenderContext) -> SqlResult<String> {
    let child = match side {
        Criterion::And(..) => Some(Connective::And),
        Criterion::Or(..) => Some(Connective::Or),
        _ => None,
    };
    let sql = side.render(ctx)?;
    match child {
        Some(c) if c != parent => Ok(format!("({sql})")),
        _ => Ok(sql),
    }
}

impl ToSql for Criterion {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        match self {
            Criterion::Comparison { op, left, right } => Ok(format!(
                "{}{}{}",
                left.render(ctx)?,
                op.symbol(),
                right.render(ctx)?
            )),
            Criterion::Between { term, low, high } => Ok(format!(
                "{} BETWEEN {} AND {}",
                term.render(ctx)?,
                low.render(ctx)?,
                high.render(ctx)?
            )),
            Criterion::In {
                term,
                items,
                negated,
            } => {
                // `IN ()` is invalid SQL, so an empty list degenerates to a
                // constant predicate.
                if items.is_empty() {
                    return Ok(if *negated { "1=1" } else { "1=0" }.to_string());
                }
                // The term renders before the list so collected parameter
                // values keep left-to-right order.
                let lhs = term.render(ctx)?;
                let rendered = items
                    .iter()
                    .map(|t| t.render(ctx))
                    .collect::<SqlResult<Vec<_>>>()?
                    .join(",");
                let keyword = if *negated { " NOT IN " } else { " IN " };
                Ok(format!("{lhs}{keyword}({rendered})"))
            }
            Criterion::InSubquery {
                term,
                query,
                negated,
            } => {
                let keyword = if *negated { " NOT IN " } else { " IN " };
                let lhs = term.render(ctx)?;
                ctx.depth += 1;
                let inner = query.render(ctx)?;
                ctx.depth -= 1;
                Ok(format!("{lhs}{keyword}({inner})"))
            }
            Criterion::Like {
                term,
                pattern,
                negated,
            } => {
                let keyword = if *negated { " NOT LIKE " } else { " LIKE " };
                Ok(format!(
                    "{}{keyword}{}",
                    term.render(ctx)?,
                    pattern.render(ctx)?
                ))
            }
            Criterion::IsNull { term, negated } => {
                let keyword = if *negated { " IS NOT NULL" } else { " IS NULL" };
                Ok(format!("{}{keyword}", term.render(ctx)?))
            }
            Criterion::Not(inner) => Ok(format!("NOT ({})", inner.render(ctx)?)),
            Criterion::And(left, right) => Ok(format!(
                "{} AND {}",
                render_side(left, Connective::And, ctx)?,
                render_side(right, Connective::And, ctx)?
            )),
            Criterion::Or(left, right) => Ok(format!(
                "{} OR {}",
                render_side(left, Connective::Or, ctx)?,
                render_side(right, Connective::Or, ctx)?
            )),
        }
    }
}
