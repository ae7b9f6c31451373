//! Term and literal rendering.

use crate::ast::{ArithOp, Placeholder, Term, Value};
use crate::error::{SqlError, SqlResult};

use super::context::RenderContext;
use super::dialect::{ParamStyle, UpsertStyle};
use super::ToSql;

/// Escapes a string literal body: single quotes are doubled, and on dialects
/// that treat backslash as an escape character backslashes are doubled too.
fn escape_str(ctx: &RenderContext, s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("''"),
            '\\' if ctx.profile.escape_backslash => out.push_str("\\\\"),
            _ => out.push(ch),
        }
    }
    out
}

/// Renders a literal inline, with no parameterization.
pub fn render_literal(value: &Value, ctx: &mut RenderContext) -> SqlResult<String> {
    Ok(match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => ctx.profile.bool_true.to_string(),
        Value::Bool(false) => ctx.profile.bool_false.to_string(),
        Value::Int(n) => n.to_string(),
        Value::Float(n) => {
            if !n.is_finite() {
                return Err(SqlError::NonFiniteFloat);
            }
            // Whole floats keep their fractional point so the literal stays
            // a float (`1.0`, not `1`).
            if n.trunc() == *n {
                format!("{n:.1}")
            } else {
                n.to_string()
            }
        }
        Value::Decimal(d) => d.to_string(),
        Value::Str(s) => format!("'{}'", escape_str(ctx, s)),
        Value::Uuid(u) => format!("'{u}'"),
        Value::Date(d) => format!("'{d}'"),
        Value::Time(t) => format!("'{t}'"),
        Value::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%dT%H:%M:%S%.f")),
        Value::Json(j) => format!("'{}'", escape_str(ctx, &j.to_string())),
        Value::Array(items) => {
            let inner = items
                .iter()
                .map(|v| render_literal(v, ctx))
                .collect::<SqlResult<Vec<_>>>()?
                .join(",");
            if ctx.profile.array_keyword {
                format!("ARRAY[{inner}]")
            } else {
                format!("[{inner}]")
            }
        }
    })
}

/// Renders a value: collected as a bind parameter when the context carries a
/// parameterizer, inlined otherwise. NULL always stays inline since a bound
/// NULL defeats `IS NULL` comparisons and index planning.
pub fn render_value(value: &Value, ctx: &mut RenderContext) -> SqlResult<String> {
    if matches!(value, Value::Null) {
        return render_literal(value, ctx);
    }
    match ctx.params.as_mut() {
        Some(params) => Ok(params.push(value.clone())),
        None => render_literal(value, ctx),
    }
}

fn render_arithmetic(
    op: ArithOp,
    left: &Term,
    right: &Term,
    ctx: &mut RenderContext,
) -> SqlResult<String> {
    // Parentheses only where precedence or left-associativity demands them.
    let left_parens = match left {
        Term::Arithmetic { op: lop, .. } => !op.is_additive() && lop.is_additive(),
        _ => false,
    };
    let right_parens = match right {
        Term::Arithmetic { op: rop, .. } => {
            (op == ArithOp::Sub && rop.is_additive())
                || (!op.is_additive() && rop.is_additive())
                || (op == ArithOp::Div && !rop.is_additive())
        }
        _ => false,
    };

    let mut lhs = left.render(ctx)?;
    if left_parens {
        lhs = format!("({lhs})");
    }
    let mut rhs = right.render(ctx)?;
    if right_parens {
        rhs = format!("({rhs})");
    }
    Ok(format!("{lhs}{}{rhs}", op.symbol()))
}

fn render_placeholder(ph: &Placeholder, ctx: &RenderContext) -> String {
    match ph {
        Placeholder::Index(n) => match ctx
            .params
            .as_ref()
            .map(|p| p.style())
            .unwrap_or(ctx.profile.param_style)
        {
            ParamStyle::Positional => "?".to_string(),
            ParamStyle::Numbered => format!("${n}"),
            ParamStyle::Named => format!(":p{n}"),
        },
        Placeholder::Text(text) => text.clone(),
    }
}

impl ToSql for Term {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String> {
        match self {
            Term::Star => Ok("*".to_string()),
            Term::Field { name, table } => {
                let column = if name == "*" {
                    "*".to_string()
                } else {
                    ctx.quote(name)
                };
                Ok(match table {
                    Some(t) => format!("{}.{column}", ctx.quote(t)),
                    None => column,
                })
            }
            Term::Value(v) => render_value(v, ctx),
            Term::Function { name, args } => {
                let rendered = args
                    .iter()
                    .map(|a| a.render(ctx))
                    .collect::<SqlResult<Vec<_>>>()?
                    .join(",");
                Ok(format!("{name}({rendered})"))
            }
            Term::Arithmetic { op, left, right } => render_arithmetic(*op, left, right, ctx),
            Term::Negated(inner) => {
                let body = inner.render(ctx)?;
                Ok(match inner.as_ref() {
                    Term::Arithmetic { .. } => format!("-({body})"),
                    _ => format!("-{body}"),
                })
            }
            Term::Subquery(query) => {
                ctx.depth += 1;
                let inner = query.render(ctx)?;
                ctx.depth -= 1;
                Ok(format!("({inner})"))
            }
            Term::Parameter(ph) => Ok(render_placeholder(ph, ctx)),
            Term::Excluded(column) => match ctx.profile.upsert {
                UpsertStyle::OnConflict => Ok(format!("EXCLUDED.{}", ctx.quote(column))),
                UpsertStyle::OnDuplicateKey => Ok(format!("VALUES({})", ctx.quote(column))),
                UpsertStyle::Unsupported => Err(SqlError::Unsupported {
                    dialect: ctx.dialect,
                    feature: "upsert assignments",
                }),
            },
            Term::Aliased { term, alias } => {
                Ok(format!("{} AS {}", term.render(ctx)?, ctx.quote(alias)))
            }
        }
    }
}
