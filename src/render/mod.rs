//! SQL rendering.
//!
//! The AST knows nothing about SQL text; everything textual lives here. Each
//! node renders through [`ToSql::render`], taking the mutable
//! [`RenderContext`] so parameterized rendering can collect bind values as a
//! side effect of the same walk.

pub mod context;
pub mod criterion;
pub mod dialect;
pub mod query;
pub mod term;

#[cfg(test)]
mod tests;

pub use context::{Parameterizer, RenderContext};
pub use dialect::{Dialect, DialectProfile, PaginationStyle, ParamStyle, UpsertStyle};

use crate::ast::Value;
use crate::error::SqlResult;

/// Renders an AST node to SQL text.
pub trait ToSql {
    fn render(&self, ctx: &mut RenderContext) -> SqlResult<String>;

    /// Renders with literal values inlined.
    fn to_sql(&self, dialect: Dialect) -> SqlResult<String> {
        let mut ctx = RenderContext::new(dialect);
        self.render(&mut ctx)
    }

    /// Renders with placeholders in the dialect's default style, returning
    /// the SQL and the bind values in placeholder order.
    fn to_parameterized_sql(&self, dialect: Dialect) -> SqlResult<(String, Vec<Value>)> {
        self.to_parameterized_sql_with(dialect, dialect.profile().param_style)
    }

    /// Renders with placeholders in an explicit style.
    fn to_parameterized_sql_with(
        &self,
        dialect: Dialect,
        style: ParamStyle,
    ) -> SqlResult<(String, Vec<Value>)> {
        let mut ctx = RenderContext::parameterized(dialect, style);
        let sql = self.render(&mut ctx)?;
        Ok((sql, ctx.take_values()))
    }
}
