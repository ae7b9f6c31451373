//! Dialect-aware SQL query builder.
//!
//! Build queries as a typed AST, not strings, then render them against a
//! concrete SQL dialect, either as plain text or as a parameterized
//! statement with an ordered value list.
//!
//! ```
//! use sqlmason::prelude::*;
//!
//! let query = Select::from("users")
//!     .filter(col("age").gte(18));
//! assert_eq!(
//!     query.to_sql(Dialect::Generic).unwrap(),
//!     r#"SELECT * FROM "users" WHERE "age">=18"#
//! );
//! ```

pub mod ast;
pub mod error;
pub mod render;

pub use ast::{Delete, Insert, Select, Update};
pub use error::{SqlError, SqlResult};
pub use render::{Dialect, ParamStyle, RenderContext, ToSql};

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::error::*;
    pub use crate::render::{Dialect, ParamStyle, RenderContext, ToSql};
}
