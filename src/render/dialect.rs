//! Dialect identity and capability descriptors.
//!
//! A dialect is data, not behavior: every renderer takes the active
//! [`DialectProfile`] through the rendering context and branches on its
//! fields. Adding a dialect means adding one profile constant, not touching
//! the renderers.

use serde::{Deserialize, Serialize};

/// Placeholder style for parameterized rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamStyle {
    /// Sequential `?`
    Positional,
    /// Numbered `$1`, `$2`, ...
    Numbered,
    /// Named `:p1`, `:p2`, ...
    Named,
}

/// How LIMIT/OFFSET are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaginationStyle {
    /// `LIMIT n OFFSET m`
    LimitOffset,
    /// `OFFSET n ROWS FETCH NEXT m ROWS ONLY`, offset mandatory (default 0)
    /// and a stable no-op `ORDER BY (SELECT 0)` synthesized when the query
    /// has no ordering, since the clause is invalid without one.
    OffsetFetch,
    /// `OFFSET n ROWS` / `FETCH NEXT m ROWS ONLY`, each emitted only when
    /// present (Oracle 12c+).
    FetchRows,
}

/// How upserts are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpsertStyle {
    /// `ON CONFLICT (..) DO NOTHING | DO UPDATE SET ..`, proposed row
    /// addressed as `EXCLUDED.col`.
    OnConflict,
    /// `ON DUPLICATE KEY UPDATE ..`, proposed row addressed as
    /// `VALUES(col)`; DO NOTHING becomes `INSERT IGNORE`.
    OnDuplicateKey,
    /// No native upsert; usage is a render error.
    Unsupported,
}

/// Per-dialect rendering rules and feature support, consulted by the shared
/// renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectProfile {
    /// Identifier quote character; embedded occurrences are doubled.
    pub quote_char: char,
    pub bool_true: &'static str,
    pub bool_false: &'static str,
    /// Escape backslashes in string literals (MySQL).
    pub escape_backslash: bool,
    /// Default placeholder style for parameterized rendering.
    pub param_style: ParamStyle,
    pub pagination: PaginationStyle,
    pub upsert: UpsertStyle,
    /// Prefix for array literals (`ARRAY[..]` on Postgres, bare `[..]`
    /// elsewhere).
    pub array_keyword: bool,
    pub supports_returning: bool,
    pub supports_with: bool,
    pub supports_recursive_with: bool,
    /// Whether the `RECURSIVE` keyword is printed for recursive CTEs
    /// (MSSQL and Oracle accept recursive CTEs without it).
    pub recursive_keyword: bool,
    /// `UPDATE ... JOIN` support.
    pub supports_join_in_update: bool,
    /// `ORDER BY`/`LIMIT` on UPDATE and DELETE.
    pub supports_ordered_update: bool,
    /// `FOR UPDATE [NOWAIT | SKIP LOCKED]` row locking.
    pub supports_row_locking: bool,
    /// `USE INDEX`/`FORCE INDEX` hints after FROM.
    pub supports_index_hints: bool,
}

pub const GENERIC: DialectProfile = DialectProfile {
    quote_char: '"',
    bool_true: "true",
    bool_false: "false",
    escape_backslash: false,
    param_style: ParamStyle::Positional,
    pagination: PaginationStyle::LimitOffset,
    upsert: UpsertStyle::OnConflict,
    array_keyword: false,
    supports_returning: true,
    supports_with: true,
    supports_recursive_with: true,
    recursive_keyword: true,
    supports_join_in_update: true,
    supports_ordered_update: true,
    supports_row_locking: true,
    supports_index_hints: true,
};

pub const POSTGRES: DialectProfile = DialectProfile {
    quote_char: '"',
    bool_true: "true",
    bool_false: "false",
    escape_backslash: false,
    param_style: ParamStyle::Numbered,
    pagination: PaginationStyle::LimitOffset,
    upsert: UpsertStyle::OnConflict,
    array_keyword: true,
    supports_returning: true,
    supports_with: true,
    supports_recursive_with: true,
    recursive_keyword: true,
    supports_join_in_update: false,
    supports_ordered_update: false,
    supports_row_locking: true,
    supports_index_hints: false,
};

pub const MYSQL: DialectProfile = DialectProfile {
    quote_char: '`',
    bool_true: "1",
    bool_false: "0",
    escape_backslash: true,
    param_style: ParamStyle::Positional,
    pagination: PaginationStyle::LimitOffset,
    upsert: UpsertStyle::OnDuplicateKey,
    array_keyword: false,
    supports_returning: false,
    supports_with: true,
    supports_recursive_with: true,
    recursive_keyword: true,
    supports_join_in_update: true,
    supports_ordered_update: true,
    supports_row_locking: true,
    supports_index_hints: true,
};

pub const SQLITE: DialectProfile = DialectProfile {
    quote_char: '"',
    bool_true: "1",
    bool_false: "0",
    escape_backslash: false,
    param_style: ParamStyle::Positional,
    pagination: PaginationStyle::LimitOffset,
    upsert: UpsertStyle::OnConflict,
    array_keyword: false,
    supports_returning: true,
    supports_with: true,
    supports_recursive_with: true,
    recursive_keyword: true,
    supports_join_in_update: false,
    supports_ordered_update: false,
    supports_row_locking: false,
    supports_index_hints: false,
};

pub const MSSQL: DialectProfile = DialectProfile {
    quote_char: '"',
    bool_true: "1",
    bool_false: "0",
    escape_backslash: false,
    param_style: ParamStyle::Positional,
    pagination: PaginationStyle::OffsetFetch,
    upsert: UpsertStyle::Unsupported,
    array_keyword: false,
    supports_returning: false,
    supports_with: true,
    supports_recursive_with: true,
    recursive_keyword: false,
    supports_join_in_update: false,
    supports_ordered_update: false,
    supports_row_locking: false,
    supports_index_hints: false,
};

pub const ORACLE: DialectProfile = DialectProfile {
    quote_char: '"',
    bool_true: "1",
    bool_false: "0",
    escape_backslash: false,
    param_style: ParamStyle::Positional,
    pagination: PaginationStyle::FetchRows,
    upsert: UpsertStyle::Unsupported,
    array_keyword: false,
    supports_returning: false,
    supports_with: true,
    supports_recursive_with: true,
    recursive_keyword: false,
    supports_join_in_update: false,
    supports_ordered_update: false,
    supports_row_locking: true,
    supports_index_hints: false,
};

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Dialect {
    Generic,
    Postgres,
    MySql,
    Sqlite,
    Mssql,
    Oracle,
}

impl Default for Dialect {
    fn default() -> Self {
        Self::Generic
    }
}

impl Dialect {
    pub fn profile(&self) -> &'static DialectProfile {
        match self {
            Dialect::Generic => &GENERIC,
            Dialect::Postgres => &POSTGRES,
            Dialect::MySql => &MYSQL,
            Dialect::Sqlite => &SQLITE,
            Dialect::Mssql => &MSSQL,
            Dialect::Oracle => &ORACLE,
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dialect::Generic => write!(f, "generic"),
            Dialect::Postgres => write!(f, "postgres"),
            Dialect::MySql => write!(f, "mysql"),
            Dialect::Sqlite => write!(f, "sqlite"),
            Dialect::Mssql => write!(f, "mssql"),
            Dialect::Oracle => write!(f, "oracle"),
        }
    }
}
