//! Parameterized rendering: placeholder styles and value collection order.

use pretty_assertions::assert_eq;

use crate::ast::builders::{col, null, param, val};
use crate::ast::{Insert, Select, Value};
use crate::render::{Dialect, ParamStyle, ToSql};

#[test]
fn test_positional_placeholders() {
    let q = Select::from("t").filter(col("x").eq(5));
    let (sql, values) = q
        .to_parameterized_sql_with(Dialect::Generic, ParamStyle::Positional)
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" WHERE "x"=?"#);
    assert_eq!(values, vec![Value::Int(5)]);
}

#[test]
fn test_postgres_numbered_by_default() {
    let q = Select::from("t")
        .filter(col("a").eq(1))
        .filter(col("b").eq("x"))
        .limit(3);
    let (sql, values) = q.to_parameterized_sql(Dialect::Postgres).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" WHERE "a"=$1 AND "b"=$2 LIMIT $3"#);
    assert_eq!(
        values,
        vec![Value::Int(1), Value::Str("x".into()), Value::Int(3)]
    );
}

#[test]
fn test_named_placeholders() {
    let q = Select::from("t").filter(col("x").eq(5));
    let (sql, values) = q
        .to_parameterized_sql_with(Dialect::Oracle, ParamStyle::Named)
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" WHERE "x"=:p1"#);
    assert_eq!(values, vec![Value::Int(5)]);
}

#[test]
fn test_values_follow_tree_order() {
    let sub = Select::from("u").column(col("id")).filter(col("age").gt(21));
    let q = Select::from("t")
        .filter(col("a").eq(1))
        .filter(col("owner").in_query(sub))
        .filter(col("b").eq(2));
    let (sql, values) = q.to_parameterized_sql(Dialect::Postgres).unwrap();
    assert_eq!(
        sql,
        r#"SELECT * FROM "t" WHERE "a"=$1 AND "owner" IN (SELECT "id" FROM "u" WHERE "age">$2) AND "b"=$3"#
    );
    assert_eq!(values, vec![Value::Int(1), Value::Int(21), Value::Int(2)]);
}

#[test]
fn test_in_list_collects_term_values_first() {
    let q = Select::from("t").filter((col("a") + val(10)).is_in([val(1), val(2)]));
    let (sql, values) = q
        .to_parameterized_sql_with(Dialect::Generic, ParamStyle::Positional)
        .unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" WHERE "a"+? IN (?,?)"#);
    assert_eq!(values, vec![Value::Int(10), Value::Int(1), Value::Int(2)]);
}

#[test]
fn test_substituting_values_reproduces_inline_render() {
    let q = Select::from("t")
        .filter(col("a").eq(1))
        .filter(col("b").is_in([2, 3]))
        .limit(4);
    let inline = q.to_sql(Dialect::Generic).unwrap();
    let (sql, values) = q
        .to_parameterized_sql_with(Dialect::Generic, ParamStyle::Positional)
        .unwrap();

    let mut values = values.into_iter();
    let mut substituted = String::new();
    for (i, piece) in sql.split('?').enumerate() {
        if i > 0 {
            substituted.push_str(&values.next().unwrap().to_string());
        }
        substituted.push_str(piece);
    }
    assert_eq!(substituted, inline);
}

#[test]
fn test_insert_rows_parameterized() {
    let q = Insert::into("t")
        .columns(["a", "b"])
        .values([val(1), val(2)])
        .values([val(3), val(4)]);
    let (sql, values) = q.to_parameterized_sql(Dialect::Postgres).unwrap();
    assert_eq!(sql, r#"INSERT INTO "t" ("a","b") VALUES ($1,$2),($3,$4)"#);
    assert_eq!(
        values,
        vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn test_null_stays_inline() {
    let q = Select::from("t").filter(col("a").eq(null())).filter(col("b").eq(1));
    let (sql, values) = q.to_parameterized_sql(Dialect::Postgres).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" WHERE "a"=NULL AND "b"=$1"#);
    assert_eq!(values, vec![Value::Int(1)]);
}

#[test]
fn test_explicit_parameter_is_not_collected() {
    let q = Select::from("t").filter(col("x").eq(param(1)));
    let (sql, values) = q.to_parameterized_sql(Dialect::Postgres).unwrap();
    assert_eq!(sql, r#"SELECT * FROM "t" WHERE "x"=$1"#);
    assert_eq!(values, vec![]);
}

#[test]
fn test_parameterized_render_is_repeatable() {
    let q = Select::from("t").filter(col("a").eq(1)).filter(col("b").eq(2));
    let first = q.to_parameterized_sql(Dialect::Postgres).unwrap();
    let second = q.to_parameterized_sql(Dialect::Postgres).unwrap();
    assert_eq!(first, second);
}
