//! Core statement rendering against the generic dialect.

use pretty_assertions::assert_eq;

use crate::ast::builders::{col, func, star, val};
use crate::ast::{Delete, Insert, Order, Select, TableRef, Update};
use crate::error::SqlError;
use crate::render::{Dialect, ToSql};

fn sql<T: ToSql>(q: &T) -> String {
    q.to_sql(Dialect::Generic).unwrap()
}

#[test]
fn test_simple_select() {
    assert_eq!(sql(&Select::from("users")), r#"SELECT * FROM "users""#);
}

#[test]
fn test_select_where_comparison() {
    let q = Select::from("users").filter(col("age").gte(18));
    assert_eq!(sql(&q), r#"SELECT * FROM "users" WHERE "age">=18"#);
}

#[test]
fn test_select_columns() {
    let q = Select::from("users").column(col("id")).column(col("email"));
    assert_eq!(sql(&q), r#"SELECT "id","email" FROM "users""#);
}

#[test]
fn test_select_distinct() {
    let q = Select::from("users").distinct().column(col("role"));
    assert_eq!(sql(&q), r#"SELECT DISTINCT "role" FROM "users""#);
}

#[test]
fn test_select_without_from() {
    let q = Select::new().column(val(1));
    assert_eq!(sql(&q), "SELECT 1");
}

#[test]
fn test_select_order_limit_offset() {
    let q = Select::from("users")
        .order_by(col("created_at"), Order::Desc)
        .limit(10)
        .offset(5);
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "users" ORDER BY "created_at" DESC LIMIT 10 OFFSET 5"#
    );
}

#[test]
fn test_order_without_direction() {
    let q = Select::from("users").order_by_default(col("id"));
    assert_eq!(sql(&q), r#"SELECT * FROM "users" ORDER BY "id""#);
}

#[test]
fn test_inner_join() {
    let q = Select::from("orders").inner_join("users", col("orders.user_id").eq(col("users.id")));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "orders" JOIN "users" ON "orders"."user_id"="users"."id""#
    );
}

#[test]
fn test_left_and_cross_join() {
    let q = Select::from("a")
        .left_join("b", col("a.id").eq(col("b.a_id")))
        .cross_join("c");
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "a" LEFT JOIN "b" ON "a"."id"="b"."a_id" CROSS JOIN "c""#
    );
}

#[test]
fn test_group_by_having() {
    let q = Select::from("users")
        .column(col("role"))
        .column(func("COUNT", [star()]))
        .group_by([col("role")])
        .having(func("COUNT", [star()]).gt(5));
    assert_eq!(
        sql(&q),
        r#"SELECT "role",COUNT(*) FROM "users" GROUP BY "role" HAVING COUNT(*)>5"#
    );
}

#[test]
fn test_column_alias() {
    let q = Select::from("users").column(col("id").alias("user_id"));
    assert_eq!(sql(&q), r#"SELECT "id" AS "user_id" FROM "users""#);
}

#[test]
fn test_table_alias_and_schema() {
    let q = Select::from(TableRef::new("users").schema("auth").alias("u"));
    assert_eq!(sql(&q), r#"SELECT * FROM "auth"."users" AS "u""#);
}

#[test]
fn test_from_subquery() {
    let inner = Select::from("events").filter(col("kind").eq("click"));
    let q = Select::from_query(inner, "clicks");
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM (SELECT * FROM "events" WHERE "kind"='click') AS "clicks""#
    );
}

#[test]
fn test_and_chain_stays_flat() {
    let q = Select::from("t").filter(col("a").eq(1)).filter(col("b").eq(2)).filter(col("c").eq(3));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "t" WHERE "a"=1 AND "b"=2 AND "c"=3"#
    );
}

#[test]
fn test_or_inside_and_is_bracketed() {
    let q = Select::from("t").filter(col("a").eq(1).or(col("b").eq(2)).and(col("c").eq(3)));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "t" WHERE ("a"=1 OR "b"=2) AND "c"=3"#
    );
}

#[test]
fn test_and_inside_or_is_bracketed() {
    let q = Select::from("t").filter(col("a").eq(1).and(col("b").eq(2)).or(col("c").eq(3)));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "t" WHERE ("a"=1 AND "b"=2) OR "c"=3"#
    );
}

#[test]
fn test_not_criterion() {
    let q = Select::from("t").filter(col("a").eq(1).negate());
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE NOT ("a"=1)"#);
}

#[test]
fn test_between_like_null() {
    let q = Select::from("t")
        .filter(col("age").between(18, 65))
        .filter(col("name").like("A%"))
        .filter(col("deleted_at").is_null());
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "t" WHERE "age" BETWEEN 18 AND 65 AND "name" LIKE 'A%' AND "deleted_at" IS NULL"#
    );
}

#[test]
fn test_in_list() {
    let q = Select::from("t").filter(col("id").is_in([1, 2, 3]));
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE "id" IN (1,2,3)"#);
}

#[test]
fn test_empty_in_renders_false() {
    let q = Select::from("t").filter(col("id").is_in(Vec::<i64>::new()));
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE 1=0"#);

    let q = Select::from("t").filter(col("id").not_in(Vec::<i64>::new()));
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE 1=1"#);
}

#[test]
fn test_in_subquery() {
    let sub = Select::from("banned").column(col("user_id"));
    let q = Select::from("users").filter(col("id").in_query(sub));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "users" WHERE "id" IN (SELECT "user_id" FROM "banned")"#
    );
}

#[test]
fn test_arithmetic_precedence() {
    let q = Select::from("t").column((col("a") + col("b")) * val(2));
    assert_eq!(sql(&q), r#"SELECT ("a"+"b")*2 FROM "t""#);

    let q = Select::from("t").column(col("a") - (col("b") - col("c")));
    assert_eq!(sql(&q), r#"SELECT "a"-("b"-"c") FROM "t""#);

    let q = Select::from("t").column(col("a") * col("b") + col("c"));
    assert_eq!(sql(&q), r#"SELECT "a"*"b"+"c" FROM "t""#);
}

#[test]
fn test_negated_term() {
    let q = Select::from("t").column(-col("balance"));
    assert_eq!(sql(&q), r#"SELECT -"balance" FROM "t""#);
}

#[test]
fn test_insert_values() {
    let q = Insert::into("t").columns(["a", "b"]).values([val(1), val(2)]);
    assert_eq!(sql(&q), r#"INSERT INTO "t" ("a","b") VALUES (1,2)"#);
}

#[test]
fn test_insert_multiple_rows() {
    let q = Insert::into("t")
        .columns(["a"])
        .values([val(1)])
        .values([val(2)]);
    assert_eq!(sql(&q), r#"INSERT INTO "t" ("a") VALUES (1),(2)"#);
}

#[test]
fn test_insert_without_rows_fails() {
    let err = Insert::into("t").to_sql(Dialect::Generic).unwrap_err();
    assert!(matches!(err, SqlError::Incomplete(_)));
}

#[test]
fn test_insert_row_width_mismatch() {
    let err = Insert::into("t")
        .columns(["a", "b"])
        .values([val(1)])
        .to_sql(Dialect::Generic)
        .unwrap_err();
    assert_eq!(
        err,
        SqlError::RowWidthMismatch {
            row: 0,
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn test_update() {
    let q = Update::table("users")
        .set("verified", true)
        .filter(col("id").eq(7));
    assert_eq!(sql(&q), r#"UPDATE "users" SET "verified"=true WHERE "id"=7"#);
}

#[test]
fn test_update_without_sets_fails() {
    let err = Update::table("users").to_sql(Dialect::Generic).unwrap_err();
    assert!(matches!(err, SqlError::Incomplete(_)));
}

#[test]
fn test_delete() {
    let q = Delete::from("users").filter(col("id").eq(7));
    assert_eq!(sql(&q), r#"DELETE FROM "users" WHERE "id"=7"#);
}

#[test]
fn test_float_literals_keep_fractional_point() {
    let q = Select::from("t").filter(col("x").eq(1.0));
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE "x"=1.0"#);

    let q = Select::from("t").filter(col("x").eq(1.5));
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE "x"=1.5"#);
}

#[test]
fn test_non_finite_float_is_a_render_error() {
    let q = Select::from("t").filter(col("x").eq(f64::NAN));
    assert_eq!(q.to_sql(Dialect::Generic).unwrap_err(), SqlError::NonFiniteFloat);

    let q = Select::from("t").filter(col("x").eq(f64::INFINITY));
    assert_eq!(q.to_sql(Dialect::Generic).unwrap_err(), SqlError::NonFiniteFloat);
}

#[test]
fn test_render_is_idempotent() {
    let q = Select::from("t")
        .filter(col("a").eq(1).or(col("b").eq("x")))
        .order_by(col("a"), Order::Asc)
        .limit(3);
    assert_eq!(sql(&q), sql(&q));
}
