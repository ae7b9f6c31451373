//! CTEs, set operations, INSERT ... SELECT, RETURNING and typed literals.

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ast::builders::{col, func, named_param, val};
use crate::ast::{Cte, Insert, Select, Term, Update};
use crate::render::{Dialect, ToSql};

fn sql<T: ToSql>(q: &T) -> String {
    q.to_sql(Dialect::Generic).unwrap()
}

#[test]
fn test_with_clause() {
    let recent = Select::from("events").filter(col("age").lt(7));
    let q = Select::from("recent").with(Cte::new("recent", recent));
    assert_eq!(
        sql(&q),
        r#"WITH "recent" AS (SELECT * FROM "events" WHERE "age"<7) SELECT * FROM "recent""#
    );
}

#[test]
fn test_multiple_ctes() {
    let q = Select::from("b")
        .with(Cte::new("a", Select::from("t1")))
        .with(Cte::new("b", Select::from("a")));
    assert_eq!(
        sql(&q),
        r#"WITH "a" AS (SELECT * FROM "t1"),"b" AS (SELECT * FROM "a") SELECT * FROM "b""#
    );
}

#[test]
fn test_recursive_cte_counts_up() {
    let anchor = Select::new().column(val(1));
    let step = Select::from("nums")
        .column(col("n") + val(1))
        .filter(col("n").lt(10));
    let q = Select::from("nums").with(Cte::new("nums", anchor.union_all(step)).columns(["n"]).recursive());
    assert_eq!(
        sql(&q),
        r#"WITH RECURSIVE "nums"("n") AS (SELECT 1 UNION ALL SELECT "n"+1 FROM "nums" WHERE "n"<10) SELECT * FROM "nums""#
    );
}

#[test]
fn test_set_operations() {
    let q = Select::from("a").union(Select::from("b"));
    assert_eq!(sql(&q), r#"SELECT * FROM "a" UNION SELECT * FROM "b""#);

    let q = Select::from("a")
        .intersect(Select::from("b"))
        .except(Select::from("c"));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "a" INTERSECT SELECT * FROM "b" EXCEPT SELECT * FROM "c""#
    );
}

#[test]
fn test_set_operation_precedes_ordering_and_limit() {
    let q = Select::from("a")
        .union(Select::from("b"))
        .order_by(col("x"), crate::ast::Order::Asc)
        .limit(3);
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "a" UNION SELECT * FROM "b" ORDER BY "x" ASC LIMIT 3"#
    );
}

#[test]
fn test_insert_from_select() {
    let src = Select::from("staging").column(col("a")).filter(col("ok").eq(true));
    let q = Insert::into("t").columns(["a"]).from_select(src);
    assert_eq!(
        sql(&q),
        r#"INSERT INTO "t" ("a") SELECT "a" FROM "staging" WHERE "ok"=true"#
    );
}

#[test]
fn test_insert_returning() {
    let q = Insert::into("t").columns(["a"]).values([val(1)]).returning_all();
    assert_eq!(sql(&q), r#"INSERT INTO "t" ("a") VALUES (1) RETURNING *"#);
}

#[test]
fn test_update_returning() {
    let q = Update::table("t").set("a", 1).returning([col("a"), col("b")]);
    assert_eq!(sql(&q), r#"UPDATE "t" SET "a"=1 RETURNING "a","b""#);
}

#[test]
fn test_zero_argument_function() {
    let q = Select::new().column(func("NOW", Vec::<Term>::new()));
    assert_eq!(sql(&q), "SELECT NOW()");
}

#[test]
fn test_function_alias_and_nesting() {
    let q = Select::from("users").column(func("UPPER", [func("TRIM", [col("name")])]).alias("n"));
    assert_eq!(sql(&q), r#"SELECT UPPER(TRIM("name")) AS "n" FROM "users""#);
}

#[test]
fn test_scalar_subquery_term() {
    let count = Select::from("orders")
        .column(func("COUNT", [Term::Star]))
        .filter(col("orders.user_id").eq(col("users.id")));
    let q = Select::from("users").column(col("id")).column(Term::from(count).alias("orders"));
    assert_eq!(
        sql(&q),
        r#"SELECT "id",(SELECT COUNT(*) FROM "orders" WHERE "orders"."user_id"="users"."id") AS "orders" FROM "users""#
    );
}

#[test]
fn test_named_parameter_text() {
    let q = Select::from("t").filter(col("x").eq(named_param(":min")));
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE "x"=:min"#);
}

#[test]
fn test_date_and_datetime_literals() {
    let d = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let dt = NaiveDateTime::new(d, chrono::NaiveTime::from_hms_opt(3, 4, 5).unwrap());
    let q = Select::from("t").filter(col("d").eq(d)).filter(col("ts").eq(dt));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "t" WHERE "d"='2024-01-02' AND "ts"='2024-01-02T03:04:05'"#
    );
}

#[test]
fn test_uuid_and_decimal_literals() {
    let id = Uuid::nil();
    let price = Decimal::new(1999, 2);
    let q = Select::from("t").filter(col("id").eq(id)).filter(col("price").eq(price));
    assert_eq!(
        sql(&q),
        r#"SELECT * FROM "t" WHERE "id"='00000000-0000-0000-0000-000000000000' AND "price"=19.99"#
    );
}

#[test]
fn test_for_update_variants() {
    let q = Select::from("t").for_update();
    assert_eq!(sql(&q), r#"SELECT * FROM "t" FOR UPDATE"#);

    let q = Select::from("t").for_update_nowait();
    assert_eq!(sql(&q), r#"SELECT * FROM "t" FOR UPDATE NOWAIT"#);
}

#[test]
fn test_force_index() {
    let q = Select::from("t").force_index(["idx_a", "idx_b"]);
    assert_eq!(sql(&q), r#"SELECT * FROM "t" FORCE INDEX ("idx_a","idx_b")"#);
}

#[test]
fn test_quote_override() {
    use crate::render::RenderContext;

    let q = Select::from("t").column(col("a"));
    let mut ctx = RenderContext::new(Dialect::Generic).quote_override('`');
    assert_eq!(q.render(&mut ctx).unwrap(), "SELECT `a` FROM `t`");
}

#[test]
fn test_json_literal() {
    let doc = serde_json::json!({"a": 1});
    let q = Select::from("t").filter(col("meta").eq(val(doc)));
    assert_eq!(sql(&q), r#"SELECT * FROM "t" WHERE "meta"='{"a":1}'"#);
}
