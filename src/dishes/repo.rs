use sqlx::{FromRow, SqlitePool};
use time::OffsetDateTime;

#[derive(Debug, Clone, FromRow)]
pub struct Dish {
    pub id: i64,
    pub name: String,
    pub proteins: f64,
    pub fats: f64,
    pub carbs: f64,
    pub created_at: OffsetDateTime,
}

/// Validated dish fields, as written on create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct DishInput {
    pub name: String,
    pub proteins: f64,
    pub fats: f64,
    pub carbs: f64,
}

// julianday() compares timestamps regardless of fractional-second width.
const NEWEST_FIRST: &str = "ORDER BY julianday(created_at) DESC, id DESC";

pub async fn list(db: &SqlitePool) -> sqlx::Result<Vec<Dish>> {
    let sql =
        format!("SELECT id, name, proteins, fats, carbs, created_at FROM dishes {NEWEST_FIRST}");
    let rows = sqlx::query_as::<_, Dish>(&sql).fetch_all(db).await?;
    Ok(rows)
}

/// Dishes whose name contains `keyword` (SQLite `LIKE`, so ASCII letters
/// match case-insensitively). Wildcards in `keyword` are matched literally.
pub async fn search(db: &SqlitePool, keyword: &str) -> sqlx::Result<Vec<Dish>> {
    let sql = format!(
        r#"
        SELECT id, name, proteins, fats, carbs, created_at
        FROM dishes
        WHERE name LIKE '%' || ? || '%' ESCAPE '\'
        {NEWEST_FIRST}
        "#
    );
    let rows = sqlx::query_as::<_, Dish>(&sql)
        .bind(escape_like(keyword))
        .fetch_all(db)
        .await?;
    Ok(rows)
}

pub async fn find(db: &SqlitePool, id: i64) -> sqlx::Result<Option<Dish>> {
    sqlx::query_as::<_, Dish>(
        r#"
        SELECT id, name, proteins, fats, carbs, created_at
        FROM dishes
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

pub async fn exists(db: &SqlitePool, id: i64) -> sqlx::Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM dishes WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await?;
    Ok(found.is_some())
}

pub async fn insert(
    db: &SqlitePool,
    input: &DishInput,
    created_at: OffsetDateTime,
) -> sqlx::Result<Dish> {
    sqlx::query_as::<_, Dish>(
        r#"
        INSERT INTO dishes (name, proteins, fats, carbs, created_at)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, name, proteins, fats, carbs, created_at
        "#,
    )
    .bind(&input.name)
    .bind(input.proteins)
    .bind(input.fats)
    .bind(input.carbs)
    .bind(created_at)
    .fetch_one(db)
    .await
}

/// Overwrite every editable field; `created_at` is left alone.
pub async fn update(db: &SqlitePool, id: i64, input: &DishInput) -> sqlx::Result<Option<Dish>> {
    sqlx::query_as::<_, Dish>(
        r#"
        UPDATE dishes
           SET name = ?, proteins = ?, fats = ?, carbs = ?
         WHERE id = ?
        RETURNING id, name, proteins, fats, carbs, created_at
        "#,
    )
    .bind(&input.name)
    .bind(input.proteins)
    .bind(input.fats)
    .bind(input.carbs)
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Consumption entries of the dish go with it (`ON DELETE CASCADE`).
pub async fn delete(db: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let res = sqlx::query("DELETE FROM dishes WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

fn escape_like(keyword: &str) -> String {
    let mut out = String::with_capacity(keyword.len());
    for c in keyword.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
