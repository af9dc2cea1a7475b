use sqlx::{FromRow, SqlitePool};
use time::Date;

use crate::report::calories::{DateRange, Intake};

/// A consumption event joined with the name of its dish.
#[derive(Debug, Clone, FromRow)]
pub struct ConsumedEntry {
    pub id: i64,
    pub dish_id: i64,
    pub dish_name: String,
    pub date_consumed: Date,
    pub grams: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConsumptionInput {
    pub dish_id: i64,
    pub grams: f64,
    pub date_consumed: Date,
}

pub async fn list(db: &SqlitePool) -> sqlx::Result<Vec<ConsumedEntry>> {
    let rows = sqlx::query_as::<_, ConsumedEntry>(
        r#"
        SELECT c.id, c.dish_id, d.name AS dish_name, c.date_consumed, c.grams
          FROM consumed_dishes c
          JOIN dishes d ON d.id = c.dish_id
         ORDER BY c.date_consumed DESC, c.id DESC
        "#,
    )
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find(db: &SqlitePool, id: i64) -> sqlx::Result<Option<ConsumedEntry>> {
    let row = sqlx::query_as::<_, ConsumedEntry>(
        r#"
        SELECT c.id, c.dish_id, d.name AS dish_name, c.date_consumed, c.grams
          FROM consumed_dishes c
          JOIN dishes d ON d.id = c.dish_id
         WHERE c.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

/// Returns the id of the new entry.
pub async fn insert(db: &SqlitePool, input: &ConsumptionInput) -> sqlx::Result<i64> {
    let id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO consumed_dishes (dish_id, date_consumed, grams)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
    )
    .bind(input.dish_id)
    .bind(input.date_consumed)
    .bind(input.grams)
    .fetch_one(db)
    .await?;
    Ok(id)
}

pub async fn update(db: &SqlitePool, id: i64, input: &ConsumptionInput) -> sqlx::Result<u64> {
    let res = sqlx::query(
        r#"
        UPDATE consumed_dishes
           SET dish_id = ?, date_consumed = ?, grams = ?
         WHERE id = ?
        "#,
    )
    .bind(input.dish_id)
    .bind(input.date_consumed)
    .bind(input.grams)
    .bind(id)
    .execute(db)
    .await?;
    Ok(res.rows_affected())
}

pub async fn delete(db: &SqlitePool, id: i64) -> sqlx::Result<u64> {
    let res = sqlx::query("DELETE FROM consumed_dishes WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(res.rows_affected())
}

/// Consumption events in `range` with the macros of their dish, newest first.
pub async fn intakes(db: &SqlitePool, range: DateRange) -> sqlx::Result<Vec<Intake>> {
    let rows = match range {
        DateRange::All => {
            sqlx::query_as::<_, Intake>(
                r#"
                SELECT c.date_consumed, c.grams, d.proteins, d.fats, d.carbs
                  FROM consumed_dishes c
                  JOIN dishes d ON d.id = c.dish_id
                 ORDER BY c.date_consumed DESC
                "#,
            )
            .fetch_all(db)
            .await?
        }
        DateRange::Between { start, end } => {
            sqlx::query_as::<_, Intake>(
                r#"
                SELECT c.date_consumed, c.grams, d.proteins, d.fats, d.carbs
                  FROM consumed_dishes c
                  JOIN dishes d ON d.id = c.dish_id
                 WHERE c.date_consumed >= ? AND c.date_consumed <= ?
                 ORDER BY c.date_consumed DESC
                "#,
            )
            .bind(start)
            .bind(end)
            .fetch_all(db)
            .await?
        }
    };
    Ok(rows)
}
