use sqlx::SqlitePool;
use tracing::info;

use crate::consumption::repo::{self, ConsumedEntry, ConsumptionInput};
use crate::dishes::repo as dishes_repo;
use crate::error::AppError;

async fn ensure_dish(db: &SqlitePool, dish_id: i64) -> Result<(), AppError> {
    if dishes_repo::exists(db, dish_id).await? {
        Ok(())
    } else {
        Err(AppError::ForeignKey(dish_id))
    }
}

/// A constraint failure from the store still names the dish we tried to use.
fn dangling(dish_id: i64) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| match AppError::from(e) {
        AppError::ForeignKey(_) => AppError::ForeignKey(dish_id),
        other => other,
    }
}

pub async fn record_consumption(
    db: &SqlitePool,
    input: &ConsumptionInput,
) -> Result<ConsumedEntry, AppError> {
    ensure_dish(db, input.dish_id).await?;
    let id = repo::insert(db, input)
        .await
        .map_err(dangling(input.dish_id))?;
    info!(entry_id = id, dish_id = input.dish_id, date = %input.date_consumed, grams = input.grams, "consumption recorded");
    get_consumption(db, id).await
}

pub async fn list_consumption(db: &SqlitePool) -> Result<Vec<ConsumedEntry>, AppError> {
    Ok(repo::list(db).await?)
}

pub async fn get_consumption(db: &SqlitePool, id: i64) -> Result<ConsumedEntry, AppError> {
    repo::find(db, id)
        .await?
        .ok_or(AppError::NotFound("Consumed dish"))
}

pub async fn update_consumption(
    db: &SqlitePool,
    id: i64,
    input: &ConsumptionInput,
) -> Result<ConsumedEntry, AppError> {
    get_consumption(db, id).await?;
    ensure_dish(db, input.dish_id).await?;
    let changed = repo::update(db, id, input)
        .await
        .map_err(dangling(input.dish_id))?;
    if changed == 0 {
        return Err(AppError::NotFound("Consumed dish"));
    }
    info!(entry_id = id, dish_id = input.dish_id, date = %input.date_consumed, grams = input.grams, "consumption updated");
    get_consumption(db, id).await
}

/// Returns the removed entry so callers can name it.
pub async fn delete_consumption(db: &SqlitePool, id: i64) -> Result<ConsumedEntry, AppError> {
    let entry = get_consumption(db, id).await?;
    if repo::delete(db, id).await? == 0 {
        return Err(AppError::NotFound("Consumed dish"));
    }
    info!(entry_id = id, dish = %entry.dish_name, date = %entry.date_consumed, "consumption deleted");
    Ok(entry)
}

pub fn deleted_message(entry: &ConsumedEntry) -> String {
    format!(
        "Record for {} on {} deleted successfully!",
        entry.dish_name, entry.date_consumed
    )
}
