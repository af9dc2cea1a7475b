use sqlx::SqlitePool;
use time::OffsetDateTime;
use tracing::info;

use crate::dishes::repo::{self, Dish, DishInput};
use crate::error::AppError;

pub async fn create_dish(db: &SqlitePool, input: &DishInput) -> Result<Dish, AppError> {
    let dish = repo::insert(db, input, OffsetDateTime::now_utc()).await?;
    info!(dish_id = dish.id, name = %dish.name, "dish created");
    Ok(dish)
}

/// All dishes newest first, or only those matching a non-blank `filter`.
pub async fn list_dishes(db: &SqlitePool, filter: Option<&str>) -> Result<Vec<Dish>, AppError> {
    let dishes = match filter.map(str::trim).filter(|k| !k.is_empty()) {
        Some(keyword) => repo::search(db, keyword).await?,
        None => repo::list(db).await?,
    };
    Ok(dishes)
}

pub async fn get_dish(db: &SqlitePool, id: i64) -> Result<Dish, AppError> {
    repo::find(db, id).await?.ok_or(AppError::NotFound("Dish"))
}

pub async fn update_dish(db: &SqlitePool, id: i64, input: &DishInput) -> Result<Dish, AppError> {
    let dish = repo::update(db, id, input)
        .await?
        .ok_or(AppError::NotFound("Dish"))?;
    info!(dish_id = dish.id, name = %dish.name, "dish updated");
    Ok(dish)
}

/// Removes the dish together with its consumption entries.
pub async fn delete_dish(db: &SqlitePool, id: i64) -> Result<Dish, AppError> {
    let dish = get_dish(db, id).await?;
    if repo::delete(db, id).await? == 0 {
        return Err(AppError::NotFound("Dish"));
    }
    info!(dish_id = dish.id, name = %dish.name, "dish deleted");
    Ok(dish)
}
