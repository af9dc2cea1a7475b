use sqlx::SqlitePool;
use tracing::debug;

use crate::consumption::repo as consumption_repo;
use crate::error::AppError;
use crate::report::calories::{daily_calories, CalorieSeries, DateRange};

/// Per-day calorie totals for the consumption events in `range`.
pub async fn calorie_series(db: &SqlitePool, range: DateRange) -> Result<CalorieSeries, AppError> {
    let intakes = consumption_repo::intakes(db, range).await?;
    debug_assert!(intakes.iter().all(|i| range.contains(i.date_consumed)));
    let series = daily_calories(&intakes);
    debug!(?range, events = intakes.len(), days = series.len(), "calorie series built");
    Ok(series)
}
