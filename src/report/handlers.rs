use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    error::AppError,
    flash::Flash,
    form,
    report::{
        calories::DateRange,
        dto::{PlotPage, PlotQuery},
        services,
    },
    state::AppState,
};

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/plot", get(plot))
}

#[instrument(skip(state))]
pub async fn plot(
    State(state): State<AppState>,
    flash: Flash,
    Query(q): Query<PlotQuery>,
) -> Result<impl IntoResponse, AppError> {
    let start = form::optional_date("start_date", q.start_date.as_deref())?;
    let end = form::optional_date("end_date", q.end_date.as_deref())?;
    let range = DateRange::resolve(start, end, OffsetDateTime::now_utc().date());

    let series = services::calorie_series(&state.db, range).await?;
    let chart = state.charts.render(&series)?;

    let page = PlotPage {
        chart_url: chart.data_url(),
        start_date: start.map(|d| d.to_string()).unwrap_or_default(),
        end_date: end.map(|d| d.to_string()).unwrap_or_default(),
        days: series.ascending().collect(),
        total: series.total(),
        flash: flash.message().map(str::to_owned),
    };
    Ok((flash, Html(page.render()?)))
}
