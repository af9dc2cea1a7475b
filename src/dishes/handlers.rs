use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use tracing::instrument;

use crate::{
    dishes::{
        dto::{DishForm, EditDishPage, IndexPage, SearchForm},
        services,
    },
    error::AppError,
    flash::Flash,
    form::RecordId,
    state::AppState,
};

pub fn dish_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index).post(create_dish))
        .route("/search", post(search))
        .route("/edit/:id", get(edit_form).post(update_dish))
        .route("/delete/:id", get(delete_dish))
}

#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<impl IntoResponse, AppError> {
    let dishes = services::list_dishes(&state.db, None).await?;
    let page = IndexPage {
        dishes,
        keyword: String::new(),
        flash: flash.message().map(str::to_owned),
    };
    Ok((flash, Html(page.render()?)))
}

#[instrument(skip(state))]
pub async fn create_dish(
    State(state): State<AppState>,
    Form(form): Form<DishForm>,
) -> Result<Redirect, AppError> {
    let input = form.parse()?;
    services::create_dish(&state.db, &input).await?;
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    flash: Flash,
    Form(form): Form<SearchForm>,
) -> Result<impl IntoResponse, AppError> {
    let keyword = form.search_keyword.unwrap_or_default();
    let dishes = services::list_dishes(&state.db, Some(&keyword)).await?;
    let page = IndexPage {
        dishes,
        keyword,
        flash: flash.message().map(str::to_owned),
    };
    Ok((flash, Html(page.render()?)))
}

#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    flash: Flash,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let dish = services::get_dish(&state.db, id).await?;
    let page = EditDishPage {
        dish,
        flash: flash.message().map(str::to_owned),
    };
    Ok((flash, Html(page.render()?)))
}

#[instrument(skip(state))]
pub async fn update_dish(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<DishForm>,
) -> Result<Redirect, AppError> {
    // Unknown ids are reported before the form is looked at.
    services::get_dish(&state.db, id).await?;
    let input = form.parse()?;
    services::update_dish(&state.db, id, &input).await?;
    Ok(Redirect::to("/"))
}

#[instrument(skip(state))]
pub async fn delete_dish(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    services::delete_dish(&state.db, id).await?;
    Ok((Flash::set("Dish deleted successfully!"), Redirect::to("/")))
}
