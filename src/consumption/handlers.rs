use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    consumption::{
        dto::{ConsumePage, ConsumedPage, ConsumptionForm, EditConsumedPage},
        services,
    },
    dishes::services as dishes,
    error::AppError,
    flash::Flash,
    form::RecordId,
    state::AppState,
};

pub fn consumption_routes() -> Router<AppState> {
    Router::new()
        .route("/consume", get(consume_form).post(record))
        .route("/consumed", get(list_consumed))
        .route("/consumed/delete/:id", post(delete_consumed))
        .route("/consumed/edit/:id", get(edit_form).post(update_consumed))
}

#[instrument(skip(state))]
pub async fn consume_form(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<impl IntoResponse, AppError> {
    let page = ConsumePage {
        dishes: dishes::list_dishes(&state.db, None).await?,
        today: OffsetDateTime::now_utc().date(),
        flash: flash.message().map(str::to_owned),
    };
    Ok((flash, Html(page.render()?)))
}

#[instrument(skip(state))]
pub async fn record(
    State(state): State<AppState>,
    Form(form): Form<ConsumptionForm>,
) -> Result<impl IntoResponse, AppError> {
    let input = form.parse()?;
    services::record_consumption(&state.db, &input).await?;
    Ok((
        Flash::set("Consumed dish added successfully!"),
        Redirect::to("/consume"),
    ))
}

#[instrument(skip(state))]
pub async fn list_consumed(
    State(state): State<AppState>,
    flash: Flash,
) -> Result<impl IntoResponse, AppError> {
    let page = ConsumedPage {
        entries: services::list_consumption(&state.db).await?,
        flash: flash.message().map(str::to_owned),
    };
    Ok((flash, Html(page.render()?)))
}

#[instrument(skip(state))]
pub async fn delete_consumed(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let entry = services::delete_consumption(&state.db, id).await?;
    Ok((
        Flash::set(&services::deleted_message(&entry)),
        Redirect::to("/consumed"),
    ))
}

#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    flash: Flash,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let page = EditConsumedPage {
        entry: services::get_consumption(&state.db, id).await?,
        dishes: dishes::list_dishes(&state.db, None).await?,
        flash: flash.message().map(str::to_owned),
    };
    Ok((flash, Html(page.render()?)))
}

#[instrument(skip(state))]
pub async fn update_consumed(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Form(form): Form<ConsumptionForm>,
) -> Result<Redirect, AppError> {
    services::get_consumption(&state.db, id).await?;
    let input = form.parse()?;
    services::update_consumption(&state.db, id, &input).await?;
    Ok(Redirect::to("/consumed"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::build_app;
    use crate::dishes::repo::DishInput;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn seeded() -> (AppState, i64) {
        let state = AppState::fake().await;
        let input = DishInput {
            name: "Goulash".into(),
            proteins: 15.0,
            fats: 8.0,
            carbs: 10.0,
        };
        let dish = dishes::create_dish(&state.db, &input).await.unwrap();
        (state, dish.id)
    }

    #[tokio::test]
    async fn record_redirects_back_with_flash() {
        let (state, dish_id) = seeded().await;
        let res = build_app(state.clone())
            .oneshot(post_form(
                "/consume",
                &format!("dish_id={dish_id}&grams=300&date=2024-04-02"),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/consume");
        assert!(res.headers().contains_key(header::SET_COOKIE));

        let entries = services::list_consumption(&state.db).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].grams, 300.0);
    }

    #[tokio::test]
    async fn record_with_bad_date_is_bad_request() {
        let (state, dish_id) = seeded().await;
        let res = build_app(state)
            .oneshot(post_form(
                "/consume",
                &format!("dish_id={dish_id}&grams=300&date=02.04.2024"),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn record_for_missing_dish_is_unprocessable() {
        let (state, dish_id) = seeded().await;
        let res = build_app(state)
            .oneshot(post_form(
                "/consume",
                &format!("dish_id={}&grams=300&date=2024-04-02", dish_id + 1),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn consumed_page_lists_entries_and_shows_flash() {
        let (state, dish_id) = seeded().await;
        let input = ConsumptionForm {
            dish_id: dish_id.to_string(),
            grams: "120".into(),
            date: "2024-04-01".into(),
        }
        .parse()
        .unwrap();
        services::record_consumption(&state.db, &input).await.unwrap();

        let [(_, cookie)] = Flash::set("Saved!");
        let res = build_app(state)
            .oneshot(
                Request::get("/consumed")
                    .header(header::COOKIE, cookie.split(';').next().unwrap())
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(header::SET_COOKIE));
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("Goulash"));
        assert!(html.contains("2024-04-01"));
        assert!(html.contains("Saved!"));
    }

    #[tokio::test]
    async fn delete_unknown_entry_is_not_found() {
        let (state, _) = seeded().await;
        let res = build_app(state)
            .oneshot(post_form("/consumed/delete/5", ""))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_not_found() {
        let (state, _) = seeded().await;
        let app = build_app(state);
        let res = app
            .clone()
            .oneshot(post_form("/consumed/delete/abc", ""))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let res = app
            .oneshot(
                Request::get("/consumed/edit/x1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_updates_and_redirects() {
        let (state, dish_id) = seeded().await;
        let input = ConsumptionForm {
            dish_id: dish_id.to_string(),
            grams: "120".into(),
            date: "2024-04-01".into(),
        }
        .parse()
        .unwrap();
        let entry = services::record_consumption(&state.db, &input)
            .await
            .unwrap();

        let app = build_app(state.clone());
        let res = app
            .clone()
            .oneshot(
                Request::get(format!("/consumed/edit/{}", entry.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let res = app
            .oneshot(post_form(
                &format!("/consumed/edit/{}", entry.id),
                &format!("dish_id={dish_id}&grams=90&date=2024-04-03"),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[header::LOCATION], "/consumed");

        let stored = services::get_consumption(&state.db, entry.id).await.unwrap();
        assert_eq!(stored.grams, 90.0);
    }
}
