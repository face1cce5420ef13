use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::{get, post, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{
    CreateMealRequest, MealResponse, MealsResponse, Pagination, SummaryResponse,
    UpdateMealRequest,
};
use super::repo_types::MealOrder;
use super::services::summary_for_user;
use crate::{
    error::{AppError, AppResult},
    session::SessionUser,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals))
        .route("/meals/summary", get(get_summary))
        .route("/meals/:id", get(get_meal))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", post(create_meal))
        .route("/meals/:id", put(update_meal).delete(delete_meal))
}

fn meal_not_found() -> AppError {
    AppError::NotFound("Meal not found".into())
}

#[instrument(skip(state, user, payload), fields(user_id = %user.id))]
pub async fn create_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    payload: Result<Json<CreateMealRequest>, JsonRejection>,
) -> AppResult<(StatusCode, HeaderMap, Json<MealResponse>)> {
    let Json(payload) = payload?;
    let new_meal = payload.validate()?;

    let meal = state.meals.insert(user.id, new_meal).await?;
    info!(meal_id = %meal.id, "meal created");

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/meals/{}", meal.id)) {
        headers.insert(header::LOCATION, location);
    }

    Ok((StatusCode::CREATED, headers, Json(MealResponse { meal })))
}

#[instrument(skip(state, user, query), fields(user_id = %user.id))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    query: Result<Query<Pagination>, QueryRejection>,
) -> AppResult<Json<MealsResponse>> {
    let Query(p) = query?;
    let page = p.validate()?;
    let meals = state
        .meals
        .list_by_user(user.id, MealOrder::NewestFirst, page)
        .await?;
    Ok(Json(MealsResponse { meals }))
}

#[instrument(skip(state, user, path), fields(user_id = %user.id))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<Json<MealResponse>> {
    let Path(id) = path?;
    let meal = state
        .meals
        .find(user.id, id)
        .await?
        .ok_or_else(meal_not_found)?;
    Ok(Json(MealResponse { meal }))
}

#[instrument(skip(state, user, path, payload), fields(user_id = %user.id))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateMealRequest>, JsonRejection>,
) -> AppResult<Json<MealResponse>> {
    let Path(id) = path?;
    let Json(payload) = payload?;
    let changes = payload.validate()?;

    let meal = state
        .meals
        .update(user.id, id, changes)
        .await?
        .ok_or_else(meal_not_found)?;
    info!(meal_id = %meal.id, "meal updated");
    Ok(Json(MealResponse { meal }))
}

#[instrument(skip(state, user, path), fields(user_id = %user.id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> AppResult<StatusCode> {
    let Path(id) = path?;
    if !state.meals.delete(user.id, id).await? {
        return Err(meal_not_found());
    }
    info!(meal_id = %id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[instrument(skip(state, user), fields(user_id = %user.id))]
pub async fn get_summary(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> AppResult<Json<SummaryResponse>> {
    let summary = summary_for_user(state.meals.as_ref(), user.id).await?;
    Ok(Json(SummaryResponse { summary }))
}
