use std::collections::BTreeMap;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{ApiPath, ApiQuery};
use crate::server::pagination::paginate;

use super::{category_map, PageQuery, QuestionList};

#[derive(Serialize)]
struct CategoriesResponse {
    success: bool,
    categories: BTreeMap<i64, String>,
}

async fn list_categories(State(pool): State<SqlitePool>) -> ApiResult<Json<CategoriesResponse>> {
    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<QuestionList>> {
    // A reference to a category that does not exist is a malformed request,
    // not a missing page.
    if categories::get_category(&pool, id).await?.is_none() {
        return Err(ApiError::BadRequest);
    }

    let questions = questions::get_questions_for_category(&pool, id).await?;
    let total_questions = questions.len();
    let page = paginate(questions, query.page);
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(QuestionList {
        success: true,
        questions: page,
        total_questions,
        current_category: Some(id),
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(list_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
