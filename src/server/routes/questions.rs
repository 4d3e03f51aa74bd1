use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::{categories, questions};
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::extract::{ApiJson, ApiPath, ApiQuery};
use crate::server::pagination::paginate;

use super::{category_map, PageQuery, QuestionList};

// Browser clients post numeric fields straight out of form inputs, so
// category and difficulty arrive as either numbers or numeric strings.
#[derive(Deserialize)]
struct NewQuestion {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchPayload {
    #[serde(default)]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct ListQuestionsResponse {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct CreatedResponse {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Serialize)]
struct DeletedResponse {
    success: bool,
    deleted: i64,
    questions: Vec<Question>,
    total_questions: usize,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResult<Json<ListQuestionsResponse>> {
    let all = questions::get_questions(&pool).await?;
    let total_questions = all.len();
    let page = paginate(all, query.page);
    if page.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(ListQuestionsResponse {
        success: true,
        questions: page,
        total_questions,
        categories: category_map(categories),
        current_category: None,
    }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(form): ApiJson<NewQuestion>,
) -> ApiResult<Json<CreatedResponse>> {
    let NewQuestion {
        question,
        answer,
        category,
        difficulty,
    } = form;
    let (Some(question), Some(answer), Some(category), Some(difficulty)) =
        (question, answer, category, difficulty)
    else {
        return Err(ApiError::Unprocessable);
    };
    if question.trim().is_empty() || answer.trim().is_empty() {
        return Err(ApiError::Unprocessable);
    }
    if categories::get_category(&pool, category).await?.is_none() {
        return Err(ApiError::Unprocessable);
    }

    let created = questions::create_question(&pool, &question, &answer, category, difficulty).await?;
    let (questions, total_questions) = first_page(&pool).await?;
    Ok(Json(CreatedResponse {
        success: true,
        created,
        questions,
        total_questions,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<DeletedResponse>> {
    // Deleting something that is not there is a request that cannot be
    // carried out, which is 422 under this API's taxonomy, not 404.
    if questions::delete_question(&pool, id).await? == 0 {
        return Err(ApiError::Unprocessable);
    }

    let (questions, total_questions) = first_page(&pool).await?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
        questions,
        total_questions,
    }))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiJson(payload): ApiJson<SearchPayload>,
) -> ApiResult<Json<QuestionList>> {
    let term = payload.search_term.unwrap_or_default();
    let questions = questions::search_questions(&pool, &term).await?;
    let total_questions = questions.len();
    Ok(Json(QuestionList {
        success: true,
        questions,
        total_questions,
        current_category: None,
    }))
}

/// First page of the remaining bank plus the full count, which mutation
/// responses embed so clients can refresh their list without a second call.
/// No empty-page check here: deleting the last question still succeeds.
async fn first_page(pool: &SqlitePool) -> ApiResult<(Vec<Question>, usize)> {
    let all = questions::get_questions(pool).await?;
    let total = all.len();
    Ok((paginate(all, 1), total))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/{id}", delete(delete_question))
        .route("/questions/search", post(search_questions))
        .with_state(state)
}
