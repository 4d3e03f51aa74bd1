use axum::{extract::State, routing::post, Json, Router};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::Question;
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::extract::ApiJson;
use crate::telemetry::QUIZ_QUESTION_CNTR;

/// Category id meaning "draw from the whole bank".
const ANY_CATEGORY: i64 = 0;

// The descriptor also carries a `type` label, which the selection never
// needs; the id alone scopes the draw, and clients send it as either a
// number or a numeric string.
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Deserialize)]
struct QuizPayload {
    quiz_category: QuizCategory,
    #[serde(default)]
    previous_questions: Vec<i64>,
}

#[derive(Serialize)]
struct QuizResponse {
    success: bool,
    question: Option<Question>,
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    ApiJson(payload): ApiJson<QuizPayload>,
) -> ApiResult<Json<QuizResponse>> {
    let candidates = if payload.quiz_category.id == ANY_CATEGORY {
        questions::get_questions(&pool).await?
    } else {
        questions::get_questions_for_category(&pool, payload.quiz_category.id).await?
    };

    let eligible = eligible_questions(candidates, &payload.previous_questions);
    let question = eligible.choose(&mut rand::thread_rng()).cloned();
    if let Some(question) = &question {
        QUIZ_QUESTION_CNTR
            .with_label_values(&[question.category.to_string().as_str()])
            .inc();
    }

    // An empty eligible set is the quiz running out, not a failure.
    Ok(Json(QuizResponse {
        success: true,
        question,
    }))
}

/// Candidates minus everything the client has already seen, materialised
/// before the draw so one uniform choice suffices and an exhausted set is an
/// explicit empty list rather than a sampling loop that never terminates.
fn eligible_questions(candidates: Vec<Question>, previous: &[i64]) -> Vec<Question> {
    candidates
        .into_iter()
        .filter(|question| !previous.contains(&question.id))
        .collect()
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
