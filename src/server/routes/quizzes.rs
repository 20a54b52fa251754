use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions, Question},
    server::{
        app::AppState,
        deserializers::{CategoryRef, QuizScope},
    },
    telemetry::{QUIZ_EXHAUSTED, QUIZ_QUESTIONS_SERVED},
};

use super::{ApiError, ApiResponse};

/// A quiz request once its fields have been checked.
#[derive(Debug, PartialEq)]
struct QuizRequest {
    previous_questions: Vec<i64>,
    scope: QuizScope,
}

impl QuizRequest {
    /// The body has to be an object, anything else is a bad request.
    /// Fields of the wrong shape are unprocessable.
    fn from_body(body: Value) -> Result<Self, ApiError> {
        let Value::Object(body) = body else {
            return Err(ApiError::BadRequest);
        };

        let previous_questions = match body.get("previous_questions") {
            None | Some(Value::Null) => Vec::new(),
            Some(ids) => Vec::<i64>::deserialize(ids).map_err(|e| {
                tracing::debug!("Bad previous_questions: {e}");
                ApiError::UnprocessableInput
            })?,
        };

        let scope = match body.get("quiz_category") {
            None | Some(Value::Null) => QuizScope::All,
            Some(Value::Object(category)) => match category.get("id") {
                None | Some(Value::Null) => QuizScope::All,
                Some(id) => {
                    let id = CategoryRef::deserialize(id).map_err(|e| {
                        tracing::debug!("Bad quiz category id: {e}");
                        ApiError::UnprocessableInput
                    })?;
                    QuizScope::from_ref(Some(&id))
                }
            },
            Some(other) => {
                tracing::debug!("quiz_category is not an object: {other}");
                return Err(ApiError::UnprocessableInput);
            }
        };

        Ok(QuizRequest {
            previous_questions,
            scope,
        })
    }
}

#[derive(Serialize)]
struct QuizQuestionBody {
    success: bool,
    question: Option<Question>,
}

fn pick_question(candidates: &[Question]) -> Option<Question> {
    candidates.choose(&mut rand::thread_rng()).cloned()
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse<Json<QuizQuestionBody>> {
    let Json(body) = body?;
    let QuizRequest {
        previous_questions: previous,
        scope,
    } = QuizRequest::from_body(body)?;

    let candidates = match scope {
        QuizScope::All => questions::get_quiz_candidates(&pool, None, &previous).await,
        QuizScope::Category(id) => questions::get_quiz_candidates(&pool, Some(id), &previous).await,
        QuizScope::Nothing => Ok(Vec::new()),
    }
    .map_err(ApiError::Unprocessable)?;

    let question = pick_question(&candidates);
    let label = scope.label();
    match &question {
        Some(q) => {
            tracing::debug!("Quiz in {label} got question {}", q.id);
            QUIZ_QUESTIONS_SERVED.with_label_values(&[label.as_str()]).inc();
        }
        None => {
            tracing::debug!("Quiz in {label} has no questions left");
            QUIZ_EXHAUSTED.with_label_values(&[label.as_str()]).inc();
        }
    }

    Ok(Json(QuizQuestionBody {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}
