use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::{Map, Value};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        NewQuestion, Question,
    },
    server::{
        app::AppState,
        deserializers::{default_page, deserialize_page},
        pagination::paginate,
    },
};

use super::{
    categories::{category_map, CategoryMap},
    ApiError, ApiResponse,
};

#[derive(Deserialize)]
struct PageQuery {
    #[serde(default = "default_page", deserialize_with = "deserialize_page")]
    page: i64,
}

/// Fields of the create branch, only read once searchTerm is known to be unset.
#[derive(Deserialize)]
struct CreateBody {
    #[serde(default)]
    question: Option<String>,
    #[serde(default)]
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

impl CreateBody {
    /// Every field has to be present and non-empty / non-zero.
    fn into_new_question(self) -> Option<NewQuestion> {
        let question = self.question.filter(|q| !q.is_empty())?;
        let answer = self.answer.filter(|a| !a.is_empty())?;
        let category = self.category.filter(|c| *c != 0)?;
        let difficulty = self.difficulty.filter(|d| *d != 0)?;
        Some(NewQuestion {
            question,
            answer,
            category,
            difficulty,
        })
    }
}

// one endpoint both searches and creates, a non-empty searchTerm picks the search
fn search_term(body: &Map<String, Value>) -> Result<Option<&str>, ApiError> {
    match body.get("searchTerm") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(term)) if term.is_empty() => Ok(None),
        Some(Value::String(term)) => Ok(Some(term.as_str())),
        Some(other) => {
            tracing::debug!("searchTerm is not a string: {other}");
            Err(ApiError::BadRequest)
        }
    }
}

#[derive(Serialize)]
struct QuestionsPageBody {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions_camel: usize,
    total_questions: usize,
    #[serde(rename = "currentCategory")]
    current_category_camel: Option<String>,
    current_category: Option<String>,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct SearchBody {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions_camel: usize,
    total_questions: usize,
    #[serde(rename = "currentCategory")]
    current_category_camel: Option<String>,
    current_category: Option<String>,
}

#[derive(Serialize)]
struct CreatedBody {
    success: bool,
    created: i64,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions_camel: usize,
    total_questions: usize,
}

#[derive(Serialize)]
struct DeletedBody {
    success: bool,
    deleted: i64,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<QuestionsPageBody>> {
    let Query(PageQuery { page }) = query?;
    let all = questions::get_all_questions(&pool).await?;
    let current = paginate(page, &all).to_vec();
    if current.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = categories::get_all_categories(&pool).await?;
    Ok(Json(QuestionsPageBody {
        success: true,
        questions: current,
        total_questions_camel: all.len(),
        total_questions: all.len(),
        current_category_camel: None,
        current_category: None,
        categories: category_map(categories),
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<DeletedBody>> {
    let Path(id) = id?;
    if questions::get_question(&pool, id).await?.is_none() {
        return Err(ApiError::NotFound);
    }

    let deleted = questions::delete_question(&pool, id)
        .await
        .map_err(ApiError::Unprocessable)?;
    if !deleted {
        return Err(ApiError::NotFound);
    }
    tracing::info!("Deleted question {id}");
    Ok(Json(DeletedBody {
        success: true,
        deleted: id,
    }))
}

async fn create_or_search_questions(
    State(pool): State<SqlitePool>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResponse<Response> {
    let Json(body) = body?;
    let Value::Object(body) = body else {
        return Err(ApiError::BadRequest);
    };

    if let Some(term) = search_term(&body)? {
        let found = questions::search_questions(&pool, term).await?;
        let total = found.len();
        let response = SearchBody {
            success: true,
            questions: found,
            total_questions_camel: total,
            total_questions: total,
            current_category_camel: None,
            current_category: None,
        };
        return Ok(Json(response).into_response());
    }

    let new_question = CreateBody::deserialize(&Value::Object(body))
        .map_err(|e| {
            tracing::debug!("Malformed question: {e}");
            ApiError::BadRequest
        })?
        .into_new_question()
        .ok_or(ApiError::BadRequest)?;
    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::Unprocessable)?;
    tracing::info!("Created question {id}");

    let all = questions::get_all_questions(&pool)
        .await
        .map_err(ApiError::Unprocessable)?;
    let response = CreatedBody {
        success: true,
        created: id,
        questions: paginate(1, &all).to_vec(),
        total_questions_camel: all.len(),
        total_questions: all.len(),
    };
    Ok((StatusCode::CREATED, Json(response)).into_response())
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search_questions))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
