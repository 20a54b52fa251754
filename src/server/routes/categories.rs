use std::collections::BTreeMap;

use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{categories, questions},
        Category, Question,
    },
    server::app::AppState,
};

use super::{ApiError, ApiResponse};

pub type CategoryMap = BTreeMap<String, String>;

pub fn category_map(categories: Vec<Category>) -> CategoryMap {
    categories
        .into_iter()
        .map(|c| (c.id.to_string(), c.kind))
        .collect()
}

#[derive(Serialize)]
struct CategoriesBody {
    success: bool,
    categories: CategoryMap,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    success: bool,
    questions: Vec<Question>,
    #[serde(rename = "totalQuestions")]
    total_questions_camel: usize,
    total_questions: usize,
    #[serde(rename = "currentCategory")]
    current_category_camel: String,
    current_category: String,
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoriesBody>> {
    let categories = categories::get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(CategoriesBody {
        success: true,
        categories: category_map(categories),
    }))
}

async fn questions_for_category(
    State(pool): State<SqlitePool>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<CategoryQuestionsBody>> {
    let Path(id) = id?;
    let category = categories::get_category(&pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;

    let questions = questions::get_questions_for_category(&pool, category.id).await?;
    let total = questions.len();
    Ok(Json(CategoryQuestionsBody {
        success: true,
        questions,
        total_questions_camel: total,
        total_questions: total,
        current_category_camel: category.kind.clone(),
        current_category: category.kind,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/{id}/questions", get(questions_for_category))
        .with_state(state)
}
