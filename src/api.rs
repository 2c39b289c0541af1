//! REST handlers for projects and tasks.
//!
//! Handlers are thin: they resolve the viewer language, run the body
//! through `entities`, and persist. Translation problems never change the
//! response status.

use crate::db::Database;
use crate::entities::{ProjectContent, ProjectView, TaskContent, TaskView};
use crate::i18n::{get_user_language, Language, LanguageRequest, MetricsReport, TranslationMetrics};
use crate::translation::TranslationProvider;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub provider: Arc<dyn TranslationProvider>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(e) => {
                error!("Request failed: {:#}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &self {
            ApiError::Internal(_) => "internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Optional `?lang=` override for the viewer language.
#[derive(Debug, Default, Deserialize)]
pub struct LangQuery {
    pub lang: Option<String>,
}

fn viewer_language(query: &LangQuery, headers: &HeaderMap) -> Language {
    get_user_language(&LanguageRequest::from_headers(query.lang.as_deref(), headers))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics/translation", get(translation_metrics))
        .route("/projects", post(create_project))
        .route("/projects/:id", get(get_project).patch(patch_project))
        .route("/projects/:id/tasks", post(create_task))
        .route("/tasks/:id", get(get_task).patch(patch_task))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn translation_metrics() -> Json<MetricsReport> {
    Json(TranslationMetrics::global().report())
}

// ==================== Projects ====================

async fn create_project(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<ProjectView>), ApiError> {
    let content = ProjectContent::create(state.provider.as_ref(), &body).await;
    if content.name.is_empty() {
        return Err(ApiError::BadRequest("name is required".to_string()));
    }

    let project = state.db.create_project(&content).await?;
    info!("Created project {}", project.id);

    Ok((StatusCode::CREATED, Json(project.view(viewer_language(&query, &headers)))))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Result<Json<ProjectView>, ApiError> {
    let project = state
        .db
        .get_project(id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    Ok(Json(project.view(viewer_language(&query, &headers))))
}

async fn patch_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<ProjectView>, ApiError> {
    let project = state
        .db
        .get_project(id)
        .await?
        .ok_or(ApiError::NotFound("project"))?;

    let Some(content) = project.content().patch(state.provider.as_ref(), &body).await else {
        return Ok(Json(project.view(viewer_language(&query, &headers))));
    };

    let project = state
        .db
        .update_project(id, &content)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    info!("Updated project {}", project.id);

    Ok(Json(project.view(viewer_language(&query, &headers))))
}

// ==================== Tasks ====================

async fn create_task(
    State(state): State<AppState>,
    Path(project_id): Path<i64>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<TaskView>), ApiError> {
    let content = TaskContent::create(state.provider.as_ref(), &body).await;
    if content.title.is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    let task = state
        .db
        .create_task(project_id, &content)
        .await?
        .ok_or(ApiError::NotFound("project"))?;
    info!("Created task {} in project {}", task.id, project_id);

    Ok((StatusCode::CREATED, Json(task.view(viewer_language(&query, &headers)))))
}

async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .db
        .get_task(id)
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    Ok(Json(task.view(viewer_language(&query, &headers))))
}

async fn patch_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LangQuery>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<TaskView>, ApiError> {
    let task = state
        .db
        .get_task(id)
        .await?
        .ok_or(ApiError::NotFound("task"))?;

    let Some(content) = task.content().patch(state.provider.as_ref(), &body).await else {
        return Ok(Json(task.view(viewer_language(&query, &headers))));
    };

    let task = state
        .db
        .update_task(id, &content)
        .await?
        .ok_or(ApiError::NotFound("task"))?;
    info!("Updated task {}", task.id);

    Ok(Json(task.view(viewer_language(&query, &headers))))
}
