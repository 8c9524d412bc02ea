use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, GenerateJobPayload, JobListQuery};
use crate::error::Result;
use crate::AppState;

pub async fn list_public_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl axum::response::IntoResponse> {
    let jobs = state.job_service.list(query.search.as_deref()).await?;
    Ok(Json(jobs))
}

pub async fn get_public_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}

pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl axum::response::IntoResponse> {
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn list_admin_jobs(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse> {
    let summaries = state.job_service.list_with_counts().await?;
    Ok(Json(summaries))
}

pub async fn generate_job_details(
    State(state): State<AppState>,
    Json(payload): Json<GenerateJobPayload>,
) -> Result<impl axum::response::IntoResponse> {
    let draft = state.ai_service.generate_job_details(&payload.prompt).await?;
    Ok(Json(draft))
}
