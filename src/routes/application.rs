use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::services::application_service::{ResponseValue, ResumeUpload, SubmissionInput};
use crate::AppState;

/// Multipart submission: `name`, `email`, a `responses` JSON part mapping
/// field id to answer (string, or array of strings for multi-select), an
/// optional `resume` file part and an optional `resume_text` part.
pub async fn submit_application(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl axum::response::IntoResponse> {
    let mut candidate_name = String::new();
    let mut candidate_email = String::new();
    let mut responses: HashMap<String, ResponseValue> = HashMap::new();
    let mut resume = None;
    let mut resume_text = None;

    while let Some(field) = multipart.next_field().await? {
        let part_name = field.name().unwrap_or_default().to_string();
        match part_name.as_str() {
            "name" => candidate_name = field.text().await?,
            "email" => candidate_email = field.text().await?,
            "responses" => {
                let raw = field.text().await?;
                responses = serde_json::from_str(&raw).map_err(|e| {
                    Error::BadRequest(format!("Invalid responses payload: {}", e))
                })?;
            }
            "resume_text" => {
                let text = field.text().await?;
                if !text.trim().is_empty() {
                    resume_text = Some(text);
                }
            }
            "resume" => {
                let file_name = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                if !data.is_empty() {
                    resume = Some(ResumeUpload {
                        file_name,
                        content_type,
                        data,
                    });
                }
            }
            _ => {}
        }
    }

    let input = SubmissionInput {
        candidate_name,
        candidate_email,
        responses,
        resume,
        resume_text,
    };
    let application = state.application_service.submit(job_id, input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Candidates for a job, best score first.
pub async fn list_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse> {
    state.job_service.get(job_id).await?;
    let applications = state.application_service.list_for_job(job_id).await?;
    Ok(Json(applications))
}

pub async fn analyze_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse> {
    let application = state.batch_service.analyze_one(id).await?;
    Ok(Json(application))
}

pub async fn analyze_all(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse> {
    let outcome = state.batch_service.analyze_pending(job_id).await?;
    Ok(Json(outcome))
}
