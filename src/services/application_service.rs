use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use bytes::Bytes;
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::models::application::{
    join_selections, Application, NO_RESUME_TEXT, PDF_MIME_TYPE,
};
use crate::models::form::{FieldKind, FormField};
use crate::models::job::Job;
use crate::store::DynStore;

/// Uploaded resume as the pipeline sees it: declared content type plus raw
/// bytes. Only the PDF content-type tag is ever inspected.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

/// One submitted answer. Multi-select questions arrive as structured arrays
/// and are only joined into the stored single-string form here.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Text(String),
    Selection(Vec<String>),
}

impl ResponseValue {
    fn into_answer(self) -> String {
        match self {
            ResponseValue::Text(text) => text,
            ResponseValue::Selection(selected) => join_selections(&selected),
        }
    }
}

#[derive(Debug, Validate)]
pub struct SubmissionInput {
    #[validate(length(min = 1, message = "Candidate name is required"))]
    pub candidate_name: String,
    #[validate(email(message = "A valid email address is required"))]
    pub candidate_email: String,
    pub responses: HashMap<String, ResponseValue>,
    pub resume: Option<ResumeUpload>,
    pub resume_text: Option<String>,
}

#[derive(Clone)]
pub struct ApplicationService {
    store: DynStore,
}

impl ApplicationService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Validates the input against the job's schema, applies the resume
    /// policy and persists the application. Store failures propagate as
    /// submission errors.
    pub async fn submit(&self, job_id: Uuid, input: SubmissionInput) -> Result<Application> {
        let job = self
            .store
            .get_job(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        input.validate()?;

        let (resume_text, resume_data, resume_mime_type) =
            apply_resume_policy(input.resume, input.resume_text)?;

        let responses: HashMap<String, String> = input
            .responses
            .into_iter()
            .map(|(field_id, value)| (field_id, value.into_answer()))
            .collect();
        check_responses(&job, &responses)?;

        let application = Application {
            id: Uuid::new_v4(),
            job_id: job.id,
            candidate_name: input.candidate_name,
            candidate_email: input.candidate_email,
            responses,
            resume_text: resume_text_or_placeholder(resume_text),
            resume_data,
            resume_mime_type,
            submitted_at: Utc::now(),
            ai_analysis: None,
        };

        self.store.save_application(&application).await?;
        tracing::info!(
            application_id = %application.id,
            job_id = %job.id,
            "Application submitted"
        );
        Ok(application)
    }

    /// Candidates for a job, best score first; unanalyzed applications sort
    /// as score 0.
    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<Application>> {
        let mut applications = self.store.get_applications(job_id).await?;
        applications.sort_by(|a, b| b.score().cmp(&a.score()));
        Ok(applications)
    }
}

/// Resume policy: a PDF upload is kept whole (base64) for multimodal
/// evaluation; any other file type is reduced to a name marker with no
/// content extraction; otherwise pasted text is used. One of the three must
/// be present.
fn apply_resume_policy(
    resume: Option<ResumeUpload>,
    resume_text: Option<String>,
) -> Result<(String, Option<String>, Option<String>)> {
    if let Some(upload) = resume {
        if upload.content_type == PDF_MIME_TYPE {
            return Ok((
                "PDF Resume Attached".to_string(),
                Some(BASE64.encode(&upload.data)),
                Some(PDF_MIME_TYPE.to_string()),
            ));
        }
        return Ok((
            format!("Document Attached: {}", upload.file_name),
            None,
            None,
        ));
    }

    match resume_text {
        Some(text) if !text.trim().is_empty() => Ok((text, None, None)),
        _ => Err(Error::BadRequest(
            "A resume is required: upload a file or paste resume text".to_string(),
        )),
    }
}

fn check_responses(job: &Job, responses: &HashMap<String, String>) -> Result<()> {
    for field in job.fields.iter() {
        let answer = responses
            .get(&field.id)
            .map(String::as_str)
            .unwrap_or("")
            .trim();

        if field.required && answer.is_empty() {
            return Err(Error::BadRequest(format!(
                "'{}' is required",
                display_label(field)
            )));
        }
        if matches!(field.kind, FieldKind::Number)
            && !answer.is_empty()
            && answer.parse::<f64>().is_err()
        {
            return Err(Error::BadRequest(format!(
                "'{}' must be a number",
                display_label(field)
            )));
        }
    }
    Ok(())
}

fn display_label(field: &FormField) -> &str {
    if field.label.is_empty() {
        &field.id
    } else {
        &field.label
    }
}

// Stored applications always carry at least a placeholder resume text.
fn resume_text_or_placeholder(text: String) -> String {
    if text.trim().is_empty() {
        NO_RESUME_TEXT.to_string()
    } else {
        text
    }
}
