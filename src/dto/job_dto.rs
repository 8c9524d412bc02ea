use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::form::FormSchema;
use crate::models::job::Job;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub fields: FormSchema,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct JobListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateJobPayload {
    pub prompt: String,
}

/// Dashboard row: the job plus how many candidates applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub field_count: usize,
    pub application_count: usize,
}

impl JobSummary {
    pub fn new(job: Job, application_count: usize) -> Self {
        Self {
            id: job.id,
            title: job.title,
            department: job.department,
            created_at: job.created_at,
            field_count: job.fields.len(),
            application_count,
        }
    }
}
