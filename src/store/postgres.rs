use async_trait::async_trait;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, CandidateAnalysis};
use crate::models::job::Job;
use crate::store::Store;

/// Production store. Form schemas, responses and analyses live in JSONB
/// columns; everything else is flat.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn job_from_row(row: &PgRow) -> Result<Job> {
    let fields: JsonValue = row.try_get("fields")?;
    Ok(Job {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        department: row.try_get("department")?,
        description: row.try_get("description")?,
        requirements: row.try_get("requirements")?,
        fields: serde_json::from_value(fields)?,
        created_at: row.try_get("created_at")?,
    })
}

fn application_from_row(row: &PgRow) -> Result<Application> {
    let responses: JsonValue = row.try_get("responses")?;
    let ai_analysis: Option<JsonValue> = row.try_get("ai_analysis")?;
    let ai_analysis = ai_analysis
        .map(serde_json::from_value::<CandidateAnalysis>)
        .transpose()?;
    Ok(Application {
        id: row.try_get("id")?,
        job_id: row.try_get("job_id")?,
        candidate_name: row.try_get("candidate_name")?,
        candidate_email: row.try_get("candidate_email")?,
        responses: serde_json::from_value(responses)?,
        resume_text: row.try_get("resume_text")?,
        resume_data: row.try_get("resume_data")?,
        resume_mime_type: row.try_get("resume_mime_type")?,
        submitted_at: row.try_get("submitted_at")?,
        ai_analysis,
    })
}

#[async_trait]
impl Store for PgStore {
    async fn get_jobs(&self) -> Result<Vec<Job>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, department, description, requirements, fields, created_at
            FROM jobs
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(job_from_row).collect()
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        let row = sqlx::query(
            r#"
            SELECT id, title, department, description, requirements, fields, created_at
            FROM jobs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(job_from_row).transpose()
    }

    async fn save_job(&self, job: &Job) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO jobs (id, title, department, description, requirements, fields, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                department = EXCLUDED.department,
                description = EXCLUDED.description,
                requirements = EXCLUDED.requirements,
                fields = EXCLUDED.fields
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(&job.department)
        .bind(&job.description)
        .bind(&job.requirements)
        .bind(serde_json::to_value(&job.fields)?)
        .bind(job.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get_applications(&self, job_id: Uuid) -> Result<Vec<Application>> {
        let rows = sqlx::query(
            r#"
            SELECT id, job_id, candidate_name, candidate_email, responses,
                   resume_text, resume_data, resume_mime_type, submitted_at, ai_analysis
            FROM applications
            WHERE job_id = $1
            ORDER BY submitted_at ASC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(application_from_row).collect()
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>> {
        let row = sqlx::query(
            r#"
            SELECT id, job_id, candidate_name, candidate_email, responses,
                   resume_text, resume_data, resume_mime_type, submitted_at, ai_analysis
            FROM applications
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(application_from_row).transpose()
    }

    async fn save_application(&self, application: &Application) -> Result<()> {
        let ai_analysis = application
            .ai_analysis
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;
        sqlx::query(
            r#"
            INSERT INTO applications (
                id, job_id, candidate_name, candidate_email, responses,
                resume_text, resume_data, resume_mime_type, submitted_at, ai_analysis
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(application.id)
        .bind(application.job_id)
        .bind(&application.candidate_name)
        .bind(&application.candidate_email)
        .bind(serde_json::to_value(&application.responses)?)
        .bind(&application.resume_text)
        .bind(&application.resume_data)
        .bind(&application.resume_mime_type)
        .bind(application.submitted_at)
        .bind(ai_analysis)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_application(&self, application: &Application) -> Result<()> {
        let ai_analysis = application
            .ai_analysis
            .as_ref()
            .map(serde_json::to_value)
            .transpose()?;
        let result = sqlx::query(
            r#"
            UPDATE applications SET
                candidate_name = $2,
                candidate_email = $3,
                responses = $4,
                resume_text = $5,
                resume_data = $6,
                resume_mime_type = $7,
                ai_analysis = $8
            WHERE id = $1
            "#,
        )
        .bind(application.id)
        .bind(&application.candidate_name)
        .bind(&application.candidate_email)
        .bind(serde_json::to_value(&application.responses)?)
        .bind(&application.resume_text)
        .bind(&application.resume_data)
        .bind(&application.resume_mime_type)
        .bind(ai_analysis)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Application not found".to_string()));
        }
        Ok(())
    }
}
