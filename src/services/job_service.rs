use uuid::Uuid;
use validator::Validate;

use crate::dto::job_dto::{CreateJobPayload, JobSummary};
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::store::DynStore;

#[derive(Clone)]
pub struct JobService {
    store: DynStore,
}

impl JobService {
    pub fn new(store: DynStore) -> Self {
        Self { store }
    }

    /// Publishes a job. Schema validation happens here, once, at the publish
    /// boundary; drafts may hold transiently-invalid schemas.
    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        payload.validate()?;
        payload
            .fields
            .validate_for_publish()
            .map_err(Error::BadRequest)?;

        let job = Job::new(
            payload.title,
            payload.department,
            payload.description,
            payload.requirements,
            payload.fields,
        );
        self.store.save_job(&job).await?;
        tracing::info!(job_id = %job.id, title = %job.title, "Job published");
        Ok(job)
    }

    /// Job board listing, optionally filtered on title/department.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Job>> {
        let jobs = self.store.get_jobs().await?;
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => Ok(jobs.into_iter().filter(|j| j.matches_search(term)).collect()),
            None => Ok(jobs),
        }
    }

    /// Recruiter dashboard listing with per-job application counts.
    pub async fn list_with_counts(&self) -> Result<Vec<JobSummary>> {
        let jobs = self.store.get_jobs().await?;
        let mut summaries = Vec::with_capacity(jobs.len());
        for job in jobs {
            let application_count = self.store.get_applications(job.id).await?.len();
            summaries.push(JobSummary::new(job, application_count));
        }
        Ok(summaries)
    }

    pub async fn get(&self, id: Uuid) -> Result<Job> {
        self.store
            .get_job(id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }
}
