use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::models::application::Application;
use crate::models::job::Job;
use crate::store::Store;

/// In-memory store used by tests and by DB-less demo runs. Data does not
/// survive a restart.
#[derive(Default)]
pub struct MemoryStore {
    jobs: RwLock<HashMap<Uuid, Job>>,
    applications: RwLock<HashMap<Uuid, Application>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn get_jobs(&self) -> Result<Vec<Job>> {
        let jobs = self.jobs.read().expect("job map lock poisoned");
        let mut items: Vec<Job> = jobs.values().cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>> {
        let jobs = self.jobs.read().expect("job map lock poisoned");
        Ok(jobs.get(&id).cloned())
    }

    async fn save_job(&self, job: &Job) -> Result<()> {
        let mut jobs = self.jobs.write().expect("job map lock poisoned");
        jobs.insert(job.id, job.clone());
        Ok(())
    }

    async fn get_applications(&self, job_id: Uuid) -> Result<Vec<Application>> {
        let applications = self
            .applications
            .read()
            .expect("application map lock poisoned");
        let mut items: Vec<Application> = applications
            .values()
            .filter(|a| a.job_id == job_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| a.submitted_at.cmp(&b.submitted_at));
        Ok(items)
    }

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>> {
        let applications = self
            .applications
            .read()
            .expect("application map lock poisoned");
        Ok(applications.get(&id).cloned())
    }

    async fn save_application(&self, application: &Application) -> Result<()> {
        let mut applications = self
            .applications
            .write()
            .expect("application map lock poisoned");
        applications.insert(application.id, application.clone());
        Ok(())
    }

    async fn update_application(&self, application: &Application) -> Result<()> {
        let mut applications = self
            .applications
            .write()
            .expect("application map lock poisoned");
        match applications.get_mut(&application.id) {
            Some(existing) => {
                *existing = application.clone();
                Ok(())
            }
            None => Err(crate::error::Error::NotFound(
                "Application not found".to_string(),
            )),
        }
    }
}
