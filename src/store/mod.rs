use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::Result;
use crate::models::application::Application;
use crate::models::job::Job;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Persistence seam for Jobs and Applications. Every service takes this as
/// an injected dependency so tests can substitute the in-memory store.
#[async_trait]
pub trait Store: Send + Sync {
    /// Newest first.
    async fn get_jobs(&self) -> Result<Vec<Job>>;

    async fn get_job(&self, id: Uuid) -> Result<Option<Job>>;

    /// Insert-or-replace by id.
    async fn save_job(&self, job: &Job) -> Result<()>;

    /// Submission order (oldest first).
    async fn get_applications(&self, job_id: Uuid) -> Result<Vec<Application>>;

    async fn get_application(&self, id: Uuid) -> Result<Option<Application>>;

    async fn save_application(&self, application: &Application) -> Result<()>;

    /// Replace-by-id; fails with NotFound when no such application exists.
    async fn update_application(&self, application: &Application) -> Result<()>;
}

pub type DynStore = Arc<dyn Store>;
