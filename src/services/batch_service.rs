use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::Application;
use crate::services::assessment_service::CandidateScorer;
use crate::store::DynStore;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct BatchOutcome {
    /// Applications scored during this run.
    pub analyzed: usize,
    /// Applications that already carried an analysis.
    pub skipped: usize,
}

/// Concurrency-1 assessment queue. The bound is a policy choice (limit load
/// on the AI service, keep store writes race-free), not an optimization; a
/// future revision may raise it.
#[derive(Clone)]
pub struct BatchService {
    store: DynStore,
    scorer: Arc<dyn CandidateScorer>,
}

impl BatchService {
    pub fn new(store: DynStore, scorer: Arc<dyn CandidateScorer>) -> Self {
        Self { store, scorer }
    }

    /// Scores every unanalyzed application for the job, strictly one at a
    /// time in submission order. Each result is persisted before the next
    /// request is issued; a fully analyzed set performs zero scoring calls.
    /// A store failure aborts the batch and propagates.
    pub async fn analyze_pending(&self, job_id: Uuid) -> Result<BatchOutcome> {
        let job = self
            .store
            .get_job(job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        let applications = self.store.get_applications(job_id).await?;

        let mut outcome = BatchOutcome {
            analyzed: 0,
            skipped: 0,
        };
        for mut application in applications {
            if application.ai_analysis.is_some() {
                outcome.skipped += 1;
                continue;
            }
            let analysis = self.scorer.analyze(&job, &application).await;
            application.ai_analysis = Some(analysis);
            self.store.update_application(&application).await?;
            outcome.analyzed += 1;
        }

        tracing::info!(
            %job_id,
            analyzed = outcome.analyzed,
            skipped = outcome.skipped,
            "Batch assessment finished"
        );
        Ok(outcome)
    }

    /// Scores one application now, overwriting any previous analysis whole.
    pub async fn analyze_one(&self, application_id: Uuid) -> Result<Application> {
        let mut application = self
            .store
            .get_application(application_id)
            .await?
            .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;
        let job = self
            .store
            .get_job(application.job_id)
            .await?
            .ok_or_else(|| Error::NotFound("Job for this application no longer exists".to_string()))?;

        let analysis = self.scorer.analyze(&job, &application).await;
        application.ai_analysis = Some(analysis);
        self.store.update_application(&application).await?;
        Ok(application)
    }
}
