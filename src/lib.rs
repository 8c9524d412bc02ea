pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;

use std::sync::Arc;

use crate::services::{
    ai_service::AiService, application_service::ApplicationService,
    assessment_service::AssessmentService, batch_service::BatchService, gemini::GeminiClient,
    job_service::JobService,
};
use crate::store::DynStore;

#[derive(Clone)]
pub struct AppState {
    pub store: DynStore,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub ai_service: AiService,
    pub batch_service: BatchService,
    pub ai_enabled: bool,
}

impl AppState {
    pub fn new(store: DynStore, gemini: GeminiClient) -> Self {
        let ai_enabled = gemini.is_enabled();
        let job_service = JobService::new(store.clone());
        let application_service = ApplicationService::new(store.clone());
        let ai_service = AiService::new(gemini.clone());
        let assessment_service = AssessmentService::new(gemini);
        let batch_service = BatchService::new(store.clone(), Arc::new(assessment_service));

        Self {
            store,
            job_service,
            application_service,
            ai_service,
            batch_service,
            ai_enabled,
        }
    }
}
