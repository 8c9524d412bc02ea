pub mod ai_service;
pub mod application_service;
pub mod assessment_service;
pub mod batch_service;
pub mod gemini;
pub mod job_service;
