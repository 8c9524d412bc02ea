use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::models::application::{Application, CandidateAnalysis, PDF_MIME_TYPE};
use crate::models::job::Job;
use crate::services::gemini::{inline_data_part, text_part, GeminiClient};

/// Scoring seam between the batch orchestrator and the Gemini-backed
/// assessment. Infallible by contract: implementations degrade to the
/// sentinel analysis instead of returning errors.
#[async_trait]
pub trait CandidateScorer: Send + Sync {
    async fn analyze(&self, job: &Job, application: &Application) -> CandidateAnalysis;
}

/// What the evaluator gets to look at for a candidate. Exactly one branch
/// applies, in priority order: uploaded PDF, then pasted text, then nothing.
#[derive(Debug, PartialEq)]
pub enum ResumeEvidence<'a> {
    Document { mime_type: &'a str, data: &'a str },
    Text(&'a str),
    Missing,
}

pub fn resume_evidence(application: &Application) -> ResumeEvidence<'_> {
    if let (Some(data), Some(PDF_MIME_TYPE)) = (
        application.resume_data.as_deref(),
        application.resume_mime_type.as_deref(),
    ) {
        return ResumeEvidence::Document {
            mime_type: PDF_MIME_TYPE,
            data,
        };
    }
    let text = application.resume_text.trim();
    if !text.is_empty() {
        return ResumeEvidence::Text(text);
    }
    ResumeEvidence::Missing
}

#[derive(Clone)]
pub struct AssessmentService {
    gemini: GeminiClient,
}

impl AssessmentService {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    async fn request_analysis(
        &self,
        job: &Job,
        application: &Application,
    ) -> Result<CandidateAnalysis> {
        let raw = self
            .gemini
            .generate_json(build_assessment_parts(job, application), analysis_schema())
            .await?;
        let analysis: CandidateAnalysis = serde_json::from_value(raw).map_err(|e| {
            Error::Generation(format!("Gemini returned an unexpected analysis shape: {}", e))
        })?;
        Ok(analysis.sanitized())
    }
}

#[async_trait]
impl CandidateScorer for AssessmentService {
    async fn analyze(&self, job: &Job, application: &Application) -> CandidateAnalysis {
        match self.request_analysis(job, application).await {
            Ok(analysis) => analysis,
            Err(e) => {
                tracing::error!(
                    application_id = %application.id,
                    error = %e,
                    "Candidate assessment failed, recording sentinel analysis"
                );
                CandidateAnalysis::failure()
            }
        }
    }
}

/// Request parts for one evaluation: the rubric prompt, then the resume
/// evidence per the priority order above.
pub fn build_assessment_parts(job: &Job, application: &Application) -> Vec<JsonValue> {
    let prompt = format!(
        r#"Role: Expert Technical Recruiter.
Task: Evaluate a job application against a job description.

Job Title: {}
Job Description: {}
Key Requirements: {}

Candidate Name: {}
Candidate Form Responses:
{}

Output: Provide a structured JSON assessment.
- score: 0-100 (integer) representing fit.
- reasoning: A brief summary of why this score was given (max 2 sentences).
- strengths: Array of strings (key matching skills).
- weaknesses: Array of strings (missing skills or concerns)."#,
        job.title,
        job.description,
        job.requirements,
        application.candidate_name,
        render_responses(job, application),
    );

    let mut parts = vec![text_part(prompt)];
    match resume_evidence(application) {
        ResumeEvidence::Document { mime_type, data } => {
            parts.push(inline_data_part(mime_type, data));
            parts.push(text_part("Evaluate the attached resume PDF."));
        }
        ResumeEvidence::Text(text) => {
            parts.push(text_part(format!("Candidate Resume Text: \"{}\"", text)));
        }
        ResumeEvidence::Missing => {
            parts.push(text_part("No resume provided."));
        }
    }
    parts
}

// Labels answers with their question text; answers whose field was removed
// from the schema keep the raw field id.
fn render_responses(job: &Job, application: &Application) -> String {
    if application.responses.is_empty() {
        return "(no form responses)".to_string();
    }
    let mut lines: Vec<String> = application
        .responses
        .iter()
        .map(|(field_id, answer)| {
            let label = job
                .fields
                .get(field_id)
                .map(|f| f.label.as_str())
                .filter(|l| !l.is_empty())
                .unwrap_or(field_id.as_str());
            format!("- {}: {}", label, answer)
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

fn analysis_schema() -> JsonValue {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "INTEGER" },
            "reasoning": { "type": "STRING" },
            "strengths": { "type": "ARRAY", "items": { "type": "STRING" } },
            "weaknesses": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["score", "reasoning", "strengths", "weaknesses"]
    })
}
