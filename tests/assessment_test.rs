use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use talentscout_backend::models::application::{Application, CandidateAnalysis};
use talentscout_backend::models::form::{FieldKind, FormField, FormSchema};
use talentscout_backend::models::job::Job;
use talentscout_backend::services::assessment_service::{
    build_assessment_parts, resume_evidence, AssessmentService, CandidateScorer, ResumeEvidence,
};
use talentscout_backend::services::gemini::GeminiClient;

fn sample_job() -> Job {
    let fields = FormSchema::from(vec![FormField {
        id: "f1".to_string(),
        label: "Years of experience".to_string(),
        required: true,
        kind: FieldKind::Number,
    }]);
    Job::new(
        "Backend Engineer".to_string(),
        "Engineering".to_string(),
        "Build the platform.".to_string(),
        "Rust, SQL, 5+ years".to_string(),
        fields,
    )
}

fn sample_application(job: &Job) -> Application {
    Application {
        id: Uuid::new_v4(),
        job_id: job.id,
        candidate_name: "Jane Doe".to_string(),
        candidate_email: "jane@x.com".to_string(),
        responses: HashMap::from([("f1".to_string(), "5".to_string())]),
        resume_text: "10 years of Rust.".to_string(),
        resume_data: None,
        resume_mime_type: None,
        submitted_at: Utc::now(),
        ai_analysis: None,
    }
}

#[test]
fn pdf_evidence_wins_over_resume_text() {
    let job = sample_job();
    let mut application = sample_application(&job);
    application.resume_data = Some("cGRmIGJ5dGVz".to_string());
    application.resume_mime_type = Some("application/pdf".to_string());

    // Both data and text are set; the document must be chosen.
    assert_eq!(
        resume_evidence(&application),
        ResumeEvidence::Document {
            mime_type: "application/pdf",
            data: "cGRmIGJ5dGVz",
        }
    );

    let parts = build_assessment_parts(&job, &application);
    assert_eq!(parts[1]["inlineData"]["mimeType"], "application/pdf");
    assert_eq!(parts[1]["inlineData"]["data"], "cGRmIGJ5dGVz");
    assert_eq!(parts[2]["text"], "Evaluate the attached resume PDF.");
}

#[test]
fn resume_text_is_used_when_no_pdf_is_attached() {
    let job = sample_job();
    let application = sample_application(&job);

    assert_eq!(
        resume_evidence(&application),
        ResumeEvidence::Text("10 years of Rust.")
    );

    let parts = build_assessment_parts(&job, &application);
    assert_eq!(parts.len(), 2);
    assert_eq!(
        parts[1]["text"],
        "Candidate Resume Text: \"10 years of Rust.\""
    );
}

#[test]
fn missing_resume_is_stated_explicitly() {
    let job = sample_job();
    let mut application = sample_application(&job);
    application.resume_text = "   ".to_string();

    assert_eq!(resume_evidence(&application), ResumeEvidence::Missing);

    let parts = build_assessment_parts(&job, &application);
    assert_eq!(parts[1]["text"], "No resume provided.");
}

#[test]
fn a_stale_mime_type_without_data_does_not_count_as_a_document() {
    let job = sample_job();
    let mut application = sample_application(&job);
    application.resume_mime_type = Some("application/pdf".to_string());

    assert_eq!(
        resume_evidence(&application),
        ResumeEvidence::Text("10 years of Rust.")
    );
}

#[test]
fn prompt_carries_rubric_and_labeled_responses() {
    let job = sample_job();
    let mut application = sample_application(&job);
    application
        .responses
        .insert("ghost-field".to_string(), "orphaned answer".to_string());

    let parts = build_assessment_parts(&job, &application);
    let prompt = parts[0]["text"].as_str().unwrap();

    assert!(prompt.contains("Job Title: Backend Engineer"));
    assert!(prompt.contains("Key Requirements: Rust, SQL, 5+ years"));
    assert!(prompt.contains("Candidate Name: Jane Doe"));
    assert!(prompt.contains("- Years of experience: 5"));
    // Answers whose field was removed keep the raw id.
    assert!(prompt.contains("- ghost-field: orphaned answer"));
}

#[test]
fn scores_are_clamped_into_the_contract_range() {
    let over = CandidateAnalysis {
        score: 250,
        reasoning: "r".to_string(),
        strengths: vec![],
        weaknesses: vec![],
    };
    assert_eq!(over.sanitized().score, 100);

    let under = CandidateAnalysis {
        score: -3,
        reasoning: "r".to_string(),
        strengths: vec![],
        weaknesses: vec![],
    };
    assert_eq!(under.sanitized().score, 0);
}

#[tokio::test]
async fn assessment_failure_degrades_to_the_sentinel_analysis() {
    let job = sample_job();
    let application = sample_application(&job);

    // Disabled client: every call fails, which must surface as the sentinel
    // result rather than an error.
    let service = AssessmentService::new(GeminiClient::disabled());
    let analysis = service.analyze(&job, &application).await;

    assert_eq!(analysis.score, 0);
    assert!(!analysis.reasoning.is_empty());
    assert!(analysis.strengths.is_empty());
    assert!(analysis.weaknesses.is_empty());
}

#[test]
fn corrupted_analysis_payloads_do_not_parse() {
    // The service falls back to the sentinel whenever the constrained
    // response fails to deserialize; these are the shapes that must fail.
    assert!(serde_json::from_value::<CandidateAnalysis>(serde_json::json!({
        "score": "high", "reasoning": "r", "strengths": [], "weaknesses": []
    }))
    .is_err());
    assert!(serde_json::from_value::<CandidateAnalysis>(serde_json::json!({
        "reasoning": "missing score", "strengths": [], "weaknesses": []
    }))
    .is_err());
}
