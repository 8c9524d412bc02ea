use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::models::form::OPTION_DELIMITER;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const NO_RESUME_TEXT: &str = "No resume text provided.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: Uuid,
    /// May dangle: Jobs are never deleted by this workflow, but nothing
    /// enforces the reference at the storage layer.
    pub job_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    /// Field id -> answer. Multi-select answers are a single
    /// delimiter-joined string; see [`join_selections`].
    pub responses: HashMap<String, String>,
    pub resume_text: String,
    /// Base64 of the uploaded file, present only for PDF uploads.
    pub resume_data: Option<String>,
    pub resume_mime_type: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub ai_analysis: Option<CandidateAnalysis>,
}

impl Application {
    /// Ranking score; unanalyzed applications sort as zero.
    pub fn score(&self) -> i32 {
        self.ai_analysis.as_ref().map(|a| a.score).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateAnalysis {
    pub score: i32,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

impl CandidateAnalysis {
    /// Clamps the score into the contractual 0-100 range.
    pub fn sanitized(mut self) -> Self {
        self.score = self.score.clamp(0, 100);
        self
    }

    /// Sentinel returned when assessment fails; scored batches keep moving
    /// instead of halting on one bad document.
    pub fn failure() -> Self {
        Self {
            score: 0,
            reasoning: "AI analysis failed due to a technical error or invalid file format."
                .to_string(),
            strengths: Vec::new(),
            weaknesses: Vec::new(),
        }
    }
}

pub fn join_selections(selected: &[String]) -> String {
    selected.join(OPTION_DELIMITER)
}

pub fn split_selections(answer: &str) -> Vec<String> {
    if answer.is_empty() {
        return Vec::new();
    }
    answer
        .split(OPTION_DELIMITER)
        .map(|s| s.to_string())
        .collect()
}
