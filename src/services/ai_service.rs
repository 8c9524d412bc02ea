use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::models::form::{FieldType, FormField, FormSchema};
use crate::services::gemini::{text_part, GeminiClient};

/// Editable job draft produced from a recruiter's free-text prompt. Nothing
/// is persisted until the recruiter publishes.
#[derive(Debug, Clone, serde::Serialize)]
pub struct JobDraft {
    pub title: String,
    pub department: String,
    pub description: String,
    pub requirements: String,
    pub fields: FormSchema,
}

// Wire shape of an AI-drafted screening question. Whatever id the model may
// invent is not even deserialized; every field gets a fresh one.
#[derive(Debug, Deserialize)]
struct DraftField {
    label: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    options: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct DraftPayload {
    title: String,
    department: String,
    description: String,
    requirements: String,
    #[serde(default)]
    fields: Vec<DraftField>,
}

#[derive(Clone)]
pub struct AiService {
    gemini: GeminiClient,
}

impl AiService {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// One schema-constrained call, no retries; retry policy belongs to the
    /// caller. Any transport, JSON or schema failure surfaces as a
    /// generation error and no draft state is produced.
    pub async fn generate_job_details(&self, prompt: &str) -> Result<JobDraft> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(Error::BadRequest(
                "Describe the role you want to create".to_string(),
            ));
        }

        let instruction = format!(
            r#"You are an expert HR consultant.
Create a detailed job posting based on this user request: "{}".

Return a JSON object with:
- title: A professional job title.
- department: The most likely department.
- description: A compelling job description (approx 50 words).
- requirements: A list of key requirements (skills, experience) as a text block.
- fields: An array of 3-5 relevant screening questions to ask the applicant.
  For 'fields', include label, type (TEXT, TEXTAREA, NUMBER, DROPDOWN, MULTISELECT),
  required (boolean), and options (array of strings) if type is DROPDOWN/MULTISELECT."#,
            prompt
        );

        let raw = self
            .gemini
            .generate_json(vec![text_part(instruction)], job_draft_schema())
            .await?;

        let payload: DraftPayload = serde_json::from_value(raw).map_err(|e| {
            Error::Generation(format!("Gemini returned an unexpected draft shape: {}", e))
        })?;

        Ok(draft_from_payload(payload))
    }
}

fn draft_from_payload(payload: DraftPayload) -> JobDraft {
    let fields: Vec<FormField> = payload
        .fields
        .into_iter()
        .map(|f| FormField::from_draft(f.label, f.field_type, f.required, f.options))
        .collect();

    JobDraft {
        title: payload.title,
        department: payload.department,
        description: payload.description,
        requirements: payload.requirements,
        fields: fields.into(),
    }
}

fn job_draft_schema() -> JsonValue {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "department": { "type": "STRING" },
            "description": { "type": "STRING" },
            "requirements": { "type": "STRING" },
            "fields": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "enum": ["TEXT", "TEXTAREA", "NUMBER", "DROPDOWN", "MULTISELECT"]
                        },
                        "required": { "type": "BOOLEAN" },
                        "options": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["label", "type", "required"]
                }
            }
        },
        "required": ["title", "department", "description", "requirements", "fields"]
    })
}
