use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::form::FormSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub department: String,
    pub description: String,
    /// Free-text ranking rubric; this is what candidate assessment scores
    /// against.
    pub requirements: String,
    pub fields: FormSchema,
    pub created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(
        title: String,
        department: String,
        description: String,
        requirements: String,
        fields: FormSchema,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            department,
            description,
            requirements,
            fields,
            created_at: Utc::now(),
        }
    }

    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.department.to_lowercase().contains(&term)
    }
}
