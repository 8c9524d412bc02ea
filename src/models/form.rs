use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Answer delimiter for multi-select responses. Publish validation rejects
/// option text containing it, so splitting a stored answer is always exact.
pub const OPTION_DELIMITER: &str = ", ";

const PLACEHOLDER_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    Text,
    TextArea,
    Number,
    Dropdown,
    MultiSelect,
}

/// Per-type field payload. Only the option-backed kinds carry options, so an
/// invalid state like a TEXT field with options is unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum FieldKind {
    Text,
    TextArea,
    Number,
    Dropdown { options: Vec<String> },
    MultiSelect { options: Vec<String> },
}

impl FieldKind {
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text => FieldType::Text,
            FieldKind::TextArea => FieldType::TextArea,
            FieldKind::Number => FieldType::Number,
            FieldKind::Dropdown { .. } => FieldType::Dropdown,
            FieldKind::MultiSelect { .. } => FieldType::MultiSelect,
        }
    }

    pub fn options(&self) -> Option<&[String]> {
        match self {
            FieldKind::Dropdown { options } | FieldKind::MultiSelect { options } => {
                Some(options.as_slice())
            }
            _ => None,
        }
    }

    fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            FieldKind::Dropdown { options } | FieldKind::MultiSelect { options } => Some(options),
            _ => None,
        }
    }

    fn from_type(field_type: FieldType, options: Vec<String>) -> Self {
        let options = if options.is_empty() {
            PLACEHOLDER_OPTIONS.iter().map(|s| s.to_string()).collect()
        } else {
            options
        };
        match field_type {
            FieldType::Text => FieldKind::Text,
            FieldType::TextArea => FieldKind::TextArea,
            FieldType::Number => FieldKind::Number,
            FieldType::Dropdown => FieldKind::Dropdown { options },
            FieldType::MultiSelect => FieldKind::MultiSelect { options },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FormField {
    pub fn new() -> Self {
        Self {
            id: new_field_id(),
            label: String::new(),
            required: false,
            kind: FieldKind::Text,
        }
    }

    /// Builds a field from loose draft attributes (e.g. an AI-generated
    /// draft), always with a freshly generated id.
    pub fn from_draft(
        label: String,
        field_type: FieldType,
        required: bool,
        options: Option<Vec<String>>,
    ) -> Self {
        Self {
            id: new_field_id(),
            label,
            required,
            kind: match field_type {
                FieldType::Dropdown | FieldType::MultiSelect => {
                    FieldKind::from_type(field_type, options.unwrap_or_default())
                }
                _ => FieldKind::from_type(field_type, Vec::new()),
            },
        }
    }
}

impl Default for FormField {
    fn default() -> Self {
        Self::new()
    }
}

pub fn new_field_id() -> String {
    format!("field-{}", Uuid::new_v4())
}

/// Ordered application-form schema of a Job. Field order is presentation
/// order; all ids are unique for the life of the Job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormSchema(pub Vec<FormField>);

impl FormSchema {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormField> {
        self.0.iter()
    }

    pub fn get(&self, id: &str) -> Option<&FormField> {
        self.0.iter().find(|f| f.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut FormField> {
        self.0.iter_mut().find(|f| f.id == id)
    }

    /// Appends a blank Text field and returns its id.
    pub fn add_field(&mut self) -> String {
        let field = FormField::new();
        let id = field.id.clone();
        self.0.push(field);
        id
    }

    pub fn set_label(&mut self, id: &str, label: impl Into<String>) {
        if let Some(field) = self.get_mut(id) {
            field.label = label.into();
        }
    }

    pub fn set_required(&mut self, id: &str, required: bool) {
        if let Some(field) = self.get_mut(id) {
            field.required = required;
        }
    }

    /// Converts a field to another type. Options survive a switch between the
    /// two option-backed kinds; switching from a plain kind seeds placeholder
    /// options for the author to edit.
    pub fn set_type(&mut self, id: &str, field_type: FieldType) {
        if let Some(field) = self.get_mut(id) {
            if field.kind.field_type() == field_type {
                return;
            }
            let carried = field.kind.options().map(|o| o.to_vec());
            field.kind = match field_type {
                FieldType::Dropdown | FieldType::MultiSelect => {
                    FieldKind::from_type(field_type, carried.unwrap_or_default())
                }
                _ => FieldKind::from_type(field_type, Vec::new()),
            };
        }
    }

    /// Moves one field from `from` to `to`, preserving the relative order of
    /// every other field. Out-of-range indices are ignored.
    pub fn move_field(&mut self, from: usize, to: usize) {
        if from >= self.0.len() || to >= self.0.len() || from == to {
            return;
        }
        let field = self.0.remove(from);
        self.0.insert(to, field);
    }

    /// Removes the field. Responses already submitted against it are kept as
    /// orphaned keys on their Applications.
    pub fn remove_field(&mut self, id: &str) {
        self.0.retain(|f| f.id != id);
    }

    pub fn add_option(&mut self, id: &str) {
        if let Some(options) = self.get_mut(id).and_then(|f| f.kind.options_mut()) {
            options.push(format!("Option {}", options.len() + 1));
        }
    }

    pub fn set_option(&mut self, id: &str, index: usize, value: impl Into<String>) {
        if let Some(options) = self.get_mut(id).and_then(|f| f.kind.options_mut()) {
            if let Some(slot) = options.get_mut(index) {
                *slot = value.into();
            }
        }
    }

    pub fn remove_option(&mut self, id: &str, index: usize) {
        if let Some(options) = self.get_mut(id).and_then(|f| f.kind.options_mut()) {
            if index < options.len() {
                options.remove(index);
            }
        }
    }

    /// Publish-time validation: labels present, ids unique, option kinds have
    /// at least one option, and no option text contains the answer delimiter.
    pub fn validate_for_publish(&self) -> Result<(), String> {
        let mut seen = std::collections::HashSet::new();
        for field in &self.0 {
            if !seen.insert(field.id.as_str()) {
                return Err(format!("Duplicate field id '{}'", field.id));
            }
            if field.label.trim().is_empty() {
                return Err("Every question needs a label before publishing".to_string());
            }
            if let Some(options) = field.kind.options() {
                if options.is_empty() {
                    return Err(format!("'{}' needs at least one option", field.label));
                }
                if let Some(bad) = options.iter().find(|o| o.contains(OPTION_DELIMITER)) {
                    return Err(format!(
                        "Option '{}' of '{}' must not contain '{}'",
                        bad, field.label, OPTION_DELIMITER
                    ));
                }
            }
        }
        Ok(())
    }
}

impl From<Vec<FormField>> for FormSchema {
    fn from(fields: Vec<FormField>) -> Self {
        Self(fields)
    }
}
