use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::{DomainError, DomainResult, Record};

/// Status given to every submission when it is created.
pub const STATUS_NEW: &str = "new";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubmissionId(pub String);

impl SubmissionId {
    /// Random v4 identifier, generated on the client at submission time.
    pub fn generate() -> Self {
        SubmissionId(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SubmissionId {
    fn from(s: &str) -> Self {
        SubmissionId(s.to_string())
    }
}

/// One inbound message, as stored in the `contactsubmissions` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(rename = "_id")]
    pub id: SubmissionId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(deserialize_with = "cms_timestamp::deserialize")]
    pub submission_date: DateTime<Utc>,
    pub status: String,
}

impl Record for ContactSubmission {
    const COLLECTION: &'static str = "contactsubmissions";
}

impl ContactSubmission {
    pub fn from_form(form: &ContactForm, submitted_at: DateTime<Utc>) -> Self {
        Self {
            id: SubmissionId::generate(),
            name: form.name.clone(),
            email: form.email.clone(),
            subject: form.subject.clone(),
            message: form.message.clone(),
            submission_date: submitted_at,
            status: STATUS_NEW.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Subject => "Subject",
            FormField::Message => "Message",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            FormField::Name => "Your full name",
            FormField::Email => "your.email@example.com",
            FormField::Subject => "What's this about?",
            FormField::Message => "Tell me about your project or inquiry...",
        }
    }
}

/// The four user-editable fields of the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Required-field and email-shape checks, the same ones a browser runs
    /// natively before letting a form submit.
    pub fn validate(&self) -> DomainResult<()> {
        for field in FormField::ALL {
            if self.field(field).is_empty() {
                return Err(DomainError::MissingField(field.label().to_string()));
            }
        }

        if !looks_like_email(&self.email) {
            return Err(DomainError::InvalidEmail(self.email.clone()));
        }

        Ok(())
    }
}

/// Timestamps come back as RFC 3339 strings or wrapped as `{"$date": "..."}`.
mod cms_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, Deserialize, Deserializer};
    use serde_json::Value;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        parse_value(&value)
            .ok_or_else(|| D::Error::custom(format!("expected an RFC 3339 timestamp, got {value}")))
    }

    fn parse_value(value: &Value) -> Option<DateTime<Utc>> {
        match value {
            Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
                .map(|dt| dt.with_timezone(&Utc))
                .ok(),
            Value::Object(map) => map.get("$date").and_then(parse_value),
            _ => None,
        }
    }
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ContactForm {
        ContactForm {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Test message".to_string(),
        }
    }

    #[test]
    fn test_submission_from_form() {
        let now = Utc::now();
        let submission = ContactSubmission::from_form(&filled_form(), now);

        assert_eq!(submission.name, "Jane Doe");
        assert_eq!(submission.status, STATUS_NEW);
        assert_eq!(submission.submission_date, now);
        assert!(Uuid::parse_str(&submission.id.0).is_ok());
    }

    #[test]
    fn test_generated_ids_differ() {
        let now = Utc::now();
        let a = ContactSubmission::from_form(&filled_form(), now);
        let b = ContactSubmission::from_form(&filled_form(), now);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_serializes_cms_field_names() {
        let submission = ContactSubmission::from_form(&filled_form(), Utc::now());
        let value = serde_json::to_value(&submission).unwrap();

        assert!(value.get("_id").is_some());
        assert!(value.get("submissionDate").is_some());
        assert_eq!(value["status"], "new");
        assert_eq!(value["email"], "jane@example.com");
    }

    #[test]
    fn test_reads_date_wrapped_timestamp() {
        let submission: ContactSubmission = serde_json::from_value(serde_json::json!({
            "_id": "s-1",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "subject": "Hello",
            "message": "Test message",
            "submissionDate": { "$date": "2025-03-04T05:06:07.123Z" },
            "status": "new",
        }))
        .unwrap();

        assert_eq!(
            submission.submission_date.to_rfc3339(),
            "2025-03-04T05:06:07.123+00:00"
        );

        let plain: Result<ContactSubmission, _> = serde_json::from_value(serde_json::json!({
            "_id": "s-2",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "subject": "Hello",
            "message": "Test message",
            "submissionDate": 42,
            "status": "new",
        }));
        assert!(plain.is_err());
    }

    #[test]
    fn test_validate_reports_first_missing_field() {
        let mut form = filled_form();
        form.subject.clear();
        assert_eq!(
            form.validate(),
            Err(DomainError::MissingField("Subject".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let mut form = filled_form();
        form.email = "jane.example.com".to_string();
        assert!(matches!(form.validate(), Err(DomainError::InvalidEmail(_))));

        form.email = "jane@".to_string();
        assert!(matches!(form.validate(), Err(DomainError::InvalidEmail(_))));
    }

    #[test]
    fn test_clear_empties_all_fields() {
        let mut form = filled_form();
        assert!(form.validate().is_ok());
        form.clear();
        for field in FormField::ALL {
            assert_eq!(form.field(field), "");
        }
    }
}
