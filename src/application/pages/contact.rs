use chrono::{DateTime, Utc};

use crate::application::AppResult;
use crate::domain::{ContactForm, ContactSubmission, DomainResult, FormField};

pub const SUBMIT_SUCCESS_MESSAGE: &str = "Thank you for your message! I'll get back to you soon.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Idle,
    /// A create call is outstanding; the submit control is disabled
    Submitting,
    Success,
    Error(String),
}

/// State behind the contact page form.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactController {
    form: ContactForm,
    status: SubmitStatus,
}

impl Default for ContactController {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactController {
    pub fn new() -> Self {
        Self {
            form: ContactForm::default(),
            status: SubmitStatus::Idle,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    pub fn can_submit(&self) -> bool {
        self.status != SubmitStatus::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.can_submit() {
            "Send Message"
        } else {
            "Sending..."
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.form.field_mut(field) = value.into();
    }

    pub fn push_char(&mut self, field: FormField, c: char) {
        self.form.field_mut(field).push(c);
    }

    pub fn pop_char(&mut self, field: FormField) {
        self.form.field_mut(field).pop();
    }

    /// Start a submission. `Ok(None)` means one is already outstanding and
    /// this attempt is dropped; validation failures leave the status alone.
    pub fn begin_submit(&mut self, now: DateTime<Utc>) -> DomainResult<Option<ContactSubmission>> {
        if !self.can_submit() {
            tracing::debug!("Submit ignored, a submission is already in flight");
            return Ok(None);
        }

        self.form.validate()?;

        self.status = SubmitStatus::Submitting;
        Ok(Some(ContactSubmission::from_form(&self.form, now)))
    }

    pub fn complete_submit(&mut self, result: AppResult<ContactSubmission>) {
        match result {
            Ok(_) => {
                self.status = SubmitStatus::Success;
                self.form.clear();
            }
            Err(e) => {
                tracing::warn!("Contact submission failed: {}", e);
                self.status = SubmitStatus::Error(format!("Your message could not be sent: {e}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::SiteService;
    use crate::domain::{DomainError, STATUS_NEW};
    use crate::ports::{MockRecordStore, StoreError};
    use std::sync::{Arc, Mutex};

    async fn submit(controller: &mut ContactController, service: &SiteService) {
        let submission = controller.begin_submit(Utc::now()).unwrap().unwrap();
        let result = service.submit_contact(&submission).await;
        controller.complete_submit(result);
    }

    fn fill(controller: &mut ContactController) {
        controller.set_field(FormField::Name, "Jane Doe");
        controller.set_field(FormField::Email, "jane@example.com");
        controller.set_field(FormField::Subject, "Hello");
        controller.set_field(FormField::Message, "Test message");
    }

    #[tokio::test]
    async fn test_successful_submission_clears_form() {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = captured.clone();

        let mut store = MockRecordStore::new();
        store
            .expect_create()
            .times(1)
            .returning(move |collection, record| {
                sink.lock().unwrap().push((collection.to_string(), record.clone()));
                Ok(record)
            });
        let service = SiteService::new(Arc::new(store));

        let mut controller = ContactController::new();
        fill(&mut controller);
        let before = Utc::now();

        submit(&mut controller, &service).await;

        assert_eq!(controller.status(), &SubmitStatus::Success);
        for field in FormField::ALL {
            assert_eq!(controller.form().field(field), "");
        }

        let calls = captured.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (collection, record) = &calls[0];
        assert_eq!(collection, "contactsubmissions");
        let sent: ContactSubmission = serde_json::from_value(record.clone()).unwrap();
        assert_eq!(sent.status, STATUS_NEW);
        assert_eq!(sent.name, "Jane Doe");
        assert_eq!(sent.email, "jane@example.com");
        assert_eq!(sent.subject, "Hello");
        assert_eq!(sent.message, "Test message");
        assert!(sent.submission_date >= before);
        assert!(!sent.id.0.is_empty());
    }

    #[test]
    fn test_second_submit_while_outstanding_is_dropped() {
        let mut controller = ContactController::new();
        fill(&mut controller);

        let first = controller.begin_submit(Utc::now()).unwrap();
        assert!(first.is_some());
        assert!(!controller.can_submit());
        assert_eq!(controller.submit_label(), "Sending...");

        let second = controller.begin_submit(Utc::now()).unwrap();
        assert!(second.is_none());
        assert_eq!(controller.status(), &SubmitStatus::Submitting);
    }

    #[tokio::test]
    async fn test_rapid_resubmit_issues_single_create() {
        let mut store = MockRecordStore::new();
        store.expect_create().times(1).returning(|_, record| Ok(record));
        let service = SiteService::new(Arc::new(store));

        let mut controller = ContactController::new();
        fill(&mut controller);

        let submission = controller.begin_submit(Utc::now()).unwrap().unwrap();
        // Clicked again before the store answered
        assert!(controller.begin_submit(Utc::now()).unwrap().is_none());

        let result = service.submit_contact(&submission).await;
        controller.complete_submit(result);
        assert_eq!(controller.status(), &SubmitStatus::Success);
    }

    #[test]
    fn test_missing_field_blocks_submission() {
        let mut controller = ContactController::new();
        controller.set_field(FormField::Name, "Jane Doe");

        let err = controller.begin_submit(Utc::now()).unwrap_err();
        assert_eq!(err, DomainError::MissingField("Email".to_string()));
        assert_eq!(controller.status(), &SubmitStatus::Idle);
    }

    #[tokio::test]
    async fn test_store_failure_keeps_fields_and_reenables_submit() {
        let mut store = MockRecordStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|_, _| Err(StoreError::StoreUnavailable("connection refused".to_string())));
        let service = SiteService::new(Arc::new(store));

        let mut controller = ContactController::new();
        fill(&mut controller);
        submit(&mut controller, &service).await;

        assert!(matches!(controller.status(), SubmitStatus::Error(msg) if msg.contains("connection refused")));
        assert_eq!(controller.form().name, "Jane Doe");
        assert!(controller.can_submit());
    }

    #[tokio::test]
    async fn test_acknowledgment_without_record_is_success() {
        let mut store = MockRecordStore::new();
        store
            .expect_create()
            .times(1)
            .returning(|_, record| Ok(serde_json::json!({ "_id": record["_id"].clone() })));
        let service = SiteService::new(Arc::new(store));

        let mut controller = ContactController::new();
        fill(&mut controller);
        submit(&mut controller, &service).await;

        assert_eq!(controller.status(), &SubmitStatus::Success);
        assert_eq!(controller.form().name, "");
    }

    #[test]
    fn test_editing_fields() {
        let mut controller = ContactController::new();
        controller.push_char(FormField::Subject, 'H');
        controller.push_char(FormField::Subject, 'i');
        controller.pop_char(FormField::Subject);
        assert_eq!(controller.form().subject, "H");
    }
}
