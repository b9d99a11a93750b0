use serde_json::Value;

use super::{require_captcha, FieldErrors, FormEvent, FormMachine, FormStatus, Submission};
use crate::cms::CmsClient;

/// Where validated submissions are sent.
#[rocket::async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(
        &self,
        collection: &str,
        payload: &Value,
        captcha_token: Option<&str>,
    ) -> Result<(), String>;
}

#[rocket::async_trait]
impl SubmissionSink for CmsClient {
    async fn submit(
        &self,
        collection: &str,
        payload: &Value,
        captcha_token: Option<&str>,
    ) -> Result<(), String> {
        self.post(collection, payload, captcha_token).await.map(|_| ())
    }
}

/// What the form page renders after a POST.
#[derive(Debug, Clone)]
pub struct FormOutcome<F> {
    pub machine: FormMachine,
    /// Field values to show: cleared after success, kept otherwise.
    pub values: F,
    pub errors: FieldErrors,
}

impl<F: Submission> FormOutcome<F> {
    /// A fresh form, optionally pre-filled.
    pub fn idle(values: F) -> Self {
        FormOutcome {
            machine: FormMachine::new(F::POLICY),
            values,
            errors: FieldErrors::new(),
        }
    }

    /// A submission refused before it was sent (rate limited): shown as the
    /// generic error with the visitor's input kept.
    pub fn refused(values: F) -> Self {
        let mut outcome = Self::idle(values);
        outcome.machine.on(FormEvent::Submit);
        outcome.machine.on(FormEvent::Failed);
        outcome
    }

    pub fn status(&self) -> FormStatus {
        self.machine.status()
    }
}

/// Validate, then post once. Invalid input never reaches the sink.
pub async fn process<F: Submission>(
    form: &F,
    site_key: Option<&str>,
    sink: &dyn SubmissionSink,
) -> FormOutcome<F> {
    let mut outcome = FormOutcome::idle(form.clone());

    let mut errors = form.validate();
    require_captcha(&mut errors, site_key, form.captcha_token());
    if !errors.is_empty() {
        log::debug!(
            "{} submission rejected: {} field error(s)",
            F::COLLECTION,
            errors.len()
        );
        outcome.errors = errors;
        return outcome;
    }

    outcome.machine.on(FormEvent::Submit);
    let token = form.captcha_token().filter(|t| !t.trim().is_empty());
    match sink.submit(F::COLLECTION, &form.payload(), token).await {
        Ok(()) => {
            log::info!("{} submission accepted", F::COLLECTION);
            outcome.machine.on(FormEvent::Succeeded);
            outcome.values = F::default();
        }
        Err(e) => {
            log::error!("{} submission failed: {}", F::COLLECTION, e);
            outcome.machine.on(FormEvent::Failed);
        }
    }
    outcome
}
