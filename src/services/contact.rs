use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::common::{ApiError, FieldErrors, MutationError};
use crate::models::{ContactForm, Draft, FormField};

use super::controller::guarded;
use super::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Editing,
    Submitting,
    Submitted,
}

/// State of the public "send us a message" form.
pub struct ContactFormController {
    api: ApiClient,
    form: ContactForm,
    errors: FieldErrors,
    phase: ContactPhase,
    notice: Option<Notice>,
    confirmation: Option<String>,
    cancel: CancellationToken,
}

impl ContactFormController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            form: ContactForm::default(),
            errors: FieldErrors::new(),
            phase: ContactPhase::Editing,
            notice: None,
            confirmation: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Starts from values posted in one go by a plain HTML form.
    pub fn with_values(api: ApiClient, form: ContactForm) -> Self {
        let mut controller = Self::new(api);
        controller.form = form;
        controller
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn is_submitted(&self) -> bool {
        self.phase == ContactPhase::Submitted
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Server acknowledgement shown on the confirmation view.
    pub fn confirmation(&self) -> Option<&str> {
        self.confirmation.as_deref()
    }

    pub fn fields(&self) -> Vec<FormField> {
        self.form
            .fields()
            .into_iter()
            .map(|field| field.with_error(&self.errors))
            .collect()
    }

    /// Changes one field and clears that field's error only.
    pub fn edit(&mut self, field: &str, value: impl Into<String>) {
        if self.phase != ContactPhase::Editing {
            return;
        }
        self.form.set(field, value);
        self.errors.remove(field);
    }

    pub async fn submit(&mut self) -> Result<(), MutationError> {
        if self.phase != ContactPhase::Editing {
            return Ok(());
        }
        self.notice = None;

        if let Err(errors) = self.form.validate() {
            self.errors = errors.clone();
            return Err(MutationError::Invalid(errors));
        }
        self.errors = FieldErrors::new();

        self.phase = ContactPhase::Submitting;
        let result = guarded(&self.cancel, self.api.submit_contact(&self.form)).await;

        match result {
            Ok(ack) => {
                self.phase = ContactPhase::Submitted;
                self.confirmation = ack.message;
                Ok(())
            }
            Err(err) => {
                self.phase = ContactPhase::Editing;
                if err != ApiError::Cancelled {
                    let message = if err.is_transport() {
                        "Failed to send message. Please try again.".to_string()
                    } else {
                        err.to_string()
                    };
                    self.notice = Some(Notice::error(message));
                }
                Err(err.into())
            }
        }
    }

    /// Back to an empty form after a confirmation.
    pub fn reset(&mut self) {
        self.form = ContactForm::default();
        self.errors = FieldErrors::new();
        self.phase = ContactPhase::Editing;
        self.notice = None;
        self.confirmation = None;
    }
}

impl Drop for ContactFormController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
