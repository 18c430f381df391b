use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{
    empty_as_none, max_chars, null_as_default, require, trimmed, validate_email, FieldErrors,
    EMAIL_MAX_LEN,
};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind};

/// Public contact form. Posting it creates a [`ContactMessage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "trimmed")]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed")]
    pub email: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub subject: String,
    #[serde(default, deserialize_with = "trimmed")]
    pub message: String,
}

impl ContactForm {
    pub const NAME_MAX: usize = 100;
    pub const EMAIL_MAX: usize = EMAIL_MAX_LEN;
    pub const PHONE_MAX: usize = 20;
    pub const SUBJECT_MAX: usize = 200;
    pub const MESSAGE_MAX: usize = 2000;

    /// Sets one field by its form name. Unknown names are ignored.
    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        let value = value.into();
        match field {
            "name" => self.name = value,
            "email" => self.email = value,
            "phone" => {
                let trimmed = value.trim();
                self.phone = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            "subject" => self.subject = value,
            "message" => self.message = value,
            _ => {}
        }
    }
}

impl Draft for ContactForm {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        require(&mut errors, "name", "Name", &self.name);
        max_chars(&mut errors, "name", "Name", &self.name, Self::NAME_MAX);

        if require(&mut errors, "email", "Email", &self.email) {
            max_chars(&mut errors, "email", "Email", &self.email, Self::EMAIL_MAX);
            if !validate_email(&self.email) {
                errors.insert("email", "Invalid email address");
            }
        }

        if let Some(phone) = &self.phone {
            max_chars(&mut errors, "phone", "Phone", phone, Self::PHONE_MAX);
        }

        require(&mut errors, "subject", "Subject", &self.subject);
        max_chars(&mut errors, "subject", "Subject", &self.subject, Self::SUBJECT_MAX);

        require(&mut errors, "message", "Message", &self.message);
        max_chars(&mut errors, "message", "Message", &self.message, Self::MESSAGE_MAX);

        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Full name", &self.name).required(),
            FormField::text("email", "Email", &self.email).email().required(),
            FormField::optional("phone", "Phone", &self.phone),
            FormField::text("subject", "Subject", &self.subject).required(),
            FormField::text("message", "Message", &self.message).textarea().required(),
        ]
    }
}

/// A stored submission, as listed in the admin inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: ResourceId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}

impl Resource for ContactMessage {
    type Draft = ContactForm;

    const KIND: ResourceKind = ResourceKind::Contact;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        self.subject.as_deref().unwrap_or(&self.name)
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text("From", format!("{} <{}>", self.name, self.email)),
            Cell::optional("Subject", &self.subject),
            Cell::text("Message", &self.message),
            Cell::text("Received", self.created_at.format("%-d %b %Y %H:%M").to_string()),
            Cell::text("Status", if self.is_read { "Read" } else { "New" }),
        ]
    }

    fn is_unread(&self) -> bool {
        !self.is_read
    }
}
