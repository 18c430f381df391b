use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{
    checkbox, empty_as_none, max_chars, null_as_default, require, trimmed, validate_email,
    FieldErrors,
};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind, Updatable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: ResourceId,
    pub name: String,
    pub photo_url: Option<String>,
    pub subject: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_leadership: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "checkbox")]
    pub is_leadership: bool,
}

impl Resource for Staff {
    type Draft = StaffDraft;

    const KIND: ResourceKind = ResourceKind::Staff;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::image("Photo", self.photo_url.clone().unwrap_or_default()),
            Cell::text("Name", &self.name),
            Cell::optional("Role", &self.role),
            Cell::optional("Subject", &self.subject),
            Cell::optional("Email", &self.email),
            Cell::text("Leadership", if self.is_leadership { "Yes" } else { "No" }),
        ]
    }
}

impl Draft for StaffDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        max_chars(&mut errors, "name", "Name", &self.name, 120);

        if let Some(email) = &self.email {
            if !validate_email(email) {
                errors.insert("email", "Invalid email address");
            }
        }
        if let Some(phone) = &self.phone {
            max_chars(&mut errors, "phone", "Phone", phone, 20);
        }

        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Full name", &self.name).required(),
            FormField::optional("role", "Role", &self.role),
            FormField::optional("subject", "Subject", &self.subject),
            FormField::optional("email", "Email", &self.email).email(),
            FormField::optional("phone", "Phone", &self.phone),
            FormField::optional("photo_url", "Photo URL", &self.photo_url).url(),
            FormField::checkbox("is_leadership", "Part of school leadership", self.is_leadership),
        ]
    }
}

impl Updatable for Staff {
    type Patch = StaffDraft;

    fn apply_patch(&mut self, patch: &StaffDraft, _now: NaiveDateTime) {
        // Staff rows carry no modification timestamp.
        self.name = patch.name.clone();
        self.photo_url = patch.photo_url.clone();
        self.subject = patch.subject.clone();
        self.email = patch.email.clone();
        self.phone = patch.phone.clone();
        self.role = patch.role.clone();
        self.is_leadership = patch.is_leadership;
    }
}
