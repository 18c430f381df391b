use std::collections::HashMap;

use serde::Deserialize;

use crate::common::{checkbox, trimmed, validate_email};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default, deserialize_with = "trimmed")]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct AuthQuery {
    pub error: Option<String>,
}

#[derive(Deserialize)]
pub struct SetupForm {
    #[serde(default, deserialize_with = "trimmed")]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl SetupForm {
    pub const PASSWORD_MIN: usize = 8;

    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err("Email and password are required");
        }
        if !validate_email(&self.email) {
            return Err("Please enter a valid email address");
        }
        if self.password != self.confirm_password {
            return Err("Passwords do not match");
        }
        if self.password.chars().count() < Self::PASSWORD_MIN {
            return Err("Password must be at least 8 characters");
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    /// `1` opens the "add" form.
    pub new: Option<String>,
}

impl DashboardQuery {
    pub fn wants_modal(&self) -> bool {
        self.new.as_deref().is_some_and(|v| v == "1" || v == "true")
    }
}

#[derive(Deserialize)]
pub struct DeleteForm {
    #[serde(default, deserialize_with = "checkbox")]
    pub confirmed: bool,
}

#[derive(Deserialize)]
pub struct StatValueForm {
    #[serde(default, deserialize_with = "trimmed")]
    pub stat_value: String,
}

#[derive(Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

/// Raw urlencoded fields of an admin "add" form, turned into a typed draft by serde.
#[derive(Deserialize)]
#[serde(transparent)]
pub struct DraftForm(pub HashMap<String, String>);

impl DraftForm {
    pub fn into_draft<D: serde::de::DeserializeOwned>(self) -> Result<D, serde_json::Error> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .0
            .into_iter()
            .map(|(name, value)| (name, serde_json::Value::String(value)))
            .collect();
        serde_json::from_value(serde_json::Value::Object(object))
    }
}
