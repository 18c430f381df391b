use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{empty_as_none, max_chars, require, trimmed, FieldErrors};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alumnus {
    pub id: ResourceId,
    pub name: String,
    /// e.g. "Former Vice President"
    pub achievement: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlumnusDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub name: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub achievement: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Alumnus {
    type Draft = AlumnusDraft;

    const KIND: ResourceKind = ResourceKind::Alumni;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text("Name", &self.name),
            Cell::optional("Achievement", &self.achievement),
        ]
    }
}

impl Draft for AlumnusDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        max_chars(&mut errors, "name", "Name", &self.name, 120);
        if let Some(achievement) = &self.achievement {
            max_chars(&mut errors, "achievement", "Achievement", achievement, 255);
        }
        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("name", "Name", &self.name).required(),
            FormField::optional("achievement", "Achievement", &self.achievement),
            FormField::optional("description", "Description", &self.description).textarea(),
        ]
    }
}
