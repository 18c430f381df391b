use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{empty_as_none, max_chars, require, trimmed, FieldErrors};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind};

/// `date` is a display string ("March 15, 2026"), never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: ResourceId,
    pub title: String,
    pub date: Option<String>,
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub title: String,
    #[serde(default, deserialize_with = "trimmed")]
    pub date: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Resource for Event {
    type Draft = EventDraft;

    const KIND: ResourceKind = ResourceKind::Events;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text("Title", &self.title),
            Cell::optional("Date", &self.date),
            Cell::optional("Description", &self.description),
        ]
    }
}

impl Draft for EventDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", "Title", &self.title);
        max_chars(&mut errors, "title", "Title", &self.title, 255);
        require(&mut errors, "date", "Date", &self.date);
        max_chars(&mut errors, "date", "Date", &self.date, 100);
        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("title", "Title", &self.title).required(),
            FormField::text("date", "Date (e.g. March 15, 2026)", &self.date).required(),
            FormField::optional("description", "Description", &self.description).textarea(),
        ]
    }
}
