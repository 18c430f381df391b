use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{empty_as_none, require, trimmed, FieldErrors};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind};

/// National exam summary for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KcseResult {
    pub id: ResourceId,
    pub year: String,
    pub mean_grade: Option<String>,
    pub university_entry_percentage: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KcseResultDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub year: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub mean_grade: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub university_entry_percentage: Option<String>,
}

impl Resource for KcseResult {
    type Draft = KcseResultDraft;

    const KIND: ResourceKind = ResourceKind::Kcse;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        &self.year
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text("Year", &self.year),
            Cell::optional("Mean grade", &self.mean_grade),
            Cell::optional("University entry", &self.university_entry_percentage),
        ]
    }
}

impl Draft for KcseResultDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if require(&mut errors, "year", "Year", &self.year)
            && !(self.year.len() == 4 && self.year.chars().all(|c| c.is_ascii_digit()))
        {
            errors.insert("year", "Year must be four digits");
        }
        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("year", "Year", &self.year).required(),
            FormField::optional("mean_grade", "Mean grade", &self.mean_grade),
            FormField::optional(
                "university_entry_percentage",
                "University entry (%)",
                &self.university_entry_percentage,
            ),
        ]
    }
}
