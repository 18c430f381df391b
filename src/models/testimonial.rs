use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{empty_as_none, max_chars, require, trimmed, FieldErrors};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub id: ResourceId,
    pub student_name: String,
    /// e.g. "Form 4R" or "Class of 2024"
    pub year: Option<String>,
    pub quote: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestimonialDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub student_name: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "trimmed")]
    pub quote: String,
}

impl Resource for Testimonial {
    type Draft = TestimonialDraft;

    const KIND: ResourceKind = ResourceKind::Testimonials;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        &self.student_name
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text("Student", &self.student_name),
            Cell::optional("Year", &self.year),
            Cell::text("Quote", &self.quote),
        ]
    }
}

impl Draft for TestimonialDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "student_name", "Student name", &self.student_name);
        max_chars(&mut errors, "student_name", "Student name", &self.student_name, 120);
        require(&mut errors, "quote", "Quote", &self.quote);
        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("student_name", "Student name", &self.student_name).required(),
            FormField::optional("year", "Class / year", &self.year),
            FormField::text("quote", "Quote", &self.quote).textarea().required(),
        ]
    }
}
