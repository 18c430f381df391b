use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{empty_as_none, max_chars, require, trimmed, FieldErrors};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind};

pub const NEWS_CATEGORIES: [&str; 5] = ["Academics", "Sports", "Facilities", "Events", "Environment"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: ResourceId,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

impl NewsItem {
    pub fn published_on(&self) -> String {
        self.created_at.format("%b %-d, %Y").to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Resource for NewsItem {
    type Draft = NewsDraft;

    const KIND: ResourceKind = ResourceKind::News;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text("Title", &self.title),
            Cell::optional("Category", &self.category),
            Cell::optional("Excerpt", &self.excerpt),
            Cell::text("Published", self.published_on()),
        ]
    }
}

impl Draft for NewsDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", "Title", &self.title);
        max_chars(&mut errors, "title", "Title", &self.title, 255);
        if let Some(excerpt) = &self.excerpt {
            max_chars(&mut errors, "excerpt", "Excerpt", excerpt, 500);
        }
        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("title", "Title", &self.title).required(),
            FormField::select(
                "category",
                "Category",
                self.category.clone().unwrap_or_default(),
                &NEWS_CATEGORIES,
            ),
            FormField::optional("excerpt", "Excerpt", &self.excerpt).textarea(),
            FormField::optional("content", "Content", &self.content).textarea(),
        ]
    }
}
