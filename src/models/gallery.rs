use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{empty_as_none, is_http_url, require, trimmed, FieldErrors};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind};

pub const GALLERY_CATEGORIES: [&str; 4] = ["Academics", "Sports", "Events", "Facilities"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: ResourceId,
    pub image_url: String,
    pub title: Option<String>,
    pub category: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalleryDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub image_url: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Resource for GalleryImage {
    type Draft = GalleryDraft;

    const KIND: ResourceKind = ResourceKind::Gallery;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.image_url)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::image("Image", &self.image_url),
            Cell::optional("Title", &self.title),
            Cell::optional("Category", &self.category),
        ]
    }
}

impl Draft for GalleryDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if require(&mut errors, "image_url", "Image URL", &self.image_url)
            && !is_http_url(&self.image_url)
        {
            errors.insert("image_url", "Image URL must start with http:// or https://");
        }
        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("image_url", "Image URL", &self.image_url).url().required(),
            FormField::optional("title", "Caption", &self.title),
            FormField::select(
                "category",
                "Category",
                self.category.clone().unwrap_or_default(),
                &GALLERY_CATEGORIES,
            ),
        ]
    }
}
