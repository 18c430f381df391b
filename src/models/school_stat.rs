use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::{empty_as_none, max_chars, require, trimmed, FieldErrors};

use super::{Cell, Draft, FormField, Resource, ResourceId, ResourceKind, Updatable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolStat {
    pub id: ResourceId,
    /// e.g. "students_count"
    pub stat_key: String,
    /// Free text: "1200", "A-", "92%".
    pub stat_value: String,
    pub stat_label: Option<String>,
    /// Nullable on the backend; missing or blank reads as "general".
    #[serde(default = "default_category", deserialize_with = "category_or_general")]
    pub stat_category: String,
    pub updated_at: NaiveDateTime,
}

fn default_category() -> String {
    StatCategory::General.as_str().to_string()
}

fn category_or_general<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(empty_as_none(deserializer)?.unwrap_or_else(default_category))
}

impl SchoolStat {
    pub fn label(&self) -> &str {
        self.stat_label.as_deref().unwrap_or(&self.stat_key)
    }

    pub fn category_kind(&self) -> StatCategory {
        self.stat_category.parse().unwrap_or_default()
    }

    pub fn updated_on(&self) -> String {
        self.updated_at.format("%-d %b %Y").to_string()
    }
}

#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatCategory {
    Students,
    Staff,
    Facilities,
    Academics,
    CoCurricular,
    #[default]
    General,
}

impl StatCategory {
    pub const ALL: [StatCategory; 6] = [
        Self::Students,
        Self::Staff,
        Self::Facilities,
        Self::Academics,
        Self::CoCurricular,
        Self::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Students => "students",
            Self::Staff => "staff",
            Self::Facilities => "facilities",
            Self::Academics => "academics",
            Self::CoCurricular => "co-curricular",
            Self::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Students => "Students",
            Self::Staff => "Staff",
            Self::Facilities => "Facilities",
            Self::Academics => "Academics",
            Self::CoCurricular => "Co-Curricular",
            Self::General => "General",
        }
    }
}

impl std::fmt::Display for StatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StatCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("invalid stat category: {}", s))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatDraft {
    #[serde(default, deserialize_with = "trimmed")]
    pub stat_key: String,
    #[serde(default, deserialize_with = "trimmed")]
    pub stat_value: String,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub stat_label: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none", skip_serializing_if = "Option::is_none")]
    pub stat_category: Option<String>,
}

/// In-place edit of a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatPatch {
    #[serde(deserialize_with = "trimmed")]
    pub stat_value: String,
}

impl Resource for SchoolStat {
    type Draft = StatDraft;

    const KIND: ResourceKind = ResourceKind::Stats;

    fn id(&self) -> ResourceId {
        self.id
    }

    fn title(&self) -> &str {
        self.label()
    }

    fn category(&self) -> Option<&str> {
        Some(&self.stat_category)
    }

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::text("Statistic", self.label()),
            Cell::text("Category", self.category_kind().label()),
            Cell::text("Updated", self.updated_on()),
        ]
    }

    fn inline_value(&self) -> Option<&str> {
        Some(&self.stat_value)
    }
}

impl Draft for StatDraft {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "stat_key", "Key", &self.stat_key);
        max_chars(&mut errors, "stat_key", "Key", &self.stat_key, 100);
        require(&mut errors, "stat_value", "Value", &self.stat_value);
        max_chars(&mut errors, "stat_value", "Value", &self.stat_value, 100);
        if let Some(category) = &self.stat_category {
            if category.parse::<StatCategory>().is_err() {
                errors.insert("stat_category", "Unknown category");
            }
        }
        errors.into_result()
    }

    fn fields(&self) -> Vec<FormField> {
        let categories: Vec<&'static str> = StatCategory::ALL.iter().map(StatCategory::as_str).collect();
        vec![
            FormField::text("stat_key", "Key (e.g. students_count)", &self.stat_key).required(),
            FormField::text("stat_value", "Value", &self.stat_value).required(),
            FormField::optional("stat_label", "Label", &self.stat_label),
            FormField::select(
                "stat_category",
                "Category",
                self.stat_category.clone().unwrap_or_else(default_category),
                &categories,
            ),
        ]
    }
}

impl Updatable for SchoolStat {
    type Patch = StatPatch;

    fn apply_patch(&mut self, patch: &StatPatch, now: NaiveDateTime) {
        self.stat_value = patch.stat_value.clone();
        self.updated_at = now;
    }
}
