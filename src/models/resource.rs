use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::common::FieldErrors;

/// Backend primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub i64);

impl std::fmt::Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| format!("invalid id: {}", s))
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A named REST collection on the backend.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Staff,
    News,
    Events,
    Gallery,
    Testimonials,
    Stats,
    Contact,
    Alumni,
    Kcse,
}

impl ResourceKind {
    /// Order of the admin dashboard tabs.
    pub const ALL: [ResourceKind; 9] = [
        Self::Stats,
        Self::Staff,
        Self::News,
        Self::Events,
        Self::Gallery,
        Self::Testimonials,
        Self::Alumni,
        Self::Kcse,
        Self::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::News => "news",
            Self::Events => "events",
            Self::Gallery => "gallery",
            Self::Testimonials => "testimonials",
            Self::Stats => "stats",
            Self::Contact => "contact",
            Self::Alumni => "alumni",
            Self::Kcse => "kcse",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Staff => "Staff",
            Self::News => "News",
            Self::Events => "Events",
            Self::Gallery => "Gallery",
            Self::Testimonials => "Testimonials",
            Self::Stats => "School Statistics",
            Self::Contact => "Inbox",
            Self::Alumni => "Alumni",
            Self::Kcse => "KCSE Results",
        }
    }

    /// Collection route relative to the API base, e.g. `/staff/`.
    pub fn collection_path(&self) -> String {
        format!("/{}/", self.as_str())
    }

    /// Item route relative to the API base, e.g. `/staff/3`.
    pub fn item_path(&self, id: ResourceId) -> String {
        format!("/{}/{}", self.as_str(), id)
    }

    /// Contact submissions arrive through the public form only.
    pub fn admin_can_create(&self) -> bool {
        !matches!(self, Self::Contact)
    }

    pub fn admin_can_update(&self) -> bool {
        matches!(self, Self::Stats)
    }

    /// Listing the collection needs a bearer token.
    pub fn list_requires_auth(&self) -> bool {
        matches!(self, Self::Contact)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "news" => Ok(Self::News),
            "events" => Ok(Self::Events),
            "gallery" => Ok(Self::Gallery),
            "testimonials" => Ok(Self::Testimonials),
            "stats" => Ok(Self::Stats),
            "contact" => Ok(Self::Contact),
            "alumni" => Ok(Self::Alumni),
            "kcse" => Ok(Self::Kcse),
            _ => Err(format!("invalid resource: {}", s)),
        }
    }
}

/// A record type served by one backend collection.
pub trait Resource: Clone + std::fmt::Debug + DeserializeOwned + Send + Sync + 'static {
    /// Payload posted to create a new record.
    type Draft: Draft;

    const KIND: ResourceKind;

    fn id(&self) -> ResourceId;

    /// Short human label, used in confirmations and notices.
    fn title(&self) -> &str;

    /// Free-text tag used by category filters.
    fn category(&self) -> Option<&str> {
        None
    }

    /// Columns shown in the admin table.
    fn cells(&self) -> Vec<Cell>;

    /// Current value for the inline editor of updatable collections.
    fn inline_value(&self) -> Option<&str> {
        None
    }

    /// Flags rows the admin has not dealt with yet.
    fn is_unread(&self) -> bool {
        false
    }
}

/// A create form. Doubles as the JSON body sent to the backend.
pub trait Draft:
    Clone + Default + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Client-side presence/format checks only.
    fn validate(&self) -> Result<(), FieldErrors>;

    fn fields(&self) -> Vec<FormField>;
}

pub trait Updatable: Resource {
    type Patch: Clone + std::fmt::Debug + Serialize + Send + Sync + 'static;

    /// Splices `patch` into the record and stamps it with `now`.
    fn apply_patch(&mut self, patch: &Self::Patch, now: NaiveDateTime);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub label: &'static str,
    pub value: String,
    pub is_image: bool,
}

impl Cell {
    pub fn text(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            is_image: false,
        }
    }

    pub fn optional(label: &'static str, value: &Option<String>) -> Self {
        Self::text(label, value.clone().unwrap_or_default())
    }

    pub fn image(label: &'static str, url: impl Into<String>) -> Self {
        Self {
            label,
            value: url.into(),
            is_image: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    Url,
    TextArea,
    Checkbox,
    Select,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub value: String,
    pub required: bool,
    pub options: Vec<&'static str>,
    pub error: Option<String>,
}

impl FormField {
    pub fn text(name: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            label,
            input: InputKind::Text,
            value: value.into(),
            required: false,
            options: Vec::new(),
            error: None,
        }
    }

    pub fn optional(name: &'static str, label: &'static str, value: &Option<String>) -> Self {
        Self::text(name, label, value.clone().unwrap_or_default())
    }

    pub fn checkbox(name: &'static str, label: &'static str, checked: bool) -> Self {
        Self {
            input: InputKind::Checkbox,
            ..Self::text(name, label, if checked { "true" } else { "" })
        }
    }

    pub fn select(
        name: &'static str,
        label: &'static str,
        value: impl Into<String>,
        options: &[&'static str],
    ) -> Self {
        Self {
            input: InputKind::Select,
            options: options.to_vec(),
            ..Self::text(name, label, value)
        }
    }

    pub fn email(mut self) -> Self {
        self.input = InputKind::Email;
        self
    }

    pub fn url(mut self) -> Self {
        self.input = InputKind::Url;
        self
    }

    pub fn textarea(mut self) -> Self {
        self.input = InputKind::TextArea;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_error(mut self, errors: &FieldErrors) -> Self {
        self.error = errors.get(self.name).map(str::to_string);
        self
    }

    /// `type` attribute for `<input>` elements.
    pub fn input_type(&self) -> &'static str {
        match self.input {
            InputKind::Email => "email",
            InputKind::Url => "url",
            InputKind::Checkbox => "checkbox",
            _ => "text",
        }
    }

    pub fn is_textarea(&self) -> bool {
        self.input == InputKind::TextArea
    }

    pub fn is_checkbox(&self) -> bool {
        self.input == InputKind::Checkbox
    }

    pub fn is_select(&self) -> bool {
        self.input == InputKind::Select
    }

    pub fn is_checked(&self) -> bool {
        self.value == "true"
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.value == option
    }
}
