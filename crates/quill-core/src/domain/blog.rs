use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::user::User;
use crate::error::DomainError;

/// Seconds of reading time attributed to each word.
pub const SECONDS_PER_WORD: f64 = 0.25;

/// Fields that `BlogEdit` accepts.
pub const EDITABLE_FIELDS: [&str; 4] = ["title", "description", "tags", "body"];

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogState {
    Draft,
    Published,
}

impl BlogState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlogState::Draft => "draft",
            BlogState::Published => "published",
        }
    }

    /// Validate a requested transition from `self` to `requested`.
    ///
    /// Only `draft -> published` is allowed. Requesting the current state is
    /// reported as `NoChange`, never silently accepted.
    pub fn transition_to(self, requested: BlogState) -> Result<BlogState, DomainError> {
        match (self, requested) {
            (BlogState::Draft, BlogState::Published) => Ok(BlogState::Published),
            (BlogState::Published, BlogState::Draft) => Err(DomainError::InvalidTransition(
                "Invalid state transition. Cannot move from 'published' to 'draft'.".to_string(),
            )),
            (current, requested) if current == requested => Err(DomainError::NoChange(
                "No change detected. The state is already set to the provided value.".to_string(),
            )),
            _ => Err(DomainError::InvalidTransition(
                "Invalid state transition. State can only transition from 'draft' to 'published'."
                    .to_string(),
            )),
        }
    }
}

impl fmt::Display for BlogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlogState {
    type Err = DomainError;

    /// Exact, case-sensitive parse used for state transitions.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(BlogState::Draft),
            "published" => Ok(BlogState::Published),
            _ => Err(DomainError::validation(
                "Invalid state. State can only be 'draft' or 'published'.",
            )),
        }
    }
}

/// Reading time in seconds for the given content.
///
/// Title, description and body are joined by single spaces and every maximal
/// run of non-whitespace counts as one word.
pub fn read_time(title: &str, description: &str, body: &str) -> f64 {
    let words = [title, description, body]
        .iter()
        .map(|part| part.split_whitespace().count())
        .sum::<usize>();
    words as f64 * SECONDS_PER_WORD
}

/// Blog post entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub body: String,
    pub tags: Vec<String>,
    /// Author display name captured at creation. Never recomputed.
    pub author: String,
    pub owner_id: Uuid,
    pub state: BlogState,
    pub read_count: i64,
    pub read_time: f64,
    pub created_at: DateTime<Utc>,
    pub last_updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new draft owned by `owner`.
    pub fn new(owner: &User, draft: NewBlog) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            read_time: read_time(&draft.title, &draft.description, &draft.body),
            title: draft.title,
            description: draft.description,
            body: draft.body,
            tags: draft.tags,
            author: owner.full_name(),
            owner_id: owner.id,
            state: BlogState::Draft,
            read_count: 0,
            created_at: now,
            last_updated_at: now,
        }
    }

    /// Recompute derived fields before a save.
    pub fn touch(&mut self) {
        self.read_time = read_time(&self.title, &self.description, &self.body);
        self.last_updated_at = Utc::now();
    }

    pub fn is_published(&self) -> bool {
        self.state == BlogState::Published
    }

    /// Apply a validated edit. Callers are expected to `touch` afterwards.
    pub fn apply(&mut self, edit: BlogEdit) {
        if let Some(title) = edit.title {
            self.title = title;
        }
        if let Some(description) = edit.description {
            self.description = description;
        }
        if let Some(tags) = edit.tags {
            self.tags = tags;
        }
        if let Some(body) = edit.body {
            self.body = body;
        }
    }
}

/// Input for creating a post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBlog {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub body: String,
}

impl NewBlog {
    /// Build from optional request fields, rejecting anything missing.
    ///
    /// `tags` must be present but may be empty.
    pub fn from_parts(
        title: Option<String>,
        description: Option<String>,
        tags: Option<Vec<String>>,
        body: Option<String>,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            title: required("title", title)?,
            description: required("description", description)?,
            tags: tags.ok_or_else(|| DomainError::validation("Tags are required"))?,
            body: required("body", body)?,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::Validation(format!("Blog {field} is required"))),
    }
}

/// A whitelisted, fully-validated set of field edits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub body: Option<String>,
}

impl BlogEdit {
    /// Validate a raw JSON object of edits.
    ///
    /// Any key outside [`EDITABLE_FIELDS`] rejects the whole request, as does
    /// any value of the wrong shape. Nothing is partially applied.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, DomainError> {
        if !fields.keys().all(|k| EDITABLE_FIELDS.contains(&k.as_str())) {
            return Err(invalid_updates());
        }

        let mut edit = BlogEdit::default();
        for (key, value) in fields {
            match key.as_str() {
                "title" => edit.title = Some(text_field(key, value)?),
                "description" => edit.description = Some(text_field(key, value)?),
                "body" => edit.body = Some(text_field(key, value)?),
                "tags" => edit.tags = Some(tags_field(value)?),
                _ => return Err(invalid_updates()),
            }
        }
        Ok(edit)
    }

    pub fn is_empty(&self) -> bool {
        *self == BlogEdit::default()
    }
}

fn invalid_updates() -> DomainError {
    DomainError::validation(
        "Invalid updates. You can only edit title, description, tags, and body.",
    )
}

fn text_field(key: &str, value: &Value) -> Result<String, DomainError> {
    match value.as_str() {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        Some(_) => Err(DomainError::Validation(format!("Blog {key} is required"))),
        None => Err(DomainError::Validation(format!("Blog {key} must be a string"))),
    }
}

fn tags_field(value: &Value) -> Result<Vec<String>, DomainError> {
    let invalid = || DomainError::validation("Tags must be a list of strings");
    value
        .as_array()
        .ok_or_else(invalid)?
        .iter()
        .map(|tag| tag.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}
