//! Domain entities and their wire shapes.
//!
//! All three entities serialize as camelCase JSON objects. Identifiers are
//! opaque strings; `category_id` and `note_id` are weak references that are
//! never checked against the referenced collection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display color given to categories created without one.
pub const DEFAULT_CATEGORY_COLOR: &str = "#8B5CF6";

/// Categories seeded into every fresh storage instance, as `(name, color)`.
pub const DEFAULT_CATEGORIES: [(&str, &str); 4] = [
    ("Бизнес идеи", "#8B5CF6"),
    ("Задачи", "#3B82F6"),
    ("Мысли", "#06B6D4"),
    ("Важное", "#EC4899"),
];

/// Generate a fresh entity identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Current local wall-clock time, without offset.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn default_category_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Note
// ─────────────────────────────────────────────────────────────────────────────

/// A recorded voice note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub transcription: String,
    #[serde(default)]
    pub audio_path: String,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub ai_report: Option<String>,
    #[serde(default = "now")]
    pub created_at: NaiveDateTime,
    #[serde(default = "now")]
    pub updated_at: NaiveDateTime,
}

impl Note {
    /// Create an empty note with a fresh id and no transcription or report.
    pub fn new(title: impl Into<String>) -> Self {
        let now = now();
        Self {
            id: new_id(),
            title: title.into(),
            transcription: String::new(),
            audio_path: String::new(),
            category_id: None,
            ai_report: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the note to a category.
    pub fn with_category(mut self, category_id: Option<String>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Apply a merge-patch, producing the updated note.
    ///
    /// Fields present in `update` overwrite; absent fields are kept. The
    /// `updated_at` stamp is refreshed to `now` but never moves backwards.
    pub fn apply(&self, update: &NoteUpdate, now: NaiveDateTime) -> Note {
        Note {
            id: self.id.clone(),
            title: update.title.clone().unwrap_or_else(|| self.title.clone()),
            transcription: update
                .transcription
                .clone()
                .unwrap_or_else(|| self.transcription.clone()),
            audio_path: self.audio_path.clone(),
            category_id: update.category_id.clone().or_else(|| self.category_id.clone()),
            ai_report: update.ai_report.clone().or_else(|| self.ai_report.clone()),
            created_at: self.created_at,
            updated_at: self.updated_at.max(now),
        }
    }
}

/// Merge-patch for a [`Note`].
///
/// Deserializes from the `PATCH /api/notes/{id}` body. `ai_report` is never
/// read from the wire; only report generation sets it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub transcription: Option<String>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(skip)]
    pub ai_report: Option<String>,
}

impl NoteUpdate {
    /// Patch that replaces the transcription.
    pub fn transcription(text: impl Into<String>) -> Self {
        Self {
            transcription: Some(text.into()),
            ..Default::default()
        }
    }

    /// Patch that stores a generated report.
    pub fn ai_report(report: impl Into<String>) -> Self {
        Self {
            ai_report: Some(report.into()),
            ..Default::default()
        }
    }

    /// True when the patch changes no field (it still refreshes `updated_at`).
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.transcription.is_none()
            && self.category_id.is_none()
            && self.ai_report.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Category
// ─────────────────────────────────────────────────────────────────────────────

/// A named, colored grouping for notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_category_color")]
    pub color: String,
}

impl Category {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            color: color.into(),
        }
    }

    /// The categories every storage instance starts with.
    pub fn defaults() -> Vec<Category> {
        DEFAULT_CATEGORIES
            .iter()
            .map(|(name, color)| Category::new(*name, *color))
            .collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reminder
// ─────────────────────────────────────────────────────────────────────────────

/// A scheduled reminder about a note.
///
/// `reminder_time` is kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(default = "new_id")]
    pub id: String,
    pub note_id: String,
    pub reminder_time: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl Reminder {
    pub fn new(
        note_id: impl Into<String>,
        reminder_time: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            note_id: note_id.into(),
            reminder_time: reminder_time.into(),
            title: title.into(),
            description: String::new(),
            completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
