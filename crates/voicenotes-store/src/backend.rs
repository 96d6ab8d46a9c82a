//! Storage trait for pluggable backends.
//!
//! The API layer only ever talks to `dyn Storage`, so a persistent backend can
//! replace [`InMemoryStorage`](crate::InMemoryStorage) without touching the
//! handlers.
//!
//! # Example
//!
//! ```
//! use voicenotes_store::{InMemoryStorage, Note, NoteUpdate, Storage};
//!
//! let storage = InMemoryStorage::new();
//! let note = storage.add_note(Note::new("Idea"));
//!
//! let updated = storage
//!     .update_note(&note.id, &NoteUpdate::transcription("hello"))
//!     .expect("note exists");
//! assert_eq!(updated.transcription, "hello");
//! ```

use crate::types::{Category, Note, NoteUpdate, Reminder};

/// Concurrency-safe CRUD over notes, categories and reminders.
///
/// Absence is a normal outcome: lookups return `None` and deletes return
/// `false`. Translating absence into a not-found response is the caller's job.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync`. `update_note` and
/// `update_reminder` must make their read-transform-write atomic per id.
pub trait Storage: Send + Sync {
    /// Insert a note under its id and return the stored value.
    fn add_note(&self, note: Note) -> Note;

    /// Get a note by id.
    fn get_note(&self, id: &str) -> Option<Note>;

    /// Snapshot of all notes, in insertion order.
    fn list_notes(&self) -> Vec<Note>;

    /// Apply a merge-patch to a note and store the result.
    ///
    /// Returns `None` if no note has this id.
    fn update_note(&self, id: &str, update: &NoteUpdate) -> Option<Note>;

    /// Remove a note. Returns `true` iff it existed.
    fn delete_note(&self, id: &str) -> bool;

    /// Insert a category and return the stored value.
    fn add_category(&self, category: Category) -> Category;

    /// Snapshot of all categories, in insertion order.
    fn list_categories(&self) -> Vec<Category>;

    /// Insert a reminder and return the stored value.
    fn add_reminder(&self, reminder: Reminder) -> Reminder;

    /// Snapshot of all reminders, in insertion order.
    fn list_reminders(&self) -> Vec<Reminder>;

    /// Reminders whose `note_id` equals `note_id`.
    fn reminders_for_note(&self, note_id: &str) -> Vec<Reminder>;

    /// Set a reminder's completion flag, preserving every other field.
    ///
    /// Returns `None` if no reminder has this id.
    fn update_reminder(&self, id: &str, completed: bool) -> Option<Reminder>;
}
