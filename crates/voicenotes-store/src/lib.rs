//! Domain entities and storage for VoiceNotes.
//!
//! Three independent collections are kept: notes, categories and reminders.
//! [`Storage`] is the seam the API layer depends on; [`InMemoryStorage`] is the
//! volatile implementation used by the server and by tests.
//!
//! Cross-entity references (`Note::category_id`, `Reminder::note_id`) are
//! plain ids. Deleting a note does not delete its reminders, and nothing
//! checks that a referenced category exists.

pub mod backend;
pub mod memory;
pub mod types;

pub use backend::Storage;
pub use memory::InMemoryStorage;
pub use types::{
    Category, DEFAULT_CATEGORIES, DEFAULT_CATEGORY_COLOR, Note, NoteUpdate, Reminder, new_id,
    now,
};
