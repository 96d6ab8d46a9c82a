//! API routes.

pub mod assets;
pub mod categories;
pub mod health;
pub mod notes;
pub mod reminders;
pub mod reports;
pub mod transcribe;

pub use assets::{index_handler, static_fallback};
pub use categories::{create_category_handler, list_categories_handler};
pub use health::{LIVENESS_MESSAGE, liveness_handler};
pub use notes::{
    CreateNoteRequest, create_note_handler, delete_note_handler, get_note_handler,
    list_notes_handler, note_reminders_handler, update_note_handler,
};
pub use reminders::{
    CompletedQuery, create_reminder_handler, list_reminders_handler, update_reminder_handler,
};
pub use reports::{ReportResponse, generate_report_handler, missing_note_id_handler};
pub use transcribe::{TranscriptionResponse, transcribe_handler};
