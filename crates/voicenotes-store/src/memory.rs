//! In-memory storage backed by sharded concurrent maps.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tracing::debug;

use crate::backend::Storage;
use crate::types::{Category, Note, NoteUpdate, Reminder, now};

/// A stored value tagged with its insertion sequence number.
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    value: T,
}

/// One collection keyed by entity id.
///
/// Writers to the same id are serialized by the map's per-shard lock, so a
/// read-transform-write through [`Collection::update`] is never torn and never
/// interleaves with another writer of that id. Readers and writers of ids in
/// other shards are not blocked.
#[derive(Debug)]
struct Collection<T> {
    entries: DashMap<String, Slot<T>>,
    next_seq: AtomicU64,
}

impl<T: Clone> Collection<T> {
    fn new() -> Self {
        Self {
            entries: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    fn insert(&self, id: String, value: T) {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(id, Slot { seq, value });
    }

    fn get(&self, id: &str) -> Option<T> {
        self.entries.get(id).map(|slot| slot.value.clone())
    }

    fn update(&self, id: &str, f: impl FnOnce(&T) -> T) -> Option<T> {
        let mut slot = self.entries.get_mut(id)?;
        let updated = f(&slot.value);
        slot.value = updated.clone();
        Some(updated)
    }

    fn remove(&self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    /// Values matching `keep`, ordered by insertion.
    fn snapshot(&self, keep: impl Fn(&T) -> bool) -> Vec<T> {
        let mut slots: Vec<(u64, T)> = self
            .entries
            .iter()
            .filter(|entry| keep(&entry.value().value))
            .map(|entry| (entry.value().seq, entry.value().value.clone()))
            .collect();
        slots.sort_by_key(|(seq, _)| *seq);
        slots.into_iter().map(|(_, value)| value).collect()
    }
}

/// Volatile storage for a single process.
///
/// Every instance starts with the default categories. Nothing survives a
/// restart.
#[derive(Debug)]
pub struct InMemoryStorage {
    notes: Collection<Note>,
    categories: Collection<Category>,
    reminders: Collection<Reminder>,
}

impl InMemoryStorage {
    /// Create a store seeded with [`Category::defaults`].
    pub fn new() -> Self {
        let storage = Self::empty();
        for category in Category::defaults() {
            storage.add_category(category);
        }
        storage
    }

    /// Create a store with no seeded categories.
    pub fn empty() -> Self {
        Self {
            notes: Collection::new(),
            categories: Collection::new(),
            reminders: Collection::new(),
        }
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn add_note(&self, note: Note) -> Note {
        self.notes.insert(note.id.clone(), note.clone());
        debug!(note_id = %note.id, "Inserted note");
        note
    }

    fn get_note(&self, id: &str) -> Option<Note> {
        self.notes.get(id)
    }

    fn list_notes(&self) -> Vec<Note> {
        self.notes.snapshot(|_| true)
    }

    fn update_note(&self, id: &str, update: &NoteUpdate) -> Option<Note> {
        let updated = self.notes.update(id, |note| note.apply(update, now()));
        if updated.is_some() {
            debug!(note_id = %id, "Updated note");
        }
        updated
    }

    fn delete_note(&self, id: &str) -> bool {
        let removed = self.notes.remove(id);
        if removed {
            debug!(note_id = %id, "Deleted note");
        }
        removed
    }

    fn add_category(&self, category: Category) -> Category {
        self.categories
            .insert(category.id.clone(), category.clone());
        debug!(category_id = %category.id, name = %category.name, "Inserted category");
        category
    }

    fn list_categories(&self) -> Vec<Category> {
        self.categories.snapshot(|_| true)
    }

    fn add_reminder(&self, reminder: Reminder) -> Reminder {
        self.reminders
            .insert(reminder.id.clone(), reminder.clone());
        debug!(reminder_id = %reminder.id, note_id = %reminder.note_id, "Inserted reminder");
        reminder
    }

    fn list_reminders(&self) -> Vec<Reminder> {
        self.reminders.snapshot(|_| true)
    }

    fn reminders_for_note(&self, note_id: &str) -> Vec<Reminder> {
        self.reminders.snapshot(|r| r.note_id == note_id)
    }

    fn update_reminder(&self, id: &str, completed: bool) -> Option<Reminder> {
        self.reminders.update(id, |reminder| Reminder {
            completed,
            ..reminder.clone()
        })
    }
}
