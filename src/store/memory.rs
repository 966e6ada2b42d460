use nanoid::nanoid;
use std::sync::Mutex;

use super::NoteStore;
use crate::{
    errors::ServerError,
    models::note::{Note, NoteDraft, NoteId, NotePatch},
};

/// Keeps notes in insertion order for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    notes: Mutex<Vec<Note>>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding one example note, handy when poking at a fresh server.
    pub fn seeded() -> Self {
        let store = Self::new();
        if let Ok(mut notes) = store.notes.lock() {
            notes.push(Note {
                id: NoteId::Key(nanoid!()),
                title: "Nota de Exemplo".to_string(),
                content: Some("Este é o conteúdo da primeira nota.".to_string()),
                created_at: None,
                updated_at: None,
            });
        }
        store
    }
}

fn fresh_key(notes: &[Note]) -> String {
    loop {
        let key = nanoid!();
        if !notes.iter().any(|n| matches!(&n.id, NoteId::Key(k) if *k == key)) {
            return key;
        }
    }
}

fn position(notes: &[Note], id: &str) -> Result<usize, ServerError> {
    notes
        .iter()
        .position(|n| matches!(&n.id, NoteId::Key(k) if k == id))
        .ok_or_else(|| ServerError::NotFound(id.to_string()))
}

impl NoteStore for MemoryNoteStore {
    fn kind(&self) -> &'static str {
        "memory"
    }

    fn insert(&self, draft: &NoteDraft) -> Result<Note, ServerError> {
        let mut notes = self.notes.lock()?;
        let note = Note {
            id: NoteId::Key(fresh_key(&notes)),
            title: draft.title.clone(),
            content: draft.content.clone(),
            created_at: None,
            updated_at: None,
        };
        notes.push(note.clone());
        log::debug!("stored note {}", note.id);
        Ok(note)
    }

    fn list(&self) -> Result<Vec<Note>, ServerError> {
        Ok(self.notes.lock()?.clone())
    }

    fn get(&self, id: &str) -> Result<Note, ServerError> {
        let notes = self.notes.lock()?;
        let idx = position(&notes, id)?;
        Ok(notes[idx].clone())
    }

    fn update(&self, id: &str, patch: &NotePatch) -> Result<Note, ServerError> {
        let mut notes = self.notes.lock()?;
        let idx = position(&notes, id)?;
        notes[idx].apply(patch);
        log::debug!("updated note {}", id);
        Ok(notes[idx].clone())
    }

    fn delete(&self, id: &str) -> Result<(), ServerError> {
        let mut notes = self.notes.lock()?;
        let idx = position(&notes, id)?;
        notes.remove(idx);
        log::debug!("deleted note {}", id);
        Ok(())
    }
}
