use std::sync::Arc;

use crate::{
    errors::ServerError,
    models::note::{NewNote, Note, NotePatch},
    store::NoteStore,
};

/// Validates requests and forwards them to the configured store. Holds no
/// notes of its own; every call reads through to the store.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<dyn NoteStore>,
}

impl NoteService {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }

    pub fn store_kind(&self) -> &'static str {
        self.store.kind()
    }

    pub fn create(&self, input: NewNote) -> Result<Note, ServerError> {
        let draft = input.validate()?;
        self.store.insert(&draft)
    }

    pub fn list(&self) -> Result<Vec<Note>, ServerError> {
        self.store.list()
    }

    pub fn get(&self, id: &str) -> Result<Note, ServerError> {
        self.store.get(id)
    }

    /// Rejects an invalid title before the store is touched.
    pub fn update(&self, id: &str, patch: NotePatch) -> Result<Note, ServerError> {
        patch.validate()?;
        self.store.update(id, &patch)
    }

    pub fn delete(&self, id: &str) -> Result<(), ServerError> {
        self.store.delete(id)
    }
}
