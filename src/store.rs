use crate::{
    errors::ServerError,
    models::note::{Note, NoteDraft, NotePatch},
};

pub mod memory;
pub mod postgres;

pub use memory::MemoryNoteStore;
pub use postgres::PgNoteStore;

/// Owns the canonical collection of notes. Implementations are shared by
/// every worker, so each call stands on its own.
pub trait NoteStore: Send + Sync {
    /// Short name reported by the index route and in startup logs.
    fn kind(&self) -> &'static str;

    /// Stores a validated draft under a freshly generated id.
    fn insert(&self, draft: &NoteDraft) -> Result<Note, ServerError>;

    fn list(&self) -> Result<Vec<Note>, ServerError>;

    /// # Errors
    ///
    /// `ServerError::NotFound` when no note has this id.
    fn get(&self, id: &str) -> Result<Note, ServerError>;

    /// Merges `patch` into the stored note and returns the result.
    ///
    /// # Errors
    ///
    /// `ServerError::NotFound` when no note has this id.
    fn update(&self, id: &str, patch: &NotePatch) -> Result<Note, ServerError>;

    /// # Errors
    ///
    /// `ServerError::NotFound` when no note has this id.
    fn delete(&self, id: &str) -> Result<(), ServerError>;
}
