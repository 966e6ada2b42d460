use chrono::Utc;
use diesel::{
    pg::PgConnection,
    prelude::*,
    r2d2::{ConnectionManager, PooledConnection},
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use super::NoteStore;
use crate::{
    errors::ServerError,
    models::note::{InsertNote, Note, NoteChangeset, NoteDraft, NotePatch, QueryNote},
    schema::notes::dsl::{id, notes},
    Pool,
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Notes persisted in the `notes` table. Every call checks a connection out of
/// the pool and hands it back when the call returns, whatever the outcome.
#[derive(Clone)]
pub struct PgNoteStore {
    pool: Pool,
}

impl PgNoteStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn connect(database_url: &str, max_size: u32) -> Result<Self, ServerError> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = r2d2::Pool::builder().max_size(max_size).build(manager)?;
        Ok(Self::new(pool))
    }

    /// Creates the `notes` table when it does not exist yet.
    pub fn run_migrations(&self) -> Result<(), ServerError> {
        let mut connection = self.connection()?;
        let applied = connection.run_pending_migrations(MIGRATIONS).map_err(|e| {
            log::error!("migrations: {e}");
            ServerError::MigrationError
        })?;
        for version in applied {
            log::info!("applied migration {version}");
        }
        Ok(())
    }

    fn connection(&self) -> Result<PooledConnection<ConnectionManager<PgConnection>>, ServerError> {
        Ok(self.pool.get()?)
    }
}

// Anything that is not a row number cannot name a row.
fn serial(note_id: &str) -> Result<i32, ServerError> {
    note_id
        .parse::<i32>()
        .map_err(|_| ServerError::NotFound(note_id.to_string()))
}

impl NoteStore for PgNoteStore {
    fn kind(&self) -> &'static str {
        "postgres"
    }

    fn insert(&self, draft: &NoteDraft) -> Result<Note, ServerError> {
        let mut connection = self.connection()?;
        let time_now = Utc::now();

        let row = diesel::insert_into(notes)
            .values(&InsertNote {
                title: &draft.title,
                content: draft.content.as_deref(),
                created_at: time_now,
                updated_at: time_now,
            })
            .get_result::<QueryNote>(&mut connection)?;
        log::debug!("stored note {}", row.id);
        Ok(row.into())
    }

    fn list(&self) -> Result<Vec<Note>, ServerError> {
        let mut connection = self.connection()?;
        let rows = notes.order(id.asc()).load::<QueryNote>(&mut connection)?;
        Ok(rows.into_iter().map(Note::from).collect())
    }

    fn get(&self, note_id: &str) -> Result<Note, ServerError> {
        let key = serial(note_id)?;
        let mut connection = self.connection()?;

        notes
            .find(key)
            .get_result::<QueryNote>(&mut connection)
            .optional()?
            .map(Note::from)
            .ok_or_else(|| ServerError::NotFound(note_id.to_string()))
    }

    fn update(&self, note_id: &str, patch: &NotePatch) -> Result<Note, ServerError> {
        let key = serial(note_id)?;
        let mut connection = self.connection()?;

        let row = diesel::update(notes.find(key))
            .set(&NoteChangeset::from_patch(patch, Utc::now()))
            .get_result::<QueryNote>(&mut connection)
            .optional()?;
        match row {
            Some(row) => {
                log::debug!("updated note {}", row.id);
                Ok(row.into())
            }
            None => Err(ServerError::NotFound(note_id.to_string())),
        }
    }

    fn delete(&self, note_id: &str) -> Result<(), ServerError> {
        let key = serial(note_id)?;
        let mut connection = self.connection()?;

        match diesel::delete(notes.find(key)).execute(&mut connection)? {
            0 => Err(ServerError::NotFound(note_id.to_string())),
            _ => {
                log::debug!("deleted note {}", key);
                Ok(())
            }
        }
    }
}
