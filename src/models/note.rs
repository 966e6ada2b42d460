use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable};
use serde::Deserializer;
use serde_derive::{Deserialize, Serialize};
use std::fmt;

use crate::{
    errors::{CommonError, Fields, ServerError},
    schema::notes,
};

pub const TITLE_MAX_CHARS: usize = 100;

/// Identifier assigned by the store that created the note: a random key for
/// the in-memory store, a sequence number for the database.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum NoteId {
    Serial(i32),
    Key(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Serial(n) => write!(f, "{}", n),
            NoteId::Key(k) => f.write_str(k),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Merges the fields present in `patch`; absent fields keep their value.
    pub fn apply(&mut self, patch: &NotePatch) {
        if let Some(Some(t)) = &patch.title {
            self.title = t.clone();
        }
        if let Some(c) = &patch.content {
            self.content = c.clone();
        }
    }
}

/// Body of a create request. `title` stays optional here so a missing title
/// is reported as a validation failure rather than a decode failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A create request that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: Option<String>,
}

impl NewNote {
    pub fn validate(self) -> Result<NoteDraft, ServerError> {
        match self.title {
            None => Err(ServerError::UserError(vec![Fields::Title(
                CommonError::Missing,
            )])),
            Some(title) => match check_title(&title) {
                Some(field) => Err(ServerError::UserError(vec![field])),
                None => Ok(NoteDraft {
                    title,
                    content: self.content,
                }),
            },
        }
    }
}

/// Body of an update request. An absent key leaves the stored value alone.
/// An explicit `null` clears `content` and is rejected for `title`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct NotePatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
}

impl NotePatch {
    pub fn validate(&self) -> Result<(), ServerError> {
        let field = match &self.title {
            None => None,
            Some(None) => Some(Fields::Title(CommonError::Empty)),
            Some(Some(title)) => check_title(title),
        };
        match field {
            Some(field) => Err(ServerError::UserError(vec![field])),
            None => Ok(()),
        }
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn check_title(title: &str) -> Option<Fields> {
    if title.trim().is_empty() {
        Some(Fields::Title(CommonError::Empty))
    } else if title.chars().count() > TITLE_MAX_CHARS {
        Some(Fields::Title(CommonError::TooLong))
    } else {
        None
    }
}

#[derive(Clone, Debug, Queryable)]
pub struct QueryNote {
    pub id: i32,
    pub title: String,
    pub content: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<QueryNote> for Note {
    fn from(row: QueryNote) -> Self {
        Note {
            id: NoteId::Serial(row.id),
            title: row.title,
            content: row.content,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = notes)]
pub struct InsertNote<'a> {
    pub title: &'a str,
    pub content: Option<&'a str>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(AsChangeset)]
#[diesel(table_name = notes)]
pub struct NoteChangeset<'a> {
    pub title: Option<&'a str>,
    pub content: Option<Option<&'a str>>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> NoteChangeset<'a> {
    pub fn from_patch(patch: &'a NotePatch, now: DateTime<Utc>) -> Self {
        NoteChangeset {
            title: patch.title.as_ref().and_then(|t| t.as_deref()),
            content: patch.content.as_ref().map(|c| c.as_deref()),
            updated_at: now,
        }
    }
}
