//! Note (card) record and its partial update shape.
//!
//! # Invariants
//! - `list` always names the owning list, even if that list is not known yet.
//! - `archived` is a field flip; notes are never removed from a store.
//! - Merge only overwrites fields present in the update; `extra` keys are
//!   merged key-by-key so unknown fields are never dropped.

use crate::model::{position_order, EntityId, EntityKind};
use crate::store::{Entity, EntityUpdate, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A card on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: EntityId,
    #[serde(default)]
    pub desc: String,
    /// Owning list id. May dangle; rendering tolerates unknown lists.
    pub list: EntityId,
    #[serde(default)]
    pub archived: bool,
    /// Position inside the owning list; the default sort key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<f64>,
    /// Server revision counter, opaque to the core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    /// Fields the core does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    pub fn new(
        id: impl Into<EntityId>,
        list: impl Into<EntityId>,
        desc: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            desc: desc.into(),
            list: list.into(),
            archived: false,
            pos: None,
            revision: None,
            extra: Map::new(),
        }
    }

    /// Returns whether the note should be shown on the board.
    pub fn is_active(&self) -> bool {
        !self.archived
    }
}

/// Inbound note payload. Every field except `id` is optional so partial
/// pushes merge instead of clobbering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NoteUpdate {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn list(mut self, list: impl Into<EntityId>) -> Self {
        self.list = Some(list.into());
        self
    }

    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = Some(archived);
        self
    }

    pub fn pos(mut self, pos: f64) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

impl From<Note> for NoteUpdate {
    fn from(note: Note) -> Self {
        Self {
            id: Some(note.id),
            desc: Some(note.desc),
            list: Some(note.list),
            archived: Some(note.archived),
            pos: note.pos,
            revision: note.revision,
            extra: note.extra,
        }
    }
}

impl EntityUpdate for NoteUpdate {
    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }
}

impl Entity for Note {
    type Update = NoteUpdate;
    const KIND: EntityKind = EntityKind::Note;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_update(id: EntityId, update: NoteUpdate) -> Result<Self, StoreError> {
        let Some(list) = update.list else {
            return Err(StoreError::MissingField {
                kind: EntityKind::Note,
                id,
                field: "list",
            });
        };
        Ok(Self {
            id,
            desc: update.desc.unwrap_or_default(),
            list,
            archived: update.archived.unwrap_or(false),
            pos: update.pos,
            revision: update.revision,
            extra: update.extra,
        })
    }

    fn merge(&mut self, update: NoteUpdate) {
        if let Some(desc) = update.desc {
            self.desc = desc;
        }
        if let Some(list) = update.list {
            self.list = list;
        }
        if let Some(archived) = update.archived {
            self.archived = archived;
        }
        self.pos = update.pos.or(self.pos);
        self.revision = update.revision.or(self.revision);
        self.extra.extend(update.extra);
    }

    fn default_order(left: &Self, right: &Self) -> Ordering {
        position_order(left.pos, &left.id, right.pos, &right.id)
    }
}
