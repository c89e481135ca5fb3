//! List (column) record and its partial update shape.
//!
//! Lists are never archived or deleted; the only transition with meaning is
//! a rename.

use crate::model::{position_order, EntityId, EntityKind};
use crate::store::{Entity, EntityUpdate, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// A named column that owns notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl List {
    pub fn new(id: impl Into<EntityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            pos: None,
            revision: None,
            extra: Map::new(),
        }
    }
}

/// Inbound list payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ListUpdate {
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn pos(mut self, pos: f64) -> Self {
        self.pos = Some(pos);
        self
    }
}

impl From<List> for ListUpdate {
    fn from(list: List) -> Self {
        Self {
            id: Some(list.id),
            name: Some(list.name),
            pos: list.pos,
            revision: list.revision,
            extra: list.extra,
        }
    }
}

impl EntityUpdate for ListUpdate {
    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }
}

impl Entity for List {
    type Update = ListUpdate;
    const KIND: EntityKind = EntityKind::List;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_update(id: EntityId, update: ListUpdate) -> Result<Self, StoreError> {
        Ok(Self {
            id,
            name: update.name.unwrap_or_default(),
            pos: update.pos,
            revision: update.revision,
            extra: update.extra,
        })
    }

    fn merge(&mut self, update: ListUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        self.pos = update.pos.or(self.pos);
        self.revision = update.revision.or(self.revision);
        self.extra.extend(update.extra);
    }

    fn default_order(left: &Self, right: &Self) -> Ordering {
        position_order(left.pos, &left.id, right.pos, &right.id)
    }
}
