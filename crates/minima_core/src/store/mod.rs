//! Keyed, sort-aware entity containers.
//!
//! # Responsibility
//! - Own every note/list record known to the client.
//! - Merge inbound updates by id and keep a deterministic enumeration order.
//! - Signal the single registered observer after each mutation.
//!
//! # Invariants
//! - Keys are unique; `order` holds exactly the keys of `records`.
//! - Lookups never fail on a missing id.
//! - An update without an id never mutates the store.

mod entity_store;

pub use entity_store::{ChangeObserver, Comparator, EntityStore, StoreChange, Upserted};

use crate::model::{EntityId, EntityKind};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record type that can live in an `EntityStore`.
pub trait Entity: Clone + PartialEq + 'static {
    /// Partial payload merged into an existing record.
    type Update: EntityUpdate;
    const KIND: EntityKind;

    fn id(&self) -> &EntityId;
    /// Builds a first-seen record from an update carrying `id`.
    fn from_update(id: EntityId, update: Self::Update) -> Result<Self, StoreError>;
    /// Overwrites fields present in `update`; identity is left untouched.
    fn merge(&mut self, update: Self::Update);
    /// Sort order used when no comparator is plugged in.
    fn default_order(left: &Self, right: &Self) -> Ordering;
}

/// Inbound payload addressed at one entity.
pub trait EntityUpdate {
    fn id(&self) -> Option<&EntityId>;
}

/// Rejections raised by `EntityStore::upsert`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The update does not say which entity it targets.
    MissingId { kind: EntityKind },
    /// A first-seen entity lacks a field it cannot exist without.
    MissingField {
        kind: EntityKind,
        id: EntityId,
        field: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingId { kind } => write!(f, "{kind} update is missing an id"),
            Self::MissingField { kind, id, field } => {
                write!(f, "new {kind} `{id}` is missing required field `{field}`")
            }
        }
    }
}

impl Error for StoreError {}
