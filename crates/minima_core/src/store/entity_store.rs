//! Generic in-memory store with upsert-by-id and pluggable ordering.

use crate::model::EntityId;
use crate::store::{Entity, EntityUpdate, StoreError};
use log::debug;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

/// Ordering used by `EntityStore::resort`.
pub type Comparator<E> = Box<dyn Fn(&E, &E) -> Ordering>;

/// Callback fired after each store mutation.
pub type ChangeObserver = Box<dyn FnMut(&StoreChange)>;

/// Change signal delivered to the store observer.
///
/// Delivery is at-least-once: a duplicate upsert still signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    /// One record was inserted or merged.
    Upserted(EntityId),
    /// Enumeration order was re-established.
    Resorted,
}

/// Result of one `upsert`: the record before and after the merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted<E> {
    /// `None` when the record was inserted by this call.
    pub previous: Option<E>,
    pub current: E,
}

impl<E> Upserted<E> {
    pub fn is_insert(&self) -> bool {
        self.previous.is_none()
    }
}

/// Keyed container of one entity kind.
pub struct EntityStore<E: Entity> {
    records: HashMap<EntityId, E>,
    order: Vec<EntityId>,
    comparator: Comparator<E>,
    observer: Option<ChangeObserver>,
}

impl<E: Entity> EntityStore<E> {
    /// Creates an empty store ordered by `Entity::default_order`.
    pub fn new() -> Self {
        Self::with_comparator(Box::new(E::default_order))
    }

    pub fn with_comparator(comparator: Comparator<E>) -> Self {
        Self {
            records: HashMap::new(),
            order: Vec::new(),
            comparator,
            observer: None,
        }
    }

    /// Installs the change observer, returning the one it replaces.
    pub fn set_observer(&mut self, observer: ChangeObserver) -> Option<ChangeObserver> {
        self.observer.replace(observer)
    }

    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Replaces the sort order. Takes effect on the next `resort`.
    pub fn set_comparator(&mut self, comparator: Comparator<E>) {
        self.comparator = comparator;
    }

    /// Inserts a first-seen record or merges into the existing one.
    ///
    /// # Errors
    /// - `StoreError::MissingId` when the update names no entity or a blank one.
    /// - `StoreError::MissingField` when a first-seen record is incomplete.
    ///
    /// Rejected updates leave the store untouched and do not signal.
    pub fn upsert(&mut self, update: E::Update) -> Result<Upserted<E>, StoreError> {
        let Some(id) = update.id().filter(|id| !id.is_blank()).cloned() else {
            return Err(StoreError::MissingId { kind: E::KIND });
        };

        let upserted = match self.records.get_mut(&id) {
            Some(existing) => {
                let previous = existing.clone();
                existing.merge(update);
                Upserted {
                    previous: Some(previous),
                    current: existing.clone(),
                }
            }
            None => {
                let created = E::from_update(id.clone(), update)?;
                self.records.insert(id.clone(), created.clone());
                self.order.push(id.clone());
                Upserted {
                    previous: None,
                    current: created,
                }
            }
        };

        self.signal(StoreChange::Upserted(id));
        Ok(upserted)
    }

    pub fn get(&self, id: &EntityId) -> Option<&E> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Enumerates records in store order.
    ///
    /// Order reflects the last `resort`; records inserted since then trail.
    pub fn iter(&self) -> impl Iterator<Item = &E> + '_ {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.order
    }

    /// Re-establishes deterministic order. Idempotent.
    pub fn resort(&mut self) {
        let Self {
            records,
            order,
            comparator,
            ..
        } = self;
        order.sort_by(|left, right| match (records.get(left), records.get(right)) {
            (Some(l), Some(r)) => (**comparator)(l, r),
            _ => left.cmp(right),
        });
        debug!(
            "event=store_resort module=store status=ok kind={} size={}",
            E::KIND,
            self.order.len()
        );
        self.signal(StoreChange::Resorted);
    }

    fn signal(&mut self, change: StoreChange) {
        if let Some(observer) = self.observer.as_mut() {
            observer(&change);
        }
    }
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity + Debug> Debug for EntityStore<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityStore")
            .field("kind", &E::KIND)
            .field("records", &self.iter().collect::<Vec<_>>())
            .field("has_observer", &self.has_observer())
            .finish()
    }
}
