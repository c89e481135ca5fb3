//! Board domain model.
//!
//! # Responsibility
//! - Define the typed `Note` and `List` records held by the board stores.
//! - Define the partial update shapes delivered by push/bootstrap payloads.
//!
//! # Invariants
//! - Every stored entity carries a stable, non-blank `EntityId`.
//! - Unknown wire fields survive merge verbatim in the `extra` map.

pub mod id;
pub mod list;
pub mod note;

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

pub use id::EntityId;

/// The two entity kinds a board is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Note,
    List,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::List => "list",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Orders by `pos` ascending, unpositioned entities last, then by id.
pub(crate) fn position_order(
    left_pos: Option<f64>,
    left_id: &EntityId,
    right_pos: Option<f64>,
    right_id: &EntityId,
) -> Ordering {
    let by_pos = match (left_pos, right_pos) {
        (Some(l), Some(r)) => l.total_cmp(&r),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_pos.then_with(|| left_id.cmp(right_id))
}
