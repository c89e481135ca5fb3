//! Board reconciliation: applying inbound updates to local state.
//!
//! # Responsibility
//! - Own the note and list stores for one board session.
//! - Turn bootstrap, push and local-edit events into store mutations.
//! - Emit at most one notification per inbound note event.
//!
//! # Invariants
//! - Events run to completion in delivery order; there is no reentrancy.
//! - A rejected event leaves both stores untouched.
//! - The view is built once, after both stores hold the bootstrap payload.

mod board;

pub use board::BoardReconciler;

use crate::model::list::List;
use crate::model::note::Note;
use crate::model::EntityId;
use crate::store::{ChangeObserver, EntityStore, StoreError};
use crate::transition::{ListTransition, NoteTransition};
use crate::wire::WireError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Builds the view from read-only stores and returns the observers it wants
/// registered for incremental re-render.
pub type ViewBuilder = Box<dyn FnOnce(&EntityStore<List>, &EntityStore<Note>) -> ViewObservers>;

/// Change observers a view registers on the stores.
#[derive(Default)]
pub struct ViewObservers {
    pub lists: Option<ChangeObserver>,
    pub notes: Option<ChangeObserver>,
}

impl ViewObservers {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Counters reported after the bootstrap payload is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapSummary {
    pub lists: usize,
    pub notes: usize,
    /// Payload entries skipped because they were malformed.
    pub rejected: usize,
    pub view_built: bool,
}

/// Transition produced by one decoded push frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushOutcome {
    Note(NoteTransition),
    List(ListTransition),
}

/// Rejection of a single event. Never fatal to the reconciler.
#[derive(Debug)]
pub enum ReconcileError {
    AlreadyBootstrapped,
    /// Local edits are disabled for this board.
    ReadOnly,
    /// A local edit targets a note the board does not know.
    UnknownNote(EntityId),
    Store(StoreError),
    Wire(WireError),
}

impl Display for ReconcileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyBootstrapped => write!(f, "board snapshot was already applied"),
            Self::ReadOnly => write!(f, "board is read-only"),
            Self::UnknownNote(id) => write!(f, "note not found: {id}"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Wire(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReconcileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Wire(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for ReconcileError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<WireError> for ReconcileError {
    fn from(value: WireError) -> Self {
        Self::Wire(value)
    }
}
