//! Core reconciliation logic for the Minima collaborative board client.
//! This crate owns the local board model and decides which inbound updates
//! deserve a notification; rendering and transport live elsewhere.

pub mod config;
pub mod logging;
pub mod model;
pub mod notify;
pub mod reconciler;
pub mod store;
pub mod transition;
pub mod wire;

pub use config::{default_log_level, BoardConfig, ConfigError, LoggingConfig};
pub use logging::{init_logging, init_logging_with, logging_status};
pub use model::list::{List, ListUpdate};
pub use model::note::{Note, NoteUpdate};
pub use model::{EntityId, EntityKind};
pub use notify::{LogNotifier, Notification, Notifier, RecordingNotifier};
pub use reconciler::{
    BoardReconciler, BootstrapSummary, PushOutcome, ReconcileError, ViewBuilder, ViewObservers,
};
pub use store::{
    ChangeObserver, Comparator, Entity, EntityStore, EntityUpdate, StoreChange, StoreError,
    Upserted,
};
pub use transition::{classify_list, classify_note, ListTransition, NoteTransition};
pub use wire::{
    decode_board, decode_push_frame, encode_list_frame, encode_note_frame, BoardSnapshot,
    DecodedBoard, PushMessage, WireError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
