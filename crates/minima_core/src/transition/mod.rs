//! Classification of inbound updates into board transitions.
//!
//! # Responsibility
//! - Map `(previous, updated)` record pairs to exactly one transition kind.
//!
//! # Invariants
//! - Classification is total and pure: no input makes it fail or mutate.
//! - At most one salient transition is reported per inbound update.

mod detector;

pub use detector::{classify_list, classify_note, ListTransition, NoteTransition};
