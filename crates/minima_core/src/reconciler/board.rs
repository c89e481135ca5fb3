//! The board reconciler.

use crate::config::BoardConfig;
use crate::model::list::{List, ListUpdate};
use crate::model::note::{Note, NoteUpdate};
use crate::model::{EntityId, EntityKind};
use crate::notify::{compose_note_notification, Composed, Notifier};
use crate::reconciler::{BootstrapSummary, PushOutcome, ReconcileError, ViewBuilder};
use crate::store::{Comparator, EntityStore, StoreError};
use crate::transition::{classify_list, classify_note, ListTransition, NoteTransition};
use crate::wire::{decode_board, decode_push_frame, BoardSnapshot, PushMessage};
use log::{debug, info, warn};
use std::time::Instant;

/// Applies bootstrap, push and local events to the board stores.
pub struct BoardReconciler<N: Notifier> {
    config: BoardConfig,
    lists: EntityStore<List>,
    notes: EntityStore<Note>,
    notifier: N,
    view_builder: Option<ViewBuilder>,
    bootstrapped: bool,
}

impl<N: Notifier> BoardReconciler<N> {
    pub fn new(config: BoardConfig, notifier: N) -> Self {
        Self {
            config,
            lists: EntityStore::new(),
            notes: EntityStore::new(),
            notifier,
            view_builder: None,
            bootstrapped: false,
        }
    }

    /// Registers the view builder. It runs once, right after bootstrap, or
    /// immediately when the board is already bootstrapped.
    pub fn with_view(mut self, builder: ViewBuilder) -> Self {
        self.view_builder = Some(builder);
        if self.bootstrapped {
            self.build_view();
        }
        self
    }

    /// Replaces the note ordering (default: `pos`, then id).
    pub fn with_note_order(mut self, comparator: Comparator<Note>) -> Self {
        self.notes.set_comparator(comparator);
        self.notes.resort();
        self
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn lists(&self) -> &EntityStore<List> {
        &self.lists
    }

    pub fn notes(&self) -> &EntityStore<Note> {
        &self.notes
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    /// Mirrors the notifications toggle; classification is unaffected.
    pub fn set_notifications_enabled(&mut self, enabled: bool) {
        self.config.notifications_enabled = enabled;
        info!(
            "event=notifications_toggle module=reconciler status=ok enabled={}",
            enabled
        );
    }

    /// Applies the initial board payload.
    ///
    /// Lists land before notes, no notification fires, and the view is built
    /// once both stores are populated. Malformed entries are skipped and
    /// counted in `BootstrapSummary::rejected`.
    ///
    /// # Errors
    /// - `AlreadyBootstrapped` on any call after the first successful one.
    pub fn bootstrap(
        &mut self,
        snapshot: BoardSnapshot,
    ) -> Result<BootstrapSummary, ReconcileError> {
        if self.bootstrapped {
            warn!(
                "event=bootstrap module=reconciler status=rejected error_code=already_bootstrapped"
            );
            return Err(ReconcileError::AlreadyBootstrapped);
        }

        let started_at = Instant::now();
        let mut rejected = 0;
        for list in snapshot.lists {
            if let Err(err) = self.lists.upsert(list) {
                rejected += 1;
                log_rejected_entry(&err);
            }
        }
        for note in snapshot.stories {
            if let Err(err) = self.notes.upsert(note) {
                rejected += 1;
                log_rejected_entry(&err);
            }
        }
        self.lists.resort();
        self.notes.resort();
        self.bootstrapped = true;

        let view_built = self.build_view();
        let summary = BootstrapSummary {
            lists: self.lists.len(),
            notes: self.notes.len(),
            rejected,
            view_built,
        };
        info!(
            "event=bootstrap module=reconciler status=ok lists={} notes={} rejected={} view_built={} duration_ms={}",
            summary.lists,
            summary.notes,
            summary.rejected,
            summary.view_built,
            started_at.elapsed().as_millis()
        );
        Ok(summary)
    }

    /// Decodes and applies the raw board payload.
    ///
    /// Entries that fail to decode are skipped and added to
    /// `BootstrapSummary::rejected`; only a malformed envelope fails.
    pub fn on_board_payload(&mut self, bytes: &[u8]) -> Result<BootstrapSummary, ReconcileError> {
        let decoded = decode_board(bytes).map_err(|err| {
            warn!(
                "event=bootstrap module=reconciler status=rejected error_code=decode_failed error={}",
                err
            );
            ReconcileError::from(err)
        })?;
        let mut summary = self.bootstrap(decoded.snapshot)?;
        summary.rejected += decoded.rejected;
        Ok(summary)
    }

    /// Applies one inbound note update and emits at most one notification.
    ///
    /// # Errors
    /// - `Store` when the update lacks an id, or a first-seen note lacks its
    ///   list. Nothing is mutated and nothing is notified.
    pub fn on_note_event(&mut self, update: NoteUpdate) -> Result<NoteTransition, ReconcileError> {
        let upserted = match self.notes.upsert(update) {
            Ok(upserted) => upserted,
            Err(err) => {
                warn!(
                    "event=note_event module=reconciler status=rejected error={}",
                    err
                );
                return Err(err.into());
            }
        };

        let transition = classify_note(upserted.previous.as_ref(), &upserted.current);
        self.emit_note_notification(&transition, &upserted.current);
        self.notes.resort();

        debug!(
            "event=note_event module=reconciler status=ok note_id={} transition={}",
            upserted.current.id,
            transition.as_str()
        );
        Ok(transition)
    }

    /// Applies one inbound list update. List changes never notify.
    pub fn on_list_event(&mut self, update: ListUpdate) -> Result<ListTransition, ReconcileError> {
        let upserted = match self.lists.upsert(update) {
            Ok(upserted) => upserted,
            Err(err) => {
                warn!(
                    "event=list_event module=reconciler status=rejected error={}",
                    err
                );
                return Err(err.into());
            }
        };

        let transition = classify_list(upserted.previous.as_ref(), &upserted.current);
        self.lists.resort();

        debug!(
            "event=list_event module=reconciler status=ok list_id={} transition={}",
            upserted.current.id,
            transition.as_str()
        );
        Ok(transition)
    }

    /// Decodes one push frame and dispatches it by kind.
    ///
    /// # Errors
    /// - `Wire` when the frame is malformed or names an unknown kind.
    pub fn on_push_frame(&mut self, bytes: &[u8]) -> Result<PushOutcome, ReconcileError> {
        let message = decode_push_frame(bytes).map_err(|err| {
            warn!(
                "event=push_frame module=reconciler status=rejected error_code=decode_failed error={}",
                err
            );
            ReconcileError::from(err)
        })?;
        debug!(
            "event=push_frame module=reconciler status=ok kind={}",
            message.kind()
        );

        match message {
            PushMessage::Story(update) => self.on_note_event(update).map(PushOutcome::Note),
            PushMessage::List(update) => self.on_list_event(update).map(PushOutcome::List),
        }
    }

    /// Creates a note authored by the local user at the end of `list`.
    ///
    /// The local author is not notified about their own note. The returned
    /// record is what the transport should send to the server.
    ///
    /// # Errors
    /// - `ReadOnly` when local edits are disabled.
    pub fn create_local_note(
        &mut self,
        list: EntityId,
        desc: impl Into<String>,
    ) -> Result<Note, ReconcileError> {
        self.ensure_writable()?;

        let pos = self.next_position_in(&list);
        let update = NoteUpdate::new(EntityId::generate())
            .list(list)
            .desc(desc)
            .archived(false)
            .pos(pos);
        let upserted = self.notes.upsert(update)?;
        self.notes.resort();

        info!(
            "event=local_note_create module=reconciler status=ok note_id={} list_id={} pos={}",
            upserted.current.id, upserted.current.list, pos
        );
        Ok(upserted.current)
    }

    /// Merges a local edit into an existing note without notifying.
    ///
    /// # Errors
    /// - `ReadOnly` when local edits are disabled.
    /// - `Store` when the edit lacks an id.
    /// - `UnknownNote` when the id is not on the board.
    pub fn apply_local_note_edit(
        &mut self,
        update: NoteUpdate,
    ) -> Result<NoteTransition, ReconcileError> {
        self.ensure_writable()?;

        let Some(id) = update.id.clone().filter(|id| !id.is_blank()) else {
            return Err(StoreError::MissingId {
                kind: EntityKind::Note,
            }
            .into());
        };
        if !self.notes.contains(&id) {
            warn!(
                "event=local_note_edit module=reconciler status=rejected error_code=not_found note_id={}",
                id
            );
            return Err(ReconcileError::UnknownNote(id));
        }

        let upserted = self.notes.upsert(update)?;
        let transition = classify_note(upserted.previous.as_ref(), &upserted.current);
        self.notes.resort();

        info!(
            "event=local_note_edit module=reconciler status=ok note_id={} transition={}",
            id,
            transition.as_str()
        );
        Ok(transition)
    }

    fn ensure_writable(&self) -> Result<(), ReconcileError> {
        if self.config.readonly {
            warn!("event=local_edit module=reconciler status=rejected error_code=readonly");
            return Err(ReconcileError::ReadOnly);
        }
        Ok(())
    }

    fn next_position_in(&self, list: &EntityId) -> f64 {
        self.notes
            .iter()
            .filter(|note| &note.list == list)
            .filter_map(|note| note.pos)
            .reduce(f64::max)
            .map_or(0.0, |highest| highest + 1.0)
    }

    fn emit_note_notification(&mut self, transition: &NoteTransition, note: &Note) {
        let lists = &self.lists;
        let composed = compose_note_notification(transition, note, |id| {
            lists.get(id).map(|list| list.name.as_str())
        });

        match composed {
            Composed::Notify(notification) => {
                if !self.config.notifications_enabled {
                    debug!(
                        "event=notification module=reconciler status=skipped note_id={} transition={}",
                        note.id,
                        transition.as_str()
                    );
                    return;
                }
                self.notifier.notify(&notification.title, &notification.body);
            }
            Composed::Suppressed { missing } => {
                warn!(
                    "event=notification module=reconciler status=suppressed note_id={} missing_list_id={}",
                    note.id, missing
                );
            }
            Composed::Silent => {}
        }
    }

    fn build_view(&mut self) -> bool {
        let Some(builder) = self.view_builder.take() else {
            return false;
        };
        let observers = builder(&self.lists, &self.notes);
        if let Some(observer) = observers.lists {
            self.lists.set_observer(observer);
        }
        if let Some(observer) = observers.notes {
            self.notes.set_observer(observer);
        }
        info!("event=view_build module=reconciler status=ok");
        true
    }
}

fn log_rejected_entry(err: &StoreError) {
    warn!(
        "event=bootstrap_entry module=reconciler status=rejected error={}",
        err
    );
}
