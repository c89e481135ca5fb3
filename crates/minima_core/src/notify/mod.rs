//! Outbound notification contract and message composition.
//!
//! # Responsibility
//! - Define the fire-and-forget `Notifier` seam to the display widget.
//! - Turn a classified note transition into at most one `(title, body)`.
//!
//! # Invariants
//! - A move whose source or destination list cannot be resolved is
//!   suppressed, never rendered with a placeholder name.

use crate::model::note::Note;
use crate::model::EntityId;
use crate::transition::NoteTransition;
use log::info;

pub const TITLE_CREATED: &str = "New note";
pub const TITLE_ARCHIVED: &str = "Note archived";

/// One human-readable notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Sink for notifications. Delivery is fire-and-forget.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

impl<F> Notifier for F
where
    F: FnMut(&str, &str),
{
    fn notify(&mut self, title: &str, body: &str) {
        self(title, body)
    }
}

/// Keeps every notification in memory, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingNotifier {
    pub sent: Vec<Notification>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.sent)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.sent.push(Notification::new(title, body));
    }
}

/// Forwards notifications to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        info!(
            "event=notification module=notify status=ok title={:?} body_chars={}",
            title,
            body.chars().count()
        );
    }
}

/// Outcome of composing the message for one note transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composed {
    Notify(Notification),
    /// The transition carries no notification.
    Silent,
    /// A list referenced by a move could not be resolved.
    Suppressed { missing: EntityId },
}

/// Builds the notification for `transition` on `note`.
///
/// `list_name` resolves list ids against local state.
pub fn compose_note_notification<'a>(
    transition: &NoteTransition,
    note: &Note,
    list_name: impl Fn(&EntityId) -> Option<&'a str>,
) -> Composed {
    match transition {
        NoteTransition::Created => Composed::Notify(Notification::new(TITLE_CREATED, &note.desc)),
        NoteTransition::Archived => {
            Composed::Notify(Notification::new(TITLE_ARCHIVED, &note.desc))
        }
        NoteTransition::Moved { from, to } => {
            let Some(from_name) = list_name(from) else {
                return Composed::Suppressed {
                    missing: from.clone(),
                };
            };
            let Some(to_name) = list_name(to) else {
                return Composed::Suppressed {
                    missing: to.clone(),
                };
            };
            Composed::Notify(Notification::new(
                format!("Note moved from \"{from_name}\" to \"{to_name}\""),
                &note.desc,
            ))
        }
        NoteTransition::Updated | NoteTransition::NoOp => Composed::Silent,
    }
}

#[cfg(test)]
mod tests {
    use super::{compose_note_notification, Composed, Notification, Notifier, RecordingNotifier};
    use crate::model::note::Note;
    use crate::model::EntityId;
    use crate::transition::NoteTransition;

    fn names(id: &EntityId) -> Option<&'static str> {
        match id.as_str() {
            "1" => Some("Todo"),
            "2" => Some("Done"),
            _ => None,
        }
    }

    #[test]
    fn moved_names_both_lists() {
        let note = Note::new("10", "2", "A");
        let transition = NoteTransition::Moved {
            from: EntityId::from("1"),
            to: EntityId::from("2"),
        };
        assert_eq!(
            compose_note_notification(&transition, &note, names),
            Composed::Notify(Notification::new("Note moved from \"Todo\" to \"Done\"", "A"))
        );
    }

    #[test]
    fn moved_with_unknown_list_is_suppressed() {
        let note = Note::new("10", "9", "A");
        let transition = NoteTransition::Moved {
            from: EntityId::from("1"),
            to: EntityId::from("9"),
        };
        assert_eq!(
            compose_note_notification(&transition, &note, names),
            Composed::Suppressed {
                missing: EntityId::from("9")
            }
        );
    }

    #[test]
    fn updated_and_noop_are_silent() {
        let note = Note::new("10", "1", "A");
        assert_eq!(
            compose_note_notification(&NoteTransition::Updated, &note, names),
            Composed::Silent
        );
        assert_eq!(
            compose_note_notification(&NoteTransition::NoOp, &note, names),
            Composed::Silent
        );
    }

    #[test]
    fn closures_are_notifiers() {
        let mut seen = Vec::new();
        {
            let mut sink = |title: &str, body: &str| seen.push(format!("{title}:{body}"));
            sink.notify("New note", "A");
        }
        assert_eq!(seen, vec!["New note:A".to_string()]);

        let mut recorder = RecordingNotifier::new();
        recorder.notify("Note archived", "B");
        assert_eq!(recorder.take(), vec![Notification::new("Note archived", "B")]);
        assert!(recorder.sent.is_empty());
    }
}
