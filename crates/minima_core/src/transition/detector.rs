//! Transition rules for notes and lists.

use crate::model::list::List;
use crate::model::note::Note;
use crate::model::EntityId;

/// What one inbound note update meant relative to local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteTransition {
    /// First sighting of a live note.
    Created,
    /// The note changed owning list.
    Moved { from: EntityId, to: EntityId },
    /// A known live note became archived.
    Archived,
    /// Some field changed without a salient transition.
    Updated,
    /// Nothing observable changed.
    NoOp,
}

impl NoteTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Moved { .. } => "moved",
            Self::Archived => "archived",
            Self::Updated => "updated",
            Self::NoOp => "noop",
        }
    }
}

/// What one inbound list update meant relative to local state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListTransition {
    Created,
    Renamed { from: String, to: String },
    Updated,
    NoOp,
}

impl ListTransition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Renamed { .. } => "renamed",
            Self::Updated => "updated",
            Self::NoOp => "noop",
        }
    }
}

/// Classifies a note update. First matching rule wins:
///
/// 1. unseen and live: `Created`
/// 2. unseen and already archived: `NoOp`, so late joiners are not spammed
///    with history
/// 3. owning list changed: `Moved`, even when the same update also archives
/// 4. live to archived: `Archived`
/// 5. any other difference: `Updated`; otherwise `NoOp`
///
/// Un-archiving and re-archiving have no dedicated kind and fall to rule 5.
pub fn classify_note(previous: Option<&Note>, updated: &Note) -> NoteTransition {
    let Some(previous) = previous else {
        return if updated.archived {
            NoteTransition::NoOp
        } else {
            NoteTransition::Created
        };
    };

    if previous.list != updated.list {
        return NoteTransition::Moved {
            from: previous.list.clone(),
            to: updated.list.clone(),
        };
    }

    if !previous.archived && updated.archived {
        return NoteTransition::Archived;
    }

    if previous == updated {
        NoteTransition::NoOp
    } else {
        NoteTransition::Updated
    }
}

/// Classifies a list update. Lists never move or archive.
pub fn classify_list(previous: Option<&List>, updated: &List) -> ListTransition {
    match previous {
        None => ListTransition::Created,
        Some(previous) if previous.name != updated.name => ListTransition::Renamed {
            from: previous.name.clone(),
            to: updated.name.clone(),
        },
        Some(previous) if previous == updated => ListTransition::NoOp,
        Some(_) => ListTransition::Updated,
    }
}

#[cfg(test)]
mod tests {
    use super::{classify_list, classify_note, ListTransition, NoteTransition};
    use crate::model::list::List;
    use crate::model::note::Note;
    use crate::model::EntityId;

    fn note(list: &str, archived: bool) -> Note {
        let mut note = Note::new("10", list, "A");
        note.archived = archived;
        note
    }

    #[test]
    fn unseen_live_note_is_created() {
        assert_eq!(classify_note(None, &note("1", false)), NoteTransition::Created);
    }

    #[test]
    fn unseen_archived_note_is_silent() {
        assert_eq!(classify_note(None, &note("1", true)), NoteTransition::NoOp);
    }

    #[test]
    fn move_takes_precedence_over_archive() {
        let transition = classify_note(Some(&note("1", false)), &note("2", true));
        assert_eq!(
            transition,
            NoteTransition::Moved {
                from: EntityId::from("1"),
                to: EntityId::from("2"),
            }
        );
    }

    #[test]
    fn archive_without_move_is_archived() {
        assert_eq!(
            classify_note(Some(&note("1", false)), &note("1", true)),
            NoteTransition::Archived
        );
    }

    #[test]
    fn unarchive_and_rearchive_fall_through() {
        assert_eq!(
            classify_note(Some(&note("1", true)), &note("1", false)),
            NoteTransition::Updated
        );
        assert_eq!(
            classify_note(Some(&note("1", true)), &note("1", true)),
            NoteTransition::NoOp
        );
    }

    #[test]
    fn desc_edit_is_updated_and_identical_record_is_noop() {
        let before = note("1", false);
        let mut after = before.clone();
        after.desc = "B".to_string();
        assert_eq!(classify_note(Some(&before), &after), NoteTransition::Updated);
        assert_eq!(classify_note(Some(&before), &before), NoteTransition::NoOp);
    }

    #[test]
    fn list_rules() {
        let todo = List::new("1", "Todo");
        let mut renamed = todo.clone();
        renamed.name = "Doing".to_string();
        let mut moved = todo.clone();
        moved.pos = Some(4.0);

        assert_eq!(classify_list(None, &todo), ListTransition::Created);
        assert_eq!(
            classify_list(Some(&todo), &renamed),
            ListTransition::Renamed {
                from: "Todo".to_string(),
                to: "Doing".to_string(),
            }
        );
        assert_eq!(classify_list(Some(&todo), &moved), ListTransition::Updated);
        assert_eq!(classify_list(Some(&todo), &todo), ListTransition::NoOp);
    }
}
