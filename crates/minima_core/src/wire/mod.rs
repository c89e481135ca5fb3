//! Board payload and push frame decoding.
//!
//! # Responsibility
//! - Decode the one-shot board payload (`{"lists": [...], "stories": [...]}`).
//! - Decode push frames wrapped as `{"name": "story" | "list", "obj": {...}}`.
//! - Encode locally authored records back into push frames for the transport.
//!
//! # Invariants
//! - Decoding never touches board state; a bad frame is rejected whole.
//! - A bad board entry is dropped on its own; the rest of the board decodes.

use crate::model::list::{List, ListUpdate};
use crate::model::note::{Note, NoteUpdate};
use serde::{Deserialize, Serialize};
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const FRAME_KIND_STORY: &str = "story";
pub const FRAME_KIND_LIST: &str = "list";

/// Initial board state delivered once after connecting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub lists: Vec<ListUpdate>,
    #[serde(default)]
    pub stories: Vec<NoteUpdate>,
}

impl BoardSnapshot {
    pub fn new(lists: Vec<List>, stories: Vec<Note>) -> Self {
        Self {
            lists: lists.into_iter().map(ListUpdate::from).collect(),
            stories: stories.into_iter().map(NoteUpdate::from).collect(),
        }
    }
}

/// Board payload with each malformed entry already dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBoard {
    pub snapshot: BoardSnapshot,
    /// Entries that failed to decode and were left out of `snapshot`.
    pub rejected: usize,
}

/// Entries stay raw so one bad entry cannot fail the whole payload.
#[derive(Deserialize)]
struct RawBoard {
    #[serde(default)]
    lists: Vec<Value>,
    #[serde(default)]
    stories: Vec<Value>,
}

/// One decoded push frame.
#[derive(Debug, Clone, PartialEq)]
pub enum PushMessage {
    Story(NoteUpdate),
    List(ListUpdate),
}

impl PushMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Story(_) => FRAME_KIND_STORY,
            Self::List(_) => FRAME_KIND_LIST,
        }
    }
}

#[derive(Deserialize)]
struct RawFrame {
    name: String,
    #[serde(default)]
    obj: Value,
}

#[derive(Serialize)]
struct OutgoingFrame<'a, T: Serialize> {
    name: &'a str,
    obj: &'a T,
}

pub type WireResult<T> = Result<T, WireError>;

/// Payload decoding/encoding failures.
#[derive(Debug)]
pub enum WireError {
    /// The bytes are not valid JSON of the expected shape.
    Json(serde_json::Error),
    /// The frame envelope names an entity kind the board does not know.
    UnknownKind(String),
}

impl Display for WireError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "malformed payload: {err}"),
            Self::UnknownKind(name) => write!(f, "unknown push frame kind `{name}`"),
        }
    }
}

impl Error for WireError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::UnknownKind(_) => None,
        }
    }
}

impl From<serde_json::Error> for WireError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Decodes the initial board payload entry by entry.
///
/// # Errors
/// - `Json` only when the envelope itself is malformed. Bad entries are
///   skipped and counted in `DecodedBoard::rejected`.
pub fn decode_board(bytes: &[u8]) -> WireResult<DecodedBoard> {
    let raw: RawBoard = serde_json::from_slice(bytes)?;
    let mut rejected = 0;
    let lists = decode_entries(raw.lists, FRAME_KIND_LIST, &mut rejected);
    let stories = decode_entries(raw.stories, FRAME_KIND_STORY, &mut rejected);
    Ok(DecodedBoard {
        snapshot: BoardSnapshot { lists, stories },
        rejected,
    })
}

fn decode_entries<T>(entries: Vec<Value>, kind: &str, rejected: &mut usize) -> Vec<T>
where
    T: serde::de::DeserializeOwned,
{
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                *rejected += 1;
                warn!(
                    "event=board_entry module=wire status=rejected kind={} index={} error={}",
                    kind, index, err
                );
                None
            }
        })
        .collect()
}

/// Decodes one push frame envelope.
pub fn decode_push_frame(bytes: &[u8]) -> WireResult<PushMessage> {
    let frame: RawFrame = serde_json::from_slice(bytes)?;
    match frame.name.as_str() {
        FRAME_KIND_STORY => Ok(PushMessage::Story(serde_json::from_value(frame.obj)?)),
        FRAME_KIND_LIST => Ok(PushMessage::List(serde_json::from_value(frame.obj)?)),
        _ => Err(WireError::UnknownKind(frame.name)),
    }
}

/// Encodes a note as a `story` push frame.
pub fn encode_note_frame(note: &Note) -> WireResult<Vec<u8>> {
    Ok(serde_json::to_vec(&OutgoingFrame {
        name: FRAME_KIND_STORY,
        obj: note,
    })?)
}

/// Encodes a list as a `list` push frame.
pub fn encode_list_frame(list: &List) -> WireResult<Vec<u8>> {
    Ok(serde_json::to_vec(&OutgoingFrame {
        name: FRAME_KIND_LIST,
        obj: list,
    })?)
}

#[cfg(test)]
mod tests {
    use super::{decode_board, decode_push_frame, encode_note_frame, PushMessage, WireError};
    use crate::model::note::Note;

    #[test]
    fn encoded_note_frame_decodes_as_story() {
        let mut note = Note::new("10", "1", "A");
        note.pos = Some(2.0);
        let bytes = encode_note_frame(&note).unwrap();

        let decoded = decode_push_frame(&bytes).unwrap();
        let PushMessage::Story(update) = decoded else {
            panic!("expected story frame");
        };
        assert_eq!(update.id.as_ref().map(|id| id.as_str()), Some("10"));
        assert_eq!(update.pos, Some(2.0));
        assert_eq!(update.archived, Some(false));
    }

    #[test]
    fn bad_board_entries_are_counted_not_fatal() {
        let decoded = decode_board(
            br#"{"lists":[{"id":1,"name":"Todo"},{"id":""}],
                "stories":[{"id":10,"list":1},{"id":11,"list":1,"archived":"false"}]}"#,
        )
        .unwrap();
        assert_eq!(decoded.rejected, 2);
        assert_eq!(decoded.snapshot.lists.len(), 1);
        assert_eq!(decoded.snapshot.stories.len(), 1);

        assert!(matches!(decode_board(br#""board""#), Err(WireError::Json(_))));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = decode_push_frame(br#"{"name":"board","obj":{}}"#).unwrap_err();
        assert!(matches!(err, WireError::UnknownKind(name) if name == "board"));
    }
}
