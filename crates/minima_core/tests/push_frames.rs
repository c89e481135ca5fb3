use minima_core::{
    decode_board, decode_push_frame, BoardConfig, BoardReconciler, DecodedBoard, EntityId,
    ListTransition, Notification, NoteTransition, PushMessage, PushOutcome, ReconcileError,
    RecordingNotifier, WireError,
};
use serde_json::json;

fn frame(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

fn board_payload() -> Vec<u8> {
    frame(json!({
        "lists": [
            {"id": 1, "name": "Todo", "pos": 0, "revision": 3},
            {"id": 2, "name": "Done", "pos": 1, "revision": 1}
        ],
        "stories": [
            {"id": 10, "list": 1, "archived": false, "desc": "A", "pos": 0, "revision": 2, "color": "yellow"}
        ]
    }))
}

#[test]
fn board_payload_decodes_integer_ids_and_opaque_fields() {
    let decoded = decode_board(&board_payload()).unwrap();
    let snapshot = &decoded.snapshot;

    assert_eq!(decoded.rejected, 0);
    assert_eq!(snapshot.lists.len(), 2);
    assert_eq!(snapshot.stories.len(), 1);
    let story = &snapshot.stories[0];
    assert_eq!(story.id, Some(EntityId::from("10")));
    assert_eq!(story.list, Some(EntityId::from("1")));
    assert_eq!(story.extra["color"], "yellow");
}

#[test]
fn board_payload_without_arrays_is_empty() {
    let decoded = decode_board(b"{}").unwrap();
    assert_eq!(decoded, DecodedBoard::default());
}

#[test]
fn bad_story_in_board_payload_leaves_the_rest_applied() {
    let mut board = BoardReconciler::new(BoardConfig::default(), RecordingNotifier::new());
    let payload = frame(json!({
        "lists": [{"id": 1, "name": "Todo"}],
        "stories": [
            {"id": 10, "list": 1, "desc": "A"},
            {"id": "", "list": 1, "desc": "blank"},
            {"id": 11, "list": 1, "archived": "false", "desc": "B"}
        ]
    }));

    let summary = board.on_board_payload(&payload).unwrap();

    assert_eq!(summary.rejected, 2);
    assert_eq!(summary.lists, 1);
    assert_eq!(summary.notes, 1);
    assert!(board.is_bootstrapped());
    assert!(board.notes().contains(&EntityId::from("10")));
    assert!(!board.notes().contains(&EntityId::from("11")));
    assert!(board.notifier().sent.is_empty());

    board
        .on_push_frame(&frame(json!({
            "name": "story",
            "obj": {"id": 10, "desc": "A2"}
        })))
        .unwrap();
    assert!(board.notifier().sent.is_empty());
}

#[test]
fn push_frames_dispatch_by_kind() {
    let mut board = BoardReconciler::new(BoardConfig::default(), RecordingNotifier::new());
    board.on_board_payload(&board_payload()).unwrap();

    let moved = board
        .on_push_frame(&frame(json!({
            "name": "story",
            "obj": {"id": "10", "list": "2", "archived": false, "desc": "A", "revision": 3}
        })))
        .unwrap();
    let renamed = board
        .on_push_frame(&frame(json!({
            "name": "list",
            "obj": {"id": "2", "name": "Shipped", "revision": 2}
        })))
        .unwrap();

    assert_eq!(
        moved,
        PushOutcome::Note(NoteTransition::Moved {
            from: EntityId::from("1"),
            to: EntityId::from("2"),
        })
    );
    assert!(matches!(
        renamed,
        PushOutcome::List(ListTransition::Renamed { .. })
    ));
    assert_eq!(
        board.notifier().sent,
        vec![Notification::new("Note moved from \"Todo\" to \"Done\"", "A")]
    );

    let note = board.notes().get(&EntityId::from("10")).unwrap();
    assert_eq!(note.revision, Some(3));
    assert_eq!(note.extra["color"], "yellow");
}

#[test]
fn malformed_frames_are_rejected_without_mutation() {
    let mut board = BoardReconciler::new(BoardConfig::default(), RecordingNotifier::new());
    board.on_board_payload(&board_payload()).unwrap();

    let garbage = board.on_push_frame(b"{not json").unwrap_err();
    assert!(matches!(garbage, ReconcileError::Wire(WireError::Json(_))));

    let unknown = board
        .on_push_frame(&frame(json!({"name": "board", "obj": {"id": "10"}})))
        .unwrap_err();
    assert!(matches!(
        unknown,
        ReconcileError::Wire(WireError::UnknownKind(_))
    ));

    let blank_id = board
        .on_push_frame(&frame(json!({
            "name": "story",
            "obj": {"id": "  ", "list": "2"}
        })))
        .unwrap_err();
    assert!(matches!(blank_id, ReconcileError::Wire(_)));

    let missing_id = board
        .on_push_frame(&frame(json!({"name": "story", "obj": {"list": "2"}})))
        .unwrap_err();
    assert!(matches!(missing_id, ReconcileError::Store(_)));

    assert_eq!(board.notes().len(), 1);
    assert_eq!(
        board.notes().get(&EntityId::from("10")).unwrap().list,
        EntityId::from("1")
    );
    assert!(board.notifier().sent.is_empty());
}

#[test]
fn story_frame_decodes_partial_update() {
    let message = decode_push_frame(&frame(json!({
        "name": "story",
        "obj": {"id": 10, "archived": true}
    })))
    .unwrap();

    let PushMessage::Story(update) = message else {
        panic!("expected story frame");
    };
    assert_eq!(update.archived, Some(true));
    assert!(update.list.is_none());
    assert!(update.desc.is_none());
}
