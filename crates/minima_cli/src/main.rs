//! Session replay probe.
//!
//! # Responsibility
//! - Replay a recorded board session through `minima_core`.
//! - Print every notification the reconciler emits, in order.
//!
//! Usage: `minima_cli <board.json> [frames.jsonl]`, one push frame per line.
//! Set `MINIMA_LOG_DIR` to an absolute path to enable file logging.

use minima_core::{BoardConfig, BoardReconciler, Notifier};
use std::process::ExitCode;

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        println!("notify title={title:?} body={body:?}");
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("minima_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let board_path = args
        .next()
        .ok_or("usage: minima_cli <board.json> [frames.jsonl]")?;
    let frames_path = args.next();

    if let Ok(log_dir) = std::env::var("MINIMA_LOG_DIR") {
        minima_core::init_logging(minima_core::default_log_level(), &log_dir)?;
    }

    let board_bytes = std::fs::read(&board_path)
        .map_err(|err| format!("failed to read `{board_path}`: {err}"))?;
    let mut board = BoardReconciler::new(BoardConfig::default(), StdoutNotifier);
    let summary = board
        .on_board_payload(&board_bytes)
        .map_err(|err| err.to_string())?;
    println!(
        "board lists={} notes={} rejected={}",
        summary.lists, summary.notes, summary.rejected
    );

    let Some(frames_path) = frames_path else {
        return Ok(());
    };
    let frames = std::fs::read_to_string(&frames_path)
        .map_err(|err| format!("failed to read `{frames_path}`: {err}"))?;
    for (index, line) in frames.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match board.on_push_frame(line.as_bytes()) {
            Ok(outcome) => log::debug!(
                "event=replay_frame module=cli status=ok line={} outcome={:?}",
                index + 1,
                outcome
            ),
            Err(err) => println!("frame line={} rejected: {err}", index + 1),
        }
    }

    println!(
        "final lists={} notes={}",
        board.lists().len(),
        board.notes().len()
    );
    Ok(())
}
