//! Board behavior against the file-backed store: persistence across
//! reopen, debounced writes, corrupt documents, field boundaries and
//! missing ids.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use huntboard_core::board::{Board, BoardOptions};
use huntboard_core::debounce::ManualClock;
use huntboard_core::model::{ColumnId, JobTargetPatch, Priority};
use huntboard_core::storage::{BOARD_STATE_KEY, FileStore, LoadOutcome};
use huntboard_core::HuntError;
use tempfile::TempDir;

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 19, 9, 0, 0).unwrap()
}

fn open(dir: &TempDir, clock: &ManualClock) -> Board<FileStore, ManualClock> {
    Board::open(
        FileStore::new(dir.path()),
        clock.clone(),
        BoardOptions::default(),
    )
}

fn board_file(dir: &TempDir) -> std::path::PathBuf {
    FileStore::new(dir.path()).path_for(BOARD_STATE_KEY)
}

// ===========================================================================
// Persistence
// ===========================================================================

#[test]
fn fresh_directory_starts_with_default_board() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    let board = open(&dir, &clock);
    assert_eq!(board.load_outcome(), &LoadOutcome::Missing);
    assert!(board.targets().is_empty());
    assert_eq!(board.columns().len(), 9);
}

#[test]
fn changes_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());

    let id = {
        let mut board = open(&dir, &clock);
        let id = board
            .add_job_target("Acme", ColumnId::IntelGathering)
            .unwrap();
        board.create_tag("remote", None).unwrap();
        board.flush().unwrap();
        id
    };

    let board = open(&dir, &clock);
    assert_eq!(board.load_outcome(), &LoadOutcome::Loaded);
    let target = board.find(&id).unwrap();
    assert_eq!(target.company, "Acme");
    assert_eq!(target.column_id, ColumnId::IntelGathering);
    assert_eq!(board.tags().len(), 1);
}

#[test]
fn drop_flushes_pending_write() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    {
        let mut board = open(&dir, &clock);
        board.add_job_target("Acme", ColumnId::default()).unwrap();
        assert!(board.has_pending_write());
        assert!(!board_file(&dir).exists());
    }
    assert!(board_file(&dir).exists());
    assert_eq!(open(&dir, &clock).targets().len(), 1);
}

#[test]
fn writes_wait_for_the_quiet_period() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    let mut board = open(&dir, &clock);

    board.add_job_target("Acme", ColumnId::default()).unwrap();
    clock.advance(Duration::from_millis(300));
    board.add_job_target("Globex", ColumnId::default()).unwrap();

    clock.advance(Duration::from_millis(300));
    assert!(!board.poll().unwrap(), "second mutation restarts the quiet period");
    assert!(!board_file(&dir).exists());

    clock.advance(Duration::from_millis(200));
    assert!(board.poll().unwrap());
    assert!(!board.has_pending_write());

    let reopened = open(&dir, &clock);
    assert_eq!(reopened.targets().len(), 2);
}

#[test]
fn last_writer_wins_between_two_boards() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());

    let mut first = open(&dir, &clock);
    let mut second = open(&dir, &clock);

    first.add_job_target("Acme", ColumnId::default()).unwrap();
    first.flush().unwrap();

    clock.advance(Duration::from_secs(1));
    let globex = second.add_job_target("Globex", ColumnId::default()).unwrap();
    second.flush().unwrap();

    drop(first);
    drop(second);
    let reopened = open(&dir, &clock);
    assert_eq!(reopened.targets().len(), 1);
    assert!(reopened.find(&globex).is_some());
}

// ===========================================================================
// Recovery
// ===========================================================================

#[test]
fn corrupt_document_recovers_to_default() {
    let dir = TempDir::new().unwrap();
    std::fs::write(board_file(&dir), "{\"jobTargets\": 42").unwrap();

    let clock = ManualClock::new(start());
    let mut board = open(&dir, &clock);
    assert!(matches!(board.load_outcome(), LoadOutcome::Recovered { .. }));
    assert!(board.targets().is_empty());

    board.add_job_target("Acme", ColumnId::default()).unwrap();
    board.flush().unwrap();
    drop(board);

    let reopened = open(&dir, &clock);
    assert_eq!(reopened.load_outcome(), &LoadOutcome::Loaded);
    assert_eq!(reopened.targets().len(), 1);
}

#[test]
fn semantically_invalid_document_recovers_to_default() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    {
        let mut board = open(&dir, &clock);
        board.add_job_target("Acme", ColumnId::default()).unwrap();
        board.flush().unwrap();
    }

    let raw = std::fs::read_to_string(board_file(&dir)).unwrap();
    let tampered = raw.replace("\"priority\": \"medium\"", "\"priority\": \"urgent\"");
    assert_ne!(raw, tampered);
    std::fs::write(board_file(&dir), tampered).unwrap();

    let board = open(&dir, &clock);
    assert!(matches!(board.load_outcome(), LoadOutcome::Recovered { .. }));
    assert!(board.targets().is_empty());
}

// ===========================================================================
// Boundaries and missing ids
// ===========================================================================

#[test]
fn company_length_boundary() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    let mut board = open(&dir, &clock);

    assert!(
        board
            .add_job_target("c".repeat(100), ColumnId::default())
            .is_ok()
    );

    let err = board
        .add_job_target("c".repeat(101), ColumnId::default())
        .unwrap_err();
    let HuntError::Validation(errors) = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert!(errors.has_path("company"));
    assert_eq!(board.targets().len(), 1);
}

#[test]
fn missing_ids_are_silent_no_ops() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    let mut board = open(&dir, &clock);

    assert!(!board.delete_job_target("jt_1_missing"));
    assert!(!board.move_job_target("jt_1_missing", ColumnId::OfferSuccess));
    let patch = JobTargetPatch {
        priority: Some(Priority::High),
        ..JobTargetPatch::default()
    };
    assert!(!board.update_job_target("jt_1_missing", patch).unwrap());

    assert!(!board.has_pending_write());
    drop(board);
    assert!(!board_file(&dir).exists());
}

#[test]
fn rejected_update_keeps_stored_target() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::new(start());
    let mut board = open(&dir, &clock);
    let id = board.add_job_target("Acme", ColumnId::default()).unwrap();
    board.flush().unwrap();

    clock.advance(Duration::from_secs(5));
    let patch = JobTargetPatch {
        company: Some(String::new()),
        ..JobTargetPatch::default()
    };
    assert!(board.update_job_target(&id, patch).is_err());

    let target = board.find(&id).unwrap();
    assert_eq!(target.company, "Acme");
    assert_eq!(target.updated_at, start());
    assert!(!board.has_pending_write());
}
