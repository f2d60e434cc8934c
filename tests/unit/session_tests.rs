//! Tests for replay session control and reference verification.

use lobster_book::{
    EventKind, MarketEvent, OrderBook, ReplayError, ReplaySession, Side,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn book() -> OrderBook {
    OrderBook::with_price_scaling("TEST", 10, 1.0, 0.01).unwrap()
}

fn submit(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::Submit, order_id, size, price, side)
}

fn cancel(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::Cancel, order_id, size, price, side)
}

fn sample_events() -> Vec<MarketEvent> {
    vec![
        submit(1.0, 1, 100, 100, Side::Bid),
        submit(2.0, 2, 80, 104, Side::Ask),
        submit(3.0, 3, 50, 102, Side::Bid),
        cancel(4.0, 1, 40, 100, Side::Bid),
        submit(5.0, 4, 60, 103, Side::Ask),
    ]
}

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

#[test]
fn test_simulate_until_feeds_inclusive_prefix() {
    let mut session = ReplaySession::new(book(), sample_events());
    session.simulate_until(3.0).unwrap();

    assert_eq!(session.position(), 3);
    assert_eq!(session.book().best_bid(), Some(102));
    assert_eq!(session.book().best_ask(), Some(104));
    assert_eq!(session.book().curr_book_timestamp(), 3.0);
}

#[test]
fn test_simulate_until_is_idempotent() {
    let mut session = ReplaySession::new(book(), sample_events());
    session.simulate_until(4.0).unwrap();
    let first = session.book().l3_snapshot();
    let first_ofi = session.book().size_ofi();

    session.simulate_until(4.0).unwrap();

    assert_eq!(session.book().l3_snapshot(), first);
    assert_eq!(session.book().size_ofi(), first_ofi);
}

#[test]
fn test_simulate_from_current_until_continues() {
    let mut session = ReplaySession::new(book(), sample_events());
    session.simulate_until(2.0).unwrap();
    session.simulate_from_current_until(5.0).unwrap();

    assert_eq!(session.position(), 5);
    assert_eq!(session.book().best_ask(), Some(103));

    // Stepwise replay matches a single full replay.
    let mut full = ReplaySession::new(book(), sample_events());
    full.simulate_until(5.0).unwrap();
    assert_eq!(session.book().l3_snapshot(), full.book().l3_snapshot());
}

#[test]
fn test_simulate_from_current_until_rejects_time_reversal() {
    let mut session = ReplaySession::new(book(), sample_events());
    session.simulate_until(4.0).unwrap();

    let err = session.simulate_from_current_until(2.0).unwrap_err();
    assert!(matches!(err, ReplayError::TimeReversal { .. }));
    // Session state untouched by the failed call.
    assert_eq!(session.position(), 4);
}

#[test]
fn test_step_processes_fixed_event_count() {
    let mut session = ReplaySession::new(book(), sample_events());
    session.step(2).unwrap();
    assert_eq!(session.position(), 2);
    assert_eq!(session.book().curr_book_timestamp(), 2.0);

    // Stepping past the end stops quietly.
    session.step(100).unwrap();
    assert_eq!(session.position(), 5);
}

#[test]
fn test_sim_ofi_windows_are_additive() {
    let mut session = ReplaySession::new(book(), sample_events());

    let total = session.sim_size_ofi(0.0, 5.0).unwrap();
    let first = session.sim_size_ofi(0.0, 3.0).unwrap();
    let second = session.sim_size_ofi(3.0, 5.0).unwrap();
    assert_eq!(first + second, total);

    let total_counts = session.sim_count_ofi(0.0, 5.0).unwrap();
    let first_counts = session.sim_count_ofi(0.0, 3.0).unwrap();
    let second_counts = session.sim_count_ofi(3.0, 5.0).unwrap();
    assert_eq!(first_counts + second_counts, total_counts);
}

#[test]
fn test_from_files_round_trip() {
    let msg = write_file(
        "1.0,1,1,100,100,1\n\
         2.0,1,2,80,104,-1\n",
    );

    let mut session = ReplaySession::from_files(book(), msg.path()).unwrap();
    session.simulate_until(10.0).unwrap();
    assert_eq!(session.book().best_bid(), Some(100));
    assert_eq!(session.book().best_ask(), Some(104));
}

#[test]
fn test_check_books_match_accepts_matching_reference() {
    let msg = write_file(
        "1.0,1,1,100,100,1\n\
         2.0,1,2,80,104,-1\n",
    );
    // After row 1: only the bid. After row 2: both sides.
    let lob = write_file(
        "9999999999,0,100,100\n\
         104,80,100,100\n",
    );

    let mut session =
        ReplaySession::with_reference_file(book(), msg.path(), lob.path()).unwrap();
    session.validate_alignment().unwrap();
    session.verify_full_replay(1).unwrap();
}

#[test]
fn test_check_books_match_flags_divergence() {
    let msg = write_file("1.0,1,1,100,100,1\n");
    // Reference disagrees on the bid size.
    let lob = write_file("9999999999,0,100,55\n");

    let mut session =
        ReplaySession::with_reference_file(book(), msg.path(), lob.path()).unwrap();
    let err = session.verify_full_replay(1).unwrap_err();
    match err {
        ReplayError::ReferenceMismatch { row, .. } => assert_eq!(row, 0),
        other => panic!("expected ReferenceMismatch, got {other}"),
    }
}

#[test]
fn test_check_books_match_flags_unexpected_level() {
    let msg = write_file("1.0,1,1,100,100,1\n");
    // Reference claims the bid side is empty.
    let lob = write_file("9999999999,0,-9999999999,0\n");

    let mut session =
        ReplaySession::with_reference_file(book(), msg.path(), lob.path()).unwrap();
    assert!(matches!(
        session.verify_full_replay(1),
        Err(ReplayError::ReferenceMismatch { .. })
    ));
}

#[test]
fn test_check_books_match_requires_reference() {
    let session = ReplaySession::new(book(), sample_events());
    assert!(matches!(
        session.check_books_match(1),
        Err(ReplayError::MissingReference)
    ));
}

#[test]
fn test_validate_alignment_flags_row_count_mismatch() {
    let msg = write_file(
        "1.0,1,1,100,100,1\n\
         2.0,1,2,80,104,-1\n",
    );
    let lob = write_file("9999999999,0,100,100\n");

    let session = ReplaySession::with_reference_file(book(), msg.path(), lob.path()).unwrap();
    match session.validate_alignment().unwrap_err() {
        ReplayError::RowCountMismatch {
            messages,
            reference,
        } => {
            assert_eq!(messages, 2);
            assert_eq!(reference, 1);
        }
        other => panic!("expected RowCountMismatch, got {other}"),
    }
}
