//! Tests for LOBSTER message and reference orderbook file loading.

use lobster_book::{
    EventKind, ReplayError, Side, read_message_file, read_orderbook_file,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file
}

#[test]
fn test_read_message_file() {
    let file = write_file(
        "34200.1,1,11,100,5850000,1\n\
         34200.2,1,12,50,5852000,-1\n\
         34200.3,4,12,20,5852000,-1\n",
    );

    let events = read_message_file(file.path()).unwrap();
    assert_eq!(events.len(), 3);

    assert_eq!(events[0].timestamp, 34200.1);
    assert_eq!(events[0].kind, EventKind::Submit);
    assert_eq!(events[0].order_id, 11);
    assert_eq!(events[0].size, 100);
    assert_eq!(events[0].price, 5_850_000);
    assert_eq!(events[0].side, Side::Bid);

    assert_eq!(events[1].side, Side::Ask);
    assert_eq!(events[2].kind, EventKind::VisibleExec);
}

#[test]
fn test_read_message_file_ignores_extra_columns() {
    let file = write_file("34200.1,1,11,100,5850000,1,extra,columns\n");
    let events = read_message_file(file.path()).unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].order_id, 11);
}

#[test]
fn test_read_message_file_rejects_short_rows() {
    let file = write_file("34200.1,1,11,100,5850000,1\n34200.2,1,12\n");
    let err = read_message_file(file.path()).unwrap_err();
    match err {
        ReplayError::MalformedRow { line, .. } => assert_eq!(line, 2),
        other => panic!("expected MalformedRow, got {other}"),
    }
}

#[test]
fn test_read_message_file_rejects_blank_cells() {
    let file = write_file("34200.1,1,,100,5850000,1\n");
    assert!(matches!(
        read_message_file(file.path()),
        Err(ReplayError::MalformedRow { line: 1, .. })
    ));
}

#[test]
fn test_read_message_file_rejects_bad_type_code() {
    let file = write_file("34200.1,9,11,100,5850000,1\n");
    let err = read_message_file(file.path()).unwrap_err();
    assert!(matches!(err, ReplayError::Book(_)));
}

#[test]
fn test_read_message_file_rejects_bad_direction() {
    let file = write_file("34200.1,1,11,100,5850000,0\n");
    assert!(matches!(
        read_message_file(file.path()),
        Err(ReplayError::Book(_))
    ));
}

#[test]
fn test_missing_file_reports_path() {
    let err = read_message_file("/nonexistent/messages.csv").unwrap_err();
    match err {
        ReplayError::Io { path, .. } => {
            assert_eq!(path.unwrap().to_str().unwrap(), "/nonexistent/messages.csv");
        }
        other => panic!("expected Io, got {other}"),
    }
}

#[test]
fn test_read_orderbook_file() {
    let file = write_file(
        "5852000,50,5850000,100,9999999999,0,5849000,40\n\
         5852000,30,5850000,100,9999999999,0,-9999999999,0\n",
    );

    let rows = read_orderbook_file(file.path()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].len(), 2);

    let top = &rows[0][0];
    assert_eq!(top.ask_price, 5_852_000);
    assert_eq!(top.ask_size, 50);
    assert_eq!(top.bid_price, 5_850_000);
    assert_eq!(top.bid_size, 100);
    assert!(top.ask_present());
    assert!(top.bid_present());

    let second = &rows[0][1];
    assert!(!second.ask_present());
    assert!(second.bid_present());

    assert!(!rows[1][1].bid_present());
}

#[test]
fn test_read_orderbook_file_rejects_bad_column_count() {
    let file = write_file("5852000,50,5850000,100,9999999999\n");
    let err = read_orderbook_file(file.path()).unwrap_err();
    match err {
        ReplayError::MalformedReferenceFile { columns } => assert_eq!(columns, 5),
        other => panic!("expected MalformedReferenceFile, got {other}"),
    }
}

#[test]
fn test_read_orderbook_file_rejects_ragged_rows() {
    let file = write_file(
        "5852000,50,5850000,100\n\
         5852000,50,5850000,100,9999999999,0,5849000,40\n",
    );
    assert!(matches!(
        read_orderbook_file(file.path()),
        Err(ReplayError::MalformedRow { line: 2, .. })
    ));
}
