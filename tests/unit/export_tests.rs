//! Tests for the feature registry and CSV export.

use lobster_book::{
    EventKind, FeatureKind, FeatureRegistry, MarketEvent, OrderBook, ReplayError,
    ReplaySession, Side,
};

fn book() -> OrderBook {
    OrderBook::with_price_scaling("TEST", 10, 1.0, 0.01).unwrap()
}

fn submit(timestamp: f64, order_id: u64, size: u64, price: i64, side: Side) -> MarketEvent {
    MarketEvent::new(timestamp, EventKind::Submit, order_id, size, price, side)
}

#[test]
fn test_register_by_name_resolves_known_features() {
    let mut registry = FeatureRegistry::new();
    registry
        .register_by_name("mid", "mid_price", None)
        .unwrap()
        .register_by_name("spread", "bid_ask_spread", None)
        .unwrap()
        .register_by_name("vol_at_100", "available_vol_at_price", Some(100))
        .unwrap();

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.columns()[0].1, FeatureKind::MidPrice);
    assert_eq!(
        registry.columns()[2].1,
        FeatureKind::AvailableVolAtPrice(100)
    );
}

#[test]
fn test_register_by_name_rejects_unknown_feature() {
    let mut registry = FeatureRegistry::new();
    let err = registry
        .register_by_name("x", "micro_price", None)
        .unwrap_err();
    match err {
        ReplayError::UnknownFeature { name } => assert_eq!(name, "micro_price"),
        other => panic!("expected UnknownFeature, got {other}"),
    }
    assert!(registry.is_empty());
}

#[test]
fn test_register_by_name_requires_argument_when_needed() {
    let mut registry = FeatureRegistry::new();
    assert!(matches!(
        registry.register_by_name("vol", "available_vol_at_price", None),
        Err(ReplayError::MissingFeatureArgument { .. })
    ));
}

#[test]
fn test_feature_values_against_live_book() {
    let mut book = book();
    book.process(&submit(1.0, 1, 100, 100, Side::Bid)).unwrap();
    book.process(&submit(2.0, 2, 80, 104, Side::Ask)).unwrap();

    assert_eq!(FeatureKind::MidPrice.value(&book), Some(102.0));
    assert_eq!(FeatureKind::BidAskSpread.value(&book), Some(4.0));
    assert_eq!(FeatureKind::TotalBidVolume.value(&book), Some(100.0));
    assert_eq!(FeatureKind::AvailableVolAtPrice(104).value(&book), Some(80.0));
    assert_eq!(FeatureKind::CountOfi.value(&book), Some(0.0));
}

#[test]
fn test_export_writes_one_row_per_sample() {
    let events = vec![
        submit(1.0, 1, 100, 100, Side::Bid),
        submit(2.5, 2, 80, 104, Side::Ask),
        submit(3.5, 3, 50, 102, Side::Bid),
    ];
    let mut session = ReplaySession::new(book(), events);

    let mut registry = FeatureRegistry::new();
    registry
        .register_by_name("mid_price", "mid_price", None)
        .unwrap()
        .register_by_name("total_bid_volume", "total_bid_volume", None)
        .unwrap();

    let mut output = Vec::new();
    session
        .export_features_csv(&mut output, 1.0, 4.0, 1.0, &registry)
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5); // header + samples at 1, 2, 3, 4
    assert_eq!(lines[0], "timestamp,mid_price,total_bid_volume");

    // At t=1 the book is one-sided: the midprice cell is empty.
    assert_eq!(lines[1], "1,,100");
    // By t=3 both sides exist but the 3.5 bid has not arrived yet.
    assert_eq!(lines[3], "3,102,100");
    // The final sample includes the 3.5 bid, which moved the mid.
    assert_eq!(lines[4], "4,103,150");
}

#[test]
fn test_export_with_empty_registry_emits_timestamps_only() {
    let events = vec![submit(1.0, 1, 100, 100, Side::Bid)];
    let mut session = ReplaySession::new(book(), events);

    let registry = FeatureRegistry::new();
    let mut output = Vec::new();
    session
        .export_features_csv(&mut output, 1.0, 2.0, 1.0, &registry)
        .unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "timestamp");
    assert_eq!(lines.len(), 3);
}
