//! Tests for console formatting.

use super::*;

fn visitor(event: &str) -> EventVisitor {
    EventVisitor {
        event: Some(event.to_string()),
        ..EventVisitor::default()
    }
}

#[test]
fn test_format_duration_ms() {
    assert_eq!(format_duration_ms(250), "250ms");
    assert_eq!(format_duration_ms(1500), "1.50s");
    assert_eq!(format_duration_ms(125_000), "2m 5s");
}

#[test]
fn test_unknown_event_is_silent() {
    assert!(format_event(&visitor("smear_fallback"), Level::TRACE).is_empty());
    assert!(format_event(&EventVisitor::default(), Level::INFO).is_empty());
}

#[test]
fn test_shave_only_at_trace() {
    let mut v = visitor("shave");
    v.var = Some(3);
    v.narrowed = Some(true);
    assert!(format_event(&v, Level::DEBUG).is_empty());
    assert!(format_event(&v, Level::TRACE).contains("Shave x3"));
}

#[test]
fn test_format_build() {
    let mut v = visitor("build");
    v.contractor = Some("acid".to_string());
    v.handled = Some(12_000);
    let output = format_event(&v, Level::INFO);
    assert!(output.contains("acid"));
    assert!(output.contains("12,000"));
}

#[test]
fn test_format_contract_infeasible() {
    let mut v = visitor("contract");
    v.contractor = Some("3bcid".to_string());
    v.infeasible = Some(true);
    v.subcontractor_calls = Some(1_234);
    let output = format_event(&v, Level::DEBUG);
    assert!(output.contains("INFEASIBLE"));
    assert!(output.contains("1,234"));
}

#[test]
fn test_format_batch_end() {
    let mut v = visitor("batch_end");
    v.boxes = Some(40);
    v.infeasible_boxes = Some(3);
    v.duration_ms = Some(20);
    let output = format_event(&v, Level::INFO);
    assert!(output.contains("Batch complete"));
    assert!(output.contains("20ms"));
}

#[test]
fn test_init_is_idempotent() {
    init();
    init();
    assert!(elapsed_secs() >= 0.0);
}
