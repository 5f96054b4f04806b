//! Tests for contraction statistics.

use intervalforge_config::ShavingConfig;
use intervalforge_core::{Contractor, IntervalVector};
use intervalforge_test::linear::{LinearConstraint, LinearSystem};
use intervalforge_test::threshold::UpperBound;

use crate::statistics::ContractionStatistics;
use crate::three_b_cid::Ctc3BCid;

#[test]
fn test_rates_on_empty_statistics() {
    let stats = ContractionStatistics::new();
    assert_eq!(stats.refutation_rate(), 0.0);
    assert_eq!(stats.cid_usefulness(), 0.0);
    assert_eq!(stats.subcontractor_calls_per_call(), 0.0);
}

#[test]
fn test_rates() {
    let stats = ContractionStatistics {
        calls: 2,
        subcontractor_calls: 10,
        slices_refuted: 4,
        cid_runs: 4,
        useful_cids: 1,
        ..ContractionStatistics::default()
    };
    assert_eq!(stats.refutation_rate(), 0.4);
    assert_eq!(stats.cid_usefulness(), 0.25);
    assert_eq!(stats.subcontractor_calls_per_call(), 5.0);
}

#[test]
fn test_reset() {
    let mut stats = ContractionStatistics {
        calls: 3,
        useful_cids: 2,
        ..ContractionStatistics::default()
    };
    stats.reset();
    assert_eq!(stats, ContractionStatistics::default());
}

#[test]
fn test_counters_follow_contraction() {
    let mut ctc = Ctc3BCid::new(Box::new(UpperBound::new(1, 0, 5.0)), ShavingConfig::default());
    ctc.contract_box(&mut IntervalVector::from_bounds(&[(0.0, 10.0)]))
        .unwrap();

    let stats = ctc.statistics();
    assert_eq!(stats.calls, 1);
    assert_eq!(stats.infeasible_calls, 0);
    assert_eq!(stats.linear_shavings, 1);
    assert!(stats.refutation_rate() > 0.0);
}

#[test]
fn test_cid_counters() {
    // x - y = 0 with a loose y: the disjunction narrows y
    let system = LinearSystem::new(2, vec![LinearConstraint::equal(vec![1.0, -1.0], 0.0)]);
    let mut ctc = Ctc3BCid::new(Box::new(system.hc4()), ShavingConfig::default());
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (-100.0, 100.0)]);

    ctc.contract_box(&mut domain).unwrap();

    let stats = ctc.statistics();
    assert!(stats.cid_runs >= 1);
    assert!(stats.useful_cids >= 1);
    assert!(stats.cid_usefulness() > 0.0);
}
