//! Tests for the shaving engine and constructive disjunction.

use super::*;
use intervalforge_core::{Infeasible, Interval};
use intervalforge_test::linear::{LinearConstraint, LinearSystem};
use intervalforge_test::recording::Recording;
use intervalforge_test::threshold::{AlwaysEmpty, Identity, LowerBound, RefuteAbove, UpperBound};

fn shaver(ctc: impl Contractor + 'static) -> Shaver {
    Shaver::new(Box::new(ctc), ShavingConfig::default())
}

/// x - y = 0, with x in [0, 10] and y in [-100, 100].
fn diagonal() -> (LinearSystem, IntervalVector) {
    let system = LinearSystem::new(2, vec![LinearConstraint::equal(vec![1.0, -1.0], 0.0)]);
    let domain = IntervalVector::from_bounds(&[(0.0, 10.0), (-100.0, 100.0)]);
    (system, domain)
}

#[test]
fn test_slice_plan_default() {
    let plan = SlicePlan::new(&Interval::new(0.0, 10.0), 10, 1e-11).unwrap();
    assert_eq!(plan.count(), 10);
    assert_eq!(plan.width(), 1.0);
    assert_eq!(plan.strategy(16), ShaveStrategy::Linear);
    assert_eq!(plan.slice(&Interval::new(0.0, 10.0), 3), Interval::new(3.0, 4.0));
}

#[test]
fn test_slice_plan_width_floor() {
    // 10 slices of 0.1 would be below the floor of 0.25
    let plan = SlicePlan::new(&Interval::new(0.0, 1.0), 10, 0.25).unwrap();
    assert_eq!(plan.count(), 4);
    assert_eq!(plan.width(), 0.25);

    // never fewer than two slices
    let plan = SlicePlan::new(&Interval::new(0.0, 1.0), 10, 0.7).unwrap();
    assert_eq!(plan.count(), 2);
}

#[test]
fn test_slice_plan_skips() {
    assert!(SlicePlan::new(&Interval::new(0.0, 1e-12), 10, 1e-11).is_none());
    assert!(SlicePlan::new(&Interval::point(3.0), 10, 0.0).is_none());
    assert!(SlicePlan::new(&Interval::new(0.0, f64::INFINITY), 10, 1e-11).is_none());
}

#[test]
fn test_last_slice_ends_at_upper_bound() {
    let dom = Interval::new(0.0, 1.0);
    let plan = SlicePlan::new(&dom, 3, 1e-11).unwrap();
    assert_eq!(plan.slice(&dom, 2).ub(), 1.0);
    assert_eq!(plan.slice(&dom, 0).lb(), 0.0);
}

#[test]
fn test_strategy_threshold() {
    let plan = SlicePlan::new(&Interval::new(0.0, 100.0), 100, 1e-11).unwrap();
    assert_eq!(plan.strategy(16), ShaveStrategy::Dichotomic);
    assert_eq!(plan.strategy(100), ShaveStrategy::Linear);
}

#[test]
fn test_linear_shaving_upper_bound() {
    let mut shaver = shaver(UpperBound::new(1, 0, 5.0));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    let narrowed = shaver.shave_variable(&mut domain, 0).unwrap();

    assert!(narrowed);
    assert_eq!(domain[0], Interval::new(0.0, 5.0));
    // one-dimensional boxes give CID nothing to do
    assert_eq!(shaver.statistics().cid_runs, 0);
}

#[test]
fn test_linear_shaving_lower_bound() {
    let mut shaver = shaver(LowerBound::new(1, 0, 2.5));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    shaver.shave_variable(&mut domain, 0).unwrap();

    assert_eq!(domain[0], Interval::new(2.5, 10.0));
}

#[test]
fn test_linear_shaving_statistics() {
    let mut shaver = shaver(UpperBound::new(1, 0, 5.0));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    shaver.shave_variable(&mut domain, 0).unwrap();

    let stats = shaver.statistics();
    assert_eq!(stats.variables_shaved, 1);
    assert_eq!(stats.linear_shavings, 1);
    assert_eq!(stats.dichotomic_shavings, 0);
    // slice 0 from the left, slices 9 down to 5 from the right
    assert_eq!(stats.subcontractor_calls, 6);
    assert_eq!(stats.slices_refuted, 4);
}

#[test]
fn test_linear_shaving_always_empty() {
    let mut shaver = shaver(AlwaysEmpty::new(1));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    assert_eq!(shaver.shave_variable(&mut domain, 0), Err(Infeasible));
    assert!(domain.is_empty());
    assert_eq!(shaver.statistics().slices_refuted, 10);
}

#[test]
fn test_identity_leaves_box_unchanged() {
    let mut shaver = shaver(Identity::new(2));
    let input = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
    let mut domain = input.clone();

    assert!(!shaver.shave_variable(&mut domain, 0).unwrap());
    assert!(!shaver.shave_variable(&mut domain, 1).unwrap());

    assert_eq!(domain, input);
    assert_eq!(shaver.statistics().useful_cids, 0);
}

#[test]
fn test_narrow_variable_is_skipped() {
    let ctc = Recording::new(Box::new(Identity::new(1)));
    let log = ctc.log();
    let mut shaver = shaver(ctc);
    let mut domain = IntervalVector::from_bounds(&[(1.0, 1.0 + 1e-12)]);

    assert!(!shaver.shave_variable(&mut domain, 0).unwrap());
    assert!(log.lock().unwrap().is_empty());
    assert_eq!(shaver.statistics().variables_shaved, 0);
}

#[test]
fn test_unbounded_variable_is_skipped() {
    let mut shaver = shaver(UpperBound::new(1, 0, 5.0));
    let mut domain = IntervalVector::from_bounds(&[(0.0, f64::INFINITY)]);

    assert!(!shaver.shave_variable(&mut domain, 0).unwrap());
    assert_eq!(domain[0], Interval::new(0.0, f64::INFINITY));
}

#[test]
fn test_trials_pass_single_variable_impact() {
    let ctc = Recording::new(Box::new(Identity::new(2)));
    let log = ctc.log();
    let mut shaver = shaver(ctc);
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);

    shaver.shave_variable(&mut domain, 1).unwrap();

    let log = log.lock().unwrap();
    assert!(!log.is_empty());
    assert!(log.iter().all(|&impact| impact == Impact::SingleVariable(1)));
}

#[test]
fn test_adjacent_slices_give_hull() {
    // x + y = 10, x - y = 0 on [0, 10]^2: only slices [4, 5] and [5, 6] survive
    let system = LinearSystem::new(
        2,
        vec![
            LinearConstraint::equal(vec![1.0, 1.0], 10.0),
            LinearConstraint::equal(vec![1.0, -1.0], 0.0),
        ],
    );
    let mut shaver = shaver(system.hc4());
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);

    assert!(shaver.shave_variable(&mut domain, 0).unwrap());

    assert_eq!(domain[0], Interval::point(5.0));
    assert_eq!(domain[1], Interval::point(5.0));
    assert_eq!(shaver.statistics().cid_runs, 0);
}

#[test]
fn test_cid_narrows_other_variable() {
    let (system, mut domain) = diagonal();
    let mut shaver = shaver(system.hc4());

    assert!(shaver.shave_variable(&mut domain, 0).unwrap());

    assert_eq!(domain[0], Interval::new(0.0, 10.0));
    assert_eq!(domain[1], Interval::new(0.0, 10.0));
    assert_eq!(shaver.statistics().cid_runs, 1);
    assert_eq!(shaver.statistics().useful_cids, 1);
}

#[test]
fn test_without_cid_only_the_shaved_variable_moves() {
    let (system, mut domain) = diagonal();
    let config = ShavingConfig {
        cid_slices: 0,
        ..ShavingConfig::default()
    };
    let mut shaver = Shaver::new(Box::new(system.hc4()), config);
    let input = domain.clone();

    assert!(!shaver.shave_variable(&mut domain, 0).unwrap());

    assert_eq!(domain, input);
    assert_eq!(shaver.statistics().cid_runs, 0);
}

#[test]
fn test_cid_result_between_boundary_hull_and_candidate() {
    let (system, input) = diagonal();
    let mut shaver = Shaver::new(
        Box::new(system.hc4()),
        ShavingConfig {
            cid_slices: 4,
            ..ShavingConfig::default()
        },
    );

    let mut left = input.clone();
    left[0] = Interval::new(0.0, 1.0);
    shaver.try_slice(&mut left, 0).unwrap();
    let mut right = input.clone();
    right[0] = Interval::new(9.0, 10.0);
    shaver.try_slice(&mut right, 0).unwrap();

    let boundary = left.hull(&right);
    let mut middle = input.clone();
    middle[0] = Interval::new(1.0, 9.0);
    let mut hull = boundary.clone();

    assert!(shaver.constructive_disjunction(0, &middle, &mut hull));
    assert!(boundary.is_subset(&hull));
    assert!(hull.is_subset(&input));
}

#[test]
fn test_dichotomic_shaving_converges() {
    let config = ShavingConfig {
        max_slices: 1000,
        min_width: 1e-6,
        ..ShavingConfig::default()
    };
    let mut shaver = Shaver::new(Box::new(UpperBound::new(1, 0, 1.0)), config);
    let mut domain = IntervalVector::from_bounds(&[(0.0, 1000.0)]);

    assert!(shaver.shave_variable(&mut domain, 0).unwrap());

    assert_eq!(domain[0], Interval::new(0.0, 1.0));
    assert_eq!(shaver.statistics().dichotomic_shavings, 1);
}

#[test]
fn test_dichotomic_shaving_with_pure_refuter() {
    // x0 > 1 is refuted; accepted boxes are never narrowed
    let config = ShavingConfig {
        max_slices: 1000,
        min_width: 1e-6,
        ..ShavingConfig::default()
    };
    let mut shaver = Shaver::new(Box::new(RefuteAbove::new(2, 0, 1.0, 1)), config);
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
    let plan = SlicePlan::new(&domain[0], config.max_slices, config.min_width).unwrap();
    assert_eq!(plan.strategy(config.dichotomy_threshold), ShaveStrategy::Dichotomic);

    assert!(shaver.shave_variable(&mut domain, 0).unwrap());

    assert_eq!(domain[0].lb(), 0.0);
    assert!(domain[0].contains(1.0));
    assert!(domain[0].ub() - 1.0 <= plan.width());
    // refuted trials scribbled on x1 and were rolled back
    assert_eq!(domain[1], Interval::new(0.0, 10.0));
    assert!(shaver.statistics().slices_refuted > 0);
}

#[test]
fn test_dichotomic_shaving_stops_at_adjacent_floats() {
    let config = ShavingConfig {
        max_slices: usize::MAX,
        min_width: 0.0,
        ..ShavingConfig::default()
    };
    let mut shaver = Shaver::new(Box::new(RefuteAbove::new(2, 0, 1.0, 1)), config);
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);

    assert!(shaver.shave_variable(&mut domain, 0).unwrap());

    assert_eq!(domain[0].lb(), 0.0);
    assert!(domain[0].ub() > 1.0);
    assert!(domain[0].ub() - 1.0 <= f64::EPSILON);
    assert_eq!(domain[1], Interval::new(0.0, 10.0));
}

#[test]
fn test_linear_shaving_with_pure_refuter() {
    let mut shaver = shaver(RefuteAbove::new(2, 0, 1.0, 1));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);

    assert!(shaver.shave_variable(&mut domain, 0).unwrap());

    // slices [2, 3] .. [9, 10] refuted, [1, 2] survives
    assert_eq!(domain[0], Interval::new(0.0, 2.0));
    assert_eq!(domain[1], Interval::new(0.0, 10.0));
    assert_eq!(shaver.statistics().slices_refuted, 8);
}

#[test]
fn test_shave_bound_refuted_degenerate_domain() {
    let mut shaver = shaver(RefuteAbove::new(2, 0, 1.0, 1));
    let mut domain = IntervalVector::from_bounds(&[(3.0, 3.0), (0.0, 10.0)]);

    assert_eq!(
        shaver.shave_bound(&mut domain, 0, 1.0, Side::Left),
        Err(Infeasible)
    );
}

#[test]
fn test_dichotomic_shaving_always_empty() {
    let config = ShavingConfig {
        max_slices: 100,
        ..ShavingConfig::default()
    };
    let mut shaver = Shaver::new(Box::new(AlwaysEmpty::new(1)), config);
    let mut domain = IntervalVector::from_bounds(&[(0.0, 100.0)]);

    assert_eq!(shaver.shave_variable(&mut domain, 0), Err(Infeasible));
}

#[test]
fn test_shave_bound_left_moves_lower_bound() {
    let mut shaver = shaver(LowerBound::new(1, 0, 3.0));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    assert!(shaver.shave_bound(&mut domain, 0, 1.0, Side::Left).unwrap());
    // the box holds the last accepted slice
    assert_eq!(domain[0], Interval::new(3.0, 4.0));
}

#[test]
fn test_shave_bound_right_moves_upper_bound() {
    let mut shaver = shaver(UpperBound::new(1, 0, 7.0));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    assert!(shaver.shave_bound(&mut domain, 0, 1.0, Side::Right).unwrap());
    assert_eq!(domain[0], Interval::new(6.0, 7.0));
}

#[test]
fn test_shave_bound_unmoved_bound() {
    let mut shaver = shaver(UpperBound::new(1, 0, 5.0));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    assert!(!shaver.shave_bound(&mut domain, 0, 1.0, Side::Left).unwrap());
    assert_eq!(domain[0].lb(), 0.0);
}

#[test]
fn test_shave_bound_whole_domain_refuted() {
    let mut shaver = shaver(AlwaysEmpty::new(1));
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    assert_eq!(
        shaver.shave_bound(&mut domain, 0, 1.0, Side::Left),
        Err(Infeasible)
    );
}

#[test]
fn test_narrow_bound_keeps_other_variables() {
    let (system, mut domain) = diagonal();
    let mut shaver = shaver(system.hc4());

    shaver.narrow_bound(&mut domain, 1, 1.0, Side::Left).unwrap();

    assert_eq!(domain[0], Interval::new(0.0, 10.0));
    assert_eq!(domain[1].ub(), 100.0);
    assert!(domain[1].lb() >= -1.0);
}

#[test]
fn test_clone_has_independent_statistics() {
    let mut shaver = shaver(UpperBound::new(1, 0, 5.0));
    let copy = shaver.clone();
    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);

    shaver.shave_variable(&mut domain, 0).unwrap();

    assert_eq!(shaver.statistics().variables_shaved, 1);
    assert_eq!(copy.statistics().variables_shaved, 0);
}
