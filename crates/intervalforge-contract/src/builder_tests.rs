//! Tests for the contractor builder.

use intervalforge_config::{BoundShavingConfig, ContractorConfig, WindowSize};
use intervalforge_core::{Contractor, Interval, IntervalVector, VarSet};
use intervalforge_test::linear::{LinearConstraint, LinearSystem};
use intervalforge_test::threshold::{Identity, UpperBound};

use crate::builder::{BuildError, ContractorBuilder};

fn system() -> LinearSystem {
    LinearSystem::new(2, vec![LinearConstraint::equal(vec![1.0, -1.0], 0.0)])
}

#[test]
fn test_build_3bcid_default_vars() {
    let ctc = ContractorBuilder::default()
        .build_3bcid(Box::new(Identity::new(3)))
        .unwrap();
    assert_eq!(ctc.vars().as_slice(), &[0, 1, 2]);
    assert_eq!(ctc.window(), WindowSize::All);
}

#[test]
fn test_build_3bcid_with_vars() {
    let vars = VarSet::from_indices(3, [0, 2]).unwrap();
    let config = ContractorConfig::new().with_window(WindowSize::Count(1));
    let ctc = ContractorBuilder::new(config)
        .with_vars(vars)
        .build_3bcid(Box::new(Identity::new(3)))
        .unwrap();
    assert_eq!(ctc.vars().as_slice(), &[0, 2]);
    assert_eq!(ctc.window(), WindowSize::Count(1));
}

#[test]
fn test_build_rejects_invalid_config() {
    let config = ContractorConfig::new().with_max_slices(0);
    let result = ContractorBuilder::new(config).build_3bcid(Box::new(Identity::new(1)));
    assert!(matches!(result, Err(BuildError::Config(_))));
}

#[test]
fn test_build_rejects_var_set_dimension() {
    let result = ContractorBuilder::default()
        .with_vars(VarSet::all(2))
        .build_bound_shaving(Box::new(Identity::new(3)));
    assert!(matches!(
        result,
        Err(BuildError::DimensionMismatch { vars: 2, ctc: 3 })
    ));
}

#[test]
fn test_build_acid() {
    let system = system();
    let acid = ContractorBuilder::default()
        .build_acid(Box::new(system.clone()), Box::new(system.hc4()))
        .unwrap();
    assert_eq!(acid.nb_var(), 2);
    assert_eq!(acid.vars().len(), 2);
}

#[test]
fn test_build_acid_rejects_system_dimension() {
    let result = ContractorBuilder::default()
        .build_acid(Box::new(system()), Box::new(Identity::new(3)));
    assert!(matches!(
        result,
        Err(BuildError::SystemMismatch { system: 2, ctc: 3 })
    ));
}

#[test]
fn test_build_bound_shaving_uses_config() {
    let mut config = ContractorConfig::new();
    config.bound_shaving = BoundShavingConfig {
        var_ratio: 0.5,
        ..BoundShavingConfig::default()
    };
    let mut ctc = ContractorBuilder::new(config)
        .build_bound_shaving(Box::new(UpperBound::new(1, 0, 5.0)))
        .unwrap();
    assert_eq!(ctc.config().var_ratio, 0.5);

    let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);
    ctc.contract_box(&mut domain).unwrap();
    assert_eq!(domain[0], Interval::new(0.0, 5.0));
}

#[test]
fn test_build_error_messages() {
    let err = BuildError::SystemMismatch { system: 2, ctc: 3 };
    assert_eq!(err.to_string(), "system has 2 variables, sub-contractor has 3");
}
