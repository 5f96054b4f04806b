//! IntervalForge - Shaving and Constructive Disjunction Contractors
//!
//! Wrap any sound sub-contractor into a stronger one: 3BCID shaves
//! thin slices near each variable bound and recombines the survivors
//! with constructive disjunction; ACID additionally learns how many
//! variables are worth the effort on each call.
//!
//! # Example
//!
//! ```rust
//! use intervalforge::prelude::*;
//! use intervalforge_test::threshold::UpperBound;
//!
//! // Any sound sub-contractor; here a plain `x0 <= 5`.
//! let sub = UpperBound::new(2, 0, 5.0);
//!
//! let config = ContractorConfig::new().with_max_slices(20);
//! let mut ctc = ContractorBuilder::new(config).build_3bcid(Box::new(sub)).unwrap();
//!
//! let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (-1.0, 1.0)]);
//! ctc.contract_box(&mut domain).unwrap();
//! assert_eq!(domain[0], Interval::new(0.0, 5.0));
//! ```

// Interval substrate and contractor traits
pub use intervalforge_core::{
    ContractResult, Contractor, DifferentiableSystem, EvalError, Impact, Infeasible, Interval,
    IntervalMatrix, IntervalVector, VarSet, VarSetError,
};

// Configuration
pub use intervalforge_config::{
    AdaptiveConfig, BoundShavingConfig, ConfigError, ContractorConfig, ShavingConfig, WindowSize,
};

// Contractors
pub use intervalforge_contract::{
    AcidTuner, BoundShaving, BuildError, ContractionStatistics, ContractorBuilder, Ctc3BCid,
    CtcAcid, ShaveStrategy, Shaver, Side, SlicePlan,
};

mod batch;
pub use batch::contract_batch;

#[cfg(feature = "console")]
pub use intervalforge_console as console;


pub mod prelude {
    pub use super::{
        Contractor, ContractResult, DifferentiableSystem, Impact, Infeasible, Interval,
        IntervalVector, VarSet,
    };
    pub use super::{AdaptiveConfig, ContractorConfig, ShavingConfig, WindowSize};
    pub use super::{BoundShaving, ContractorBuilder, Ctc3BCid, CtcAcid};
    pub use super::contract_batch;
}
