//! Single-variable shaving and constructive disjunction.
//!
//! A [`Shaver`] owns a sub-contractor and narrows one variable at a time:
//!
//! - **Linear shaving** splits the variable into equal slices and refutes
//!   them from the left and then from the right, keeping the first
//!   surviving slice of each side.
//! - **Dichotomic shaving** grows or bisects a trial slice anchored at each
//!   bound, for variables that would need many slices.
//! - **Constructive disjunction** (CID) contracts the slices of the
//!   unresolved middle part and hulls them with the two surviving boundary
//!   boxes, which can narrow the other variables as well.
//!
//! Every trial starts from a snapshot of the box. A refuted trial restores
//! that snapshot, so the working box is always either an accepted
//! (contracted) slice or exactly its previous value.

mod cid;
mod dichotomic;
mod linear;
mod plan;

#[cfg(test)]
mod tests;

use std::fmt::{self, Debug};

use intervalforge_config::ShavingConfig;
use intervalforge_core::{ContractResult, Contractor, Impact, IntervalVector};
use tracing::trace;

use crate::statistics::ContractionStatistics;

pub use plan::{ShaveStrategy, SlicePlan};

/// Which bound of a variable a dichotomic probe moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Increase the lower bound.
    Left,
    /// Decrease the upper bound.
    Right,
}

/// Per-variable shaving engine.
///
/// # Examples
///
/// ```
/// use intervalforge_config::ShavingConfig;
/// use intervalforge_contract::Shaver;
/// use intervalforge_core::{Interval, IntervalVector};
/// use intervalforge_test::threshold::UpperBound;
///
/// // x0 <= 5 on [0, 10]
/// let mut shaver = Shaver::new(Box::new(UpperBound::new(1, 0, 5.0)), ShavingConfig::default());
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);
///
/// shaver.shave_variable(&mut domain, 0).unwrap();
/// assert_eq!(domain[0], Interval::new(0.0, 5.0));
/// ```
#[derive(Clone)]
pub struct Shaver {
    ctc: Box<dyn Contractor>,
    config: ShavingConfig,
    statistics: ContractionStatistics,
}

impl Debug for Shaver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shaver")
            .field("ctc", &self.ctc)
            .field("max_slices", &self.config.max_slices)
            .field("cid_slices", &self.config.cid_slices)
            .field("min_width", &self.config.min_width)
            .finish()
    }
}

impl Shaver {
    /// Creates a shaver around `ctc`.
    ///
    /// The configuration is expected to be valid (see
    /// [`ContractorConfig::validate`](intervalforge_config::ContractorConfig::validate)).
    pub fn new(ctc: Box<dyn Contractor>, config: ShavingConfig) -> Self {
        Self {
            ctc,
            config,
            statistics: ContractionStatistics::new(),
        }
    }

    /// Dimension of the sub-contractor.
    pub fn nb_var(&self) -> usize {
        self.ctc.nb_var()
    }

    pub fn config(&self) -> &ShavingConfig {
        &self.config
    }

    pub fn statistics(&self) -> &ContractionStatistics {
        &self.statistics
    }

    pub(crate) fn statistics_mut(&mut self) -> &mut ContractionStatistics {
        &mut self.statistics
    }

    /// Calls the sub-contractor on the whole box.
    pub(crate) fn contract_whole(
        &mut self,
        domain: &mut IntervalVector,
        impact: Impact,
    ) -> ContractResult {
        self.statistics.subcontractor_calls += 1;
        self.ctc.contract(domain, impact)
    }

    /// Shaves `var`, followed by a constructive disjunction when both
    /// bounds leave an unresolved middle part.
    ///
    /// Returns whether the box changed. Variables narrower than the
    /// minimum width, or unbounded, are left alone.
    ///
    /// # Errors
    ///
    /// Returns [`Infeasible`](intervalforge_core::Infeasible) when every
    /// part of the variable's domain is refuted.
    pub fn shave_variable(&mut self, domain: &mut IntervalVector, var: usize) -> ContractResult<bool> {
        let Some(plan) = SlicePlan::new(
            &domain[var],
            self.config.max_slices,
            self.config.min_width,
        ) else {
            return Ok(false);
        };

        self.statistics.variables_shaved += 1;
        let strategy = plan.strategy(self.config.dichotomy_threshold);
        let narrowed = match strategy {
            ShaveStrategy::Dichotomic => {
                self.statistics.dichotomic_shavings += 1;
                self.shave_dichotomic(domain, var, plan.width())
            }
            ShaveStrategy::Linear => {
                self.statistics.linear_shavings += 1;
                self.shave_linear(domain, var, &plan)
            }
        }?;

        trace!(
            event = "shave",
            var = var as u64,
            strategy = ?strategy,
            slices = plan.count() as u64,
            narrowed = narrowed,
        );
        Ok(narrowed)
    }

    /// Calls the sub-contractor on the whole box unless some variable has
    /// been shaved since the statistics showed `mark` shaved variables.
    ///
    /// A call that shaves nothing still filters the box at least as
    /// strongly as the sub-contractor alone.
    pub(crate) fn contract_if_idle(&mut self, domain: &mut IntervalVector, mark: u64) -> ContractResult {
        if self.statistics.variables_shaved == mark {
            self.contract_whole(domain, Impact::AllVariables)
        } else {
            Ok(())
        }
    }

    /// Calls the sub-contractor on a trial slice of `var`.
    fn try_slice(&mut self, trial: &mut IntervalVector, var: usize) -> ContractResult {
        self.statistics.subcontractor_calls += 1;
        let result = self.ctc.contract(trial, Impact::SingleVariable(var));
        if result.is_err() {
            self.statistics.slices_refuted += 1;
        }
        result
    }
}
