//! Adaptive CID (ACID).
//!
//! [`CtcAcid`] shaves the handled variables in smear order and lets an
//! [`AcidTuner`] learn how many of them are worth shaving per call.

mod smear;
mod tuner;


use std::fmt::{self, Debug};

use intervalforge_config::{AdaptiveConfig, ShavingConfig};
use intervalforge_core::{
    ContractResult, Contractor, DifferentiableSystem, Impact, Infeasible, IntervalVector, VarSet,
};
use tracing::debug;

use crate::shaving::Shaver;
use crate::statistics::ContractionStatistics;

pub use smear::{put_first, smear_order};
pub use tuner::{relative_gain, AcidTuner};

/// 3BCID with a self-tuned window and smear-ordered variables.
///
/// Each call recomputes the smear order of the handled variables from the
/// system's Jacobian over the current box, then shaves the first `window`
/// of them (wrapping around when the window exceeds the handled count).
/// The impact hint is ignored.
///
/// The tuner state is owned by the instance and deep-cloned with it.
///
/// # Examples
///
/// ```
/// use intervalforge_config::{AdaptiveConfig, ShavingConfig};
/// use intervalforge_contract::CtcAcid;
/// use intervalforge_core::{Contractor, Interval, IntervalVector};
/// use intervalforge_test::linear::{LinearConstraint, LinearSystem};
///
/// // x + y = 10, x - y = 0
/// let system = LinearSystem::new(2, vec![
///     LinearConstraint::equal(vec![1.0, 1.0], 10.0),
///     LinearConstraint::equal(vec![1.0, -1.0], 0.0),
/// ]);
/// let mut acid = CtcAcid::new(
///     Box::new(system.clone()),
///     Box::new(system.hc4()),
///     ShavingConfig::default(),
///     AdaptiveConfig::default(),
/// );
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
///
/// acid.contract_box(&mut domain).unwrap();
/// assert_eq!(domain[0], Interval::point(5.0));
/// assert_eq!(acid.window(), 2);
/// ```
#[derive(Clone)]
pub struct CtcAcid {
    shaver: Shaver,
    vars: VarSet,
    system: Box<dyn DifferentiableSystem>,
    tuner: AcidTuner,
    objective_first: bool,
    window: usize,
}

impl Debug for CtcAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtcAcid")
            .field("shaver", &self.shaver)
            .field("vars", &self.vars.len())
            .field("system", &self.system)
            .field("window", &self.window)
            .field("tunings", &self.tuner.tunings())
            .finish()
    }
}

impl CtcAcid {
    /// Creates an ACID contractor handling every variable.
    pub fn new(
        system: Box<dyn DifferentiableSystem>,
        ctc: Box<dyn Contractor>,
        shaving: ShavingConfig,
        adaptive: AdaptiveConfig,
    ) -> Self {
        let vars = VarSet::all(ctc.nb_var());
        Self::with_vars(vars, system, ctc, shaving, adaptive)
    }

    /// Creates an ACID contractor handling only `vars`.
    ///
    /// The system, the sub-contractor and `vars` must share the same
    /// variables; [`ContractorBuilder`](crate::ContractorBuilder) checks this.
    pub fn with_vars(
        vars: VarSet,
        system: Box<dyn DifferentiableSystem>,
        ctc: Box<dyn Contractor>,
        shaving: ShavingConfig,
        adaptive: AdaptiveConfig,
    ) -> Self {
        Self {
            shaver: Shaver::new(ctc, shaving),
            tuner: AcidTuner::new(adaptive, vars.len()),
            objective_first: adaptive.objective_first,
            window: 0,
            vars,
            system,
        }
    }

    pub fn vars(&self) -> &VarSet {
        &self.vars
    }

    /// Window used by the last call.
    pub fn window(&self) -> usize {
        self.window
    }

    pub fn tuner(&self) -> &AcidTuner {
        &self.tuner
    }

    /// Completed tuning phases.
    pub fn tunings(&self) -> u64 {
        self.tuner.tunings()
    }

    /// Average tuned window over all tuning phases of this instance.
    pub fn tuned_window_average(&self) -> f64 {
        self.tuner.tuned_window_average()
    }

    pub fn statistics(&self) -> &ContractionStatistics {
        self.shaver.statistics()
    }

    pub fn reset_statistics(&mut self) {
        self.shaver.statistics_mut().reset();
    }

    /// The order in which the next call would visit the handled variables.
    pub fn visit_order(&self, domain: &IntervalVector) -> Vec<usize> {
        let mut order = smear_order(&*self.system, &self.vars, domain);
        if self.objective_first {
            if let Some(objective) = self.shaver.nb_var().checked_sub(1) {
                put_first(&mut order, objective);
            }
        }
        order
    }

    fn contract_adaptive(&mut self, domain: &mut IntervalVector) -> ContractResult {
        if domain.is_empty() {
            return Err(Infeasible);
        }

        let mark = self.shaver.statistics().variables_shaved;
        let tuning = self.tuner.is_tuning();
        self.window = self.tuner.begin_call();

        let order = if self.window > 0 {
            self.visit_order(domain)
        } else {
            Vec::new()
        };
        if !order.is_empty() {
            let mut before = domain.clone();
            for position in 0..self.window {
                let var = order[position % order.len()];
                self.shaver.shave_variable(domain, var)?;
                if tuning {
                    self.tuner.record_gain(position, &before, domain);
                    before.clone_from(domain);
                }
            }
        }

        self.shaver.contract_if_idle(domain, mark)?;

        if let Some(tuned) = self.tuner.end_call() {
            debug!(
                event = "tuning_end",
                tuned_window = tuned as u64,
                tunings = self.tuner.tunings(),
                average = self.tuner.tuned_window_average(),
            );
        }
        Ok(())
    }
}

impl Contractor for CtcAcid {
    fn nb_var(&self) -> usize {
        self.shaver.nb_var()
    }

    fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
        self.shaver.statistics_mut().calls += 1;
        let tuning = self.tuner.is_tuning();
        let result = self.contract_adaptive(domain);
        if result.is_err() {
            self.shaver.statistics_mut().infeasible_calls += 1;
            domain.set_empty();
        }

        debug!(
            event = "contract",
            contractor = "acid",
            infeasible = result.is_err(),
            tuning = tuning,
            window = self.window as u64,
            subcontractor_calls = self.shaver.statistics().subcontractor_calls,
        );
        result
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}
