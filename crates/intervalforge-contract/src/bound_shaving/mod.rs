//! Plain 3B bound shaving.

use intervalforge_config::{BoundShavingConfig, ShavingConfig};
use intervalforge_core::{ContractResult, Contractor, Impact, Infeasible, IntervalVector, VarSet};
use tracing::{debug, trace};

use crate::shaving::{Shaver, Side};
use crate::statistics::ContractionStatistics;


/// Shaves both bounds of every handled variable, without disjunction.
///
/// The sub-contractor is first applied to the whole box. Then each handled
/// variable covered by the impact hint has its lower and upper bound
/// shaved dichotomically with slices of `var_ratio * diam` (never below
/// the minimum width). Only the shaved variable is narrowed; the
/// contraction of the other variables inside the probes is discarded.
///
/// The sweep is repeated while some variable's diameter shrank by a
/// fraction of at least `fixpoint_ratio`. With the default
/// `fixpoint_ratio` of `+inf` there is exactly one sweep.
///
/// # Examples
///
/// ```
/// use intervalforge_config::{BoundShavingConfig, ShavingConfig};
/// use intervalforge_contract::BoundShaving;
/// use intervalforge_core::{Contractor, IntervalVector};
/// use intervalforge_test::threshold::LowerBound;
///
/// let mut ctc = BoundShaving::new(
///     Box::new(LowerBound::new(1, 0, 3.0)),
///     ShavingConfig::default(),
///     BoundShavingConfig::default(),
/// );
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);
///
/// ctc.contract_box(&mut domain).unwrap();
/// assert_eq!(domain[0].lb(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct BoundShaving {
    shaver: Shaver,
    vars: VarSet,
    config: BoundShavingConfig,
}

impl BoundShaving {
    /// Creates a bound-shaving contractor handling every variable.
    pub fn new(ctc: Box<dyn Contractor>, shaving: ShavingConfig, config: BoundShavingConfig) -> Self {
        let vars = VarSet::all(ctc.nb_var());
        Self::with_vars(vars, ctc, shaving, config)
    }

    /// Creates a bound-shaving contractor handling only `vars`.
    pub fn with_vars(
        vars: VarSet,
        ctc: Box<dyn Contractor>,
        shaving: ShavingConfig,
        config: BoundShavingConfig,
    ) -> Self {
        Self {
            shaver: Shaver::new(ctc, shaving),
            vars,
            config,
        }
    }

    pub fn vars(&self) -> &VarSet {
        &self.vars
    }

    pub fn config(&self) -> &BoundShavingConfig {
        &self.config
    }

    pub fn statistics(&self) -> &ContractionStatistics {
        self.shaver.statistics()
    }

    pub fn reset_statistics(&mut self) {
        self.shaver.statistics_mut().reset();
    }

    fn shave_bounds(&mut self, domain: &mut IntervalVector, impact: Impact) -> ContractResult<u64> {
        if domain.is_empty() {
            return Err(Infeasible);
        }
        self.shaver.contract_whole(domain, impact)?;

        let min_width = self.shaver.config().min_width;
        let mut sweeps = 0;
        loop {
            sweeps += 1;
            let mut again = false;

            for k in 0..self.vars.len() {
                let var = self.vars.get(k);
                if !impact.covers(var) {
                    continue;
                }
                let x = domain[var];
                if x.is_degenerate() || x.is_unbounded() || x.diam() < min_width {
                    continue;
                }

                let width = (self.config.var_ratio * x.diam()).max(min_width);
                let stats = self.shaver.statistics_mut();
                stats.variables_shaved += 1;
                stats.dichotomic_shavings += 1;

                self.shaver.narrow_bound(domain, var, width, Side::Left)?;
                self.shaver.narrow_bound(domain, var, width, Side::Right)?;

                let ratio = x.reduction_ratio(&domain[var]);
                trace!(event = "shave", var = var as u64, strategy = "bounds", ratio = ratio);
                again |= ratio >= self.config.fixpoint_ratio;
            }

            if !again {
                return Ok(sweeps);
            }
        }
    }
}

impl Contractor for BoundShaving {
    fn nb_var(&self) -> usize {
        self.shaver.nb_var()
    }

    fn contract(&mut self, domain: &mut IntervalVector, impact: Impact) -> ContractResult {
        self.shaver.statistics_mut().calls += 1;
        let result = self.shave_bounds(domain, impact);
        if result.is_err() {
            self.shaver.statistics_mut().infeasible_calls += 1;
            domain.set_empty();
        }

        debug!(
            event = "contract",
            contractor = "bound_shaving",
            infeasible = result.is_err(),
            sweeps = result.as_ref().copied().unwrap_or(0),
            subcontractor_calls = self.shaver.statistics().subcontractor_calls,
        );
        result.map(|_| ())
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}
