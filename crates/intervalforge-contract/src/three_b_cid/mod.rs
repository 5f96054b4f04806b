//! The 3BCID contractor: shaving plus constructive disjunction over a
//! rotating window of variables.

use intervalforge_config::{ShavingConfig, WindowSize};
use intervalforge_core::{ContractResult, Contractor, Impact, Infeasible, IntervalVector, VarSet};
use tracing::debug;

use crate::shaving::Shaver;
use crate::statistics::ContractionStatistics;


/// Shaves `window` handled variables per call, starting where the
/// previous call stopped.
///
/// Each call processes the handled variables at positions
/// `start, start + 1, ..., start + window - 1` (modulo the number of
/// handled variables) and then advances `start` by `window`, so that
/// successive calls sweep across all of them. The first `Infeasible`
/// aborts the call.
///
/// When the impact hint names a single handled variable, only that
/// variable is shaved and the window does not move.
///
/// # Examples
///
/// ```
/// use intervalforge_config::ShavingConfig;
/// use intervalforge_contract::Ctc3BCid;
/// use intervalforge_core::{Contractor, Interval, IntervalVector};
/// use intervalforge_test::threshold::UpperBound;
///
/// let mut ctc = Ctc3BCid::new(Box::new(UpperBound::new(2, 1, 5.0)), ShavingConfig::default());
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
///
/// ctc.contract_box(&mut domain).unwrap();
/// assert_eq!(domain[1], Interval::new(0.0, 5.0));
/// assert_eq!(ctc.statistics().calls, 1);
/// ```
#[derive(Debug, Clone)]
pub struct Ctc3BCid {
    shaver: Shaver,
    vars: VarSet,
    window: WindowSize,
    start_var: usize,
}

impl Ctc3BCid {
    /// Creates a 3BCID contractor handling every variable of `ctc`.
    pub fn new(ctc: Box<dyn Contractor>, config: ShavingConfig) -> Self {
        let vars = VarSet::all(ctc.nb_var());
        Self::with_vars(vars, ctc, config)
    }

    /// Creates a 3BCID contractor handling only `vars`.
    ///
    /// `vars` must be defined over the sub-contractor's variables;
    /// [`ContractorBuilder`](crate::ContractorBuilder) checks this.
    pub fn with_vars(vars: VarSet, ctc: Box<dyn Contractor>, config: ShavingConfig) -> Self {
        Self {
            window: config.window,
            shaver: Shaver::new(ctc, config),
            vars,
            start_var: 0,
        }
    }

    /// The handled variables.
    pub fn vars(&self) -> &VarSet {
        &self.vars
    }

    /// Position in the handled set where the next call starts.
    pub fn start_var(&self) -> usize {
        self.start_var
    }

    pub fn window(&self) -> WindowSize {
        self.window
    }

    pub fn statistics(&self) -> &ContractionStatistics {
        self.shaver.statistics()
    }

    /// Zeroes the statistics. The window position is kept.
    pub fn reset_statistics(&mut self) {
        self.shaver.statistics_mut().reset();
    }

    fn contract_window(&mut self, domain: &mut IntervalVector, impact: Impact) -> ContractResult {
        if domain.is_empty() {
            return Err(Infeasible);
        }

        let mark = self.shaver.statistics().variables_shaved;
        let handled = self.vars.len();

        match impact.single().filter(|&v| self.vars.contains(v)) {
            Some(var) => {
                self.shaver.shave_variable(domain, var)?;
            }
            None if handled > 0 => {
                let window = self.window.resolve(handled);
                for k in 0..window {
                    let var = self.vars.get(wrap(self.start_var, k, handled));
                    self.shaver.shave_variable(domain, var)?;
                }
                self.start_var = wrap(self.start_var, window, handled);
            }
            None => {}
        }

        self.shaver.contract_if_idle(domain, mark)
    }
}

/// Position `offset` steps after `start` in a cycle of `handled` positions.
///
/// `start` must be below `handled`; `offset` may be arbitrarily large.
fn wrap(start: usize, offset: usize, handled: usize) -> usize {
    (start + offset % handled) % handled
}

impl Contractor for Ctc3BCid {
    fn nb_var(&self) -> usize {
        self.shaver.nb_var()
    }

    fn contract(&mut self, domain: &mut IntervalVector, impact: Impact) -> ContractResult {
        self.shaver.statistics_mut().calls += 1;
        let result = self.contract_window(domain, impact);
        if result.is_err() {
            self.shaver.statistics_mut().infeasible_calls += 1;
            domain.set_empty();
        }

        debug!(
            event = "contract",
            contractor = "3bcid",
            infeasible = result.is_err(),
            start_var = self.start_var as u64,
            subcontractor_calls = self.shaver.statistics().subcontractor_calls,
        );
        result
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}
