//! The ACID window tuner.

use intervalforge_config::AdaptiveConfig;
use intervalforge_core::IntervalVector;

/// Decides how many variables ACID shaves per call.
///
/// Calls are grouped in cycles of `tuning_period * phase_factor` calls.
/// The first `tuning_period` calls of a cycle form the tuning phase:
/// the window is widened and the gain of every shaved position is
/// recorded. Each tuning call yields a sample, the number of leading
/// positions up to the last one whose gain exceeded `gain_threshold`.
/// The rounded average of those samples becomes the window for the rest
/// of the cycle.
///
/// Every window lies in `[2, 5 * handled]` when at least one variable is
/// handled.
#[derive(Debug, Clone, PartialEq)]
pub struct AcidTuner {
    config: AdaptiveConfig,
    handled: usize,
    call_in_cycle: u64,
    gains: Vec<f64>,
    useful_average: f64,
    tuned_window: usize,
    tunings: u64,
    tuned_window_average: f64,
}

impl AcidTuner {
    /// Creates a tuner for `handled` variables.
    pub fn new(config: AdaptiveConfig, handled: usize) -> Self {
        Self {
            config,
            handled,
            call_in_cycle: 0,
            gains: Vec::new(),
            useful_average: 0.0,
            tuned_window: 0,
            tunings: 0,
            tuned_window_average: 0.0,
        }
    }

    /// Returns true while the current call belongs to a tuning phase.
    #[inline]
    pub fn is_tuning(&self) -> bool {
        self.call_in_cycle < self.config.tuning_period
    }

    /// Largest window the tuner ever returns.
    #[inline]
    pub fn max_window(&self) -> usize {
        self.handled.saturating_mul(5)
    }

    /// Completed calls in the current cycle.
    pub fn call_in_cycle(&self) -> u64 {
        self.call_in_cycle
    }

    /// Completed tuning phases.
    pub fn tunings(&self) -> u64 {
        self.tunings
    }

    /// Window chosen by the last tuning phase (before clamping).
    pub fn tuned_window(&self) -> usize {
        self.tuned_window
    }

    /// Running average of the samples of the current (or last) tuning phase.
    pub fn useful_average(&self) -> f64 {
        self.useful_average
    }

    /// Average of the tuned windows over all tuning phases.
    pub fn tuned_window_average(&self) -> f64 {
        self.tuned_window_average
    }

    /// Gains recorded during the current tuning call.
    pub fn gains(&self) -> &[f64] {
        &self.gains
    }

    /// Starts a call and returns its window.
    pub fn begin_call(&mut self) -> usize {
        let tuning = self.is_tuning();
        let wanted = match (tuning, self.tunings) {
            (true, 0) => self.handled,
            (true, _) => self.tuned_window.saturating_mul(2),
            (false, _) => self.tuned_window,
        };
        let window = wanted.max(2).min(self.max_window());

        self.gains.clear();
        if tuning {
            self.gains.resize(window, 0.0);
        }
        window
    }

    /// Records the gain of shaving the variable at `position` of the
    /// window, given the box before and after that shaving.
    ///
    /// Ignored outside tuning phases.
    pub fn record_gain(&mut self, position: usize, before: &IntervalVector, after: &IntervalVector) {
        if let Some(slot) = self.gains.get_mut(position) {
            *slot = relative_gain(before, after);
        }
    }

    /// Ends a completed call.
    ///
    /// Returns the new tuned window when this call closes a tuning phase.
    /// Calls that ended in `Infeasible` must not be reported.
    pub fn end_call(&mut self) -> Option<usize> {
        let period = self.config.tuning_period;
        self.call_in_cycle += 1;
        let k = self.call_in_cycle;

        if k <= period {
            let sample = self
                .gains
                .iter()
                .rposition(|&gain| gain > self.config.gain_threshold)
                .map_or(0, |v| v + 1);
            self.useful_average = (self.useful_average * (k - 1) as f64 + sample as f64) / k as f64;
        }

        let mut tuned = None;
        if k == period {
            self.tuned_window = (self.useful_average + 0.5).floor() as usize;
            self.tunings += 1;
            self.tuned_window_average = (self.tuned_window_average * (self.tunings - 1) as f64
                + self.tuned_window as f64)
                / self.tunings as f64;
            tuned = Some(self.tuned_window);
        }

        // the counter never grows past one cycle
        if k >= self.config.cycle_length() {
            self.call_in_cycle = 0;
        }
        self.gains.clear();
        tuned
    }
}

/// Average over all dimensions of the relative diameter reduction from
/// `before` to `after`.
///
/// Dimensions that were degenerate before, or are unbounded after, count
/// as no reduction.
pub fn relative_gain(before: &IntervalVector, after: &IntervalVector) -> f64 {
    if before.as_slice().is_empty() {
        return 0.0;
    }
    let total: f64 = before
        .iter()
        .zip(after.iter())
        .filter(|(b, a)| b.diam() != 0.0 && a.diam().is_finite())
        .map(|(b, a)| 1.0 - a.diam() / b.diam())
        .sum();
    total / before.len() as f64
}
