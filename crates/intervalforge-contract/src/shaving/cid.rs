//! Constructive interval disjunction.

use intervalforge_core::IntervalVector;
use tracing::trace;

use super::plan::nth_slice;
use super::Shaver;

impl Shaver {
    /// Contracts the `cid_slices` slices of `middle[var]` and hulls the
    /// surviving ones into `hull`, which holds the boundary boxes on entry.
    ///
    /// Returns true when the disjunction narrowed some variable other than
    /// `var` compared to `middle`; `hull` then holds the result. When it
    /// returns false the caller keeps the plain shaving result: `hull` may
    /// have absorbed slices but is no tighter than `middle` elsewhere.
    ///
    /// Stops as soon as the hull has grown back to `middle` on every other
    /// dimension. A refuted slice simply contributes nothing.
    pub(crate) fn constructive_disjunction(
        &mut self,
        var: usize,
        middle: &IntervalVector,
        hull: &mut IntervalVector,
    ) -> bool {
        let slices = self.config.cid_slices;
        if slices == 0 || middle.equal_except(var, hull) {
            return false;
        }

        self.statistics.cid_runs += 1;
        let dom = middle[var];
        let width = dom.diam() / slices as f64;

        for k in 0..slices {
            let mut trial = middle.clone();
            trial[var] = nth_slice(&dom, k, slices, width);
            if self.try_slice(&mut trial, var).is_err() {
                continue;
            }
            hull.hull_assign(&trial);
            if middle.equal_except(var, hull) {
                trace!(event = "cid", var = var as u64, useful = false, slice = k as u64);
                return false;
            }
        }

        self.statistics.useful_cids += 1;
        trace!(event = "cid", var = var as u64, useful = true);
        true
    }
}
