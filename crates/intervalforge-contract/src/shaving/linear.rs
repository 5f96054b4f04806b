//! Linear (equal-slice) shaving.

use intervalforge_core::{ContractResult, Infeasible, Interval, IntervalVector};

use super::plan::SlicePlan;
use super::Shaver;

impl Shaver {
    /// Scans the slices of `var` from the left, then from the right, and
    /// merges what survives.
    ///
    /// - No surviving slice: the box is empty.
    /// - Only the last slice survives the left scan, or the two scans meet
    ///   at adjacent slices: the box becomes the (hull of the) contracted
    ///   surviving slice(s).
    /// - Otherwise the middle part between the two surviving slices goes
    ///   through constructive disjunction.
    pub(super) fn shave_linear(
        &mut self,
        domain: &mut IntervalVector,
        var: usize,
        plan: &SlicePlan,
    ) -> ContractResult<bool> {
        let savebox = domain.clone();
        let dom = savebox[var];
        let count = plan.count();

        let mut left = None;
        for k in 0..count {
            let mut trial = savebox.clone();
            trial[var] = plan.slice(&dom, k);
            if self.try_slice(&mut trial, var).is_ok() {
                left = Some((k, trial));
                break;
            }
        }

        let Some((k_left, left_box)) = left else {
            domain.set_empty();
            return Err(Infeasible);
        };

        if k_left + 1 == count {
            *domain = left_box;
            return Ok(*domain != savebox);
        }

        let mut right = None;
        for k in (k_left + 1..count).rev() {
            let mut trial = savebox.clone();
            trial[var] = plan.slice(&dom, k);
            if self.try_slice(&mut trial, var).is_ok() {
                right = Some((k, trial));
                break;
            }
        }

        let Some((k_right, right_box)) = right else {
            *domain = left_box;
            return Ok(*domain != savebox);
        };

        let mut hull = left_box.hull(&right_box);
        if k_left + 1 == k_right {
            *domain = hull;
            return Ok(*domain != savebox);
        }

        // The refuted slices stay out of the middle part.
        let mut middle = savebox.clone();
        middle[var] = Interval::new(plan.slice(&dom, k_left).ub(), plan.slice(&dom, k_right).lb());

        if self.constructive_disjunction(var, &middle, &mut hull) {
            *domain = hull;
        } else {
            *domain = middle;
            domain[var] = Interval::new(left_box[var].lb(), right_box[var].ub());
        }
        Ok(*domain != savebox)
    }
}
