//! Dichotomic shaving.
//!
//! Each bound is probed with a trial slice anchored at it. A slice that
//! survives the sub-contractor is bisected towards the bound until it is
//! no wider than the target width; a refuted slice is cut off and the
//! next trial takes twice its width.

use intervalforge_core::{ContractResult, Infeasible, Interval, IntervalVector};

use super::{Shaver, Side};

impl Shaver {
    /// Shaves both bounds of `var` dichotomically, then runs constructive
    /// disjunction on the part left between them.
    pub(super) fn shave_dichotomic(
        &mut self,
        domain: &mut IntervalVector,
        var: usize,
        width: f64,
    ) -> ContractResult<bool> {
        let initbox = domain.clone();

        let left_narrowed = self.shave_bound(domain, var, width, Side::Left)?;
        if domain[var].ub() == initbox[var].ub() {
            // the left slice reaches the right bound
            return Ok(left_narrowed || *domain != initbox);
        }

        let left_box = std::mem::replace(domain, initbox.clone());
        domain[var] = Interval::new(left_box[var].lb(), initbox[var].ub());

        let right_narrowed = match self.shave_bound(domain, var, width, Side::Right) {
            Ok(narrowed) => narrowed,
            Err(Infeasible) => {
                *domain = left_box;
                return Ok(true);
            }
        };
        let right_box = std::mem::replace(domain, initbox.clone());

        let (middle_lo, middle_hi) = (left_box[var].ub(), right_box[var].lb());
        if middle_lo <= middle_hi {
            let mut middle = initbox.clone();
            middle[var] = Interval::new(middle_lo, middle_hi);
            let mut hull = left_box.hull(&right_box);
            if self.constructive_disjunction(var, &middle, &mut hull) {
                *domain = hull;
                return Ok(true);
            }
        }

        // Only `var` is narrowed.
        domain[var] = Interval::new(left_box[var].lb(), right_box[var].ub());
        Ok(left_narrowed || right_narrowed)
    }

    /// Moves one bound of `var` by dichotomic probing.
    ///
    /// On success the box holds the last accepted (contracted) trial slice.
    /// Returns whether the bound moved by at least `width`.
    ///
    /// # Errors
    ///
    /// Returns [`Infeasible`] only when the whole domain of `var` has been
    /// refuted, not when a single probe fails.
    pub fn shave_bound(
        &mut self,
        domain: &mut IntervalVector,
        var: usize,
        width: f64,
        side: Side,
    ) -> ContractResult<bool> {
        let initbox = domain.clone();
        let x = initbox[var];
        let (inf0, sup0) = (x.lb(), x.ub());
        let (mut inf, mut sup) = (inf0, sup0);

        match side {
            Side::Left => {
                // the trial slice is [inf, edge]
                let mut edge = x.mid();
                loop {
                    domain[var] = Interval::new(inf, edge);
                    match self.try_slice(domain, var) {
                        Ok(()) => {
                            inf = domain[var].lb();
                            let mid = 0.5 * (inf + edge);
                            // the last two tests stop splitting two adjacent floats
                            if edge - inf <= width || inf >= mid || edge <= mid {
                                break;
                            }
                            edge = mid;
                        }
                        Err(Infeasible) => {
                            if inf == edge {
                                if inf == sup {
                                    return Err(Infeasible);
                                }
                                *domain = initbox;
                                domain[var] = Interval::new(inf, sup);
                                break;
                            }
                            let refuted = edge - inf;
                            inf = edge;
                            edge = (edge + 2.0 * refuted).min(sup0);
                            *domain = initbox.clone();
                        }
                    }
                }
            }
            Side::Right => {
                // the trial slice is [edge, sup]
                let mut edge = x.mid();
                loop {
                    domain[var] = Interval::new(edge, sup);
                    match self.try_slice(domain, var) {
                        Ok(()) => {
                            sup = domain[var].ub();
                            let mid = 0.5 * (edge + sup);
                            if sup - edge <= width || edge >= mid || sup <= mid {
                                break;
                            }
                            edge = mid;
                        }
                        Err(Infeasible) => {
                            if sup == edge {
                                if inf == sup {
                                    return Err(Infeasible);
                                }
                                *domain = initbox;
                                domain[var] = Interval::new(inf, sup);
                                break;
                            }
                            let refuted = sup - edge;
                            sup = edge;
                            edge = (edge - 2.0 * refuted).max(inf0);
                            *domain = initbox.clone();
                        }
                    }
                }
            }
        }

        Ok(!(inf < inf0 + width && sup > sup0 - width))
    }

    /// Moves one bound of `var` and narrows only `var` itself: the other
    /// variables keep their values from before the probe.
    pub(crate) fn narrow_bound(
        &mut self,
        domain: &mut IntervalVector,
        var: usize,
        width: f64,
        side: Side,
    ) -> ContractResult<bool> {
        let snapshot = domain.clone();
        let narrowed = self.shave_bound(domain, var, width, side)?;
        let shaved = match side {
            Side::Left => Interval::new(domain[var].lb(), snapshot[var].ub()),
            Side::Right => Interval::new(snapshot[var].lb(), domain[var].ub()),
        };
        *domain = snapshot;
        domain[var] = shaved;
        Ok(narrowed)
    }
}
