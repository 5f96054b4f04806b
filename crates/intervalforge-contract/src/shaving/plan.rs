//! Slice planning.

use intervalforge_core::Interval;

/// How a variable is shaved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaveStrategy {
    /// Bisection-based probing of each bound.
    Dichotomic,
    /// Equal-slice scan from each bound.
    Linear,
}

/// Number and width of the slices a variable is split into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlicePlan {
    count: usize,
    width: f64,
}

impl SlicePlan {
    /// Plans the slicing of `dom`.
    ///
    /// Starts from `max_slices` slices; when those would be narrower than
    /// `min_width`, uses `floor(diam / min_width)` slices instead, but at
    /// least 2. Returns `None` for domains that are unbounded, degenerate
    /// or narrower than `min_width`.
    pub fn new(dom: &Interval, max_slices: usize, min_width: f64) -> Option<Self> {
        let diam = dom.diam();
        if diam < min_width || diam == 0.0 || !diam.is_finite() {
            return None;
        }

        let mut count = max_slices.max(1);
        let mut width = diam / count as f64;
        if width < min_width {
            count = ((diam / min_width).floor() as usize).max(2);
            width = diam / count as f64;
        }
        Some(Self { count, width })
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Dichotomic above `threshold` slices, linear otherwise.
    pub fn strategy(&self, threshold: usize) -> ShaveStrategy {
        if self.count > threshold {
            ShaveStrategy::Dichotomic
        } else {
            ShaveStrategy::Linear
        }
    }

    /// The `k`-th slice of `dom`.
    pub fn slice(&self, dom: &Interval, k: usize) -> Interval {
        nth_slice(dom, k, self.count, self.width)
    }
}

/// The `k`-th of `count` slices of width `width` starting at `dom.lb()`.
///
/// The last slice always ends exactly at `dom.ub()`.
pub(crate) fn nth_slice(dom: &Interval, k: usize, count: usize, width: f64) -> Interval {
    let inf = (dom.lb() + k as f64 * width).min(dom.ub());
    let mut sup = dom.lb() + (k + 1) as f64 * width;
    if sup > dom.ub() || (k + 1 == count && sup < dom.ub()) {
        sup = dom.ub();
    }
    Interval::new(inf, sup)
}
