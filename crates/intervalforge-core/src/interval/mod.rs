//! Real intervals and the box/matrix types built on them.
//!
//! Bounds are plain `f64` values. Operations are not outward-rounded:
//! numerical rigor of elementary functions is the business of the
//! sub-contractors, not of this substrate.

mod matrix;
mod vector;

use std::fmt;
use std::ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, Div, Mul, Neg, Sub};

pub use matrix::IntervalMatrix;
pub use vector::IntervalVector;

/// A closed real interval `[lo, hi]`, possibly unbounded, possibly empty.
///
/// The empty interval has a single canonical representation, so two
/// empty intervals always compare equal.
///
/// # Examples
///
/// ```
/// use intervalforge_core::Interval;
///
/// let x = Interval::new(0.0, 10.0);
/// assert_eq!(x.diam(), 10.0);
/// assert_eq!(x.mid(), 5.0);
/// assert_eq!(x | Interval::new(12.0, 13.0), Interval::new(0.0, 13.0));
/// assert!((x & Interval::new(11.0, 12.0)).is_empty());
/// ```
#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// The empty interval.
    pub const EMPTY: Interval = Interval {
        lo: f64::INFINITY,
        hi: f64::NEG_INFINITY,
    };

    /// The entire real line.
    pub const ENTIRE: Interval = Interval {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    /// The degenerate interval `[0, 0]`.
    pub const ZERO: Interval = Interval { lo: 0.0, hi: 0.0 };

    /// Creates `[lo, hi]`. Inverted or NaN bounds give the empty interval.
    #[inline]
    pub fn new(lo: f64, hi: f64) -> Self {
        if lo <= hi {
            Interval { lo, hi }
        } else {
            Interval::EMPTY
        }
    }

    /// Creates the degenerate interval `[v, v]`.
    #[inline]
    pub fn point(v: f64) -> Self {
        Interval::new(v, v)
    }

    #[inline]
    pub fn lb(&self) -> f64 {
        self.lo
    }

    #[inline]
    pub fn ub(&self) -> f64 {
        self.hi
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lo > self.hi
    }

    /// Returns true if either bound is infinite.
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        !self.is_empty() && (self.lo.is_infinite() || self.hi.is_infinite())
    }

    /// Returns true if the interval is a single point.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }

    /// Width of the interval; 0 for the empty interval.
    #[inline]
    pub fn diam(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.hi - self.lo
        }
    }

    /// Midpoint, computed without overflow.
    ///
    /// Half-unbounded intervals return the extreme finite value on their
    /// unbounded side. The entire line returns 0, the empty interval NaN.
    pub fn mid(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        match (self.lo.is_finite(), self.hi.is_finite()) {
            (true, true) => {
                let m = 0.5 * (self.lo + self.hi);
                if m.is_finite() {
                    m
                } else {
                    0.5 * self.lo + 0.5 * self.hi
                }
            }
            (false, false) => 0.0,
            (false, true) => f64::MIN,
            (true, false) => f64::MAX,
        }
    }

    /// Magnitude `max(|lo|, |hi|)`; 0 for the empty interval.
    #[inline]
    pub fn mag(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.lo.abs().max(self.hi.abs())
        }
    }

    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// Returns true if every point of `self` lies in `other`.
    #[inline]
    pub fn is_subset(&self, other: &Interval) -> bool {
        self.is_empty() || (other.lo <= self.lo && self.hi <= other.hi)
    }

    /// Smallest interval containing both operands.
    #[inline]
    pub fn hull(&self, other: &Interval) -> Interval {
        if self.is_empty() {
            *other
        } else if other.is_empty() {
            *self
        } else {
            Interval {
                lo: self.lo.min(other.lo),
                hi: self.hi.max(other.hi),
            }
        }
    }

    #[inline]
    pub fn intersect(&self, other: &Interval) -> Interval {
        Interval::new(self.lo.max(other.lo), self.hi.min(other.hi))
    }

    /// Relative diameter reduction from `self` to `narrowed`, in `[0, 1]`.
    ///
    /// Degenerate or unbounded starting intervals report no reduction.
    pub fn reduction_ratio(&self, narrowed: &Interval) -> f64 {
        let before = self.diam();
        let after = narrowed.diam();
        if before == 0.0 || !before.is_finite() || !after.is_finite() {
            0.0
        } else {
            (1.0 - after / before).clamp(0.0, 1.0)
        }
    }
}

impl Default for Interval {
    fn default() -> Self {
        Interval::ENTIRE
    }
}

impl fmt::Debug for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "[empty]")
        } else {
            write!(f, "[{}, {}]", self.lo, self.hi)
        }
    }
}

impl BitOr for Interval {
    type Output = Interval;

    fn bitor(self, rhs: Interval) -> Interval {
        self.hull(&rhs)
    }
}

impl BitOrAssign for Interval {
    fn bitor_assign(&mut self, rhs: Interval) {
        *self = self.hull(&rhs);
    }
}

impl BitAnd for Interval {
    type Output = Interval;

    fn bitand(self, rhs: Interval) -> Interval {
        self.intersect(&rhs)
    }
}

impl BitAndAssign for Interval {
    fn bitand_assign(&mut self, rhs: Interval) {
        *self = self.intersect(&rhs);
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        if self.is_empty() {
            self
        } else {
            Interval {
                lo: -self.hi,
                hi: -self.lo,
            }
        }
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, rhs: Interval) -> Interval {
        if self.is_empty() || rhs.is_empty() {
            return Interval::EMPTY;
        }
        Interval::new(self.lo + rhs.lo, self.hi + rhs.hi)
    }
}

impl Sub for Interval {
    type Output = Interval;

    fn sub(self, rhs: Interval) -> Interval {
        self + (-rhs)
    }
}

impl Mul for Interval {
    type Output = Interval;

    fn mul(self, rhs: Interval) -> Interval {
        if self.is_empty() || rhs.is_empty() {
            return Interval::EMPTY;
        }
        // 0 * inf is taken as 0
        let product = |a: f64, b: f64| {
            let p = a * b;
            if p.is_nan() {
                0.0
            } else {
                p
            }
        };
        let candidates = [
            product(self.lo, rhs.lo),
            product(self.lo, rhs.hi),
            product(self.hi, rhs.lo),
            product(self.hi, rhs.hi),
        ];
        let lo = candidates.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = candidates.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Interval::new(lo, hi)
    }
}

impl Mul<f64> for Interval {
    type Output = Interval;

    fn mul(self, rhs: f64) -> Interval {
        self * Interval::point(rhs)
    }
}

impl Div<f64> for Interval {
    type Output = Interval;

    /// Division by a non-zero scalar. Dividing by zero gives the entire line.
    fn div(self, rhs: f64) -> Interval {
        if self.is_empty() {
            return Interval::EMPTY;
        }
        if rhs == 0.0 {
            return Interval::ENTIRE;
        }
        let a = self.lo / rhs;
        let b = self.hi / rhs;
        Interval::new(a.min(b), a.max(b))
    }
}

impl From<(f64, f64)> for Interval {
    fn from((lo, hi): (f64, f64)) -> Self {
        Interval::new(lo, hi)
    }
}
