//! Boxes: one interval per variable.

use std::fmt;
use std::ops::{BitOr, BitOrAssign, Index, IndexMut};

use smallvec::SmallVec;

use super::Interval;

/// An ordered, index-addressable vector of intervals.
///
/// Boxes have value semantics: cloning takes a snapshot that can later be
/// restored wholesale with a plain assignment. Contraction algorithms rely
/// on this to guarantee that a rejected trial never leaks partial
/// narrowing into the working box.
///
/// # Examples
///
/// ```
/// use intervalforge_core::{Interval, IntervalVector};
///
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (-1.0, 1.0)]);
/// let snapshot = domain.clone();
/// domain[0] = Interval::new(2.0, 3.0);
/// assert!(domain.is_subset(&snapshot));
/// domain = snapshot;
/// assert_eq!(domain[0], Interval::new(0.0, 10.0));
/// ```
#[derive(Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntervalVector {
    components: SmallVec<[Interval; 8]>,
}

impl IntervalVector {
    /// Creates a box of dimension `n` where every component is the entire line.
    pub fn new(n: usize) -> Self {
        Self::filled(n, Interval::ENTIRE)
    }

    /// Creates a box of dimension `n` with every component set to `x`.
    pub fn filled(n: usize, x: Interval) -> Self {
        Self {
            components: SmallVec::from_elem(x, n),
        }
    }

    /// Creates a box from `(lo, hi)` pairs.
    pub fn from_bounds(bounds: &[(f64, f64)]) -> Self {
        bounds.iter().map(|&(lo, hi)| Interval::new(lo, hi)).collect()
    }

    /// Number of components.
    #[inline]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if some component is empty, i.e. the box is the empty set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.components.iter().any(Interval::is_empty)
    }

    /// Makes every component empty.
    pub fn set_empty(&mut self) {
        for x in &mut self.components {
            *x = Interval::EMPTY;
        }
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Interval> {
        self.components.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Interval> {
        self.components.iter_mut()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Interval] {
        &self.components
    }

    /// Smallest box containing both operands.
    ///
    /// An empty box is the neutral element of the hull.
    pub fn hull(&self, other: &IntervalVector) -> IntervalVector {
        let mut result = self.clone();
        result.hull_assign(other);
        result
    }

    /// In-place hull with `other`.
    pub fn hull_assign(&mut self, other: &IntervalVector) {
        debug_assert_eq!(self.len(), other.len(), "hull of boxes of different dimension");
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.components.clone_from(&other.components);
            return;
        }
        for (x, y) in self.components.iter_mut().zip(other.iter()) {
            *x |= *y;
        }
    }

    /// Returns true if every component of `self` lies in the matching one of `other`.
    pub fn is_subset(&self, other: &IntervalVector) -> bool {
        self.is_empty()
            || (self.len() == other.len()
                && self.iter().zip(other.iter()).all(|(x, y)| x.is_subset(y)))
    }

    /// Compares two boxes on every dimension except `var`.
    pub fn equal_except(&self, var: usize, other: &IntervalVector) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .enumerate()
                .all(|(j, (x, y))| j == var || x == y)
    }

    /// Per-component diameters.
    pub fn diam(&self) -> Vec<f64> {
        self.iter().map(Interval::diam).collect()
    }

    /// Largest component diameter; 0 for a zero-dimensional box.
    pub fn max_diam(&self) -> f64 {
        self.iter().map(Interval::diam).fold(0.0, f64::max)
    }

    /// Returns true if every component of `point` lies in the box.
    pub fn contains_point(&self, point: &[f64]) -> bool {
        point.len() == self.len() && self.iter().zip(point).all(|(x, &v)| x.contains(v))
    }
}

impl Index<usize> for IntervalVector {
    type Output = Interval;

    #[inline]
    fn index(&self, index: usize) -> &Interval {
        &self.components[index]
    }
}

impl IndexMut<usize> for IntervalVector {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Interval {
        &mut self.components[index]
    }
}

impl BitOr for &IntervalVector {
    type Output = IntervalVector;

    fn bitor(self, rhs: &IntervalVector) -> IntervalVector {
        self.hull(rhs)
    }
}

impl BitOrAssign<&IntervalVector> for IntervalVector {
    fn bitor_assign(&mut self, rhs: &IntervalVector) {
        self.hull_assign(rhs);
    }
}

impl FromIterator<Interval> for IntervalVector {
    fn from_iter<T: IntoIterator<Item = Interval>>(iter: T) -> Self {
        Self {
            components: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Interval>> for IntervalVector {
    fn from(components: Vec<Interval>) -> Self {
        Self {
            components: SmallVec::from_vec(components),
        }
    }
}

impl<'a> IntoIterator for &'a IntervalVector {
    type Item = &'a Interval;
    type IntoIter = std::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl fmt::Debug for IntervalVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.components.iter()).finish()
    }
}

impl fmt::Display for IntervalVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.components.iter().enumerate() {
            if i > 0 {
                write!(f, " ; ")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, ")")
    }
}
