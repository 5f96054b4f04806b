//! Interval matrices, used for Jacobians.

use std::ops::{Index, IndexMut};

use super::Interval;

/// A dense row-major matrix of intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalMatrix {
    nb_rows: usize,
    nb_cols: usize,
    entries: Vec<Interval>,
}

impl IntervalMatrix {
    /// Creates a `nb_rows x nb_cols` matrix filled with `[0, 0]`.
    pub fn zeros(nb_rows: usize, nb_cols: usize) -> Self {
        Self {
            nb_rows,
            nb_cols,
            entries: vec![Interval::ZERO; nb_rows * nb_cols],
        }
    }

    #[inline]
    pub fn nb_rows(&self) -> usize {
        self.nb_rows
    }

    #[inline]
    pub fn nb_cols(&self) -> usize {
        self.nb_cols
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[Interval] {
        &self.entries[i * self.nb_cols..(i + 1) * self.nb_cols]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [Interval] {
        &mut self.entries[i * self.nb_cols..(i + 1) * self.nb_cols]
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Interval]> + '_ {
        // chunks_exact panics on a zero chunk size
        let width = self.nb_cols.max(1);
        self.entries.chunks_exact(width).take(self.nb_rows)
    }
}

impl Index<(usize, usize)> for IntervalMatrix {
    type Output = Interval;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &Interval {
        &self.entries[i * self.nb_cols + j]
    }
}

impl IndexMut<(usize, usize)> for IntervalMatrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Interval {
        &mut self.entries[i * self.nb_cols + j]
    }
}
