//! Subsets of solver variables.

use smallvec::SmallVec;
use thiserror::Error;

/// Invalid variable subset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VarSetError {
    #[error("variable index {index} out of range for {nb_var} variables")]
    OutOfRange { index: usize, nb_var: usize },

    #[error("variable indices must be strictly increasing ({previous} then {index})")]
    NotIncreasing { previous: usize, index: usize },
}

/// The handled variables: an order-preserving injection from
/// `0..len()` into the solver variables `0..nb_var()`.
///
/// The mapping is fixed at construction.
///
/// # Examples
///
/// ```
/// use intervalforge_core::VarSet;
///
/// let vars = VarSet::from_mask(&[true, false, true, true]);
/// assert_eq!(vars.len(), 3);
/// assert_eq!(vars.get(1), 2);
/// assert_eq!(vars.position(3), Some(2));
/// assert!(!vars.contains(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSet {
    nb_var: usize,
    vars: SmallVec<[usize; 16]>,
}

impl VarSet {
    /// All `nb_var` variables.
    pub fn all(nb_var: usize) -> Self {
        Self {
            nb_var,
            vars: (0..nb_var).collect(),
        }
    }

    /// The variables whose mask entry is `true`.
    pub fn from_mask(mask: &[bool]) -> Self {
        Self {
            nb_var: mask.len(),
            vars: mask
                .iter()
                .enumerate()
                .filter_map(|(i, &set)| set.then_some(i))
                .collect(),
        }
    }

    /// An explicit, strictly increasing list of variables.
    pub fn from_indices(
        nb_var: usize,
        indices: impl IntoIterator<Item = usize>,
    ) -> Result<Self, VarSetError> {
        let mut vars: SmallVec<[usize; 16]> = SmallVec::new();
        for index in indices {
            if index >= nb_var {
                return Err(VarSetError::OutOfRange { index, nb_var });
            }
            if let Some(&previous) = vars.last() {
                if index <= previous {
                    return Err(VarSetError::NotIncreasing { previous, index });
                }
            }
            vars.push(index);
        }
        Ok(Self { nb_var, vars })
    }

    /// Number of handled variables.
    #[inline]
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Dimension of the solver variable space.
    #[inline]
    pub fn nb_var(&self) -> usize {
        self.nb_var
    }

    /// Solver index of the `k`-th handled variable.
    #[inline]
    pub fn get(&self, k: usize) -> usize {
        self.vars[k]
    }

    /// Rank of solver variable `var` among the handled ones.
    pub fn position(&self, var: usize) -> Option<usize> {
        self.vars.binary_search(&var).ok()
    }

    #[inline]
    pub fn contains(&self, var: usize) -> bool {
        self.position(var).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.vars.iter().copied()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.vars
    }
}
