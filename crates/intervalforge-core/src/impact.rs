//! Impact hints passed to contractors.

/// Which variables changed since the box was last contracted.
///
/// Sub-contractors may use the hint to propagate incrementally instead
/// of starting from scratch. The hint never changes soundness: a
/// contractor is free to ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Impact {
    /// Any variable may have changed.
    #[default]
    AllVariables,
    /// Only the given solver variable changed.
    SingleVariable(usize),
}

impl Impact {
    /// Returns true if the hint covers `var`.
    #[inline]
    pub fn covers(&self, var: usize) -> bool {
        match *self {
            Impact::AllVariables => true,
            Impact::SingleVariable(v) => v == var,
        }
    }

    /// Returns the single impacted variable, if any.
    #[inline]
    pub fn single(&self) -> Option<usize> {
        match *self {
            Impact::AllVariables => None,
            Impact::SingleVariable(v) => Some(v),
        }
    }
}
