//! Differentiable constraint systems.

use std::fmt::Debug;

use crate::error::EvalError;
use crate::interval::{IntervalMatrix, IntervalVector};

/// A system of constraints `f(x)` whose interval Jacobian can be evaluated.
///
/// Only the Jacobian is needed here: it drives the smear-based variable
/// ordering of adaptive shaving.
pub trait DifferentiableSystem: Send + Sync + Debug {
    /// Number of variables.
    fn nb_var(&self) -> usize;

    /// Number of constraint functions (rows of the Jacobian).
    fn nb_ctr(&self) -> usize;

    /// Interval enclosure of the Jacobian over `domain`, `nb_ctr x nb_var`.
    fn jacobian(&self, domain: &IntervalVector) -> Result<IntervalMatrix, EvalError>;

    /// Deep-clones this system.
    fn box_clone(&self) -> Box<dyn DifferentiableSystem>;
}

impl Clone for Box<dyn DifferentiableSystem> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
