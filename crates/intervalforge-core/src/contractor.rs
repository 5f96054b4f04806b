//! The contractor abstraction.

use std::fmt::Debug;

use crate::error::ContractResult;
use crate::impact::Impact;
use crate::interval::IntervalVector;

/// A domain filter: narrows a box without losing any solution.
///
/// Implementations must be *sound*: every point of the input box that
/// satisfies the underlying constraints is still in the output box.
/// A contractor either narrows the box in place (possibly not at all) or
/// returns [`Infeasible`](crate::Infeasible). After an `Err` the content
/// of the box is unspecified; a caller that keeps using the box must
/// restore it from a snapshot.
///
/// Contractors own their state and are deep-clonable through
/// [`box_clone`](Contractor::box_clone), so that independent search
/// branches can each work with their own copy.
///
/// # Examples
///
/// ```
/// use intervalforge_core::{Contractor, ContractResult, Impact, Infeasible, Interval, IntervalVector};
///
/// /// Enforces `x0 <= 5`.
/// #[derive(Debug, Clone)]
/// struct AtMostFive;
///
/// impl Contractor for AtMostFive {
///     fn nb_var(&self) -> usize { 1 }
///
///     fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
///         domain[0] &= Interval::new(f64::NEG_INFINITY, 5.0);
///         if domain[0].is_empty() { Err(Infeasible) } else { Ok(()) }
///     }
///
///     fn box_clone(&self) -> Box<dyn Contractor> { Box::new(self.clone()) }
/// }
///
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0)]);
/// AtMostFive.contract_box(&mut domain).unwrap();
/// assert_eq!(domain[0], Interval::new(0.0, 5.0));
/// ```
pub trait Contractor: Send + Debug {
    /// Dimension of the boxes this contractor works on.
    fn nb_var(&self) -> usize;

    /// Contracts `domain`, using `impact` as an incrementality hint.
    fn contract(&mut self, domain: &mut IntervalVector, impact: Impact) -> ContractResult;

    /// Contracts `domain` with no incrementality hint.
    fn contract_box(&mut self, domain: &mut IntervalVector) -> ContractResult {
        self.contract(domain, Impact::AllVariables)
    }

    /// Deep-clones this contractor, including any owned sub-contractors.
    fn box_clone(&self) -> Box<dyn Contractor>;
}

impl Clone for Box<dyn Contractor> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}
