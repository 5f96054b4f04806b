//! Single-bound sub-contractors.
//!
//! # Example
//!
//! ```
//! use intervalforge_core::{Contractor, Interval, IntervalVector};
//! use intervalforge_test::threshold::UpperBound;
//!
//! // x1 <= 5 in a two-variable box
//! let mut ctc = UpperBound::new(2, 1, 5.0);
//! let mut domain = IntervalVector::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]);
//! ctc.contract_box(&mut domain).unwrap();
//! assert_eq!(domain[1], Interval::new(0.0, 5.0));
//! ```

use intervalforge_core::{ContractResult, Contractor, Impact, Infeasible, Interval, IntervalVector};

fn check(domain: &IntervalVector) -> ContractResult {
    if domain.is_empty() {
        Err(Infeasible)
    } else {
        Ok(())
    }
}

/// Enforces `x[var] <= bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct UpperBound {
    nb_var: usize,
    var: usize,
    bound: f64,
}

impl UpperBound {
    /// Creates the contractor for `x[var] <= bound` over `nb_var` variables.
    pub fn new(nb_var: usize, var: usize, bound: f64) -> Self {
        Self { nb_var, var, bound }
    }
}

impl Contractor for UpperBound {
    fn nb_var(&self) -> usize {
        self.nb_var
    }

    fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
        domain[self.var] &= Interval::new(f64::NEG_INFINITY, self.bound);
        check(domain)
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}

/// Enforces `x[var] >= bound`.
#[derive(Debug, Clone, PartialEq)]
pub struct LowerBound {
    nb_var: usize,
    var: usize,
    bound: f64,
}

impl LowerBound {
    /// Creates the contractor for `x[var] >= bound` over `nb_var` variables.
    pub fn new(nb_var: usize, var: usize, bound: f64) -> Self {
        Self { nb_var, var, bound }
    }
}

impl Contractor for LowerBound {
    fn nb_var(&self) -> usize {
        self.nb_var
    }

    fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
        domain[self.var] &= Interval::new(self.bound, f64::INFINITY);
        check(domain)
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}

/// Accepts every box unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    nb_var: usize,
}

impl Identity {
    pub fn new(nb_var: usize) -> Self {
        Self { nb_var }
    }
}

impl Contractor for Identity {
    fn nb_var(&self) -> usize {
        self.nb_var
    }

    fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
        check(domain)
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}

/// Proves every box empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlwaysEmpty {
    nb_var: usize,
}

impl AlwaysEmpty {
    pub fn new(nb_var: usize) -> Self {
        Self { nb_var }
    }
}

impl Contractor for AlwaysEmpty {
    fn nb_var(&self) -> usize {
        self.nb_var
    }

    fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
        domain.set_empty();
        Err(Infeasible)
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}

/// Refutes boxes where `x[var]` lies entirely above `bound`, without ever
/// narrowing an accepted box.
///
/// Before refuting, it overwrites `x[scratch]` with a point, so a caller
/// that fails to restore its snapshot after a refuted trial shows it.
#[derive(Debug, Clone, PartialEq)]
pub struct RefuteAbove {
    nb_var: usize,
    var: usize,
    bound: f64,
    scratch: usize,
}

impl RefuteAbove {
    pub fn new(nb_var: usize, var: usize, bound: f64, scratch: usize) -> Self {
        Self {
            nb_var,
            var,
            bound,
            scratch,
        }
    }
}

impl Contractor for RefuteAbove {
    fn nb_var(&self) -> usize {
        self.nb_var
    }

    fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
        check(domain)?;
        if domain[self.var].lb() > self.bound {
            domain[self.scratch] = Interval::point(domain[self.scratch].lb());
            return Err(Infeasible);
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}
