//! Linear constraint systems.
//!
//! A [`LinearSystem`] is a list of constraints `sum(a_i * x_i) in rhs`.
//! It is a [`DifferentiableSystem`] (its Jacobian is the constant
//! coefficient matrix) and yields a [`LinearHc4`] sub-contractor that
//! projects every constraint once, in order.
//!
//! A single projection pass is weaker than a fixpoint, which is exactly
//! what makes shaving and constructive disjunction observable in tests.
//!
//! # Example
//!
//! ```
//! use intervalforge_core::{Contractor, Interval, IntervalVector};
//! use intervalforge_test::linear::{LinearConstraint, LinearSystem};
//!
//! // x + y = 10, x - y = 0
//! let system = LinearSystem::new(2, vec![
//!     LinearConstraint::equal(vec![1.0, 1.0], 10.0),
//!     LinearConstraint::equal(vec![1.0, -1.0], 0.0),
//! ]);
//! let mut ctc = system.hc4();
//! let mut domain = IntervalVector::from_bounds(&[(4.0, 5.0), (0.0, 10.0)]);
//! ctc.contract_box(&mut domain).unwrap();
//! assert_eq!(domain[0], Interval::point(5.0));
//! assert_eq!(domain[1], Interval::point(5.0));
//! ```

use intervalforge_core::{
    ContractResult, Contractor, DifferentiableSystem, EvalError, Impact, Infeasible, Interval,
    IntervalMatrix, IntervalVector,
};

/// `sum(coeffs[i] * x[i]) in rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub coeffs: Vec<f64>,
    pub rhs: Interval,
}

impl LinearConstraint {
    pub fn new(coeffs: Vec<f64>, rhs: Interval) -> Self {
        Self { coeffs, rhs }
    }

    /// `sum(coeffs[i] * x[i]) = value`.
    pub fn equal(coeffs: Vec<f64>, value: f64) -> Self {
        Self::new(coeffs, Interval::point(value))
    }

    /// `sum(coeffs[i] * x[i]) <= value`.
    pub fn at_most(coeffs: Vec<f64>, value: f64) -> Self {
        Self::new(coeffs, Interval::new(f64::NEG_INFINITY, value))
    }

    /// Value of the left-hand side at a point.
    pub fn eval(&self, point: &[f64]) -> f64 {
        self.coeffs.iter().zip(point).map(|(a, x)| a * x).sum()
    }

    /// Returns true if the point satisfies the constraint.
    pub fn is_satisfied(&self, point: &[f64]) -> bool {
        self.rhs.contains(self.eval(point))
    }

    /// Interval evaluation of the left-hand side, skipping `skip`.
    fn partial_sum(&self, domain: &IntervalVector, skip: Option<usize>) -> Interval {
        self.coeffs
            .iter()
            .enumerate()
            .filter(|&(i, &a)| Some(i) != skip && a != 0.0)
            .fold(Interval::ZERO, |acc, (i, &a)| acc + domain[i] * a)
    }

    /// Projects the constraint onto every variable it involves.
    fn project(&self, domain: &mut IntervalVector) -> ContractResult {
        let total = self.partial_sum(domain, None) & self.rhs;
        if total.is_empty() {
            return Err(Infeasible);
        }
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0.0 {
                continue;
            }
            let rest = self.partial_sum(domain, Some(i));
            domain[i] &= (total - rest) / a;
            if domain[i].is_empty() {
                return Err(Infeasible);
            }
        }
        Ok(())
    }
}

/// A system of linear constraints over `nb_var` variables.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    nb_var: usize,
    constraints: Vec<LinearConstraint>,
}

impl LinearSystem {
    /// Creates the system. Missing coefficients are treated as zero.
    pub fn new(nb_var: usize, constraints: Vec<LinearConstraint>) -> Self {
        let constraints = constraints
            .into_iter()
            .map(|mut c| {
                c.coeffs.resize(nb_var, 0.0);
                c
            })
            .collect();
        Self {
            nb_var,
            constraints,
        }
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// Returns true if the point satisfies every constraint.
    pub fn is_satisfied(&self, point: &[f64]) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied(point))
    }

    /// The single-pass projection contractor of this system.
    pub fn hc4(&self) -> LinearHc4 {
        LinearHc4 {
            system: self.clone(),
        }
    }
}

impl DifferentiableSystem for LinearSystem {
    fn nb_var(&self) -> usize {
        self.nb_var
    }

    fn nb_ctr(&self) -> usize {
        self.constraints.len()
    }

    fn jacobian(&self, domain: &IntervalVector) -> Result<IntervalMatrix, EvalError> {
        if domain.len() != self.nb_var {
            return Err(EvalError::Dimension {
                expected: self.nb_var,
                actual: domain.len(),
            });
        }
        let mut jacobian = IntervalMatrix::zeros(self.constraints.len(), self.nb_var);
        for (i, c) in self.constraints.iter().enumerate() {
            for (j, &a) in c.coeffs.iter().enumerate() {
                jacobian[(i, j)] = Interval::point(a);
            }
        }
        Ok(jacobian)
    }

    fn box_clone(&self) -> Box<dyn DifferentiableSystem> {
        Box::new(self.clone())
    }
}

/// Projects each constraint of a [`LinearSystem`] once, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearHc4 {
    system: LinearSystem,
}

impl Contractor for LinearHc4 {
    fn nb_var(&self) -> usize {
        self.system.nb_var
    }

    fn contract(&mut self, domain: &mut IntervalVector, _impact: Impact) -> ContractResult {
        if domain.is_empty() {
            return Err(Infeasible);
        }
        for c in &self.system.constraints {
            c.project(domain)?;
        }
        Ok(())
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}

/// A system whose Jacobian cannot be evaluated anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndefinedSystem {
    nb_var: usize,
    nb_ctr: usize,
}

impl UndefinedSystem {
    pub fn new(nb_var: usize, nb_ctr: usize) -> Self {
        Self { nb_var, nb_ctr }
    }
}

impl DifferentiableSystem for UndefinedSystem {
    fn nb_var(&self) -> usize {
        self.nb_var
    }

    fn nb_ctr(&self) -> usize {
        self.nb_ctr
    }

    fn jacobian(&self, _domain: &IntervalVector) -> Result<IntervalMatrix, EvalError> {
        Err(EvalError::Domain("jacobian undefined".to_string()))
    }

    fn box_clone(&self) -> Box<dyn DifferentiableSystem> {
        Box::new(self.clone())
    }
}
