//! Smear-based variable ordering.

use intervalforge_core::{DifferentiableSystem, IntervalVector, VarSet};
use tracing::trace;

/// Rows whose total smear is at most this value do not contribute.
const MIN_CONSTRAINT_SMEAR: f64 = 1e-5;

/// Orders the handled variables by decreasing relative smear.
///
/// For each constraint `i`, the smear of a handled variable `j` is
/// `mag(J[i][j]) * diam(x[j])`. A variable's score is the sum over the
/// constraints of its smear divided by the constraint's total smear.
/// Ties keep declaration order.
///
/// Falls back to declaration order when the Jacobian cannot be
/// evaluated, or when a derivative or a domain is unbounded.
pub fn smear_order(
    system: &dyn DifferentiableSystem,
    vars: &VarSet,
    domain: &IntervalVector,
) -> Vec<usize> {
    let mut order: Vec<usize> = vars.iter().collect();

    let jacobian = match system.jacobian(domain) {
        Ok(jacobian) => jacobian,
        Err(err) => {
            trace!(event = "smear_fallback", error = %err);
            return order;
        }
    };
    if jacobian.nb_cols() != domain.len() {
        return order;
    }
    let unbounded = domain.iter().any(|x| x.diam() == f64::INFINITY)
        || jacobian
            .rows()
            .flat_map(|row| row.iter())
            .any(|d| d.mag() == f64::INFINITY);
    if unbounded {
        return order;
    }

    let constraint_smear: Vec<f64> = jacobian
        .rows()
        .map(|row| vars.iter().map(|j| row[j].mag() * domain[j].diam()).sum::<f64>())
        .collect();

    let mut score = vec![0.0; domain.len()];
    for var in vars.iter() {
        score[var] = jacobian
            .rows()
            .zip(&constraint_smear)
            .filter(|&(_, &total)| total > MIN_CONSTRAINT_SMEAR)
            .map(|(row, &total)| row[var].mag() * domain[var].diam() / total)
            .sum();
    }

    order.sort_by(|&a, &b| score[b].total_cmp(&score[a]));
    order
}

/// Moves `var` to the front of `order`, keeping the others in place.
///
/// Does nothing if `var` is not in `order`.
pub fn put_first(order: &mut [usize], var: usize) {
    if let Some(pos) = order.iter().position(|&v| v == var) {
        order[..=pos].rotate_right(1);
    }
}
