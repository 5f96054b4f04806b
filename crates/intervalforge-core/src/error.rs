//! Error types for IntervalForge

use thiserror::Error;

/// Proof that a box (or the sub-box under test) contains no solution.
///
/// This is the only error a contraction can produce. It is an expected
/// outcome of pruning rather than a failure, and is always propagated
/// unchanged to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("box proven infeasible")]
pub struct Infeasible;

/// Result type alias for contraction operations
pub type ContractResult<T = ()> = std::result::Result<T, Infeasible>;

/// Failure to evaluate a function or its derivatives over a box.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The box leaves the definition domain of some expression.
    #[error("evaluation outside definition domain: {0}")]
    Domain(String),

    /// The box dimension does not match the system.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    Dimension { expected: usize, actual: usize },
}
