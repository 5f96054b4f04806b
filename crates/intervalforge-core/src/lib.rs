//! IntervalForge Core - Interval types and contractor traits
//!
//! This crate provides the fundamental abstractions for IntervalForge:
//! - Interval, box and matrix types for representing variable domains
//! - The `Infeasible` error used to prune empty boxes
//! - The `Contractor` trait implemented by every domain filter
//! - The `DifferentiableSystem` trait used for sensitivity heuristics
//! - Variable subsets (`VarSet`) and impact hints (`Impact`)

pub mod contractor;
pub mod error;
pub mod impact;
pub mod interval;
pub mod system;
pub mod var_set;


pub use contractor::Contractor;
pub use error::{ContractResult, EvalError, Infeasible};
pub use impact::Impact;
pub use interval::{Interval, IntervalMatrix, IntervalVector};
pub use system::DifferentiableSystem;
pub use var_set::{VarSet, VarSetError};
