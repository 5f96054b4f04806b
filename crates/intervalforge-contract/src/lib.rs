//! IntervalForge Contraction Engine
//!
//! This crate provides the shaving-based contractors:
//! - Single-variable shaving, linear or dichotomic (`Shaver`)
//! - Constructive interval disjunction (CID) over the unresolved middle part
//! - 3BCID over a rotating window of variables (`Ctc3BCid`)
//! - Adaptive CID with smear ordering and a self-tuned window (`CtcAcid`)
//! - Plain 3B bound shaving (`BoundShaving`)
//! - Per-instance statistics and configuration wiring (builder module)
//!
//! Every contractor owns its sub-contractor and is itself a
//! [`Contractor`](intervalforge_core::Contractor), so they nest and
//! deep-clone like any other contractor.

pub mod acid;
pub mod bound_shaving;
pub mod builder;
pub mod shaving;
pub mod statistics;
pub mod three_b_cid;

#[cfg(test)]
mod builder_tests;
#[cfg(test)]
mod statistics_tests;

pub use acid::{AcidTuner, CtcAcid};
pub use bound_shaving::BoundShaving;
pub use builder::{BuildError, ContractorBuilder};
pub use shaving::{ShaveStrategy, Shaver, Side, SlicePlan};
pub use statistics::ContractionStatistics;
pub use three_b_cid::Ctc3BCid;
