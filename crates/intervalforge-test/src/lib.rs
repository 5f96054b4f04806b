//! Shared test fixtures for IntervalForge crates.
//!
//! This crate provides synthetic sub-contractors and constraint systems.
//! They are deliberately simple: their exact output is easy to predict by
//! hand, which is what contractor tests need.
//!
//! - [`threshold`] - one-variable bound contractors, identity, always-empty and a pure refuter
//! - [`linear`] - linear constraint systems with a single-pass projection contractor
//! - [`recording`] - a wrapper that records the impact hints it receives
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! intervalforge-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use intervalforge_test::threshold::{Identity, UpperBound};
//! use intervalforge_test::linear::{LinearConstraint, LinearSystem};
//! ```

pub mod linear;
pub mod recording;
pub mod threshold;

pub use linear::{LinearConstraint, LinearHc4, LinearSystem, UndefinedSystem};
pub use recording::Recording;
pub use threshold::{AlwaysEmpty, Identity, LowerBound, RefuteAbove, UpperBound};
