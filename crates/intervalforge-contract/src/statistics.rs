//! Contraction statistics.
//!
//! Every contractor instance keeps its own counters. They are cloned
//! together with the contractor, so independent search branches never
//! share them.

/// Counters collected while contracting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractionStatistics {
    /// Calls to `contract`.
    pub calls: u64,
    /// Calls that ended with `Infeasible`.
    pub infeasible_calls: u64,
    /// Variables wide enough to be shaved.
    pub variables_shaved: u64,
    /// Shavings done by bisection.
    pub dichotomic_shavings: u64,
    /// Shavings done by an equal-slice scan.
    pub linear_shavings: u64,
    /// Calls to the sub-contractor.
    pub subcontractor_calls: u64,
    /// Sub-contractor calls that proved a slice empty.
    pub slices_refuted: u64,
    /// Constructive disjunctions attempted.
    pub cid_runs: u64,
    /// Constructive disjunctions that narrowed another variable.
    pub useful_cids: u64,
}

impl ContractionStatistics {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zeroes every counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of sub-contractor calls that refuted their slice.
    pub fn refutation_rate(&self) -> f64 {
        if self.subcontractor_calls == 0 {
            0.0
        } else {
            self.slices_refuted as f64 / self.subcontractor_calls as f64
        }
    }

    /// Fraction of constructive disjunctions that were useful.
    pub fn cid_usefulness(&self) -> f64 {
        if self.cid_runs == 0 {
            0.0
        } else {
            self.useful_cids as f64 / self.cid_runs as f64
        }
    }

    /// Average number of sub-contractor calls per `contract` call.
    pub fn subcontractor_calls_per_call(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.subcontractor_calls as f64 / self.calls as f64
        }
    }
}
