//! Impact-recording wrapper.

use std::sync::{Arc, Mutex};

use intervalforge_core::{ContractResult, Contractor, Impact, IntervalVector};

/// Forwards to an inner contractor and records every impact hint.
///
/// Clones share the same log, so a test can keep a handle on the log
/// after moving the wrapper into a contractor.
///
/// # Example
///
/// ```
/// use intervalforge_core::{Contractor, Impact, IntervalVector};
/// use intervalforge_test::recording::Recording;
/// use intervalforge_test::threshold::Identity;
///
/// let mut ctc = Recording::new(Box::new(Identity::new(1)));
/// let log = ctc.log();
/// let mut domain = IntervalVector::from_bounds(&[(0.0, 1.0)]);
/// ctc.contract(&mut domain, Impact::SingleVariable(0)).unwrap();
/// assert_eq!(log.lock().unwrap().as_slice(), &[Impact::SingleVariable(0)]);
/// ```
#[derive(Debug, Clone)]
pub struct Recording {
    inner: Box<dyn Contractor>,
    log: Arc<Mutex<Vec<Impact>>>,
}

impl Recording {
    pub fn new(inner: Box<dyn Contractor>) -> Self {
        Self {
            inner,
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle on the recorded hints.
    pub fn log(&self) -> Arc<Mutex<Vec<Impact>>> {
        Arc::clone(&self.log)
    }

    /// Number of calls recorded so far.
    pub fn calls(&self) -> usize {
        self.log.lock().map(|log| log.len()).unwrap_or(0)
    }
}

impl Contractor for Recording {
    fn nb_var(&self) -> usize {
        self.inner.nb_var()
    }

    fn contract(&mut self, domain: &mut IntervalVector, impact: Impact) -> ContractResult {
        if let Ok(mut log) = self.log.lock() {
            log.push(impact);
        }
        self.inner.contract(domain, impact)
    }

    fn box_clone(&self) -> Box<dyn Contractor> {
        Box::new(self.clone())
    }
}
