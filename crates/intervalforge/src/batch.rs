//! Parallel contraction of independent boxes.

use std::time::Instant;

use intervalforge_core::{ContractResult, Contractor, IntervalVector};
use rayon::prelude::*;
use tracing::info;

/// Contracts every box of `boxes` in parallel.
///
/// The boxes are split in one chunk per rayon worker, and each chunk is
/// contracted sequentially by its own deep clone of `contractor`. Clones
/// never share state, so adaptive tuners and statistics stay per branch;
/// `contractor` itself is left untouched.
///
/// Returns one result per box, in order. A box whose result is
/// `Err(Infeasible)` must be discarded by the caller.
///
/// # Examples
///
/// ```
/// use intervalforge::prelude::*;
/// use intervalforge_test::threshold::UpperBound;
///
/// let ctc = Ctc3BCid::new(Box::new(UpperBound::new(1, 0, 5.0)), ShavingConfig::default());
/// let mut boxes = vec![
///     IntervalVector::from_bounds(&[(0.0, 10.0)]),
///     IntervalVector::from_bounds(&[(6.0, 8.0)]),
/// ];
///
/// let results = contract_batch(&ctc, &mut boxes);
/// assert!(results[0].is_ok());
/// assert_eq!(boxes[0][0], Interval::new(0.0, 5.0));
/// assert_eq!(results[1], Err(Infeasible));
/// ```
pub fn contract_batch(contractor: &dyn Contractor, boxes: &mut [IntervalVector]) -> Vec<ContractResult> {
    let start = Instant::now();
    info!(event = "batch_start", boxes = boxes.len() as u64);

    let results = if boxes.is_empty() {
        Vec::new()
    } else {
        contract_chunks(contractor, boxes)
    };

    let infeasible = results.iter().filter(|r| r.is_err()).count();
    info!(
        event = "batch_end",
        boxes = results.len() as u64,
        infeasible_boxes = infeasible as u64,
        duration_ms = start.elapsed().as_millis() as u64,
    );
    results
}

/// One chunk per worker, each with its own clone. `boxes` is not empty.
fn contract_chunks(contractor: &dyn Contractor, boxes: &mut [IntervalVector]) -> Vec<ContractResult> {
    let chunk_size = boxes.len().div_ceil(rayon::current_num_threads().max(1));
    let workers: Vec<Box<dyn Contractor>> = (0..boxes.len().div_ceil(chunk_size))
        .map(|_| contractor.box_clone())
        .collect();

    boxes
        .par_chunks_mut(chunk_size)
        .zip(workers)
        .flat_map_iter(|(chunk, mut ctc)| {
            chunk
                .iter_mut()
                .map(|domain| ctc.contract_box(domain))
                .collect::<Vec<_>>()
        })
        .collect()
}
