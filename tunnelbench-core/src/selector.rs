//! Best-route selection

use crate::route::ProbeResult;

/// Route with the lowest average latency.
///
/// Results without a latency are ignored. Ties go to the earliest result,
/// i.e. the route evaluated first.
pub fn select_best(results: &[ProbeResult]) -> Option<&ProbeResult> {
    select_best_index(results).map(|i| &results[i])
}

/// Position of the winner in `results`; see [`select_best`].
pub fn select_best_index(results: &[ProbeResult]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, latency) in results
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.avg_latency_ms.map(|ms| (i, ms)))
    {
        match best {
            Some((_, current)) if latency >= current => {}
            _ => best = Some((index, latency)),
        }
    }

    best.map(|(index, _)| index)
}
