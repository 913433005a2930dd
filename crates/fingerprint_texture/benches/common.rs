use std::time::Duration;

use criterion::{Criterion, Throughput};

/// Settings for the per-sample noise and flow-direction benches.
pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

/// A generation sample traces one texture until the restart search gives up,
/// so fewer samples fit into a longer window.
pub const RUN_SAMPLE_SIZE: usize = 10;
pub const RUN_MEASUREMENT_TIME: Duration = Duration::from_secs(5);

/// Criterion config for the noise benches.
pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

/// Criterion config for full generation runs.
#[allow(dead_code)]
pub fn run_criterion() -> Criterion {
    default_criterion()
        .sample_size(RUN_SAMPLE_SIZE)
        .measurement_time(RUN_MEASUREMENT_TIME)
}

/// Reports noise lookups or accepted grid points per second.
///
/// Clamped to one so a run that accepted nothing still yields a valid rate.
pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}
