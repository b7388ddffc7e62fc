use serde::Serialize;

/// Aggregate statistics for one simulated shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStatistics {
    /// Mean of (service start - arrival time) over all served patients, 0 if
    /// nobody was served.
    pub average_waiting_time: f64,
    /// Per-server fraction of the shift spent serving: total assigned service
    /// duration divided by the nominal shift length. A service spilling past
    /// the shift end is charged in full, so values slightly above 1 are
    /// possible.
    pub utilization_by_server: Vec<f64>,
    /// Queue length sampled after each processed event, as (time, length).
    pub queue_length_series: Vec<(f64, usize)>,
    pub patients_processed: usize,
    pub urgent_count: usize,
}

/// Mean and population standard deviation of one scalar metric across a
/// replication batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricSummary {
    pub mean: f64,
    pub std_dev: f64,
}

impl MetricSummary {
    pub fn from_samples(samples: &[f64]) -> Self {
        Self {
            mean: mean(samples),
            std_dev: std_dev(samples),
        }
    }
}

/// Statistics aggregated across independent replications.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStatistics {
    pub replications: usize,
    pub average_waiting_time: MetricSummary,
    pub utilization_by_server: Vec<MetricSummary>,
    pub patients_processed: MetricSummary,
    pub urgent_count: MetricSummary,
    /// The last replication's queue-length series, kept as a representative
    /// sample for plotting. This is not an average: per-minute queue lengths
    /// from runs with different event counts cannot be averaged without
    /// resampling onto a common time grid.
    pub representative_queue_lengths: Vec<(f64, usize)>,
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Population standard deviation (divides by N, not N-1).
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let m = mean(samples);
    let variance = samples.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / samples.len() as f64;
    variance.sqrt()
}
