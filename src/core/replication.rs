use crate::core::clinic::simulate_one_run;
use crate::core::config::SimConfig;
use crate::core::error::SimError;
use crate::core::scenario::ScenarioGenerator;
use crate::core::stats::{AggregateStatistics, MetricSummary, RunStatistics};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Runs a scenario many times with independent random streams and reduces
/// the per-run statistics to means and standard deviations.
///
/// Replications share nothing but the read-only configuration: each one owns
/// a private simulator and a private `StdRng` derived from the master seed,
/// so the batch runs on the rayon pool without locks. The only
/// synchronization point is the final collect.
pub struct ReplicationRunner {
    config: SimConfig,
    master_seed: u64,
}

impl ReplicationRunner {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            master_seed: 0,
        })
    }

    pub fn with_master_seed(mut self, master_seed: u64) -> Self {
        self.master_seed = master_seed;
        self
    }

    /// Execute `replications` independent runs and aggregate their
    /// statistics. The first configuration error or invariant violation
    /// aborts the whole batch; completed runs are discarded rather than
    /// reported as if the batch had finished.
    pub fn run<S>(&self, scenario: &S, replications: usize) -> Result<AggregateStatistics, SimError>
    where
        S: ScenarioGenerator + Sync,
    {
        if replications == 0 {
            return Err(SimError::Configuration(
                "replication count must be greater than 0".to_string(),
            ));
        }

        debug!(
            "starting {} replications with master seed {}",
            replications, self.master_seed
        );

        let runs = (0..replications)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(self.master_seed.wrapping_add(i as u64));
                simulate_one_run(scenario, &self.config, &mut rng)
            })
            .collect::<Result<Vec<RunStatistics>, SimError>>()?;

        info!("replication batch of {} runs complete", runs.len());
        Ok(self.aggregate(runs))
    }

    fn aggregate(&self, runs: Vec<RunStatistics>) -> AggregateStatistics {
        let waiting_times: Vec<f64> = runs.iter().map(|r| r.average_waiting_time).collect();
        let processed: Vec<f64> = runs.iter().map(|r| r.patients_processed as f64).collect();
        let urgent: Vec<f64> = runs.iter().map(|r| r.urgent_count as f64).collect();

        let utilization_by_server = (0..self.config.num_servers)
            .map(|server| {
                let samples: Vec<f64> = runs
                    .iter()
                    .map(|r| r.utilization_by_server[server])
                    .collect();
                MetricSummary::from_samples(&samples)
            })
            .collect();

        // The last run's series stands in for the batch; queue lengths from
        // runs with different event counts cannot be averaged without
        // resampling onto a common time grid.
        let representative_queue_lengths = runs
            .last()
            .map(|r| r.queue_length_series.clone())
            .unwrap_or_default();

        AggregateStatistics {
            replications: runs.len(),
            average_waiting_time: MetricSummary::from_samples(&waiting_times),
            utilization_by_server,
            patients_processed: MetricSummary::from_samples(&processed),
            urgent_count: MetricSummary::from_samples(&urgent),
            representative_queue_lengths,
        }
    }
}

/// Convenience entry point mirroring [`simulate_one_run`] for a whole batch.
pub fn simulate_replications<S>(
    scenario: &S,
    config: &SimConfig,
    replications: usize,
    master_seed: u64,
) -> Result<AggregateStatistics, SimError>
where
    S: ScenarioGenerator + Sync,
{
    ReplicationRunner::new(config.clone())?
        .with_master_seed(master_seed)
        .run(scenario, replications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::scenario::FixedScenario;

    #[test]
    fn test_zero_replications_rejected() {
        let config = SimConfig::default();
        let scenario = FixedScenario::new(vec![0.0], vec![]);
        let err = simulate_replications(&scenario, &config, 0, 42).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_invalid_config_rejected_before_any_run() {
        let config = SimConfig::default().with_num_servers(0);
        assert!(ReplicationRunner::new(config).is_err());
    }

    #[test]
    fn test_deterministic_scenario_has_zero_variance() {
        // A fixed plan with fixed durations gives identical runs, so every
        // standard deviation collapses to zero.
        let config = SimConfig::default()
            .with_num_servers(1)
            .with_normal_duration(10.0, 10.0)
            .with_complex_probability(0.0);
        let scenario = FixedScenario::new(vec![0.0, 0.0, 0.0], vec![]);

        let aggregate = simulate_replications(&scenario, &config, 8, 42).unwrap();
        assert_eq!(aggregate.replications, 8);
        assert_eq!(aggregate.average_waiting_time.mean, 10.0);
        assert_eq!(aggregate.average_waiting_time.std_dev, 0.0);
        assert_eq!(aggregate.patients_processed.mean, 3.0);
        assert_eq!(aggregate.patients_processed.std_dev, 0.0);
    }

    #[test]
    fn test_batch_aborts_on_bad_scenario() {
        // One arrival outside the shift poisons every replication; the batch
        // must fail rather than report partial aggregates.
        let config = SimConfig::default();
        let scenario = FixedScenario::new(vec![10.0, 500.0], vec![]);
        let err = simulate_replications(&scenario, &config, 4, 42).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_aggregate_keeps_representative_series() {
        let config = SimConfig::default().with_num_servers(2);
        let scenario = FixedScenario::new(vec![0.0, 1.0, 2.0], vec![]);
        let aggregate = simulate_replications(&scenario, &config, 3, 7).unwrap();
        assert!(!aggregate.representative_queue_lengths.is_empty());
        assert_eq!(aggregate.utilization_by_server.len(), 2);
    }
}
