use crate::core::config::SimConfig;
use crate::core::error::SimError;
use rand::{Rng, RngCore};

/// Arrival plan for one shift, produced by a scenario generator. Times are
/// minute offsets in `[0, shift_duration_minutes)`; duplicates are legal and
/// the sequences need not be sorted, the engine orders them on ingestion.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScenarioArrivals {
    pub scheduled: Vec<f64>,
    pub urgent: Vec<f64>,
}

/// External collaborator that parameterizes a run: how many patients are
/// booked, when, and how many urgent walk-ins interrupt the day.
pub trait ScenarioGenerator {
    fn generate(&self, config: &SimConfig, rng: &mut dyn RngCore) -> ScenarioArrivals;
}

/// Appointment book with a fixed cadence: `batch_size` patients booked every
/// `interval_minutes`. Booked patients do not show up on time; each arrival
/// is jittered by a uniform draw from the configured jitter window and
/// clamped back into the shift. Urgent walk-ins are drawn minute by minute
/// as a Bernoulli trial with rate `urgent_per_shift / shift_duration`.
#[derive(Debug, Clone)]
pub struct ScheduledDay {
    batch_size: usize,
    interval_minutes: f64,
    urgent_per_shift: f64,
}

impl ScheduledDay {
    /// Expected number of urgent walk-ins per shift in the original study.
    pub const DEFAULT_URGENT_PER_SHIFT: f64 = 10.0;

    pub fn new(batch_size: usize, interval_minutes: f64) -> Result<Self, SimError> {
        if !interval_minutes.is_finite() || interval_minutes <= 0.0 {
            return Err(SimError::Configuration(format!(
                "appointment interval must be positive and finite, got {}",
                interval_minutes
            )));
        }
        Ok(Self {
            batch_size,
            interval_minutes,
            urgent_per_shift: Self::DEFAULT_URGENT_PER_SHIFT,
        })
    }

    pub fn with_urgent_per_shift(mut self, urgent_per_shift: f64) -> Result<Self, SimError> {
        if !urgent_per_shift.is_finite() || urgent_per_shift < 0.0 {
            return Err(SimError::Configuration(format!(
                "urgent arrival rate must be non-negative and finite, got {}",
                urgent_per_shift
            )));
        }
        self.urgent_per_shift = urgent_per_shift;
        Ok(self)
    }

    /// Number of scheduled arrivals this cadence books into a shift of the
    /// given length, before jitter.
    pub fn booked_count(&self, shift_duration_minutes: f64) -> usize {
        let batches = (shift_duration_minutes / self.interval_minutes).ceil() as usize;
        batches * self.batch_size
    }
}

impl ScenarioGenerator for ScheduledDay {
    fn generate(&self, config: &SimConfig, rng: &mut dyn RngCore) -> ScenarioArrivals {
        let shift = config.shift_duration_minutes;
        let (jitter_min, jitter_max) = config.arrival_jitter_minutes;
        let latest = (shift - 1.0).max(0.0);

        let batches = (shift / self.interval_minutes).ceil() as usize;
        let mut scheduled = Vec::with_capacity(batches * self.batch_size);
        for batch in 0..batches {
            let slot = batch as f64 * self.interval_minutes;
            for _ in 0..self.batch_size {
                let jitter = rng.gen_range(jitter_min..=jitter_max);
                scheduled.push((slot + jitter).clamp(0.0, latest));
            }
        }

        let per_minute = (self.urgent_per_shift / shift).clamp(0.0, 1.0);
        let mut urgent = Vec::new();
        for minute in 0..shift.floor() as u64 {
            if rng.gen_bool(per_minute) {
                urgent.push(minute as f64);
            }
        }

        ScenarioArrivals { scheduled, urgent }
    }
}

/// Replays an exact arrival plan: no jitter, no random urgent count. Service
/// durations are still drawn by the patient factory.
#[derive(Debug, Clone, Default)]
pub struct FixedScenario {
    scheduled: Vec<f64>,
    urgent: Vec<f64>,
}

impl FixedScenario {
    pub fn new(scheduled: Vec<f64>, urgent: Vec<f64>) -> Self {
        Self { scheduled, urgent }
    }
}

impl ScenarioGenerator for FixedScenario {
    fn generate(&self, _config: &SimConfig, _rng: &mut dyn RngCore) -> ScenarioArrivals {
        ScenarioArrivals {
            scheduled: self.scheduled.clone(),
            urgent: self.urgent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_scheduled_day_books_expected_count() {
        // 4 patients every 30 minutes over a 360-minute shift: 48 booked.
        let scenario = ScheduledDay::new(4, 30.0).unwrap();
        assert_eq!(scenario.booked_count(360.0), 48);

        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let arrivals = scenario.generate(&config, &mut rng);
        assert_eq!(arrivals.scheduled.len(), 48);
    }

    #[test]
    fn test_all_times_within_shift() {
        let scenario = ScheduledDay::new(3, 20.0).unwrap();
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let arrivals = scenario.generate(&config, &mut rng);

        for &t in arrivals.scheduled.iter().chain(arrivals.urgent.iter()) {
            assert!(t >= 0.0);
            assert!(t < config.shift_duration_minutes);
        }
    }

    #[test]
    fn test_zero_urgent_rate_produces_no_walk_ins() {
        let scenario = ScheduledDay::new(2, 15.0)
            .unwrap()
            .with_urgent_per_shift(0.0)
            .unwrap();
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let arrivals = scenario.generate(&config, &mut rng);
        assert!(arrivals.urgent.is_empty());
    }

    #[test]
    fn test_rejects_non_positive_interval() {
        assert!(ScheduledDay::new(4, 0.0).is_err());
        assert!(ScheduledDay::new(4, -30.0).is_err());
    }

    #[test]
    fn test_fixed_scenario_replays_exact_plan() {
        let scenario = FixedScenario::new(vec![5.0, 0.0, 3.0], vec![12.0]);
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let arrivals = scenario.generate(&config, &mut rng);
        assert_eq!(arrivals.scheduled, vec![5.0, 0.0, 3.0]);
        assert_eq!(arrivals.urgent, vec![12.0]);
    }
}
