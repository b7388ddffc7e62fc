use crate::core::error::SimError;
use serde::{Deserialize, Serialize};

/// Closed interval a service duration is drawn from, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min: f64,
    pub max: f64,
}

impl DurationRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Validate the range for use as a service-duration law.
    pub fn validate(&self, name: &str) -> Result<(), SimError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SimError::Configuration(format!(
                "{} range must be finite, got ({}, {})",
                name, self.min, self.max
            )));
        }
        if self.min <= 0.0 {
            return Err(SimError::Configuration(format!(
                "{} range must be positive, got min {}",
                name, self.min
            )));
        }
        if self.min > self.max {
            return Err(SimError::Configuration(format!(
                "{} range has min {} greater than max {}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Configuration for a single simulated shift.
///
/// All fields are overridable through the `with_*` builders; `validate` is
/// called by every entry point before any event is processed, so a bad
/// configuration never fails mid-run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of interchangeable doctors.
    pub num_servers: usize,
    /// Length of the simulated shift in minutes.
    pub shift_duration_minutes: f64,
    /// Service duration law for an uncomplicated scheduled patient.
    pub normal_duration: DurationRange,
    /// Service duration law for a complicated case.
    pub complex_duration: DurationRange,
    /// Probability that a scheduled patient turns out to be a complex case.
    pub complex_probability: f64,
    /// Service duration law for an urgent walk-in.
    pub urgent_duration: DurationRange,
    /// Probability that an urgent case is complex. Defaults to 0.0, meaning
    /// urgent patients get no complexity split.
    pub urgent_complex_probability: f64,
    /// Uniform jitter applied by scenario generators to scheduled arrival
    /// times, as (earliest, latest) offsets in minutes.
    pub arrival_jitter_minutes: (f64, f64),
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_servers: 4,
            shift_duration_minutes: 6.0 * 60.0,
            normal_duration: DurationRange::new(20.0, 30.0),
            complex_duration: DurationRange::new(40.0, 60.0),
            complex_probability: 0.2,
            urgent_duration: DurationRange::new(20.0, 30.0),
            urgent_complex_probability: 0.0,
            arrival_jitter_minutes: (-10.0, 10.0),
        }
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_num_servers(mut self, num_servers: usize) -> Self {
        self.num_servers = num_servers;
        self
    }

    pub fn with_shift_duration(mut self, minutes: f64) -> Self {
        self.shift_duration_minutes = minutes;
        self
    }

    pub fn with_normal_duration(mut self, min: f64, max: f64) -> Self {
        self.normal_duration = DurationRange::new(min, max);
        self
    }

    pub fn with_complex_duration(mut self, min: f64, max: f64) -> Self {
        self.complex_duration = DurationRange::new(min, max);
        self
    }

    pub fn with_complex_probability(mut self, probability: f64) -> Self {
        self.complex_probability = probability;
        self
    }

    pub fn with_urgent_duration(mut self, min: f64, max: f64) -> Self {
        self.urgent_duration = DurationRange::new(min, max);
        self
    }

    pub fn with_urgent_complex_probability(mut self, probability: f64) -> Self {
        self.urgent_complex_probability = probability;
        self
    }

    pub fn with_arrival_jitter(mut self, earliest: f64, latest: f64) -> Self {
        self.arrival_jitter_minutes = (earliest, latest);
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.num_servers == 0 {
            return Err(SimError::Configuration(
                "number of servers must be greater than 0".to_string(),
            ));
        }

        if !self.shift_duration_minutes.is_finite() || self.shift_duration_minutes <= 0.0 {
            return Err(SimError::Configuration(format!(
                "shift duration must be positive and finite, got {}",
                self.shift_duration_minutes
            )));
        }

        self.normal_duration.validate("normal duration")?;
        self.complex_duration.validate("complex duration")?;
        self.urgent_duration.validate("urgent duration")?;

        if !(0.0..=1.0).contains(&self.complex_probability) {
            return Err(SimError::Configuration(format!(
                "complex probability must lie in [0, 1], got {}",
                self.complex_probability
            )));
        }

        if !(0.0..=1.0).contains(&self.urgent_complex_probability) {
            return Err(SimError::Configuration(format!(
                "urgent complex probability must lie in [0, 1], got {}",
                self.urgent_complex_probability
            )));
        }

        let (jitter_min, jitter_max) = self.arrival_jitter_minutes;
        if !jitter_min.is_finite() || !jitter_max.is_finite() || jitter_min > jitter_max {
            return Err(SimError::Configuration(format!(
                "arrival jitter must be a finite (earliest, latest) pair, got ({}, {})",
                jitter_min, jitter_max
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.num_servers, 4);
        assert_eq!(config.shift_duration_minutes, 360.0);
        assert_eq!(config.normal_duration, DurationRange::new(20.0, 30.0));
        assert_eq!(config.complex_duration, DurationRange::new(40.0, 60.0));
        assert_eq!(config.complex_probability, 0.2);
        assert_eq!(config.urgent_duration, DurationRange::new(20.0, 30.0));
        assert_eq!(config.urgent_complex_probability, 0.0);
        assert_eq!(config.arrival_jitter_minutes, (-10.0, 10.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = SimConfig::new()
            .with_num_servers(2)
            .with_shift_duration(480.0)
            .with_normal_duration(15.0, 25.0)
            .with_complex_probability(0.3)
            .with_arrival_jitter(-5.0, 5.0);

        assert_eq!(config.num_servers, 2);
        assert_eq!(config.shift_duration_minutes, 480.0);
        assert_eq!(config.normal_duration, DurationRange::new(15.0, 25.0));
        assert_eq!(config.complex_probability, 0.3);
        assert_eq!(config.arrival_jitter_minutes, (-5.0, 5.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_servers() {
        let config = SimConfig::default().with_num_servers(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_shift() {
        assert!(SimConfig::default().with_shift_duration(0.0).validate().is_err());
        assert!(SimConfig::default().with_shift_duration(-10.0).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_inverted_range() {
        let config = SimConfig::default().with_normal_duration(30.0, 20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_non_positive_duration() {
        let config = SimConfig::default().with_urgent_duration(0.0, 10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_probability() {
        assert!(SimConfig::default().with_complex_probability(1.5).validate().is_err());
        assert!(SimConfig::default().with_complex_probability(-0.1).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_inverted_jitter() {
        let config = SimConfig::default().with_arrival_jitter(10.0, -10.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_range_is_valid() {
        // A fixed service duration is expressed as min == max.
        let config = SimConfig::default().with_normal_duration(10.0, 10.0);
        assert!(config.validate().is_ok());
    }
}
