use crate::core::config::SimConfig;
use crate::core::error::SimError;
use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Uniform};

/// One arriving unit of demand. Created once, never mutated, discarded when
/// its service completes.
#[derive(Debug, Clone, PartialEq)]
pub struct Patient {
    arrival_time: f64,
    urgent: bool,
    service_duration: f64,
}

impl Patient {
    /// Create a patient record, rejecting values that would corrupt the run.
    pub fn new(arrival_time: f64, urgent: bool, service_duration: f64) -> Result<Self, SimError> {
        if !arrival_time.is_finite() || arrival_time < 0.0 {
            return Err(SimError::Configuration(format!(
                "patient arrival time must be non-negative and finite, got {}",
                arrival_time
            )));
        }
        if !service_duration.is_finite() || service_duration <= 0.0 {
            return Err(SimError::Configuration(format!(
                "patient service duration must be positive and finite, got {}",
                service_duration
            )));
        }
        Ok(Self {
            arrival_time,
            urgent,
            service_duration,
        })
    }

    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    pub fn urgent(&self) -> bool {
        self.urgent
    }

    pub fn service_duration(&self) -> f64 {
        self.service_duration
    }
}

/// Draws service durations according to the configured probability laws and
/// stamps out immutable `Patient` records.
///
/// The uniform distributions and complexity splits are built once at
/// construction, so a bad range fails here rather than on the first draw.
pub struct PatientFactory {
    normal: Uniform<f64>,
    complex: Uniform<f64>,
    urgent: Uniform<f64>,
    complex_split: Bernoulli,
    urgent_complex_split: Bernoulli,
}

impl PatientFactory {
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let complex_split = Bernoulli::new(config.complex_probability).map_err(|e| {
            SimError::Configuration(format!("invalid complex probability: {}", e))
        })?;
        let urgent_complex_split =
            Bernoulli::new(config.urgent_complex_probability).map_err(|e| {
                SimError::Configuration(format!("invalid urgent complex probability: {}", e))
            })?;

        Ok(Self {
            normal: Uniform::new_inclusive(config.normal_duration.min, config.normal_duration.max),
            complex: Uniform::new_inclusive(
                config.complex_duration.min,
                config.complex_duration.max,
            ),
            urgent: Uniform::new_inclusive(config.urgent_duration.min, config.urgent_duration.max),
            complex_split,
            urgent_complex_split,
        })
    }

    /// Draw a service duration for the given urgency class and return the
    /// patient record.
    pub fn create<R: Rng + ?Sized>(
        &self,
        arrival_time: f64,
        urgent: bool,
        rng: &mut R,
    ) -> Result<Patient, SimError> {
        let service_duration = if urgent {
            if self.urgent_complex_split.sample(rng) {
                self.complex.sample(rng)
            } else {
                self.urgent.sample(rng)
            }
        } else if self.complex_split.sample(rng) {
            self.complex.sample(rng)
        } else {
            self.normal.sample(rng)
        };

        Patient::new(arrival_time, urgent, service_duration)
    }
}
