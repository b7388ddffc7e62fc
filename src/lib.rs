pub mod core;

// Re-export commonly used types
pub use crate::core::clinic::{simulate_one_run, ClinicSimulator};
pub use crate::core::config::{DurationRange, SimConfig};
pub use crate::core::error::SimError;
pub use crate::core::patient::{Patient, PatientFactory};
pub use crate::core::queue::WaitingQueue;
pub use crate::core::replication::{simulate_replications, ReplicationRunner};
pub use crate::core::scenario::{FixedScenario, ScenarioArrivals, ScenarioGenerator, ScheduledDay};
pub use crate::core::stats::{AggregateStatistics, MetricSummary, RunStatistics};
pub use crate::core::timeline::{Event, EventTimeline};
