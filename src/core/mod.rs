pub mod clinic;
pub mod config;
pub mod error;
pub mod patient;
pub mod queue;
pub mod replication;
pub mod scenario;
pub mod stats;
pub mod timeline;
