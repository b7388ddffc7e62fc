use crate::core::config::SimConfig;
use crate::core::error::SimError;
use crate::core::patient::{Patient, PatientFactory};
use crate::core::queue::WaitingQueue;
use crate::core::scenario::ScenarioGenerator;
use crate::core::stats::RunStatistics;
use crate::core::timeline::{Event, EventTimeline};
use log::{debug, trace};
use rand::RngCore;

/// One unit of service capacity. `busy_until` is the simulation time at
/// which the server frees up; `total_busy_time` accumulates the durations of
/// every service assigned to it.
#[derive(Debug, Clone, Default)]
struct Server {
    busy_until: f64,
    total_busy_time: f64,
}

/// The event-driven engine for one simulated shift.
///
/// Owns the server pool, the waiting queue, and all accumulators, and drives
/// the event timeline to completion. Arrivals are scheduled up front via
/// [`ClinicSimulator::schedule_arrival`]; [`ClinicSimulator::run`] then
/// processes events in time order until the timeline drains.
pub struct ClinicSimulator {
    config: SimConfig,
    servers: Vec<Server>,
    queue: WaitingQueue,
    timeline: EventTimeline,
    waiting_time_total: f64,
    patients_processed: usize,
    urgent_count: usize,
    queue_length_series: Vec<(f64, usize)>,
}

impl ClinicSimulator {
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        let servers = vec![Server::default(); config.num_servers];
        Ok(Self {
            config,
            servers,
            queue: WaitingQueue::new(),
            timeline: EventTimeline::new(),
            waiting_time_total: 0.0,
            patients_processed: 0,
            urgent_count: 0,
            queue_length_series: Vec::new(),
        })
    }

    /// Schedule a patient's arrival event. Arrival times outside the shift
    /// are a scenario defect and are rejected here, before the event loop.
    pub fn schedule_arrival(&mut self, patient: Patient) -> Result<(), SimError> {
        let time = patient.arrival_time();
        if time >= self.config.shift_duration_minutes {
            return Err(SimError::Configuration(format!(
                "arrival time {} lies outside the shift of {} minutes",
                time, self.config.shift_duration_minutes
            )));
        }
        if patient.urgent() {
            self.urgent_count += 1;
        }
        self.timeline.push(Event::Arrival { time, patient });
        Ok(())
    }

    /// Index of the free server with the smallest `busy_until` at time `t`,
    /// lowest index on ties. A linear scan is fine for server pools in the
    /// tens.
    fn free_server(&self, t: f64) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, server) in self.servers.iter().enumerate() {
            if server.busy_until <= t
                && best.map_or(true, |b| server.busy_until < self.servers[b].busy_until)
            {
                best = Some(idx);
            }
        }
        best
    }

    /// Begin serving `patient` on server `server` at time `start`, schedule
    /// the matching release, and fold the waiting time into the totals.
    fn start_service(&mut self, server: usize, patient: &Patient, start: f64, waiting_time: f64) {
        let duration = patient.service_duration();
        let busy_until = start + duration;

        self.servers[server].busy_until = busy_until;
        self.servers[server].total_busy_time += duration;
        self.waiting_time_total += waiting_time;
        self.patients_processed += 1;

        trace!(
            "t={:.2}: server {} takes patient (arrived {:.2}, urgent: {}, waited {:.2}), busy until {:.2}",
            start,
            server,
            patient.arrival_time(),
            patient.urgent(),
            waiting_time,
            busy_until
        );

        self.timeline.push(Event::Release {
            time: busy_until,
            server,
        });
    }

    /// Process all pending events in time order and return the run's
    /// statistics. Consumes the simulator; a run is not resumable.
    pub fn run(mut self) -> Result<RunStatistics, SimError> {
        let mut clock = 0.0;

        while let Some(event) = self.timeline.pop_earliest() {
            let t = event.time();
            if t < clock {
                return Err(SimError::Invariant(format!(
                    "event at time {} popped after clock reached {}",
                    t, clock
                )));
            }
            clock = t;

            match event {
                Event::Arrival { time, patient } => {
                    debug!(
                        "t={:.2}: arrival (urgent: {}), {} waiting",
                        time,
                        patient.urgent(),
                        self.queue.len()
                    );
                    // Patients already waiting are served first. A server that
                    // is free while the queue is non-empty can only be one
                    // released at this very timestamp, and its pending release
                    // event belongs to the head of the queue.
                    if self.queue.is_empty() {
                        match self.free_server(time) {
                            Some(server) => self.start_service(server, &patient, time, 0.0),
                            None => self.queue.push(patient),
                        }
                    } else {
                        self.queue.push(patient);
                    }
                }
                Event::Release { time, server } => {
                    debug!(
                        "t={:.2}: server {} free, {} waiting",
                        time,
                        server,
                        self.queue.len()
                    );
                    // A same-time arrival may have retaken this server while
                    // the queue was empty; that service scheduled its own
                    // release, so this event is stale and must not assign a
                    // second patient to a busy server.
                    if self.servers[server].busy_until > time {
                        trace!("t={:.2}: server {} already retaken, stale release", time, server);
                    } else if let Some(patient) = self.queue.pop_next() {
                        let waiting_time = time - patient.arrival_time();
                        if waiting_time < 0.0 {
                            return Err(SimError::Invariant(format!(
                                "negative waiting time {} for patient arriving at {}",
                                waiting_time,
                                patient.arrival_time()
                            )));
                        }
                        self.start_service(server, &patient, time, waiting_time);
                    }
                }
            }

            self.queue_length_series.push((clock, self.queue.len()));
        }

        if !self.queue.is_empty() {
            return Err(SimError::Invariant(format!(
                "timeline drained with {} patients still waiting",
                self.queue.len()
            )));
        }

        Ok(self.into_statistics())
    }

    fn into_statistics(self) -> RunStatistics {
        let average_waiting_time = if self.patients_processed > 0 {
            self.waiting_time_total / self.patients_processed as f64
        } else {
            0.0
        };

        // Utilization charges each server the full duration of every service
        // it was assigned, divided by the nominal shift length, even when the
        // last service completes after shift end.
        let shift = self.config.shift_duration_minutes;
        let utilization_by_server = self
            .servers
            .iter()
            .map(|server| server.total_busy_time / shift)
            .collect();

        RunStatistics {
            average_waiting_time,
            utilization_by_server,
            queue_length_series: self.queue_length_series,
            patients_processed: self.patients_processed,
            urgent_count: self.urgent_count,
        }
    }
}

/// Simulate one full shift: generate the arrival plan, draw each patient's
/// service duration, and drive the event loop to completion.
pub fn simulate_one_run<S, R>(
    scenario: &S,
    config: &SimConfig,
    rng: &mut R,
) -> Result<RunStatistics, SimError>
where
    S: ScenarioGenerator + ?Sized,
    R: RngCore,
{
    let factory = PatientFactory::new(config)?;
    let mut simulator = ClinicSimulator::new(config.clone())?;

    let arrivals = scenario.generate(config, rng);
    debug!(
        "generated arrival plan: {} scheduled, {} urgent",
        arrivals.scheduled.len(),
        arrivals.urgent.len()
    );

    for &time in &arrivals.scheduled {
        let patient = factory.create(time, false, rng)?;
        simulator.schedule_arrival(patient)?;
    }
    for &time in &arrivals.urgent {
        let patient = factory.create(time, true, rng)?;
        simulator.schedule_arrival(patient)?;
    }

    simulator.run()
}
